use clap::{CommandFactory, Parser};
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod error;
mod output;

use cli::Cli;
use dwhctl_core::Settings;
use dwhctl_core::aws::AwsProvider;
use error::DwhCtlError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli::COMMANDS.contains(&cli.command.as_str()) && cli.command != "help" {
        if let Err(e) = execute_command(&cli).await {
            e.print_diagnostic();
            std::process::exit(1);
        }
    } else {
        // `help` and anything unrecognized both print usage and exit 0
        if cli.command != "help" {
            eprintln!("Command '{}' is not recognized.", cli.command);
        }
        print_usage();
    }
}

fn print_usage() {
    let mut cmd = Cli::command();
    let _ = cmd.print_long_help();
}

fn init_tracing(verbose: u8) {
    // RUST_LOG wins; otherwise map the -v count to a filter
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "dwhctl=warn,dwhctl_core=warn",
            1 => "dwhctl=info,dwhctl_core=info",
            2 => "dwhctl=debug,dwhctl_core=debug",
            _ => "dwhctl=trace,dwhctl_core=trace",
        };
        tracing_subscriber::EnvFilter::new(level)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .compact(),
        )
        .init();
}

fn load_settings(cli: &Cli) -> Result<Settings, DwhCtlError> {
    let settings = if let Some(path) = &cli.config_file {
        debug!("loading config from explicit path: {}", path);
        Settings::load_from_path(std::path::Path::new(path))?
    } else {
        debug!("loading config from default location");
        Settings::load()?
    };
    Ok(settings)
}

async fn execute_command(cli: &Cli) -> Result<(), DwhCtlError> {
    info!("command: {}", cli.command);
    let settings = load_settings(cli)?;

    let start = std::time::Instant::now();
    let result = match cli.command.as_str() {
        "check_credentials" => {
            let provider = AwsProvider::new(&settings.aws).await;
            commands::credentials::handle_check_credentials(&provider, cli.output).await
        }
        "create_redshift" => {
            let provider = AwsProvider::new(&settings.aws).await;
            commands::cluster::handle_create(&provider, &settings, cli.output).await
        }
        "delete_redshift" => {
            let provider = AwsProvider::new(&settings.aws).await;
            commands::cluster::handle_delete(&provider, &settings, cli.output).await
        }
        "check_redshift" => commands::probe::handle_check_connection(&settings, cli.output).await,
        other => {
            // main only routes known commands here
            debug!("no handler for '{}'", other);
            Ok(())
        }
    };

    let duration = start.elapsed();
    match &result {
        Ok(_) => info!("command completed in {:?}", duration),
        Err(e) => error!("command failed after {:?}: {}", duration, e),
    }
    result
}
