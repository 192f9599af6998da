//! CLI structure
//!
//! A single required `--command` flag selects the operation, mirroring the
//! tool's original surface: commands are matched as strings so an
//! unrecognized value prints usage and exits 0 instead of producing a parse
//! error.

use clap::Parser;

/// The command values `main` dispatches on
pub const COMMANDS: &[&str] = &[
    "check_credentials",
    "create_redshift",
    "delete_redshift",
    "check_redshift",
    "help",
];

/// Data warehouse provisioning CLI for AWS Redshift
#[derive(Parser, Debug)]
#[command(name = "dwhctl")]
#[command(version, about = "Provision and tear down a Redshift data warehouse cluster")]
#[command(long_about = "
Provision and tear down a Redshift data warehouse cluster

COMMANDS:
    check_credentials   Verify the AWS credentials in the config file
    create_redshift     Create the cluster (and its IAM role) and wait until
                        it is available, then print the connection string
    delete_redshift     Delete the cluster, wait until it is gone, then
                        remove the IAM role
    check_redshift      Open a database connection using [probe]
                        connection_string and report success
    help                Print this help text

CONFIGURATION:
    Settings are read from ./dwh.toml when present, otherwise from the
    per-user config directory (~/.config/dwhctl/dwh.toml on Linux), or from
    --config-file. Values support ${VAR} and ${VAR:-default} expansion.

EXAMPLES:
    # Verify credentials
    dwhctl --command check_credentials

    # Provision and print the connection string as JSON
    dwhctl --command create_redshift -o json

    # Tear everything down
    dwhctl --command delete_redshift
")]
pub struct Cli {
    /// Operation to run (check_credentials | create_redshift | delete_redshift | check_redshift | help)
    #[arg(long, value_name = "COMMAND")]
    pub command: String,

    /// Path to alternate configuration file
    #[arg(long, env = "DWHCTL_CONFIG_FILE")]
    pub config_file: Option<String>,

    /// Output format
    #[arg(long, short = 'o', value_enum, default_value = "auto")]
    pub output: OutputFormat,

    /// Enable verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(long, short, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    Auto,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

impl OutputFormat {
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Json | Self::Yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_command_and_output() {
        let cli = Cli::parse_from(["dwhctl", "--command", "create_redshift", "-o", "json"]);
        assert_eq!(cli.command, "create_redshift");
        assert_eq!(cli.output, OutputFormat::Json);
    }

    #[test]
    fn verbosity_stacks() {
        let cli = Cli::parse_from(["dwhctl", "--command", "help", "-vvv"]);
        assert_eq!(cli.verbose, 3);
    }
}
