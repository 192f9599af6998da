//! `create_redshift` / `delete_redshift` - cluster lifecycle with a spinner
//! fed by workflow progress events

use std::time::Duration;

use indicatif::ProgressBar;
use tracing::info;

use dwhctl_core::aws::AwsProvider;
use dwhctl_core::{
    password, ProgressCallback, ProgressEvent, Settings, WaitSettings, workflows,
};

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::output::print_output;

/// Spinner wired to workflow progress events.
///
/// Returns `None` for structured output so JSON/YAML streams stay clean.
fn spinner(output: OutputFormat) -> (Option<ProgressBar>, Option<ProgressCallback>) {
    if output.is_structured() {
        return (None, None);
    }

    let bar = ProgressBar::new_spinner();
    bar.enable_steady_tick(Duration::from_millis(120));

    let sink = bar.clone();
    let callback: ProgressCallback = Box::new(move |event| match event {
        ProgressEvent::Started { identifier } => {
            sink.set_message(format!("waiting for cluster '{identifier}'"));
        }
        ProgressEvent::Polling {
            status, elapsed, ..
        } => {
            sink.set_message(format!("status: {status} ({}s elapsed)", elapsed.as_secs()));
        }
        ProgressEvent::Completed { .. } => {}
    });

    (Some(bar), Some(callback))
}

fn wait_settings(settings: &Settings) -> WaitSettings {
    WaitSettings::new(
        settings.provision.poll_interval(),
        settings.provision.timeout(),
    )
}

pub async fn handle_create(
    provider: &AwsProvider,
    settings: &Settings,
    output: OutputFormat,
) -> Result<()> {
    let master_password = match &settings.cluster.master_password {
        Some(password) => password.clone(),
        None => {
            info!("no master_password configured; generating one");
            password::generate(password::DEFAULT_LENGTH)
        }
    };

    let (bar, on_progress) = spinner(output);
    let result = workflows::create_cluster_and_wait(
        provider,
        provider,
        provider,
        &settings.cluster,
        &master_password,
        wait_settings(settings),
        on_progress,
    )
    .await;
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
    let connection = result?;

    if output.is_structured() {
        print_output(
            serde_json::json!({
                "cluster": settings.cluster.identifier,
                "status": "available",
                "connection_string": connection.url(),
            }),
            output,
        )?;
    } else {
        println!("Cluster '{}' is available.", settings.cluster.identifier);
        println!("{}", connection.url());
    }
    Ok(())
}

pub async fn handle_delete(
    provider: &AwsProvider,
    settings: &Settings,
    output: OutputFormat,
) -> Result<()> {
    let (bar, on_progress) = spinner(output);
    let result = workflows::delete_cluster_and_wait(
        provider,
        &settings.cluster.identifier,
        wait_settings(settings),
        on_progress,
    )
    .await;
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
    result?;

    // Role cleanup only runs after the cluster is confirmed gone; its failure
    // is reported on its own, with the deletion already done.
    workflows::cleanup_role(provider, &settings.cluster.iam_role_name).await?;

    if output.is_structured() {
        print_output(
            serde_json::json!({
                "cluster": settings.cluster.identifier,
                "role": settings.cluster.iam_role_name,
                "deleted": true,
            }),
            output,
        )?;
    } else {
        println!(
            "Cluster '{}' deleted and role '{}' removed.",
            settings.cluster.identifier, settings.cluster.iam_role_name
        );
    }
    Ok(())
}
