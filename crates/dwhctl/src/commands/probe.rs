//! `check_redshift` - data-plane connectivity probe

use dwhctl_core::config::ConfigError;
use dwhctl_core::{Settings, probe};

use crate::cli::OutputFormat;
use crate::error::{DwhCtlError, Result};
use crate::output::print_output;

pub async fn handle_check_connection(settings: &Settings, output: OutputFormat) -> Result<()> {
    let url = settings
        .probe
        .connection_string
        .as_deref()
        .ok_or_else(|| {
            DwhCtlError::Config(ConfigError::MissingKey("probe.connection_string".into()))
        })?;

    probe::check_connection(url).await?;

    if output.is_structured() {
        print_output(serde_json::json!({ "connected": true }), output)?;
    } else {
        println!("Connection succeeded.");
    }
    Ok(())
}
