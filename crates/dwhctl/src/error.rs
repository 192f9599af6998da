//! Error types for the dwhctl binary

use colored::Colorize;
use dwhctl_core::{ConfigError, CoreError};
use thiserror::Error;

/// Main error type for the dwhctl application
#[derive(Error, Debug)]
pub enum DwhCtlError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("output formatting error: {0}")]
    Output(String),
}

/// Result type for dwhctl operations
pub type Result<T> = std::result::Result<T, DwhCtlError>;

impl DwhCtlError {
    /// Helpful follow-ups for resolving this error
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            DwhCtlError::Config(ConfigError::NotFound) => vec![
                "Create a dwh.toml in the current directory".to_string(),
                "Or pass an explicit path: dwhctl --config-file /path/to/dwh.toml".to_string(),
            ],
            DwhCtlError::Config(_) => vec![
                "Check the config file syntax and required keys: [aws] access_key_id, \
                 secret_access_key; [cluster] identifier, iam_role_name, database, master_username"
                    .to_string(),
            ],
            DwhCtlError::Core(err) if err.is_timeout() => vec![
                "The cluster may still be changing state; re-run the command later".to_string(),
                "Raise [provision] timeout_secs if provisioning routinely takes longer".to_string(),
            ],
            DwhCtlError::Core(CoreError::ClusterNotFound(identifier)) => vec![format!(
                "No cluster named '{identifier}' exists in the configured region"
            )],
            DwhCtlError::Core(CoreError::Probe(_)) => vec![
                "Verify [probe] connection_string and that the cluster is available".to_string(),
                "Check that the security group permits inbound traffic on the database port"
                    .to_string(),
            ],
            _ => vec![],
        }
    }

    /// Print a cargo-style `error:` diagnostic with tips to stderr
    pub fn print_diagnostic(&self) {
        eprint!("{}{}", "error".red().bold(), ": ".bold());
        eprintln!("{}", self);

        for suggestion in self.suggestions() {
            eprint!("  {}{}", "tip".yellow().bold(), ": ".bold());
            eprintln!("{}", suggestion);
        }
    }
}

impl From<serde_json::Error> for DwhCtlError {
    fn from(err: serde_json::Error) -> Self {
        DwhCtlError::Output(format!("JSON error: {err}"))
    }
}

impl From<serde_yaml::Error> for DwhCtlError {
    fn from(err: serde_yaml::Error) -> Self {
        DwhCtlError::Output(format!("YAML error: {err}"))
    }
}
