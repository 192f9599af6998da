//! Error types for configuration operations

use thiserror::Error;

/// Errors that can occur while loading or interpreting the config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config from {path}: {source}")]
    LoadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("no config file found; create ./dwh.toml or pass --config-file")]
    NotFound,

    #[error("missing configuration key: {0}")]
    MissingKey(String),

    #[error("failed to determine config directory")]
    ConfigDirError,
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
