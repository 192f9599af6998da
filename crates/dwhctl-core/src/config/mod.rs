//! Configuration loading and validation

mod error;
mod settings;

pub use error::{ConfigError, Result};
pub use settings::{AwsSettings, ClusterSettings, ProbeSettings, ProvisionSettings, Settings};
