//! # dwhctl-core
//!
//! Core library for `dwhctl`: configuration, the AWS control-plane seam, and
//! the provisioning workflows that create and tear down a Redshift data
//! warehouse cluster.
//!
//! ## Layout
//!
//! - [`config`] - TOML settings with env-var expansion
//! - [`provider`] - traits for the four provider boundaries (identity, roles,
//!   cluster lifecycle, network rules)
//! - [`aws`] - the AWS SDK implementation of those traits
//! - [`workflows`] - multi-step operations ("create and wait", "delete and
//!   wait", role cleanup) with progress callbacks
//! - [`wait`] - bounded fixed-interval polling
//! - [`connection`] / [`probe`] - connection string assembly and the
//!   data-plane connectivity check
//! - [`password`] - secure master-password generation
//!
//! Workflows are generic over the provider traits, so they are exercised in
//! tests against scripted in-memory providers without touching AWS.

pub mod aws;
pub mod config;
pub mod connection;
pub mod error;
pub mod password;
pub mod probe;
pub mod provider;
pub mod wait;
pub mod workflows;

pub use config::{ConfigError, Settings};
pub use connection::ConnectionString;
pub use error::{CoreError, Result};
pub use provider::{CallerIdentity, ClusterDescription, ClusterEndpoint, ClusterSpec};
pub use wait::WaitSettings;
pub use workflows::{ProgressCallback, ProgressEvent};
