//! Unified error handling for dwhctl-core
//!
//! Every control-plane and data-plane failure is folded into [`CoreError`]
//! so callers can branch on the error kind instead of parsing message text.
//! The deletion workflow in particular relies on [`CoreError::is_not_found`]
//! being true only for a genuine not-found condition, never for a transient
//! provider error.

use std::time::Duration;
use thiserror::Error;

/// Core error type for provisioning operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// Error returned by an AWS control-plane call
    #[error("AWS API error: {0}")]
    Api(String),

    /// The cluster does not exist (Redshift `ClusterNotFoundFault`)
    #[error("cluster '{0}' not found")]
    ClusterNotFound(String),

    /// The IAM role does not exist
    #[error("role '{0}' not found")]
    RoleNotFound(String),

    /// A provider response was missing a field the workflow needs
    #[error("incomplete provider response: {0}")]
    IncompleteResponse(String),

    /// A bounded wait ran out of time
    #[error("timed out after {0:?} waiting for the cluster to change state")]
    Timeout(Duration),

    /// Database connectivity probe failure
    #[error("connection probe failed: {0}")]
    Probe(String),

    /// Configuration error surfaced from a workflow
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Returns true if this is a "resource does not exist" error.
    ///
    /// Deletion polling treats this, and only this, as the terminal signal.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::ClusterNotFound(_) | CoreError::RoleNotFound(_)
        )
    }

    /// Returns true if the operation ran out of its wait ceiling
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, CoreError::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_limited_to_missing_resources() {
        assert!(CoreError::ClusterNotFound("dwh".into()).is_not_found());
        assert!(CoreError::RoleNotFound("dwhRole".into()).is_not_found());
        assert!(!CoreError::Api("throttled".into()).is_not_found());
        assert!(!CoreError::Timeout(Duration::from_secs(60)).is_not_found());
    }

    #[test]
    fn timeout_helper() {
        assert!(CoreError::Timeout(Duration::from_secs(1800)).is_timeout());
        assert!(!CoreError::Api("boom".into()).is_timeout());
    }

    #[test]
    fn display_names_the_resource() {
        let err = CoreError::ClusterNotFound("dwh-cluster".into());
        assert!(err.to_string().contains("dwh-cluster"));

        let err = CoreError::Timeout(Duration::from_secs(60));
        assert!(err.to_string().contains("timed out"));
    }
}
