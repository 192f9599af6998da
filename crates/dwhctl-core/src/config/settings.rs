//! Configuration for dwhctl
//!
//! Settings are stored in TOML with `[aws]`, `[cluster]`, `[provision]` and
//! `[probe]` sections. Values support `${VAR}` and `${VAR:-default}`
//! environment variable expansion so credentials never have to be written
//! into the file verbatim.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::error::{ConfigError, Result};

/// Top-level settings parsed from the config file
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    /// Provider credentials and region
    pub aws: AwsSettings,
    /// Warehouse cluster parameters
    pub cluster: ClusterSettings,
    /// Polling behaviour for create/delete waits
    #[serde(default)]
    pub provision: ProvisionSettings,
    /// Connectivity-check parameters
    #[serde(default)]
    pub probe: ProbeSettings,
}

/// `[aws]` section: static credentials plus region
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AwsSettings {
    pub access_key_id: String,
    pub secret_access_key: String,
    #[serde(default = "default_region")]
    pub region: String,
}

/// `[cluster]` section: everything the create-cluster call needs
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClusterSettings {
    /// Cluster identifier, unique per region
    pub identifier: String,
    /// Name of the IAM role the cluster assumes for storage access
    pub iam_role_name: String,
    /// Initial database name
    pub database: String,
    pub master_username: String,
    /// Master password; generated at create time when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_password: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_number_of_nodes")]
    pub number_of_nodes: i32,
    #[serde(default = "default_cluster_type")]
    pub cluster_type: String,
    #[serde(default = "default_node_type")]
    pub node_type: String,
}

/// `[provision]` section: fixed-interval polling with a timeout ceiling
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProvisionSettings {
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// `[probe]` section: full connection string for `check_redshift`
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ProbeSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_string: Option<String>,
}

impl Default for ProvisionSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ProvisionSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_region() -> String {
    "us-west-2".to_string()
}

fn default_port() -> u16 {
    5439
}

fn default_number_of_nodes() -> i32 {
    4
}

fn default_cluster_type() -> String {
    "multi-node".to_string()
}

fn default_node_type() -> String {
    "dc2.large".to_string()
}

fn default_poll_interval_secs() -> u64 {
    60
}

fn default_timeout_secs() -> u64 {
    1800
}

impl Settings {
    /// Load settings from the standard location.
    ///
    /// `./dwh.toml` is preferred when present so a project-local config wins
    /// over the per-user one under the platform config directory.
    pub fn load() -> Result<Self> {
        let local = Path::new("dwh.toml");
        if local.exists() {
            return Self::load_from_path(local);
        }

        let path = Self::config_path()?;
        if !path.exists() {
            return Err(ConfigError::NotFound);
        }
        Self::load_from_path(&path)
    }

    /// Load settings from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::LoadError {
            path: path.display().to_string(),
            source: e,
        })?;

        let expanded = Self::expand_env_vars(&content);
        let settings: Settings = toml::from_str(&expanded)?;
        Ok(settings)
    }

    /// The per-user config file path
    ///
    /// Linux: `~/.config/dwhctl/dwh.toml`
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("io", "dwhctl", "dwhctl").ok_or(ConfigError::ConfigDirError)?;
        Ok(proj_dirs.config_dir().join("dwh.toml"))
    }

    /// Expand `${VAR}` and `${VAR:-default}` in configuration content.
    ///
    /// Unset variables without a default are left as-is rather than erroring,
    /// so sections unused by the current command never block parsing.
    fn expand_env_vars(content: &str) -> String {
        shellexpand::env_with_context_no_errors(content, |var| std::env::var(var).ok()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[aws]
access_key_id = "AKIATEST"
secret_access_key = "shhh"

[cluster]
identifier = "dwh-cluster"
iam_role_name = "dwhRole"
database = "dwh"
master_username = "dwhuser"
"#;

    #[test]
    fn minimal_config_applies_defaults() {
        let settings: Settings = toml::from_str(MINIMAL).unwrap();

        assert_eq!(settings.aws.region, "us-west-2");
        assert_eq!(settings.cluster.port, 5439);
        assert_eq!(settings.cluster.number_of_nodes, 4);
        assert_eq!(settings.cluster.cluster_type, "multi-node");
        assert_eq!(settings.cluster.node_type, "dc2.large");
        assert!(settings.cluster.master_password.is_none());
        assert_eq!(settings.provision.poll_interval_secs, 60);
        assert_eq!(settings.provision.timeout_secs, 1800);
        assert!(settings.probe.connection_string.is_none());
    }

    #[test]
    fn missing_required_key_is_an_error() {
        // no master_username
        let content = r#"
[aws]
access_key_id = "AKIATEST"
secret_access_key = "shhh"

[cluster]
identifier = "dwh-cluster"
iam_role_name = "dwhRole"
database = "dwh"
"#;
        let err = toml::from_str::<Settings>(content).unwrap_err();
        assert!(err.to_string().contains("master_username"));
    }

    #[test]
    fn missing_section_is_an_error() {
        let err = toml::from_str::<Settings>("[aws]\naccess_key_id = \"k\"\nsecret_access_key = \"s\"\n").unwrap_err();
        assert!(err.to_string().contains("cluster"));
    }

    #[test]
    #[serial_test::serial]
    fn env_var_expansion() {
        unsafe {
            std::env::set_var("DWH_TEST_KEY", "expanded-key");
        }

        let content = r#"
[aws]
access_key_id = "${DWH_TEST_KEY}"
secret_access_key = "${DWH_TEST_MISSING:-fallback-secret}"
"#;

        let expanded = Settings::expand_env_vars(content);
        assert!(expanded.contains("expanded-key"));
        assert!(expanded.contains("fallback-secret"));

        unsafe {
            std::env::remove_var("DWH_TEST_KEY");
        }
    }

    #[test]
    #[serial_test::serial]
    fn unset_vars_without_default_are_left_verbatim() {
        unsafe {
            std::env::remove_var("DWH_NEVER_SET");
        }
        let expanded = Settings::expand_env_vars("key = \"${DWH_NEVER_SET}\"");
        assert_eq!(expanded, "key = \"${DWH_NEVER_SET}\"");
    }

    #[test]
    fn load_from_path_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dwh.toml");
        std::fs::write(&path, MINIMAL).unwrap();

        let settings = Settings::load_from_path(&path).unwrap();
        assert_eq!(settings.cluster.identifier, "dwh-cluster");
    }

    #[test]
    fn load_from_missing_path_is_an_error() {
        let err = Settings::load_from_path(Path::new("/nonexistent/dwh.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError { .. }));
    }

    #[test]
    fn provision_durations() {
        let provision = ProvisionSettings {
            poll_interval_secs: 5,
            timeout_secs: 30,
        };
        assert_eq!(provision.poll_interval(), Duration::from_secs(5));
        assert_eq!(provision.timeout(), Duration::from_secs(30));
    }
}
