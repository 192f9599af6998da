//! Control-plane seam
//!
//! Four traits describe the provider boundaries the workflows depend on:
//! identity verification, role management, cluster lifecycle and network rule
//! management. Production code wires them to the AWS SDK clients in
//! [`crate::aws`]; tests implement them over scripted in-memory responses.

use async_trait::async_trait;

use crate::error::Result;

/// Identity metadata returned by the credential check
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CallerIdentity {
    pub user_id: String,
    pub account: String,
    pub arn: String,
}

/// Everything the create-cluster call needs, resolved from config plus the
/// role ARN looked up at provisioning time
#[derive(Debug, Clone)]
pub struct ClusterSpec {
    pub identifier: String,
    pub node_type: String,
    pub number_of_nodes: i32,
    pub cluster_type: String,
    pub database: String,
    pub master_username: String,
    pub master_password: String,
    pub port: u16,
    pub role_arn: String,
}

/// Reachable endpoint of an available cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterEndpoint {
    pub address: String,
    pub port: u16,
}

/// Snapshot of cluster state from a describe call
#[derive(Debug, Clone, Default)]
pub struct ClusterDescription {
    /// Raw status string, e.g. "creating", "available", "deleting"
    pub status: String,
    /// Present once the cluster is reachable
    pub endpoint: Option<ClusterEndpoint>,
    /// First attached VPC security group, used for the ingress rule
    pub vpc_security_group_id: Option<String>,
}

impl ClusterDescription {
    /// The terminal state creation waits for
    pub fn is_available(&self) -> bool {
        self.status.eq_ignore_ascii_case("available")
    }
}

/// Identity-verification service (STS)
#[async_trait]
pub trait IdentityApi {
    async fn caller_identity(&self) -> Result<CallerIdentity>;
}

/// Identity-and-access-role management service (IAM)
#[async_trait]
pub trait RoleApi {
    /// Look up a role by name, returning its ARN if it exists
    async fn role_arn(&self, name: &str) -> Result<Option<String>>;

    /// Create a role with a trust policy permitting the warehouse service to
    /// assume it, returning the new ARN
    async fn create_service_role(&self, name: &str) -> Result<String>;

    /// Attach the fixed read-only storage-access policy
    async fn attach_read_policy(&self, name: &str) -> Result<()>;

    /// Detach the fixed read-only storage-access policy
    async fn detach_read_policy(&self, name: &str) -> Result<()>;

    async fn delete_role(&self, name: &str) -> Result<()>;
}

/// Cluster lifecycle management service (Redshift)
#[async_trait]
pub trait ClusterApi {
    async fn create_cluster(&self, spec: &ClusterSpec) -> Result<()>;

    /// Describe a cluster; a missing cluster is `CoreError::ClusterNotFound`
    async fn describe_cluster(&self, identifier: &str) -> Result<ClusterDescription>;

    /// Delete a cluster, skipping the final snapshot
    async fn delete_cluster(&self, identifier: &str) -> Result<()>;
}

/// Virtual-network rule management service (EC2)
#[async_trait]
pub trait NetworkApi {
    /// Open inbound TCP on `port` from any source address.
    ///
    /// An already-existing identical rule counts as success.
    async fn open_ingress(&self, group_id: &str, port: u16) -> Result<()>;
}
