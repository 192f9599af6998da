//! Provisioning workflows - multi-step control-plane operations
//!
//! These compose the provider seam with bounded waiting and progress
//! callbacks. Each workflow is generic over the trait boundaries so the CLI
//! wires in [`crate::aws::AwsProvider`] while tests use scripted fakes.

use std::time::Duration;

use tracing::{info, warn};

use crate::config::ClusterSettings;
use crate::connection::ConnectionString;
use crate::error::{CoreError, Result};
use crate::provider::{
    CallerIdentity, ClusterApi, ClusterDescription, ClusterSpec, IdentityApi, NetworkApi, RoleApi,
};
use crate::wait::{WaitSettings, wait_until};

/// Progress events emitted while a workflow polls the control plane
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// The lifecycle call has been issued
    Started { identifier: String },
    /// One polling iteration with the current status
    Polling {
        identifier: String,
        status: String,
        elapsed: Duration,
    },
    /// The wait reached its terminal condition
    Completed { identifier: String },
}

/// Callback type for progress updates
///
/// The CLI uses this to feed a spinner; tests usually pass `None`.
pub type ProgressCallback = Box<dyn Fn(ProgressEvent) + Send + Sync>;

fn emit(callback: &Option<ProgressCallback>, event: ProgressEvent) {
    if let Some(cb) = callback {
        cb(event);
    }
}

/// Verify credentials by asking the identity service who we are
pub async fn check_credentials(identity: &impl IdentityApi) -> Result<CallerIdentity> {
    let caller = identity.caller_identity().await?;
    info!("credentials verified for {}", caller.arn);
    Ok(caller)
}

/// Look up the cluster role by name, creating it (with the read-only storage
/// policy attached) when absent. Returns the role ARN either way.
pub async fn ensure_role(roles: &impl RoleApi, name: &str) -> Result<String> {
    if let Some(arn) = roles.role_arn(name).await? {
        info!("role '{}' already exists: {}", name, arn);
        return Ok(arn);
    }

    let arn = roles.create_service_role(name).await?;
    roles.attach_read_policy(name).await?;
    info!("created role '{}' and attached read-only storage policy", name);
    Ok(arn)
}

/// Create the cluster and wait for it to become available.
///
/// Steps: ensure the role, issue the create call, poll until the status is
/// `available`, assemble the connection string from the reported endpoint
/// plus the locally known credentials, then open the inbound network rule on
/// the cluster's VPC security group for the database port.
pub async fn create_cluster_and_wait(
    roles: &impl RoleApi,
    clusters: &impl ClusterApi,
    network: &impl NetworkApi,
    settings: &ClusterSettings,
    master_password: &str,
    wait: WaitSettings,
    on_progress: Option<ProgressCallback>,
) -> Result<ConnectionString> {
    let role_arn = ensure_role(roles, &settings.iam_role_name).await?;

    let spec = ClusterSpec {
        identifier: settings.identifier.clone(),
        node_type: settings.node_type.clone(),
        number_of_nodes: settings.number_of_nodes,
        cluster_type: settings.cluster_type.clone(),
        database: settings.database.clone(),
        master_username: settings.master_username.clone(),
        master_password: master_password.to_string(),
        port: settings.port,
        role_arn,
    };

    clusters.create_cluster(&spec).await?;
    emit(
        &on_progress,
        ProgressEvent::Started {
            identifier: spec.identifier.clone(),
        },
    );

    let on_progress_ref = &on_progress;
    let identifier = spec.identifier.as_str();
    let description: ClusterDescription = wait_until(wait, |elapsed| async move {
        let description = clusters.describe_cluster(identifier).await?;
        if description.is_available() {
            return Ok(Some(description));
        }
        emit(
            on_progress_ref,
            ProgressEvent::Polling {
                identifier: identifier.to_string(),
                status: description.status.clone(),
                elapsed,
            },
        );
        Ok(None)
    })
    .await?;

    emit(
        &on_progress,
        ProgressEvent::Completed {
            identifier: spec.identifier.clone(),
        },
    );

    let endpoint = description.endpoint.ok_or_else(|| {
        CoreError::IncompleteResponse("available cluster reported no endpoint".into())
    })?;

    let connection = ConnectionString {
        username: spec.master_username.clone(),
        password: spec.master_password.clone(),
        host: endpoint.address,
        port: endpoint.port,
        database: spec.database.clone(),
    };

    match description.vpc_security_group_id {
        Some(group_id) => network.open_ingress(&group_id, spec.port).await?,
        None => warn!(
            "cluster '{}' reported no VPC security group; skipping ingress rule",
            spec.identifier
        ),
    }

    Ok(connection)
}

/// Delete the cluster (skipping the final snapshot) and wait until the
/// control plane no longer knows it.
///
/// The terminal signal is the specific cluster-not-found error from the
/// describe call, not any status string; any other describe error propagates
/// instead of being misread as "deleted".
pub async fn delete_cluster_and_wait(
    clusters: &impl ClusterApi,
    identifier: &str,
    wait: WaitSettings,
    on_progress: Option<ProgressCallback>,
) -> Result<()> {
    clusters.delete_cluster(identifier).await?;
    emit(
        &on_progress,
        ProgressEvent::Started {
            identifier: identifier.to_string(),
        },
    );

    let on_progress_ref = &on_progress;
    wait_until(wait, |elapsed| async move {
        match clusters.describe_cluster(identifier).await {
            Ok(description) => {
                emit(
                    on_progress_ref,
                    ProgressEvent::Polling {
                        identifier: identifier.to_string(),
                        status: description.status,
                        elapsed,
                    },
                );
                Ok(None)
            }
            Err(err) if err.is_not_found() => Ok(Some(())),
            Err(err) => Err(err),
        }
    })
    .await?;

    emit(
        &on_progress,
        ProgressEvent::Completed {
            identifier: identifier.to_string(),
        },
    );
    info!("cluster '{}' deleted", identifier);
    Ok(())
}

/// Detach the storage policy and delete the role.
///
/// Fails if either step fails; a detach that succeeded before a failed delete
/// is not rolled back.
pub async fn cleanup_role(roles: &impl RoleApi, name: &str) -> Result<()> {
    roles.detach_read_policy(name).await?;
    roles.delete_role(name).await?;
    info!("role '{}' removed", name);
    Ok(())
}
