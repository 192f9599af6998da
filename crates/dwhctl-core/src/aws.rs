//! AWS implementation of the control-plane seam
//!
//! One [`AwsProvider`] owns the STS, IAM, Redshift and EC2 clients, all built
//! from a single `SdkConfig` derived from the `[aws]` config section. Errors
//! are folded into [`CoreError`]: the specific not-found faults become
//! structured variants, everything else becomes `CoreError::Api` carrying the
//! SDK's full display chain.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::Credentials;
use aws_smithy_types::error::display::DisplayErrorContext;
use tracing::{debug, info};

use crate::config::AwsSettings;
use crate::error::{CoreError, Result};
use crate::provider::{
    CallerIdentity, ClusterApi, ClusterDescription, ClusterEndpoint, ClusterSpec, IdentityApi,
    NetworkApi, RoleApi,
};

/// Trust policy permitting the warehouse service to assume the role
const REDSHIFT_TRUST_POLICY: &str = r#"{
  "Version": "2012-10-17",
  "Statement": [
    {
      "Effect": "Allow",
      "Principal": {"Service": "redshift.amazonaws.com"},
      "Action": "sts:AssumeRole"
    }
  ]
}"#;

/// Read-only storage-access policy attached to the cluster role
const S3_READ_ONLY_POLICY_ARN: &str = "arn:aws:iam::aws:policy/AmazonS3ReadOnlyAccess";

/// Build the shared SDK config from static credentials and a region
pub async fn sdk_config(settings: &AwsSettings) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(settings.region.clone()))
        .credentials_provider(Credentials::from_keys(
            settings.access_key_id.clone(),
            settings.secret_access_key.clone(),
            None,
        ))
        .load()
        .await
}

/// AWS-backed implementation of all four provider traits
#[derive(Clone)]
pub struct AwsProvider {
    sts: aws_sdk_sts::Client,
    iam: aws_sdk_iam::Client,
    redshift: aws_sdk_redshift::Client,
    ec2: aws_sdk_ec2::Client,
}

impl AwsProvider {
    pub async fn new(settings: &AwsSettings) -> Self {
        let config = sdk_config(settings).await;
        Self::from_sdk_config(&config)
    }

    pub fn from_sdk_config(config: &SdkConfig) -> Self {
        Self {
            sts: aws_sdk_sts::Client::new(config),
            iam: aws_sdk_iam::Client::new(config),
            redshift: aws_sdk_redshift::Client::new(config),
            ec2: aws_sdk_ec2::Client::new(config),
        }
    }
}

/// Fold any SDK error into `CoreError::Api` with its full source chain
fn api_err<E>(err: E) -> CoreError
where
    E: std::error::Error,
{
    CoreError::Api(format!("{}", DisplayErrorContext(&err)))
}

#[async_trait]
impl IdentityApi for AwsProvider {
    async fn caller_identity(&self) -> Result<CallerIdentity> {
        let response = self
            .sts
            .get_caller_identity()
            .send()
            .await
            .map_err(api_err)?;

        Ok(CallerIdentity {
            user_id: response.user_id().unwrap_or_default().to_string(),
            account: response.account().unwrap_or_default().to_string(),
            arn: response.arn().unwrap_or_default().to_string(),
        })
    }
}

#[async_trait]
impl RoleApi for AwsProvider {
    async fn role_arn(&self, name: &str) -> Result<Option<String>> {
        match self.iam.get_role().role_name(name).send().await {
            Ok(output) => Ok(output.role().map(|role| role.arn().to_string())),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_no_such_entity_exception() {
                    Ok(None)
                } else {
                    Err(api_err(service_err))
                }
            }
        }
    }

    async fn create_service_role(&self, name: &str) -> Result<String> {
        info!("creating IAM role '{}'", name);
        let output = self
            .iam
            .create_role()
            .role_name(name)
            .description("Allows Redshift clusters to call AWS services on your behalf")
            .assume_role_policy_document(REDSHIFT_TRUST_POLICY)
            .send()
            .await
            .map_err(api_err)?;

        output
            .role()
            .map(|role| role.arn().to_string())
            .ok_or_else(|| CoreError::IncompleteResponse("create-role returned no role".into()))
    }

    async fn attach_read_policy(&self, name: &str) -> Result<()> {
        self.iam
            .attach_role_policy()
            .role_name(name)
            .policy_arn(S3_READ_ONLY_POLICY_ARN)
            .send()
            .await
            .map_err(api_err)?;
        Ok(())
    }

    async fn detach_read_policy(&self, name: &str) -> Result<()> {
        self.iam
            .detach_role_policy()
            .role_name(name)
            .policy_arn(S3_READ_ONLY_POLICY_ARN)
            .send()
            .await
            .map_err(api_err)?;
        Ok(())
    }

    async fn delete_role(&self, name: &str) -> Result<()> {
        match self.iam.delete_role().role_name(name).send().await {
            Ok(_) => Ok(()),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_no_such_entity_exception() {
                    Err(CoreError::RoleNotFound(name.to_string()))
                } else {
                    Err(api_err(service_err))
                }
            }
        }
    }
}

#[async_trait]
impl ClusterApi for AwsProvider {
    async fn create_cluster(&self, spec: &ClusterSpec) -> Result<()> {
        info!(
            "creating cluster '{}' ({} x {})",
            spec.identifier, spec.number_of_nodes, spec.node_type
        );
        self.redshift
            .create_cluster()
            .cluster_identifier(&spec.identifier)
            .cluster_type(&spec.cluster_type)
            .node_type(&spec.node_type)
            .number_of_nodes(spec.number_of_nodes)
            .db_name(&spec.database)
            .master_username(&spec.master_username)
            .master_user_password(&spec.master_password)
            .port(i32::from(spec.port))
            .iam_roles(&spec.role_arn)
            .send()
            .await
            .map_err(api_err)?;
        Ok(())
    }

    async fn describe_cluster(&self, identifier: &str) -> Result<ClusterDescription> {
        let output = match self
            .redshift
            .describe_clusters()
            .cluster_identifier(identifier)
            .send()
            .await
        {
            Ok(output) => output,
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_cluster_not_found_fault() {
                    return Err(CoreError::ClusterNotFound(identifier.to_string()));
                }
                return Err(api_err(service_err));
            }
        };

        let cluster = output
            .clusters()
            .first()
            .ok_or_else(|| CoreError::ClusterNotFound(identifier.to_string()))?;

        let endpoint = cluster.endpoint().and_then(|endpoint| {
            let address = endpoint.address()?.to_string();
            let port = u16::try_from(endpoint.port().unwrap_or_default()).ok()?;
            Some(ClusterEndpoint { address, port })
        });

        let vpc_security_group_id = cluster
            .vpc_security_groups()
            .iter()
            .find_map(|membership| membership.vpc_security_group_id())
            .map(str::to_string);

        Ok(ClusterDescription {
            status: cluster.cluster_status().unwrap_or_default().to_string(),
            endpoint,
            vpc_security_group_id,
        })
    }

    async fn delete_cluster(&self, identifier: &str) -> Result<()> {
        info!("deleting cluster '{}' (skipping final snapshot)", identifier);
        match self
            .redshift
            .delete_cluster()
            .cluster_identifier(identifier)
            .skip_final_cluster_snapshot(true)
            .send()
            .await
        {
            Ok(_) => Ok(()),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_cluster_not_found_fault() {
                    Err(CoreError::ClusterNotFound(identifier.to_string()))
                } else {
                    Err(api_err(service_err))
                }
            }
        }
    }
}

#[async_trait]
impl NetworkApi for AwsProvider {
    async fn open_ingress(&self, group_id: &str, port: u16) -> Result<()> {
        use aws_sdk_ec2::error::ProvideErrorMetadata;

        info!(
            "authorizing inbound tcp/{} from 0.0.0.0/0 on security group {}",
            port, group_id
        );
        match self
            .ec2
            .authorize_security_group_ingress()
            .group_id(group_id)
            .ip_protocol("tcp")
            .from_port(i32::from(port))
            .to_port(i32::from(port))
            .cidr_ip("0.0.0.0/0")
            .send()
            .await
        {
            Ok(_) => Ok(()),
            // The rule surviving a previous run is not a failure
            Err(err) if err.code() == Some("InvalidPermission.Duplicate") => {
                debug!("ingress rule already present on {}", group_id);
                Ok(())
            }
            Err(err) => Err(api_err(err.into_service_error())),
        }
    }
}
