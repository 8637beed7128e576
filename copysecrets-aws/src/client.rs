//! Secrets Manager client bound to a single region

use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::BehaviorVersion;
use aws_sdk_secretsmanager::config::Region;
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use aws_sdk_secretsmanager::Client;
use tracing::{debug, error};

use copysecrets_core::{CopyConfig, FetchError, SecretStore, StoreAck, StoreError};

use crate::error::classify;

/// `SecretStore` backed by AWS Secrets Manager
#[derive(Debug, Clone)]
pub struct AwsSecretStore {
    client: Client,
    region: String,
}

impl AwsSecretStore {
    /// Build a client for the configured region from the ambient AWS
    /// environment (credentials, profile), honouring an endpoint override.
    pub async fn connect(config: &CopyConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region().to_string()))
            .retry_config(RetryConfig::disabled());

        if let Some(endpoint) = config.endpoint_url() {
            debug!(endpoint = %endpoint, "Using endpoint override");
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        Self::new(Client::new(&sdk_config), config.region())
    }

    /// Wrap an already configured client
    pub fn new(client: Client, region: impl Into<String>) -> Self {
        Self {
            client,
            region: region.into(),
        }
    }
}

#[async_trait]
impl SecretStore for AwsSecretStore {
    fn region(&self) -> &str {
        &self.region
    }

    async fn fetch(&self, name: &str) -> Result<String, FetchError> {
        debug!(secret = %name, "GetSecretValue");

        let output = self
            .client
            .get_secret_value()
            .secret_id(name)
            .send()
            .await
            .map_err(|err| {
                let service_error = classify(&err);
                error!(
                    secret = %name,
                    code = service_error.code().unwrap_or("-"),
                    context = %DisplayErrorContext(&err),
                    "GetSecretValue failed: {}",
                    service_error.message()
                );
                FetchError::Service {
                    name: name.to_string(),
                    error: service_error,
                }
            })?;

        output
            .secret_string()
            .map(ToOwned::to_owned)
            .ok_or_else(|| {
                error!(secret = %name, "Secret has no string value");
                FetchError::NotAString {
                    name: name.to_string(),
                }
            })
    }

    async fn store(&self, name: &str, value: &str) -> Result<StoreAck, StoreError> {
        debug!(secret = %name, "CreateSecret");

        let output = self
            .client
            .create_secret()
            .name(name)
            .secret_string(value)
            .send()
            .await
            .map_err(|err| {
                let service_error = classify(&err);
                error!(
                    secret = %name,
                    code = service_error.code().unwrap_or("-"),
                    context = %DisplayErrorContext(&err),
                    "CreateSecret failed: {}",
                    service_error.message()
                );
                StoreError {
                    name: name.to_string(),
                    error: service_error,
                }
            })?;

        Ok(StoreAck {
            name: output.name().unwrap_or(name).to_string(),
            arn: output.arn().map(ToOwned::to_owned),
            version_id: output.version_id().map(ToOwned::to_owned),
        })
    }
}
