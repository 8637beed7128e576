//! Secret storage capability

use async_trait::async_trait;

use crate::error::{FetchError, StoreError};

/// Acknowledgement that a secret was created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreAck {
    pub name: String,
    pub arn: Option<String>,
    pub version_id: Option<String>,
}

impl StoreAck {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arn: None,
            version_id: None,
        }
    }
}

/// A secret-storage backend bound to one region
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Region every call is made against
    fn region(&self) -> &str;

    /// Read the current string value of a secret
    async fn fetch(&self, name: &str) -> Result<String, FetchError>;

    /// Create a new secret holding `value`
    async fn store(&self, name: &str, value: &str) -> Result<StoreAck, StoreError>;
}
