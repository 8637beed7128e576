//! Emulator storage for secrets

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

/// A stored secret (current version only)
#[derive(Debug, Clone)]
pub struct Secret {
    pub arn: String,
    pub name: String,
    pub version_id: String,
    pub secret_string: Option<String>,
    pub secret_binary: Option<String>,
    pub created_date: DateTime<Utc>,
}

/// Operations the emulator understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetSecretValue,
    CreateSecret,
}

impl Operation {
    pub fn from_target(target: &str) -> Option<Self> {
        match target {
            "secretsmanager.GetSecretValue" => Some(Self::GetSecretValue),
            "secretsmanager.CreateSecret" => Some(Self::CreateSecret),
            _ => None,
        }
    }
}

/// An error the emulator was told to return instead of serving a request
#[derive(Debug, Clone)]
pub struct Fault {
    pub code: String,
    pub message: String,
}

/// In-memory secrets for one region
#[derive(Debug)]
pub struct SecretsStorage {
    region: String,
    secrets: DashMap<String, Secret>,
    faults: Mutex<HashMap<Operation, Fault>>,
    calls: DashMap<Operation, AtomicUsize>,
}

impl SecretsStorage {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            secrets: DashMap::new(),
            faults: Mutex::new(HashMap::new()),
            calls: DashMap::new(),
        }
    }

    /// Create a new secret
    pub fn create_secret(
        &self,
        name: &str,
        secret_string: Option<String>,
        secret_binary: Option<String>,
    ) -> Result<Secret, StorageError> {
        if name.is_empty() {
            return Err(StorageError::InvalidParameter(
                "Name must not be empty".to_string(),
            ));
        }

        match self.secrets.entry(name.to_string()) {
            Entry::Occupied(_) => Err(StorageError::ResourceExists(name.to_string())),
            Entry::Vacant(vacant) => {
                let secret = Secret {
                    arn: format!(
                        "arn:aws:secretsmanager:{}:000000000000:secret:{}-{}",
                        self.region,
                        name,
                        &Uuid::new_v4().simple().to_string()[..6]
                    ),
                    name: name.to_string(),
                    version_id: Uuid::new_v4().to_string(),
                    secret_string,
                    secret_binary,
                    created_date: Utc::now(),
                };
                vacant.insert(secret.clone());
                Ok(secret)
            }
        }
    }

    /// Get the current value of a secret by name or ARN
    pub fn get_secret_value(&self, secret_id: &str) -> Result<Secret, StorageError> {
        if let Some(secret) = self.secrets.get(secret_id) {
            return Ok(secret.clone());
        }
        self.secrets
            .iter()
            .find(|s| s.arn == secret_id)
            .map(|s| s.value().clone())
            .ok_or_else(|| StorageError::ResourceNotFound(secret_id.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.secrets.contains_key(name)
    }

    /// Make every following call of `operation` fail with `code`
    pub fn inject_fault(&self, operation: Operation, code: &str, message: &str) {
        self.faults.lock().insert(
            operation,
            Fault {
                code: code.to_string(),
                message: message.to_string(),
            },
        );
    }

    pub fn clear_faults(&self) {
        self.faults.lock().clear();
    }

    pub(crate) fn fault_for(&self, operation: Operation) -> Option<Fault> {
        self.faults.lock().get(&operation).cloned()
    }

    pub(crate) fn record_call(&self, operation: Operation) {
        self.calls
            .entry(operation)
            .or_default()
            .fetch_add(1, Ordering::SeqCst);
    }

    /// Number of requests received for `operation`, including failed ones
    pub fn calls(&self, operation: Operation) -> usize {
        self.calls
            .get(&operation)
            .map_or(0, |count| count.load(Ordering::SeqCst))
    }
}

/// Storage errors, named after the service error codes they become
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Secret already exists: {0}")]
    ResourceExists(String),

    #[error("Secret not found: {0}")]
    ResourceNotFound(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl StorageError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ResourceExists(_) => "ResourceExistsException",
            Self::ResourceNotFound(_) => "ResourceNotFoundException",
            Self::InvalidParameter(_) => "InvalidParameterException",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_get_secret() {
        let storage = SecretsStorage::new("eu-west-1");

        let created = storage
            .create_secret("my-secret", Some("secret-value".to_string()), None)
            .unwrap();
        assert!(created.arn.starts_with("arn:aws:secretsmanager:eu-west-1:"));

        let by_name = storage.get_secret_value("my-secret").unwrap();
        assert_eq!(by_name.secret_string, Some("secret-value".to_string()));

        let by_arn = storage.get_secret_value(&created.arn).unwrap();
        assert_eq!(by_arn.name, "my-secret");
    }

    #[test]
    fn test_duplicate_secret_fails() {
        let storage = SecretsStorage::new("us-east-1");

        storage.create_secret("my-secret", None, None).unwrap();

        let result = storage.create_secret("my-secret", Some("other".to_string()), None);
        assert!(matches!(result, Err(StorageError::ResourceExists(_))));
        assert_eq!(storage.get_secret_value("my-secret").unwrap().secret_string, None);
    }

    #[test]
    fn test_get_nonexistent_secret_fails() {
        let storage = SecretsStorage::new("us-east-1");

        let result = storage.get_secret_value("nonexistent");
        assert!(matches!(result, Err(StorageError::ResourceNotFound(_))));
    }

    #[test]
    fn test_faults_are_per_operation() {
        let storage = SecretsStorage::new("us-east-1");
        storage.inject_fault(Operation::CreateSecret, "LimitExceededException", "too many");

        assert!(storage.fault_for(Operation::GetSecretValue).is_none());
        let fault = storage.fault_for(Operation::CreateSecret).unwrap();
        assert_eq!(fault.code, "LimitExceededException");

        storage.clear_faults();
        assert!(storage.fault_for(Operation::CreateSecret).is_none());
    }
}
