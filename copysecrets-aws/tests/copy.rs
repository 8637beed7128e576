//! End-to-end copy tests using aws-sdk-secretsmanager against the emulator
//!
//! These tests drive the real SDK client through `AwsSecretStore` and the
//! `copy_secret` orchestrator.

use aws_config::retry::RetryConfig;
use aws_config::BehaviorVersion;
use aws_sdk_secretsmanager::config::{Credentials, Region};
use aws_sdk_secretsmanager::Client;

use copysecrets_aws::AwsSecretStore;
use copysecrets_core::{copy_secret, CopyConfig, CopyError, FetchError, SecretStore, ServiceError};
use copysecrets_test::{Operation, SecretsManagerEmulator};

const REGION: &str = "eu-west-1";

/// Create a store pointing at the emulator with static test credentials
async fn create_test_store(endpoint: &str) -> AwsSecretStore {
    let config = aws_config::defaults(BehaviorVersion::latest())
        .endpoint_url(endpoint)
        .credentials_provider(Credentials::new("test", "test", None, None, "test"))
        .region(Region::new(REGION))
        .retry_config(RetryConfig::disabled())
        .load()
        .await;

    AwsSecretStore::new(Client::new(&config), REGION)
}

async fn seeded_emulator() -> SecretsManagerEmulator {
    let emulator = SecretsManagerEmulator::start(REGION).await.unwrap();
    emulator
        .storage()
        .create_secret("app/source", Some("secretValue".to_string()), None)
        .unwrap();
    emulator
}

fn config() -> CopyConfig {
    CopyConfig::new("app/source", "app/destination", REGION).unwrap()
}

#[tokio::test]
async fn test_copy_creates_destination() {
    let emulator = seeded_emulator().await;
    let store = create_test_store(emulator.url()).await;
    let mut out = Vec::new();

    let ack = copy_secret(&config(), &store, &mut out).await.unwrap();

    assert_eq!(ack.name, "app/destination");
    assert!(ack
        .arn
        .as_deref()
        .unwrap()
        .starts_with("arn:aws:secretsmanager:eu-west-1:"));
    let copied = emulator.storage().get_secret_value("app/destination").unwrap();
    assert_eq!(copied.secret_string.as_deref(), Some("secretValue"));
    assert_eq!(emulator.storage().calls(Operation::CreateSecret), 1);

    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("successfully copied secret with name app/source to app/destination"));
}

#[tokio::test]
async fn test_second_copy_to_same_destination_fails() {
    let emulator = seeded_emulator().await;
    let store = create_test_store(emulator.url()).await;

    copy_secret(&config(), &store, &mut Vec::new()).await.unwrap();
    let err = copy_secret(&config(), &store, &mut Vec::new())
        .await
        .unwrap_err();

    match err {
        CopyError::Store(store_error) => {
            assert_eq!(store_error.name, "app/destination");
            assert_eq!(store_error.error.code(), Some("ResourceExistsException"));
        }
        other => panic!("expected store error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_source_creates_nothing() {
    let emulator = SecretsManagerEmulator::start(REGION).await.unwrap();
    let store = create_test_store(emulator.url()).await;

    let err = copy_secret(&config(), &store, &mut Vec::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CopyError::Fetch(FetchError::Service {
            error: ServiceError::ResourceNotFound(_),
            ..
        })
    ));
    assert_eq!(emulator.storage().calls(Operation::CreateSecret), 0);
    assert!(!emulator.storage().contains("app/destination"));
}

#[tokio::test]
async fn test_fetch_fault_codes_are_classified() {
    let emulator = seeded_emulator().await;
    let store = create_test_store(emulator.url()).await;

    for code in [
        "InvalidParameterException",
        "InvalidRequestException",
        "DecryptionFailure",
        "InternalServiceError",
    ] {
        emulator
            .storage()
            .inject_fault(Operation::GetSecretValue, code, "injected");

        let err = store.fetch("app/source").await.unwrap_err();

        assert_eq!(err.service_error().and_then(ServiceError::code), Some(code));
        assert_eq!(err.name(), "app/source");
    }
}

#[tokio::test]
async fn test_store_fault_codes_are_classified() {
    let emulator = SecretsManagerEmulator::start(REGION).await.unwrap();
    let store = create_test_store(emulator.url()).await;

    for code in [
        "LimitExceededException",
        "EncryptionFailure",
        "MalformedPolicyDocumentException",
        "PreconditionNotMetException",
        "ResourceNotFoundException",
    ] {
        emulator
            .storage()
            .inject_fault(Operation::CreateSecret, code, "injected");

        let err = store.store("app/destination", "value").await.unwrap_err();

        assert_eq!(err.error.code(), Some(code));
        assert_eq!(err.name, "app/destination");
    }
    assert!(!emulator.storage().contains("app/destination"));
}

#[tokio::test]
async fn test_unmodelled_code_is_unknown() {
    let emulator = seeded_emulator().await;
    let store = create_test_store(emulator.url()).await;
    emulator
        .storage()
        .inject_fault(Operation::GetSecretValue, "AccessDeniedException", "denied");

    let err = store.fetch("app/source").await.unwrap_err();

    assert_eq!(
        err.service_error(),
        Some(&ServiceError::Unknown {
            code: Some("AccessDeniedException".to_string()),
            message: "denied".to_string(),
        })
    );
}

#[tokio::test]
async fn test_binary_secret_is_rejected() {
    let emulator = SecretsManagerEmulator::start(REGION).await.unwrap();
    emulator
        .storage()
        .create_secret("certs/p12", None, Some("AAEC".to_string()))
        .unwrap();
    let store = create_test_store(emulator.url()).await;

    let err = store.fetch("certs/p12").await.unwrap_err();

    assert!(matches!(err, FetchError::NotAString { .. }));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let emulator = SecretsManagerEmulator::start(REGION).await.unwrap();
    let endpoint = emulator.url().to_string();
    drop(emulator);
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let store = create_test_store(&endpoint).await;
    let err = store.fetch("app/source").await.unwrap_err();

    assert!(matches!(
        err.service_error(),
        Some(ServiceError::Transport(_))
    ));
}
