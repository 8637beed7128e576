//! Test utilities for copysecrets
//!
//! Runs an in-process Secrets Manager emulator speaking the AWS JSON 1.1
//! protocol, so integration tests can drive the real SDK client:
//! - `GetSecretValue` and `CreateSecret`
//! - Fault injection per operation
//! - Call counters for asserting what the client did
//!
//! ## Usage
//!
//! ```rust,no_run
//! use copysecrets_test::SecretsManagerEmulator;
//!
//! #[tokio::test]
//! async fn test_copy() {
//!     let emulator = SecretsManagerEmulator::start("us-east-1").await.unwrap();
//!     emulator.storage().create_secret("source", Some("value".into()), None).unwrap();
//!     println!("Emulator running at: {}", emulator.url());
//! }
//! ```

pub mod handlers;
mod storage;

pub use storage::{Fault, Operation, Secret, SecretsStorage, StorageError};

use axum::{routing::post, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::info;

/// A running emulator bound to an ephemeral localhost port
pub struct SecretsManagerEmulator {
    base_url: String,
    storage: Arc<SecretsStorage>,
    handle: JoinHandle<()>,
}

impl SecretsManagerEmulator {
    /// Start serving `region` on 127.0.0.1 with an OS-assigned port
    pub async fn start(region: &str) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let storage = Arc::new(SecretsStorage::new(region));

        let app = router(storage.clone());
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Emulator stopped");
            }
        });

        info!(%addr, region = %region, "Secrets Manager emulator ready");

        Ok(Self {
            base_url: format!("http://{}", addr),
            storage,
            handle,
        })
    }

    /// Base URL to use as the SDK endpoint override
    pub fn url(&self) -> &str {
        &self.base_url
    }

    pub fn storage(&self) -> &SecretsStorage {
        &self.storage
    }
}

impl Drop for SecretsManagerEmulator {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Router serving the emulated API at `/`
pub fn router(storage: Arc<SecretsStorage>) -> Router {
    Router::new()
        .route("/", post(handlers::handle_request))
        .with_state(storage)
}
