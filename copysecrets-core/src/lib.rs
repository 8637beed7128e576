//! Core types for copysecrets
//!
//! This crate holds everything that does not talk to the network:
//! - `CopyConfig` and the aggregated validation of its required parameters
//! - The backend error taxonomy shared by fetch and store
//! - The `SecretStore` capability and the `copy_secret` orchestrator

pub mod config;
pub mod copy;
pub mod error;
pub mod store;

pub use config::{ConfigurationError, CopyConfig, RawConfig};
pub use copy::copy_secret;
pub use error::{CopyError, FetchError, ServiceError, StoreError};
pub use store::{SecretStore, StoreAck};
