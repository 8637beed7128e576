//! AWS Secrets Manager backend for copysecrets
//!
//! Implements `SecretStore` with `GetSecretValue` and `CreateSecret`.
//! Credentials come from the ambient AWS provider chain; the SDK retry
//! strategy is disabled so each call is attempted exactly once.

mod client;
mod error;

pub use client::AwsSecretStore;
