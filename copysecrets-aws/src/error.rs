//! Mapping of SDK failures onto the shared error taxonomy

use aws_sdk_secretsmanager::error::{ProvideErrorMetadata, SdkError};
use copysecrets_core::ServiceError;
use std::error::Error;

/// Classify an SDK error by the code the service reported
///
/// Errors that never produced a service response (construction, dispatch,
/// timeout, unparseable response) become [`ServiceError::Transport`].
/// Messages hold the `Display` chain only; the full SDK context is for logs.
pub(crate) fn classify<E, R>(err: &SdkError<E, R>) -> ServiceError
where
    E: ProvideErrorMetadata + Error + 'static,
    R: std::fmt::Debug,
{
    match err.as_service_error() {
        Some(service_error) => {
            let message = service_error
                .message()
                .map_or_else(|| error_chain(service_error), ToOwned::to_owned);
            ServiceError::from_code(service_error.code(), message)
        }
        None => ServiceError::Transport(error_chain(err)),
    }
}

/// `outer: cause: root cause`, skipping causes already in the outer message
fn error_chain(err: &dyn Error) -> String {
    let mut chain = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !chain.contains(&text) {
            chain.push_str(": ");
            chain.push_str(&text);
        }
        source = cause.source();
    }
    chain
}
