//! Secrets Manager error taxonomy
//!
//! Both backend calls classify failures into a single [`ServiceError`]; the
//! call site then wraps it with the secret name it was working on.

use thiserror::Error;

/// Code reported when the backend gave us no error code at all
pub const UNKNOWN_CODE: &str = "UnknownError";

/// A failure reported by (or on the way to) the secret-storage backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("ResourceNotFoundException: {0}")]
    ResourceNotFound(String),

    #[error("InvalidParameterException: {0}")]
    InvalidParameter(String),

    #[error("InvalidRequestException: {0}")]
    InvalidRequest(String),

    #[error("DecryptionFailure: {0}")]
    DecryptionFailure(String),

    #[error("EncryptionFailure: {0}")]
    EncryptionFailure(String),

    #[error("InternalServiceError: {0}")]
    InternalServiceError(String),

    #[error("LimitExceededException: {0}")]
    LimitExceeded(String),

    #[error("ResourceExistsException: {0}")]
    ResourceExists(String),

    #[error("MalformedPolicyDocumentException: {0}")]
    MalformedPolicyDocument(String),

    #[error("PreconditionNotMetException: {0}")]
    PreconditionNotMet(String),

    /// A code we do not recognise, kept verbatim
    #[error("{}: {}", .code.as_deref().unwrap_or(UNKNOWN_CODE), .message)]
    Unknown {
        code: Option<String>,
        message: String,
    },

    /// The request never produced a service response (dispatch, timeout, I/O)
    #[error("request failed: {0}")]
    Transport(String),
}

impl ServiceError {
    /// Classify a backend error code and message
    pub fn from_code(code: Option<&str>, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            Some("ResourceNotFoundException") => Self::ResourceNotFound(message),
            Some("InvalidParameterException") => Self::InvalidParameter(message),
            Some("InvalidRequestException") => Self::InvalidRequest(message),
            Some("DecryptionFailure") => Self::DecryptionFailure(message),
            Some("EncryptionFailure") => Self::EncryptionFailure(message),
            Some("InternalServiceError") => Self::InternalServiceError(message),
            Some("LimitExceededException") => Self::LimitExceeded(message),
            Some("ResourceExistsException") => Self::ResourceExists(message),
            Some("MalformedPolicyDocumentException") => Self::MalformedPolicyDocument(message),
            Some("PreconditionNotMetException") => Self::PreconditionNotMet(message),
            other => Self::Unknown {
                code: other.map(ToOwned::to_owned),
                message,
            },
        }
    }

    /// The backend error code, if there was one
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::ResourceNotFound(_) => Some("ResourceNotFoundException"),
            Self::InvalidParameter(_) => Some("InvalidParameterException"),
            Self::InvalidRequest(_) => Some("InvalidRequestException"),
            Self::DecryptionFailure(_) => Some("DecryptionFailure"),
            Self::EncryptionFailure(_) => Some("EncryptionFailure"),
            Self::InternalServiceError(_) => Some("InternalServiceError"),
            Self::LimitExceeded(_) => Some("LimitExceededException"),
            Self::ResourceExists(_) => Some("ResourceExistsException"),
            Self::MalformedPolicyDocument(_) => Some("MalformedPolicyDocumentException"),
            Self::PreconditionNotMet(_) => Some("PreconditionNotMetException"),
            Self::Unknown { code, .. } => code.as_deref(),
            Self::Transport(_) => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::ResourceNotFound(m)
            | Self::InvalidParameter(m)
            | Self::InvalidRequest(m)
            | Self::DecryptionFailure(m)
            | Self::EncryptionFailure(m)
            | Self::InternalServiceError(m)
            | Self::LimitExceeded(m)
            | Self::ResourceExists(m)
            | Self::MalformedPolicyDocument(m)
            | Self::PreconditionNotMet(m)
            | Self::Transport(m) => m,
            Self::Unknown { message, .. } => message,
        }
    }
}

/// Reading the source secret failed
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to get secret {name}: {error}")]
    Service { name: String, error: ServiceError },

    /// The secret exists but only carries a binary payload
    #[error("failed to get secret {name}: secret has no string value")]
    NotAString { name: String },
}

impl FetchError {
    pub fn name(&self) -> &str {
        match self {
            Self::Service { name, .. } | Self::NotAString { name } => name,
        }
    }

    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            Self::Service { error, .. } => Some(error),
            Self::NotAString { .. } => None,
        }
    }
}

/// Creating the destination secret failed
#[derive(Debug, Error)]
#[error("failed to create secret {name}: {error}")]
pub struct StoreError {
    pub name: String,
    pub error: ServiceError,
}

/// Any failure of a copy run after configuration was resolved
#[derive(Debug, Error)]
pub enum CopyError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to write progress: {0}")]
    Output(#[from] std::io::Error),
}
