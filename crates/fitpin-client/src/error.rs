//! Client error types.

use fitpin_commerce::{CommerceError, ValidationError};
use fitpin_data::FetchError;
use thiserror::Error;

/// Errors surfaced by screen actions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Network or decoding failure.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The action was aborted before anything was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The backend refused the request.
    #[error("rejected by server: {message}")]
    Rejected { message: String },

    /// Domain rule violation.
    #[error(transparent)]
    Commerce(CommerceError),

    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Missing or invalid client configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading a local file failed.
    #[error("io error: {0}")]
    Io(String),
}

impl ClientError {
    pub fn rejected(message: impl Into<String>) -> Self {
        ClientError::Rejected {
            message: message.into(),
        }
    }

    /// Check if the user can fix this by changing input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ClientError::Validation(_) | ClientError::Commerce(CommerceError::Validation(_))
        )
    }
}

impl From<CommerceError> for ClientError {
    fn from(e: CommerceError) -> Self {
        match e {
            CommerceError::Validation(v) => ClientError::Validation(v),
            other => ClientError::Commerce(other),
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(e: std::io::Error) -> Self {
        ClientError::Io(e.to_string())
    }
}
