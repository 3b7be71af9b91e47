//! Error types for farmhand-core

use thiserror::Error;

/// Result type alias using farmhand-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in farmhand-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// A required field is missing or malformed. No request was issued.
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// No session token is available. No request was issued.
    #[error("User is not authenticated. Please log in again.")]
    NotAuthenticated,

    /// The server answered with a non-2xx status
    #[error("{message}")]
    Remote { status: u16, message: String },

    /// The server answered successfully but had nothing to show
    #[error("{0}")]
    NoData(&'static str),

    /// The request never produced a usable response
    #[error("{fallback}")]
    Transport {
        fallback: String,
        #[source]
        source: reqwest::Error,
    },

    /// HTTP client construction error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Token persistence error
    #[error("Token storage error: {0}")]
    Storage(String),

    /// The resource has no endpoint for the requested operation
    #[error("{0} cannot be updated")]
    Unsupported(&'static str),
}

impl Error {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// True for errors raised before any request reached the network.
    pub const fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::NotAuthenticated | Self::Unsupported(_)
        )
    }

    /// HTTP status of a remote failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Field name of a validation failure.
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}
