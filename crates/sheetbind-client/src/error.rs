//! Client error types

use sheetbind_core::BindError;
use thiserror::Error;

/// Errors surfaced by client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// Missing or invalid client settings; raised at construction
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network or protocol failure from the HTTP stack
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Error status returned by the service
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body that does not match the expected shape
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Invalid coordinate or range, raised before any request is sent
    #[error(transparent)]
    Bind(#[from] BindError),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Error category for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The client was set up wrong
    Configuration,
    /// The request failed in flight or was refused by the service
    Transport,
    /// The request was never sent because its address was invalid
    Domain,
}

impl ClientError {
    /// Categorize the error for reporting
    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::Configuration(_) => ErrorCategory::Configuration,
            ClientError::Http(_) | ClientError::Api { .. } | ClientError::Decode(_) => {
                ErrorCategory::Transport
            }
            ClientError::Bind(_) => ErrorCategory::Domain,
        }
    }

    /// HTTP status behind the error, if the service answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(
            ClientError::Configuration("missing id".into()).category(),
            ErrorCategory::Configuration
        );
        assert_eq!(
            ClientError::Api {
                status: 403,
                message: "denied".into()
            }
            .category(),
            ErrorCategory::Transport
        );
        assert_eq!(
            ClientError::from(BindError::EmptySheetTitle).category(),
            ErrorCategory::Domain
        );
    }

    #[test]
    fn test_status() {
        let err = ClientError::Api {
            status: 404,
            message: "Requested entity was not found.".into(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "API error 404: Requested entity was not found.");
        assert_eq!(ClientError::Configuration("x".into()).status(), None);
    }
}
