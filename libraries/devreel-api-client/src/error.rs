//! Error types for the Devreel API client.

use devreel_core::CoreError;
use thiserror::Error;

/// Errors that can occur when talking to the Devreel API.
#[derive(Error, Debug)]
pub enum ApiClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// No token, or the token was rejected (401)
    #[error("Authentication required")]
    AuthRequired,

    /// Authenticated but not allowed (403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource does not exist (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid base URL
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

/// Result type for API client operations.
pub type Result<T> = std::result::Result<T, ApiClientError>;

impl From<ApiClientError> for CoreError {
    fn from(error: ApiClientError) -> Self {
        match error {
            ApiClientError::Request(e) => CoreError::Network(e.to_string()),
            ApiClientError::ServerUnreachable(msg) => CoreError::Network(msg),
            ApiClientError::ServerError { status, message } => CoreError::Server { status, message },
            ApiClientError::AuthRequired => CoreError::AuthRequired,
            ApiClientError::Forbidden(msg) => CoreError::PermissionDenied(msg),
            ApiClientError::NotFound(path) => CoreError::not_found("Resource", path),
            ApiClientError::InvalidUrl(msg) => CoreError::InvalidInput(msg),
            ApiClientError::ParseError(msg) => CoreError::Other(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_to_core_errors() {
        assert!(matches!(
            CoreError::from(ApiClientError::AuthRequired),
            CoreError::AuthRequired
        ));
        assert!(matches!(
            CoreError::from(ApiClientError::Forbidden("private".into())),
            CoreError::PermissionDenied(_)
        ));
        assert!(matches!(
            CoreError::from(ApiClientError::ServerError {
                status: 502,
                message: "bad gateway".into()
            }),
            CoreError::Server { status: 502, .. }
        ));
        assert!(CoreError::from(ApiClientError::ServerUnreachable("refused".into())).is_transient());
    }
}
