//! Error types for the remix server client.

use remix_core::RemixError;
use thiserror::Error;

/// Errors that can occur when talking to the remix server.
#[derive(Error, Debug)]
pub enum ServerClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Request was rejected because the caller is not signed in
    #[error("Authentication required")]
    AuthRequired,

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for server client operations.
pub type Result<T> = std::result::Result<T, ServerClientError>;

impl From<config::ConfigError> for ServerClientError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<ServerClientError> for RemixError {
    fn from(err: ServerClientError) -> Self {
        match err {
            ServerClientError::AuthRequired => RemixError::Unauthorized,
            ServerClientError::ParseError(msg) => RemixError::InvalidResponse(msg),
            ServerClientError::InvalidUrl(msg) | ServerClientError::Config(msg) => {
                RemixError::InvalidInput(msg)
            }
            ServerClientError::ServerError { status: 404, message } => {
                RemixError::not_found("Resource", message)
            }
            other => RemixError::Network(other.to_string()),
        }
    }
}
