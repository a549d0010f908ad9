/// Core error types for Ram Remix Hub
use thiserror::Error;

/// Result type alias using `RemixError`
pub type Result<T> = std::result::Result<T, RemixError>;

/// Error returned by collaborator services
#[derive(Error, Debug)]
pub enum RemixError {
    /// The remote service could not be reached or answered with a failure
    #[error("Network error: {0}")]
    Network(String),

    /// The caller is not signed in
    #[error("Authentication required")]
    Unauthorized,

    /// The remote service answered with something that could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of entity that was looked up
        entity: String,
        /// Identifier that was looked up
        id: String,
    },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl RemixError {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create an invalid response error
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
