/// Core error types for the ModuLock admin client
use thiserror::Error;

/// Result type alias using `AccessError`
pub type Result<T> = std::result::Result<T, AccessError>;

/// Failure talking to the door controller backend.
#[derive(Error, Debug)]
pub enum AccessError {
    /// The backend could not be reached (connect failure or timeout)
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// The backend rejected the request for lack of a session
    #[error("Authentication required")]
    AuthRequired,

    /// The backend answered with a non-success status
    #[error("Server error ({status}): {message}")]
    ServerError {
        /// HTTP status code
        status: u16,
        /// Response body, as sent
        message: String,
    },

    /// Any other transport failure
    #[error("Request failed: {0}")]
    Request(String),

    /// The response body could not be read
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl AccessError {
    /// Create a server error from a status and body
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::ServerError {
            status,
            message: message.into(),
        }
    }

    /// Create a generic request error
    pub fn request(msg: impl Into<String>) -> Self {
        Self::Request(msg.into())
    }
}
