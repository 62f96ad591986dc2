//! Error types for the ModuLock client.

use modulock_core::AccessError;
use thiserror::Error;

/// Errors that can occur when talking to a ModuLock door controller.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Controller returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Controller requires a session cookie
    #[error("Authentication required")]
    AuthRequired,

    /// Invalid controller URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to read the response body
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Controller is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

impl ClientError {
    /// Classify a failure from `RequestBuilder::send`.
    pub(crate) fn from_send(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            Self::ServerUnreachable(e.to_string())
        } else {
            Self::Request(e)
        }
    }
}

impl From<ClientError> for AccessError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Request(e) => AccessError::request(e.to_string()),
            ClientError::ServerError { status, message } => AccessError::server(status, message),
            ClientError::AuthRequired => AccessError::AuthRequired,
            ClientError::InvalidUrl(msg) => AccessError::request(format!("invalid URL: {msg}")),
            ClientError::ParseError(msg) => AccessError::ParseError(msg),
            ClientError::ServerUnreachable(msg) => AccessError::ServerUnreachable(msg),
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
