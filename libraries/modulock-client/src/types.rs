//! Types for the ModuLock client.

/// Name of the cookie the controller issues on login.
pub(crate) const SESSION_COOKIE: &str = "session_id";

/// Configuration for connecting to a ModuLock door controller.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the controller (e.g., "http://192.168.4.1")
    pub url: String,
    /// Existing `session_id` cookie value, if any
    pub session_id: Option<String>,
}

impl ClientConfig {
    /// Create a new config with just the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            session_id: None,
        }
    }

    /// Create a config that forwards an existing session.
    pub fn with_session(url: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            session_id: Some(session_id.into()),
        }
    }
}

/// Value of the `Cookie` header for a session id.
pub(crate) fn session_cookie(session_id: &str) -> String {
    format!("{SESSION_COOKIE}={session_id}")
}
