/// Replies from the text endpoints
use serde::{Deserialize, Serialize};

/// Outcome of `/openDoor`, `/removeUser` or `/registerUser`.
///
/// The backend answers these with plain text. `success` is decided once,
/// when the reply is built, so callers never inspect `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionReply {
    /// HTTP status code
    pub status: u16,
    /// Whether the backend performed the action
    pub success: bool,
    /// Response text, shown to the operator as-is
    pub message: String,
}

impl ActionReply {
    /// Build a reply whose success depends only on the status code.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            success: (200..300).contains(&status),
            message: message.into(),
        }
    }

    /// Build a `/registerUser` reply.
    ///
    /// The backend reports duplicate RA/UID with status 200 and an error
    /// text, so the body is checked too.
    pub fn registration(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        let success = (200..300).contains(&status) && !reports_failure(&message);
        Self {
            status,
            success,
            message,
        }
    }
}

fn reports_failure(text: &str) -> bool {
    text.contains("Error") || text.trim_start().starts_with("Erro:")
}
