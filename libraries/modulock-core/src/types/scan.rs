/// Last-scanned UID readings
use serde::{Deserialize, Serialize};

/// Body `/getLastScannedUid` returns when no fresh scan is available.
pub const NO_UID_SENTINEL: &str = "No UID";

/// Interpreted body of `GET /getLastScannedUid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanReading {
    /// No tag scanned recently
    Pending,
    /// A tag was scanned; holds its UID
    Scanned(String),
}

impl ScanReading {
    /// Interpret a raw response body.
    pub fn from_body(body: &str) -> Self {
        let uid = body.trim();
        if uid.is_empty() || uid == NO_UID_SENTINEL {
            Self::Pending
        } else {
            Self::Scanned(uid.to_string())
        }
    }

    /// The scanned UID, if any
    pub fn uid(&self) -> Option<&str> {
        match self {
            Self::Scanned(uid) => Some(uid.as_str()),
            Self::Pending => None,
        }
    }
}
