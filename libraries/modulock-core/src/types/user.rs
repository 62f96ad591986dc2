/// User domain types
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A user registered on the door controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Registration code, unique per user
    pub ra: String,

    /// Display name
    pub name: String,

    /// Hex UID of the user's RFID tag
    pub uid: String,
}

impl UserRecord {
    /// Create a new user record
    pub fn new(ra: impl Into<String>, name: impl Into<String>, uid: impl Into<String>) -> Self {
        Self {
            ra: ra.into(),
            name: name.into(),
            uid: uid.into(),
        }
    }
}

/// The interpreted body of `GET /getUsers`.
///
/// The backend's payload is `{"users": [{"ra", "name", "uid"}]}`. Anything
/// that does not yield at least one well-formed user collapses to `NoData`
/// instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserListing {
    /// At least one well-formed user
    Users(Vec<UserRecord>),
    /// Empty, absent or malformed user list
    NoData,
}

impl UserListing {
    /// Interpret a raw response body.
    ///
    /// Entries missing any of the three string fields are skipped.
    pub fn from_body(body: &str) -> Self {
        let value: serde_json::Value = match serde_json::from_str(body) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "User list is not valid JSON");
                return Self::NoData;
            }
        };

        let Some(entries) = value.get("users").and_then(|u| u.as_array()) else {
            warn!("User list payload has no users array");
            return Self::NoData;
        };

        let users: Vec<UserRecord> = entries
            .iter()
            .filter_map(|entry| match UserRecord::deserialize(entry) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, entry = %entry, "Skipping malformed user entry");
                    None
                }
            })
            .collect();

        if users.is_empty() {
            Self::NoData
        } else {
            Self::Users(users)
        }
    }

    /// The users in this listing (empty for `NoData`)
    pub fn users(&self) -> &[UserRecord] {
        match self {
            Self::Users(users) => users.as_slice(),
            Self::NoData => &[],
        }
    }
}
