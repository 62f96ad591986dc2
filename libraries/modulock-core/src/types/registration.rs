/// Registration form submitted to `/registerUser`
use serde::Serialize;
use thiserror::Error;

/// The three registration inputs as typed by the operator.
///
/// Serializes to the backend's form body `ra=..&name=..&uid=..`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Registration {
    /// Registration code
    pub ra: String,
    /// Display name
    pub name: String,
    /// Scanned tag UID
    pub uid: String,
}

/// A required registration field was left blank.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Field '{field}' is required")]
pub struct FieldError {
    /// Name of the first blank field
    pub field: &'static str,
}

impl Registration {
    /// Create a registration from its three fields
    pub fn new(ra: impl Into<String>, name: impl Into<String>, uid: impl Into<String>) -> Self {
        Self {
            ra: ra.into(),
            name: name.into(),
            uid: uid.into(),
        }
    }

    /// Check that no field is empty or whitespace-only.
    pub fn validate(&self) -> Result<(), FieldError> {
        for (field, value) in [("ra", &self.ra), ("name", &self.name), ("uid", &self.uid)] {
            if value.trim().is_empty() {
                return Err(FieldError { field });
            }
        }
        Ok(())
    }

    /// Copy with surrounding whitespace removed from every field
    pub fn trimmed(&self) -> Self {
        Self::new(self.ra.trim(), self.name.trim(), self.uid.trim())
    }

    /// True when all three fields are empty
    pub fn is_cleared(&self) -> bool {
        self.ra.is_empty() && self.name.is_empty() && self.uid.is_empty()
    }
}
