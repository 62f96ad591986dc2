//! Operator-facing texts.

/// Shown on the login error slot when the page is loaded with `error=1`
pub const INVALID_LOGIN: &str = "Invalid Username or Password";

/// Notification when the door request got no answer
pub const DOOR_FAILED: &str = "Error opening door. Check console for details.";

/// Notice row for an empty or unreadable user list
pub const NO_USERS: &str = "No users registered or error in data.";
/// Notice row when the user list could not be fetched
pub const USERS_FAILED: &str = "Error loading users. Check console.";

/// Notification when the removal request got no answer
pub const REMOVE_FAILED: &str = "Error removing user. Check console for details.";

/// Scan status while polling
pub const AWAITING_SCAN: &str = "Awaiting RFID scan...";
/// Scan status after a failed poll; polling continues
pub const UID_FETCH_FAILED: &str = "Error fetching UID. Check console.";

/// Registration message when an input is blank
pub const FIELDS_REQUIRED: &str = "All fields are required!";
/// Registration message when the request got no answer
pub const REGISTRATION_FAILED: &str = "An error occurred during registration. Check console.";

/// Label of the per-row removal control
pub const REMOVE_LABEL: &str = "Remove";

/// Confirmation asked before removing `ra`
pub fn confirm_removal(ra: &str) -> String {
    format!("Are you sure you want to remove user {ra}?")
}

/// Scan status once a tag has been read
pub fn uid_scanned(uid: &str) -> String {
    format!("UID Scanned: {uid}")
}
