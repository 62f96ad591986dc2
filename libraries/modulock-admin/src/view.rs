//! The surface the controller renders into.

use crate::table::UserTable;
use modulock_core::Registration;

/// Styling of the registration message line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Green: the backend accepted the registration
    Success,
    /// Red: validation, refusal or transport failure
    Error,
}

/// Everything the admin controller reads from or writes to the page.
///
/// Mirrors the admin page's elements: an alert/confirm pair, the users
/// table, the scan status line, the registration inputs, and the message
/// and login-error lines. Elements a page may lack have a presence query;
/// the controller skips work for missing ones.
pub trait AdminView: Send + Sync {
    /// Modal notification (door and removal feedback)
    fn notify(&self, message: &str);

    /// Yes/no question; `false` cancels the action
    fn confirm(&self, prompt: &str) -> bool;

    /// Replace the users table
    fn render_users(&self, table: &UserTable);

    /// Replace the scan status line
    fn set_uid_status(&self, text: &str);

    /// Write the UID input (empty string clears it)
    fn set_uid_field(&self, uid: &str);

    /// Current contents of the three registration inputs
    fn registration_form(&self) -> Registration;

    /// Empty all three registration inputs
    fn clear_registration_form(&self);

    /// Show the registration message line with the given styling
    fn show_message(&self, kind: MessageKind, text: &str);

    /// Fill the login-error slot
    fn show_login_error(&self, text: &str);

    /// Whether the page has a users table
    fn has_user_list(&self) -> bool {
        true
    }

    /// Whether the page has a scan status line
    fn has_uid_status(&self) -> bool {
        true
    }

    /// Whether the page has a registration message line
    fn has_message_slot(&self) -> bool {
        true
    }

    /// Whether the page has a login-error slot
    fn has_login_error_slot(&self) -> bool {
        false
    }
}
