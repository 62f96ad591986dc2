//! Render model of the registered-users table.

use crate::messages;
use modulock_core::{UserListing, UserRecord};

/// Column headings, in order
pub const COLUMNS: [&str; 4] = ["RA", "Name", "UID", "Action"];

/// Removal control bound to one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveAction {
    /// RA of the user this control removes
    pub ra: String,
}

impl RemoveAction {
    /// Text of the control
    pub fn label(&self) -> &'static str {
        messages::REMOVE_LABEL
    }
}

/// One row of the users table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRow {
    /// The [`COLUMNS`] heading row
    Header,
    /// One registered user and its removal control
    User {
        /// The record shown in the RA, Name and UID cells
        user: UserRecord,
        /// The Action cell
        action: RemoveAction,
    },
    /// A message spanning every column
    Notice(String),
}

/// The users table as last rendered.
///
/// Either a header followed by one row per user, or a single notice row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserTable {
    rows: Vec<TableRow>,
}

impl UserTable {
    /// Header plus one row per user, or the "no users" notice.
    pub fn from_listing(listing: &UserListing) -> Self {
        match listing {
            UserListing::Users(users) => {
                let rows = std::iter::once(TableRow::Header)
                    .chain(users.iter().map(|user| TableRow::User {
                        action: RemoveAction {
                            ra: user.ra.clone(),
                        },
                        user: user.clone(),
                    }))
                    .collect();
                Self { rows }
            }
            UserListing::NoData => Self::notice(messages::NO_USERS),
        }
    }

    /// Table shown when the list could not be fetched
    pub fn load_failed() -> Self {
        Self::notice(messages::USERS_FAILED)
    }

    fn notice(text: &str) -> Self {
        Self {
            rows: vec![TableRow::Notice(text.to_string())],
        }
    }

    /// Rows top to bottom
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Number of rendered rows, header included
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Users shown, in backend order
    pub fn users(&self) -> impl Iterator<Item = &UserRecord> {
        self.rows.iter().filter_map(|row| match row {
            TableRow::User { user, .. } => Some(user),
            _ => None,
        })
    }

    /// Removal control of the row showing `ra`
    pub fn remove_action(&self, ra: &str) -> Option<&RemoveAction> {
        self.rows.iter().find_map(|row| match row {
            TableRow::User { action, .. } if action.ra == ra => Some(action),
            _ => None,
        })
    }

    /// Text of the notice row, if the table is showing one
    pub fn notice_text(&self) -> Option<&str> {
        match self.rows.as_slice() {
            [TableRow::Notice(text)] => Some(text.as_str()),
            _ => None,
        }
    }
}
