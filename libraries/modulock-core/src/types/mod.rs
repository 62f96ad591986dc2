mod registration;
mod reply;
mod scan;
mod user;

pub use registration::{FieldError, Registration};
pub use reply::ActionReply;
pub use scan::{ScanReading, NO_UID_SENTINEL};
pub use user::{UserListing, UserRecord};
