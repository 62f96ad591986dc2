//! ModuLock Core
//!
//! Platform-agnostic types, traits, and error handling shared by the
//! ModuLock admin client crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `UserRecord`, `UserListing`, `ActionReply`, `ScanReading`, `Registration`
//! - **Core Traits**: `AccessBackend`, the five door-controller endpoints
//! - **Error Handling**: Unified `AccessError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use modulock_core::types::{ScanReading, UserListing};
//!
//! let listing = UserListing::from_body(r#"{"users":[{"ra":"1","name":"Ana","uid":"0A1B"}]}"#);
//! assert_eq!(listing.users().len(), 1);
//!
//! assert_eq!(ScanReading::from_body("No UID"), ScanReading::Pending);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{AccessError, Result};
pub use traits::AccessBackend;

pub use types::{
    ActionReply, FieldError, Registration, ScanReading, UserListing, UserRecord, NO_UID_SENTINEL,
};
