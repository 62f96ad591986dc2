//! ModuLock Admin
//!
//! The admin page controller: binds a view (browser page, terminal, test
//! double) to the door controller's five endpoints and runs the RFID scan
//! polling loop.
//!
//! ```ignore
//! use modulock_admin::{AdminController, PageContext};
//!
//! let controller = AdminController::new(backend, view);
//! controller.on_load(&PageContext::from_query("error=1")).await;
//! controller.open_door().await;
//! controller.on_unload();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod controller;
pub mod messages;
mod page;
mod polling;
mod table;
mod view;

pub use controller::{AdminController, RegisterOutcome, RemoveOutcome, DEFAULT_POLL_INTERVAL};
pub use page::PageContext;
pub use polling::{PollHandle, PollStep, PollingSession, MIN_POLL_PERIOD};
pub use table::{RemoveAction, TableRow, UserTable, COLUMNS};
pub use view::{AdminView, MessageKind};
