//! ModuLock Client
//!
//! HTTP client library for the ModuLock RFID door controller.
//!
//! # Features
//!
//! - **Door**: Trigger the door relay, read the last scanned RFID UID
//! - **Users**: List, register and remove users
//! - **Session**: Forward an existing `session_id` cookie
//!
//! # Example
//!
//! ```ignore
//! use modulock_client::{ClientConfig, ModuLockClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::with_session("http://192.168.4.1", "admin_session");
//!     let client = ModuLockClient::new(config)?;
//!
//!     let reply = client.door().await.client().open_door().await?;
//!     println!("{}", reply.message);
//!
//!     let users = client.users().await.client().list_users().await?;
//!     println!("{} users registered", users.users().len());
//!
//!     Ok(())
//! }
//! ```

mod backend;
mod client;
mod door;
mod error;
mod types;
mod users;

// Re-export main types
pub use client::{DoorClientHandle, ModuLockClient, UserClientHandle};
pub use error::{ClientError, Result};
pub use types::ClientConfig;

// Re-export sub-clients for direct use if needed
pub use door::DoorClient;
pub use users::UserClient;
