/// Core traits for the ModuLock admin client
use crate::error::Result;
use crate::types::{ActionReply, Registration, ScanReading, UserListing};
use async_trait::async_trait;

/// The door controller's HTTP surface.
///
/// Implemented over HTTP by `modulock-client`; tests substitute in-memory
/// fakes. Text endpoints return an [`ActionReply`] whatever the status code,
/// so only transport failures surface as `Err`.
#[async_trait]
pub trait AccessBackend: Send + Sync {
    /// `POST /openDoor`
    async fn open_door(&self) -> Result<ActionReply>;

    /// `GET /getUsers`
    ///
    /// # Errors
    /// Transport failures and non-success statuses. A body that is not a
    /// usable user list is *not* an error; it yields [`UserListing::NoData`].
    async fn get_users(&self) -> Result<UserListing>;

    /// `POST /removeUser` with form `ra=<ra>`
    async fn remove_user(&self, ra: &str) -> Result<ActionReply>;

    /// `POST /registerUser` with form `ra`, `name`, `uid`
    async fn register_user(&self, registration: &Registration) -> Result<ActionReply>;

    /// `GET /getLastScannedUid`
    async fn last_scanned_uid(&self) -> Result<ScanReading>;
}
