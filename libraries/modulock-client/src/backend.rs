//! `AccessBackend` over HTTP.

use crate::client::ModuLockClient;
use async_trait::async_trait;
use modulock_core::{AccessBackend, ActionReply, Registration, Result, ScanReading, UserListing};

#[async_trait]
impl AccessBackend for ModuLockClient {
    async fn open_door(&self) -> Result<ActionReply> {
        Ok(self.door().await.client().open_door().await?)
    }

    async fn get_users(&self) -> Result<UserListing> {
        Ok(self.users().await.client().list_users().await?)
    }

    async fn remove_user(&self, ra: &str) -> Result<ActionReply> {
        Ok(self.users().await.client().remove_user(ra).await?)
    }

    async fn register_user(&self, registration: &Registration) -> Result<ActionReply> {
        Ok(self.users().await.client().register_user(registration).await?)
    }

    async fn last_scanned_uid(&self) -> Result<ScanReading> {
        Ok(self.door().await.client().last_scanned_uid().await?)
    }
}
