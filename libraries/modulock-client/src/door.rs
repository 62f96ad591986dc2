//! Door relay and RFID scanner operations.

use crate::client::with_session;
use crate::error::{ClientError, Result};
use modulock_core::{ActionReply, ScanReading};
use reqwest::Client;
use tracing::debug;

/// Door client for a ModuLock controller.
pub struct DoorClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    session_id: Option<&'a str>,
}

impl<'a> DoorClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, session_id: Option<&'a str>) -> Self {
        Self {
            http,
            base_url,
            session_id,
        }
    }

    /// Pulse the door relay.
    ///
    /// The reply carries whatever text the controller sent, including
    /// its 401 message when the session is missing.
    pub async fn open_door(&self) -> Result<ActionReply> {
        let url = format!("{}/openDoor", self.base_url);
        debug!(url = %url, "Opening door");

        let response = with_session(self.http.post(&url), self.session_id)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to read door response: {}", e))
        })?;

        debug!(status, "Door response received");
        Ok(ActionReply::from_status(status, text))
    }

    /// Read the UID of the most recently scanned tag.
    ///
    /// The controller forgets a scan after 30 seconds and answers the
    /// `No UID` sentinel, which maps to `ScanReading::Pending`.
    pub async fn last_scanned_uid(&self) -> Result<ScanReading> {
        let url = format!("{}/getLastScannedUid", self.base_url);
        debug!(url = %url, "Fetching last scanned UID");

        let response = with_session(self.http.get(&url), self.session_id)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let status = response.status();

        if status.is_success() {
            let text = response.text().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to read UID response: {}", e))
            })?;
            Ok(ScanReading::from_body(&text))
        } else if status.as_u16() == 401 {
            Err(ClientError::AuthRequired)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}
