//! User management operations.

use crate::client::with_session;
use crate::error::{ClientError, Result};
use modulock_core::{ActionReply, Registration, UserListing};
use reqwest::Client;
use tracing::{debug, info};

/// User client for a ModuLock controller.
pub struct UserClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    session_id: Option<&'a str>,
}

impl<'a> UserClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, session_id: Option<&'a str>) -> Self {
        Self {
            http,
            base_url,
            session_id,
        }
    }

    /// Fetch the registered users.
    pub async fn list_users(&self) -> Result<UserListing> {
        let url = format!("{}/getUsers", self.base_url);
        debug!(url = %url, "Fetching users");

        let response = with_session(self.http.get(&url), self.session_id)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let status = response.status();

        if status.is_success() {
            let body = response.text().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to read users response: {}", e))
            })?;

            let listing = UserListing::from_body(&body);
            debug!(users = listing.users().len(), "Fetched users");
            Ok(listing)
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

    /// Remove the user with the given RA.
    pub async fn remove_user(&self, ra: &str) -> Result<ActionReply> {
        let url = format!("{}/removeUser", self.base_url);
        debug!(url = %url, ra = %ra, "Removing user");

        let response = with_session(self.http.post(&url), self.session_id)
            .form(&[("ra", ra)])
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to read removal response: {}", e))
        })?;

        let reply = ActionReply::from_status(status, text);
        if reply.success {
            info!(ra = %ra, "User removed");
        }
        Ok(reply)
    }

    /// Register a new user.
    pub async fn register_user(&self, registration: &Registration) -> Result<ActionReply> {
        let url = format!("{}/registerUser", self.base_url);
        debug!(
            url = %url,
            ra = %registration.ra,
            uid = %registration.uid,
            "Registering user"
        );

        let response = with_session(self.http.post(&url), self.session_id)
            .form(registration)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to read registration response: {}", e))
        })?;

        let reply = ActionReply::registration(status, text);
        if reply.success {
            info!(ra = %registration.ra, name = %registration.name, "User registered");
        }
        Ok(reply)
    }
}
