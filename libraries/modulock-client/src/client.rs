//! Main ModuLock client.

use crate::door::DoorClient;
use crate::error::{ClientError, Result};
use crate::types::{session_cookie, ClientConfig};
use crate::users::UserClient;
use reqwest::header::COOKIE;
use reqwest::{Client, RequestBuilder};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Main client for interacting with a ModuLock door controller.
///
/// The client holds the optional session cookie and hands out
/// short-lived sub-clients for door and user operations.
///
/// # Example
///
/// ```ignore
/// use modulock_client::{ClientConfig, ModuLockClient};
///
/// let client = ModuLockClient::new(ClientConfig::new("http://192.168.4.1"))?;
/// client.set_session("admin_session").await;
///
/// let scan = client.door().await.client().last_scanned_uid().await?;
/// println!("{:?}", scan);
/// ```
pub struct ModuLockClient {
    http: Client,
    config: Arc<RwLock<ClientConfig>>,
}

impl ModuLockClient {
    /// Create a new client with the default 30 second request timeout.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_timeout(config, Duration::from_secs(30))
    }

    /// Create a new client with a custom request timeout.
    pub fn with_timeout(config: ClientConfig, timeout: Duration) -> Result<Self> {
        // Validate URL
        if config.url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let url = config.url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let normalized_config = ClientConfig {
            url,
            session_id: config.session_id,
        };

        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("ModuLock-Admin/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        debug!(url = %normalized_config.url, timeout = ?timeout, "Created door controller client");

        Ok(Self {
            http,
            config: Arc::new(RwLock::new(normalized_config)),
        })
    }

    /// Get the controller URL.
    pub async fn url(&self) -> String {
        self.config.read().await.url.clone()
    }

    /// Check if the client forwards a session cookie.
    pub async fn has_session(&self) -> bool {
        self.config.read().await.session_id.is_some()
    }

    /// Forward this session id on every subsequent request.
    pub async fn set_session(&self, session_id: impl Into<String>) {
        self.config.write().await.session_id = Some(session_id.into());
    }

    /// Stop forwarding a session cookie.
    pub async fn clear_session(&self) {
        self.config.write().await.session_id = None;
        info!("Session cleared");
    }

    /// Get a door client for relay and scanner operations.
    pub async fn door(&self) -> DoorClientHandle {
        let config = self.config.read().await;
        DoorClientHandle {
            http: self.http.clone(),
            url: config.url.clone(),
            session_id: config.session_id.clone(),
        }
    }

    /// Get a user client for listing, registering and removing users.
    pub async fn users(&self) -> UserClientHandle {
        let config = self.config.read().await;
        UserClientHandle {
            http: self.http.clone(),
            url: config.url.clone(),
            session_id: config.session_id.clone(),
        }
    }
}

/// Attach the session cookie to a request, if there is one.
pub(crate) fn with_session(request: RequestBuilder, session_id: Option<&str>) -> RequestBuilder {
    match session_id {
        Some(id) => request.header(COOKIE, session_cookie(id)),
        None => request,
    }
}

/// Handle for door operations.
///
/// Returned by `ModuLockClient::door()`.
pub struct DoorClientHandle {
    http: Client,
    url: String,
    session_id: Option<String>,
}

impl DoorClientHandle {
    /// Get the door client.
    pub fn client(&self) -> DoorClient<'_> {
        DoorClient::new(&self.http, &self.url, self.session_id.as_deref())
    }
}

/// Handle for user operations.
pub struct UserClientHandle {
    http: Client,
    url: String,
    session_id: Option<String>,
}

impl UserClientHandle {
    /// Get the user client.
    pub fn client(&self) -> UserClient<'_> {
        UserClient::new(&self.http, &self.url, self.session_id.as_deref())
    }
}
