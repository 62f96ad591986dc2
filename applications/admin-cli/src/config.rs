/// Admin client configuration
use crate::error::{CliError, Result};
use modulock_client::{ClientConfig, ModuLockClient};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Read from the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "modulock.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdminConfig {
    #[serde(default = "default_backend")]
    pub backend: BackendSettings,

    #[serde(default = "default_polling")]
    pub polling: PollingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendSettings {
    #[serde(default = "default_url")]
    pub url: String,

    /// Value of an already-issued `session_id` cookie
    #[serde(default)]
    pub session_id: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PollingSettings {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl AdminConfig {
    /// Load configuration from file and environment.
    ///
    /// An explicit `path` must exist; otherwise `modulock.toml` is read if
    /// present. `MODULOCK_` variables override the file, with `__`
    /// between sections (`MODULOCK_BACKEND__SESSION_ID`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("MODULOCK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = &self.backend.url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(CliError::Config(format!(
                "backend.url must start with http:// or https:// (got {url:?})"
            )));
        }

        if self.backend.timeout_secs == 0 {
            return Err(CliError::Config(
                "backend.timeout_secs must be at least 1".to_string(),
            ));
        }

        if self.polling.interval_ms == 0 {
            return Err(CliError::Config(
                "polling.interval_ms must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.polling.interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.backend.timeout_secs)
    }

    /// HTTP client for the configured controller, carrying the session
    /// cookie when one is set.
    pub fn client(&self) -> Result<ModuLockClient> {
        let client_config = ClientConfig {
            url: self.backend.url.clone(),
            session_id: self.backend.session_id.clone(),
        };
        Ok(ModuLockClient::with_timeout(
            client_config,
            self.request_timeout(),
        )?)
    }
}

// Default values
fn default_backend() -> BackendSettings {
    BackendSettings {
        url: default_url(),
        session_id: None,
        timeout_secs: default_timeout_secs(),
    }
}

fn default_url() -> String {
    "http://192.168.4.1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_polling() -> PollingSettings {
    PollingSettings {
        interval_ms: default_interval_ms(),
    }
}

fn default_interval_ms() -> u64 {
    1000
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            polling: default_polling(),
        }
    }
}
