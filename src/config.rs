use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ReportError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Settings for the OAuth consent flow and its local callback listener
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Port the one-shot callback listener binds to; must match the redirect
    /// URI registered for the OAuth client
    #[serde(default = "default_callback_port")]
    pub callback_port: u16,
    /// Address the listener binds to; 0.0.0.0 so the redirect works when the
    /// tool runs inside a container
    #[serde(default = "default_callback_bind")]
    pub callback_bind: String,
    /// How long to wait for the provider redirect before giving up
    #[serde(default = "default_callback_timeout_secs")]
    pub callback_timeout_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            callback_port: default_callback_port(),
            callback_bind: default_callback_bind(),
            callback_timeout_secs: default_callback_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Gmail user id; "me" means the authenticated account
    #[serde(default = "default_user_id")]
    pub user_id: String,
    /// Emit a progress line every N fetched messages
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,
    /// Page size for the unread-message listing
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
            progress_interval: default_progress_interval(),
            page_size: default_page_size(),
        }
    }
}

fn default_callback_port() -> u16 {
    8080
}

fn default_callback_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_callback_timeout_secs() -> u64 {
    300
}

fn default_user_id() -> String {
    "me".to_string()
}

fn default_progress_interval() -> usize {
    10
}

fn default_page_size() -> u32 {
    100
}

impl Config {
    pub async fn load(path: &Path) -> Result<Self> {
        // If file doesn't exist, return default config with warning
        if !path.exists() {
            tracing::debug!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ReportError::ConfigError(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ReportError::ConfigError(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;

        tracing::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.auth.callback_port == 0 {
            return Err(ReportError::ConfigError(
                "auth.callback_port must be a fixed, non-zero port".to_string(),
            ));
        }
        if self.auth.callback_timeout_secs == 0 {
            return Err(ReportError::ConfigError(
                "auth.callback_timeout_secs must be at least 1".to_string(),
            ));
        }

        if self.report.progress_interval == 0 {
            return Err(ReportError::ConfigError(
                "report.progress_interval must be at least 1".to_string(),
            ));
        }
        if self.report.page_size == 0 || self.report.page_size > 500 {
            return Err(ReportError::ConfigError(
                "report.page_size must be between 1 and 500 (Gmail API maximum)".to_string(),
            ));
        }

        Ok(())
    }
}
