//! Composite endpoint configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Graph API transport configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct GraphApiConfig {
    /// Endpoint the composite request is POSTed to
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Sent as `access_token` on every composite request
    #[serde(default)]
    pub access_token: Option<String>,
    /// Sent as `batch_app_id` on every composite request
    #[serde(default)]
    pub app_id: Option<u64>,
    /// Timeout for one composite call in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Strip tokens and secrets from error text
    #[serde(default = "default_true")]
    pub redact_errors: bool,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for GraphApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            access_token: None,
            app_id: None,
            timeout_secs: default_timeout(),
            redact_errors: true,
            user_agent: default_user_agent(),
        }
    }
}

impl GraphApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl std::fmt::Debug for GraphApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphApiConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("app_id", &self.app_id)
            .field("timeout_secs", &self.timeout_secs)
            .field("redact_errors", &self.redact_errors)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
