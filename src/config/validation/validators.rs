//! Validators for the configuration sections

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::debug;

impl Validate for BatchConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_batch_size == 0 {
            return Err("Max batch size must be greater than 0".to_string());
        }

        if self.batch_window_ms == 0 {
            return Err("Batch window must be greater than 0".to_string());
        }

        if self.intake_queue_capacity == 0 {
            return Err("Intake queue capacity must be greater than 0".to_string());
        }

        if self.intake_queue_capacity > tokio::sync::Semaphore::MAX_PERMITS {
            return Err(format!(
                "Intake queue capacity must be at most {}",
                tokio::sync::Semaphore::MAX_PERMITS
            ));
        }

        Ok(())
    }
}

impl Validate for GraphApiConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating graph api configuration");

        let url = url::Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid base URL {}: {}", self.base_url, e))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!("Base URL must use http or https: {}", self.base_url));
        }

        if url.host_str().is_none() {
            return Err(format!("Base URL must have a host: {}", self.base_url));
        }

        if self.timeout_secs == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        if matches!(&self.access_token, Some(token) if token.trim().is_empty()) {
            return Err("Access token cannot be blank when set".to_string());
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        tracing_subscriber::EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|e| format!("Invalid log level {}: {}", self.level, e))
    }
}
