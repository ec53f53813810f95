//! tracing-subscriber installation

use crate::config::LoggingConfig;
use crate::utils::error::{BatchError, Result};
use tracing_subscriber::EnvFilter;

/// Build the event filter: `RUST_LOG` wins over the configured level
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Install a global fmt subscriber
///
/// Fails if a global subscriber was already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(config))
        .with_target(false)
        .with_thread_ids(false);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed
        .map_err(|e| BatchError::config(format!("Failed to install tracing subscriber: {}", e)))
}
