//! Environment variable loading

use super::Config;
use crate::utils::error::{BatchError, Result};
use std::str::FromStr;
use tracing::debug;

pub const ENV_MAX_BATCH_SIZE: &str = "GRAPH_BATCH_MAX_BATCH_SIZE";
pub const ENV_WINDOW_MS: &str = "GRAPH_BATCH_WINDOW_MS";
pub const ENV_QUEUE_CAPACITY: &str = "GRAPH_BATCH_QUEUE_CAPACITY";
pub const ENV_OVERFLOW: &str = "GRAPH_BATCH_OVERFLOW";
pub const ENV_BASE_URL: &str = "GRAPH_API_BASE_URL";
pub const ENV_ACCESS_TOKEN: &str = "GRAPH_API_ACCESS_TOKEN";
pub const ENV_APP_ID: &str = "GRAPH_API_APP_ID";
pub const ENV_TIMEOUT_SECS: &str = "GRAPH_API_TIMEOUT_SECS";
pub const ENV_LOG_LEVEL: &str = "GRAPH_BATCH_LOG_LEVEL";
pub const ENV_LOG_JSON: &str = "GRAPH_BATCH_LOG_JSON";

fn parse<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| BatchError::config(format!("Invalid {}: {}", key, e)))
}

impl Config {
    /// Build a configuration from a key lookup, starting from defaults
    ///
    /// Unset keys keep their defaults. The result is not validated.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(v) = lookup(ENV_MAX_BATCH_SIZE) {
            config.batch.max_batch_size = parse(ENV_MAX_BATCH_SIZE, &v)?;
        }
        if let Some(v) = lookup(ENV_WINDOW_MS) {
            config.batch.batch_window_ms = parse(ENV_WINDOW_MS, &v)?;
        }
        if let Some(v) = lookup(ENV_QUEUE_CAPACITY) {
            config.batch.intake_queue_capacity = parse(ENV_QUEUE_CAPACITY, &v)?;
        }
        if let Some(v) = lookup(ENV_OVERFLOW) {
            config.batch.overflow = parse(ENV_OVERFLOW, &v)?;
        }

        if let Some(v) = lookup(ENV_BASE_URL) {
            config.graph.base_url = v;
        }
        if let Some(v) = lookup(ENV_ACCESS_TOKEN) {
            config.graph.access_token = Some(v);
        }
        if let Some(v) = lookup(ENV_APP_ID) {
            config.graph.app_id = Some(parse(ENV_APP_ID, &v)?);
        }
        if let Some(v) = lookup(ENV_TIMEOUT_SECS) {
            config.graph.timeout_secs = parse(ENV_TIMEOUT_SECS, &v)?;
        }

        if let Some(v) = lookup(ENV_LOG_LEVEL) {
            config.logging.level = v;
        }
        if let Some(v) = lookup(ENV_LOG_JSON) {
            config.logging.json = parse(ENV_LOG_JSON, &v)?;
        }

        debug!("Configuration loaded from environment");
        Ok(config)
    }
}
