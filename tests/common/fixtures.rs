//! Configuration fixtures

use graph_batch::config::{BatchConfig, Config, GraphApiConfig};
use std::time::Duration;

pub const TEST_TOKEN: &str = "test-token-123";
pub const TEST_APP_ID: u64 = 4242;

/// Graph config pointing at a local server
pub fn graph_config(base_url: &str) -> GraphApiConfig {
    GraphApiConfig {
        base_url: format!("{}/", base_url.trim_end_matches('/')),
        access_token: Some(TEST_TOKEN.to_string()),
        app_id: Some(TEST_APP_ID),
        timeout_secs: 5,
        ..Default::default()
    }
}

/// Batch config with a short window
pub fn batch_config(max_batch_size: usize) -> BatchConfig {
    BatchConfig::new()
        .with_max_batch_size(max_batch_size)
        .with_batch_window(Duration::from_millis(20))
}

/// Full config for a client talking to `base_url`
pub fn config(base_url: &str, max_batch_size: usize) -> Config {
    Config {
        batch: batch_config(max_batch_size),
        graph: graph_config(base_url),
        ..Default::default()
    }
}
