//! Configuration data models

pub mod batch;
pub mod graph;
pub mod logging;

pub use batch::*;
pub use graph::*;
pub use logging::*;

/// Default maximum number of calls per composite request
pub fn default_max_batch_size() -> usize {
    50
}

/// Default batch window in milliseconds
pub fn default_batch_window_ms() -> u64 {
    10
}

/// Default intake queue capacity
pub fn default_intake_queue_capacity() -> usize {
    1024
}

/// Default Graph API endpoint
pub fn default_base_url() -> String {
    "https://graph.facebook.com/".to_string()
}

/// Default composite call timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default user agent
pub fn default_user_agent() -> String {
    format!("graph-batch/{}", env!("CARGO_PKG_VERSION"))
}

/// Default log level
pub fn default_log_level() -> String {
    "info".to_string()
}

pub(crate) fn default_true() -> bool {
    true
}
