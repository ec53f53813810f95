//! Batching configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What Submit does when the intake queue is full
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Wait for capacity
    #[default]
    Block,
    /// Fail immediately with `BatchError::IntakeFull`
    Reject,
}

impl std::str::FromStr for OverflowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "block" => Ok(OverflowPolicy::Block),
            "reject" => Ok(OverflowPolicy::Reject),
            other => Err(format!("Invalid overflow policy: {}", other)),
        }
    }
}

/// Coordinator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Size trigger: flush as soon as this many calls are queued
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
    /// Time trigger, measured from the first call after a flush
    #[serde(default = "default_batch_window_ms")]
    pub batch_window_ms: u64,
    /// Bound on calls submitted but not yet picked up by the coordinator
    #[serde(default = "default_intake_queue_capacity")]
    pub intake_queue_capacity: usize,
    /// Behavior when the intake is at capacity
    #[serde(default)]
    pub overflow: OverflowPolicy,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_batch_size: default_max_batch_size(),
            batch_window_ms: default_batch_window_ms(),
            intake_queue_capacity: default_intake_queue_capacity(),
            overflow: OverflowPolicy::default(),
        }
    }
}

impl BatchConfig {
    /// Create a config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size trigger
    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size.max(1);
        self
    }

    /// Set the time trigger
    pub fn with_batch_window(mut self, window: Duration) -> Self {
        self.batch_window_ms = (window.as_millis() as u64).max(1);
        self
    }

    /// Set the intake bound
    pub fn with_intake_queue_capacity(mut self, capacity: usize) -> Self {
        self.intake_queue_capacity = capacity.max(1);
        self
    }

    /// Set the overflow policy
    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    /// Batch window as a duration
    pub fn batch_window(&self) -> Duration {
        Duration::from_millis(self.batch_window_ms)
    }
}
