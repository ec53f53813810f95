//! Error types for the batching client

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, BatchError>;

/// Main error type returned to callers
#[derive(Error, Debug, Clone)]
pub enum BatchError {
    /// Submit before Start, or after Stop closed the intake
    #[error("batch client not started")]
    NotStarted,

    /// Intake queue is at capacity and the overflow policy rejects
    #[error("batch intake full (capacity {capacity})")]
    IntakeFull { capacity: usize },

    /// The single start initialization failed; shared by every Start caller
    #[error("batch client failed to start: {0}")]
    Startup(String),

    /// The composite call failed; every member of the batch holds the same `Arc`
    #[error("composite call failed: {0}")]
    Transport(Arc<TransportError>),

    /// A sub-response carried an API error envelope
    #[error("{0}")]
    Api(GraphApiError),

    /// A sub-response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// The composite endpoint returned no sub-response for this call
    #[error("composite response had no entry for this call")]
    MissingResponse,

    /// The request could not be turned into a sub-request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The result channel closed without a value
    #[error("result dropped before delivery")]
    Dropped,

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failure of one composite call as a whole
#[derive(Error, Debug)]
pub enum TransportError {
    /// Connection, TLS, timeout or body read failures
    #[error("HTTP error: {0}")]
    Http(String),

    /// Non-success status without a recognizable error envelope
    #[error("unexpected status {code}: {body}")]
    Status { code: u16, body: String },

    /// The composite endpoint answered with an API error envelope
    #[error("{0}")]
    Api(GraphApiError),

    /// The composite request or response could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Composite result does not line up with the batch
    #[error("expected {expected} sub-responses, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// An error object as reported by the Graph API
///
/// The fields are provided by the remote service and may not always be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphApiError {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type", default)]
    pub error_type: String,
    #[serde(default)]
    pub code: i64,
}

impl fmt::Display for GraphApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(3);
        if self.code != 0 {
            parts.push(format!("code {}", self.code));
        }
        if !self.error_type.is_empty() {
            parts.push(format!("type {}", self.error_type));
        }
        if !self.message.is_empty() {
            parts.push(format!("message {}", self.message));
        }
        if parts.is_empty() {
            write!(f, "graph api error")
        } else {
            write!(f, "graph api error: {}", parts.join(" "))
        }
    }
}

impl std::error::Error for GraphApiError {}

/// Wire wrapper around [`GraphApiError`]: `{"error": {...}}`
#[derive(Debug, Deserialize)]
pub(crate) struct GraphErrorEnvelope {
    pub error: GraphApiError,
}

impl From<TransportError> for BatchError {
    fn from(err: TransportError) -> Self {
        Self::Transport(Arc::new(err))
    }
}

impl From<serde_json::Error> for BatchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
