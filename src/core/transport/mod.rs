//! Composite call transport
//!
//! The coordinator depends only on [`BatchTransport`]. [`GraphBatchTransport`]
//! is the HTTP implementation for endpoints speaking the Graph API batch
//! protocol.

mod graph;
mod redaction;

pub use graph::{CompositeBatch, GraphBatchTransport, batch_do};
pub use redaction::{REDACTED_MARKER, Redactor};

use crate::core::batch::{SubRequest, SubResponse};
use crate::utils::error::TransportError;
use async_trait::async_trait;

/// The single composite network call
///
/// Implementations are shared by every in-flight dispatch task and must
/// tolerate concurrent use. On success the returned sequence is positional:
/// entry `i` answers `requests[i]`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BatchTransport: Send + Sync + 'static {
    async fn send(&self, requests: &[SubRequest]) -> Result<Vec<SubResponse>, TransportError>;
}
