//! Execution of one flushed batch
//!
//! The dispatcher is the only place that writes results. Every responder in
//! a batch is consumed exactly once on every path through [`Dispatcher::dispatch`].

use super::stats::BatchStats;
use super::types::{Batch, CallResult, Responder};
use crate::core::transport::BatchTransport;
use crate::utils::error::{BatchError, TransportError};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Sends detached batches through the transport and demultiplexes the results
pub struct Dispatcher<T: ?Sized> {
    transport: Arc<T>,
    stats: Arc<BatchStats>,
}

impl<T: ?Sized> Clone for Dispatcher<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            stats: Arc::clone(&self.stats),
        }
    }
}

impl<T: BatchTransport + ?Sized> Dispatcher<T> {
    pub fn new(transport: Arc<T>, stats: Arc<BatchStats>) -> Self {
        Self { transport, stats }
    }

    /// Issue one composite call for `batch` and resolve every member
    pub async fn dispatch(self, batch: Batch) {
        let batch_id = batch.id();
        let reason = batch.reason();
        let (requests, responders) = batch.into_parts();
        let expected = responders.len();
        let mut unresolved = Unresolved {
            stats: Arc::clone(&self.stats),
            remaining: expected as u64,
        };
        let started = Instant::now();

        let outcome = match self.transport.send(&requests).await {
            Ok(responses) if responses.len() == expected => Ok(responses),
            Ok(responses) => Err(TransportError::LengthMismatch {
                expected,
                actual: responses.len(),
            }),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(responses) => {
                debug!(
                    batch_id,
                    size = expected,
                    %reason,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "batch dispatched"
                );
                for (responder, response) in responders.into_iter().zip(responses) {
                    self.deliver(&mut unresolved, responder, Ok(response));
                }
            }
            Err(e) => {
                warn!(batch_id, size = expected, error = %e, "composite call failed");
                self.stats.record_transport_failure();
                let shared = BatchError::Transport(Arc::new(e));
                for responder in responders {
                    self.deliver(&mut unresolved, responder, Err(shared.clone()));
                }
            }
        }
    }

    fn deliver(&self, unresolved: &mut Unresolved, responder: Responder, result: CallResult) {
        let call_id = responder.id();
        if !responder.resolve(result) {
            debug!(call_id, "caller stopped waiting, result discarded");
        }
        unresolved.remaining -= 1;
        self.stats.record_resolved(1);
    }
}

/// Members of a batch not yet delivered to
///
/// If the dispatch task unwinds, the remaining responders are dropped (their
/// callers see [`BatchError::Dropped`]) and are counted as resolved here.
struct Unresolved {
    stats: Arc<BatchStats>,
    remaining: u64,
}

impl Drop for Unresolved {
    fn drop(&mut self) {
        if self.remaining > 0 {
            self.stats.record_resolved(self.remaining);
        }
    }
}
