//! Public face of the batching machinery
//!
//! [`BatchCoordinator`] owns the lifecycle and the intake. Accumulation and
//! flushing happen in a worker task spawned by [`BatchCoordinator::start`].

use super::dispatcher::Dispatcher;
use super::lifecycle::{IntakeGate, LifecyclePhase, StartBarrier};
use super::stats::{BatchStats, BatchStatsSnapshot};
use super::types::{CallId, PendingCall, ResponseHandle, SubRequest, SubResponse};
use super::worker::Worker;
use crate::config::{BatchConfig, OverflowPolicy, Validate};
use crate::core::transport::BatchTransport;
use crate::utils::error::{BatchError, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Coalesces concurrently submitted calls into composite calls
///
/// Every accepted call receives exactly one result. A coordinator cannot be
/// restarted once stopped.
pub struct BatchCoordinator<T: ?Sized> {
    config: BatchConfig,
    transport: Arc<T>,
    stats: Arc<BatchStats>,
    gate: IntakeGate,
    started: StartBarrier,
    worker: Mutex<Option<JoinHandle<()>>>,
    last_call_id: AtomicU64,
}

impl<T: BatchTransport + ?Sized> BatchCoordinator<T> {
    pub fn new(config: BatchConfig, transport: Arc<T>) -> Self {
        Self {
            config,
            transport,
            stats: Arc::new(BatchStats::new()),
            gate: IntakeGate::new(),
            started: StartBarrier::new(),
            worker: Mutex::new(None),
            last_call_id: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.gate.phase()
    }

    pub fn stats(&self) -> BatchStatsSnapshot {
        self.stats.snapshot()
    }

    /// Start the coordinating task
    ///
    /// Idempotent: concurrent and repeated callers share the outcome of a
    /// single initialization. Must be called from within a tokio runtime.
    pub async fn start(&self) -> Result<()> {
        self.started.run(|| self.initialize()).await
    }

    async fn initialize(&self) -> std::result::Result<(), String> {
        Validate::validate(&self.config)?;
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| format!("no tokio runtime available: {}", e))?;

        let (sender, receiver) = mpsc::channel(self.config.intake_queue_capacity);
        let worker = Worker::new(
            receiver,
            Dispatcher::new(Arc::clone(&self.transport), Arc::clone(&self.stats)),
            Arc::clone(&self.stats),
            self.config.max_batch_size,
            self.config.batch_window(),
        );

        let mut slot = self.worker.lock().await;
        *slot = Some(runtime.spawn(worker.run()));
        if !self.gate.open(sender) {
            return Err("coordinator already left the not-started phase".to_string());
        }

        info!(
            max_batch_size = self.config.max_batch_size,
            batch_window_ms = self.config.batch_window_ms,
            intake_queue_capacity = self.config.intake_queue_capacity,
            "batch coordinator started"
        );
        Ok(())
    }

    /// Close the intake and wait until every accepted call is resolved
    ///
    /// In-flight composite calls are not cancelled. Stopping a coordinator
    /// that was never started is a no-op. Cancel safe: if this future is
    /// dropped early, a later call still waits for the drain.
    pub async fn stop(&self) -> Result<()> {
        let mut slot = self.worker.lock().await;
        if self.gate.phase() == LifecyclePhase::NotStarted {
            return Ok(());
        }

        // Submits holding a clone of the sender keep the worker receiving
        // until their calls are queued.
        drop(self.gate.close());

        // The handle stays in the slot until the worker has finished, so a
        // cancelled stop leaves the next caller something to wait on.
        let Some(handle) = slot.as_mut() else {
            self.gate.finish();
            return Ok(());
        };

        info!("stopping batch coordinator, draining accepted calls");
        let joined = handle.await;
        slot.take();
        self.gate.finish();
        joined.map_err(|e| BatchError::internal(format!("coordinator task failed: {}", e)))?;

        let stats = self.stats.snapshot();
        info!(
            accepted = stats.accepted,
            resolved = stats.resolved,
            batches = stats.batches,
            "batch coordinator stopped"
        );
        Ok(())
    }

    /// Queue a call and return the handle its result arrives on
    ///
    /// Fails immediately with [`BatchError::NotStarted`] unless running, without
    /// touching any state.
    pub async fn enqueue(&self, request: SubRequest) -> Result<ResponseHandle> {
        let Some(sender) = self.gate.sender() else {
            return Err(BatchError::NotStarted);
        };

        let permit = match self.config.overflow {
            OverflowPolicy::Block => sender.reserve().await.map_err(|_| BatchError::NotStarted),
            OverflowPolicy::Reject => sender.try_reserve().map_err(|e| match e {
                mpsc::error::TrySendError::Full(()) => BatchError::IntakeFull {
                    capacity: self.config.intake_queue_capacity,
                },
                mpsc::error::TrySendError::Closed(()) => BatchError::NotStarted,
            }),
        };
        let permit = match permit {
            Ok(permit) => permit,
            Err(e) => {
                if matches!(e, BatchError::IntakeFull { .. }) {
                    self.stats.record_rejected();
                }
                return Err(e);
            }
        };

        let id = self.next_call_id();
        let (call, handle) = PendingCall::new(id, request);
        self.stats.record_accepted();
        permit.send(call);
        debug!(call_id = id, "call queued");
        Ok(handle)
    }

    /// Queue a call and wait for its result
    pub async fn submit(&self, request: SubRequest) -> Result<SubResponse> {
        self.enqueue(request).await?.await
    }

    fn next_call_id(&self) -> CallId {
        self.last_call_id.fetch_add(1, Ordering::Relaxed) + 1
    }
}

impl<T: ?Sized> std::fmt::Debug for BatchCoordinator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchCoordinator")
            .field("config", &self.config)
            .field("phase", &self.gate.phase())
            .field("stats", &self.stats.snapshot())
            .finish()
    }
}
