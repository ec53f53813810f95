//! The coordinating task
//!
//! One worker owns the accumulator and the window timer. Callers reach it
//! only through the intake channel, so neither needs a lock. Each flush hands
//! the detached batch to its own dispatch task; the worker keeps accumulating
//! while earlier batches are in flight.

use super::dispatcher::Dispatcher;
use super::stats::BatchStats;
use super::types::{Batch, BatchId, FlushReason, PendingCall};
use crate::core::transport::BatchTransport;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tokio::time::Instant;
use tracing::{debug, error, info};

pub(crate) struct Worker<T: ?Sized> {
    intake: mpsc::Receiver<PendingCall>,
    dispatcher: Dispatcher<T>,
    stats: Arc<BatchStats>,
    max_batch_size: usize,
    window: Duration,
    last_batch_id: BatchId,
}

impl<T: BatchTransport + ?Sized> Worker<T> {
    pub(crate) fn new(
        intake: mpsc::Receiver<PendingCall>,
        dispatcher: Dispatcher<T>,
        stats: Arc<BatchStats>,
        max_batch_size: usize,
        window: Duration,
    ) -> Self {
        Self {
            intake,
            dispatcher,
            stats,
            max_batch_size: max_batch_size.max(1),
            window,
            last_batch_id: 0,
        }
    }

    /// Accumulate and flush until the intake is closed and drained, then wait
    /// for every dispatch task
    pub(crate) async fn run(mut self) {
        let mut accumulator: Vec<PendingCall> = Vec::new();
        let mut in_flight: JoinSet<()> = JoinSet::new();
        let timer = tokio::time::sleep(self.window);
        tokio::pin!(timer);
        let mut armed = false;

        loop {
            tokio::select! {
                biased;

                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    Self::reap(joined);
                }

                () = &mut timer, if armed => {
                    armed = false;
                    self.flush(&mut accumulator, FlushReason::Window, &mut in_flight);
                }

                received = self.intake.recv() => match received {
                    Some(call) => {
                        accumulator.push(call);
                        if accumulator.len() == 1 {
                            timer.as_mut().reset(Instant::now() + self.window);
                            armed = true;
                        }
                        if accumulator.len() >= self.max_batch_size {
                            armed = false;
                            self.flush(&mut accumulator, FlushReason::Size, &mut in_flight);
                        }
                    }
                    None => {
                        self.flush(&mut accumulator, FlushReason::Drain, &mut in_flight);
                        break;
                    }
                },
            }
        }

        let pending = in_flight.len();
        if pending > 0 {
            debug!(pending, "waiting for in-flight batches");
        }
        while let Some(joined) = in_flight.join_next().await {
            Self::reap(joined);
        }
        info!(batches = self.last_batch_id, "batch coordinator drained");
    }

    fn flush(
        &mut self,
        accumulator: &mut Vec<PendingCall>,
        reason: FlushReason,
        in_flight: &mut JoinSet<()>,
    ) {
        if accumulator.is_empty() {
            return;
        }

        let calls = std::mem::take(accumulator);
        self.last_batch_id += 1;
        let batch = Batch::new(self.last_batch_id, reason, calls);

        debug!(batch_id = batch.id(), size = batch.len(), %reason, "flushing batch");
        self.stats.record_flush(reason);
        in_flight.spawn(self.dispatcher.clone().dispatch(batch));
    }

    fn reap(joined: Result<(), JoinError>) {
        if let Err(e) = joined {
            error!(error = %e, "dispatch task failed; its callers observe a dropped result");
        }
    }
}
