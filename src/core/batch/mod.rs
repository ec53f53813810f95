//! Request batching
//!
//! Independent calls submitted from many tasks are coalesced into composite
//! calls. A batch is flushed when it reaches the maximum size, when the batch
//! window elapses after its first call, or when the coordinator is stopped.
//! Each caller receives exactly the result belonging to its own call.

mod coordinator;
mod dispatcher;
mod lifecycle;
mod stats;
mod types;
mod worker;


// Re-export all public types
pub use coordinator::BatchCoordinator;
pub use dispatcher::Dispatcher;
pub use lifecycle::LifecyclePhase;
pub use stats::{BatchStats, BatchStatsSnapshot};
pub use types::{
    Batch, BatchId, CallId, CallResult, FlushReason, Header, PendingCall, Responder,
    ResponseHandle, SubRequest, SubResponse,
};
