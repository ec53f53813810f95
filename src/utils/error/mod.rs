//! Error handling for the batching client
//!
//! Every failure reaches the originating caller through its own result; the
//! crate never retries and never swallows an error into a log line.

mod error;
mod helpers;


pub use error::{BatchError, GraphApiError, Result, TransportError};
pub(crate) use error::GraphErrorEnvelope;
