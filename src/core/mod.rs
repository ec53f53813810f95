//! Core functionality
//!
//! This module contains the batching coordinator and the pieces around it:
//! the composite call transport, request translation and the typed client.

pub mod batch;
pub mod client;
pub mod request;
pub mod transport;
