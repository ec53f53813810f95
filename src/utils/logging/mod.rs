//! Logging setup
//!
//! The library only emits `tracing` events. Installing a subscriber is left to
//! the binary (or to the embedding application) through [`init_tracing`].

mod subscriber;

pub use subscriber::{build_filter, init_tracing};
