//! Integration tests for graph-batch
//!
//! These tests drive the HTTP transport and the client against a local
//! mock server speaking the batch protocol.

pub mod client_tests;
pub mod config_loading_tests;
pub mod error_handling_tests;
