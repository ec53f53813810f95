//! Common test utilities for graph-batch
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::{GraphServer, fixtures};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let server = GraphServer::start().await;
//!     let config = fixtures::graph_config(&server.uri());
//!     // ...
//! }
//! ```

pub mod fixtures;
pub mod graph_server;

pub use graph_server::{GraphServer, form_fields};

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
