//! # graph-batch
//!
//! Transparent request coalescing for HTTP APIs that expose a composite
//! "batch" endpoint, such as the Facebook Graph API.
//!
//! ## Features
//!
//! - **Single-call semantics**: every caller submits one request and awaits one result
//! - **Size and time triggers**: a batch is sent when it is full or when its window elapses
//! - **Graceful stop**: calls accepted before `stop` are always delivered
//! - **Failure isolation**: a failed composite call only affects its own batch
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use graph_batch::{Config, GraphBatchClient, Param};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct User {
//!     id: String,
//!     name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GraphBatchClient::new(Config::from_env()?)?;
//!     client.start().await?;
//!
//!     let params = [Param::fields(["id", "name"])];
//!     let (me, page) = tokio::join!(
//!         client.get::<User>("me", &params),
//!         client.get::<User>("20531316728", &params),
//!     );
//!     println!("{} / {}", me?.name, page?.name);
//!
//!     client.stop().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Custom transports
//!
//! [`BatchCoordinator`] only depends on [`BatchTransport`], so any composite
//! endpoint can be plugged in.

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{BatchError, GraphApiError, Result, TransportError};

pub use core::batch::{
    BatchCoordinator, BatchStatsSnapshot, FlushReason, Header, LifecyclePhase, ResponseHandle,
    SubRequest, SubResponse,
};
pub use core::client::GraphBatchClient;
pub use core::request::{ApiRequest, Param, param_values};
pub use core::transport::{BatchTransport, CompositeBatch, GraphBatchTransport, batch_do};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
