//! Typed client with single-call semantics
//!
//! Every call goes through a [`BatchCoordinator`], so calls issued
//! concurrently are sent as composite requests under the hood.

use crate::config::{BatchConfig, Config};
use crate::core::batch::{
    BatchCoordinator, BatchStatsSnapshot, LifecyclePhase, SubRequest, SubResponse,
};
use crate::core::request::{ApiRequest, Param};
use crate::core::transport::{BatchTransport, GraphBatchTransport, Redactor};
use crate::utils::error::{BatchError, Result};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info};

/// Graph API client that batches transparently
pub struct GraphBatchClient {
    coordinator: BatchCoordinator<dyn BatchTransport>,
    redactor: Redactor,
}

impl GraphBatchClient {
    /// Create a client talking to the configured Graph API endpoint
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let transport = GraphBatchTransport::new(&config.graph)?;
        let redactor = transport.redactor();

        info!(base_url = %transport.base_url(), "graph batch client created");
        Ok(Self::with_transport(config.batch, transport).with_redactor(redactor))
    }

    /// Create a client on top of a custom transport
    pub fn with_transport<T: BatchTransport>(config: BatchConfig, transport: T) -> Self {
        let transport: Arc<dyn BatchTransport> = Arc::new(transport);
        Self {
            coordinator: BatchCoordinator::new(config, transport),
            redactor: Redactor::default(),
        }
    }

    /// Redactor applied to API error messages of individual calls
    pub fn with_redactor(mut self, redactor: Redactor) -> Self {
        self.redactor = redactor;
        self
    }

    pub async fn start(&self) -> Result<()> {
        self.coordinator.start().await
    }

    pub async fn stop(&self) -> Result<()> {
        self.coordinator.stop().await
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.coordinator.phase()
    }

    pub fn stats(&self) -> BatchStatsSnapshot {
        self.coordinator.stats()
    }

    /// Perform a call and return its sub-response without interpreting it
    pub async fn call_raw(&self, request: ApiRequest) -> Result<SubResponse> {
        let sub = SubRequest::try_from(request)?;
        debug!(method = ?sub.method, relative_url = %sub.relative_url, "submitting call");
        self.coordinator.submit(sub).await
    }

    /// Perform a call and decode its JSON body
    pub async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let response = self.call_raw(request).await?;
        response.decode().map_err(|e| self.redact(e))
    }

    /// Perform a call whose body is not needed
    pub async fn call_discard(&self, request: ApiRequest) -> Result<()> {
        let response = self.call_raw(request).await?;
        response.decode_discard().map_err(|e| self.redact(e))
    }

    /// GET `path` with `params` and decode the result
    pub async fn get<T: DeserializeOwned>(&self, path: &str, params: &[Param]) -> Result<T> {
        self.call(ApiRequest::get(path).with_params(params)).await
    }

    fn redact(&self, error: BatchError) -> BatchError {
        match error {
            BatchError::Api(mut e) => {
                e.message = self.redactor.redact(&e.message).into_owned();
                BatchError::Api(e)
            }
            other => other,
        }
    }
}

impl std::fmt::Debug for GraphBatchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphBatchClient")
            .field("coordinator", &self.coordinator)
            .field("redactor", &self.redactor)
            .finish()
    }
}
