//! Graph API batch transport
//!
//! A composite call is a form-encoded POST to the API root carrying the
//! JSON-encoded list of sub-requests in the `batch` field. The response is a
//! JSON array with one entry per sub-request, in order; an entry may be
//! `null` when the remote side could not run that sub-request.

use super::BatchTransport;
use super::redaction::Redactor;
use crate::config::GraphApiConfig;
use crate::core::batch::{SubRequest, SubResponse};
use crate::utils::error::{BatchError, GraphErrorEnvelope, TransportError};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Longest body excerpt kept in a status error
const MAX_ERROR_BODY: usize = 512;

/// One composite request
#[derive(Debug, Clone, Copy)]
pub struct CompositeBatch<'a> {
    pub access_token: Option<&'a str>,
    pub app_id: Option<u64>,
    pub requests: &'a [SubRequest],
}

/// Perform one composite call
///
/// Errors are only returned when the composite call itself fails, never for
/// the individual sub-requests.
pub async fn batch_do(
    client: &Client,
    base_url: &Url,
    batch: &CompositeBatch<'_>,
    redactor: Redactor,
) -> Result<Vec<SubResponse>, TransportError> {
    let mut form: Vec<(&str, String)> = Vec::with_capacity(3);
    if let Some(token) = batch.access_token.filter(|t| !t.is_empty()) {
        form.push(("access_token", token.to_string()));
    }
    if let Some(app_id) = batch.app_id.filter(|id| *id != 0) {
        form.push(("batch_app_id", app_id.to_string()));
    }
    form.push(("batch", serde_json::to_string(batch.requests)?));

    let http_error =
        |e: reqwest::Error| TransportError::Http(redactor.redact(&e.to_string()).into_owned());

    let response = client
        .post(base_url.clone())
        .form(&form)
        .send()
        .await
        .map_err(http_error)?;

    let status = response.status().as_u16();
    let body = response.text().await.map_err(http_error)?;
    debug!(status, bytes = body.len(), "composite response received");

    if !(200..400).contains(&status) {
        return Err(match serde_json::from_str::<GraphErrorEnvelope>(&body) {
            Ok(envelope) => {
                let mut error = envelope.error;
                error.message = redactor.redact(&error.message).into_owned();
                TransportError::Api(error)
            }
            Err(_) => TransportError::Status {
                code: status,
                body: redactor.redact(truncate(&body, MAX_ERROR_BODY)).into_owned(),
            },
        });
    }

    let entries: Vec<Option<SubResponse>> = serde_json::from_str(&body)?;
    Ok(entries
        .into_iter()
        .map(|entry| entry.unwrap_or_else(SubResponse::missing))
        .collect())
}

fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// [`BatchTransport`] backed by reqwest
#[derive(Debug, Clone)]
pub struct GraphBatchTransport {
    client: Client,
    base_url: Url,
    access_token: Option<String>,
    app_id: Option<u64>,
    redactor: Redactor,
}

impl GraphBatchTransport {
    /// Build a transport with its own HTTP client
    pub fn new(config: &GraphApiConfig) -> Result<Self, BatchError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| BatchError::config(format!("Failed to create HTTP client: {}", e)))?;

        Self::with_client(client, config)
    }

    /// Build a transport on top of an existing HTTP client
    pub fn with_client(client: Client, config: &GraphApiConfig) -> Result<Self, BatchError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| BatchError::config(format!("Invalid base URL: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            access_token: config.access_token.clone(),
            app_id: config.app_id,
            redactor: Redactor::new(config.redact_errors),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn redactor(&self) -> Redactor {
        self.redactor
    }
}

#[async_trait]
impl BatchTransport for GraphBatchTransport {
    async fn send(&self, requests: &[SubRequest]) -> Result<Vec<SubResponse>, TransportError> {
        let batch = CompositeBatch {
            access_token: self.access_token.as_deref(),
            app_id: self.app_id,
            requests,
        };
        batch_do(&self.client, &self.base_url, &batch, self.redactor).await
    }
}
