//! Envelope types for calls travelling through the coordinator

use crate::utils::error::{BatchError, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// Opaque identifier of one submitted call
pub type CallId = u64;

/// Opaque identifier of one flushed batch
pub type BatchId = u64;

/// Outcome delivered to a caller
pub type CallResult = Result<SubResponse>;

/// One logical call inside a composite request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubRequest {
    /// Name other sub-requests can reference for dependencies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// HTTP method; the remote side assumes GET when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Path and query relative to the API root
    pub relative_url: String,
    /// Form-encoded body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl SubRequest {
    pub fn new(method: impl Into<String>, relative_url: impl Into<String>) -> Self {
        Self {
            name: None,
            method: Some(method.into()),
            relative_url: relative_url.into(),
            body: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Header of a sub-response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

/// Result of one logical call inside a composite response
///
/// A non-success `code` is still a normal result; interpreting it is up to
/// the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubResponse {
    /// HTTP status of the sub-request; 0 when the remote side returned no entry
    pub code: u16,
    #[serde(default)]
    pub headers: Vec<Header>,
    #[serde(default)]
    pub body: Option<String>,
}

impl SubResponse {
    pub fn new(code: u16) -> Self {
        Self {
            code,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Placeholder for a `null` slot in the composite response
    pub fn missing() -> Self {
        Self::new(0)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(Header {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn is_missing(&self) -> bool {
        self.code == 0
    }

    /// 2xx and 3xx
    pub fn is_success(&self) -> bool {
        (200..400).contains(&self.code)
    }

    /// First header with this name, case-insensitive
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// Every value of a repeated header, in order
    pub fn headers_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    pub fn body_str(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }
}

/// Why a batch was flushed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushReason {
    /// The accumulator reached the maximum batch size
    Size,
    /// The batch window elapsed
    Window,
    /// The intake closed and the remainder was drained
    Drain,
}

impl FlushReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlushReason::Size => "size",
            FlushReason::Window => "window",
            FlushReason::Drain => "drain",
        }
    }
}

impl std::fmt::Display for FlushReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Write side of one call's result channel
///
/// Consumed on use, so a call can be resolved at most once.
#[derive(Debug)]
pub struct Responder {
    id: CallId,
    sender: oneshot::Sender<CallResult>,
}

impl Responder {
    pub fn id(&self) -> CallId {
        self.id
    }

    /// Deliver the result; `false` if the caller stopped waiting
    pub fn resolve(self, result: CallResult) -> bool {
        self.sender.send(result).is_ok()
    }
}

/// A call queued for batching
#[derive(Debug)]
pub struct PendingCall {
    pub(crate) request: SubRequest,
    pub(crate) responder: Responder,
}

impl PendingCall {
    /// Create a call together with the handle its caller waits on
    pub fn new(id: CallId, request: SubRequest) -> (Self, ResponseHandle) {
        let (sender, receiver) = oneshot::channel();
        let call = Self {
            request,
            responder: Responder { id, sender },
        };
        (call, ResponseHandle { id, receiver })
    }

    pub fn id(&self) -> CallId {
        self.responder.id
    }

    pub fn request(&self) -> &SubRequest {
        &self.request
    }

    pub fn into_parts(self) -> (SubRequest, Responder) {
        (self.request, self.responder)
    }
}

/// Calls detached together at one flush point, in submission order
#[derive(Debug)]
pub struct Batch {
    id: BatchId,
    reason: FlushReason,
    calls: Vec<PendingCall>,
}

impl Batch {
    pub fn new(id: BatchId, reason: FlushReason, calls: Vec<PendingCall>) -> Self {
        Self { id, reason, calls }
    }

    pub fn id(&self) -> BatchId {
        self.id
    }

    pub fn reason(&self) -> FlushReason {
        self.reason
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn calls(&self) -> &[PendingCall] {
        &self.calls
    }

    /// Split into the ordered sub-requests and their matching responders
    pub fn into_parts(self) -> (Vec<SubRequest>, Vec<Responder>) {
        self.calls.into_iter().map(PendingCall::into_parts).unzip()
    }
}

/// Handle a caller awaits for the single result of its call
#[derive(Debug)]
pub struct ResponseHandle {
    id: CallId,
    receiver: oneshot::Receiver<CallResult>,
}

impl ResponseHandle {
    pub fn id(&self) -> CallId {
        self.id
    }
}

impl Future for ResponseHandle {
    type Output = CallResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(BatchError::Dropped)))
    }
}
