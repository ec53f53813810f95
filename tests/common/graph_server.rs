//! Local stand-in for the composite batch endpoint
//!
//! Every sub-request is answered by its path:
//! - `/null...` gets a `null` slot
//! - `/error...` gets a 400 with an OAuth error envelope
//! - anything else gets 200 with a JSON echo of the sub-request

use graph_batch::SubRequest;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Decode a form-encoded body into its fields, in order
pub fn form_fields(body: &[u8]) -> Vec<(String, String)> {
    url::form_urlencoded::parse(body).into_owned().collect()
}

/// Sub-requests carried by a composite request
pub fn sub_requests(request: &Request) -> Vec<SubRequest> {
    let batch = form_fields(&request.body)
        .into_iter()
        .find(|(k, _)| k == "batch")
        .map(|(_, v)| v)
        .unwrap_or_else(|| panic!("composite request without batch field"));
    serde_json::from_str(&batch).unwrap()
}

fn answer(sub: &SubRequest) -> Value {
    if sub.relative_url.starts_with("/null") {
        return Value::Null;
    }
    if sub.relative_url.starts_with("/error") {
        let envelope = json!({"error": {
            "message": "Error validating access token",
            "type": "OAuthException",
            "code": 190,
        }});
        return json!({"code": 400, "headers": [], "body": envelope.to_string()});
    }

    let echo = json!({
        "method": sub.method,
        "relative_url": sub.relative_url,
        "body": sub.body,
    });
    json!({
        "code": 200,
        "headers": [{"name": "Content-Type", "value": "text/javascript; charset=UTF-8"}],
        "body": echo.to_string(),
    })
}

struct EchoResponder;

impl Respond for EchoResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let entries: Vec<Value> = sub_requests(request).iter().map(answer).collect();
        ResponseTemplate::new(200).set_body_json(entries)
    }
}

/// Mock server answering composite calls
pub struct GraphServer {
    server: MockServer,
}

impl GraphServer {
    /// Server that echoes every sub-request
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(EchoResponder)
            .mount(&server)
            .await;
        Self { server }
    }

    /// Server that fails every composite call with `status` and `body`
    pub async fn failing(status: u16, body: &str) -> Self {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&server)
            .await;
        Self { server }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Composite requests received so far
    pub async fn composite_requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Number of sub-requests in each composite request received so far
    pub async fn batch_sizes(&self) -> Vec<usize> {
        self.composite_requests()
            .await
            .iter()
            .map(|r| sub_requests(r).len())
            .collect()
    }
}
