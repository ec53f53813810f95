//! Caller-facing request and its translation into a sub-request

use super::params::{Param, param_values};
use crate::core::batch::SubRequest;
use crate::utils::error::BatchError;
use reqwest::Method;
use url::Url;

/// Placeholder origin used to resolve relative paths
const RELATIVE_ORIGIN: &str = "http://relative.invalid/";

/// A single Graph API call as the caller describes it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute URL or path relative to the API root
    pub url: String,
    pub body: Option<String>,
    params: Vec<Param>,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
            params: Vec::new(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    /// Append query parameters
    pub fn with_params(mut self, params: &[Param]) -> Self {
        self.params.extend_from_slice(params);
        self
    }

    /// Form-encode `pairs` as the body
    pub fn with_form<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator,
        I::Item: std::borrow::Borrow<(K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();
        self.body = Some(body);
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Path and query relative to the API root, parameters included
    pub fn relative_url(&self) -> Result<String, BatchError> {
        let mut url = match Url::parse(&self.url) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(RELATIVE_ORIGIN)
                .and_then(|origin| origin.join(&self.url))
                .map_err(|e| invalid_url(&self.url, e))?,
            Err(e) => return Err(invalid_url(&self.url, e)),
        };

        let extra = param_values(&self.params);
        if !extra.is_empty() {
            url.query_pairs_mut().extend_pairs(extra);
        }

        let mut relative = url.path().to_string();
        if !relative.starts_with('/') {
            relative.insert(0, '/');
        }
        if let Some(query) = url.query() {
            relative.push('?');
            relative.push_str(query);
        }
        Ok(relative)
    }
}

fn invalid_url(url: &str, e: url::ParseError) -> BatchError {
    BatchError::invalid_request(format!("invalid url {}: {}", url, e))
}

impl TryFrom<ApiRequest> for SubRequest {
    type Error = BatchError;

    fn try_from(request: ApiRequest) -> Result<Self, Self::Error> {
        let relative_url = request.relative_url()?;
        Ok(SubRequest {
            name: None,
            method: Some(request.method.as_str().to_string()),
            relative_url,
            body: request.body,
        })
    }
}
