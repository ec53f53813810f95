//! Secret redaction for error text
//!
//! Errors produced by the HTTP layer may echo request URLs or bodies. Tokens
//! and app secrets are replaced before the text reaches any caller.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Replacement for a redacted value
pub const REDACTED_MARKER: &str = "-- XX -- REDACTED -- XX --";

static FORM_SECRET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(access_token|client_secret)=([^&\s]*)").expect("Invalid form secret regex")
});

static JSON_SECRET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(access_token|client_secret)"\s*:\s*"[^"]*""#)
        .expect("Invalid json secret regex")
});

/// Redacts `access_token` and `client_secret` values
#[derive(Debug, Clone, Copy)]
pub struct Redactor {
    enabled: bool,
}

impl Redactor {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Leaves text untouched
    pub fn noop() -> Self {
        Self::new(false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn redact<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if !self.enabled {
            return Cow::Borrowed(text);
        }

        let form = FORM_SECRET.replace_all(text, format!("$1={}", REDACTED_MARKER).as_str());
        if !JSON_SECRET.is_match(&form) {
            return form;
        }

        let replacement = format!(r#""$1":"{}""#, REDACTED_MARKER);
        let json = JSON_SECRET.replace_all(&form, replacement.as_str());
        Cow::Owned(json.into_owned())
    }
}

impl Default for Redactor {
    fn default() -> Self {
        Self::new(true)
    }
}
