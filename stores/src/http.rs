//! Transport-level request/response model.
//!
//! SYSTEM CONTEXT
//! ==============
//! `ApiClient` builds an [`HttpRequest`] and hands it to a [`Transport`].
//! The browser build sends it with `gloo-net`, the CLI with `reqwest`, and
//! tests with a scripted mock.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved outgoing request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    #[must_use]
    pub fn new(method: Method, url: String) -> Self {
        Self { method, url, headers: Vec::new(), body: None }
    }

    /// Value of the first header named `name` (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON. An empty body decodes as `null`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        let raw = if self.body.trim().is_empty() { "null" } else { self.body.as_str() };
        Ok(serde_json::from_str(raw)?)
    }

    /// Server-provided error text from a `message` or `error` field.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        let value = serde_json::from_str::<Value>(&self.body).ok()?;
        ["message", "error"]
            .iter()
            .find_map(|key| value.get(key).and_then(Value::as_str))
            .filter(|text| !text.is_empty())
            .map(str::to_owned)
    }
}

/// Sends one request and returns whatever status the server answered with.
///
/// Implementations only fail for transport problems; HTTP error statuses are
/// returned as ordinary responses and interpreted by `ApiClient`.
#[async_trait::async_trait(?Send)]
pub trait Transport: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when no response could be obtained.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}
