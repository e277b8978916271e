//! Error type shared by the HTTP adapter and every store.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Failure of an API call or of decoding its payload.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered 401; the session has already been cleared.
    #[error("unauthorized")]
    Unauthorized,
    /// Any other non-2xx status.
    #[error("server returned {status}{}", message_suffix(.message))]
    Status { status: u16, message: Option<String> },
    /// The response body was not the JSON we expected.
    #[error("invalid JSON payload: {0}")]
    Decode(#[from] serde_json::Error),
    /// A login callback payload did not match the typed contract.
    #[error("malformed {what} payload: {reason}")]
    MalformedPayload { what: &'static str, reason: String },
    /// A response envelope lacked the expected key.
    #[error("missing expected field `{0}`")]
    MissingField(&'static str),
    /// A record id that cannot be used as a single path segment.
    #[error("invalid record id `{0}`")]
    InvalidId(String),
}

fn message_suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

impl ApiError {
    /// Message supplied by the server, if the failure carried one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Text stored in a store's `error` field: the server message or `fallback`.
    #[must_use]
    pub fn display_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_owned()
    }
}
