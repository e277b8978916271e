//! API endpoint configuration.
//!
//! The browser build bakes the base URL in at compile time from `API_URL`;
//! the CLI reads it at run time through clap's `env` support.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Build a config for `base_url`, dropping any trailing `/`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = if trimmed.is_empty() { DEFAULT_API_URL } else { trimmed };
        Self { base_url: base_url.to_owned() }
    }

    /// Config from the `API_URL` value captured when the crate was compiled.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::new(option_env!("API_URL").unwrap_or(DEFAULT_API_URL))
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/tasks/42`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
