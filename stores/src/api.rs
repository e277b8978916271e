//! HTTP adapter shared by every store.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every request goes through [`ApiClient::request`]: the configured base URL
//! is prepended, the persisted access token (if any) is attached as a bearer
//! header, and a 401 from any endpoint clears the token and hard-navigates to
//! the login route before the error is handed back to the caller.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx statuses become [`ApiError::Status`] carrying the server's
//! `message`/`error` text so stores can surface it verbatim.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::guard::AppRoute;
use crate::http::{HttpRequest, HttpResponse, Method, Transport};
use crate::storage::{ACCESS_TOKEN_KEY, PersistedStorage};
use crate::types::User;

/// Performs the hard navigation that follows a 401.
pub trait Navigator: Send + Sync {
    fn redirect(&self, path: &str);
}

#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    transport: Arc<dyn Transport>,
    storage: Arc<dyn PersistedStorage>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        config: ApiConfig,
        transport: Arc<dyn Transport>,
        storage: Arc<dyn PersistedStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self { config, transport, storage, navigator }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    #[must_use]
    pub fn storage(&self) -> &dyn PersistedStorage {
        self.storage.as_ref()
    }

    /// Send `method path` with an optional JSON body.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Unauthorized`] on 401, after the token was removed and
    ///   the navigator sent to `/login`.
    /// - [`ApiError::Status`] for any other non-2xx status.
    /// - [`ApiError::Transport`] if no response arrived.
    pub async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<HttpResponse, ApiError> {
        let mut request = HttpRequest::new(method, self.config.url(path));
        request.headers.push(("Content-Type".to_owned(), "application/json".to_owned()));
        if let Some(token) = self.storage.access_token() {
            request.headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
        }
        if let Some(body) = body {
            request.body = Some(body.to_string());
        }

        log::debug!("{method} {}", request.url);
        let response = self.transport.send(request).await.inspect_err(|e| {
            log::warn!("{method} {path} failed: {e}");
        })?;

        if response.status == 401 {
            log::warn!("{method} {path} returned 401; clearing session");
            self.storage.remove(ACCESS_TOKEN_KEY);
            self.navigator.redirect(AppRoute::Login.path());
            return Err(ApiError::Unauthorized);
        }
        if !response.is_success() {
            let message = response.error_message();
            log::warn!("{method} {path} returned {}: {}", response.status, message.as_deref().unwrap_or("-"));
            return Err(ApiError::Status { status: response.status, message });
        }
        Ok(response)
    }

    /// [`request`](Self::request) and decode the JSON body as `T`.
    ///
    /// # Errors
    ///
    /// Everything `request` returns, plus [`ApiError::Decode`].
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        self.request(method, path, body).await?.json()
    }

    /// Fetch the identity-provider redirect URL from `GET /auth/microsoft`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body has no `login_url`.
    pub async fn login_url(&self) -> Result<String, ApiError> {
        #[derive(Deserialize)]
        struct LoginUrlResponse {
            login_url: Option<String>,
        }
        let body: LoginUrlResponse = self.request_json(Method::Get, "/auth/microsoft", None).await?;
        body.login_url
            .filter(|url| !url.is_empty())
            .ok_or(ApiError::MissingField("login_url"))
    }

    /// End the server session via `POST /auth/signout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn sign_out(&self) -> Result<(), ApiError> {
        self.request(Method::Post, "/auth/signout", None).await.map(|_| ())
    }

    /// Fetch the signed-in user from `GET /auth/me`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a user.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.request_json(Method::Get, "/auth/me", None).await
    }
}

/// Take `key` out of a response envelope such as `{ "task": {...} }`.
///
/// # Errors
///
/// Returns [`ApiError::MissingField`] if the key is absent or null, or
/// [`ApiError::Decode`] if its value is not a `T`.
pub fn take_field<T: DeserializeOwned>(mut envelope: Value, key: &'static str) -> Result<T, ApiError> {
    let value = envelope.get_mut(key).map(Value::take).filter(|v| !v.is_null());
    let value = value.ok_or(ApiError::MissingField(key))?;
    Ok(serde_json::from_value(value)?)
}
