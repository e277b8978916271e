//! Browser implementations of the store seams.
//!
//! Client-side (csr): real HTTP via `gloo-net`, `localStorage`, and
//! `window.location`.
//! Native builds (tests, tooling): stubs that fail or no-op, since these
//! adapters are only meaningful in the browser.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "browser_test.rs"]
mod browser_test;

use stores::{ApiError, HttpRequest, HttpResponse, Navigator, PersistedStorage, Transport};

#[cfg(any(test, not(feature = "csr")))]
const UNAVAILABLE: &str = "not available outside the browser";

#[cfg(any(test, feature = "csr"))]
fn transport_error(context: &str, detail: impl std::fmt::Display) -> ApiError {
    ApiError::Transport(format!("{context}: {detail}"))
}

/// HTTP transport backed by `gloo-net` (the browser `fetch` API).
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

#[async_trait::async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::Request;
            use stores::Method;

            let mut builder = match request.method {
                Method::Get => Request::get(&request.url),
                Method::Post => Request::post(&request.url),
                Method::Put => Request::put(&request.url),
                Method::Delete => Request::delete(&request.url),
            };
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            let prepared = match request.body {
                Some(body) => builder.body(body),
                None => builder.build(),
            }
            .map_err(|e| transport_error("build request", e))?;

            let resp = prepared.send().await.map_err(|e| transport_error("send", e))?;
            let status = resp.status();
            let body = resp.text().await.map_err(|e| transport_error("read body", e))?;
            Ok(HttpResponse { status, body })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(ApiError::Transport(UNAVAILABLE.to_owned()))
        }
    }
}

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Log a failed `localStorage` call; returns whether it succeeded.
#[cfg(any(test, feature = "csr"))]
fn storage_ok<E>(action: &str, key: &str, result: Result<(), E>) -> bool {
    if result.is_err() {
        log::warn!("localStorage {action} failed for {key}");
        return false;
    }
    true
}

/// Persisted storage backed by `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl PersistedStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "csr")]
        {
            let Some(storage) = local_storage() else {
                return;
            };
            storage_ok("write", key, storage.set_item(key, value));
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "csr")]
        {
            let Some(storage) = local_storage() else {
                return;
            };
            storage_ok("remove", key, storage.remove_item(key));
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
        }
    }
}

/// Full-page navigation via `window.location`; discards all in-memory state.
pub fn hard_redirect(url: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(window) = web_sys::window() {
            if window.location().set_href(url).is_err() {
                log::warn!("redirect to {url} failed");
            }
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = url;
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn redirect(&self, path: &str) {
        hard_redirect(path);
    }
}
