//! Scripted transport and recording navigator for store tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::api::{ApiClient, Navigator};
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::storage::{ACCESS_TOKEN_KEY, MemoryStorage, PersistedStorage};

pub const BASE_URL: &str = "http://api.test";

#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Result<HttpResponse, ApiError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn reply(&self, status: u16, body: Value) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse { status, body: body.to_string() }));
    }

    pub fn fail(&self, message: &str) {
        self.replies.lock().unwrap().push_back(Err(ApiError::Transport(message.to_owned())));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("at least one request")
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted reply".to_owned())))
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, path: &str) {
        self.visits.lock().unwrap().push(path.to_owned());
    }
}

/// Everything a store test needs, wired to one [`ApiClient`].
pub struct Harness {
    pub transport: Arc<MockTransport>,
    pub storage: Arc<MemoryStorage>,
    pub navigator: Arc<RecordingNavigator>,
    pub api: ApiClient,
}

impl Harness {
    pub fn new() -> Self {
        let transport = Arc::new(MockTransport::default());
        let storage = Arc::new(MemoryStorage::new());
        let navigator = Arc::new(RecordingNavigator::default());
        let api = ApiClient::new(
            ApiConfig::new(BASE_URL),
            transport.clone(),
            storage.clone(),
            navigator.clone(),
        );
        Self { transport, storage, navigator, api }
    }

    pub fn signed_in() -> Self {
        let harness = Self::new();
        harness.storage.set(ACCESS_TOKEN_KEY, "tok-1");
        harness
    }
}
