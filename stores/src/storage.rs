//! Durable key-value storage for the access token and minimal user fields.
//!
//! Writes are best-effort, matching browser `localStorage`: a failed write is
//! logged by the implementation and otherwise ignored.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const USER_ID_KEY: &str = "user_id";
pub const USER_NAME_KEY: &str = "user_name";

/// Every key written by a login, in the order they are persisted.
pub const SESSION_KEYS: [&str; 3] = [ACCESS_TOKEN_KEY, USER_ID_KEY, USER_NAME_KEY];

pub trait PersistedStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);

    /// Current access token, ignoring blank values.
    fn access_token(&self) -> Option<String> {
        self.get(ACCESS_TOKEN_KEY).filter(|token| !token.trim().is_empty())
    }
}

/// In-process storage, used where nothing must outlive the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PersistedStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries().remove(key);
    }
}
