//! Generic CRUD store, instantiated once for tasks and once for posts.
//!
//! Every action performs exactly one request and applies the server's
//! record (never the submitted draft) to local state. Records are matched by
//! their identity field, which differs per resource (`id` vs `post_id`).

#[cfg(test)]
#[path = "resource_test.rs"]
mod resource_test;

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::{ApiClient, take_field};
use crate::error::ApiError;
use crate::http::Method;
use crate::state::{StateCell, Tracked, track};
use crate::types::{PageInfo, Post, PostDraft, Task, TaskDraft};

/// A record type served under `/{COLLECTION}`.
pub trait Resource: Clone + DeserializeOwned + 'static {
    /// Request body for create and update.
    type Draft: Serialize;

    /// Path segment and plural envelope key, e.g. `tasks`.
    const COLLECTION: &'static str;
    /// Singular envelope key, e.g. `task`.
    const SINGULAR: &'static str;

    fn id(&self) -> &str;
}

impl Resource for Task {
    type Draft = TaskDraft;
    const COLLECTION: &'static str = "tasks";
    const SINGULAR: &'static str = "task";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for Post {
    type Draft = PostDraft;
    const COLLECTION: &'static str = "posts";
    const SINGULAR: &'static str = "post";

    fn id(&self) -> &str {
        &self.post_id
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceState<R> {
    pub items: Vec<R>,
    pub current: Option<R>,
    pub page: Option<PageInfo>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<R> Default for ResourceState<R> {
    fn default() -> Self {
        Self { items: Vec::new(), current: None, page: None, loading: false, error: None }
    }
}

impl<R> Tracked for ResourceState<R> {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }
}

impl<R: Resource> ResourceState<R> {
    /// Replace the record whose identity is `id`. Returns whether one matched.
    pub fn replace(&mut self, id: &str, record: R) -> bool {
        let replaced = match self.items.iter_mut().find(|item| item.id() == id) {
            Some(slot) => {
                *slot = record.clone();
                true
            }
            None => false,
        };
        if self.current.as_ref().is_some_and(|c| c.id() == id) {
            self.current = Some(record);
        }
        replaced
    }

    /// Drop the record whose identity is `id`.
    pub fn remove(&mut self, id: &str) {
        self.items.retain(|item| item.id() != id);
        if self.current.as_ref().is_some_and(|c| c.id() == id) {
            self.current = None;
        }
    }
}

/// `id` as one URL path segment. Ids that would escape the segment are
/// rejected rather than sent.
pub(crate) fn path_segment(id: &str) -> Result<&str, ApiError> {
    if id.is_empty() || id == "." || id == ".." || id.contains(['/', '?', '#', '\\']) {
        return Err(ApiError::InvalidId(id.to_owned()));
    }
    Ok(id)
}

pub type TasksStore<C> = ResourceStore<Task, C>;
pub type PostsStore<C> = ResourceStore<Post, C>;

pub struct ResourceStore<R, C> {
    api: ApiClient,
    state: C,
    _resource: PhantomData<fn() -> R>,
}

impl<R, C: Clone> Clone for ResourceStore<R, C> {
    fn clone(&self) -> Self {
        Self { api: self.api.clone(), state: self.state.clone(), _resource: PhantomData }
    }
}

impl<R: Resource, C: StateCell<ResourceState<R>>> ResourceStore<R, C> {
    pub fn new(api: ApiClient, state: C) -> Self {
        Self { api, state, _resource: PhantomData }
    }

    pub fn state(&self) -> &C {
        &self.state
    }

    fn collection_path() -> String {
        format!("/{}", R::COLLECTION)
    }

    fn record_path(id: &str) -> Result<String, ApiError> {
        Ok(format!("/{}/{}", R::COLLECTION, path_segment(id)?))
    }

    /// Load the whole collection.
    ///
    /// An empty (or null) result leaves the current collection in place.
    ///
    /// # Errors
    ///
    /// Returns the request error; `error` holds its display text.
    pub async fn fetch_all(&self) -> Result<Vec<R>, ApiError> {
        let fallback = format!("Failed to fetch {}", R::COLLECTION);
        self.load_listing(Ok(Self::collection_path()), R::COLLECTION, &fallback).await
    }

    /// GET `path` and take the list under `key`. Only a non-empty array
    /// replaces the collection; a missing, null, or non-array value is
    /// ignored.
    pub(crate) async fn load_listing(
        &self,
        path: Result<String, ApiError>,
        key: &str,
        fallback: &str,
    ) -> Result<Vec<R>, ApiError> {
        track(&self.state, fallback, async {
            let mut body: Value = self.api.request_json(Method::Get, &path?, None).await?;
            let page = PageInfo::from_listing(&body);
            let items: Vec<R> = match body.get_mut(key).map(Value::take) {
                Some(list @ Value::Array(_)) => serde_json::from_value(list)?,
                _ => Vec::new(),
            };
            log::debug!("{} {} listed", items.len(), R::COLLECTION);
            self.state.update(|s| {
                if !items.is_empty() {
                    s.items = items;
                }
                if page.is_some() {
                    s.page = page;
                }
            });
            Ok(self.state.with(|s| s.items.clone()))
        })
        .await
    }

    /// Load one record into the `current` slot.
    ///
    /// # Errors
    ///
    /// Returns the request error; `error` holds its display text.
    pub async fn fetch_by_id(&self, id: &str) -> Result<R, ApiError> {
        let fallback = format!("Failed to fetch {}", R::SINGULAR);
        track(&self.state, &fallback, async {
            let body: Value = self.api.request_json(Method::Get, &Self::record_path(id)?, None).await?;
            let record: R = take_field(body, R::SINGULAR)?;
            self.state.update(|s| s.current = Some(record.clone()));
            Ok(record)
        })
        .await
    }

    /// Create a record and append the server's copy.
    ///
    /// # Errors
    ///
    /// Returns the request error; `error` holds its display text.
    pub async fn create(&self, draft: &R::Draft) -> Result<R, ApiError> {
        let fallback = format!("Failed to create {}", R::SINGULAR);
        track(&self.state, &fallback, async {
            let payload = serde_json::to_value(draft)?;
            let body: Value = self
                .api
                .request_json(Method::Post, &Self::collection_path(), Some(payload))
                .await?;
            let record: R = take_field(body, R::SINGULAR)?;
            self.state.update(|s| s.items.push(record.clone()));
            Ok(record)
        })
        .await
    }

    /// Update a record and swap in the server's copy.
    ///
    /// # Errors
    ///
    /// Returns the request error; `error` holds its display text.
    pub async fn update(&self, id: &str, draft: &R::Draft) -> Result<R, ApiError> {
        let fallback = format!("Failed to update {}", R::SINGULAR);
        track(&self.state, &fallback, async {
            let payload = serde_json::to_value(draft)?;
            let body: Value = self
                .api
                .request_json(Method::Put, &Self::record_path(id)?, Some(payload))
                .await?;
            let record: R = take_field(body, R::SINGULAR)?;
            self.state.update(|s| {
                s.replace(id, record.clone());
            });
            Ok(record)
        })
        .await
    }

    /// Delete a record and drop it locally.
    ///
    /// # Errors
    ///
    /// Returns the request error; `error` holds its display text.
    pub async fn delete(&self, id: &str) -> Result<bool, ApiError> {
        let fallback = format!("Failed to delete {}", R::SINGULAR);
        track(&self.state, &fallback, async {
            self.api.request(Method::Delete, &Self::record_path(id)?, None).await?;
            self.state.update(|s| s.remove(id));
            Ok(true)
        })
        .await
    }
}
