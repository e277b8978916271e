//! Wire types exchanged with the backend.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// The signed-in user as returned by `/auth/me` and the login callback.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Token material handed back by the identity provider callback.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDetails {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: i64,
}

/// Typed login callback: the provider redirects back with two JSON-encoded
/// query parameters, `code` (token details) and `user`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginCallback {
    pub token: TokenDetails,
    pub user: User,
}

impl LoginCallback {
    /// Parse the raw `code` and `user` query values.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MalformedPayload`] if either value is not the
    /// expected JSON object or the access token is blank.
    pub fn from_query(code: &str, user: &str) -> Result<Self, ApiError> {
        let token: TokenDetails = serde_json::from_str(code)
            .map_err(|e| ApiError::MalformedPayload { what: "code", reason: e.to_string() })?;
        if token.access_token.trim().is_empty() {
            return Err(ApiError::MalformedPayload { what: "code", reason: "empty access_token".to_owned() });
        }
        let user: User = serde_json::from_str(user)
            .map_err(|e| ApiError::MalformedPayload { what: "user", reason: e.to_string() })?;
        if user.id.trim().is_empty() {
            return Err(ApiError::MalformedPayload { what: "user", reason: "empty id".to_owned() });
        }
        Ok(Self { token, user })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body for `POST /tasks` and `PUT /tasks/{id}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

/// A social media post; identified by `post_id`, not `id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub post_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub post_text: String,
    #[serde(default)]
    pub post_image: String,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub is_liked: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body for `POST /posts` and `PUT /posts/{id}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub post_text: String,
    #[serde(default)]
    pub post_image: String,
}

/// Pagination metadata carried next to paged list payloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub total_count: u64,
    pub current_page: u32,
    pub total_pages: u64,
}

impl PageInfo {
    /// Extract page metadata from a list envelope, if the server sent any.
    #[must_use]
    pub fn from_listing(body: &Value) -> Option<Self> {
        body.get("total_count")?;
        serde_json::from_value(body.clone()).ok()
    }
}
