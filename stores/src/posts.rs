//! Paged post listing.

#[cfg(test)]
#[path = "posts_test.rs"]
mod posts_test;

use std::fmt;

use crate::error::ApiError;
use crate::resource::{ResourceState, ResourceStore, path_segment};
use crate::state::StateCell;
use crate::types::Post;

pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const DEFAULT_SORT_BY: &str = "created_at";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Parse `asc`/`desc`; anything else means the default (newest first).
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("asc") { Self::Asc } else { Self::Desc }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub limit: u32,
    pub sort_by: String,
    pub sort_order: SortOrder,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { page: 1, limit: DEFAULT_PAGE_LIMIT, sort_by: DEFAULT_SORT_BY.to_owned(), sort_order: SortOrder::Desc }
    }
}

impl PageQuery {
    #[must_use]
    pub fn page(page: u32) -> Self {
        Self { page, ..Self::default() }
    }

    /// Clamp to values the backend accepts: page >= 1, limit > 0, and a
    /// non-empty sort column.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let sort_by = self.sort_by.trim();
        Self {
            page: self.page.max(1),
            limit: if self.limit == 0 { DEFAULT_PAGE_LIMIT } else { self.limit },
            sort_by: if sort_by.is_empty() { DEFAULT_SORT_BY.to_owned() } else { sort_by.to_owned() },
            sort_order: self.sort_order,
        }
    }

    #[must_use]
    pub fn path(&self) -> String {
        let q = self.normalized();
        format!("/posts/page/{}/{}/{}/{}", q.page, q.limit, q.sort_by, q.sort_order)
    }
}

impl<C: StateCell<ResourceState<Post>>> ResourceStore<Post, C> {
    /// Load one page of posts, replacing the collection when non-empty.
    ///
    /// # Errors
    ///
    /// Returns the request error; `error` holds its display text.
    pub async fn fetch_page(&self, query: &PageQuery) -> Result<Vec<Post>, ApiError> {
        self.load_listing(Ok(query.path()), "posts", "Failed to fetch posts").await
    }

    /// Load the posts written by one user. The backend wraps this list in a
    /// `post` envelope rather than `posts`.
    ///
    /// # Errors
    ///
    /// Returns the request error; `error` holds its display text.
    pub async fn fetch_by_user(&self, user_id: &str) -> Result<Vec<Post>, ApiError> {
        let path = path_segment(user_id).map(|segment| format!("/posts/user/{segment}"));
        self.load_listing(path, "post", "Failed to fetch user posts").await
    }
}
