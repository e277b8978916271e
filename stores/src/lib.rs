//! # stores
//!
//! Platform-neutral client core for the tasks & posts backend.
//!
//! This crate owns the wire types, the HTTP adapter (bearer injection and
//! global 401 handling), the session store, the generic resource store used
//! for tasks and posts, and the router guard decision. It has no browser or
//! runtime dependency: the `client` crate plugs in `gloo-net`/`localStorage`
//! adapters and `cli` plugs in `reqwest` and a state file.

pub mod api;
pub mod config;
pub mod error;
pub mod guard;
pub mod http;
pub mod posts;
pub mod resource;
pub mod session;
pub mod state;
pub mod storage;
pub mod types;

#[cfg(test)]
mod test_support;

pub use api::{ApiClient, Navigator};
pub use config::ApiConfig;
pub use error::ApiError;
pub use guard::{AppRoute, DEFAULT_AUTHENTICATED_ROUTE, GuardContext, GuardDecision, RouteRequirement};
pub use http::{HttpRequest, HttpResponse, Method, Transport};
pub use posts::{PageQuery, SortOrder};
pub use resource::{PostsStore, Resource, ResourceState, ResourceStore, TasksStore};
pub use session::{SessionPhase, SessionState, SessionStore};
pub use state::{SharedState, StateCell};
pub use storage::{MemoryStorage, PersistedStorage};
pub use types::{LoginCallback, PageInfo, Post, PostDraft, Task, TaskDraft, TokenDetails, User};
