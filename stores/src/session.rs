//! Session store: who is signed in and how far the login has progressed.
//!
//! DESIGN
//! ======
//! A login moves `Anonymous -> Pending -> Authenticated`. `Pending` means the
//! callback token is persisted but `/auth/me` has not yet confirmed it; only
//! a successful identity fetch makes the session `Authenticated`. Reloading
//! the page with a persisted token restores a `Pending` session straight
//! away so auth-only routes open immediately, then confirms in the
//! background.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::state::{StateCell, Tracked, track};
use crate::storage::{ACCESS_TOKEN_KEY, SESSION_KEYS, USER_ID_KEY, USER_NAME_KEY};
use crate::types::{LoginCallback, User};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    Anonymous,
    /// Waiting for the identity provider login URL.
    Authenticating,
    /// Token persisted, identity not yet confirmed by the server.
    Pending,
    Authenticated,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<User>,
    pub phase: SessionPhase,
    pub loading: bool,
    pub error: Option<String>,
}

impl SessionState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.phase == SessionPhase::Authenticated
    }

    fn reset(&mut self) {
        self.user = None;
        self.phase = SessionPhase::Anonymous;
    }
}

impl Tracked for SessionState {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }
}

#[derive(Clone)]
pub struct SessionStore<C> {
    api: ApiClient,
    state: C,
}

impl<C: StateCell<SessionState>> SessionStore<C> {
    pub fn new(api: ApiClient, state: C) -> Self {
        Self { api, state }
    }

    pub fn state(&self) -> &C {
        &self.state
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.with(SessionState::is_authenticated)
    }

    #[must_use]
    pub fn has_token(&self) -> bool {
        self.api.storage().access_token().is_some()
    }

    /// Ask the backend where to send the browser for the provider login.
    ///
    /// # Errors
    ///
    /// Returns the request error; the store's `error` holds its display text.
    pub async fn login_url(&self) -> Result<String, ApiError> {
        let previous = self.state.with(|s| s.phase);
        self.state.update(|s| s.phase = SessionPhase::Authenticating);
        let result = track(&self.state, "Failed to get login URL", self.api.login_url()).await;
        self.state.update(|s| s.phase = previous);
        result
    }

    /// Finish a provider login: persist the token, then confirm the identity.
    ///
    /// # Errors
    ///
    /// Returns the confirmation error. The persisted keys are removed again
    /// and the session falls back to `Anonymous`.
    pub async fn complete_login(&self, callback: LoginCallback) -> Result<User, ApiError> {
        track(&self.state, "Login failed", async {
            let LoginCallback { token, user } = callback;
            self.persist(&token.access_token, &user);
            self.state.update(|s| {
                s.phase = SessionPhase::Pending;
                s.user = Some(user);
            });

            match self.api.current_user().await {
                Ok(confirmed) => {
                    log::info!("signed in as {}", confirmed.id);
                    self.state.update(|s| {
                        s.phase = SessionPhase::Authenticated;
                        s.user = Some(confirmed.clone());
                    });
                    Ok(confirmed)
                }
                Err(err) => {
                    self.clear_persisted();
                    self.state.update(SessionState::reset);
                    Err(err)
                }
            }
        })
        .await
    }

    /// Fetch the signed-in user without touching session state.
    ///
    /// # Errors
    ///
    /// Returns the request error after logging it.
    pub async fn fetch_current_user(&self) -> Result<User, ApiError> {
        self.api.current_user().await.inspect_err(|err| {
            log::warn!("failed to fetch current user (token present: {}): {err}", self.has_token());
        })
    }

    /// Rehydrate a `Pending` session from persisted storage.
    ///
    /// Returns `false` (and leaves the session anonymous) when no token is
    /// persisted.
    pub fn restore(&self) -> bool {
        let storage = self.api.storage();
        if storage.access_token().is_none() {
            return false;
        }
        let user = storage.get(USER_ID_KEY).map(|id| User {
            id,
            name: storage.get(USER_NAME_KEY).unwrap_or_default(),
            email: String::new(),
        });
        self.state.update(|s| {
            if s.phase != SessionPhase::Authenticated {
                s.phase = SessionPhase::Pending;
                s.user = user;
            }
        });
        true
    }

    /// Restore a persisted session and confirm it against `/auth/me`.
    ///
    /// Returns `Ok(None)` when there is no persisted token.
    ///
    /// # Errors
    ///
    /// Returns the confirmation error. On 401 the session is reset; any other
    /// failure keeps the `Pending` session and records the error text.
    pub async fn check_session(&self) -> Result<Option<User>, ApiError> {
        if !self.restore() {
            return Ok(None);
        }
        match self.fetch_current_user().await {
            Ok(user) => {
                self.state.update(|s| {
                    s.phase = SessionPhase::Authenticated;
                    s.user = Some(user.clone());
                    s.error = None;
                });
                Ok(Some(user))
            }
            Err(err) => {
                self.state.update(|s| {
                    if matches!(err, ApiError::Unauthorized) {
                        s.reset();
                    }
                    s.error = Some(err.display_message("Failed to fetch current user"));
                });
                Err(err)
            }
        }
    }

    /// Sign out on the server, then forget the local session.
    ///
    /// # Errors
    ///
    /// Returns the request error; the persisted token is left in place.
    pub async fn logout(&self) -> Result<(), ApiError> {
        track(&self.state, "Logout failed", async {
            self.api.sign_out().await?;
            self.state.update(SessionState::reset);
            self.clear_persisted();
            Ok(())
        })
        .await
    }

    fn persist(&self, token: &str, user: &User) {
        let storage = self.api.storage();
        storage.set(ACCESS_TOKEN_KEY, token);
        storage.set(USER_ID_KEY, &user.id);
        storage.set(USER_NAME_KEY, &user.name);
    }

    fn clear_persisted(&self) {
        let storage = self.api.storage();
        for key in SESSION_KEYS {
            storage.remove(key);
        }
    }
}
