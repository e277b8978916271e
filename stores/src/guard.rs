//! Route table and navigation guard.
//!
//! The guard is a pure decision over the target route and the two session
//! signals the app exposes: whether a token is persisted and whether the
//! session store reports an authenticated user. Auth-only routes check the
//! token; the guest-only login route checks the session flag.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteRequirement {
    None,
    RequiresAuth,
    RequiresGuest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppRoute {
    Home,
    Login,
    Tasks,
    Posts,
    NotFound,
}

impl AppRoute {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Tasks => "/tasks",
            Self::Posts => "/posts",
            Self::NotFound => "/404",
        }
    }

    #[must_use]
    pub fn requirement(self) -> RouteRequirement {
        match self {
            Self::Tasks | Self::Posts => RouteRequirement::RequiresAuth,
            Self::Login => RouteRequirement::RequiresGuest,
            Self::Home | Self::NotFound => RouteRequirement::None,
        }
    }

    /// Resolve a location path (query and trailing slash ignored).
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Self::Home,
            "/login" => Self::Login,
            "/tasks" => Self::Tasks,
            "/posts" => Self::Posts,
            _ => Self::NotFound,
        }
    }
}

/// Landing route for an already signed-in visitor of a guest-only page.
pub const DEFAULT_AUTHENTICATED_ROUTE: AppRoute = AppRoute::Posts;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GuardContext {
    pub has_token: bool,
    pub is_authenticated: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(AppRoute),
}

/// Decide whether navigation to `target` proceeds or is redirected.
#[must_use]
pub fn evaluate(target: AppRoute, ctx: GuardContext) -> GuardDecision {
    match target.requirement() {
        RouteRequirement::RequiresAuth if !ctx.has_token => GuardDecision::Redirect(AppRoute::Login),
        RouteRequirement::RequiresGuest if ctx.is_authenticated => {
            GuardDecision::Redirect(DEFAULT_AUTHENTICATED_ROUTE)
        }
        _ => GuardDecision::Proceed,
    }
}
