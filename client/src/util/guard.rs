//! Route guard wiring for pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every routed page installs the same guard so direct loads, in-app links,
//! and session changes all pass through `stores::guard::evaluate`.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use stores::{AppRoute, GuardContext, GuardDecision, SessionState};

use crate::state::Session;

/// Guard inputs from the current session state and token presence.
pub fn guard_context(state: &SessionState, has_token: bool) -> GuardContext {
    GuardContext { has_token, is_authenticated: state.is_authenticated() }
}

/// Where to send the user instead of `route`, if anywhere.
pub fn redirect_target(route: AppRoute, state: &SessionState, has_token: bool) -> Option<&'static str> {
    match stores::guard::evaluate(route, guard_context(state, has_token)) {
        GuardDecision::Proceed => None,
        GuardDecision::Redirect(to) => Some(to.path()),
    }
}

/// Whether a page for `route` may load its data now. False while the guard
/// is about to send the visitor elsewhere.
pub fn may_load(route: AppRoute, state: &SessionState, has_token: bool) -> bool {
    redirect_target(route, state, has_token).is_none()
}

/// [`may_load`] against the live session, without subscribing to it.
pub fn session_may_load(route: AppRoute, session: &Session) -> bool {
    let state = session.state().signal().get_untracked();
    may_load(route, &state, session.has_token())
}

/// Re-evaluate the guard for `route` whenever the session changes.
pub fn install_route_guard<F>(route: AppRoute, session: Session, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let state = session.state().signal();
    Effect::new(move || {
        let current = state.get();
        if let Some(to) = redirect_target(route, &current, session.has_token()) {
            log::debug!("guard: {} -> {to}", route.path());
            navigate(to, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
