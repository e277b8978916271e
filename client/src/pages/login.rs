//! Login page: starts the provider login and finishes its callback.
//!
//! SYSTEM CONTEXT
//! ==============
//! The identity provider redirects back to this page with `code` (token
//! JSON) and `user` (user JSON) query parameters. When both are present the
//! page hands them to the session store and continues to the posts view.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};
use stores::{ApiError, AppRoute, DEFAULT_AUTHENTICATED_ROUTE, LoginCallback};

use crate::net::browser::hard_redirect;
use crate::state::Session;
use crate::util::guard::install_route_guard;

/// Decode the provider callback parameters, if this is a callback visit.
///
/// Returns `None` for a plain visit with neither parameter.
pub fn callback_from_params(code: Option<String>, user: Option<String>) -> Option<Result<LoginCallback, ApiError>> {
    match (code, user) {
        (None, None) => None,
        (Some(code), Some(user)) => Some(LoginCallback::from_query(&code, &user)),
        (None, Some(_)) => Some(Err(ApiError::MissingField("code"))),
        (Some(_), None) => Some(Err(ApiError::MissingField("user"))),
    }
}

#[component]
pub fn LoginPage(route: AppRoute) -> impl IntoView {
    let session = expect_context::<Session>();
    let state = session.state().signal();
    let navigate = use_navigate();
    let query = use_query_map();
    let info = RwSignal::new(String::new());

    install_route_guard(route, session.clone(), navigate.clone());

    let params = query.get_untracked();
    if let Some(callback) = callback_from_params(params.get("code"), params.get("user")) {
        match callback {
            Ok(callback) => {
                info.set("Completing sign-in...".to_owned());
                let session = session.clone();
                leptos::task::spawn_local(async move {
                    match session.complete_login(callback).await {
                        Ok(_) => navigate(
                            DEFAULT_AUTHENTICATED_ROUTE.path(),
                            NavigateOptions { replace: true, ..NavigateOptions::default() },
                        ),
                        Err(e) => info.set(e.display_message("Login failed")),
                    }
                });
            }
            Err(e) => {
                log::warn!("ignoring login callback: {e}");
                info.set(format!("Sign-in callback was invalid: {e}"));
            }
        }
    }

    let on_sign_in = move |_| {
        if state.get_untracked().loading {
            return;
        }
        info.set(String::new());
        let session = session.clone();
        leptos::task::spawn_local(async move {
            match session.login_url().await {
                Ok(url) => hard_redirect(&url),
                Err(e) => info.set(e.display_message("Failed to get login URL")),
            }
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Tasks & Posts"</h1>
                <p class="login-card__subtitle">"Sign in with your Microsoft account"</p>
                <button
                    class="login-button"
                    on:click=on_sign_in
                    disabled=move || state.get().loading
                >
                    {move || if state.get().loading { "Redirecting..." } else { "Sign in with Microsoft" }}
                </button>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
