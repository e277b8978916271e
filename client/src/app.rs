//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};
use stores::{ApiClient, ApiConfig, AppRoute, ResourceState, SessionState};

use crate::components::nav_bar::NavBar;
use crate::net::browser::{BrowserNavigator, BrowserStorage, BrowserTransport};
use crate::pages::{login::LoginPage, not_found::NotFoundPage, posts::PostsPage, tasks::TasksPage};
use crate::state::{Posts, Reactive, Session, Tasks};

/// Build the API client and the three stores for this page load.
pub fn build_stores(config: ApiConfig) -> (Session, Tasks, Posts) {
    let api = ApiClient::new(
        config,
        Arc::new(BrowserTransport),
        Arc::new(BrowserStorage),
        Arc::new(BrowserNavigator),
    );
    let session = Session::new(api.clone(), Reactive::new(SessionState::default()));
    let tasks = Tasks::new(api.clone(), Reactive::new(ResourceState::default()));
    let posts = Posts::new(api, Reactive::new(ResourceState::default()));
    (session, tasks, posts)
}

/// Root application component.
///
/// Owns the store containers, restores any persisted session, and sets up
/// client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let (session, tasks, posts) = build_stores(ApiConfig::from_build_env());

    // Auth-only routes open on token presence; confirmation runs behind them.
    if session.restore() {
        let background = session.clone();
        leptos::task::spawn_local(async move {
            if let Err(e) = background.check_session().await {
                log::warn!("session check failed: {e}");
            }
        });
    }

    provide_context(session);
    provide_context(tasks);
    provide_context(posts);

    view! {
        <Title text="Tasks & Posts"/>

        <Router>
            <NavBar/>
            <main>
                <Routes fallback=|| view! { <NotFoundPage/> }>
                    <Route path=StaticSegment("") view=|| view! { <LoginPage route=AppRoute::Home/> }/>
                    <Route path=StaticSegment("login") view=|| view! { <LoginPage route=AppRoute::Login/> }/>
                    <Route path=StaticSegment("tasks") view=TasksPage/>
                    <Route path=StaticSegment("posts") view=PostsPage/>
                </Routes>
            </main>
        </Router>
    }
}
