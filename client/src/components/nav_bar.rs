//! Top navigation with session-aware links and logout.

use leptos::prelude::*;
use leptos_router::components::A;
use stores::AppRoute;

use crate::net::browser::hard_redirect;
use crate::state::Session;

#[component]
pub fn NavBar() -> impl IntoView {
    let session = expect_context::<Session>();
    let state = session.state().signal();

    let signed_in = move || state.get().is_authenticated();
    let user_name = move || state.get().user.map(|u| u.name).unwrap_or_default();

    let on_logout = {
        let session = session.clone();
        move |_| {
            let session = session.clone();
            leptos::task::spawn_local(async move {
                match session.logout().await {
                    Ok(()) => hard_redirect(AppRoute::Login.path()),
                    Err(e) => log::warn!("logout failed: {e}"),
                }
            });
        }
    };

    view! {
        <nav class="nav-bar">
            <A href=AppRoute::Posts.path()>"Posts"</A>
            <A href=AppRoute::Tasks.path()>"Tasks"</A>
            <span class="nav-bar__spacer"></span>
            <Show
                when=signed_in
                fallback=|| view! { <A href=AppRoute::Login.path()>"Sign in"</A> }
            >
                <span class="nav-bar__user">{user_name}</span>
                <button class="btn nav-bar__logout" on:click=on_logout.clone()>
                    "Logout"
                </button>
            </Show>
            <Show when=move || state.get().error.is_some()>
                <p class="nav-bar__error">{move || state.get().error.unwrap_or_default()}</p>
            </Show>
        </nav>
    }
}
