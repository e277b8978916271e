//! Catch-all page for unknown routes.

use leptos::prelude::*;
use leptos_router::components::A;
use stores::AppRoute;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found-page">
            <h1>"404"</h1>
            <p>"This page does not exist."</p>
            <A href=AppRoute::Home.path()>"Back to start"</A>
        </div>
    }
}
