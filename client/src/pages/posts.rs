//! Posts page: paged listing, create, and delete.
//!
//! SYSTEM CONTEXT
//! ==============
//! Listing goes through `fetch_page`, newest first. The pager reads the
//! page metadata the server returns next to the list.

#[cfg(test)]
#[path = "posts_test.rs"]
mod posts_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use stores::{AppRoute, PageInfo, PageQuery, PostDraft};

use crate::state::{Posts, Session};
use crate::util::guard::{install_route_guard, session_may_load};

/// Page after `current`, if the server reported one.
pub fn next_page(info: Option<PageInfo>, current: u32) -> Option<u32> {
    let info = info?;
    (u64::from(current) < info.total_pages).then(|| current + 1)
}

/// Page before `current`, if any.
pub fn prev_page(current: u32) -> Option<u32> {
    (current > 1).then(|| current - 1)
}

/// Build a create draft; `None` when the text is blank.
pub fn draft_from_input(text: &str, image: &str) -> Option<PostDraft> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some(PostDraft { post_text: text.to_owned(), post_image: image.trim().to_owned() })
}

#[component]
pub fn PostsPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let posts = expect_context::<Posts>();
    let state = posts.state().signal();
    install_route_guard(AppRoute::Posts, session.clone(), use_navigate());

    let page = RwSignal::new(1_u32);
    {
        let posts = posts.clone();
        Effect::new(move || {
            let query = PageQuery::page(page.get());
            if !session_may_load(AppRoute::Posts, &session) {
                return;
            }
            let posts = posts.clone();
            leptos::task::spawn_local(async move {
                if let Err(e) = posts.fetch_page(&query).await {
                    log::warn!("post page {} failed: {e}", query.page);
                }
            });
        });
    }

    let text = RwSignal::new(String::new());
    let image = RwSignal::new(String::new());

    let on_create = {
        let posts = posts.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let Some(draft) = draft_from_input(&text.get_untracked(), &image.get_untracked()) else {
                return;
            };
            let posts = posts.clone();
            leptos::task::spawn_local(async move {
                if posts.create(&draft).await.is_ok() {
                    text.set(String::new());
                    image.set(String::new());
                }
            });
        }
    };

    let on_delete = Callback::new(move |id: String| {
        let posts = posts.clone();
        leptos::task::spawn_local(async move {
            let _ = posts.delete(&id).await;
        });
    });

    let prev = move || prev_page(page.get());
    let next = move || next_page(state.get().page, page.get());

    view! {
        <div class="posts-page">
            <h1>"Posts"</h1>
            <form class="post-form" on:submit=on_create>
                <textarea
                    class="post-form__text"
                    placeholder="What's on your mind?"
                    prop:value=move || text.get()
                    on:input=move |ev| text.set(event_target_value(&ev))
                ></textarea>
                <input
                    class="post-form__image"
                    type="url"
                    placeholder="Image URL (optional)"
                    prop:value=move || image.get()
                    on:input=move |ev| image.set(event_target_value(&ev))
                />
                <button class="btn" type="submit" disabled=move || state.get().loading>
                    "Post"
                </button>
            </form>
            <Show when=move || state.get().error.is_some()>
                <p class="posts-page__error">{move || state.get().error.unwrap_or_default()}</p>
            </Show>
            <Show when=move || state.get().loading>
                <p>"Loading posts..."</p>
            </Show>
            <ul class="post-list">
                {move || {
                    state
                        .get()
                        .items
                        .into_iter()
                        .map(|post| {
                            let id = post.post_id.clone();
                            let image_url = post.post_image.clone();
                            let has_image = !image_url.is_empty();
                            view! {
                                <li class="post-list__item">
                                    <p class="post-list__text">{post.post_text}</p>
                                    <Show when=move || has_image>
                                        <img class="post-list__image" src=image_url.clone()/>
                                    </Show>
                                    <span class="post-list__likes">{post.likes} " likes"</span>
                                    <button class="btn" on:click=move |_| on_delete.run(id.clone())>
                                        "Delete"
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
            <div class="pager">
                <button
                    class="btn"
                    disabled=move || prev().is_none()
                    on:click=move |_| {
                        if let Some(p) = prev() {
                            page.set(p);
                        }
                    }
                >
                    "Newer"
                </button>
                <span class="pager__label">
                    {move || match state.get().page {
                        Some(info) => format!("Page {} of {}", info.current_page, info.total_pages.max(1)),
                        None => format!("Page {}", page.get()),
                    }}
                </span>
                <button
                    class="btn"
                    disabled=move || next().is_none()
                    on:click=move |_| {
                        if let Some(p) = next() {
                            page.set(p);
                        }
                    }
                >
                    "Older"
                </button>
            </div>
        </div>
    }
}
