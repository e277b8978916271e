//! Tasks page: list, create, toggle, and delete the user's tasks.

#[cfg(test)]
#[path = "tasks_test.rs"]
mod tasks_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use stores::{AppRoute, Task, TaskDraft};

use crate::state::{Session, Tasks};
use crate::util::guard::{install_route_guard, session_may_load};

/// Build a create draft from the form inputs; `None` when the title is blank.
pub fn draft_from_input(title: &str, description: &str) -> Option<TaskDraft> {
    let title = title.trim();
    if title.is_empty() {
        return None;
    }
    Some(TaskDraft { title: title.to_owned(), description: description.trim().to_owned(), completed: false })
}

/// Update draft that flips `completed` and keeps the other fields.
pub fn toggled(task: &Task) -> TaskDraft {
    TaskDraft { title: task.title.clone(), description: task.description.clone(), completed: !task.completed }
}

#[component]
pub fn TasksPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let tasks = expect_context::<Tasks>();
    let state = tasks.state().signal();
    let allowed = session_may_load(AppRoute::Tasks, &session);
    install_route_guard(AppRoute::Tasks, session, use_navigate());

    if allowed {
        let tasks = tasks.clone();
        leptos::task::spawn_local(async move {
            if let Err(e) = tasks.fetch_all().await {
                log::warn!("task list failed: {e}");
            }
        });
    }

    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());

    let on_create = {
        let tasks = tasks.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let Some(draft) = draft_from_input(&title.get_untracked(), &description.get_untracked()) else {
                return;
            };
            let tasks = tasks.clone();
            leptos::task::spawn_local(async move {
                if tasks.create(&draft).await.is_ok() {
                    title.set(String::new());
                    description.set(String::new());
                }
            });
        }
    };

    let on_toggle = {
        let tasks = tasks.clone();
        Callback::new(move |task: Task| {
            let tasks = tasks.clone();
            leptos::task::spawn_local(async move {
                let _ = tasks.update(&task.id, &toggled(&task)).await;
            });
        })
    };

    let on_delete = Callback::new(move |id: String| {
        let tasks = tasks.clone();
        leptos::task::spawn_local(async move {
            let _ = tasks.delete(&id).await;
        });
    });

    view! {
        <div class="tasks-page">
            <h1>"Tasks"</h1>
            <form class="task-form" on:submit=on_create>
                <input
                    class="task-form__title"
                    type="text"
                    placeholder="Title"
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
                <input
                    class="task-form__description"
                    type="text"
                    placeholder="Description"
                    prop:value=move || description.get()
                    on:input=move |ev| description.set(event_target_value(&ev))
                />
                <button class="btn" type="submit" disabled=move || state.get().loading>
                    "Add Task"
                </button>
            </form>
            <Show when=move || state.get().error.is_some()>
                <p class="tasks-page__error">{move || state.get().error.unwrap_or_default()}</p>
            </Show>
            <Show when=move || state.get().loading>
                <p>"Loading tasks..."</p>
            </Show>
            <ul class="task-list">
                {move || {
                    state
                        .get()
                        .items
                        .into_iter()
                        .map(|task| {
                            let id = task.id.clone();
                            let done = task.completed;
                            let title = task.title.clone();
                            let description = task.description.clone();
                            view! {
                                <li class={if done { "task-list__item task-list__item--done" } else { "task-list__item" }}>
                                    <input
                                        type="checkbox"
                                        prop:checked=done
                                        on:change=move |_| on_toggle.run(task.clone())
                                    />
                                    <span class="task-list__title">{title}</span>
                                    <span class="task-list__description">{description}</span>
                                    <button class="btn" on:click=move |_| on_delete.run(id.clone())>
                                        "Delete"
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
        </div>
    }
}
