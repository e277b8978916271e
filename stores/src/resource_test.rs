use super::*;
use crate::state::SharedState;
use crate::storage::PersistedStorage;
use crate::test_support::{BASE_URL, Harness};
use serde_json::json;

fn tasks(h: &Harness) -> TasksStore<SharedState<ResourceState<Task>>> {
    TasksStore::new(h.api.clone(), SharedState::default())
}

fn posts(h: &Harness) -> PostsStore<SharedState<ResourceState<Post>>> {
    PostsStore::new(h.api.clone(), SharedState::default())
}

fn task(id: &str, title: &str) -> Task {
    Task {
        id: id.to_owned(),
        title: title.to_owned(),
        description: String::new(),
        completed: false,
        user_id: "u-1".to_owned(),
        created_at: None,
        updated_at: None,
    }
}

fn task_json(id: &str, title: &str) -> Value {
    serde_json::to_value(task(id, title)).expect("task json")
}

fn draft(title: &str) -> TaskDraft {
    TaskDraft { title: title.to_owned(), ..TaskDraft::default() }
}

fn seed(store: &TasksStore<SharedState<ResourceState<Task>>>, items: Vec<Task>) {
    store.state().update(|s| s.items = items);
}

// =============================================================
// fetch_all
// =============================================================

#[tokio::test]
async fn fetch_all_replaces_collection_in_server_order() {
    let h = Harness::signed_in();
    let store = tasks(&h);
    seed(&store, vec![task("old", "stale")]);
    h.transport.reply(200, json!({"tasks": [task_json("2", "b"), task_json("1", "a")]}));

    let listed = store.fetch_all().await.expect("list");

    assert_eq!(listed, vec![task("2", "b"), task("1", "a")]);
    assert_eq!(store.state().snapshot().items, listed);
    assert_eq!(h.transport.last_request().url, format!("{BASE_URL}/tasks"));
}

#[tokio::test]
async fn fetch_all_empty_result_keeps_existing_collection() {
    let h = Harness::signed_in();
    let store = tasks(&h);
    seed(&store, vec![task("1", "a")]);
    h.transport.reply(200, json!({"tasks": []}));

    let listed = store.fetch_all().await.expect("list");

    assert_eq!(listed, vec![task("1", "a")]);
    assert_eq!(store.state().snapshot().items, vec![task("1", "a")]);
}

#[tokio::test]
async fn fetch_all_null_result_is_treated_as_empty() {
    let h = Harness::signed_in();
    let store = tasks(&h);
    seed(&store, vec![task("1", "a")]);
    h.transport.reply(200, json!({"tasks": null}));

    store.fetch_all().await.expect("list");
    assert_eq!(store.state().snapshot().items.len(), 1);
}

#[tokio::test]
async fn fetch_all_non_array_result_is_ignored() {
    let h = Harness::signed_in();
    let store = tasks(&h);
    seed(&store, vec![task("1", "a")]);
    h.transport.reply(200, json!({"tasks": {"unexpected": true}}));

    let listed = store.fetch_all().await.expect("list");

    assert_eq!(listed, vec![task("1", "a")]);
    let state = store.state().snapshot();
    assert_eq!(state.items, vec![task("1", "a")]);
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn fetch_all_malformed_record_is_a_decode_error() {
    let h = Harness::signed_in();
    let store = tasks(&h);
    seed(&store, vec![task("1", "a")]);
    h.transport.reply(200, json!({"tasks": [{"title": "no id"}]}));

    assert!(matches!(store.fetch_all().await, Err(ApiError::Decode(_))));
    let state = store.state().snapshot();
    assert_eq!(state.items, vec![task("1", "a")]);
    assert_eq!(state.error.as_deref(), Some("Failed to fetch tasks"));
}

#[tokio::test]
async fn fetch_all_failure_records_error_and_keeps_items() {
    let h = Harness::signed_in();
    let store = tasks(&h);
    seed(&store, vec![task("1", "a")]);
    h.transport.reply(500, json!({"error": "database unavailable"}));

    assert!(store.fetch_all().await.is_err());
    let state = store.state().snapshot();
    assert_eq!(state.error.as_deref(), Some("database unavailable"));
    assert!(!state.loading);
    assert_eq!(state.items.len(), 1);
}

#[tokio::test]
async fn fetch_all_uses_default_message_without_server_text() {
    let h = Harness::signed_in();
    let store = tasks(&h);
    h.transport.fail("offline");

    assert!(store.fetch_all().await.is_err());
    assert_eq!(store.state().snapshot().error.as_deref(), Some("Failed to fetch tasks"));
}

#[tokio::test]
async fn fetch_all_clears_previous_error() {
    let h = Harness::signed_in();
    let store = tasks(&h);
    h.transport.fail("offline");
    h.transport.reply(200, json!({"tasks": [task_json("1", "a")]}));

    assert!(store.fetch_all().await.is_err());
    store.fetch_all().await.expect("second attempt");
    assert_eq!(store.state().snapshot().error, None);
}

// =============================================================
// fetch_by_id
// =============================================================

#[tokio::test]
async fn fetch_by_id_fills_current_slot() {
    let h = Harness::signed_in();
    let store = tasks(&h);
    h.transport.reply(200, json!({"task": task_json("7", "seven")}));

    let found = store.fetch_by_id("7").await.expect("task");

    assert_eq!(found, task("7", "seven"));
    assert_eq!(store.state().snapshot().current, Some(found));
    assert_eq!(h.transport.last_request().url, format!("{BASE_URL}/tasks/7"));
}

#[tokio::test]
async fn fetch_by_id_fills_current_slot_for_posts() {
    let h = Harness::signed_in();
    let store = posts(&h);
    h.transport.reply(200, json!({"post": {"post_id": "p-1", "post_text": "hi"}}));

    store.fetch_by_id("p-1").await.expect("post");
    let current = store.state().snapshot().current.expect("current post");
    assert_eq!(current.post_id, "p-1");
}

#[tokio::test]
async fn fetch_by_id_not_found_uses_fallback_message() {
    let h = Harness::signed_in();
    let store = tasks(&h);
    h.transport.reply(404, json!({"status": "Post Not Found"}));

    assert!(store.fetch_by_id("x").await.is_err());
    assert_eq!(store.state().snapshot().error.as_deref(), Some("Failed to fetch task"));
}

// =============================================================
// create
// =============================================================

#[tokio::test]
async fn create_appends_server_record() {
    let h = Harness::signed_in();
    let store = tasks(&h);
    seed(&store, vec![task("1", "a")]);
    h.transport.reply(201, json!({"task": task_json("2", "server title")}));

    let created = store.create(&draft("draft title")).await.expect("created");

    let items = store.state().snapshot().items;
    assert_eq!(items.len(), 2);
    assert_eq!(items.last(), Some(&created));
    assert_eq!(created.title, "server title");

    let req = h.transport.last_request();
    assert_eq!(req.method, Method::Post);
    let sent: Value = serde_json::from_str(req.body.as_deref().expect("body")).expect("json body");
    assert_eq!(sent["title"], "draft title");
}

#[tokio::test]
async fn create_failure_leaves_collection_unchanged() {
    let h = Harness::signed_in();
    let store = tasks(&h);
    h.transport.reply(400, json!({"error": "Key: 'Task.Title' Error"}));

    assert!(store.create(&draft("")).await.is_err());
    let state = store.state().snapshot();
    assert!(state.items.is_empty());
    assert_eq!(state.error.as_deref(), Some("Key: 'Task.Title' Error"));
}

// =============================================================
// update
// =============================================================

#[tokio::test]
async fn update_replaces_only_the_matching_record() {
    let h = Harness::signed_in();
    let store = tasks(&h);
    seed(&store, vec![task("1", "a"), task("2", "b"), task("3", "c")]);
    h.transport.reply(200, json!({"task": task_json("2", "B")}));

    store.update("2", &draft("B")).await.expect("updated");

    assert_eq!(store.state().snapshot().items, vec![task("1", "a"), task("2", "B"), task("3", "c")]);
    let req = h.transport.last_request();
    assert_eq!(req.method, Method::Put);
    assert_eq!(req.url, format!("{BASE_URL}/tasks/2"));
}

#[tokio::test]
async fn update_single_item_example() {
    let h = Harness::signed_in();
    let store = tasks(&h);
    seed(&store, vec![task("1", "a")]);
    h.transport.reply(200, json!({"task": task_json("1", "b")}));

    let updated = store.update("1", &draft("b")).await.expect("updated");

    assert_eq!(updated, task("1", "b"));
    assert_eq!(store.state().snapshot().items, vec![task("1", "b")]);
}

#[tokio::test]
async fn update_without_match_leaves_collection_unchanged() {
    let h = Harness::signed_in();
    let store = tasks(&h);
    seed(&store, vec![task("1", "a")]);
    h.transport.reply(200, json!({"task": task_json("9", "elsewhere")}));

    store.update("9", &draft("elsewhere")).await.expect("updated");
    assert_eq!(store.state().snapshot().items, vec![task("1", "a")]);
}

#[tokio::test]
async fn update_refreshes_current_when_it_matches() {
    let h = Harness::signed_in();
    let store = tasks(&h);
    store.state().update(|s| s.current = Some(task("1", "a")));
    h.transport.reply(200, json!({"task": task_json("1", "b")}));

    store.update("1", &draft("b")).await.expect("updated");
    assert_eq!(store.state().snapshot().current, Some(task("1", "b")));
}

#[tokio::test]
async fn update_matches_posts_by_post_id() {
    let h = Harness::signed_in();
    let store = posts(&h);
    h.transport.reply(200, json!({"posts": [{"post_id": "p-1", "post_text": "a"}, {"post_id": "p-2", "post_text": "b"}]}));
    h.transport.reply(200, json!({"post": {"post_id": "p-2", "post_text": "edited"}}));

    store.fetch_all().await.expect("list");
    store
        .update("p-2", &PostDraft { post_text: "edited".to_owned(), post_image: String::new() })
        .await
        .expect("updated");

    let texts: Vec<String> = store.state().snapshot().items.into_iter().map(|p| p.post_text).collect();
    assert_eq!(texts, vec!["a".to_owned(), "edited".to_owned()]);
}

// =============================================================
// delete
// =============================================================

#[tokio::test]
async fn delete_removes_record_and_clears_current() {
    let h = Harness::signed_in();
    let store = tasks(&h);
    seed(&store, vec![task("1", "a"), task("2", "b")]);
    store.state().update(|s| s.current = Some(task("2", "b")));
    h.transport.reply(200, json!({"message": "Task deleted successfully"}));

    assert!(store.delete("2").await.expect("deleted"));

    let state = store.state().snapshot();
    assert_eq!(state.items, vec![task("1", "a")]);
    assert_eq!(state.current, None);
    assert_eq!(h.transport.last_request().method, Method::Delete);
}

#[tokio::test]
async fn delete_of_unknown_id_keeps_collection() {
    let h = Harness::signed_in();
    let store = tasks(&h);
    seed(&store, vec![task("1", "a")]);
    store.state().update(|s| s.current = Some(task("1", "a")));
    h.transport.reply(200, json!({}));

    store.delete("404").await.expect("deleted");
    let state = store.state().snapshot();
    assert_eq!(state.items.len(), 1);
    assert!(state.current.is_some());
}

#[tokio::test]
async fn delete_failure_keeps_record() {
    let h = Harness::signed_in();
    let store = tasks(&h);
    seed(&store, vec![task("1", "a")]);
    h.transport.reply(404, json!({"error": "task not found"}));

    assert!(store.delete("1").await.is_err());
    let state = store.state().snapshot();
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.error.as_deref(), Some("task not found"));
}

// =============================================================
// 401 from any store
// =============================================================

#[tokio::test]
async fn unauthorized_from_posts_store_clears_token_and_redirects() {
    let h = Harness::signed_in();
    let store = posts(&h);
    h.transport.reply(401, json!({}));

    assert!(matches!(store.fetch_all().await, Err(ApiError::Unauthorized)));
    assert_eq!(h.api.storage().access_token(), None);
    assert_eq!(h.navigator.visits(), vec!["/login".to_owned()]);
    assert!(!store.state().snapshot().loading);
}

// =============================================================
// record ids
// =============================================================

#[tokio::test]
async fn ids_that_leave_the_path_segment_are_rejected_before_sending() {
    let h = Harness::signed_in();
    let store = tasks(&h);

    for id in ["../auth/signout", "1?x=2", "1#frag", "", ".."] {
        assert!(matches!(store.fetch_by_id(id).await, Err(ApiError::InvalidId(_))), "id {id:?}");
    }
    assert!(matches!(store.delete("a/b").await, Err(ApiError::InvalidId(_))));
    assert!(matches!(store.update("a/b", &draft("x")).await, Err(ApiError::InvalidId(_))));

    assert!(h.transport.requests().is_empty());
    let state = store.state().snapshot();
    assert_eq!(state.error.as_deref(), Some("Failed to update task"));
    assert!(!state.loading);
}

#[test]
fn plain_ids_pass_through_unchanged() {
    assert_eq!(path_segment("7").expect("segment"), "7");
    assert_eq!(path_segment("3f2c-uuid").expect("segment"), "3f2c-uuid");
}

// =============================================================
// ResourceState helpers
// =============================================================

#[test]
fn replace_reports_whether_a_record_matched() {
    let mut state = ResourceState::default();
    state.items = vec![task("1", "a")];
    assert!(state.replace("1", task("1", "z")));
    assert!(!state.replace("2", task("2", "y")));
    assert_eq!(state.items, vec![task("1", "z")]);
}
