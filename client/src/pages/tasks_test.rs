use super::*;

#[test]
fn draft_from_input_trims_fields() {
    let draft = draft_from_input("  Write report ", " by friday ").expect("draft");
    assert_eq!(draft.title, "Write report");
    assert_eq!(draft.description, "by friday");
    assert!(!draft.completed);
}

#[test]
fn draft_from_input_rejects_blank_title() {
    assert_eq!(draft_from_input("   ", "details"), None);
}

#[test]
fn toggled_flips_completion_only() {
    let task = Task {
        id: "t-1".to_owned(),
        title: "Ship".to_owned(),
        description: "v1".to_owned(),
        completed: false,
        user_id: "u-1".to_owned(),
        created_at: None,
        updated_at: None,
    };
    let draft = toggled(&task);
    assert!(draft.completed);
    assert_eq!(draft.title, "Ship");
    assert_eq!(draft.description, "v1");
}
