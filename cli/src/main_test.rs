use super::*;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("tasks-cli").chain(args.iter().copied())).expect("valid args")
}

#[test]
fn defaults_point_at_local_backend() {
    let cli = parse(&["tasks", "list"]);
    assert!(cli.base_url.starts_with("http"));
    assert!(matches!(cli.command, Command::Tasks(TasksCommand { command: TasksSubcommand::List })));
}

#[test]
fn task_fields_become_draft() {
    let cli = parse(&["tasks", "update", "t-1", "--title", "Ship", "--completed"]);
    let Command::Tasks(TasksCommand { command: TasksSubcommand::Update { id, fields } }) = cli.command else {
        panic!("expected tasks update");
    };
    assert_eq!(id, "t-1");
    let draft = TaskDraft::from(fields);
    assert_eq!(draft.title, "Ship");
    assert!(draft.description.is_empty());
    assert!(draft.completed);
}

#[test]
fn page_args_build_query() {
    let cli = parse(&["posts", "page", "--page", "3", "--sort-order", "asc"]);
    let Command::Posts(PostsCommand { command: PostsSubcommand::Page(args) }) = cli.command else {
        panic!("expected posts page");
    };
    let query = PageQuery::from(args);
    assert_eq!(query.path(), "/posts/page/3/10/created_at/asc");
}

#[test]
fn login_requires_both_callback_values() {
    let result = Cli::try_parse_from(["tasks-cli", "login", "--code", "{}"]);
    assert!(result.is_err());
}

#[test]
fn post_fields_become_draft() {
    let cli = parse(&["posts", "create", "--text", "hello"]);
    let Command::Posts(PostsCommand { command: PostsSubcommand::Create(fields) }) = cli.command else {
        panic!("expected posts create");
    };
    let draft = PostDraft::from(fields);
    assert_eq!(draft.post_text, "hello");
    assert!(draft.post_image.is_empty());
}

#[test]
fn posts_user_takes_the_user_id() {
    let cli = parse(&["posts", "user", "u-7"]);
    let Command::Posts(PostsCommand { command: PostsSubcommand::User { user_id } }) = cli.command else {
        panic!("expected posts user");
    };
    assert_eq!(user_id, "u-7");
}
