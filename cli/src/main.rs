mod file_storage;
mod transport;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use stores::{
    ApiClient, ApiConfig, ApiError, LoginCallback, PageQuery, PostDraft, PostsStore, ResourceState, SessionState,
    SessionStore, SharedState, SortOrder, StateCell, TaskDraft, TasksStore,
};
use tracing_subscriber::EnvFilter;

use crate::file_storage::FileStorage;
use crate::transport::{ReqwestTransport, TerminalNavigator};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot read state file {path}: {source}")]
    StateFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("not signed in; run `tasks-cli login-url` first")]
    NotSignedIn,
}

#[derive(Parser, Debug)]
#[command(name = "tasks-cli", about = "Tasks & posts API client for the terminal")]
struct Cli {
    #[arg(long, env = "API_URL", default_value = stores::config::DEFAULT_API_URL)]
    base_url: String,

    /// JSON file holding the persisted access token and user fields.
    #[arg(long, env = "TASKS_CLI_STATE", default_value = ".tasks-cli.json")]
    state_file: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the identity provider login URL.
    LoginUrl,
    /// Finish a login with the `code` and `user` values from the callback URL.
    Login {
        #[arg(long)]
        code: String,
        #[arg(long)]
        user: String,
    },
    /// Confirm the persisted session and print the signed-in user.
    Me,
    Logout,
    Tasks(TasksCommand),
    Posts(PostsCommand),
}

#[derive(Args, Debug)]
struct TasksCommand {
    #[command(subcommand)]
    command: TasksSubcommand,
}

#[derive(Subcommand, Debug)]
enum TasksSubcommand {
    List,
    Get {
        id: String,
    },
    Create(TaskFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: TaskFields,
    },
    Delete {
        id: String,
    },
}

#[derive(Args, Debug)]
struct TaskFields {
    #[arg(long)]
    title: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long, default_value_t = false)]
    completed: bool,
}

impl From<TaskFields> for TaskDraft {
    fn from(fields: TaskFields) -> Self {
        Self { title: fields.title, description: fields.description, completed: fields.completed }
    }
}

#[derive(Args, Debug)]
struct PostsCommand {
    #[command(subcommand)]
    command: PostsSubcommand,
}

#[derive(Subcommand, Debug)]
enum PostsSubcommand {
    List,
    Page(PageArgs),
    /// List the posts written by one user.
    User {
        user_id: String,
    },
    Get {
        id: String,
    },
    Create(PostFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: PostFields,
    },
    Delete {
        id: String,
    },
}

#[derive(Args, Debug)]
struct PageArgs {
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long, default_value_t = stores::posts::DEFAULT_PAGE_LIMIT)]
    limit: u32,
    #[arg(long, default_value = stores::posts::DEFAULT_SORT_BY)]
    sort_by: String,
    #[arg(long, default_value = "desc")]
    sort_order: String,
}

impl From<PageArgs> for PageQuery {
    fn from(args: PageArgs) -> Self {
        Self { page: args.page, limit: args.limit, sort_by: args.sort_by, sort_order: SortOrder::parse(&args.sort_order) }
    }
}

#[derive(Args, Debug)]
struct PostFields {
    #[arg(long)]
    text: String,
    #[arg(long, default_value = "")]
    image: String,
}

impl From<PostFields> for PostDraft {
    fn from(fields: PostFields) -> Self {
        Self { post_text: fields.text, post_image: fields.image }
    }
}

/// The three stores over one API client, as the browser app builds them.
struct Stores {
    session: SessionStore<SharedState<SessionState>>,
    tasks: TasksStore<SharedState<ResourceState<stores::Task>>>,
    posts: PostsStore<SharedState<ResourceState<stores::Post>>>,
}

impl Stores {
    fn new(api: ApiClient) -> Self {
        Self {
            session: SessionStore::new(api.clone(), SharedState::default()),
            tasks: TasksStore::new(api.clone(), SharedState::default()),
            posts: PostsStore::new(api, SharedState::default()),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let storage = FileStorage::open(&cli.state_file)?;
    tracing::debug!(state_file = %storage.path().display(), base_url = %cli.base_url, "starting");

    let api = ApiClient::new(
        ApiConfig::new(cli.base_url),
        Arc::new(ReqwestTransport::default()),
        Arc::new(storage),
        Arc::new(TerminalNavigator),
    );
    run(&Stores::new(api), cli.command).await
}

async fn run(stores: &Stores, command: Command) -> Result<(), CliError> {
    match command {
        Command::LoginUrl => {
            println!("{}", stores.session.login_url().await?);
            Ok(())
        }
        Command::Login { code, user } => {
            let callback = LoginCallback::from_query(&code, &user)?;
            let user = stores.session.complete_login(callback).await?;
            print_json(&user)
        }
        Command::Me => match stores.session.check_session().await? {
            Some(user) => print_json(&user),
            None => Err(CliError::NotSignedIn),
        },
        Command::Logout => {
            stores.session.logout().await?;
            println!("signed out");
            Ok(())
        }
        Command::Tasks(tasks) => run_tasks(stores, tasks.command).await,
        Command::Posts(posts) => run_posts(stores, posts.command).await,
    }
}

async fn run_tasks(stores: &Stores, command: TasksSubcommand) -> Result<(), CliError> {
    let tasks = &stores.tasks;
    match command {
        TasksSubcommand::List => print_json(&tasks.fetch_all().await?),
        TasksSubcommand::Get { id } => print_json(&tasks.fetch_by_id(&id).await?),
        TasksSubcommand::Create(fields) => print_json(&tasks.create(&fields.into()).await?),
        TasksSubcommand::Update { id, fields } => print_json(&tasks.update(&id, &fields.into()).await?),
        TasksSubcommand::Delete { id } => {
            tasks.delete(&id).await?;
            println!("deleted task {id}");
            Ok(())
        }
    }
}

async fn run_posts(stores: &Stores, command: PostsSubcommand) -> Result<(), CliError> {
    let posts = &stores.posts;
    match command {
        PostsSubcommand::List => print_json(&posts.fetch_all().await?),
        PostsSubcommand::Page(args) => {
            let items = posts.fetch_page(&args.into()).await?;
            let page = posts.state().snapshot().page;
            print_json(&serde_json::json!({ "posts": items, "page": page }))
        }
        PostsSubcommand::User { user_id } => print_json(&posts.fetch_by_user(&user_id).await?),
        PostsSubcommand::Get { id } => print_json(&posts.fetch_by_id(&id).await?),
        PostsSubcommand::Create(fields) => print_json(&posts.create(&fields.into()).await?),
        PostsSubcommand::Update { id, fields } => print_json(&posts.update(&id, &fields.into()).await?),
        PostsSubcommand::Delete { id } => {
            posts.delete(&id).await?;
            println!("deleted post {id}");
            Ok(())
        }
    }
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
