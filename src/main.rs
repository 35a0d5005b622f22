use backoffice::app::AdminApp;
use backoffice::config::{ClientConfig, ConfigError};
use backoffice::net::{ApiError, QueryBuilder, SignInRequest, SortOrder};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("not signed in; pass --email/--password or set BACKOFFICE_EMAIL/BACKOFFICE_PASSWORD")]
    MissingCredentials,
    #[error("unknown resource `{0}`")]
    UnknownResource(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "backoffice", about = "Back-office admin API client")]
struct Cli {
    #[arg(long, env = "BACKOFFICE_EMAIL")]
    email: Option<String>,

    #[arg(long, env = "BACKOFFICE_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the signed-in user and permissions.
    Me,
    /// List a resource page.
    List(ListArgs),
    /// Delete one row of a resource.
    Delete { resource: String, id: i64 },
}

#[derive(Args, Debug)]
struct ListArgs {
    resource: String,

    #[arg(long, default_value_t = 1)]
    page: u32,

    #[arg(long, default_value_t = 10)]
    limit: u32,

    #[arg(long)]
    search: Option<String>,

    #[arg(long)]
    sort_by: Option<String>,

    #[arg(long)]
    sort_desc: bool,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let app = AdminApp::new(ClientConfig::from_env()?)?;
    ensure_session(&app, cli.email, cli.password).await?;

    match cli.command {
        Command::Me => run_me(&app),
        Command::List(args) => run_list(&app, args).await,
        Command::Delete { resource, id } => run_delete(&app, &resource, id).await,
    }
}

/// Reuse cookie session if any, otherwise sign in with the given credentials.
async fn ensure_session(app: &AdminApp, email: Option<String>, password: Option<String>) -> Result<(), CliError> {
    app.store().initialize().await;
    if app.store().is_authenticated() {
        return Ok(());
    }
    let (Some(email), Some(password)) = (email, password) else {
        return Err(CliError::MissingCredentials);
    };
    app.store().sign_in(&SignInRequest::new(email, password)).await?;
    Ok(())
}

fn run_me(app: &AdminApp) -> Result<(), CliError> {
    let session = app.store().session();
    let permissions: Vec<u32> = session.permissions.iter().map(|p| p.0).collect();
    print_json(&serde_json::json!({
        "id": session.user_id,
        "email": session.email,
        "permissions": permissions,
    }))
}

async fn run_list(app: &AdminApp, args: ListArgs) -> Result<(), CliError> {
    let resource = app
        .services()
        .raw(&args.resource)
        .ok_or_else(|| CliError::UnknownResource(args.resource.clone()))?;

    let mut query = QueryBuilder::new().with_pagination(args.page, args.limit);
    if let Some(search) = args.search.as_deref() {
        query = query.with_search(search);
    }
    if let Some(sort_by) = args.sort_by.as_deref() {
        let order = if args.sort_desc { SortOrder::Desc } else { SortOrder::Asc };
        query = query.with_sort(sort_by, order);
    }

    let page = resource.list(&query).await?;
    print_json(&serde_json::to_value(&page)?)
}

async fn run_delete(app: &AdminApp, resource: &str, id: i64) -> Result<(), CliError> {
    let handle = app
        .services()
        .raw(resource)
        .ok_or_else(|| CliError::UnknownResource(resource.to_owned()))?;
    handle.delete(id).await?;
    eprintln!("deleted {resource} {id}");
    Ok(())
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
