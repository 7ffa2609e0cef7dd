//! `taskflow` terminal client: sign up, log in and manage your tasks.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result, bail, eyre};
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

use taskflow::client::render::{render_dashboard, render_profile};
use taskflow::client::{
    Dashboard, DashboardError, DashboardLoad, HttpTaskApi, ListFilter, LoginForm, Navigation,
    SessionContext, SignupFields, SignupForm, TaskApi, TokenFile,
};
use taskflow::domain::{TaskId, TaskStatus};

const DEFAULT_API_URL: &str = "http://localhost:8080/api";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// `taskflow` command arguments.
#[derive(Debug, Parser)]
#[command(name = "taskflow", about = "Personal task tracker client", version)]
struct Cli {
    /// Base URL of the TaskFlow API.
    #[arg(long = "api-url", env = "TASKFLOW_API_URL", default_value = DEFAULT_API_URL)]
    api_url: Url,
    /// Where the bearer token is kept between runs.
    #[arg(long = "token-file", env = "TASKFLOW_TOKEN_FILE", value_name = "path")]
    token_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create an account.
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "TASKFLOW_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long = "role-title")]
        role_title: Option<String>,
        #[arg(long)]
        bio: Option<String>,
    },
    /// Log in and remember the issued token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "TASKFLOW_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the saved token.
    Logout,
    /// Show the signed-in profile.
    Whoami,
    /// List tasks, newest first.
    List {
        /// Case-insensitive title substring.
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_parser = parse_status)]
        status: Option<TaskStatus>,
    },
    /// Create a task.
    Add {
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Mark a pending task as completed.
    Complete {
        #[arg(value_parser = parse_task_id)]
        id: TaskId,
    },
    /// Change a task's title or description.
    Edit {
        #[arg(value_parser = parse_task_id)]
        id: TaskId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a task.
    Delete {
        #[arg(value_parser = parse_task_id)]
        id: TaskId,
    },
}

fn parse_task_id(raw: &str) -> Result<TaskId, String> {
    TaskId::new(raw).map_err(|error| error.to_string())
}

fn parse_status(raw: &str) -> Result<TaskStatus, String> {
    raw.parse().map_err(|error: taskflow::domain::TaskValidationError| error.to_string())
}

fn default_token_file() -> Result<PathBuf> {
    let home = env::var_os("HOME").ok_or_else(|| eyre!("HOME is not set; pass --token-file"))?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("taskflow")
        .join("token"))
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(run(cli))
}

async fn run(cli: Cli) -> Result<()> {
    let token_path = match cli.token_file {
        Some(path) => path,
        None => default_token_file()?,
    };
    let mut session = SessionContext::load(
        TokenFile::open(&token_path).wrap_err("failed to open token file")?,
    )
    .wrap_err("failed to read saved session")?;
    let api = HttpTaskApi::new(cli.api_url, REQUEST_TIMEOUT).wrap_err("failed to build client")?;
    let mut out = io::stdout().lock();

    match cli.command {
        Command::Signup {
            name,
            email,
            password,
            role_title,
            bio,
        } => {
            let mut form = SignupForm::new(SignupFields {
                name,
                email,
                password,
                role_title,
                bio,
            });
            match form.submit(&api).await {
                Navigation::Login => {
                    writeln!(out, "Account created. Log in with `taskflow login`.")?;
                }
                _ => bail!(form.error().unwrap_or("signup failed")),
            }
        }
        Command::Login { email, password } => {
            let mut form = LoginForm::new(email, password);
            match form.submit(&api, &mut session).await? {
                Navigation::Dashboard => writeln!(out, "Logged in.")?,
                _ => bail!(form.error().unwrap_or("login failed")),
            }
        }
        Command::Logout => {
            session.sign_out().wrap_err("failed to remove saved token")?;
            writeln!(out, "Logged out.")?;
        }
        Command::Whoami => {
            let Some(token) = session.token() else {
                bail!(not_signed_in());
            };
            let user = api
                .profile(token)
                .await
                .map_err(|error| explain(error.into()))?;
            write!(out, "{}", render_profile(&user))?;
        }
        Command::List { search, status } => {
            let filter = ListFilter { search, status };
            let dashboard = open(&api, &session, filter).await?;
            write!(out, "{}", render_dashboard(&dashboard))?;
        }
        Command::Add { title, description } => {
            let mut dashboard = open(&api, &session, ListFilter::default()).await?;
            dashboard.new_task.title = title;
            dashboard.new_task.description = description;
            if !dashboard.create_task().await.map_err(explain)? {
                bail!("a task needs a title");
            }
            write!(out, "{}", render_dashboard(&dashboard))?;
        }
        Command::Complete { id } => {
            let mut dashboard = open(&api, &session, ListFilter::default()).await?;
            dashboard.mark_complete(id).await.map_err(explain)?;
            write!(out, "{}", render_dashboard(&dashboard))?;
        }
        Command::Edit {
            id,
            title,
            description,
        } => {
            let mut dashboard = open(&api, &session, ListFilter::default()).await?;
            let draft = dashboard.start_edit(id).map_err(explain)?;
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(description) = description {
                draft.description = description;
            }
            dashboard.save_edit().await.map_err(explain)?;
            write!(out, "{}", render_dashboard(&dashboard))?;
        }
        Command::Delete { id } => {
            let mut dashboard = open(&api, &session, ListFilter::default()).await?;
            dashboard.delete_task(id).await.map_err(explain)?;
            writeln!(out, "Task deleted.")?;
        }
    }
    Ok(())
}

async fn open<'a>(
    api: &'a dyn TaskApi,
    session: &SessionContext,
    filter: ListFilter,
) -> Result<Dashboard<'a>> {
    match Dashboard::open_with_filter(api, session, filter)
        .await
        .map_err(explain)?
    {
        DashboardLoad::Ready(dashboard) => Ok(dashboard),
        DashboardLoad::RedirectToLogin => bail!(not_signed_in()),
    }
}

fn not_signed_in() -> &'static str {
    "not signed in; run `taskflow login` first"
}

fn explain(error: DashboardError) -> color_eyre::eyre::Report {
    if matches!(&error, DashboardError::Api(failure) if failure.is_unauthorized()) {
        return eyre!("session expired or invalid; run `taskflow login` again");
    }
    eyre!(error)
}
