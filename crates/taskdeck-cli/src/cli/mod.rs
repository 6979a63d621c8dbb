//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use taskdeck_core::api::ApiClient;
use taskdeck_core::config::{self, Config};
use taskdeck_core::session::SessionStore;
use taskdeck_core::tasks::{StatusFilter, TaskStatus};

mod commands;

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(version = "0.1")]
#[command(about = "Terminal client for a task-tracking service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Base URL of the task service (overrides config and TASKDECK_SERVER)
    #[arg(long, global = true, value_name = "URL")]
    server: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in and persist the session
    Login {
        /// Account email
        email: String,
        /// Account password
        #[arg(short, long)]
        password: String,
    },

    /// Create an account (logs in on success)
    Register {
        /// Display name
        name: String,
        /// Account email
        email: String,
        /// Account password
        #[arg(short, long)]
        password: String,
    },

    /// Log out and clear the persisted session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// List tasks
    List {
        /// Filter by status (all, pending, in-progress, completed)
        #[arg(long, default_value = "all")]
        status: StatusFilter,

        /// Search term matched against title and description
        #[arg(long, default_value = "")]
        search: String,
    },

    /// Add a task
    Add {
        /// Task title
        title: String,
        /// Task description
        description: String,

        /// Initial status (pending, in-progress, completed)
        #[arg(long, default_value = "pending")]
        status: TaskStatus,
    },

    /// Edit an existing task
    Edit {
        /// Task id
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New status (pending, in-progress, completed)
        #[arg(long)]
        status: Option<TaskStatus>,
    },

    /// Delete a task
    Rm {
        /// Task id
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("taskdeck=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn dispatch(cli: Cli) -> Result<()> {
    if let Commands::Config { command } = &cli.command {
        return match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        };
    }

    let config = Config::load().context("load config")?;
    let server_url = config::resolve_server_url(cli.server.as_deref(), &config)?;
    tracing::debug!(%server_url, "using server");

    let session = SessionStore::new();
    session.initialize();

    if let Commands::Whoami = cli.command {
        return commands::auth::whoami(&session);
    }

    let client = ApiClient::new(&server_url, session.clone(), config.request_timeout_secs)?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(client, session, &email, &password).await
        }
        Commands::Register {
            name,
            email,
            password,
        } => commands::auth::register(client, session, &name, &email, &password).await,
        Commands::Logout => commands::auth::logout(client, session).await,
        Commands::List { status, search } => {
            commands::tasks::list(client, session, status, search).await
        }
        Commands::Add {
            title,
            description,
            status,
        } => commands::tasks::add(client, session, title, description, status).await,
        Commands::Edit {
            id,
            title,
            description,
            status,
        } => commands::tasks::edit(client, session, &id, title, description, status).await,
        Commands::Rm { id, yes } => commands::tasks::rm(client, session, &id, yes).await,
        Commands::Whoami | Commands::Config { .. } => unreachable!("handled above"),
    }
}
