use anyhow::{bail, Context, Result};
use appmarket_stores::catalog_store::SortBy;
use appmarket_stores::config::{CliConfig, FileConfig};
use appmarket_stores::{
    AppConfig, CatalogStore, FilterUpdate, RestBackend, SessionStore,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[clap(version, about = "Browse the app marketplace from the command line")]
struct CliArgs {
    /// Path to a TOML config file. Its values override the flags below.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Backend project URL.
    #[clap(long, env = "BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Public access key of the backend project.
    #[clap(long, env = "BACKEND_ANON_KEY")]
    pub backend_anon_key: Option<String>,

    /// Timeout in seconds for backend requests.
    #[clap(long)]
    pub request_timeout_sec: Option<u64>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List published apps.
    Apps {
        #[clap(long, value_enum)]
        sort: Option<SortBy>,
        #[clap(long)]
        category: Option<String>,
        #[clap(long)]
        search: Option<String>,
    },
    /// Show a single app.
    App { id: String },
    /// List catalog categories.
    Categories,
    /// Sign in and print the user profile.
    Login {
        #[clap(long)]
        email: String,
        #[clap(long)]
        password: String,
    },
    /// Create an account.
    Register {
        #[clap(long)]
        email: String,
        #[clap(long)]
        password: String,
        #[clap(long)]
        full_name: String,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn fail_on_error(error: Option<String>) -> Result<()> {
    match error {
        Some(message) => bail!(message),
        None => Ok(()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = cli_args
        .config
        .as_deref()
        .map(FileConfig::load)
        .transpose()?;
    let cli_config = CliConfig {
        backend_url: cli_args.backend_url.clone(),
        backend_anon_key: cli_args.backend_anon_key.clone(),
        request_timeout_sec: cli_args.request_timeout_sec,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    info!(
        "Using backend {} (catalog: {:?}, auth: {:?})",
        config.backend_url,
        config.catalog_mode(),
        config.auth_mode()
    );
    let backend = Arc::new(RestBackend::new(
        config.backend_url.clone(),
        config.backend_anon_key.clone(),
        config.request_timeout_sec,
    )?);
    let catalog = CatalogStore::new(backend.clone(), config.catalog_mode());
    let session = SessionStore::new(backend, config.session_modes());

    match cli_args.command {
        Command::Apps {
            sort,
            category,
            search,
        } => {
            let update = FilterUpdate {
                sort_by: sort,
                category: category.map(Some),
                search: search.map(Some),
            };
            if update.is_empty() {
                catalog.fetch_apps().await;
            } else {
                catalog.set_filters(update).await;
            }
            print_json(&catalog.snapshot().apps)
        }
        Command::App { id } => {
            catalog.fetch_app(&id).await;
            let state = catalog.snapshot();
            fail_on_error(state.error)?;
            print_json(&state.selected_app)
        }
        Command::Categories => {
            catalog.load_categories().await;
            print_json(&catalog.snapshot().categories)
        }
        Command::Login { email, password } => {
            session.login(&email, &password).await?;
            let state = session.snapshot();
            fail_on_error(state.error)?;
            print_json(&state.user)
        }
        Command::Register {
            email,
            password,
            full_name,
        } => {
            session.register(&email, &password, &full_name).await;
            fail_on_error(session.snapshot().error)?;
            info!("Registration submitted for {}, confirm the email before logging in", email);
            Ok(())
        }
    }
}
