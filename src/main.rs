use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use classroll::{api, config::ServerConfig, store::Store};

#[derive(Parser)]
#[command(name = "classroll")]
#[command(about = "Mock classroom attendance backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port for HTTP API
        #[arg(short, long)]
        port: Option<u16>,

        /// JSON document backing the store
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
    /// Report roster entries that reference no allocation
    Check {
        /// JSON document to check
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "classroll=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!(
        "Starting classroll server on port {} with data file {}",
        config.port,
        config.data_path.display()
    );

    let store = Store::open_file(&config.data_path);
    let app = api::create_router(store);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("classroll server listening on http://{}", config.bind_address());

    axum::serve(listener, app).await?;
    Ok(())
}

fn check(config: ServerConfig) -> anyhow::Result<()> {
    let store = Store::open_file(&config.data_path);
    let orphans = store.orphan_roster_keys()?;

    if orphans.is_empty() {
        println!("{}: every roster references an allocation", config.data_path.display());
        return Ok(());
    }

    for key in &orphans {
        println!("roster key {key:?} references no allocation");
    }
    anyhow::bail!("{} orphan roster key(s) in {}", orphans.len(), config.data_path.display())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = ServerConfig::from_env();

    match cli.command {
        Some(Commands::Serve { host, port, data }) => {
            serve(config.with_overrides(host, port, data)).await
        }
        Some(Commands::Check { data }) => check(config.with_overrides(None, None, data)),
        None => serve(config).await,
    }
}
