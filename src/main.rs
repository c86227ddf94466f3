use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cwstats_api::api::{build_router, state::AppState};
use cwstats_api::calculate::{assemble, BadgeTable};
use cwstats_api::config::AppConfig;
use cwstats_api::fetch::{ClientConfig, GameApi, SupercellClient};
use cwstats_api::models::{ClanTag, LimitedRaceView, RaceSnapshot, RaceView};

#[derive(Parser)]
#[command(name = "cwstats-api")]
#[command(about = "Clan war race analytics API")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Fetch a clan's current race and print the assembled view
    Race {
        /// Clan tag, with or without the leading '#'
        tag: String,

        /// Leave out participant lists
        #[arg(long)]
        limited: bool,
    },

    /// Assemble a race snapshot read from a JSON file
    Assemble {
        /// Path to a current river race JSON document
        path: PathBuf,

        /// Leave out participant lists
        #[arg(long)]
        limited: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(Path::new(&cli.config))
        .with_context(|| format!("Failed to load configuration from {}", cli.config))?;

    // Initialize tracing
    let log_level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting cwstats-api v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve { host, port } => {
            let badges = load_badges(&config)?;
            let client = build_client(&config)?;
            tracing::info!("Using {} game API at {}", client.name(), config.upstream.base_url);

            let state = AppState::new(Arc::new(client), badges)
                .with_cors_origin(config.server.cors_origin.clone());
            let app = build_router(state);

            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Race { tag, limited } => {
            let tag = ClanTag::parse(&tag)?;
            let badges = load_badges(&config)?;
            let client = build_client(&config)?;

            let snapshot = client.river_race(&tag).await?;
            tracing::info!(
                "Fetched {} race for {} ({} clans)",
                snapshot.period_type,
                tag,
                snapshot.clans.len()
            );
            print_view(assemble(&snapshot, &badges), limited)?;
        }
        Commands::Assemble { path, limited } => {
            let badges = load_badges(&config)?;
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let snapshot: RaceSnapshot = serde_json::from_str(&contents)
                .with_context(|| format!("{} is not a race snapshot", path.display()))?;

            print_view(assemble(&snapshot, &badges), limited)?;
        }
    }

    Ok(())
}

fn load_badges(config: &AppConfig) -> Result<BadgeTable> {
    let table = match &config.badges_path {
        Some(path) => BadgeTable::from_file(path)
            .with_context(|| format!("Failed to load badge table from {}", path.display()))?,
        None => BadgeTable::embedded(),
    };
    tracing::debug!("Loaded {} badges", table.len());
    Ok(table)
}

fn build_client(config: &AppConfig) -> Result<SupercellClient> {
    if config.upstream.api_token.is_empty() {
        tracing::warn!("No game API token configured; set CR_API_TOKEN or CWSTATS__UPSTREAM__API_TOKEN");
    }
    let client_config = ClientConfig::try_from(&config.upstream)?;
    Ok(SupercellClient::new(client_config)?)
}

fn print_view(view: RaceView, limited: bool) -> Result<()> {
    if limited {
        print_json(&LimitedRaceView::from(view))
    } else {
        print_json(&view)
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
