mod config;
mod logging;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use clap::{Parser, Subcommand};
use http::{HeaderName, HeaderValue, StatusCode};
use spot_discovery::{LoadOutcome, SpotDiscoveryModule};
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::{AppConfig, ServerConfig};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Spot server - discovery, favorites and reviews for travel spots
#[derive(Parser)]
#[command(name = "spot-server")]
#[command(about = "Spot server - discovery, favorites and reviews for travel spots")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (JSON) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.config
        && !Path::new(path).is_file()
    {
        anyhow::bail!("config file does not exist: {}", path.display());
    }

    // defaults -> YAML -> env (SPOTS__*) -> CLI
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(cli.port, cli.verbose);

    logging::init(&config.logging);

    if cli.print_config {
        println!("{}", config.to_pretty_json()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(&config).await,
        Commands::Check => check_config(&config).await,
    }
}

async fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("checking configuration");
    SpotDiscoveryModule::check(&config.spot_discovery).await?;
    println!("Configuration is valid");
    Ok(())
}

async fn run_server(config: &AppConfig) -> Result<()> {
    let cancel = CancellationToken::new();
    let module = Arc::new(SpotDiscoveryModule::init(&config.spot_discovery, &cancel).await?);

    if let Some(secs) = config.server.catalog_refresh_secs.filter(|s| *s > 0) {
        spawn_catalog_refresh(module.clone(), Duration::from_secs(secs), cancel.clone());
    }

    let router = apply_layers(module.router(), &config.server);
    let addr: SocketAddr = format!("{}:{}", config.server.bind_addr, config.server.port)
        .parse()
        .with_context(|| format!("invalid bind address '{}'", config.server.bind_addr))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("HTTP server bound on {}", addr);

    let shutdown = {
        let cancel = cancel.clone();
        async move {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                () = cancel.cancelled() => {}
            }
            tracing::info!("HTTP server shutting down gracefully");
            cancel.cancel();
        }
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| anyhow::anyhow!(e))
}

fn spawn_catalog_refresh(
    module: Arc<SpotDiscoveryModule>,
    period: Duration,
    cancel: CancellationToken,
) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // first tick fires immediately; init already loaded the catalog
        ticker.tick().await;
        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    let outcome = module.refresh_catalog(&cancel).await;
                    if let LoadOutcome::Failed = outcome {
                        tracing::warn!("periodic catalog refresh failed");
                    }
                }
            }
        }
    });
}

fn apply_layers(router: Router, cfg: &ServerConfig) -> Router {
    let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            Duration::from_secs(cfg.request_timeout_secs),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&cfg.cors_allowed_origins))
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|s| HeaderValue::from_str(s).ok())
        .collect();
    layer.allow_origin(origins)
}
