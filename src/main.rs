//! Surf-gateway: cached surf forecast HTTP service.
//!
//! Single-binary Tokio application that:
//! 1. Loads configuration from .env, config.toml, environment and flags
//! 2. Builds the shared forecast cache and service
//! 3. Serves `/forecast` and `/health` until Ctrl+C

mod config;
mod routes;

use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};

use common::{Clock, GatewayConfig, SystemClock};
use forecast_cache::{ForecastCache, ForecastService, CACHE_TTL_SECS};
use routes::AppState;
use spot_registry::{MockForecaster, SPOTS};

/// Surf forecast gateway
#[derive(Parser)]
#[command(name = "surf-gateway", about = "Cached surf forecast HTTP gateway")]
struct Cli {
    /// Port to listen on (overrides PORT and config.toml).
    #[arg(long)]
    port: Option<u16>,

    /// Load and validate configuration, print it, then exit.
    #[arg(long)]
    check_config: bool,
}

fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!("Unable to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = config::load_config(cli.port);
    let default_filter = match &loaded {
        Ok(cfg) => cfg.log_filter.clone(),
        Err(_) => GatewayConfig::default().log_filter,
    };
    init_tracing(&default_filter);

    let cfg = match loaded {
        Ok(c) => c,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if cli.check_config {
        match toml::to_string_pretty(&cfg) {
            Ok(rendered) => {
                println!("{}", rendered);
                return;
            }
            Err(e) => {
                error!("Failed to render config: {}", e);
                std::process::exit(1);
            }
        }
    }

    info!("🏄 Surf gateway starting up...");
    info!("Spots registered: {}", SPOTS.len());
    info!(
        "Cache: ttl={}s single_flight={} retry_on_failure={}",
        CACHE_TTL_SECS, cfg.cache.single_flight, cfg.cache.retry_on_failure
    );

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let source = Arc::new(MockForecaster::new(clock.clone()));
    let service = ForecastService::new(ForecastCache::new(), source, clock).with_config(&cfg.cache);
    let app = routes::router(AppState {
        service: Arc::new(service),
    });

    let addr = format!("{}:{}", cfg.server.bind_addr, cfg.server.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    info!("🚀 Starting server on {}", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    info!("Surf gateway shut down.");
}
