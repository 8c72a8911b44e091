//! Weather Prediction API - Server

use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weather_prediction_backend::{create_app, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "wp_server=debug,weather_prediction_backend=debug,tower_http=debug".into()
    });
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Weather Prediction Server");
    tracing::info!("Environment: {}", config.environment);

    // Load model artifacts once; they stay read-only for the process lifetime
    tracing::info!("Loading model artifacts...");
    let state = AppState::from_config(config.clone()).context("failed to load model artifacts")?;
    tracing::info!(
        "Historical data source: {}",
        state.history.path().display()
    );

    // Build application
    let app = create_app(state);

    // Start server
    let host: std::net::IpAddr = config
        .server
        .host
        .parse()
        .with_context(|| format!("invalid server host {}", config.server.host))?;
    let addr = SocketAddr::from((host, config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
