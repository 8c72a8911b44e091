//! Weather Prediction API
//!
//! Serves pre-trained temperature, rain and weather-pattern models over
//! HTTP, along with historical observations for charting.

use std::sync::Arc;

use axum::{http::HeaderValue, routing::get, Router};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod ml;
pub mod routes;
pub mod services;

pub use config::Config;

use ml::ModelError;
use services::{ForecastService, HistoricalDataSource, ModelRegistry};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub models: Arc<ModelRegistry>,
    pub history: HistoricalDataSource,
    pub forecast: Arc<ForecastService>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Load every model artifact named in `config`
    pub fn from_config(config: Config) -> Result<Self, ModelError> {
        let models = ModelRegistry::load(&config.models)?;
        Ok(Self {
            models: Arc::new(models),
            history: HistoricalDataSource::new(config.data.weather_csv.clone()),
            forecast: Arc::new(ForecastService::new(&config.forecast)),
            config: Arc::new(config),
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .server
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .merge(routes::api_routes())
        .fallback(handlers::not_found)
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
