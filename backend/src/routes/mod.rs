//! Route definitions for the Weather Prediction API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Model predictions
        .nest("/predict", predict_routes())
        // Historical charts and distributions
        .nest("/visualize", visualize_routes())
}

/// Prediction routes
fn predict_routes() -> Router<AppState> {
    Router::new()
        .route("/temperature", post(handlers::predict_temperature))
        .route("/next-week", post(handlers::predict_next_week))
        .route("/rain", post(handlers::predict_rain))
        .route("/weather-type", post(handlers::predict_weather_type))
}

/// Visualization routes
fn visualize_routes() -> Router<AppState> {
    Router::new()
        .route("/temperature", get(handlers::visualize_temperature))
        .route("/rain", get(handlers::rain_distribution))
        .route("/cluster", get(handlers::cluster_distribution))
}
