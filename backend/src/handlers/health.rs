//! Welcome, health check and fallback handlers

use axum::{extract::State, Json};
use serde::Serialize;
use shared::MessageResponse;

use crate::error::AppError;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub models_loaded: bool,
    pub dataset: String,
}

/// Welcome endpoint handler
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to the Weather Prediction API".to_string(),
    })
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    // Models are loaded at startup; only the dataset can go missing later
    let dataset = if state.history.path().is_file() {
        "available".to_string()
    } else {
        "missing".to_string()
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        // The registry in state only exists once every artifact loaded
        models_loaded: true,
        dataset,
    })
}

/// Unknown routes
pub async fn not_found() -> AppError {
    AppError::NotFound("Not Found".to_string())
}
