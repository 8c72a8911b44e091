//! Error handling for the Weather Prediction API
//!
//! Every error response is a JSON object with a `detail` string; the
//! panic fallback answers with a generic `message`.

use std::any::Any;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::{DateParseError, ForecastError};
use thiserror::Error;
use validator::ValidationErrors;

use crate::ml::ModelError;
use crate::services::{DataError, ForecastBatchError};

pub const MODEL_PREDICTION_ERROR: &str = "Model prediction error";
pub const NO_DATA_IN_RANGE: &str = "No weather data found for given date range";
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";
pub const FORECAST_TYPE_ERROR: &str = "Invalid data type in forecast values";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Request errors
    #[error("Validation error: {message}")]
    Validation {
        field: Option<String>,
        message: String,
    },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    // Model errors; the status differs per endpoint
    #[error("Model rejected input: {0}")]
    ModelRejected(#[source] ModelError),

    #[error("Model failed: {0}")]
    ModelFailed(#[source] ModelError),

    // Historical analysis errors
    #[error("{detail}: {reason}")]
    Analysis {
        detail: &'static str,
        reason: String,
    },
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Body of the catch-all 500 response
#[derive(Serialize)]
pub struct UnexpectedErrorResponse {
    pub message: String,
}

impl AppError {
    /// Wrap an analysis failure with the endpoint's public detail
    pub fn analysis(detail: &'static str, err: impl std::fmt::Display) -> Self {
        AppError::Analysis {
            detail,
            reason: err.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) | AppError::ModelRejected(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ModelFailed(_) | AppError::Analysis { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::Validation { field, message } => ErrorResponse {
                detail: message.clone(),
                code: "VALIDATION_ERROR".to_string(),
                field: field.clone(),
            },
            AppError::BadRequest(msg) => ErrorResponse {
                detail: msg.clone(),
                code: "BAD_REQUEST".to_string(),
                field: None,
            },
            AppError::NotFound(msg) => ErrorResponse {
                detail: msg.clone(),
                code: "NOT_FOUND".to_string(),
                field: None,
            },
            AppError::ModelRejected(_) | AppError::ModelFailed(_) => ErrorResponse {
                detail: MODEL_PREDICTION_ERROR.to_string(),
                code: "MODEL_ERROR".to_string(),
                field: None,
            },
            AppError::Analysis { detail, .. } => ErrorResponse {
                detail: detail.to_string(),
                code: "ANALYSIS_ERROR".to_string(),
                field: None,
            },
        };

        // Log the error for debugging
        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);

        let (field, message) = match fields.first() {
            Some((field, errs)) => {
                let reason = errs
                    .first()
                    .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| "value out of range".to_string());
                (Some(field.to_string()), format!("{}: {}", field, reason))
            }
            None => (None, errors.to_string()),
        };

        AppError::Validation { field, message }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation {
            field: None,
            message: rejection.body_text(),
        }
    }
}

/// Body rejection for the forecast batch; mistyped values are a bad request
#[derive(Debug)]
pub struct ForecastRejection(pub AppError);

impl From<JsonRejection> for ForecastRejection {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => {
                tracing::warn!("Forecast body has mistyped values: {}", err.body_text());
                ForecastRejection(AppError::BadRequest(FORECAST_TYPE_ERROR.to_string()))
            }
            other => ForecastRejection(other.into()),
        }
    }
}

impl IntoResponse for ForecastRejection {
    fn into_response(self) -> Response {
        self.0.into_response()
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation {
            field: None,
            message: rejection.body_text(),
        }
    }
}

impl From<DateParseError> for AppError {
    fn from(err: DateParseError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<ForecastError> for AppError {
    fn from(err: ForecastError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<ForecastBatchError> for AppError {
    fn from(err: ForecastBatchError) -> Self {
        match err {
            ForecastBatchError::Invalid(e) => e.into(),
            ForecastBatchError::Model(e) => AppError::ModelRejected(e),
        }
    }
}

impl From<DataError> for AppError {
    fn from(err: DataError) -> Self {
        AppError::analysis("Error loading weather data", err)
    }
}

/// Fallback for panics escaping a handler
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!("Unhandled error: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(UnexpectedErrorResponse {
            message: UNEXPECTED_ERROR.to_string(),
        }),
    )
        .into_response()
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
