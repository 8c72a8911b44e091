//! HTTP handlers for single and batch predictions

use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use shared::{
    round_to, ForecastRequest, RainInput, RainOutcome, RainPrediction, TemperatureInput,
    TemperaturePrediction, WeatherPatternInput, WeatherTypePrediction, WeeklyPrediction,
};

use crate::error::{AppError, AppResult, ForecastRejection};
use crate::middleware::ValidatedJson;
use crate::AppState;

/// Predict tomorrow's temperature from today's observations
pub async fn predict_temperature(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<TemperatureInput>,
) -> AppResult<Json<TemperaturePrediction>> {
    tracing::info!("Predicting temperature with input: {:?}", input);

    let prediction = state
        .models
        .temperature
        .predict(input.features())
        .map_err(AppError::ModelRejected)?;

    tracing::info!("Predicted temperature: {}", prediction);
    Ok(Json(TemperaturePrediction {
        prediction: round_to(prediction, 2),
    }))
}

/// Predict one temperature per day of a provider forecast
pub async fn predict_next_week(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<ForecastRequest>, ForecastRejection>,
) -> AppResult<Json<WeeklyPrediction>> {
    tracing::info!(
        "Predicting temperatures for {} forecast days",
        request.forecast_days.len()
    );

    let predictions = state
        .forecast
        .predict_week(&state.models.temperature, &request)?;

    tracing::info!("Predicted temperatures for next week: {:?}", predictions);
    Ok(Json(WeeklyPrediction { predictions }))
}

/// Predict whether it will rain
pub async fn predict_rain(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<RainInput>,
) -> AppResult<Json<RainPrediction>> {
    tracing::info!("Predicting rain with input: {:?}", input);

    let rain = state
        .models
        .rain
        .will_rain(input.features())
        .map_err(AppError::ModelFailed)?;

    tracing::info!("Rain prediction: {}", rain);
    Ok(Json(RainPrediction {
        prediction: RainOutcome::from_flag(rain),
    }))
}

/// Assign a weather pattern cluster
pub async fn predict_weather_type(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<WeatherPatternInput>,
) -> AppResult<Json<WeatherTypePrediction>> {
    tracing::info!("Predicting weather pattern with input: {:?}", input);

    let cluster = state
        .models
        .weather_pattern
        .predict(input.features())
        .map_err(AppError::ModelFailed)?;

    tracing::info!("Weather type cluster: {}", cluster);
    Ok(Json(WeatherTypePrediction { prediction: cluster }))
}
