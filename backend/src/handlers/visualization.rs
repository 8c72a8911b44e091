//! HTTP handlers for historical charts and model distributions

use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use shared::{
    round_to, ClusterDistribution, DateRange, HistoricalRecord, RainDistribution,
    TemperatureChart, TemperatureChartResponse, TemperaturePoint,
};

use crate::error::{AppError, AppResult, NO_DATA_IN_RANGE};
use crate::AppState;

const RAIN_ANALYSIS_ERROR: &str = "Error analyzing rain probabilities";
const PATTERN_ANALYSIS_ERROR: &str = "Error analyzing weather patterns";

/// Optional date bounds; both must be present to filter
#[derive(Debug, Deserialize)]
pub struct OptionalDateRangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Required date bounds
#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    pub start_date: String,
    pub end_date: String,
}

impl DateRangeQuery {
    fn range(&self) -> Result<DateRange, AppError> {
        Ok(DateRange::from_bounds(
            Some(self.start_date.as_str()),
            Some(self.end_date.as_str()),
        )?)
    }
}

async fn load_non_empty(
    state: &AppState,
    range: DateRange,
    detail: &'static str,
) -> AppResult<Vec<HistoricalRecord>> {
    let records = state
        .history
        .fetch(range)
        .await
        .map_err(|e| AppError::analysis(detail, e))?;

    if records.is_empty() {
        return Err(AppError::NotFound(NO_DATA_IN_RANGE.to_string()));
    }
    Ok(records)
}

/// Daily temperature series for charting
pub async fn visualize_temperature(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<OptionalDateRangeQuery>, AppError>,
) -> AppResult<Json<TemperatureChartResponse>> {
    tracing::info!(
        "Getting temperature series from {:?} to {:?}",
        query.start_date,
        query.end_date
    );
    let range = DateRange::from_bounds(query.start_date.as_deref(), query.end_date.as_deref())?;
    let records = state.history.fetch(range).await?;

    let temperature_data: Vec<TemperaturePoint> = records
        .iter()
        .map(|record| TemperaturePoint {
            date: record.date,
            temperature: record.temp,
        })
        .collect();

    tracing::info!("Collected {} temperature points", temperature_data.len());
    Ok(Json(TemperatureChartResponse {
        chart_data: TemperatureChart { temperature_data },
    }))
}

/// Rain model output for every day in the range
pub async fn rain_distribution(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<DateRangeQuery>, AppError>,
) -> AppResult<Json<RainDistribution>> {
    tracing::info!(
        "Getting rain probabilities from {} to {}",
        query.start_date,
        query.end_date
    );
    let records = load_non_empty(&state, query.range()?, RAIN_ANALYSIS_ERROR).await?;

    let mut probability_by_date = BTreeMap::new();
    for record in &records {
        let output = state
            .models
            .rain
            .predict(record.rain_features())
            .map_err(|e| AppError::analysis(RAIN_ANALYSIS_ERROR, e))?;
        probability_by_date.insert(record.date_key(), round_to(output, 3));
    }

    tracing::info!(
        "Calculated rain probabilities for {} days",
        probability_by_date.len()
    );
    Ok(Json(RainDistribution {
        total_days: probability_by_date.len(),
        probability_by_date,
    }))
}

/// Weather pattern cluster for every day in the range
pub async fn cluster_distribution(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<DateRangeQuery>, AppError>,
) -> AppResult<Json<ClusterDistribution>> {
    tracing::info!(
        "Getting weather pattern distribution from {} to {}",
        query.start_date,
        query.end_date
    );
    let records = load_non_empty(&state, query.range()?, PATTERN_ANALYSIS_ERROR).await?;

    let rows: Vec<[f64; 5]> = records.iter().map(HistoricalRecord::pattern_features).collect();
    let clusters = state
        .models
        .weather_pattern
        .predict_batch(&rows)
        .map_err(|e| AppError::analysis(PATTERN_ANALYSIS_ERROR, e))?;

    let cluster_by_date: BTreeMap<String, usize> = records
        .iter()
        .map(HistoricalRecord::date_key)
        .zip(clusters)
        .collect();

    tracing::info!(
        "Calculated weather patterns for {} days",
        cluster_by_date.len()
    );
    Ok(Json(ClusterDistribution {
        total_days: cluster_by_date.len(),
        cluster_by_date,
    }))
}
