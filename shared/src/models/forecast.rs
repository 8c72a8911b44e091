//! Forecast payloads for the next-week temperature batch
//!
//! The provider's daily forecast is loosely shaped, so every field is
//! optional at the wire level and checked in one explicit pass by
//! [`ForecastDay::observation`] before any feature vector is built.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::HUMIDITY_RANGE;

/// Batch request for the next-week endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastRequest {
    #[serde(default)]
    pub forecast_days: Vec<ForecastDay>,
}

/// One entry of the provider's daily forecast list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastDay {
    #[serde(default)]
    pub day: Option<DayForecast>,
}

/// Daily aggregate values reported by the forecast provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayForecast {
    #[serde(default)]
    pub totalprecip_mm: Option<f64>,
    #[serde(default)]
    pub avghumidity: Option<f64>,
    #[serde(default)]
    pub avgtemp_c: Option<f64>,
    /// Optional override, synthesized when absent
    #[serde(default)]
    pub sealevelpressure: Option<f64>,
    /// Optional override, synthesized when absent
    #[serde(default)]
    pub dewpoint_c: Option<f64>,
}

/// Validated values extracted from one forecast day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastObservation {
    pub precip_mm: f64,
    pub humidity: f64,
    pub avg_temp_c: f64,
    pub sealevelpressure: Option<f64>,
    pub dewpoint_c: Option<f64>,
}

/// Reasons a forecast batch is rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ForecastError {
    #[error("Invalid forecast data format. Expected a list of daily forecasts")]
    Empty,

    #[error("Missing daily forecast data")]
    MissingDay,

    #[error("Missing required forecast data field: '{0}'")]
    MissingField(&'static str),

    #[error("Humidity must be between 0 and 100")]
    HumidityOutOfRange(f64),
}

impl ForecastDay {
    /// Check the day for required fields and plausible humidity
    pub fn observation(&self) -> Result<ForecastObservation, ForecastError> {
        let day = self.day.as_ref().ok_or(ForecastError::MissingDay)?;

        let precip_mm = day
            .totalprecip_mm
            .ok_or(ForecastError::MissingField("totalprecip_mm"))?;
        let humidity = day
            .avghumidity
            .ok_or(ForecastError::MissingField("avghumidity"))?;
        let avg_temp_c = day
            .avgtemp_c
            .ok_or(ForecastError::MissingField("avgtemp_c"))?;

        if !HUMIDITY_RANGE.contains(&humidity) {
            return Err(ForecastError::HumidityOutOfRange(humidity));
        }

        Ok(ForecastObservation {
            precip_mm,
            humidity,
            avg_temp_c,
            sealevelpressure: day.sealevelpressure,
            dewpoint_c: day.dewpoint_c,
        })
    }
}

impl ForecastRequest {
    /// Validate every day in order; the first failure rejects the batch
    pub fn observations(&self) -> Result<Vec<ForecastObservation>, ForecastError> {
        if self.forecast_days.is_empty() {
            return Err(ForecastError::Empty);
        }
        self.forecast_days.iter().map(ForecastDay::observation).collect()
    }
}
