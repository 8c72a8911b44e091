//! Response shapes and common types used across the API

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::validation::{parse_iso_date, DateParseError};

/// Inclusive date window applied to the historical dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Build a range from optional `YYYY-MM-DD` bounds.
    ///
    /// Filtering only applies when both bounds are present.
    pub fn from_bounds(start: Option<&str>, end: Option<&str>) -> Result<Self, DateParseError> {
        let start = start.map(parse_iso_date).transpose()?;
        let end = end.map(parse_iso_date).transpose()?;
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start <= date && date <= end,
            _ => true,
        }
    }
}

/// Rain classifier verdict as exposed by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RainOutcome {
    Yes,
    No,
}

impl RainOutcome {
    pub fn from_flag(rain: bool) -> Self {
        if rain {
            RainOutcome::Yes
        } else {
            RainOutcome::No
        }
    }
}

/// `POST /predict/temperature`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemperaturePrediction {
    pub prediction: f64,
}

/// `POST /predict/next-week`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyPrediction {
    pub predictions: Vec<f64>,
}

/// `POST /predict/rain`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RainPrediction {
    pub prediction: RainOutcome,
}

/// `POST /predict/weather-type`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherTypePrediction {
    pub prediction: usize,
}

/// A single point of the temperature chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperaturePoint {
    pub date: NaiveDate,
    pub temperature: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemperatureChart {
    pub temperature_data: Vec<TemperaturePoint>,
}

/// `GET /visualize/temperature`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemperatureChartResponse {
    pub chart_data: TemperatureChart,
}

/// `GET /visualize/rain`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RainDistribution {
    pub probability_by_date: BTreeMap<String, f64>,
    pub total_days: usize,
}

/// `GET /visualize/cluster`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterDistribution {
    pub cluster_by_date: BTreeMap<String, usize>,
    pub total_days: usize,
}

/// Plain message body used by the welcome endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
