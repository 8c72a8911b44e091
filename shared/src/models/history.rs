//! Historical daily weather observations

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One complete day of the historical dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRecord {
    pub date: NaiveDate,
    pub temp: f64,
    pub rainfall: f64,
    pub evaporation: f64,
    pub wind_gust_dir: f64,
    pub wind_gust_speed: f64,
    pub dew: f64,
    pub humidity: f64,
    pub precip: f64,
    pub sealevelpressure: f64,
    pub cloudcover: f64,
    pub rain_today: f64,
}

impl HistoricalRecord {
    /// ISO 8601 date key used in distribution responses
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Feature row in `RAIN_COLUMNS` order
    pub fn rain_features(&self) -> [f64; 10] {
        [
            self.rainfall,
            self.evaporation,
            self.wind_gust_dir,
            self.wind_gust_speed,
            self.dew,
            self.humidity,
            self.precip,
            self.sealevelpressure,
            self.cloudcover,
            self.rain_today,
        ]
    }

    /// Feature row in `PATTERN_COLUMNS` order
    pub fn pattern_features(&self) -> [f64; 5] {
        [
            self.temp,
            self.humidity,
            self.evaporation,
            self.cloudcover,
            self.rainfall,
        ]
    }
}
