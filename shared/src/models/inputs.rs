//! Request schemas for the three prediction models
//!
//! Each schema enforces physical-plausibility bounds through `validator`
//! before any feature vector is built. The `features` methods return the
//! columns in the exact order the corresponding model was fit with.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::validate_positive;

/// Column order of the temperature scaler (the last column is the target)
pub const TEMPERATURE_COLUMNS: [&str; 6] = [
    "sealevelpressure",
    "Evaporation",
    "humidity",
    "dew",
    "temp",
    "TomorrowTemp",
];

/// Column order of the rain classifier
pub const RAIN_COLUMNS: [&str; 10] = [
    "Rainfall",
    "Evaporation",
    "WindGustDir",
    "WindGustSpeed",
    "dew",
    "humidity",
    "precip",
    "sealevelpressure",
    "cloudcover",
    "RainToday",
];

/// Column order of the weather pattern scaler and clusterer
pub const PATTERN_COLUMNS: [&str; 5] = ["temp", "humidity", "Evaporation", "cloudcover", "Rainfall"];

/// Input for the temperature regression model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TemperatureInput {
    /// Sea level pressure in hPa
    #[validate(custom = "validate_positive")]
    pub sealevelpressure: f64,
    /// Evaporation in mm
    #[validate(range(min = 0.0))]
    pub evaporation: f64,
    /// Relative humidity percentage
    #[validate(range(min = 0.0, max = 100.0))]
    pub humidity: f64,
    /// Dew point in Celsius
    #[validate(range(min = -50.0, max = 50.0))]
    pub dew: f64,
    /// Current temperature in Celsius
    #[validate(range(min = -50.0, max = 50.0))]
    pub temp: f64,
}

impl TemperatureInput {
    /// Feature row for the temperature scaler.
    ///
    /// The sixth column repeats `temp` as a placeholder for the target
    /// column the scaler was fit with.
    pub fn features(&self) -> [f64; 6] {
        [
            self.sealevelpressure,
            self.evaporation,
            self.humidity,
            self.dew,
            self.temp,
            self.temp,
        ]
    }
}

/// Input for the rain classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RainInput {
    #[validate(range(min = 0.0))]
    pub rainfall: f64,
    #[validate(range(min = 0.0))]
    pub evaporation: f64,
    /// Wind gust direction in degrees
    #[validate(range(min = 0.0))]
    pub wind_gust_dir: f64,
    /// Wind gust speed in km/h
    #[validate(range(min = 0.0))]
    pub wind_gust_speed: f64,
    #[validate(range(min = -50.0, max = 50.0))]
    pub dew: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub humidity: f64,
    #[validate(range(min = 0.0))]
    pub precip: f64,
    #[validate(custom = "validate_positive")]
    pub sealevelpressure: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub cloudcover: f64,
    #[validate(range(min = 0.0))]
    pub rain_today: f64,
}

impl RainInput {
    /// Feature row in `RAIN_COLUMNS` order
    pub fn features(&self) -> [f64; 10] {
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
}

/// Input for the weather pattern clusterer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct WeatherPatternInput {
    #[validate(range(min = -50.0, max = 50.0))]
    pub temp: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub humidity: f64,
    #[validate(range(min = 0.0))]
    pub evaporation: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub cloudcover: f64,
    #[validate(range(min = 0.0))]
    pub rainfall: f64,
}

impl WeatherPatternInput {
    /// Feature row in `PATTERN_COLUMNS` order
    pub fn features(&self) -> [f64; 5] {
        [
            self.temp,
            self.humidity,
            self.evaporation,
            self.cloudcover,
            self.rainfall,
        ]
    }
}
