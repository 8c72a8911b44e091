//! Validation utilities for the Weather Prediction API

use std::ops::RangeInclusive;

use chrono::NaiveDate;
use thiserror::Error;
use validator::ValidationError;

/// Plausible relative humidity, in percent
pub const HUMIDITY_RANGE: RangeInclusive<f64> = 0.0..=100.0;

/// Date format accepted for range bounds
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Malformed date bound
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid date '{value}', expected YYYY-MM-DD")]
pub struct DateParseError {
    pub value: String,
}

/// Strictly positive quantity (e.g. sea level pressure)
pub fn validate_positive(value: f64) -> Result<(), ValidationError> {
    if value > 0.0 {
        Ok(())
    } else {
        let mut error = ValidationError::new("positive");
        error.message = Some("must be greater than 0".into());
        Err(error)
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, DateParseError> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT).map_err(|_| DateParseError {
        value: value.to_string(),
    })
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
