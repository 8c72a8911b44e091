//! Prediction services for the Weather Prediction API

pub mod forecast;
pub mod history;
pub mod rain;
pub mod temperature;
pub mod weather_pattern;

pub use forecast::{FieldSynthesizer, ForecastBatchError, ForecastService, SynthesisMode};
pub use history::{DataError, HistoricalDataSource};
pub use rain::RainAdapter;
pub use temperature::TemperatureAdapter;
pub use weather_pattern::WeatherPatternAdapter;

use crate::config::ModelPaths;
use crate::ml::ModelError;

/// The three adapters, loaded once at startup and shared read-only
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    pub temperature: TemperatureAdapter,
    pub rain: RainAdapter,
    pub weather_pattern: WeatherPatternAdapter,
}

impl ModelRegistry {
    pub fn load(paths: &ModelPaths) -> Result<Self, ModelError> {
        let temperature =
            TemperatureAdapter::load(&paths.temperature_model, &paths.temperature_scaler)?;
        tracing::info!("Temperature model loaded");

        let rain = RainAdapter::load(&paths.rain_model)?;
        tracing::info!("Rain model loaded");

        let weather_pattern =
            WeatherPatternAdapter::load(&paths.pattern_model, &paths.pattern_scaler)?;
        tracing::info!("Weather pattern model loaded");

        Ok(Self {
            temperature,
            rain,
            weather_pattern,
        })
    }
}
