//! Configuration management for the Weather Prediction API
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with WP_ prefix

use std::path::{Path, PathBuf};

use config::{ConfigError, Environment, File};
use serde::Deserialize;

use crate::services::SynthesisMode;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Model artifact locations
    pub models: ModelPaths,

    /// Historical dataset location
    pub data: DataConfig,

    /// Next-week forecast synthesis settings
    pub forecast: ForecastConfig,

    /// Log output settings
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,

    /// Origins allowed by CORS
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelPaths {
    pub temperature_model: PathBuf,
    pub temperature_scaler: PathBuf,
    pub rain_model: PathBuf,
    pub pattern_model: PathBuf,
    pub pattern_scaler: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// CSV file of daily observations
    pub weather_csv: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ForecastConfig {
    /// How missing pressure and dew point are filled
    pub synthesis: SynthesisMode,

    /// Sea level pressure range in hPa
    pub pressure_min: i32,
    pub pressure_max: i32,

    /// Dew point range in Celsius
    pub dew_min: i32,
    pub dew_max: i32,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Emit JSON log lines instead of the human-readable format
    pub json: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("WP_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let models = ModelPaths::default();
        let forecast = ForecastConfig::default();

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.cors_origins", vec!["http://localhost:5173"])?
            .set_default("models.temperature_model", path_str(&models.temperature_model))?
            .set_default("models.temperature_scaler", path_str(&models.temperature_scaler))?
            .set_default("models.rain_model", path_str(&models.rain_model))?
            .set_default("models.pattern_model", path_str(&models.pattern_model))?
            .set_default("models.pattern_scaler", path_str(&models.pattern_scaler))?
            .set_default("data.weather_csv", path_str(&DataConfig::default().weather_csv))?
            .set_default("forecast.synthesis", "random")?
            .set_default("forecast.pressure_min", forecast.pressure_min)?
            .set_default("forecast.pressure_max", forecast.pressure_max)?
            .set_default("forecast.dew_min", forecast.dew_min)?
            .set_default("forecast.dew_max", forecast.dew_max)?
            .set_default("logging.json", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (WP_ prefix)
            .add_source(
                Environment::with_prefix("WP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.forecast.check()?;
        Ok(config)
    }
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

impl ModelPaths {
    /// Default artifact file names inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            temperature_model: dir.join("temperature_model.json"),
            temperature_scaler: dir.join("temperature_scaler.json"),
            rain_model: dir.join("rain_model.json"),
            pattern_model: dir.join("pattern_model.json"),
            pattern_scaler: dir.join("pattern_scaler.json"),
        }
    }
}

impl ForecastConfig {
    fn check(&self) -> Result<(), ConfigError> {
        if self.pressure_min > self.pressure_max {
            return Err(ConfigError::Message(
                "forecast.pressure_min must not exceed forecast.pressure_max".into(),
            ));
        }
        if self.dew_min > self.dew_max {
            return Err(ConfigError::Message(
                "forecast.dew_min must not exceed forecast.dew_max".into(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            models: ModelPaths::default(),
            data: DataConfig::default(),
            forecast: ForecastConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".to_string(),
            cors_origins: vec!["http://localhost:5173".to_string()],
        }
    }
}

impl Default for ModelPaths {
    fn default() -> Self {
        Self::in_dir(Path::new("models"))
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            weather_csv: PathBuf::from("models/melbourne_weather.csv"),
        }
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            synthesis: SynthesisMode::Random,
            pressure_min: 1000,
            pressure_max: 1005,
            dew_min: -6,
            dew_max: 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_forecast_ranges_valid() {
        assert!(ForecastConfig::default().check().is_ok());
    }

    #[test]
    fn test_inverted_pressure_range_rejected() {
        let forecast = ForecastConfig {
            pressure_min: 1010,
            pressure_max: 1000,
            ..ForecastConfig::default()
        };
        assert!(forecast.check().is_err());
    }

    #[test]
    fn test_model_paths_in_dir() {
        let paths = ModelPaths::in_dir(Path::new("/srv/models"));
        assert_eq!(paths.rain_model, PathBuf::from("/srv/models/rain_model.json"));
    }

    #[test]
    fn test_synthesis_mode_from_string() {
        let mode: SynthesisMode = serde_json::from_str(r#""fixed""#).unwrap();
        assert_eq!(mode, SynthesisMode::Fixed);
    }
}
