//! Next-week temperature batch
//!
//! Provider forecasts carry precipitation, humidity and average temperature
//! but not sea level pressure or dew point. Those two are taken from the
//! request when supplied, otherwise synthesized per day.

use rand::Rng;
use serde::Deserialize;
use shared::{round_to, ForecastError, ForecastObservation, ForecastRequest};
use thiserror::Error;

use crate::config::ForecastConfig;
use crate::ml::ModelError;
use crate::services::TemperatureAdapter;

/// How missing pressure and dew point values are filled in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisMode {
    /// Uniform integer draw from the configured range
    #[default]
    Random,
    /// Midpoint of the configured range
    Fixed,
}

/// Fills in values the forecast provider does not report
#[derive(Debug, Clone)]
pub struct FieldSynthesizer {
    mode: SynthesisMode,
    pressure: (i32, i32),
    dew: (i32, i32),
}

impl FieldSynthesizer {
    pub fn new(config: &ForecastConfig) -> Self {
        Self {
            mode: config.synthesis,
            pressure: (config.pressure_min, config.pressure_max),
            dew: (config.dew_min, config.dew_max),
        }
    }

    pub fn pressure<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.draw(self.pressure, rng)
    }

    pub fn dew<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.draw(self.dew, rng)
    }

    fn draw<R: Rng + ?Sized>(&self, (min, max): (i32, i32), rng: &mut R) -> f64 {
        match self.mode {
            SynthesisMode::Random => f64::from(rng.gen_range(min..=max)),
            SynthesisMode::Fixed => (f64::from(min) + f64::from(max)) / 2.0,
        }
    }
}

/// Reasons a next-week batch produces no predictions
#[derive(Error, Debug)]
pub enum ForecastBatchError {
    #[error(transparent)]
    Invalid(#[from] ForecastError),

    #[error("Model prediction error: {0}")]
    Model(#[from] ModelError),
}

#[derive(Debug, Clone)]
pub struct ForecastService {
    synthesizer: FieldSynthesizer,
}

impl ForecastService {
    pub fn new(config: &ForecastConfig) -> Self {
        Self {
            synthesizer: FieldSynthesizer::new(config),
        }
    }

    /// Predict one temperature per forecast day, in input order.
    ///
    /// Every day is validated before the first prediction, so a bad day
    /// anywhere in the list yields no partial results.
    pub fn predict_week(
        &self,
        adapter: &TemperatureAdapter,
        request: &ForecastRequest,
    ) -> Result<Vec<f64>, ForecastBatchError> {
        let observations = request.observations()?;
        let mut rng = rand::thread_rng();

        observations
            .iter()
            .map(|observation| {
                let features = self.features(observation, &mut rng);
                Ok(round_to(adapter.predict(features)?, 2))
            })
            .collect()
    }

    /// `[pressure, precip, humidity, dew, avgtemp, avgtemp]`; precipitation
    /// stands in for evaporation and the average temperature fills both the
    /// current and target slots.
    pub fn features<R: Rng + ?Sized>(&self, observation: &ForecastObservation, rng: &mut R) -> [f64; 6] {
        let pressure = observation
            .sealevelpressure
            .unwrap_or_else(|| self.synthesizer.pressure(rng));
        let dew = observation
            .dewpoint_c
            .unwrap_or_else(|| self.synthesizer.dew(rng));

        [
            pressure,
            observation.precip_mm,
            observation.humidity,
            dew,
            observation.avg_temp_c,
            observation.avg_temp_c,
        ]
    }
}
