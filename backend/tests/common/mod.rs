//! Shared fixtures for integration tests
//!
//! Artifacts are tiny hand-fit models whose outputs are easy to predict:
//! - temperature: tomorrow = today's temp + 0.5
//! - rain: rains when humidity > 70
//! - weather pattern: cluster 1 when humidity is above its mean, else 0

#![allow(dead_code)]

use std::path::Path;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use weather_prediction_backend::{
    config::{DataConfig, ForecastConfig, ModelPaths},
    create_app,
    ml::{KMeans, LinearRegressor, LogisticClassifier, Scaler},
    services::{
        ModelRegistry, RainAdapter, SynthesisMode, TemperatureAdapter, WeatherPatternAdapter,
    },
    AppState, Config,
};

pub const WEATHER_CSV: &str = "\
Date,temp,Rainfall,Evaporation,WindGustDir,WindGustSpeed,dew,humidity,precip,sealevelpressure,cloudcover,RainToday
2021-03-01,21.4,0.0,6.2,8,41,9.0,45,0.0,1018.1,20.0,0
2021-03-02,19.8,2.4,4.0,3,52,12.1,82,3.1,1009.4,85.0,1
2021-03-03,18.2,,3.1,5,33,10.0,64,0.0,1012.0,50.0,0
2021-03-04,23.0,0.0,7.4,12,29,8.2,38,0.0,1021.6,10.0,0
2021-03-05,17.5,5.6,2.2,2,61,13.3,91,6.0,1004.9,100.0,1
";

pub fn temperature_scaler() -> Scaler {
    Scaler::Standard {
        mean: vec![0.0; 6],
        scale: vec![1.0; 6],
    }
}

pub fn temperature_model() -> LinearRegressor {
    LinearRegressor {
        coefficients: vec![0.0, 0.0, 0.0, 0.0, 1.0],
        intercept: 0.5,
    }
}

pub fn rain_model() -> LogisticClassifier {
    let mut coefficients = vec![0.0; 10];
    coefficients[5] = 1.0;
    LogisticClassifier {
        coefficients,
        intercept: -70.0,
        threshold: 0.5,
    }
}

pub fn pattern_scaler() -> Scaler {
    Scaler::Standard {
        mean: vec![15.0, 60.0, 5.0, 50.0, 2.0],
        scale: vec![5.0, 20.0, 2.0, 30.0, 4.0],
    }
}

pub fn pattern_model() -> KMeans {
    KMeans {
        centroids: vec![
            vec![0.0, -1.0, 0.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0, 0.0, 0.0],
        ],
    }
}

/// In-memory registry for tests that bypass HTTP
pub fn registry() -> ModelRegistry {
    ModelRegistry {
        temperature: TemperatureAdapter::new(temperature_scaler(), temperature_model()).unwrap(),
        rain: RainAdapter::new(rain_model()).unwrap(),
        weather_pattern: WeatherPatternAdapter::new(pattern_scaler(), pattern_model()).unwrap(),
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) {
    std::fs::write(path, serde_json::to_string(value).unwrap()).unwrap();
}

/// A router backed by artifacts written to a temp dir
pub struct TestApp {
    pub router: Router,
    pub dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_csv(Some(WEATHER_CSV))
    }

    /// `None` leaves the dataset file absent
    pub fn with_csv(csv: Option<&str>) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let models = ModelPaths::in_dir(dir.path());
        write_json(&models.temperature_scaler, &temperature_scaler());
        write_json(&models.temperature_model, &temperature_model());
        write_json(&models.rain_model, &rain_model());
        write_json(&models.pattern_scaler, &pattern_scaler());
        write_json(&models.pattern_model, &pattern_model());

        let weather_csv = dir.path().join("weather.csv");
        if let Some(csv) = csv {
            std::fs::write(&weather_csv, csv).unwrap();
        }

        let config = Config {
            models,
            data: DataConfig { weather_csv },
            forecast: ForecastConfig {
                synthesis: SynthesisMode::Fixed,
                ..ForecastConfig::default()
            },
            ..Config::default()
        };
        let state = AppState::from_config(config).unwrap();

        Self {
            router: create_app(state),
            dir,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.post_raw(uri, body.to_string()).await
    }

    pub async fn post_raw(&self, uri: &str, body: String) -> (StatusCode, Value) {
        let request = Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }
}

pub fn temperature_body(temp: f64, humidity: f64) -> Value {
    json!({
        "sealevelpressure": 1013.0,
        "evaporation": 4.2,
        "humidity": humidity,
        "dew": 8.5,
        "temp": temp
    })
}

pub fn rain_body(humidity: f64) -> Value {
    json!({
        "rainfall": 0.4,
        "evaporation": 3.8,
        "wind_gust_dir": 8.0,
        "wind_gust_speed": 39.0,
        "dew": 9.6,
        "humidity": humidity,
        "precip": 0.2,
        "sealevelpressure": 1014.2,
        "cloudcover": 55.0,
        "rain_today": 0.0
    })
}

pub fn pattern_body(humidity: f64) -> Value {
    json!({
        "temp": 18.0,
        "humidity": humidity,
        "evaporation": 4.0,
        "cloudcover": 60.0,
        "rainfall": 1.0
    })
}

pub fn forecast_day(precip: f64, humidity: f64, temp: f64) -> Value {
    json!({
        "date": "2024-06-01",
        "day": {
            "totalprecip_mm": precip,
            "avghumidity": humidity,
            "avgtemp_c": temp,
            "maxtemp_c": temp + 4.0,
            "condition": {"text": "Partly cloudy"}
        }
    })
}
