//! Visualization integration tests
//!
//! Tests for the historical endpoints including:
//! - Date filtering and chronological order
//! - Empty ranges: 200 for the chart, 404 for model distributions
//! - Query and dataset failures

mod common;

use std::io::Write;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use common::*;
use serde_json::json;

/// Log sink shared with the subscriber under test
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

#[tokio::test]
async fn test_temperature_series_unfiltered() {
    let app = TestApp::new();
    let (status, body) = app.get("/visualize/temperature").await;
    assert_eq!(status, StatusCode::OK);

    // 2021-03-03 is incomplete and dropped
    assert_eq!(
        body["chart_data"]["temperature_data"],
        json!([
            {"date": "2021-03-01", "temperature": 21.4},
            {"date": "2021-03-02", "temperature": 19.8},
            {"date": "2021-03-04", "temperature": 23.0},
            {"date": "2021-03-05", "temperature": 17.5}
        ])
    );
}

#[tokio::test]
async fn test_temperature_series_filtered() {
    let app = TestApp::new();
    let (status, body) = app
        .get("/visualize/temperature?start_date=2021-03-02&end_date=2021-03-04")
        .await;
    assert_eq!(status, StatusCode::OK);
    let data = body["chart_data"]["temperature_data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["date"], "2021-03-02");
    assert_eq!(data[1]["date"], "2021-03-04");
}

#[tokio::test]
async fn test_temperature_single_bound_ignored() {
    let app = TestApp::new();
    let (status, body) = app
        .get("/visualize/temperature?start_date=2021-03-05")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["chart_data"]["temperature_data"]
            .as_array()
            .unwrap()
            .len(),
        4
    );
}

#[tokio::test]
async fn test_empty_range_temperature_ok_rain_not_found() {
    let app = TestApp::new();
    let query = "start_date=2020-01-01&end_date=2020-01-01";

    let (status, body) = app.get(&format!("/visualize/temperature?{}", query)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["chart_data"]["temperature_data"], json!([]));

    let (status, body) = app.get(&format!("/visualize/rain?{}", query)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "No weather data found for given date range");

    let (status, _) = app.get(&format!("/visualize/cluster?{}", query)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rain_distribution() {
    let app = TestApp::new();
    let (status, body) = app
        .get("/visualize/rain?start_date=2021-03-01&end_date=2021-03-31")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_days"], 4);
    assert_eq!(
        body["probability_by_date"],
        json!({
            "2021-03-01": 0.0,
            "2021-03-02": 1.0,
            "2021-03-04": 0.0,
            "2021-03-05": 1.0
        })
    );
}

#[tokio::test]
async fn test_cluster_distribution() {
    let app = TestApp::new();
    let (status, body) = app
        .get("/visualize/cluster?start_date=2021-03-01&end_date=2021-03-04")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_days"], 3);
    assert_eq!(
        body["cluster_by_date"],
        json!({"2021-03-01": 0, "2021-03-02": 1, "2021-03-04": 0})
    );
}

#[tokio::test]
async fn test_rain_requires_both_bounds() {
    let app = TestApp::new();
    let (status, body) = app.get("/visualize/rain?start_date=2021-03-01").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_malformed_date_is_bad_request() {
    let app = TestApp::new();
    let (status, body) = app
        .get("/visualize/cluster?start_date=03/01/2021&end_date=2021-03-31")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("03/01/2021"));
}

#[tokio::test]
async fn test_missing_dataset_is_server_error() {
    let app = TestApp::with_csv(None);

    let (status, body) = app.get("/visualize/temperature").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Error loading weather data");

    let (status, body) = app
        .get("/visualize/rain?start_date=2021-03-01&end_date=2021-03-31")
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Error analyzing rain probabilities");
}

#[test]
fn test_history_fetch_outside_async_test() {
    let app = TestApp::new();
    let (status, body) = tokio_test::block_on(
        app.get("/visualize/temperature?start_date=2021-03-05&end_date=2021-03-05"),
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["chart_data"]["temperature_data"],
        json!([{"date": "2021-03-05", "temperature": 17.5}])
    );
}

#[test]
fn test_blank_unused_column_excluded_from_charts() {
    let csv = "\
Date,MinTemp,temp,Rainfall,Evaporation,WindGustDir,WindGustSpeed,dew,humidity,precip,sealevelpressure,cloudcover,RainToday
2021-03-01,,21.4,0.0,6.2,8,41,9.0,45,0.0,1018.1,20.0,0
2021-03-02,11.2,19.8,2.4,4.0,3,52,12.1,82,3.1,1009.4,85.0,1
";
    let app = TestApp::with_csv(Some(csv));

    let (status, body) = tokio_test::block_on(app.get("/visualize/temperature"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["chart_data"]["temperature_data"],
        json!([{"date": "2021-03-02", "temperature": 19.8}])
    );

    let (status, body) = tokio_test::block_on(
        app.get("/visualize/rain?start_date=2021-03-01&end_date=2021-03-31"),
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_days"], 1);
    assert!(body["probability_by_date"].get("2021-03-01").is_none());
}

#[test]
fn test_temperature_series_logs_bounds() {
    let app = TestApp::new();
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    let (status, _) = tracing::subscriber::with_default(subscriber, || {
        tokio_test::block_on(
            app.get("/visualize/temperature?start_date=2021-03-02&end_date=2021-03-04"),
        )
    });
    assert_eq!(status, StatusCode::OK);

    let output = logs.contents();
    assert!(output.contains("Getting temperature series"));
    assert!(output.contains("2021-03-02"));
    assert!(output.contains("2021-03-04"));
}
