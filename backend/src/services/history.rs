//! Historical weather dataset
//!
//! The CSV file is read from disk on every call; there is no cache. Rows
//! with a missing value in any column, or an unparseable value in a column
//! the models read, are dropped.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use shared::{parse_iso_date, DateRange, HistoricalRecord};
use thiserror::Error;

/// Errors raised while reading the historical dataset
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to open {path}: {source}")]
    Open { path: PathBuf, source: csv::Error },

    #[error("Malformed row at line {line}: {reason}")]
    Parse { line: u64, reason: String },

    #[error("Data loading task failed: {0}")]
    Task(String),
}

/// One raw CSV row; every consumed column may be missing
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Date", default, deserialize_with = "csv::invalid_option")]
    date: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    temp: Option<f64>,
    #[serde(rename = "Rainfall", default, deserialize_with = "csv::invalid_option")]
    rainfall: Option<f64>,
    #[serde(rename = "Evaporation", default, deserialize_with = "csv::invalid_option")]
    evaporation: Option<f64>,
    #[serde(rename = "WindGustDir", default, deserialize_with = "csv::invalid_option")]
    wind_gust_dir: Option<f64>,
    #[serde(rename = "WindGustSpeed", default, deserialize_with = "csv::invalid_option")]
    wind_gust_speed: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    dew: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    humidity: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    precip: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    sealevelpressure: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    cloudcover: Option<f64>,
    #[serde(rename = "RainToday", default, deserialize_with = "csv::invalid_option")]
    rain_today: Option<f64>,
}

impl RawRow {
    fn into_record(self) -> Option<HistoricalRecord> {
        Some(HistoricalRecord {
            date: parse_row_date(self.date.as_deref()?)?,
            temp: finite(self.temp?)?,
            rainfall: finite(self.rainfall?)?,
            evaporation: finite(self.evaporation?)?,
            wind_gust_dir: finite(self.wind_gust_dir?)?,
            wind_gust_speed: finite(self.wind_gust_speed?)?,
            dew: finite(self.dew?)?,
            humidity: finite(self.humidity?)?,
            precip: finite(self.precip?)?,
            sealevelpressure: finite(self.sealevelpressure?)?,
            cloudcover: finite(self.cloudcover?)?,
            rain_today: finite(self.rain_today?)?,
        })
    }
}

/// Cell values treated as missing
const MISSING_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "NULL", "null", "None"];

fn is_missing(field: &str) -> bool {
    MISSING_MARKERS.contains(&field)
}

fn parse_error(err: csv::Error) -> DataError {
    DataError::Parse {
        line: err.position().map_or(0, |p| p.line()),
        reason: err.to_string(),
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

// Accepts "2020-01-01" as well as timestamp forms like "2020-01-01 00:00:00".
fn parse_row_date(value: &str) -> Option<NaiveDate> {
    let day = value.split(|c| c == 'T' || c == ' ').next()?;
    parse_iso_date(day).ok()
}

/// Read-only source of historical daily observations
#[derive(Debug, Clone)]
pub struct HistoricalDataSource {
    path: PathBuf,
}

impl HistoricalDataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Complete rows within `range`, in file order
    pub fn load(&self, range: DateRange) -> Result<Vec<HistoricalRecord>, DataError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|source| DataError::Open {
                path: self.path.clone(),
                source,
            })?;

        let headers = reader.headers().map_err(parse_error)?.clone();

        let mut records = Vec::new();
        let mut dropped = 0usize;
        for row in reader.records() {
            let row = row.map_err(parse_error)?;
            // A gap in any column drops the row, read or not
            if row.iter().any(is_missing) {
                dropped += 1;
                continue;
            }
            let raw: RawRow = row.deserialize(Some(&headers)).map_err(parse_error)?;
            match raw.into_record() {
                Some(record) if range.contains(record.date) => records.push(record),
                Some(_) => {}
                None => dropped += 1,
            }
        }

        tracing::debug!(
            "Loaded {} weather records from {} ({} incomplete rows dropped)",
            records.len(),
            self.path.display(),
            dropped
        );
        Ok(records)
    }

    /// [`load`](Self::load) on the blocking thread pool
    pub async fn fetch(&self, range: DateRange) -> Result<Vec<HistoricalRecord>, DataError> {
        let source = self.clone();
        tokio::task::spawn_blocking(move || source.load(range))
            .await
            .map_err(|e| DataError::Task(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "Date,MinTemp,temp,Rainfall,Evaporation,WindGustDir,WindGustSpeed,dew,humidity,precip,sealevelpressure,cloudcover,RainToday";

    fn write_csv(rows: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        file
    }

    fn date(s: &str) -> NaiveDate {
        parse_iso_date(s).unwrap()
    }

    #[test]
    fn test_load_all_rows() {
        let file = write_csv(&[
            "2020-01-01,11.0,20.5,0.0,5.4,8,39,9.1,52,0.0,1016.2,25.0,0",
            "2020-01-02,12.5,22.1,1.2,6.0,3,44,10.3,60,1.4,1012.8,70.0,1",
        ]);
        let source = HistoricalDataSource::new(file.path());
        let records = source.load(DateRange::default()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, date("2020-01-01"));
        assert_eq!(records[1].temp, 22.1);
        assert_eq!(records[1].rain_today, 1.0);
    }

    #[test]
    fn test_incomplete_rows_dropped() {
        let file = write_csv(&[
            "2020-01-01,11.0,20.5,0.0,5.4,8,39,9.1,52,0.0,1016.2,25.0,0",
            "2020-01-02,12.5,22.1,,6.0,3,44,10.3,60,1.4,1012.8,70.0,1",
            "2020-01-03,12.5,NA,0.0,6.0,3,44,10.3,60,1.4,1012.8,70.0,1",
            ",12.5,22.1,0.0,6.0,3,44,10.3,60,1.4,1012.8,70.0,1",
        ]);
        let records = HistoricalDataSource::new(file.path())
            .load(DateRange::default())
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, date("2020-01-01"));
    }

    #[test]
    fn test_blank_unused_column_drops_row() {
        let file = write_csv(&[
            "2021-03-01,,21.4,0.0,6.2,8,41,9.0,45,0.0,1018.1,20.0,0",
            "2021-03-02,10.1,19.8,2.4,4.0,3,52,12.1,82,3.1,1009.4,85.0,1",
            "2021-03-03,NaN,18.2,0.0,3.1,5,33,10.0,64,0.0,1012.0,50.0,0",
        ]);
        let records = HistoricalDataSource::new(file.path())
            .load(DateRange::default())
            .unwrap();

        let dates: Vec<_> = records.iter().map(|r| r.date_key()).collect();
        assert_eq!(dates, vec!["2021-03-02"]);
    }

    #[test]
    fn test_range_filter_inclusive_and_ordered() {
        let file = write_csv(&[
            "2020-01-01,11.0,20.5,0.0,5.4,8,39,9.1,52,0.0,1016.2,25.0,0",
            "2020-01-02,12.5,22.1,1.2,6.0,3,44,10.3,60,1.4,1012.8,70.0,1",
            "2020-01-03,10.0,18.0,0.0,4.0,5,30,7.0,48,0.0,1019.0,10.0,0",
            "2020-01-04,10.0,17.0,0.0,4.0,5,30,7.0,48,0.0,1019.0,10.0,0",
        ]);
        let range = DateRange::from_bounds(Some("2020-01-02"), Some("2020-01-03")).unwrap();
        let records = HistoricalDataSource::new(file.path()).load(range).unwrap();

        let dates: Vec<_> = records.iter().map(|r| r.date_key()).collect();
        assert_eq!(dates, vec!["2020-01-02", "2020-01-03"]);
    }

    #[test]
    fn test_timestamp_dates_accepted() {
        let file = write_csv(&["2020-01-01 00:00:00,11.0,20.5,0.0,5.4,8,39,9.1,52,0.0,1016.2,25.0,0"]);
        let records = HistoricalDataSource::new(file.path())
            .load(DateRange::default())
            .unwrap();
        assert_eq!(records[0].date, date("2020-01-01"));
    }

    #[test]
    fn test_missing_file() {
        let source = HistoricalDataSource::new("no/such/weather.csv");
        assert!(matches!(
            source.load(DateRange::default()),
            Err(DataError::Open { .. })
        ));
    }

    #[test]
    fn test_ragged_row_fails_load() {
        let file = write_csv(&["2020-01-01,11.0,20.5"]);
        let result = HistoricalDataSource::new(file.path()).load(DateRange::default());
        assert!(matches!(result, Err(DataError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_fetch_runs_off_thread() {
        let file = write_csv(&["2020-01-01,11.0,20.5,0.0,5.4,8,39,9.1,52,0.0,1016.2,25.0,0"]);
        let records = HistoricalDataSource::new(file.path())
            .fetch(DateRange::default())
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
    }
}
