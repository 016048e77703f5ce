//! Tests for record decoding

use super::*;
use crate::api::RunReportResponse;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use test_case::test_case;

fn response(body: Value) -> RunReportResponse {
    serde_json::from_value(body).unwrap()
}

fn single_row(dimension: &str, value: &str) -> RunReportResponse {
    response(json!({
        "dimensionHeaders": [{"name": dimension}],
        "metricHeaders": [],
        "rows": [{"dimensionValues": [{"value": value}], "metricValues": []}],
        "rowCount": 1
    }))
}

fn map_single(dimension: &str, value: &str) -> Value {
    let mut mapper = RecordMapper::new("123", "456", "report");
    let records = mapper.map_response(&single_row(dimension, value)).unwrap();
    let snake = crate::discover::to_snake_case(dimension);
    records[0][&snake].clone()
}

// ============================================================================
// RecordMapper Tests
// ============================================================================

#[test]
fn test_row_to_record() {
    let body = response(json!({
        "dimensionHeaders": [{"name": "date"}, {"name": "country"}, {"name": "hour"}],
        "metricHeaders": [
            {"name": "sessions", "type": "TYPE_INTEGER"},
            {"name": "bounceRate", "type": "TYPE_FLOAT"},
            {"name": "averageSessionDuration", "type": "TYPE_SECONDS"},
            {"name": "customEvent:label", "type": "TYPE_UNKNOWN"}
        ],
        "rows": [{
            "dimensionValues": [{"value": "20220906"}, {"value": "Germany"}, {"value": "07"}],
            "metricValues": [{"value": "42"}, {"value": "0.5"}, {"value": "12.25"}, {"value": "x"}]
        }],
        "rowCount": 1
    }));

    let mut mapper = RecordMapper::new("123", "456", "report");
    let records = mapper.map_response(&body).unwrap();
    assert_eq!(records.len(), 1);

    let record = Value::Object(records[0].clone());
    let hash = generate_record_hash(
        "123",
        "456",
        &[
            ("date".to_string(), "20220906".to_string()),
            ("country".to_string(), "Germany".to_string()),
            ("hour".to_string(), "07".to_string()),
        ],
    );
    assert_eq!(
        record,
        json!({
            "date": "2022-09-06T00:00:00.000000Z",
            "country": "Germany",
            "hour": 7,
            "sessions": 42,
            "bounce_rate": 0.5,
            "average_session_duration": 12.25,
            "custom_event_label": "x",
            "property_id": "123",
            "account_id": "456",
            "_sdc_record_hash": hash
        })
    );
}

#[test_case("date", "20220906", json!("2022-09-06T00:00:00.000000Z") ; "date")]
#[test_case("firstSessionDate", "20211231", json!("2021-12-31T00:00:00.000000Z") ; "first session date")]
#[test_case("dateHour", "2022090613", json!("2022-09-06T13:00:00.000000Z") ; "date hour")]
#[test_case("dateHourMinute", "202209061345", json!("2022-09-06T13:45:00.000000Z") ; "date hour minute")]
#[test_case("date", "(other)", json!("(other)") ; "other passes through")]
#[test_case("date", "20221340", json!("20221340") ; "invalid date passes through")]
#[test_case("dateHour", "2022090625", json!("2022090625") ; "invalid hour passes through")]
fn test_datetime_normalization(dimension: &str, raw: &str, expected: Value) {
    assert_eq!(map_single(dimension, raw), expected);
}

/// Log output collected by a test subscriber
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_other_row_warns_once_per_mapper() {
    let body = response(json!({
        "dimensionHeaders": [{"name": "date"}],
        "metricHeaders": [],
        "rows": [
            {"dimensionValues": [{"value": "(other)"}], "metricValues": []},
            {"dimensionValues": [{"value": "20220906"}], "metricValues": []},
            {"dimensionValues": [{"value": "(other)"}], "metricValues": []}
        ],
        "rowCount": 3
    }));

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let mut mapper = RecordMapper::new("123", "456", "events_report");
        mapper.map_response(&body).unwrap();
        mapper.map_response(&body).unwrap();

        RecordMapper::new("123", "456", "tech_details")
            .map_response(&body)
            .unwrap();
    });

    let text = logs.text();
    assert_eq!(text.matches("cardinality limit").count(), 2);
    assert_eq!(text.matches("report=events_report").count(), 1);
    assert_eq!(text.matches("report=tech_details").count(), 1);
}

#[test_case("year", "2022", json!(2022) ; "integer dimension")]
#[test_case("year", "(not set)", Value::Null ; "non numeric integer dimension")]
#[test_case("dayOfWeek", "3", json!(3) ; "day of week")]
#[test_case("city", "0042", json!("0042") ; "string dimension keeps text")]
fn test_dimension_coercion(dimension: &str, raw: &str, expected: Value) {
    assert_eq!(map_single(dimension, raw), expected);
}

#[test]
fn test_non_numeric_metric_becomes_null() {
    let body = response(json!({
        "dimensionHeaders": [],
        "metricHeaders": [
            {"name": "sessions", "type": "TYPE_INTEGER"},
            {"name": "bounceRate", "type": "TYPE_FLOAT"}
        ],
        "rows": [{"dimensionValues": [], "metricValues": [{"value": "n/a"}, {"value": "NaN"}]}],
        "rowCount": 1
    }));
    let records = RecordMapper::new("1", "2", "r").map_response(&body).unwrap();
    assert_eq!(records[0]["sessions"], Value::Null);
    assert_eq!(records[0]["bounce_rate"], Value::Null);
}

#[test]
fn test_hash_uses_raw_values() {
    let mut mapper = RecordMapper::new("123456789", "123456", "report");
    let records = mapper.map_response(&single_row("date", "20220906")).unwrap();
    let expected = generate_record_hash(
        "123456789",
        "123456",
        &[("date".to_string(), "20220906".to_string())],
    );
    assert_eq!(records[0]["_sdc_record_hash"], json!(expected));
}

#[test]
fn test_mismatched_row_is_decode_error() {
    let body = response(json!({
        "dimensionHeaders": [{"name": "date"}, {"name": "country"}],
        "rows": [{"dimensionValues": [{"value": "20220906"}]}],
        "rowCount": 1
    }));
    let err = RecordMapper::new("1", "2", "r").map_response(&body).unwrap_err();
    assert!(err.to_string().contains("dimension"));
}

#[test]
fn test_empty_response_maps_to_nothing() {
    let body = response(json!({"rowCount": 0}));
    assert!(RecordMapper::new("1", "2", "r")
        .map_response(&body)
        .unwrap()
        .is_empty());
}
