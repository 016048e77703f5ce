//! Tests for the Data API client

use super::*;
use crate::http::{HttpClient, HttpClientConfig, RetryPolicy};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer, retry: RetryPolicy) -> DataApiClient {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .no_rate_limit()
        .build();
    DataApiClient::new(HttpClient::with_config(config).unwrap(), retry)
}

fn report_request() -> RunReportRequest {
    RunReportRequest {
        property_id: "123".to_string(),
        dimensions: vec![Dimension {
            name: "date".to_string(),
        }],
        metrics: vec![Metric {
            name: "sessions".to_string(),
        }],
        date_ranges: vec![DateRange {
            start_date: "2022-09-01".to_string(),
            end_date: "2022-09-07".to_string(),
        }],
        limit: 100_000,
        offset: 0,
        return_property_quota: true,
        order_bys: vec![OrderBy::numeric("date")],
        dimension_filter: Some(FilterExpression::string_equals(
            "isConversionEvent",
            "true",
        )),
    }
}

#[tokio::test]
async fn test_get_metadata() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1beta/properties/123/metadata"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "properties/123/metadata",
            "dimensions": [
                {"apiName": "country", "uiName": "Country", "category": "Geography"}
            ],
            "metrics": [
                {"apiName": "sessions", "type": "TYPE_INTEGER", "category": "Session"},
                {"apiName": "averageSessionDuration", "type": "TYPE_SECONDS"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server, RetryPolicy::no_backoff(1));
    let metadata = api.get_metadata("123").await.unwrap();

    assert_eq!(metadata.dimensions.len(), 1);
    assert_eq!(metadata.dimensions[0].category, "Geography");
    assert_eq!(metadata.metrics[1].metric_type, "TYPE_SECONDS");
    assert_eq!(metadata.metrics[1].category, "");
}

#[tokio::test]
async fn test_check_compatibility_sends_single_field_probe() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/properties/123:checkCompatibility"))
        .and(body_json(json!({
            "metrics": [{"name": "sessions"}],
            "compatibilityFilter": "INCOMPATIBLE"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dimensionCompatibilities": [
                {"dimensionMetadata": {"apiName": "cohort"}, "compatibility": "INCOMPATIBLE"}
            ],
            "metricCompatibilities": [
                {"metricMetadata": {"apiName": "cohortActiveUsers"}, "compatibility": "INCOMPATIBLE"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server, RetryPolicy::no_backoff(1));
    let response = api
        .check_compatibility("123", &CompatibilityRequest::for_metric("sessions"))
        .await
        .unwrap();

    assert_eq!(
        response.dimension_compatibilities[0]
            .dimension_metadata
            .api_name,
        "cohort"
    );
    assert_eq!(
        response.metric_compatibilities[0].metric_metadata.api_name,
        "cohortActiveUsers"
    );
}

#[tokio::test]
async fn test_run_report_body_and_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/properties/123:runReport"))
        .and(body_json(json!({
            "dimensions": [{"name": "date"}],
            "metrics": [{"name": "sessions"}],
            "dateRanges": [{"startDate": "2022-09-01", "endDate": "2022-09-07"}],
            "limit": 100000,
            "offset": 0,
            "returnPropertyQuota": true,
            "orderBys": [{"dimension": {"dimensionName": "date", "orderType": "NUMERIC"}}],
            "dimensionFilter": {
                "filter": {"fieldName": "isConversionEvent", "stringFilter": {"value": "true"}}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dimensionHeaders": [{"name": "date"}],
            "metricHeaders": [{"name": "sessions", "type": "TYPE_INTEGER"}],
            "rows": [
                {"dimensionValues": [{"value": "20220901"}], "metricValues": [{"value": "17"}]}
            ],
            "rowCount": 1,
            "propertyQuota": {"tokensPerHour": {"consumed": 12, "remaining": 39988}}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server, RetryPolicy::no_backoff(1));
    let response = api.run_report(&report_request()).await.unwrap();

    assert_eq!(response.row_count, 1);
    assert_eq!(response.rows[0].metric_values[0].value, "17");
    assert_eq!(response.tokens_consumed(), 12);
}

#[tokio::test]
async fn test_run_report_retries_server_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/properties/123:runReport"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1beta/properties/123:runReport"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"rowCount": 0})))
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server, RetryPolicy::no_backoff(5));
    let response = api.run_report(&report_request()).await.unwrap();
    assert_eq!(response.row_count, 0);
    assert!(response.rows.is_empty());
}

#[tokio::test]
async fn test_run_report_exhausts_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/properties/123:runReport"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server, RetryPolicy::no_backoff(3));
    let err = api.run_report(&report_request()).await.unwrap_err();
    assert!(matches!(
        err,
        crate::Error::MaxRetriesExceeded { max_tries: 3, .. }
    ));
}

#[test]
fn test_compatibility_request_shapes() {
    let dim = serde_json::to_value(CompatibilityRequest::for_dimension("country")).unwrap();
    assert_eq!(
        dim,
        json!({"dimensions": [{"name": "country"}], "compatibilityFilter": "INCOMPATIBLE"})
    );
}

#[test]
fn test_tokens_consumed_without_quota() {
    assert_eq!(RunReportResponse::default().tokens_consumed(), 0);
}
