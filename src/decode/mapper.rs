//! Row to record mapping
//!
//! Turns `runReport` rows into records keyed by canonical field names, with
//! typed numbers, normalized dates and the record hash.

use super::hash::generate_record_hash;
use crate::api::{DimensionHeader, MetricHeader, Row, RunReportResponse};
use crate::discover::{to_snake_case, FLOAT_TYPES, INTEGER_DIMENSIONS};
use crate::error::{Error, Result};
use crate::types::{JsonValue, Record, ACCOUNT_ID_FIELD, PROPERTY_ID_FIELD, RECORD_HASH_FIELD};
use chrono::NaiveDate;
use serde_json::Number;
use tracing::warn;

/// Value GA4 substitutes when a report exceeds its cardinality limits
pub const OTHER_ROW_VALUE: &str = "(other)";

/// Output format of normalized dates
pub const RECORD_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Maps the rows of one report
///
/// One mapper lives for one report in one run; the `(other)` warning is
/// logged at most once per mapper.
#[derive(Debug, Clone)]
pub struct RecordMapper {
    property_id: String,
    account_id: String,
    report: String,
    warned_other: bool,
}

impl RecordMapper {
    pub fn new(
        property_id: impl Into<String>,
        account_id: impl Into<String>,
        report: impl Into<String>,
    ) -> Self {
        Self {
            property_id: property_id.into(),
            account_id: account_id.into(),
            report: report.into(),
            warned_other: false,
        }
    }

    /// Map every row of a response
    pub fn map_response(&mut self, response: &RunReportResponse) -> Result<Vec<Record>> {
        response
            .rows
            .iter()
            .map(|row| {
                self.row_to_record(&response.dimension_headers, &response.metric_headers, row)
            })
            .collect()
    }

    /// Map a single row
    pub fn row_to_record(
        &mut self,
        dimension_headers: &[DimensionHeader],
        metric_headers: &[MetricHeader],
        row: &Row,
    ) -> Result<Record> {
        if row.dimension_values.len() != dimension_headers.len()
            || row.metric_values.len() != metric_headers.len()
        {
            return Err(Error::decode(format!(
                "Row has {} dimension and {} metric values for {} and {} headers",
                row.dimension_values.len(),
                row.metric_values.len(),
                dimension_headers.len(),
                metric_headers.len()
            )));
        }

        let mut record = Record::new();
        let mut pairs = Vec::with_capacity(dimension_headers.len());

        for (header, cell) in dimension_headers.iter().zip(&row.dimension_values) {
            let raw = cell.value.as_str();
            pairs.push((header.name.clone(), raw.to_string()));

            let value = if INTEGER_DIMENSIONS.contains(&header.name.as_str()) {
                self.integer_value(&header.name, raw)
            } else if let Some(kind) = DateKind::for_dimension(&header.name) {
                self.datetime_value(kind, raw)
            } else {
                JsonValue::String(raw.to_string())
            };
            record.insert(to_snake_case(&header.name), value);
        }

        for (header, cell) in metric_headers.iter().zip(&row.metric_values) {
            let raw = cell.value.as_str();
            let value = if header.metric_type == "TYPE_INTEGER" {
                self.integer_value(&header.name, raw)
            } else if FLOAT_TYPES.contains(&header.metric_type.as_str()) {
                self.float_value(&header.name, raw)
            } else {
                JsonValue::String(raw.to_string())
            };
            record.insert(to_snake_case(&header.name), value);
        }

        record.insert(
            PROPERTY_ID_FIELD.to_string(),
            JsonValue::String(self.property_id.clone()),
        );
        record.insert(
            ACCOUNT_ID_FIELD.to_string(),
            JsonValue::String(self.account_id.clone()),
        );
        record.insert(
            RECORD_HASH_FIELD.to_string(),
            JsonValue::String(generate_record_hash(
                &self.property_id,
                &self.account_id,
                &pairs,
            )),
        );

        Ok(record)
    }

    fn integer_value(&self, field: &str, raw: &str) -> JsonValue {
        match raw.trim().parse::<i64>() {
            Ok(n) => JsonValue::from(n),
            Err(_) => {
                warn!(report = %self.report, field, value = raw, "Non-integer value, emitting null");
                JsonValue::Null
            }
        }
    }

    fn float_value(&self, field: &str, raw: &str) -> JsonValue {
        match raw.trim().parse::<f64>().ok().and_then(Number::from_f64) {
            Some(n) => JsonValue::Number(n),
            None => {
                warn!(report = %self.report, field, value = raw, "Non-numeric value, emitting null");
                JsonValue::Null
            }
        }
    }

    fn datetime_value(&mut self, kind: DateKind, raw: &str) -> JsonValue {
        match kind.parse(raw) {
            Some(formatted) => JsonValue::String(formatted),
            None => {
                if raw == OTHER_ROW_VALUE && !self.warned_other {
                    self.warned_other = true;
                    warn!(
                        report = %self.report,
                        "Report returned an \"(other)\" row; the query exceeded the cardinality \
                         limit and rows were aggregated"
                    );
                }
                JsonValue::String(raw.to_string())
            }
        }
    }
}

/// Compact date layouts used by the datetime dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateKind {
    /// `YYYYMMDD`
    Day,
    /// `YYYYMMDDHH`
    Hour,
    /// `YYYYMMDDHHMM`
    Minute,
}

impl DateKind {
    fn for_dimension(api_name: &str) -> Option<Self> {
        match api_name {
            "date" | "firstSessionDate" => Some(Self::Day),
            "dateHour" => Some(Self::Hour),
            "dateHourMinute" => Some(Self::Minute),
            _ => None,
        }
    }

    fn len(self) -> usize {
        match self {
            Self::Day => 8,
            Self::Hour => 10,
            Self::Minute => 12,
        }
    }

    fn parse(self, raw: &str) -> Option<String> {
        if raw.len() != self.len() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let date = NaiveDate::parse_from_str(&raw[..8], "%Y%m%d").ok()?;
        let hour = if raw.len() >= 10 { raw[8..10].parse().ok()? } else { 0 };
        let minute = if raw.len() >= 12 { raw[10..12].parse().ok()? } else { 0 };

        date.and_hms_opt(hour, minute, 0)
            .map(|dt| dt.format(RECORD_DATETIME_FORMAT).to_string())
    }
}
