//! Tap configuration
//!
//! The config is a JSON object supplied by the operator. Everything is
//! validated here, before any network call, so a bad config fails the run
//! at startup.

use crate::error::{Error, Result};
use crate::reports::is_premade_id;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;

/// Default GA4 Data API host
pub const DEFAULT_API_BASE_URL: &str = "https://analyticsdata.googleapis.com";

/// Conversion windows (in days) accepted by the tap
pub const ALLOWED_CONVERSION_WINDOWS: [u32; 3] = [30, 60, 90];

/// Days per request when `request_window_size` is not configured
pub const DEFAULT_REQUEST_WINDOW_SIZE: u32 = 1;

// ============================================================================
// Report Definitions
// ============================================================================

/// A custom report defined by the operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDefinition {
    /// Stable stream id
    pub id: String,
    /// Display name
    pub name: String,
    /// Dimension API names selected by default
    #[serde(default)]
    pub dimensions: Vec<String>,
    /// Metric API names selected by default
    #[serde(default)]
    pub metrics: Vec<String>,
}

// ============================================================================
// Tap Config
// ============================================================================

/// Validated tap configuration
#[derive(Debug, Clone)]
pub struct TapConfig {
    /// Earliest date to extract
    pub start_date: NaiveDate,
    /// Optional last date to extract (defaults to today)
    pub end_date: Option<NaiveDate>,
    /// Trailing days that are re-extracted on every run
    pub conversion_window: u32,
    /// Days covered by one report request
    pub request_window_size: u32,
    /// GA4 property id
    pub property_id: String,
    /// GA4 account id
    pub account_id: String,
    /// Operator-defined reports
    pub report_definitions: Vec<ReportDefinition>,
    /// OAuth2 client id
    pub oauth_client_id: Option<String>,
    /// OAuth2 client secret
    pub oauth_client_secret: Option<String>,
    /// OAuth2 refresh token
    pub refresh_token: Option<String>,
    /// Static access token, used instead of the refresh flow when present
    pub access_token: Option<String>,
    /// OAuth2 token endpoint override
    pub token_url: Option<String>,
    /// Data API base URL
    pub api_base_url: String,
    /// User agent override
    pub user_agent: Option<String>,
}

impl TapConfig {
    /// Load and validate a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&contents)
            .map_err(|e| Error::config(format!("Invalid config JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Validate a config from its JSON form
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(obj) = value else {
            return Err(Error::config("Config must be a JSON object"));
        };

        let start_date = parse_date("start_date", &required_string(&obj, "start_date")?)?;
        let end_date = optional_string(&obj, "end_date")?
            .map(|s| parse_date("end_date", &s))
            .transpose()?;

        if let Some(end) = end_date {
            if end < start_date {
                return Err(Error::invalid_value(
                    "end_date",
                    format!("{end} is before start_date {start_date}"),
                ));
            }
        }

        let conversion_window = parse_conversion_window(obj.get("conversion_window"))?;
        let request_window_size = match obj.get("request_window_size") {
            None | Some(Value::Null) => DEFAULT_REQUEST_WINDOW_SIZE,
            Some(v) => {
                let size = parse_positive_int("request_window_size", v)?;
                if size == 0 {
                    return Err(Error::invalid_value(
                        "request_window_size",
                        "must be at least 1",
                    ));
                }
                size
            }
        };

        Ok(Self {
            start_date,
            end_date,
            conversion_window,
            request_window_size,
            property_id: required_string(&obj, "property_id")?,
            account_id: required_string(&obj, "account_id")?,
            report_definitions: parse_report_definitions(obj.get("report_definitions"))?,
            oauth_client_id: optional_string(&obj, "oauth_client_id")?,
            oauth_client_secret: optional_string(&obj, "oauth_client_secret")?,
            refresh_token: optional_string(&obj, "refresh_token")?,
            access_token: optional_string(&obj, "access_token")?,
            token_url: optional_string(&obj, "token_url")?,
            api_base_url: optional_string(&obj, "api_base_url")?
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            user_agent: optional_string(&obj, "user_agent")?,
        })
    }
}

// ============================================================================
// Field parsers
// ============================================================================

/// Read a string-ish field. Numbers are accepted because ids are often
/// pasted as bare integers.
fn optional_string(obj: &Map<String, Value>, field: &str) -> Result<Option<String>> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim().to_string())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(Error::invalid_value(
            field,
            format!("expected a string, got {other}"),
        )),
    }
}

fn required_string(obj: &Map<String, Value>, field: &str) -> Result<String> {
    optional_string(obj, field)?.ok_or_else(|| Error::missing_field(field))
}

/// Parse a `YYYY-MM-DD` or RFC 3339 timestamp into a UTC calendar date
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| {
            Error::invalid_value(
                field,
                format!("'{raw}' is not a YYYY-MM-DD date or RFC 3339 timestamp"),
            )
        })
}

fn parse_positive_int(field: &str, value: &Value) -> Result<u32> {
    let parsed = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    parsed
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| Error::invalid_value(field, format!("expected an integer, got {value}")))
}

fn parse_conversion_window(value: Option<&Value>) -> Result<u32> {
    let value = match value {
        None | Some(Value::Null) => return Err(Error::missing_field("conversion_window")),
        Some(v) => v,
    };
    let days = parse_positive_int("conversion_window", value)?;
    if !ALLOWED_CONVERSION_WINDOWS.contains(&days) {
        return Err(Error::invalid_value(
            "conversion_window",
            format!("{days} is not one of {ALLOWED_CONVERSION_WINDOWS:?}"),
        ));
    }
    Ok(days)
}

/// Report definitions arrive either as a list or as a JSON-encoded string
/// of that list.
fn parse_report_definitions(value: Option<&Value>) -> Result<Vec<ReportDefinition>> {
    let definitions: Vec<ReportDefinition> = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(_)) => serde_json::from_value(value.cloned().unwrap_or_default())
            .map_err(|e| Error::invalid_value("report_definitions", e.to_string()))?,
        Some(Value::String(s)) => serde_json::from_str(s).map_err(|e| {
            Error::invalid_value(
                "report_definitions",
                format!("Error parsing report_definitions string: {e}"),
            )
        })?,
        Some(other) => {
            return Err(Error::invalid_value(
                "report_definitions",
                format!("expected a list or JSON string, got {other}"),
            ))
        }
    };

    let mut seen = HashSet::new();
    for definition in &definitions {
        if definition.id.trim().is_empty() {
            return Err(Error::invalid_value(
                "report_definitions",
                format!("report '{}' has an empty id", definition.name),
            ));
        }
        if is_premade_id(&definition.id) {
            return Err(Error::invalid_value(
                "report_definitions",
                format!("report id '{}' is taken by a premade report", definition.id),
            ));
        }
        if !seen.insert(definition.id.clone()) {
            return Err(Error::invalid_value(
                "report_definitions",
                format!("report id '{}' is defined more than once", definition.id),
            ));
        }
    }
    Ok(definitions)
}
