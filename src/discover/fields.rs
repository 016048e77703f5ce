//! Property fields
//!
//! Turns the property metadata into typed [`Field`]s, dropping categories the
//! tap cannot request and flagging metrics whose names it cannot handle.

use crate::api::{DimensionMetadata, MetricMetadata, ReportingApi};
use crate::error::Result;
use crate::schema::FieldType;
use crate::types::FieldBehavior;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

/// Categories that need extra request data (cohort specs) and are skipped
pub const INCOMPATIBLE_CATEGORIES: &[&str] = &["Cohort"];

/// Dimensions whose values are always whole numbers
pub const INTEGER_DIMENSIONS: &[&str] = &[
    "cohortNthDay",
    "cohortNthMonth",
    "cohortNthWeek",
    "day",
    "dayOfWeek",
    "hour",
    "minute",
    "month",
    "nthDay",
    "nthHour",
    "nthMinute",
    "nthMonth",
    "nthWeek",
    "nthYear",
    "percentScrolled",
    "week",
    "year",
];

/// Dimensions holding compact dates
pub const DATETIME_DIMENSIONS: &[&str] = &["date", "dateHour", "dateHourMinute", "firstSessionDate"];

/// Metric types emitted as floating point numbers
pub const FLOAT_TYPES: &[&str] = &[
    "TYPE_FLOAT",
    "TYPE_SECONDS",
    "TYPE_MILLISECONDS",
    "TYPE_MINUTES",
    "TYPE_HOURS",
    "TYPE_STANDARD",
    "TYPE_CURRENCY",
    "TYPE_FEET",
    "TYPE_MILES",
    "TYPE_METERS",
    "TYPE_KILOMETERS",
];

static VALID_METRIC_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_:\[\]]+$").expect("metric name pattern is valid"));

/// A dimension or metric of the property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Name used to request the field
    pub api_name: String,
    /// Canonical snake_case name used in records and schemas
    pub name: String,
    /// Metadata category ("Geography", "Event", ...)
    pub category: String,
    /// Semantic type
    pub field_type: FieldType,
    /// Dimension or metric
    pub behavior: FieldBehavior,
}

impl Field {
    /// Build a dimension, applying the integer and datetime overrides
    pub fn dimension(api_name: &str, category: &str) -> Self {
        Self {
            api_name: api_name.to_string(),
            name: to_snake_case(api_name),
            category: category.to_string(),
            field_type: dimension_type(api_name),
            behavior: FieldBehavior::Dimension,
        }
    }

    /// Build a metric typed from its reported type
    pub fn metric(api_name: &str, category: &str, metric_type: &str) -> Self {
        Self {
            api_name: api_name.to_string(),
            name: to_snake_case(api_name),
            category: category.to_string(),
            field_type: metric_field_type(metric_type),
            behavior: FieldBehavior::Metric,
        }
    }
}

impl From<&DimensionMetadata> for Field {
    fn from(meta: &DimensionMetadata) -> Self {
        Self::dimension(&meta.api_name, &meta.category)
    }
}

impl From<&MetricMetadata> for Field {
    fn from(meta: &MetricMetadata) -> Self {
        Self::metric(&meta.api_name, &meta.category, &meta.metric_type)
    }
}

/// Fields of one property, split by how they can be used
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveredFields {
    pub dimensions: Vec<Field>,
    pub metrics: Vec<Field>,
    /// Metrics kept in the schema but never requested
    pub invalid_metrics: Vec<Field>,
}

impl DiscoveredFields {
    /// Every field, dimensions first
    pub fn all(&self) -> impl Iterator<Item = &Field> {
        self.dimensions
            .iter()
            .chain(self.metrics.iter())
            .chain(self.invalid_metrics.iter())
    }

    /// Fields that may be sent to the API
    pub fn requestable(&self) -> impl Iterator<Item = &Field> {
        self.dimensions.iter().chain(self.metrics.iter())
    }
}

/// Reads and filters property metadata
pub struct MetadataCatalog<'a, A: ReportingApi> {
    api: &'a A,
}

impl<'a, A: ReportingApi> MetadataCatalog<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Fetch the property's dimensions and metrics
    pub async fn fetch_fields(&self, property_id: &str) -> Result<DiscoveredFields> {
        let metadata = self.api.get_metadata(property_id).await?;

        let mut fields = DiscoveredFields::default();
        for dimension in &metadata.dimensions {
            if is_incompatible_category(&dimension.category) {
                continue;
            }
            fields.dimensions.push(Field::from(dimension));
        }
        for metric in &metadata.metrics {
            if is_incompatible_category(&metric.category) {
                continue;
            }
            let field = Field::from(metric);
            if is_valid_metric_name(&field.api_name) {
                fields.metrics.push(field);
            } else {
                fields.invalid_metrics.push(field);
            }
        }

        info!(
            "Property {} has {} dimensions, {} metrics and {} unsupported metrics",
            property_id,
            fields.dimensions.len(),
            fields.metrics.len(),
            fields.invalid_metrics.len()
        );
        Ok(fields)
    }
}

fn is_incompatible_category(category: &str) -> bool {
    INCOMPATIBLE_CATEGORIES.contains(&category)
}

/// Whether the API accepts this metric name in a request
pub fn is_valid_metric_name(api_name: &str) -> bool {
    VALID_METRIC_NAME.is_match(api_name)
}

fn dimension_type(api_name: &str) -> FieldType {
    if INTEGER_DIMENSIONS.contains(&api_name) {
        FieldType::Integer
    } else if DATETIME_DIMENSIONS.contains(&api_name) {
        FieldType::DateTime
    } else {
        FieldType::String
    }
}

/// Map a metric type to a semantic type
pub fn metric_field_type(metric_type: &str) -> FieldType {
    if metric_type == "TYPE_INTEGER" {
        FieldType::Integer
    } else if FLOAT_TYPES.contains(&metric_type) {
        FieldType::Number
    } else {
        FieldType::String
    }
}

/// Canonical name of an API field: `customEvent:pageLocation` becomes
/// `custom_event_page_location`.
pub fn to_snake_case(api_name: &str) -> String {
    let mut out = String::with_capacity(api_name.len() + 4);
    let mut prev: Option<char> = None;

    for c in api_name.chars() {
        if c.is_ascii_uppercase() && prev.is_some() && prev != Some(':') {
            out.push('_');
        }
        out.push(c);
        prev = Some(c);
    }

    out.replace(':', "_").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("audienceId", "audience_id")]
    #[test_case("customEvent:pageLocation", "custom_event_page_location" ; "custom lower")]
    #[test_case("customEvent:PageLocation", "custom_event_page_location" ; "custom upper")]
    #[test_case("date", "date")]
    #[test_case("dateHourMinute", "date_hour_minute")]
    #[test_case("firstSessionDate", "first_session_date")]
    #[test_case("Country", "country" ; "leading capital")]
    fn test_to_snake_case(api_name: &str, expected: &str) {
        assert_eq!(to_snake_case(api_name), expected);
    }

    #[test_case("metric", true)]
    #[test_case("metric:event", true)]
    #[test_case("customEvent:customMetric[event]", true)]
    #[test_case("metric:(other)", false ; "parenthesized suffix")]
    #[test_case("ÜwÜ", false ; "non ascii")]
    #[test_case("", false ; "empty")]
    fn test_is_valid_metric_name(name: &str, valid: bool) {
        assert_eq!(is_valid_metric_name(name), valid);
    }

    #[test]
    fn test_dimension_overrides() {
        assert_eq!(Field::dimension("dayOfWeek", "Time").field_type, FieldType::Integer);
        assert_eq!(Field::dimension("dateHour", "Time").field_type, FieldType::DateTime);
        assert_eq!(Field::dimension("country", "Geography").field_type, FieldType::String);
    }

    #[test_case("TYPE_INTEGER", FieldType::Integer)]
    #[test_case("TYPE_CURRENCY", FieldType::Number)]
    #[test_case("TYPE_SECONDS", FieldType::Number)]
    #[test_case("TYPE_KILOMETERS", FieldType::Number)]
    #[test_case("METRIC_TYPE_UNSPECIFIED", FieldType::String)]
    fn test_metric_types(metric_type: &str, expected: FieldType) {
        assert_eq!(metric_field_type(metric_type), expected);
    }
}
