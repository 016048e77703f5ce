//! Data API wire types
//!
//! Only the parts of the v1beta resources the tap reads or writes are
//! modelled; unknown response fields are ignored.

use serde::{Deserialize, Serialize};

/// Value of `compatibilityFilter` asking only for incompatible fields
pub const INCOMPATIBLE: &str = "INCOMPATIBLE";

// ============================================================================
// Metadata
// ============================================================================

/// `GET properties/{p}/metadata`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataResponse {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub dimensions: Vec<DimensionMetadata>,
    #[serde(default)]
    pub metrics: Vec<MetricMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionMetadata {
    pub api_name: String,
    #[serde(default)]
    pub ui_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub custom_definition: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricMetadata {
    pub api_name: String,
    #[serde(default)]
    pub ui_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    /// `TYPE_INTEGER`, `TYPE_FLOAT`, `TYPE_CURRENCY`, ...
    #[serde(rename = "type", default)]
    pub metric_type: String,
    #[serde(default)]
    pub custom_definition: bool,
}

// ============================================================================
// Compatibility
// ============================================================================

/// Named dimension in a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dimension {
    pub name: String,
}

/// Named metric in a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub name: String,
}

/// `POST properties/{p}:checkCompatibility`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<Dimension>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<Metric>,
    pub compatibility_filter: String,
}

impl CompatibilityRequest {
    /// Probe for everything incompatible with one dimension
    pub fn for_dimension(api_name: impl Into<String>) -> Self {
        Self {
            dimensions: vec![Dimension {
                name: api_name.into(),
            }],
            metrics: Vec::new(),
            compatibility_filter: INCOMPATIBLE.to_string(),
        }
    }

    /// Probe for everything incompatible with one metric
    pub fn for_metric(api_name: impl Into<String>) -> Self {
        Self {
            dimensions: Vec::new(),
            metrics: vec![Metric {
                name: api_name.into(),
            }],
            compatibility_filter: INCOMPATIBLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityResponse {
    #[serde(default)]
    pub dimension_compatibilities: Vec<DimensionCompatibility>,
    #[serde(default)]
    pub metric_compatibilities: Vec<MetricCompatibility>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionCompatibility {
    pub dimension_metadata: DimensionMetadata,
    #[serde(default)]
    pub compatibility: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricCompatibility {
    pub metric_metadata: MetricMetadata,
    #[serde(default)]
    pub compatibility: String,
}

// ============================================================================
// Reports
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBy {
    pub dimension: DimensionOrderBy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionOrderBy {
    pub dimension_name: String,
    pub order_type: String,
}

impl OrderBy {
    /// Numeric ascending order on a dimension
    pub fn numeric(dimension_name: impl Into<String>) -> Self {
        Self {
            dimension: DimensionOrderBy {
                dimension_name: dimension_name.into(),
                order_type: "NUMERIC".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterExpression {
    pub filter: Filter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub field_name: String,
    pub string_filter: StringFilter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringFilter {
    pub value: String,
}

impl FilterExpression {
    /// Exact string match on one field
    pub fn string_equals(field_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            filter: Filter {
                field_name: field_name.into(),
                string_filter: StringFilter {
                    value: value.into(),
                },
            },
        }
    }
}

/// `POST properties/{p}:runReport`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReportRequest {
    /// Property id; part of the URL, not the body
    #[serde(skip)]
    pub property_id: String,
    pub dimensions: Vec<Dimension>,
    pub metrics: Vec<Metric>,
    pub date_ranges: Vec<DateRange>,
    pub limit: u64,
    pub offset: u64,
    pub return_property_quota: bool,
    pub order_bys: Vec<OrderBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension_filter: Option<FilterExpression>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReportResponse {
    #[serde(default)]
    pub dimension_headers: Vec<DimensionHeader>,
    #[serde(default)]
    pub metric_headers: Vec<MetricHeader>,
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default)]
    pub row_count: u64,
    #[serde(default)]
    pub property_quota: Option<PropertyQuota>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DimensionHeader {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MetricHeader {
    pub name: String,
    #[serde(rename = "type", default)]
    pub metric_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    #[serde(default)]
    pub dimension_values: Vec<CellValue>,
    #[serde(default)]
    pub metric_values: Vec<CellValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CellValue {
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyQuota {
    #[serde(default)]
    pub tokens_per_day: Option<QuotaStatus>,
    #[serde(default)]
    pub tokens_per_hour: Option<QuotaStatus>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct QuotaStatus {
    #[serde(default)]
    pub consumed: i64,
    #[serde(default)]
    pub remaining: i64,
}

impl RunReportResponse {
    /// Hourly tokens consumed by the request that produced this response
    pub fn tokens_consumed(&self) -> i64 {
        self.property_quota
            .as_ref()
            .and_then(|q| q.tokens_per_hour)
            .map_or(0, |t| t.consumed)
    }
}
