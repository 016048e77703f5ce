//! Common types used throughout tap-ga4
//!
//! This module contains shared type definitions, type aliases,
//! and small enums used across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// A flattened output record keyed by canonical field name
pub type Record = JsonObject;

// ============================================================================
// Well-known field names
// ============================================================================

/// Primary key of every emitted record
pub const RECORD_HASH_FIELD: &str = "_sdc_record_hash";

/// Property the record was extracted from
pub const PROPERTY_ID_FIELD: &str = "property_id";

/// Account owning the property
pub const ACCOUNT_ID_FIELD: &str = "account_id";

/// Replication key of every report stream
pub const REPLICATION_KEY: &str = "date";

/// Fields that are always part of a record regardless of selection
pub const AUTOMATIC_FIELDS: [&str; 4] = [
    RECORD_HASH_FIELD,
    PROPERTY_ID_FIELD,
    ACCOUNT_ID_FIELD,
    REPLICATION_KEY,
];

// ============================================================================
// Field Metadata Enums
// ============================================================================

/// Whether a field is a dimension or a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldBehavior {
    /// Categorical attribute (country, date, ...)
    Dimension,
    /// Numeric measure (sessions, revenue, ...)
    Metric,
}

/// How a field participates in selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Inclusion {
    /// Always selected
    Automatic,
    /// Selectable by the user
    #[default]
    Available,
    /// Visible but never requested
    Unsupported,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_behavior_serde() {
        let behavior: FieldBehavior = serde_json::from_str("\"METRIC\"").unwrap();
        assert_eq!(behavior, FieldBehavior::Metric);

        let json = serde_json::to_string(&FieldBehavior::Dimension).unwrap();
        assert_eq!(json, "\"DIMENSION\"");
    }

    #[test]
    fn test_inclusion_serde() {
        let inclusion: Inclusion = serde_json::from_str("\"unsupported\"").unwrap();
        assert_eq!(inclusion, Inclusion::Unsupported);
        assert_eq!(Inclusion::default(), Inclusion::Available);
    }

    #[test]
    fn test_automatic_fields_include_replication_key() {
        assert!(AUTOMATIC_FIELDS.contains(&REPLICATION_KEY));
        assert!(AUTOMATIC_FIELDS.contains(&RECORD_HASH_FIELD));
    }
}
