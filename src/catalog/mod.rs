//! Singer catalog
//!
//! The catalog is produced by discovery, annotated by the operator (who sets
//! `selected` flags) and read back at sync time.

use crate::error::{Error, Result};
use crate::schema::StreamSchema;
use crate::types::{FieldBehavior, Inclusion, JsonValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Breadcrumb prefix of field-level metadata
pub const PROPERTIES: &str = "properties";

/// Metadata attached to a stream (empty breadcrumb) or a field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inclusion: Option<Inclusion>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,

    #[serde(
        rename = "selected-by-default",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub selected_by_default: Option<bool>,

    #[serde(rename = "tap_ga4.group", default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behavior: Option<FieldBehavior>,

    #[serde(
        rename = "fieldExclusions",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub field_exclusions: Option<Vec<String>>,

    #[serde(
        rename = "tap_ga4.api_name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub api_name: Option<String>,

    #[serde(
        rename = "table-key-properties",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub table_key_properties: Option<Vec<String>>,

    #[serde(
        rename = "forced-replication-method",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub forced_replication_method: Option<String>,

    #[serde(
        rename = "valid-replication-keys",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub valid_replication_keys: Option<Vec<String>>,

    #[serde(
        rename = "tap_ga4.premade",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub premade: Option<bool>,

    /// Keys written by other tools are kept as-is
    #[serde(flatten)]
    pub extra: BTreeMap<String, JsonValue>,
}

impl Metadata {
    /// Whether a field is part of the sync.
    ///
    /// Automatic fields are always in, unsupported fields never are. Otherwise
    /// an explicit `selected` wins over `selected-by-default`.
    pub fn is_field_selected(&self) -> bool {
        match self.inclusion {
            Some(Inclusion::Unsupported) => false,
            Some(Inclusion::Automatic) => true,
            _ => match self.selected {
                Some(selected) => selected,
                None => self.selected_by_default == Some(true),
            },
        }
    }
}

/// One metadata list item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub breadcrumb: Vec<String>,
    pub metadata: Metadata,
}

impl MetadataEntry {
    /// Stream-level entry
    pub fn stream(metadata: Metadata) -> Self {
        Self {
            breadcrumb: Vec::new(),
            metadata,
        }
    }

    /// Field-level entry
    pub fn field(name: &str, metadata: Metadata) -> Self {
        Self {
            breadcrumb: vec![PROPERTIES.to_string(), name.to_string()],
            metadata,
        }
    }

    /// Field name when this is a field-level entry
    pub fn field_name(&self) -> Option<&str> {
        match self.breadcrumb.as_slice() {
            [prefix, name] if prefix == PROPERTIES => Some(name.as_str()),
            _ => None,
        }
    }
}

/// One stream of the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub tap_stream_id: String,
    pub stream: String,
    #[serde(default)]
    pub key_properties: Vec<String>,
    pub schema: StreamSchema,
    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,
}

impl CatalogEntry {
    /// Stream-level metadata, if present
    pub fn stream_metadata(&self) -> Option<&Metadata> {
        self.metadata
            .iter()
            .find(|entry| entry.breadcrumb.is_empty())
            .map(|entry| &entry.metadata)
    }

    /// Field-level metadata as `(canonical name, metadata)`
    pub fn field_metadata(&self) -> impl Iterator<Item = (&str, &Metadata)> {
        self.metadata
            .iter()
            .filter_map(|entry| entry.field_name().map(|name| (name, &entry.metadata)))
    }

    /// Whether the operator selected this stream
    pub fn is_selected(&self) -> bool {
        self.stream_metadata()
            .and_then(|m| m.selected)
            .unwrap_or(false)
    }

    /// Whether this stream is a premade report
    pub fn is_premade(&self) -> bool {
        self.stream_metadata()
            .and_then(|m| m.premade)
            .unwrap_or(false)
    }
}

/// Catalog document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub streams: Vec<CatalogEntry>,
}

impl Catalog {
    /// Load a catalog file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| Error::catalog(format!("Invalid catalog: {e}")))
    }

    /// Streams the operator selected, in catalog order
    pub fn selected_streams(&self) -> Vec<&CatalogEntry> {
        self.streams.iter().filter(|s| s.is_selected()).collect()
    }

    /// Look up a stream by id
    pub fn get_stream(&self, tap_stream_id: &str) -> Result<&CatalogEntry> {
        self.streams
            .iter()
            .find(|s| s.tap_stream_id == tap_stream_id)
            .ok_or_else(|| Error::StreamNotFound {
                stream: tap_stream_id.to_string(),
            })
    }
}
