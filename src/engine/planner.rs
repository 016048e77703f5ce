//! Field selection for a stream

use crate::catalog::CatalogEntry;
use crate::error::{Error, Result};
use crate::types::FieldBehavior;

/// API names to request for a stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedFields {
    pub dimensions: Vec<String>,
    pub metrics: Vec<String>,
}

impl SelectedFields {
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty() && self.metrics.is_empty()
    }
}

/// Derives the request shape of a stream from its catalog metadata
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamPlanner;

impl StreamPlanner {
    /// Selected fields with a behavior, by API name
    ///
    /// Fields without a behavior (the audit fields) are computed locally and
    /// never requested.
    pub fn plan(entry: &CatalogEntry) -> Result<SelectedFields> {
        let mut selected = SelectedFields::default();

        for (name, metadata) in entry.field_metadata() {
            if !metadata.is_field_selected() {
                continue;
            }
            let Some(behavior) = metadata.behavior else {
                continue;
            };
            let api_name = metadata.api_name.clone().unwrap_or_else(|| name.to_string());
            match behavior {
                FieldBehavior::Dimension => selected.dimensions.push(api_name),
                FieldBehavior::Metric => selected.metrics.push(api_name),
            }
        }

        if selected.is_empty() {
            return Err(Error::catalog(format!(
                "Stream '{}' has no selected dimensions or metrics",
                entry.tap_stream_id
            )));
        }

        Ok(selected)
    }
}
