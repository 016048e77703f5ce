//! Catalog construction
//!
//! Every report shares one schema built from the property's fields. Reports
//! differ only in which fields are selected by default.

use super::types::{FieldType, JsonType, SchemaProperty, StreamSchema};
use crate::catalog::{Catalog, CatalogEntry, Metadata, MetadataEntry};
use crate::discover::{DiscoveredFields, Field, FieldExclusions};
use crate::reports::Report;
use crate::types::{
    Inclusion, ACCOUNT_ID_FIELD, AUTOMATIC_FIELDS, PROPERTY_ID_FIELD, RECORD_HASH_FIELD,
    REPLICATION_KEY,
};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Group assigned to the audit fields
pub const REPORT_FIELD_GROUP: &str = "Report Field";

/// Builds schemas and metadata from discovered fields
pub struct SchemaBuilder<'a> {
    fields: &'a DiscoveredFields,
    exclusions: &'a FieldExclusions,
}

impl<'a> SchemaBuilder<'a> {
    pub fn new(fields: &'a DiscoveredFields, exclusions: &'a FieldExclusions) -> Self {
        Self { fields, exclusions }
    }

    /// Record schema shared by all reports
    pub fn build_schema(&self) -> StreamSchema {
        let mut schema = StreamSchema::new();
        schema.add_property(RECORD_HASH_FIELD, SchemaProperty::new(JsonType::String));
        schema.add_property(PROPERTY_ID_FIELD, SchemaProperty::new(JsonType::String));
        schema.add_property(ACCOUNT_ID_FIELD, SchemaProperty::new(JsonType::String));
        schema.add_property(REPLICATION_KEY, FieldType::DateTime.to_property());

        for field in self.fields.all() {
            if schema.get_property(&field.name).is_some() && field.name != REPLICATION_KEY {
                warn!(
                    "Field {} maps to an existing name {}; keeping the first",
                    field.api_name, field.name
                );
                continue;
            }
            schema.add_property(&field.name, field.field_type.to_property());
        }
        schema
    }

    /// Metadata for one report, stream entry first then fields by name
    pub fn build_metadata(&self, report: &Report) -> Vec<MetadataEntry> {
        let mut fields: BTreeMap<String, Metadata> = BTreeMap::new();

        for name in AUTOMATIC_FIELDS {
            fields.insert(
                name.to_string(),
                Metadata {
                    inclusion: Some(Inclusion::Automatic),
                    group: Some(REPORT_FIELD_GROUP.to_string()),
                    ..Metadata::default()
                },
            );
        }

        for field in self.fields.requestable() {
            self.add_field(&mut fields, field, Inclusion::Available, report);
        }
        for field in &self.fields.invalid_metrics {
            self.add_field(&mut fields, field, Inclusion::Unsupported, report);
        }

        for api_name in report.dimensions.iter().chain(report.metrics.iter()) {
            if !self.fields.requestable().any(|f| &f.api_name == api_name) {
                debug!(
                    "Report {} lists {} which the property does not offer",
                    report.id, api_name
                );
            }
        }

        let stream = MetadataEntry::stream(Metadata {
            table_key_properties: Some(vec![RECORD_HASH_FIELD.to_string()]),
            forced_replication_method: Some("INCREMENTAL".to_string()),
            valid_replication_keys: Some(vec![REPLICATION_KEY.to_string()]),
            premade: Some(report.is_premade),
            ..Metadata::default()
        });

        std::iter::once(stream)
            .chain(
                fields
                    .into_iter()
                    .map(|(name, metadata)| MetadataEntry::field(&name, metadata)),
            )
            .collect()
    }

    fn add_field(
        &self,
        entries: &mut BTreeMap<String, Metadata>,
        field: &Field,
        inclusion: Inclusion,
        report: &Report,
    ) {
        let entry = entries.entry(field.name.clone()).or_default();
        if entry.behavior.is_some() {
            // name collision; the first field keeps the slot
            return;
        }

        // the replication key stays automatic even though it is also a dimension
        if entry.inclusion != Some(Inclusion::Automatic) {
            entry.inclusion = Some(inclusion);
        }
        entry.group = Some(field.category.clone());
        entry.behavior = Some(field.behavior);
        entry.api_name = Some(field.api_name.clone());
        entry.field_exclusions = Some(
            self.exclusions
                .get(&field.name)
                .map(|set| set.iter().cloned().collect())
                .unwrap_or_default(),
        );

        let listed = report
            .dimensions
            .iter()
            .chain(report.metrics.iter())
            .any(|name| name == &field.api_name);
        if listed && inclusion != Inclusion::Unsupported {
            entry.selected_by_default = Some(true);
        }
    }

    /// One catalog entry for a report
    pub fn build_entry(&self, report: &Report, schema: &StreamSchema) -> CatalogEntry {
        CatalogEntry {
            tap_stream_id: report.id.clone(),
            stream: report.name.clone(),
            key_properties: vec![RECORD_HASH_FIELD.to_string()],
            schema: schema.clone(),
            metadata: self.build_metadata(report),
        }
    }

    /// Catalog with one entry per report
    pub fn build_catalog(&self, reports: &[Report]) -> Catalog {
        info!("Generating catalog for {} reports", reports.len());
        let schema = self.build_schema();
        Catalog {
            streams: reports
                .iter()
                .map(|report| self.build_entry(report, &schema))
                .collect(),
        }
    }
}
