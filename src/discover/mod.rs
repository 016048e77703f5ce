//! Discovery
//!
//! Reads the property's metadata, probes field compatibility and builds the
//! catalog: one stream per premade report plus one per configured report.

mod exclusions;
mod fields;

pub use exclusions::{
    load_exclusions, CompatibilityResolver, FieldExclusions, EXEMPT_DIMENSIONS, EXEMPT_METRICS,
};
pub use fields::{
    is_valid_metric_name, metric_field_type, to_snake_case, DiscoveredFields, Field,
    MetadataCatalog, DATETIME_DIMENSIONS, FLOAT_TYPES, INCOMPATIBLE_CATEGORIES,
    INTEGER_DIMENSIONS,
};

use crate::api::ReportingApi;
use crate::catalog::Catalog;
use crate::config::TapConfig;
use crate::error::Result;
use crate::reports::all_reports;
use crate::schema::SchemaBuilder;
use tracing::info;

/// Run discovery for the configured property
pub async fn discover<A: ReportingApi>(
    api: &A,
    config: &TapConfig,
    cached_exclusions: Option<FieldExclusions>,
) -> Result<Catalog> {
    let fields = MetadataCatalog::new(api)
        .fetch_fields(&config.property_id)
        .await?;

    let mut resolver = CompatibilityResolver::new(api);
    if let Some(cache) = cached_exclusions {
        resolver = resolver.with_cache(cache);
    }
    let exclusions = resolver
        .resolve_field_exclusions(&config.property_id, &fields)
        .await?;

    let reports = all_reports(&config.report_definitions);
    let catalog = SchemaBuilder::new(&fields, &exclusions).build_catalog(&reports);
    info!("Discovery complete: {} streams", catalog.streams.len());
    Ok(catalog)
}
