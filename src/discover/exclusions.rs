//! Field exclusions
//!
//! Each requestable field is probed once with `checkCompatibility` to learn
//! which fields cannot appear in the same report. Results are keyed and
//! valued by canonical name and kept exactly as the API reports them: if
//! `a` excludes `b`, nothing is assumed about `b`.

use super::fields::{to_snake_case, DiscoveredFields, Field};
use crate::api::{CompatibilityRequest, ReportingApi};
use crate::error::{Error, Result, ResultExt};
use crate::types::FieldBehavior;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{debug, info};

/// Canonical field name to the canonical names it cannot be combined with
pub type FieldExclusions = BTreeMap<String, BTreeSet<String>>;

/// Dimensions never probed; the API rejects probes for them
pub const EXEMPT_DIMENSIONS: &[&str] = &["comparison"];

/// Metrics never probed; the API rejects probes for them
pub const EXEMPT_METRICS: &[&str] = &[
    "advertiserAdClicks",
    "advertiserAdCost",
    "advertiserAdCostPerClick",
    "advertiserAdCostPerKeyEvent",
    "advertiserAdImpressions",
    "organicGoogleSearchAveragePosition",
    "organicGoogleSearchClickThroughRate",
    "organicGoogleSearchImpressions",
    "returnOnAdSpend",
    "organicGoogleSearchClicks",
];

const PROGRESS_EVERY: usize = 50;

/// Resolves exclusions through the API, consulting an optional cache first
pub struct CompatibilityResolver<'a, A: ReportingApi> {
    api: &'a A,
    cache: FieldExclusions,
}

impl<'a, A: ReportingApi> CompatibilityResolver<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            cache: FieldExclusions::new(),
        }
    }

    /// Reuse previously discovered exclusions instead of probing
    #[must_use]
    pub fn with_cache(mut self, cache: FieldExclusions) -> Self {
        self.cache = cache;
        self
    }

    /// Exclusions for every discovered field
    pub async fn resolve_field_exclusions(
        &self,
        property_id: &str,
        fields: &DiscoveredFields,
    ) -> Result<FieldExclusions> {
        let mut exclusions = FieldExclusions::new();

        for field in &fields.invalid_metrics {
            exclusions.insert(field.name.clone(), BTreeSet::new());
        }

        let total = fields.dimensions.len() + fields.metrics.len();
        let mut probed = 0usize;
        info!("Discovering field exclusions for {} fields", total);

        for (index, field) in fields.requestable().enumerate() {
            if is_exempt(field) {
                debug!("Skipping exclusion probe for exempt field {}", field.api_name);
                exclusions.insert(field.name.clone(), BTreeSet::new());
                continue;
            }

            if let Some(cached) = self.cache.get(&field.name) {
                exclusions.insert(field.name.clone(), cached.clone());
                continue;
            }

            let excluded = self.probe(property_id, field).await?;
            exclusions.insert(field.name.clone(), excluded);
            probed += 1;

            if (index + 1) % PROGRESS_EVERY == 0 {
                info!("Resolved exclusions for {}/{} fields", index + 1, total);
            }
        }

        info!(
            "Field exclusions resolved ({} probed, {} from cache)",
            probed,
            total - probed
        );
        Ok(exclusions)
    }

    async fn probe(&self, property_id: &str, field: &Field) -> Result<BTreeSet<String>> {
        let request = match field.behavior {
            FieldBehavior::Dimension => CompatibilityRequest::for_dimension(&field.api_name),
            FieldBehavior::Metric => CompatibilityRequest::for_metric(&field.api_name),
        };

        let response = self.api.check_compatibility(property_id, &request).await?;

        let dimensions = response
            .dimension_compatibilities
            .iter()
            .map(|c| to_snake_case(&c.dimension_metadata.api_name));
        let metrics = response
            .metric_compatibilities
            .iter()
            .map(|c| to_snake_case(&c.metric_metadata.api_name));

        Ok(dimensions.chain(metrics).collect())
    }
}

fn is_exempt(field: &Field) -> bool {
    match field.behavior {
        FieldBehavior::Dimension => EXEMPT_DIMENSIONS.contains(&field.api_name.as_str()),
        FieldBehavior::Metric => EXEMPT_METRICS.contains(&field.api_name.as_str()),
    }
}

/// Load a cached exclusions document (`{"field": ["other", ...]}`)
pub fn load_exclusions(path: impl AsRef<Path>) -> Result<FieldExclusions> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Reading field exclusions {}", path.display()))?;
    serde_json::from_str(&contents)
        .map_err(|e| Error::config(format!("Invalid field exclusions file: {e}")))
}
