//! Reporting API
//!
//! The [`ReportingApi`] trait is the seam between the tap and the GA4 Data
//! API. Discovery and sync take any implementation, so tests run against
//! in-memory fakes and production runs against [`DataApiClient`].

mod client;
mod types;

pub use client::DataApiClient;
pub use types::*;

use crate::error::Result;
use async_trait::async_trait;

/// One typed method per Data API operation
#[async_trait]
pub trait ReportingApi: Send + Sync {
    /// Dimensions and metrics available on a property
    async fn get_metadata(&self, property_id: &str) -> Result<MetadataResponse>;

    /// Fields that cannot be combined with the fields in `request`
    async fn check_compatibility(
        &self,
        property_id: &str,
        request: &CompatibilityRequest,
    ) -> Result<CompatibilityResponse>;

    /// One page of a report
    async fn run_report(&self, request: &RunReportRequest) -> Result<RunReportResponse>;
}

#[cfg(test)]
pub(crate) mod fake;

#[cfg(test)]
mod tests;
