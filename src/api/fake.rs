//! In-memory reporting API for unit tests

use super::*;
use crate::error::Result;
use std::collections::HashMap;
use std::sync::Mutex;

type ReportHandler = Box<dyn Fn(&RunReportRequest) -> Result<RunReportResponse> + Send + Sync>;

/// Scripted [`ReportingApi`] that records every call
pub struct FakeApi {
    pub metadata: MetadataResponse,
    /// Probe responses keyed by the probed field's API name
    pub compatibility: HashMap<String, CompatibilityResponse>,
    report_handler: ReportHandler,
    pub probes: Mutex<Vec<String>>,
    pub report_requests: Mutex<Vec<RunReportRequest>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            metadata: MetadataResponse::default(),
            compatibility: HashMap::new(),
            report_handler: Box::new(|_| Ok(RunReportResponse::default())),
            probes: Mutex::new(Vec::new()),
            report_requests: Mutex::new(Vec::new()),
        }
    }
}

impl FakeApi {
    /// Serve `metadata` and answer probes from `compatibility`
    #[must_use]
    pub fn with_metadata(
        mut self,
        metadata: MetadataResponse,
        compatibility: HashMap<String, CompatibilityResponse>,
    ) -> Self {
        self.metadata = metadata;
        self.compatibility = compatibility;
        self
    }

    /// Answer `runReport` with `handler`
    #[must_use]
    pub fn with_reports<F>(mut self, handler: F) -> Self
    where
        F: Fn(&RunReportRequest) -> Result<RunReportResponse> + Send + Sync + 'static,
    {
        self.report_handler = Box::new(handler);
        self
    }

    pub fn probed(&self) -> Vec<String> {
        self.probes.lock().unwrap().clone()
    }

    pub fn requests(&self) -> Vec<RunReportRequest> {
        self.report_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportingApi for FakeApi {
    async fn get_metadata(&self, _property_id: &str) -> Result<MetadataResponse> {
        Ok(self.metadata.clone())
    }

    async fn check_compatibility(
        &self,
        _property_id: &str,
        request: &CompatibilityRequest,
    ) -> Result<CompatibilityResponse> {
        let name = request
            .dimensions
            .first()
            .map(|d| d.name.clone())
            .or_else(|| request.metrics.first().map(|m| m.name.clone()))
            .unwrap_or_default();
        self.probes.lock().unwrap().push(name.clone());
        Ok(self.compatibility.get(&name).cloned().unwrap_or_default())
    }

    async fn run_report(&self, request: &RunReportRequest) -> Result<RunReportResponse> {
        self.report_requests.lock().unwrap().push(request.clone());
        (self.report_handler)(request)
    }
}

/// Metadata entry for a dimension
pub fn dimension(api_name: &str, category: &str) -> DimensionMetadata {
    DimensionMetadata {
        api_name: api_name.to_string(),
        category: category.to_string(),
        ..DimensionMetadata::default()
    }
}

/// Metadata entry for a metric
pub fn metric(api_name: &str, category: &str, metric_type: &str) -> MetricMetadata {
    MetricMetadata {
        api_name: api_name.to_string(),
        category: category.to_string(),
        metric_type: metric_type.to_string(),
        ..MetricMetadata::default()
    }
}
