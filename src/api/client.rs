//! REST client for the GA4 Data API

use super::types::{
    CompatibilityRequest, CompatibilityResponse, MetadataResponse, RunReportRequest,
    RunReportResponse,
};
use super::ReportingApi;
use crate::auth::AuthConfig;
use crate::config::TapConfig;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig, RetryPolicy};
use async_trait::async_trait;
use reqwest::Method;

/// Data API client with retry
#[derive(Debug)]
pub struct DataApiClient {
    http: HttpClient,
    retry: RetryPolicy,
}

impl DataApiClient {
    /// Wrap an HTTP client
    pub fn new(http: HttpClient, retry: RetryPolicy) -> Self {
        Self { http, retry }
    }

    /// Build a client from the tap config
    pub fn from_config(config: &TapConfig) -> Result<Self> {
        let mut http_config = HttpClientConfig::builder().base_url(&config.api_base_url);
        if let Some(agent) = &config.user_agent {
            http_config = http_config.user_agent(agent);
        }

        let http = HttpClient::with_auth(http_config.build(), AuthConfig::from_tap_config(config))?;
        Ok(Self::new(http, RetryPolicy::default()))
    }

    /// The retry policy applied to every call
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }
}

#[async_trait]
impl ReportingApi for DataApiClient {
    async fn get_metadata(&self, property_id: &str) -> Result<MetadataResponse> {
        let path = format!("v1beta/properties/{property_id}/metadata");
        self.retry
            .run("getMetadata", || self.http.send_json(Method::GET, &path, None))
            .await
    }

    async fn check_compatibility(
        &self,
        property_id: &str,
        request: &CompatibilityRequest,
    ) -> Result<CompatibilityResponse> {
        let path = format!("v1beta/properties/{property_id}:checkCompatibility");
        let body = serde_json::to_value(request)?;
        self.retry
            .run("checkCompatibility", || {
                self.http.send_json(Method::POST, &path, Some(&body))
            })
            .await
    }

    async fn run_report(&self, request: &RunReportRequest) -> Result<RunReportResponse> {
        let path = format!("v1beta/properties/{}:runReport", request.property_id);
        let body = serde_json::to_value(request)?;
        self.retry
            .run("runReport", || {
                self.http.send_json(Method::POST, &path, Some(&body))
            })
            .await
    }
}
