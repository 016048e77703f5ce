//! HTTP module
//!
//! Transport, request pacing and retry for the Data API client.
//!
//! # Features
//!
//! - **Error Classification**: non-2xx responses map to retryable, quota and fatal errors
//! - **Rate Limiting**: Token bucket request pacer using governor
//! - **Retry Policy**: Exponential backoff, with quota waits that do not spend a try
//! - **Authentication**: Integration with auth module

mod client;
mod rate_limit;
mod retry;

pub use client::{
    classify_response, HttpClient, HttpClientConfig, HttpClientConfigBuilder, RESOURCE_EXHAUSTED,
};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use retry::{seconds_until_quota_reset, RetryPolicy, QUOTA_RESET_GRACE_SECS};
