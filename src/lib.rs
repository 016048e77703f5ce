// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # tap-ga4
//!
//! A Singer tap for the Google Analytics 4 Data API (v1beta).
//!
//! ## Features
//!
//! - **Discovery**: Reads property metadata, probes field compatibility and
//!   builds one catalog stream per premade or configured report
//! - **Incremental Sync**: Date-chunked report extraction with bookmarks and a
//!   conversion-window lookback
//! - **Quota Aware**: Retries transient failures and sleeps through hourly
//!   quota exhaustion
//! - **Stable Keys**: Every record carries a deterministic `_sdc_record_hash`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tap_ga4::{api::DataApiClient, config::TapConfig, discover::discover, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = TapConfig::from_file("config.json")?;
//!     let api = DataApiClient::from_config(&config)?;
//!     let catalog = discover(&api, &config, None).await?;
//!     println!("{}", serde_json::to_string_pretty(&catalog)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                            CLI                                   │
//! │   discover → Catalog          sync(catalog, state) → messages    │
//! └──────────────────────────────────────────────────────────────────┘
//!                                 │
//! ┌───────────┬───────────┬───────┴───────┬────────────┬─────────────┐
//! │ Discover  │  Engine   │   Partition   │   Decode   │   Output    │
//! ├───────────┼───────────┼───────────────┼────────────┼─────────────┤
//! │ Metadata  │ Planner   │ Start/End     │ Coercion   │ SCHEMA      │
//! │ Probes    │ Fetcher   │ Chunking      │ Datetimes  │ RECORD      │
//! │ Schema    │ State     │               │ Hash       │ STATE       │
//! └───────────┴───────────┴───────────────┴────────────┴─────────────┘
//!                                 │
//!                 API (HTTP, auth, retry, rate limit)
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the tap
pub mod error;

/// Common types and type aliases
pub mod types;

/// Tap configuration
pub mod config;

/// Authentication implementations
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Data API client and wire types
pub mod api;

/// Premade and custom report definitions
pub mod reports;

/// Property metadata and field compatibility
pub mod discover;

/// Stream schemas and catalog construction
pub mod schema;

/// Catalog document and selection metadata
pub mod catalog;

/// Report pagination
pub mod pagination;

/// Date chunking
pub mod partition;

/// Row to record mapping and hashing
pub mod decode;

/// State management and checkpointing
pub mod state;

/// Singer message output
pub mod output;

/// Sync orchestration
pub mod engine;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
