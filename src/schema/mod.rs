//! Schema module
//!
//! Record schemas and Singer metadata for report streams.
//!
//! # Features
//!
//! - **Type Mapping**: API metric types and dimension overrides to JSON types
//! - **Datetime Unions**: compact date dimensions are `anyOf` date-time or plain string
//! - **Metadata**: inclusion, exclusions and default selection per report

mod builder;
mod types;

pub use builder::{SchemaBuilder, REPORT_FIELD_GROUP};
pub use types::{FieldType, JsonType, JsonTypeOrArray, SchemaProperty, StreamSchema};
