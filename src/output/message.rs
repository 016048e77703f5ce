//! Singer messages

use crate::schema::StreamSchema;
use crate::state::SyncState;
use crate::types::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line of tap output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    /// Schema of a stream, sent before its records
    Schema {
        /// Stream id
        stream: String,
        /// JSON schema of the records
        schema: StreamSchema,
        /// Primary key fields
        key_properties: Vec<String>,
    },
    /// A single record
    Record {
        /// Stream id
        stream: String,
        /// Record data
        record: Record,
        /// When the record was extracted
        time_extracted: DateTime<Utc>,
    },
    /// State checkpoint
    State {
        /// Full tap state
        value: SyncState,
    },
}
