//! State types for tracking sync progress
//!
//! These types are serialized to JSON and persisted between runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete state of the tap
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncState {
    /// Stream being synced when the state was written
    #[serde(default)]
    pub currently_syncing: Option<String>,

    /// `stream_id -> property_id -> bookmark`
    #[serde(default)]
    pub bookmarks: BTreeMap<String, BTreeMap<String, Bookmark>>,
}

impl SyncState {
    /// Create a new empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the bookmark for a stream and property
    pub fn get_bookmark(&self, stream: &str, property_id: &str) -> Option<&Bookmark> {
        self.bookmarks.get(stream)?.get(property_id)
    }

    /// Set the last synced report date for a stream and property
    pub fn set_bookmark(&mut self, stream: &str, property_id: &str, last_report_date: String) {
        self.bookmarks
            .entry(stream.to_string())
            .or_default()
            .insert(property_id.to_string(), Bookmark { last_report_date });
    }

    /// Set or clear the stream in progress
    pub fn set_currently_syncing(&mut self, stream: Option<&str>) {
        self.currently_syncing = stream.map(ToString::to_string);
    }
}

/// Progress of one stream for one property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Last report date fully emitted, `YYYY-MM-DD`
    pub last_report_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_state_default() {
        let state = SyncState::new();
        assert!(state.bookmarks.is_empty());
        assert!(state.currently_syncing.is_none());
    }

    #[test]
    fn test_state_bookmark() {
        let mut state = SyncState::new();
        assert!(state.get_bookmark("events", "123").is_none());

        state.set_bookmark("events", "123", "2022-09-07".to_string());
        assert_eq!(
            state.get_bookmark("events", "123").unwrap().last_report_date,
            "2022-09-07"
        );
        assert!(state.get_bookmark("events", "999").is_none());
    }

    #[test]
    fn test_state_wire_format() {
        let mut state = SyncState::new();
        state.set_currently_syncing(Some("events"));
        state.set_bookmark("events", "123", "2022-09-07".to_string());

        assert_eq!(
            serde_json::to_value(&state).unwrap(),
            json!({
                "currently_syncing": "events",
                "bookmarks": {"events": {"123": {"last_report_date": "2022-09-07"}}}
            })
        );

        let restored: SyncState = serde_json::from_value(json!({})).unwrap();
        assert_eq!(restored, SyncState::new());
    }
}
