//! State manager implementation
//!
//! Owns the sync state for a run and optionally checkpoints it to a file
//! with atomic writes.

use super::types::SyncState;
use crate::config::parse_date;
use crate::error::{Error, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// State manager for loading, updating and checkpointing state
#[derive(Debug, Default)]
pub struct StateManager {
    /// Current state
    state: SyncState,
    /// File written on every checkpoint, if any
    checkpoint_path: Option<PathBuf>,
}

impl StateManager {
    /// Create a state manager with the given state
    pub fn new(state: SyncState) -> Self {
        Self {
            state,
            checkpoint_path: None,
        }
    }

    /// Create an empty in-memory state manager
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load state from a file; a missing file yields an empty state
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::in_memory());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| Error::State {
            message: format!("Failed to read state file: {e}"),
        })?;
        if contents.trim().is_empty() {
            return Ok(Self::in_memory());
        }
        Self::from_json(&contents)
    }

    /// Create a state manager from inline JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let state: SyncState = serde_json::from_str(json).map_err(|e| Error::State {
            message: format!("Failed to parse state JSON: {e}"),
        })?;
        Ok(Self::new(state))
    }

    /// Also write every checkpoint to `path`
    #[must_use]
    pub fn with_checkpoint(mut self, path: impl AsRef<Path>) -> Self {
        self.checkpoint_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Current state
    pub fn state(&self) -> &SyncState {
        &self.state
    }

    /// Checkpoint file, if any
    pub fn checkpoint_path(&self) -> Option<&Path> {
        self.checkpoint_path.as_deref()
    }

    /// Bookmark date for a stream and property
    pub fn bookmark_date(&self, stream: &str, property_id: &str) -> Result<Option<NaiveDate>> {
        self.state
            .get_bookmark(stream, property_id)
            .map(|b| {
                parse_date("last_report_date", &b.last_report_date).map_err(|e| Error::State {
                    message: format!("Invalid bookmark for stream '{stream}': {e}"),
                })
            })
            .transpose()
    }

    /// Set the bookmark for a stream and property
    pub fn set_bookmark(&mut self, stream: &str, property_id: &str, last_report_date: String) {
        self.state
            .set_bookmark(stream, property_id, last_report_date);
    }

    /// Set or clear the stream in progress
    pub fn set_currently_syncing(&mut self, stream: Option<&str>) {
        self.state.set_currently_syncing(stream);
    }

    /// Export state as JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.state).map_err(|e| Error::State {
            message: format!("Failed to serialize state: {e}"),
        })
    }

    /// Write the checkpoint file, if configured
    pub async fn checkpoint(&self) -> Result<()> {
        match &self.checkpoint_path {
            Some(path) => self.save_to_file(path).await,
            None => Ok(()),
        }
    }

    /// Save state to a specific file path
    pub async fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let contents = serde_json::to_string_pretty(&self.state).map_err(|e| Error::State {
            message: format!("Failed to serialize state: {e}"),
        })?;

        // Write to temp file first, then rename for atomicity
        let path = path.as_ref();
        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, &contents)
            .await
            .map_err(|e| Error::State {
                message: format!("Failed to write state file: {e}"),
            })?;

        tokio::fs::rename(&temp_path, path)
            .await
            .map_err(|e| Error::State {
                message: format!("Failed to rename state file: {e}"),
            })?;

        Ok(())
    }
}
