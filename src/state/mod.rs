//! State management module
//!
//! Tracks bookmarks and the stream in progress so an interrupted sync
//! resumes where it stopped.
//!
//! # Overview
//!
//! The state module provides:
//! - `SyncState` - bookmarks per stream and property, plus `currently_syncing`
//! - `StateManager` - the single owner of the state during a run, with
//!   optional atomic checkpoint files

mod manager;
mod types;

pub use manager::StateManager;
pub use types::{Bookmark, SyncState};

#[cfg(test)]
mod tests;
