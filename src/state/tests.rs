//! Tests for StateManager

use super::*;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

// ============================================================================
// Construction Tests
// ============================================================================

#[test]
fn test_state_manager_in_memory() {
    let manager = StateManager::in_memory();
    assert_eq!(manager.state(), &SyncState::new());
    assert!(manager.checkpoint_path().is_none());
}

#[test]
fn test_from_json() {
    let manager = StateManager::from_json(
        r#"{"currently_syncing": "events", "bookmarks": {"events": {"123": {"last_report_date": "2022-09-07"}}}}"#,
    )
    .unwrap();

    assert_eq!(manager.state().currently_syncing.as_deref(), Some("events"));
    assert_eq!(
        manager.bookmark_date("events", "123").unwrap(),
        NaiveDate::from_ymd_opt(2022, 9, 7)
    );
}

#[test]
fn test_from_json_invalid() {
    let err = StateManager::from_json("not json").unwrap_err();
    assert!(err.to_string().contains("Failed to parse state JSON"));
}

#[test]
fn test_from_missing_or_empty_file() {
    let dir = tempdir().unwrap();
    let missing = StateManager::from_file(dir.path().join("missing.json")).unwrap();
    assert_eq!(missing.state(), &SyncState::new());

    let empty = dir.path().join("empty.json");
    std::fs::write(&empty, "").unwrap();
    assert_eq!(StateManager::from_file(&empty).unwrap().state(), &SyncState::new());
}

// ============================================================================
// Bookmark Tests
// ============================================================================

#[test]
fn test_bookmark_update() {
    let mut manager = StateManager::in_memory();
    assert!(manager.bookmark_date("events", "123").unwrap().is_none());

    manager.set_bookmark("events", "123", "2022-01-01".to_string());
    manager.set_bookmark("events", "123", "2022-01-02".to_string());

    assert_eq!(
        manager.bookmark_date("events", "123").unwrap(),
        NaiveDate::from_ymd_opt(2022, 1, 2)
    );
}

#[test]
fn test_bookmark_accepts_timestamps() {
    let manager = StateManager::from_json(
        r#"{"bookmarks": {"events": {"123": {"last_report_date": "2022-09-07T00:00:00Z"}}}}"#,
    )
    .unwrap();
    assert_eq!(
        manager.bookmark_date("events", "123").unwrap(),
        NaiveDate::from_ymd_opt(2022, 9, 7)
    );
}

#[test]
fn test_invalid_bookmark_is_state_error() {
    let manager = StateManager::from_json(
        r#"{"bookmarks": {"events": {"123": {"last_report_date": "yesterday"}}}}"#,
    )
    .unwrap();
    let err = manager.bookmark_date("events", "123").unwrap_err();
    assert!(err.to_string().contains("Invalid bookmark for stream 'events'"));
}

#[test]
fn test_currently_syncing() {
    let mut manager = StateManager::in_memory();
    manager.set_currently_syncing(Some("events"));
    assert_eq!(manager.state().currently_syncing.as_deref(), Some("events"));

    manager.set_currently_syncing(None);
    assert!(manager.state().currently_syncing.is_none());
    assert_eq!(manager.to_json().unwrap(), r#"{"currently_syncing":null,"bookmarks":{}}"#);
}

// ============================================================================
// Persistence Tests
// ============================================================================

#[tokio::test]
async fn test_checkpoint_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");

    let mut manager = StateManager::in_memory().with_checkpoint(&path);
    manager.set_bookmark("events", "123", "2022-09-07".to_string());
    manager.checkpoint().await.unwrap();

    assert!(!path.with_extension("tmp").exists());

    let reloaded = StateManager::from_file(&path).unwrap();
    assert_eq!(reloaded.state(), manager.state());
}

#[tokio::test]
async fn test_checkpoint_without_path_is_noop() {
    let manager = StateManager::in_memory();
    manager.checkpoint().await.unwrap();
}

#[tokio::test]
async fn test_save_to_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let manager = StateManager::in_memory();
    let err = manager
        .save_to_file(dir.path().join("nope").join("state.json"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Failed to write state file"));
}
