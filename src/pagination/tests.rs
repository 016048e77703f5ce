//! Tests for pagination module

use super::*;
use pretty_assertions::assert_eq;
use test_case::test_case;

// ============================================================================
// OffsetPaginator Tests
// ============================================================================

#[test]
fn test_default_page_size() {
    assert_eq!(OffsetPaginator::default().limit, 100_000);
    assert_eq!(OffsetPaginator::default().initial_offset(), 0);
}

#[test_case(0, 0, false ; "empty report")]
#[test_case(0, 99_999, false ; "single partial page")]
#[test_case(0, 100_000, false ; "exactly one page")]
#[test_case(0, 100_001, true ; "one row over")]
#[test_case(100_000, 250_000, true ; "middle page")]
#[test_case(200_000, 250_000, false ; "last page")]
fn test_has_more(offset: u64, row_count: u64, expected: bool) {
    assert_eq!(OffsetPaginator::default().has_more(offset, row_count), expected);
}

#[test]
fn test_walks_all_pages() {
    let paginator = OffsetPaginator::new(10);
    let mut state = PaginationState::new();
    let mut offsets = vec![state.offset];

    while let NextPage::Continue { offset } = paginator.process_response(10, 25, &mut state) {
        offsets.push(offset);
    }

    assert_eq!(offsets, vec![0, 10, 20]);
    assert!(state.done);
    assert_eq!(state.pages, 3);
    assert_eq!(state.total_fetched, 30);
}

#[test]
fn test_single_page_is_done() {
    let paginator = OffsetPaginator::default();
    let mut state = PaginationState::new();

    let next = paginator.process_response(3, 3, &mut state);
    assert_eq!(next, NextPage::Done);
    assert_eq!(state.offset, 0);
    assert_eq!(state.total_fetched, 3);
}

#[test]
fn test_zero_limit_is_raised() {
    assert_eq!(OffsetPaginator::new(0).limit, 1);
}
