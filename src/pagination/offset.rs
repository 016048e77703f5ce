//! Offset pagination over `runReport`
//!
//! Every response carries the total `rowCount` for the query. A page is
//! followed by another while `offset + limit < rowCount`.

use super::types::{NextPage, PaginationState};

/// Largest page the Data API returns
pub const MAX_PAGE_SIZE: u64 = 100_000;

/// Offset/limit pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetPaginator {
    /// Rows requested per page
    pub limit: u64,
}

impl Default for OffsetPaginator {
    fn default() -> Self {
        Self::new(MAX_PAGE_SIZE)
    }
}

impl OffsetPaginator {
    /// Create a paginator with the given page size
    pub fn new(limit: u64) -> Self {
        Self {
            limit: limit.max(1),
        }
    }

    /// Offset of the first request
    pub fn initial_offset(&self) -> u64 {
        0
    }

    /// Whether rows remain after the page at `offset`
    pub fn has_more(&self, offset: u64, row_count: u64) -> bool {
        offset.saturating_add(self.limit) < row_count
    }

    /// Record a response and compute the next page
    pub fn process_response(
        &self,
        rows_in_page: usize,
        row_count: u64,
        state: &mut PaginationState,
    ) -> NextPage {
        state.add_page(rows_in_page as u64);

        if !self.has_more(state.offset, row_count) {
            state.mark_done();
            return NextPage::Done;
        }

        state.add_offset(self.limit);
        NextPage::Continue {
            offset: state.offset,
        }
    }
}
