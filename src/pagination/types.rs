//! Pagination types
//!
//! Tracks progress through the pages of a single report chunk.

/// Result of the next page computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPage {
    /// More rows remain starting at this offset
    Continue {
        /// Offset of the next request
        offset: u64,
    },
    /// No more pages
    Done,
}

/// Pagination state for one chunk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Offset of the current request
    pub offset: u64,
    /// Pages fetched so far
    pub pages: u32,
    /// Rows fetched so far
    pub total_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Add offset
    pub fn add_offset(&mut self, amount: u64) {
        self.offset += amount;
    }

    /// Record a fetched page
    pub fn add_page(&mut self, rows: u64) {
        self.pages += 1;
        self.total_fetched += rows;
    }
}
