//! Pagination module
//!
//! # Overview
//!
//! Reports are paged with `limit`/`offset`. The paginator decides from the
//! reported `rowCount` whether another request is needed for a chunk.

mod offset;
mod types;

pub use offset::{OffsetPaginator, MAX_PAGE_SIZE};
pub use types::{NextPage, PaginationState};

#[cfg(test)]
mod tests;
