//! Date partitioning module
//!
//! # Overview
//!
//! Report windows are sliced into inclusive date chunks. Each chunk is a
//! unit of work: it is fetched, emitted and bookmarked before the next one
//! starts, so an interrupted run resumes at a chunk boundary.

mod scheduler;
mod types;

pub use scheduler::{chunk, DateRangeScheduler};
pub use types::{DateRangeChunk, DATE_FORMAT};
