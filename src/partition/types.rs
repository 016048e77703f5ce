//! Partition types
//!
//! A report window is split into inclusive date chunks; each chunk is
//! fetched, emitted and bookmarked on its own.

use crate::api::DateRange;
use chrono::NaiveDate;

/// Date format used by the Data API and in bookmarks
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// An inclusive range of report dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateRangeChunk {
    /// First day of the chunk
    pub start: NaiveDate,
    /// Last day of the chunk, inclusive
    pub end: NaiveDate,
}

impl DateRangeChunk {
    /// Create a chunk
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// First day as `YYYY-MM-DD`
    pub fn start_str(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    /// Last day as `YYYY-MM-DD`
    pub fn end_str(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }

    /// Request form of this chunk
    pub fn to_date_range(&self) -> DateRange {
        DateRange {
            start_date: self.start_str(),
            end_date: self.end_str(),
        }
    }
}

impl std::fmt::Display for DateRangeChunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.start_str(), self.end_str())
    }
}
