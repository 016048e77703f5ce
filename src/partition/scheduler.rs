//! Date range scheduling
//!
//! Decides which days a stream syncs. A run restarts from the bookmark but
//! never later than `today - conversion_window`, so data that GA4 may still
//! attribute is re-extracted; it never starts before `start_date`.

use super::types::DateRangeChunk;
use crate::config::TapConfig;
use chrono::{Days, NaiveDate, Utc};

/// Start/end resolution and chunking for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRangeScheduler {
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    conversion_window: u32,
    window_size: u32,
    today: NaiveDate,
}

impl DateRangeScheduler {
    /// Scheduler for the given config, anchored at `today`
    pub fn new(config: &TapConfig, today: NaiveDate) -> Self {
        Self {
            start_date: config.start_date,
            end_date: config.end_date,
            conversion_window: config.conversion_window,
            window_size: config.request_window_size,
            today,
        }
    }

    /// Scheduler anchored at the current UTC date
    pub fn for_today(config: &TapConfig) -> Self {
        Self::new(config, Utc::now().date_naive())
    }

    /// First day to request given the stream's bookmark
    pub fn start_date(&self, bookmark: Option<NaiveDate>) -> NaiveDate {
        let Some(bookmark) = bookmark else {
            return self.start_date;
        };

        let floor = self
            .today
            .checked_sub_days(Days::new(u64::from(self.conversion_window)))
            .unwrap_or(NaiveDate::MIN);
        let start = bookmark.min(self.start_date.max(floor));
        start.max(self.start_date)
    }

    /// Last day to request
    pub fn end_date(&self) -> NaiveDate {
        self.end_date.unwrap_or(self.today).min(self.today)
    }

    /// Chunks to fetch for a stream with this bookmark
    pub fn chunks(&self, bookmark: Option<NaiveDate>) -> Vec<DateRangeChunk> {
        chunk(self.start_date(bookmark), self.end_date(), self.window_size)
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }
}

/// Split `[start, end]` into contiguous inclusive windows of `window_days`
/// days. The last window is cut at `end`; `start > end` yields nothing.
pub fn chunk(start: NaiveDate, end: NaiveDate, window_days: u32) -> Vec<DateRangeChunk> {
    let span = u64::from(window_days.max(1) - 1);
    let mut chunks = Vec::new();
    let mut current = start;

    while current <= end {
        let chunk_end = current
            .checked_add_days(Days::new(span))
            .map_or(end, |d| d.min(end));
        chunks.push(DateRangeChunk::new(current, chunk_end));

        match chunk_end.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }

    chunks
}
