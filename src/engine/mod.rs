//! Sync engine module
//!
//! Runs the selected streams of a catalog one after another.
//!
//! # Overview
//!
//! For every stream the engine:
//! - marks it as `currently_syncing` and flushes state
//! - emits its SCHEMA
//! - plans the fields to request
//! - fetches, maps and emits every date chunk, bookmarking after each
//!
//! A failed run keeps every bookmark flushed before the failure, and the
//! next run resumes with the stream that was in progress.

mod fetcher;
mod planner;
mod types;

pub use fetcher::ReportFetcher;
pub use planner::{SelectedFields, StreamPlanner};
pub use types::{SyncPhase, SyncStats};

use crate::api::ReportingApi;
use crate::catalog::{Catalog, CatalogEntry};
use crate::config::TapConfig;
use crate::decode::RecordMapper;
use crate::error::Result;
use crate::output::MessageSink;
use crate::partition::{DateRangeChunk, DateRangeScheduler};
use crate::reports::premade_filter;
use crate::state::StateManager;
use chrono::{NaiveDate, Utc};
use futures::TryStreamExt;
use std::pin::pin;
use std::time::Instant;
use tracing::{debug, info};

/// Sync engine for orchestrating report extraction
pub struct SyncEngine<A: ReportingApi, S: MessageSink> {
    /// Reporting API
    api: A,
    /// Output
    sink: S,
    /// State manager
    state: StateManager,
    /// Tap configuration
    config: TapConfig,
    /// Date window resolution
    scheduler: DateRangeScheduler,
    /// Current phase
    phase: SyncPhase,
    /// Statistics
    stats: SyncStats,
}

impl<A: ReportingApi, S: MessageSink> SyncEngine<A, S> {
    /// Create a new sync engine anchored at the current UTC date
    pub fn new(api: A, sink: S, config: TapConfig, state: StateManager) -> Self {
        let scheduler = DateRangeScheduler::for_today(&config);
        Self {
            api,
            sink,
            state,
            config,
            scheduler,
            phase: SyncPhase::Idle,
            stats: SyncStats::default(),
        }
    }

    /// Anchor date windows at `today` instead of the current date
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.scheduler = DateRangeScheduler::new(&self.config, today);
        self
    }

    /// Get the state manager
    pub fn state(&self) -> &StateManager {
        &self.state
    }

    /// Get the API client
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Get the sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Get statistics
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Get the current phase
    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// Consume the engine, returning the sink and state
    pub fn into_parts(self) -> (S, StateManager) {
        (self.sink, self.state)
    }

    /// Sync every selected stream of the catalog
    pub async fn sync(&mut self, catalog: &Catalog) -> Result<SyncStats> {
        let start = Instant::now();
        let result = self.sync_all(catalog).await;
        self.stats.set_duration(start.elapsed().as_millis() as u64);

        match result {
            Ok(()) => {
                self.phase = SyncPhase::Done;
                info!(
                    streams = self.stats.streams_synced,
                    records = self.stats.records_synced,
                    duration_ms = self.stats.duration_ms,
                    "Sync complete"
                );
                Ok(self.stats.clone())
            }
            Err(e) => {
                self.phase = SyncPhase::Failed;
                Err(e)
            }
        }
    }

    async fn sync_all(&mut self, catalog: &Catalog) -> Result<()> {
        let streams = order_streams(
            catalog.selected_streams(),
            self.state.state().currently_syncing.as_deref(),
        );
        if streams.is_empty() {
            info!("No streams selected");
        }

        for entry in streams {
            self.sync_stream(entry).await?;
        }

        self.state.set_currently_syncing(None);
        self.flush_state().await
    }

    /// Sync one stream from its bookmark up to the end date.
    ///
    /// State is keyed by `tap_stream_id`; messages carry the stream name.
    pub async fn sync_stream(&mut self, entry: &CatalogEntry) -> Result<()> {
        let stream = entry.tap_stream_id.as_str();
        info!(stream, name = %entry.stream, "Starting sync");

        self.state.set_currently_syncing(Some(stream));
        self.flush_state().await?;

        self.sink
            .emit_schema(&entry.stream, &entry.schema, &entry.key_properties)?;

        self.phase = SyncPhase::SelectingFields;
        let fields = StreamPlanner::plan(entry)?;
        debug!(
            stream,
            dimensions = ?fields.dimensions,
            metrics = ?fields.metrics,
            "Planned fields"
        );

        let bookmark = self
            .state
            .bookmark_date(stream, &self.config.property_id)?;
        let chunks = self.scheduler.chunks(bookmark);
        let mut mapper = RecordMapper::new(
            self.config.property_id.clone(),
            self.config.account_id.clone(),
            stream,
        );

        let mut records = 0;
        for chunk in chunks {
            records += self.sync_chunk(entry, &fields, &mut mapper, chunk).await?;

            self.phase = SyncPhase::Bookmarking;
            self.state
                .set_bookmark(stream, &self.config.property_id, chunk.end_str());
            self.flush_state().await?;
            self.stats.add_chunk();
        }

        self.stats.add_stream();
        info!(stream, records, "Finished sync");
        Ok(())
    }

    /// Fetch and emit every page of one chunk
    async fn sync_chunk(
        &mut self,
        entry: &CatalogEntry,
        fields: &SelectedFields,
        mapper: &mut RecordMapper,
        chunk: DateRangeChunk,
    ) -> Result<usize> {
        let stream = entry.tap_stream_id.as_str();
        let filter = if entry.is_premade() {
            premade_filter(stream)
        } else {
            None
        };

        self.phase = SyncPhase::FetchingChunk;
        debug!(stream, chunk = %chunk, "Fetching chunk");

        let fetcher = ReportFetcher::new(&self.api, self.config.property_id.clone());
        let request = fetcher.build_request(fields, filter, chunk.to_date_range());
        let mut pages = pin!(fetcher.fetch(stream, request));

        let mut emitted = 0;
        while let Some(response) = pages.try_next().await? {
            self.stats.add_page();
            self.phase = SyncPhase::EmittingRecords;

            let time_extracted = Utc::now();
            for record in mapper.map_response(&response)? {
                self.sink
                    .emit_record(&entry.stream, record, time_extracted)?;
                emitted += 1;
            }
        }

        self.stats.add_records(emitted);
        Ok(emitted)
    }

    async fn flush_state(&mut self) -> Result<()> {
        self.sink.emit_state(self.state.state())?;
        self.state.checkpoint().await
    }
}

/// Selected streams sorted by id, rotated so an interrupted stream resumes
/// first. An unknown `currently_syncing` leaves the sorted order alone.
pub fn order_streams<'a>(
    mut streams: Vec<&'a CatalogEntry>,
    currently_syncing: Option<&str>,
) -> Vec<&'a CatalogEntry> {
    streams.sort_by(|a, b| a.tap_stream_id.cmp(&b.tap_stream_id));

    if let Some(current) = currently_syncing {
        if let Some(pos) = streams.iter().position(|s| s.tap_stream_id == current) {
            streams.rotate_left(pos);
        }
    }

    streams
}
