//! Paged report fetching
//!
//! One chunk of one report is a lazy stream of `runReport` pages. The
//! request is ordered by date and asks for the property quota so token use
//! can be logged per page.

use super::planner::SelectedFields;
use crate::api::{
    DateRange, Dimension, FilterExpression, Metric, OrderBy, ReportingApi, RunReportRequest,
    RunReportResponse,
};
use crate::error::{Error, Result};
use crate::pagination::{NextPage, OffsetPaginator, PaginationState};
use crate::types::REPLICATION_KEY;
use futures::stream::{self, Stream};
use tracing::info;

/// Fetches report pages for one property
pub struct ReportFetcher<'a, A: ReportingApi> {
    api: &'a A,
    property_id: String,
    paginator: OffsetPaginator,
}

impl<'a, A: ReportingApi> ReportFetcher<'a, A> {
    pub fn new(api: &'a A, property_id: impl Into<String>) -> Self {
        Self {
            api,
            property_id: property_id.into(),
            paginator: OffsetPaginator::default(),
        }
    }

    /// Use a different page size
    #[must_use]
    pub fn with_paginator(mut self, paginator: OffsetPaginator) -> Self {
        self.paginator = paginator;
        self
    }

    /// First-page request for a date range
    pub fn build_request(
        &self,
        fields: &SelectedFields,
        dimension_filter: Option<FilterExpression>,
        date_range: DateRange,
    ) -> RunReportRequest {
        RunReportRequest {
            property_id: self.property_id.clone(),
            dimensions: fields
                .dimensions
                .iter()
                .map(|name| Dimension { name: name.clone() })
                .collect(),
            metrics: fields
                .metrics
                .iter()
                .map(|name| Metric { name: name.clone() })
                .collect(),
            date_ranges: vec![date_range],
            limit: self.paginator.limit,
            offset: self.paginator.initial_offset(),
            return_property_quota: true,
            order_bys: vec![OrderBy::numeric(REPLICATION_KEY)],
            dimension_filter,
        }
    }

    /// Pages of `request`, fetched on demand
    pub fn fetch(
        &self,
        report: &str,
        request: RunReportRequest,
    ) -> impl Stream<Item = Result<RunReportResponse>> + '_ {
        let report = report.to_string();
        let initial = PaginationState {
            offset: request.offset,
            ..PaginationState::new()
        };

        stream::try_unfold(Some(initial), move |state| {
            let mut page = request.clone();
            let report = report.clone();
            async move {
                let Some(mut state) = state else {
                    return Ok::<_, Error>(None);
                };
                page.offset = state.offset;

                let response = self.api.run_report(&page).await?;
                info!(
                    report = %report,
                    offset = page.offset,
                    rows = response.rows.len(),
                    row_count = response.row_count,
                    tokens = response.tokens_consumed(),
                    "Fetched report page; property quota tokens consumed"
                );

                let next = match self.paginator.process_response(
                    response.rows.len(),
                    response.row_count,
                    &mut state,
                ) {
                    NextPage::Continue { .. } => Some(state),
                    NextPage::Done => None,
                };
                Ok::<_, Error>(Some((response, next)))
            }
        })
    }
}
