//! Search, filter and pagination over a record collection.
//!
//! The pipeline is a pure function of `(collection, query)`: it never
//! mutates or reorders the source records and keeps no state between calls.

use crate::Record;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Confirmation-status filter for record queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Confirmed,
    Unconfirmed,
}

impl StatusFilter {
    fn matches(self, record: &Record) -> bool {
        match self {
            Self::All => true,
            Self::Confirmed => record.confirmed,
            Self::Unconfirmed => !record.confirmed,
        }
    }
}

/// A combined search/status/date-range/pagination request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    /// Case-insensitive substring matched against name and notes.
    /// Empty matches everything.
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub status_filter: StatusFilter,
    /// Inclusive lower bound on `date_planted`.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on `date_planted`.
    pub date_to: Option<NaiveDate>,
    /// 1-indexed page number.
    pub page: usize,
    pub page_size: usize,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            status_filter: StatusFilter::All,
            date_from: None,
            date_to: None,
            page: 1,
            page_size: 20,
        }
    }
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPage {
    /// Records on the requested page, in source-collection order.
    pub records: Vec<Record>,
    /// Number of records matching the filters across all pages.
    pub filtered_count: usize,
    /// Total page count, never less than 1.
    pub total_pages: usize,
    /// The page that was requested.
    pub page: usize,
}

/// Filters and paginates `records` according to `query`.
///
/// All three filters combine with AND; relative record order is preserved.
/// A page past the end yields an empty `records` slice rather than an error;
/// callers that want to stay in range should clamp `page` to `total_pages`.
#[must_use]
pub fn run_query(records: &[Record], query: &Query) -> QueryPage {
    let needle = query.search_term.to_lowercase();

    let filtered: Vec<&Record> = records
        .iter()
        .filter(|record| {
            let matches_search = needle.is_empty()
                || record.name.to_lowercase().contains(&needle)
                || record.notes.to_lowercase().contains(&needle);

            let matches_status = query.status_filter.matches(record);

            let matches_date_range = query
                .date_from
                .map_or(true, |from| record.date_planted >= from)
                && query.date_to.map_or(true, |to| record.date_planted <= to);

            matches_search && matches_status && matches_date_range
        })
        .collect();

    let page_size = query.page_size.max(1);
    let total_pages = filtered.len().div_ceil(page_size).max(1);

    let start = query.page.saturating_sub(1).saturating_mul(page_size);
    let page_records = if start >= filtered.len() {
        Vec::new()
    } else {
        let end = filtered.len().min(start + page_size);
        filtered[start..end].iter().map(|r| (*r).clone()).collect()
    };

    QueryPage {
        records: page_records,
        filtered_count: filtered.len(),
        total_pages,
        page: query.page,
    }
}
