//! Aggregate statistics derived from a record collection.

use crate::Record;
use serde::{Deserialize, Serialize};

/// The four derived totals computed over a record collection.
///
/// Ratios and percentages (e.g. share of confirmed plantings) are left to
/// the caller, which also owns the zero-record edge case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_count: usize,
    pub total_acreage: f64,
    pub total_expenses: f64,
    pub confirmed_count: usize,
}

/// Folds a record collection into its [`Stats`] in a single pass.
///
/// Pure and deterministic; an empty collection yields all-zero totals.
#[must_use]
pub fn aggregate(records: &[Record]) -> Stats {
    records.iter().fold(Stats::default(), |mut stats, record| {
        stats.total_count += 1;
        stats.total_acreage += record.acreage;
        stats.total_expenses += record.expenses;
        if record.confirmed {
            stats.confirmed_count += 1;
        }
        stats
    })
}
