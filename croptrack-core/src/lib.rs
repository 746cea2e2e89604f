//! Core library for Crop Tracker — a local-first crop planting and expense
//! record keeper.
//!
//! The primary entry point is [`Tracker`], which owns the persisted record
//! collection in an on-device SQLite file. All mutations go through
//! `Tracker` methods; the derived views — [`aggregate`] statistics, the
//! [`run_query`] search/filter/pagination pipeline and the [`to_csv`] /
//! [`to_report`] export transforms — are pure functions over the
//! collection `Tracker` hands out.
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use core::{
    error::{CropTrackError, Result},
    export::{to_csv, to_report, CSV_HEADERS},
    format::{format_currency, format_date, format_number, format_number_with},
    query::{run_query, Query, QueryPage, StatusFilter},
    record::{Record, RecordDraft, RecordPatch},
    stats::{aggregate, Stats},
    storage::Storage,
    tracker::{Tracker, RECORDS_SLOT},
};
