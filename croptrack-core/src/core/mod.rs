//! Internal domain modules for the Crop Tracker core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod error;
pub mod export;
pub mod format;
pub mod query;
pub mod record;
pub mod stats;
pub mod storage;
pub mod tracker;

#[doc(inline)]
pub use error::{CropTrackError, Result};
#[doc(inline)]
pub use export::{to_csv, to_report, CSV_HEADERS};
#[doc(inline)]
pub use format::{format_currency, format_date, format_number, format_number_with};
#[doc(inline)]
pub use query::{run_query, Query, QueryPage, StatusFilter};
#[doc(inline)]
pub use record::{Record, RecordDraft, RecordPatch};
#[doc(inline)]
pub use stats::{aggregate, Stats};
#[doc(inline)]
pub use storage::Storage;
#[doc(inline)]
pub use tracker::{Tracker, RECORDS_SLOT};
