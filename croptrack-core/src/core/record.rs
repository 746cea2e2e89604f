//! The persisted record shape and its write-boundary input types.
//!
//! The on-disk payload keeps the camelCase field names and ISO date strings
//! of earlier releases, so an existing data slot deserializes unchanged.

use crate::{CropTrackError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One crop-planting entry.
///
/// `id`, `created_at` and `updated_at` are assigned by the store and never
/// supplied by callers; see [`RecordDraft`] and [`RecordPatch`] for the
/// caller-facing input shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Store-assigned unique identifier, immutable after creation.
    pub id: String,
    /// Crop name, never empty.
    pub name: String,
    /// Calendar date the crop was planted (no time component).
    pub date_planted: NaiveDate,
    /// Land area in acres, always positive.
    pub acreage: f64,
    /// Monetary expenses, never negative. Currency-agnostic at this level.
    pub expenses: f64,
    /// Free-text notes, may be empty.
    pub notes: String,
    /// Whether the planting has been confirmed.
    pub confirmed: bool,
    /// Set once at creation.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation; never earlier than `created_at`.
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDraft {
    pub name: String,
    pub date_planted: NaiveDate,
    pub acreage: f64,
    pub expenses: f64,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub confirmed: bool,
}

/// A partial update. Fields left as `None` are retained unchanged.
///
/// There is deliberately no way to patch `id` or the timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPatch {
    pub name: Option<String>,
    pub date_planted: Option<NaiveDate>,
    pub acreage: Option<f64>,
    pub expenses: Option<f64>,
    pub notes: Option<String>,
    pub confirmed: Option<bool>,
}

impl RecordDraft {
    /// Checks the domain invariants the store enforces at the write boundary.
    ///
    /// # Errors
    ///
    /// Returns [`CropTrackError::ValidationFailed`] if the name is empty,
    /// the acreage is not a positive finite number, or the expenses are not
    /// a non-negative finite number.
    pub fn validate(&self) -> Result<()> {
        validate_fields(&self.name, self.acreage, self.expenses)
    }

    /// Promotes the draft to a full [`Record`] with store-assigned identity.
    pub(crate) fn into_record(self, id: String, now: DateTime<Utc>) -> Record {
        Record {
            id,
            name: self.name,
            date_planted: self.date_planted,
            acreage: self.acreage,
            expenses: self.expenses,
            notes: self.notes,
            confirmed: self.confirmed,
            created_at: now,
            updated_at: now,
        }
    }
}

impl RecordPatch {
    /// True when the patch supplies no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.date_planted.is_none()
            && self.acreage.is_none()
            && self.expenses.is_none()
            && self.notes.is_none()
            && self.confirmed.is_none()
    }

    /// Merges the supplied fields over `record`, leaving everything else
    /// (including identity and timestamps) untouched.
    pub(crate) fn apply(self, record: &mut Record) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(date_planted) = self.date_planted {
            record.date_planted = date_planted;
        }
        if let Some(acreage) = self.acreage {
            record.acreage = acreage;
        }
        if let Some(expenses) = self.expenses {
            record.expenses = expenses;
        }
        if let Some(notes) = self.notes {
            record.notes = notes;
        }
        if let Some(confirmed) = self.confirmed {
            record.confirmed = confirmed;
        }
    }
}

impl Record {
    /// Re-checks the write-boundary invariants after a patch has been merged.
    pub(crate) fn validate(&self) -> Result<()> {
        validate_fields(&self.name, self.acreage, self.expenses)
    }
}

fn validate_fields(name: &str, acreage: f64, expenses: f64) -> Result<()> {
    if name.trim().is_empty() {
        return Err(CropTrackError::ValidationFailed(
            "Crop name must not be empty".to_string(),
        ));
    }
    if !acreage.is_finite() || acreage <= 0.0 {
        return Err(CropTrackError::ValidationFailed(
            "Acreage must be a positive number".to_string(),
        ));
    }
    if !expenses.is_finite() || expenses < 0.0 {
        return Err(CropTrackError::ValidationFailed(
            "Expenses must not be negative".to_string(),
        ));
    }
    Ok(())
}
