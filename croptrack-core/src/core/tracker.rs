//! High-level record-store operations over a Crop Tracker database.

use crate::core::stats::aggregate;
use crate::{Record, RecordDraft, RecordPatch, Result, Stats, Storage};
use log::{debug, warn};
use std::path::Path;
use uuid::Uuid;

/// Slot key holding the record collection. The name is carried over from
/// earlier releases so existing data files keep working.
pub const RECORDS_SLOT: &str = "crop_tracker_data";

/// An open crop record store backed by a SQLite key-value database.
///
/// `Tracker` is the sole owner of the persisted collection and the only
/// legal mutation path: it assigns ids and timestamps, enforces the
/// write-boundary invariants, and persists the whole collection on every
/// mutation. Construct one explicitly at application start and pass it by
/// reference to consumers; there is no global instance.
///
/// Two trackers opened on the same path are not coordinated: writes are
/// last-write-wins at whole-collection granularity. Single-writer use is
/// assumed throughout.
pub struct Tracker {
    storage: Storage,
}

impl Tracker {
    /// Creates a new store database at `path` and initialises the schema.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CropTrackError::Database`] for any SQLite failure.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let storage = Storage::create(path)?;
        Ok(Self { storage })
    }

    /// Opens an existing store database at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CropTrackError::InvalidStore`] if the file is not a
    /// Crop Tracker database, or [`crate::CropTrackError::Database`] for any
    /// SQLite failure.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let storage = Storage::open(path)?;
        Ok(Self { storage })
    }

    /// Returns the full collection in stored insertion order.
    ///
    /// Never fails: an absent slot, an unreadable database or a malformed
    /// payload all degrade to an empty collection. Corruption is treated as
    /// "no data", matching the behavior callers rely on for first launch.
    #[must_use]
    pub fn list(&self) -> Vec<Record> {
        match self.read_collection() {
            Ok(records) => records,
            Err(e) => {
                warn!("Unreadable record collection, treating as empty: {e}");
                Vec::new()
            }
        }
    }

    /// Adds a new record from `draft`, assigning a fresh unique id and
    /// setting both timestamps to the current instant.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CropTrackError::ValidationFailed`] if the draft
    /// violates the domain invariants, or a persistence error if the write
    /// fails; in either case the stored collection is unchanged.
    pub fn add(&mut self, draft: RecordDraft) -> Result<Record> {
        draft.validate()?;

        let mut records = self.list();
        let record = draft.into_record(Uuid::new_v4().to_string(), chrono::Utc::now());
        records.push(record.clone());
        self.write_collection(&records)?;

        debug!("Added record {} ({})", record.id, record.name);
        Ok(record)
    }

    /// Merges `patch` over the record with the given id and refreshes its
    /// `updated_at`. `id` and `created_at` cannot be patched.
    ///
    /// Returns `Ok(None)` without side effects when no record has that id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CropTrackError::ValidationFailed`] if the merged
    /// record would violate the domain invariants, or a persistence error if
    /// the write fails; the stored collection is unchanged on error.
    pub fn update(&mut self, id: &str, patch: RecordPatch) -> Result<Option<Record>> {
        let mut records = self.list();
        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        patch.apply(record);
        record.validate()?;
        record.updated_at = chrono::Utc::now();
        let updated = record.clone();

        self.write_collection(&records)?;

        debug!("Updated record {id}");
        Ok(Some(updated))
    }

    /// Removes the record with the given id, if present.
    ///
    /// Returns whether a record was actually removed; `Ok(false)` leaves the
    /// collection untouched.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the write fails.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let records = self.list();
        let remaining: Vec<Record> = records.iter().filter(|r| r.id != id).cloned().collect();
        if remaining.len() == records.len() {
            return Ok(false);
        }

        self.write_collection(&remaining)?;

        debug!("Deleted record {id}");
        Ok(true)
    }

    /// Removes every record. Irreversible.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the write fails.
    pub fn clear_all(&mut self) -> Result<()> {
        self.storage.delete_slot(RECORDS_SLOT)?;
        debug!("Cleared all records");
        Ok(())
    }

    /// Computes the aggregate statistics over the current collection in a
    /// single pass. Never fails; consistent with [`Tracker::list`] at the
    /// moment of the call.
    #[must_use]
    pub fn stats(&self) -> Stats {
        aggregate(&self.list())
    }

    fn read_collection(&self) -> Result<Vec<Record>> {
        match self.storage.read_slot(RECORDS_SLOT)? {
            Some(payload) => Ok(serde_json::from_str(&payload)?),
            None => Ok(Vec::new()),
        }
    }

    fn write_collection(&self, records: &[Record]) -> Result<()> {
        let payload = serde_json::to_string(records)?;
        self.storage.write_slot(RECORDS_SLOT, &payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::NamedTempFile;

    fn draft(name: &str) -> RecordDraft {
        RecordDraft {
            name: name.to_string(),
            date_planted: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            acreage: 2.0,
            expenses: 50000.0,
            notes: String::new(),
            confirmed: true,
        }
    }

    #[test]
    fn test_new_store_lists_empty() {
        let temp = NamedTempFile::new().unwrap();
        let tracker = Tracker::create(temp.path()).unwrap();
        assert!(tracker.list().is_empty());
    }

    #[test]
    fn test_add_assigns_identity_and_timestamps() {
        let temp = NamedTempFile::new().unwrap();
        let mut tracker = Tracker::create(temp.path()).unwrap();

        let a = tracker.add(draft("Maize")).unwrap();
        let b = tracker.add(draft("Rice")).unwrap();

        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, a.updated_at);

        let records = tracker.list();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Maize");
        assert_eq!(records[1].name, "Rice");
    }

    #[test]
    fn test_add_rejects_invalid_draft_without_side_effects() {
        let temp = NamedTempFile::new().unwrap();
        let mut tracker = Tracker::create(temp.path()).unwrap();

        let mut bad = draft("Maize");
        bad.acreage = -1.0;
        assert!(tracker.add(bad).is_err());
        assert!(tracker.list().is_empty());
    }

    #[test]
    fn test_update_merges_partial_fields() {
        let temp = NamedTempFile::new().unwrap();
        let mut tracker = Tracker::create(temp.path()).unwrap();

        let mut rice = draft("Rice");
        rice.acreage = 1.5;
        rice.expenses = 30000.0;
        let rice = tracker.add(rice).unwrap();

        let patch = RecordPatch {
            expenses: Some(35000.0),
            ..Default::default()
        };
        let updated = tracker.update(&rice.id, patch).unwrap().unwrap();

        assert_eq!(updated.expenses, 35000.0);
        assert_eq!(updated.acreage, 1.5);
        assert_eq!(updated.id, rice.id);
        assert_eq!(updated.created_at, rice.created_at);
        assert!(updated.updated_at >= rice.updated_at);

        // And the merge is persisted, not just returned.
        let listed = tracker.list();
        assert_eq!(listed[0].expenses, 35000.0);
        assert_eq!(listed[0].acreage, 1.5);
    }

    #[test]
    fn test_update_absent_id_is_a_null_result() {
        let temp = NamedTempFile::new().unwrap();
        let mut tracker = Tracker::create(temp.path()).unwrap();
        tracker.add(draft("Maize")).unwrap();

        let result = tracker.update("no-such-id", RecordPatch::default()).unwrap();
        assert!(result.is_none());
        assert_eq!(tracker.list().len(), 1);
    }

    #[test]
    fn test_update_rejects_out_of_domain_patch() {
        let temp = NamedTempFile::new().unwrap();
        let mut tracker = Tracker::create(temp.path()).unwrap();
        let maize = tracker.add(draft("Maize")).unwrap();

        let patch = RecordPatch {
            acreage: Some(0.0),
            ..Default::default()
        };
        assert!(tracker.update(&maize.id, patch).is_err());

        // Stored record is untouched.
        assert_eq!(tracker.list()[0].acreage, 2.0);
    }

    #[test]
    fn test_delete_removes_only_the_target() {
        let temp = NamedTempFile::new().unwrap();
        let mut tracker = Tracker::create(temp.path()).unwrap();
        let maize = tracker.add(draft("Maize")).unwrap();
        tracker.add(draft("Rice")).unwrap();

        assert!(tracker.delete(&maize.id).unwrap());
        let records = tracker.list();
        assert_eq!(records.len(), 1);
        assert!(records.iter().all(|r| r.id != maize.id));
    }

    #[test]
    fn test_delete_absent_id_returns_false_and_changes_nothing() {
        let temp = NamedTempFile::new().unwrap();
        let mut tracker = Tracker::create(temp.path()).unwrap();
        tracker.add(draft("Maize")).unwrap();

        let before = tracker.list();
        assert!(!tracker.delete("no-such-id").unwrap());
        assert_eq!(tracker.list(), before);
    }

    #[test]
    fn test_clear_all_empties_the_store() {
        let temp = NamedTempFile::new().unwrap();
        let mut tracker = Tracker::create(temp.path()).unwrap();
        tracker.add(draft("Maize")).unwrap();
        tracker.add(draft("Rice")).unwrap();

        tracker.clear_all().unwrap();
        assert!(tracker.list().is_empty());
        assert_eq!(tracker.stats().total_count, 0);
    }

    #[test]
    fn test_stats_concrete_scenario() {
        let temp = NamedTempFile::new().unwrap();
        let mut tracker = Tracker::create(temp.path()).unwrap();

        tracker.add(draft("Maize")).unwrap();
        let mut rice = draft("Rice");
        rice.date_planted = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        rice.acreage = 1.5;
        rice.expenses = 30000.0;
        rice.confirmed = false;
        tracker.add(rice).unwrap();

        let stats = tracker.stats();
        assert_eq!(stats.total_count, 2);
        assert_eq!(stats.total_acreage, 3.5);
        assert_eq!(stats.total_expenses, 80000.0);
        assert_eq!(stats.confirmed_count, 1);
    }

    #[test]
    fn test_insertion_order_survives_reopen() {
        let temp = NamedTempFile::new().unwrap();

        {
            let mut tracker = Tracker::create(temp.path()).unwrap();
            for name in ["Maize", "Rice", "Cassava", "Yam"] {
                tracker.add(draft(name)).unwrap();
            }
        }

        let tracker = Tracker::open(temp.path()).unwrap();
        let names: Vec<String> = tracker.list().into_iter().map(|r| r.name).collect();
        assert_eq!(names, ["Maize", "Rice", "Cassava", "Yam"]);
    }

    #[test]
    fn test_corrupt_payload_degrades_to_empty() {
        let temp = NamedTempFile::new().unwrap();
        let mut tracker = Tracker::create(temp.path()).unwrap();
        tracker.add(draft("Maize")).unwrap();

        tracker
            .storage
            .write_slot(RECORDS_SLOT, "not valid json")
            .unwrap();

        assert!(tracker.list().is_empty());
        assert_eq!(tracker.stats().total_count, 0);
    }
}
