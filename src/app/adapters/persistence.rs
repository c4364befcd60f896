//! Persistence collaborator for validated records
//!
//! The ingestion core never writes storage itself. It hands records to a
//! [`RecordStore`], which assigns identities and owns everything about how
//! rows are kept. [`MemoryStore`] is the in-process implementation used by
//! the CLI and the tests.

use crate::app::models::{FieldMap, Record, RecordId, RecordKind};
use crate::{Error, Result};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Storage for validated records grouped into named upload sets
pub trait RecordStore {
    /// Store a record as a member of `set_name` and return its new identity
    fn insert(&mut self, set_name: &str, record: &Record) -> Result<RecordId>;

    /// Replace the fields of a stored record
    fn update(&mut self, id: RecordId, record: &Record) -> Result<()>;

    /// Remove a stored record
    fn delete(&mut self, kind: RecordKind, id: RecordId) -> Result<()>;
}

#[derive(Debug, Clone)]
struct StoredRecord {
    set_name: String,
    record: Record,
}

/// Record store held in memory, one table per record kind
///
/// Identities start at 1 and increase per kind; deleted identities are
/// never reused.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: HashMap<RecordKind, BTreeMap<RecordId, StoredRecord>>,
    next_ids: HashMap<RecordKind, RecordId>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: RecordKind, id: RecordId) -> Option<&Record> {
        self.tables
            .get(&kind)
            .and_then(|table| table.get(&id))
            .map(|stored| &stored.record)
    }

    /// Column values of a stored record
    pub fn row(&self, kind: RecordKind, id: RecordId) -> Option<FieldMap> {
        self.get(kind, id).map(Record::field_map)
    }

    /// Number of stored records of a kind
    pub fn count(&self, kind: RecordKind) -> usize {
        self.tables.get(&kind).map_or(0, BTreeMap::len)
    }

    /// Identities of the records uploaded under a set name, in id order
    pub fn set_members(&self, kind: RecordKind, set_name: &str) -> Vec<RecordId> {
        self.tables
            .get(&kind)
            .map(|table| {
                table
                    .iter()
                    .filter(|(_, stored)| stored.set_name == set_name)
                    .map(|(id, _)| *id)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn stored_mut(&mut self, kind: RecordKind, id: RecordId) -> Result<&mut StoredRecord> {
        self.tables
            .get_mut(&kind)
            .and_then(|table| table.get_mut(&id))
            .ok_or_else(|| Error::record_not_found(kind, id))
    }
}

impl RecordStore for MemoryStore {
    fn insert(&mut self, set_name: &str, record: &Record) -> Result<RecordId> {
        let kind = record.kind();
        let next_id = self.next_ids.entry(kind).or_insert(1);
        let id = *next_id;
        *next_id += 1;

        let mut stored = record.clone();
        stored.set_id(id);
        self.tables.entry(kind).or_default().insert(
            id,
            StoredRecord {
                set_name: set_name.to_string(),
                record: stored,
            },
        );

        debug!("Inserted {} {} into set {}", kind, id, set_name);
        Ok(id)
    }

    fn update(&mut self, id: RecordId, record: &Record) -> Result<()> {
        let stored = self.stored_mut(record.kind(), id)?;
        let mut replacement = record.clone();
        replacement.set_id(id);
        stored.record = replacement;
        Ok(())
    }

    fn delete(&mut self, kind: RecordKind, id: RecordId) -> Result<()> {
        self.tables
            .get_mut(&kind)
            .and_then(|table| table.remove(&id))
            .map(|_| ())
            .ok_or_else(|| Error::record_not_found(kind, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{FieldValue, FlightPath, Route};

    #[test]
    fn test_insert_assigns_increasing_ids_per_kind() {
        let mut store = MemoryStore::new();
        let route = Record::from(Route::new("BA", "SIN", "MEL", true, 0, "744"));
        let path = Record::from(FlightPath::new("FIX", "ATMAP", 35000, -12.0, 118.26));

        assert_eq!(store.insert("Routes 2020", &route).unwrap(), 1);
        assert_eq!(store.insert("Routes 2020", &route).unwrap(), 2);
        assert_eq!(store.insert("Paths", &path).unwrap(), 1);

        assert_eq!(store.count(RecordKind::Route), 2);
        assert_eq!(store.get(RecordKind::Route, 2).and_then(Record::id), Some(2));
        assert_eq!(store.set_members(RecordKind::Route, "Routes 2020"), vec![1, 2]);
        assert!(store.set_members(RecordKind::Route, "Paths").is_empty());
    }

    #[test]
    fn test_update_replaces_fields() {
        let mut store = MemoryStore::new();
        let id = store
            .insert("set", &Record::from(Route::new("BA", "SIN", "MEL", true, 0, "744")))
            .unwrap();

        let changed = Record::from(Route::new("QF", "SIN", "MEL", false, 1, "388"));
        store.update(id, &changed).unwrap();

        let row = store.row(RecordKind::Route, id).unwrap();
        assert_eq!(row.get("Airline"), Some(&FieldValue::text("QF")));
        assert_eq!(row.get("Stops"), Some(&FieldValue::Integer(1)));
    }

    #[test]
    fn test_update_and_delete_missing_record() {
        let mut store = MemoryStore::new();
        let route = Record::from(Route::new("BA", "SIN", "MEL", true, 0, "744"));

        assert!(matches!(
            store.update(7, &route).unwrap_err(),
            Error::RecordNotFound { id: 7, .. }
        ));
        assert!(store.delete(RecordKind::Route, 7).is_err());
    }

    #[test]
    fn test_deleted_ids_are_not_reused() {
        let mut store = MemoryStore::new();
        let route = Record::from(Route::new("BA", "SIN", "MEL", true, 0, "744"));
        let first = store.insert("set", &route).unwrap();
        store.delete(RecordKind::Route, first).unwrap();

        assert_eq!(store.count(RecordKind::Route), 0);
        assert_eq!(store.insert("set", &route).unwrap(), first + 1);
    }
}
