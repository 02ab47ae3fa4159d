//! # Record Store
//!
//! Ordered, append-only collection of records. Insertion order is preserved
//! and duplicates are allowed.
//!
//! The store has no observers. Whoever appends is responsible for reloading
//! any view that shows the records. In this crate the only writer is the
//! `ViewController` commit step, which runs on the single event loop thread,
//! so no locking is involved.

use crate::core::record::{Record, seed_records};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the five seed records.
    pub fn seeded() -> Self {
        Self::from(seed_records())
    }

    /// Add a record to the end. Any field values are accepted.
    pub fn append(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Current records, in insertion order.
    pub fn snapshot(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<Record>> for RecordStore {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_store_has_five_records() {
        let store = RecordStore::seeded();
        assert_eq!(store.len(), 5);
        assert_eq!(store.get(0), Some(&Record::new("Apple", "Green")));
        assert_eq!(store.get(4), Some(&Record::new("Lychee", "White")));
    }

    #[test]
    fn test_append_goes_last() {
        let mut store = RecordStore::seeded();
        store.append(Record::new("Kiwi", "Brown"));
        assert_eq!(store.len(), 6);
        assert_eq!(store.snapshot().last(), Some(&Record::new("Kiwi", "Brown")));
    }

    #[test]
    fn test_append_allows_empty_and_duplicate_records() {
        let mut store = RecordStore::new();
        store.append(Record::default());
        store.append(Record::default());
        assert_eq!(store.len(), 2);
        assert_eq!(store.snapshot()[0], store.snapshot()[1]);
    }

    #[test]
    fn test_empty_store_lookup() {
        let store = RecordStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get(0), None);
        assert!(store.snapshot().is_empty());
    }
}
