//! In-memory record store.
//!
//! Backs the demo session and integration tests. Implements the same query
//! semantics the remote store is expected to provide: equality filters,
//! case-insensitive substring search, view ordering, and the result cap.

use std::collections::HashMap;
use std::sync::Mutex;

use ab_core::ports::{RecordStorePort, StoreError};
use ab_core::query::view_order;
use ab_core::{AbbreviationRecord, RecordId, RecordPatch, RecordQuery};

pub struct InMemoryRecordStore {
    tables: Mutex<HashMap<String, Vec<AbbreviationRecord>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(HashMap::new()),
        }
    }

    pub fn seeded(table: &str, records: Vec<AbbreviationRecord>) -> Self {
        let store = Self::new();
        for record in records {
            store.insert(table, record);
        }
        store
    }

    pub fn insert(&self, table: &str, record: AbbreviationRecord) {
        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .push(record);
    }

    /// Full unfiltered table contents, for assertions.
    pub fn records(&self, table: &str) -> Vec<AbbreviationRecord> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl RecordStorePort for InMemoryRecordStore {
    async fn query(
        &self,
        table: &str,
        query: &RecordQuery,
    ) -> Result<Vec<AbbreviationRecord>, StoreError> {
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<AbbreviationRecord> = tables
            .get(table)
            .map(|records| {
                records
                    .iter()
                    .filter(|r| query.matches(r))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        rows.sort_by(view_order);
        rows.truncate(query.limit);
        Ok(rows)
    }

    async fn update(
        &self,
        table: &str,
        id: &RecordId,
        patch: &RecordPatch,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(records) = tables.get_mut(table) {
            for record in records.iter_mut().filter(|r| r.id == *id) {
                patch.apply_to(record);
            }
        }
        // Like the remote store, an id matching zero rows is not an error.
        Ok(())
    }

    async fn update_many(
        &self,
        table: &str,
        ids: &[RecordId],
        patch: &RecordPatch,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(records) = tables.get_mut(table) {
            for record in records.iter_mut().filter(|r| ids.contains(&r.id)) {
                patch.apply_to(record);
            }
        }
        Ok(())
    }
}
