//! Record repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over a keyed record collection.
//! - Keep storage layout details behind the `RecordRepository` trait.
//!
//! # Invariants
//! - Keys are unique within one repository.
//! - `create` never overwrites; `save` is the only upsert path.
//! - `update`/`delete` on a missing key return `NotFound`, never a silent no-op.
//! - Iteration order is insertion order; updates keep a record's position.

use crate::model::record::{FieldValue, Record, RecordKey};
use indexmap::IndexMap;
use log::debug;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

pub type RepoResult<T, K> = Result<T, RepoError<K>>;

/// Repository error for record operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError<K> {
    /// Operation targets a key that is not stored.
    NotFound(K),
    /// `create` collides with a stored key.
    DuplicateKey(K),
}

impl<K> RepoError<K> {
    /// Key the failed operation targeted.
    pub fn key(&self) -> &K {
        match self {
            Self::NotFound(key) | Self::DuplicateKey(key) => key,
        }
    }
}

impl<K: Display> Display for RepoError<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(key) => write!(f, "record not found: {key}"),
            Self::DuplicateKey(key) => write!(f, "record already exists: {key}"),
        }
    }
}

impl<K: Debug + Display> Error for RepoError<K> {}

/// Single-field equality filter.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub value: FieldValue,
}

impl FieldFilter {
    pub fn new(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Query options for listing records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordListQuery {
    pub filter: Option<FieldFilter>,
    pub limit: Option<u32>,
    pub offset: u32,
}

impl RecordListQuery {
    /// Query matching records whose `field` equals `value`.
    pub fn by_field(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            filter: Some(FieldFilter::new(field, value)),
            ..Self::default()
        }
    }
}

/// Repository interface for record CRUD operations.
pub trait RecordRepository {
    type Key: RecordKey;

    /// Inserts a new record; rejects a stored key with `DuplicateKey`.
    fn create(&mut self, record: Record<Self::Key>) -> RepoResult<Self::Key, Self::Key>;
    /// Inserts or replaces the record at its key.
    fn save(&mut self, record: Record<Self::Key>) -> RepoResult<Self::Key, Self::Key>;
    /// Returns the record or `NotFound`.
    fn read(&self, id: &Self::Key) -> RepoResult<Record<Self::Key>, Self::Key>;
    /// Returns the record when present.
    fn get(&self, id: &Self::Key) -> Option<Record<Self::Key>>;
    /// Replaces a stored record; `NotFound` when absent.
    fn update(&mut self, record: Record<Self::Key>) -> RepoResult<(), Self::Key>;
    /// Removes a stored record; `NotFound` when absent.
    fn delete(&mut self, id: &Self::Key) -> RepoResult<(), Self::Key>;
    fn exists(&self, id: &Self::Key) -> bool;
    fn count(&self) -> usize;
    /// All records in insertion order.
    fn find_all(&self) -> Vec<Record<Self::Key>>;
    /// Filtered, paginated view in insertion order.
    fn list(&self, query: &RecordListQuery) -> Vec<Record<Self::Key>>;
}

/// In-memory record repository backed by an insertion-ordered map.
#[derive(Debug, Clone)]
pub struct InMemoryRecordRepository<K> {
    records: IndexMap<K, Record<K>>,
}

impl<K: RecordKey> InMemoryRecordRepository<K> {
    pub fn new() -> Self {
        Self {
            records: IndexMap::new(),
        }
    }
}

impl<K: RecordKey> Default for InMemoryRecordRepository<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: RecordKey> RecordRepository for InMemoryRecordRepository<K> {
    type Key = K;

    fn create(&mut self, record: Record<K>) -> RepoResult<K, K> {
        if self.records.contains_key(&record.id) {
            debug!(
                "event=record_create module=repo status=error error_code=duplicate_key key={}",
                record.id
            );
            return Err(RepoError::DuplicateKey(record.id));
        }

        let id = record.id.clone();
        self.records.insert(id.clone(), record);
        debug!("event=record_create module=repo status=ok key={id}");
        Ok(id)
    }

    fn save(&mut self, record: Record<K>) -> RepoResult<K, K> {
        let id = record.id.clone();
        // IndexMap::insert keeps the slot of an existing key.
        let replaced = self.records.insert(id.clone(), record).is_some();
        debug!("event=record_save module=repo status=ok key={id} replaced={replaced}");
        Ok(id)
    }

    fn read(&self, id: &K) -> RepoResult<Record<K>, K> {
        self.get(id).ok_or_else(|| RepoError::NotFound(id.clone()))
    }

    fn get(&self, id: &K) -> Option<Record<K>> {
        self.records.get(id).cloned()
    }

    fn update(&mut self, record: Record<K>) -> RepoResult<(), K> {
        match self.records.get_mut(&record.id) {
            Some(slot) => {
                debug!("event=record_update module=repo status=ok key={}", record.id);
                *slot = record;
                Ok(())
            }
            None => {
                debug!(
                    "event=record_update module=repo status=error error_code=not_found key={}",
                    record.id
                );
                Err(RepoError::NotFound(record.id))
            }
        }
    }

    fn delete(&mut self, id: &K) -> RepoResult<(), K> {
        if self.records.shift_remove(id).is_none() {
            debug!("event=record_delete module=repo status=error error_code=not_found key={id}");
            return Err(RepoError::NotFound(id.clone()));
        }

        debug!("event=record_delete module=repo status=ok key={id}");
        Ok(())
    }

    fn exists(&self, id: &K) -> bool {
        self.records.contains_key(id)
    }

    fn count(&self) -> usize {
        self.records.len()
    }

    fn find_all(&self) -> Vec<Record<K>> {
        self.records.values().cloned().collect()
    }

    fn list(&self, query: &RecordListQuery) -> Vec<Record<K>> {
        let matching = self.records.values().filter(|record| match &query.filter {
            Some(filter) => record.field_equals(&filter.field, &filter.value),
            None => true,
        });
        let paged = matching.skip(query.offset as usize);

        match query.limit {
            Some(limit) => paged.take(limit as usize).cloned().collect(),
            None => paged.cloned().collect(),
        }
    }
}
