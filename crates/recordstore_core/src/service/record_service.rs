//! Record use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for core callers.
//! - Assign keys for records created without one.
//!
//! # Invariants
//! - Service APIs never bypass repository contracts.
//! - Generated keys never collide with keys already stored.

use crate::model::key::KeyGenerator;
use crate::model::record::{Fields, Record};
use crate::repo::record_repo::{RecordListQuery, RecordRepository, RepoError, RepoResult};
use log::warn;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// Failure of `RecordService::create_generated`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError<K> {
    /// Key generator has no unused keys left.
    KeysExhausted,
    Repo(RepoError<K>),
}

impl<K: Display> Display for GenerateError<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::KeysExhausted => write!(f, "key generator exhausted"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl<K: Debug + Display + 'static> Error for GenerateError<K> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::KeysExhausted => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl<K> From<RepoError<K>> for GenerateError<K> {
    fn from(value: RepoError<K>) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service wrapper owning one repository and one key source.
pub struct RecordService<R, G> {
    repo: R,
    keys: G,
}

impl<R, G> RecordService<R, G>
where
    R: RecordRepository,
    G: KeyGenerator<Key = R::Key>,
{
    /// Creates a service using the provided repository and key generator.
    pub fn new(repo: R, keys: G) -> Self {
        Self { repo, keys }
    }

    /// Creates a record under its own key.
    pub fn create(&mut self, record: Record<R::Key>) -> RepoResult<R::Key, R::Key> {
        self.repo.create(record)
    }

    /// Creates a record under a freshly generated key.
    ///
    /// # Contract
    /// - Keys already present (e.g. inserted with caller-chosen ids) are skipped.
    /// - Returns the assigned key, or `KeysExhausted` when the generator runs dry.
    pub fn create_generated(&mut self, fields: Fields) -> Result<R::Key, GenerateError<R::Key>> {
        loop {
            let Some(key) = self.keys.next_key() else {
                warn!(
                    "event=record_generate module=service status=error error_code=keys_exhausted"
                );
                return Err(GenerateError::KeysExhausted);
            };
            if self.repo.exists(&key) {
                continue;
            }
            return Ok(self.repo.create(Record::with_fields(key, fields))?);
        }
    }

    pub fn save(&mut self, record: Record<R::Key>) -> RepoResult<R::Key, R::Key> {
        self.repo.save(record)
    }

    pub fn read(&self, id: &R::Key) -> RepoResult<Record<R::Key>, R::Key> {
        self.repo.read(id)
    }

    pub fn get(&self, id: &R::Key) -> Option<Record<R::Key>> {
        self.repo.get(id)
    }

    /// Returns repository-level not-found errors unchanged.
    pub fn update(&mut self, record: Record<R::Key>) -> RepoResult<(), R::Key> {
        self.repo.update(record)
    }

    pub fn delete(&mut self, id: &R::Key) -> RepoResult<(), R::Key> {
        self.repo.delete(id)
    }

    pub fn find_all(&self) -> Vec<Record<R::Key>> {
        self.repo.find_all()
    }

    /// Lists records using filter and pagination options.
    pub fn list(&self, query: &RecordListQuery) -> Vec<Record<R::Key>> {
        self.repo.list(query)
    }

    pub fn count(&self) -> usize {
        self.repo.count()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }
}
