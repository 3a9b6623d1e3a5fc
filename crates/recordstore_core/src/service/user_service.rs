//! User use-case service.
//!
//! # Responsibility
//! - Register, look up and list users as `UserDto` values.
//! - Map DTOs to generic records before they reach the repository.
//!
//! # Invariants
//! - Users without an id get a sequential one that is not yet stored.
//! - Stored records that fail DTO mapping surface as `Mapping` errors.

use crate::model::key::SequentialKeys;
use crate::model::record::Record;
use crate::model::user::{MappingError, UserDto, FIELD_EMAIL, FIELD_LAST_NAME};
use crate::repo::record_repo::{RecordListQuery, RecordRepository, RepoError};
use crate::service::record_service::{GenerateError, RecordService};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type UserServiceResult<T> = Result<T, UserServiceError>;

/// Service error for user use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserServiceError {
    /// Update requested for a user that was never registered.
    MissingId,
    NotFound(i64),
    DuplicateId(i64),
    /// No unused sequential id is left.
    IdsExhausted,
    /// Stored record does not have the user shape.
    Mapping(MappingError),
}

impl Display for UserServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingId => write!(f, "user has no id"),
            Self::NotFound(id) => write!(f, "user not found: {id}"),
            Self::DuplicateId(id) => write!(f, "user already exists: {id}"),
            Self::IdsExhausted => write!(f, "no user ids left to assign"),
            Self::Mapping(err) => write!(f, "{err}"),
        }
    }
}

impl Error for UserServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Mapping(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError<i64>> for UserServiceError {
    fn from(value: RepoError<i64>) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::DuplicateKey(id) => Self::DuplicateId(id),
        }
    }
}

impl From<GenerateError<i64>> for UserServiceError {
    fn from(value: GenerateError<i64>) -> Self {
        match value {
            GenerateError::KeysExhausted => Self::IdsExhausted,
            GenerateError::Repo(err) => err.into(),
        }
    }
}

impl From<MappingError> for UserServiceError {
    fn from(value: MappingError) -> Self {
        Self::Mapping(value)
    }
}

/// User service facade over an `i64`-keyed repository.
pub struct UserService<R> {
    records: RecordService<R, SequentialKeys>,
}

impl<R: RecordRepository<Key = i64>> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self::with_keys(repo, SequentialKeys::new())
    }

    /// Creates a service whose generated ids come from `keys`.
    pub fn with_keys(repo: R, keys: SequentialKeys) -> Self {
        Self {
            records: RecordService::new(repo, keys),
        }
    }

    /// Stores a new user and returns it with its assigned id.
    pub fn register_user(&mut self, user: &UserDto) -> UserServiceResult<UserDto> {
        let id = match user.id {
            Some(id) => self.records.create(user.to_record(id))?,
            None => self.records.create_generated(user.to_fields())?,
        };
        info!("event=user_register module=service status=ok user_id={id}");

        let stored = self.records.read(&id)?;
        Ok(UserDto::from_record(&stored)?)
    }

    pub fn get_user_by_id(&self, id: i64) -> UserServiceResult<Option<UserDto>> {
        self.records
            .get(&id)
            .map(|record| UserDto::from_record(&record))
            .transpose()
            .map_err(UserServiceError::from)
    }

    pub fn get_all_users(&self) -> UserServiceResult<Vec<UserDto>> {
        map_all(self.records.find_all())
    }

    pub fn find_by_last_name(&self, last_name: &str) -> UserServiceResult<Vec<UserDto>> {
        map_all(
            self.records
                .list(&RecordListQuery::by_field(FIELD_LAST_NAME, last_name)),
        )
    }

    /// Returns the first user registered with `email`.
    pub fn find_by_email(&self, email: &str) -> UserServiceResult<Option<UserDto>> {
        let query = RecordListQuery {
            limit: Some(1),
            ..RecordListQuery::by_field(FIELD_EMAIL, email)
        };
        Ok(map_all(self.records.list(&query))?.into_iter().next())
    }

    /// Replaces every field of a registered user.
    pub fn update_user(&mut self, user: &UserDto) -> UserServiceResult<()> {
        let id = user.id.ok_or(UserServiceError::MissingId)?;
        self.records.update(user.to_record(id))?;
        info!("event=user_update module=service status=ok user_id={id}");
        Ok(())
    }

    pub fn remove_user(&mut self, id: i64) -> UserServiceResult<()> {
        self.records.delete(&id)?;
        info!("event=user_remove module=service status=ok user_id={id}");
        Ok(())
    }
}

fn map_all(records: Vec<Record<i64>>) -> UserServiceResult<Vec<UserDto>> {
    records
        .iter()
        .map(UserDto::from_record)
        .collect::<Result<Vec<_>, _>>()
        .map_err(UserServiceError::from)
}
