//! User transfer object and its record mapping.
//!
//! # Responsibility
//! - Give service callers a typed view over user records.
//! - Convert between `UserDto` and the generic `Record<i64>` shape.
//!
//! # Invariants
//! - `id` is never stored as a field; it is always the record key.
//! - Mapping from a record fails loudly instead of defaulting missing fields.

use crate::model::record::{FieldValue, Fields, Record};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const FIELD_FIRST_NAME: &str = "first_name";
pub const FIELD_LAST_NAME: &str = "last_name";
pub const FIELD_EMAIL: &str = "email";

/// Typed user projection exchanged with service callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    /// `None` until the user is registered.
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Errors raised when a stored record does not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    MissingField(&'static str),
    WrongType {
        field: &'static str,
        expected: &'static str,
        actual: &'static str,
    },
}

impl Display for MappingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "record is missing field `{field}`"),
            Self::WrongType {
                field,
                expected,
                actual,
            } => write!(f, "field `{field}` expected {expected}, found {actual}"),
        }
    }
}

impl Error for MappingError {}

impl UserDto {
    /// Creates an unregistered user.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    /// Field map persisted for this user, without the key.
    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert(FIELD_FIRST_NAME.to_string(), self.first_name.clone().into());
        fields.insert(FIELD_LAST_NAME.to_string(), self.last_name.clone().into());
        fields.insert(FIELD_EMAIL.to_string(), self.email.clone().into());
        fields
    }

    /// Full record for this user under `id`.
    pub fn to_record(&self, id: i64) -> Record<i64> {
        Record::with_fields(id, self.to_fields())
    }

    /// Reads a user back from a stored record.
    pub fn from_record(record: &Record<i64>) -> Result<Self, MappingError> {
        Ok(Self {
            id: Some(record.id),
            first_name: required_text(record, FIELD_FIRST_NAME)?,
            last_name: required_text(record, FIELD_LAST_NAME)?,
            email: required_text(record, FIELD_EMAIL)?,
        })
    }
}

fn required_text(record: &Record<i64>, field: &'static str) -> Result<String, MappingError> {
    match record.get(field) {
        Some(FieldValue::Text(value)) => Ok(value.clone()),
        Some(other) => Err(MappingError::WrongType {
            field,
            expected: "text",
            actual: other.kind_name(),
        }),
        None => Err(MappingError::MissingField(field)),
    }
}
