//! Record domain model.
//!
//! # Responsibility
//! - Define the canonical record shape shared by every repository.
//! - Keep field values scalar so records stay shape-agnostic.
//!
//! # Invariants
//! - `id` is the only identity of a record; fields never carry identity.
//! - Field names are map keys, so one record holds at most one value per name.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Debug, Display, Formatter};
use std::hash::Hash;

/// Identifier bound for records held by a store.
///
/// Implemented for every type that can be cloned, compared, hashed and shown
/// in diagnostics, e.g. `i64`, `String` or `Uuid`.
pub trait RecordKey: Clone + Eq + Hash + Debug + Display {}

impl<T> RecordKey for T where T: Clone + Eq + Hash + Debug + Display {}

/// Named field values of one record, ordered by field name.
pub type Fields = BTreeMap<String, FieldValue>;

/// Scalar value stored in a record field.
///
/// Serialized untagged so JSON payloads read as plain scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Short type label used in mapping diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
        }
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// One stored entity: a key plus a bag of named scalar fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<K> {
    /// Unique key within one store.
    pub id: K,
    /// Named scalar values. Serialized as a nested object.
    #[serde(default)]
    pub fields: Fields,
}

impl<K: RecordKey> Record<K> {
    /// Creates a record with no fields.
    pub fn new(id: K) -> Self {
        Self::with_fields(id, Fields::new())
    }

    /// Creates a record from an already-built field map.
    pub fn with_fields(id: K, fields: Fields) -> Self {
        Self { id, fields }
    }

    /// Builder-style field assignment.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets one field, returning the previous value when present.
    pub fn set(
        &mut self,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.fields.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    /// Returns the field as text, or `None` when absent or not text.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    /// Returns the field as an integer, or `None` when absent or not integer.
    pub fn integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(FieldValue::as_integer)
    }

    /// Returns whether `name` holds exactly `value`.
    pub fn field_equals(&self, name: &str, value: &FieldValue) -> bool {
        self.get(name) == Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldValue, Record};

    #[test]
    fn set_replaces_and_returns_previous_value() {
        let mut record = Record::new(1_i64).with_field("name", "Alice");
        let previous = record.set("name", "Alicia");
        assert_eq!(previous, Some(FieldValue::from("Alice")));
        assert_eq!(record.text("name"), Some("Alicia"));
    }

    #[test]
    fn typed_accessors_reject_other_kinds() {
        let record = Record::new("k".to_string())
            .with_field("age", 41)
            .with_field("name", "Bob");
        assert_eq!(record.integer("age"), Some(41));
        assert_eq!(record.integer("name"), None);
        assert_eq!(record.text("age"), None);
        assert_eq!(record.get("age").and_then(FieldValue::as_float), Some(41.0));
    }
}
