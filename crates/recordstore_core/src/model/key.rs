//! Identifier generation strategies.
//!
//! # Invariants
//! - A generator never yields the same key twice during its lifetime.
//! - An exhausted generator returns `None` forever instead of wrapping.
//! - Generators are not aware of stores; collision checks live in services.

use uuid::Uuid;

/// Source of fresh record keys.
pub trait KeyGenerator {
    type Key;

    /// Returns the next unused key, or `None` once the key space is exhausted.
    fn next_key(&mut self) -> Option<Self::Key>;
}

/// Monotonic integer keys starting at 1.
#[derive(Debug, Clone)]
pub struct SequentialKeys {
    /// `None` after `i64::MAX` has been handed out.
    next: Option<i64>,
}

impl SequentialKeys {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: i64) -> Self {
        Self { next: Some(first) }
    }
}

impl Default for SequentialKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyGenerator for SequentialKeys {
    type Key = i64;

    fn next_key(&mut self) -> Option<i64> {
        let key = self.next?;
        self.next = key.checked_add(1);
        Some(key)
    }
}

/// Random v4 UUID keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidKeys;

impl KeyGenerator for UuidKeys {
    type Key = Uuid;

    fn next_key(&mut self) -> Option<Uuid> {
        Some(Uuid::new_v4())
    }
}
