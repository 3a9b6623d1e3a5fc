//! Record-centric domain model.
//!
//! # Responsibility
//! - Define the generic record shape every repository stores.
//! - Provide key generation strategies and typed DTO mappings.
//!
//! # Invariants
//! - Every record is identified by exactly one key of its store's key type.
//! - Records carry scalar fields only; no relationships are modeled.

pub mod key;
pub mod record;
pub mod user;
