//! Repository layer abstractions and storage implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate storage layout from service/business orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateKey`)
//!   keyed by the offending identifier.

pub mod record_repo;
