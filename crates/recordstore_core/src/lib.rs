//! Generic in-memory record store with DAO/repository/service layering.
//! Record invariants (unique keys, insertion order, error semantics) live here.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogSettings, LoggingError};
pub use model::key::{KeyGenerator, SequentialKeys, UuidKeys};
pub use model::record::{FieldValue, Fields, Record, RecordKey};
pub use model::user::{MappingError, UserDto};
pub use repo::record_repo::{
    FieldFilter, InMemoryRecordRepository, RecordListQuery, RecordRepository, RepoError,
    RepoResult,
};
pub use service::record_service::{GenerateError, RecordService};
pub use service::user_service::{UserService, UserServiceError, UserServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
