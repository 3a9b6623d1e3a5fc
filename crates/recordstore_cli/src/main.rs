//! CLI smoke entry point.
//!
//! # Responsibility
//! - Run one create/read/update/delete pass against a fresh in-memory store.
//! - Keep output deterministic for quick local sanity checks.
//! - Exit non-zero when any step of the pass does not hold.
//!
//! Logging is enabled only when `RECORDSTORE_LOG_DIR` is set; the level comes
//! from `RECORDSTORE_LOG_LEVEL` or the build-mode default.

use log::{error, info};
use recordstore_core::{
    default_log_level, init_logging, InMemoryRecordRepository, Record, RecordRepository,
    RepoError,
};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::process::ExitCode;

const LOG_DIR_ENV: &str = "RECORDSTORE_LOG_DIR";
const LOG_LEVEL_ENV: &str = "RECORDSTORE_LOG_LEVEL";

/// Smoke pass failures.
#[derive(Debug, PartialEq, Eq)]
enum ScenarioError {
    Repo(RepoError<i64>),
    /// Read-back after update returned an unexpected name.
    UnexpectedName { id: i64, expected: &'static str },
    /// Record is still readable after a successful delete.
    StillPresent(i64),
    /// Store is not empty once the pass finishes.
    Leftover(usize),
}

impl Display for ScenarioError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::UnexpectedName { id, expected } => {
                write!(f, "record {id} does not have name `{expected}`")
            }
            Self::StillPresent(id) => write!(f, "record {id} still present after delete"),
            Self::Leftover(count) => write!(f, "{count} records left after delete"),
        }
    }
}

impl Error for ScenarioError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError<i64>> for ScenarioError {
    fn from(value: RepoError<i64>) -> Self {
        Self::Repo(value)
    }
}

fn main() -> ExitCode {
    println!("recordstore_core version={}", recordstore_core::core_version());

    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        let level = std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| default_log_level().into());
        if let Err(err) = init_logging(&level, &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let mut repo = InMemoryRecordRepository::new();
    match run_scenario(&mut repo) {
        Ok(()) => {
            info!("event=cli_scenario module=cli status=ok");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=cli_scenario module=cli status=error error={err}");
            eprintln!("scenario failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_scenario<R: RecordRepository<Key = i64>>(repo: &mut R) -> Result<(), ScenarioError> {
    let id = repo.create(Record::new(1_i64).with_field("name", "Alice"))?;
    expect_name(repo, id, "Alice")?;
    println!("created id={id} name=Alice");

    repo.update(Record::new(id).with_field("name", "Alicia"))?;
    expect_name(repo, id, "Alicia")?;
    println!("updated id={id} name=Alicia");

    repo.delete(&id)?;
    expect_deleted(repo, id)?;
    println!("deleted id={id}");

    let remaining = repo.find_all().len();
    if remaining != 0 {
        return Err(ScenarioError::Leftover(remaining));
    }
    println!("remaining=0");
    Ok(())
}

fn expect_name<R: RecordRepository<Key = i64>>(
    repo: &R,
    id: i64,
    expected: &'static str,
) -> Result<(), ScenarioError> {
    if repo.read(&id)?.text("name") != Some(expected) {
        return Err(ScenarioError::UnexpectedName { id, expected });
    }
    Ok(())
}

fn expect_deleted<R: RecordRepository<Key = i64>>(
    repo: &R,
    id: i64,
) -> Result<(), ScenarioError> {
    match repo.read(&id) {
        Err(RepoError::NotFound(_)) => Ok(()),
        Err(err) => Err(err.into()),
        Ok(_) => Err(ScenarioError::StillPresent(id)),
    }
}
