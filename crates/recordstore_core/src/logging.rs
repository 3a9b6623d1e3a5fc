//! Core logging bootstrap and safety policy.
//!
//! # Responsibility
//! - Initialize file-based rolling logs exactly once per process.
//! - Emit stable, metadata-only diagnostic events from core.
//!
//! # Invariants
//! - Logging init is idempotent for the same settings.
//! - Logging initialization must not panic.
//! - Re-initialization with a different level or directory is rejected.
//! - Events never include record field values, only keys and counts.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "recordstore";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();
static PANIC_HOOK_INSTALLED: OnceCell<()> = OnceCell::new();

struct LoggingState {
    settings: LogSettings,
    _logger: LoggerHandle,
}

/// Logging bootstrap failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    UnsupportedLevel(String),
    EmptyLogDir,
    RelativeLogDir(String),
    CreateDir { dir: PathBuf, message: String },
    Backend(String),
    /// Logging is already active with other settings.
    Conflict { active: String, requested: String },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::EmptyLogDir => write!(f, "log_dir cannot be empty"),
            Self::RelativeLogDir(dir) => {
                write!(f, "log_dir must be an absolute path, got `{dir}`")
            }
            Self::CreateDir { dir, message } => write!(
                f,
                "failed to create log directory `{}`: {message}",
                dir.display()
            ),
            Self::Backend(message) => write!(f, "failed to start logger: {message}"),
            Self::Conflict { active, requested } => write!(
                f,
                "logging already initialized with {active}; refusing to switch to {requested}"
            ),
        }
    }
}

impl Error for LoggingError {}

/// Normalized logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: &'static str,
    pub log_dir: PathBuf,
}

impl LogSettings {
    /// Validates and normalizes raw level/directory input.
    pub fn parse(level: &str, log_dir: &str) -> Result<Self, LoggingError> {
        Ok(Self {
            level: normalize_level(level)?,
            log_dir: normalize_log_dir(log_dir)?,
        })
    }

    fn describe(&self) -> String {
        format!("level `{}` at `{}`", self.level, self.log_dir.display())
    }
}

/// Initializes core logging with level and directory.
///
/// # Invariants
/// - Calling this function repeatedly with the same settings is idempotent.
/// - A different level or directory after the first success is rejected.
/// - Initialization never panics.
///
/// # Errors
/// - `level` is unsupported, or `log_dir` is empty, relative or not creatable.
/// - The logger backend fails to start.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), LoggingError> {
    let requested = LogSettings::parse(level, log_dir)?;

    let state = LOGGING_STATE.get_or_try_init(|| start_logger(requested.clone()))?;
    if state.settings != requested {
        return Err(LoggingError::Conflict {
            active: state.settings.describe(),
            requested: requested.describe(),
        });
    }

    Ok(())
}

/// Returns active logging settings, or `None` before initialization.
pub fn logging_status() -> Option<LogSettings> {
    LOGGING_STATE.get().map(|state| state.settings.clone())
}

/// Returns the default log level for current build mode: `debug` in debug
/// builds, `info` in release builds.
pub fn default_log_level() -> &'static str {
    match build_mode() {
        "debug" => "debug",
        _ => "info",
    }
}

fn start_logger(settings: LogSettings) -> Result<LoggingState, LoggingError> {
    std::fs::create_dir_all(&settings.log_dir).map_err(|err| LoggingError::CreateDir {
        dir: settings.log_dir.clone(),
        message: err.to_string(),
    })?;

    let logger = Logger::try_with_str(settings.level)
        .map_err(|err| LoggingError::Backend(err.to_string()))?
        .log_to_file(
            FileSpec::default()
                .directory(settings.log_dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        // [YYYY-MM-DD HH:MM:SS.ffffff TZ] LEVEL [module] file:line: message
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| LoggingError::Backend(err.to_string()))?;

    install_panic_hook_once();

    info!(
        "event=store_start module=core status=ok platform={} build_mode={} version={}",
        std::env::consts::OS,
        build_mode(),
        env!("CARGO_PKG_VERSION")
    );
    info!(
        "event=logging_init module=core status=ok level={} log_dir={}",
        settings.level,
        settings.log_dir.display()
    );

    Ok(LoggingState {
        settings,
        _logger: logger,
    })
}

/// Accepted level spellings and their canonical form.
const LEVEL_ALIASES: &[(&str, &str)] = &[
    ("trace", "trace"),
    ("debug", "debug"),
    ("info", "info"),
    ("warn", "warn"),
    ("warning", "warn"),
    ("error", "error"),
];

fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    let wanted = level.trim().to_ascii_lowercase();
    LEVEL_ALIASES
        .iter()
        .find(|(alias, _)| *alias == wanted)
        .map(|(_, canonical)| *canonical)
        .ok_or(LoggingError::UnsupportedLevel(wanted))
}

fn normalize_log_dir(log_dir: &str) -> Result<PathBuf, LoggingError> {
    match log_dir.trim() {
        "" => Err(LoggingError::EmptyLogDir),
        dir if Path::new(dir).is_absolute() => Ok(PathBuf::from(dir)),
        dir => Err(LoggingError::RelativeLogDir(dir.to_string())),
    }
}

fn build_mode() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}

fn install_panic_hook_once() {
    if PANIC_HOOK_INSTALLED.set(()).is_err() {
        return;
    }

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info.location().map_or_else(
            || "unknown".to_string(),
            |loc| format!("{}:{}", loc.file(), loc.line()),
        );
        error!(
            "event=store_panic module=store status=error location={} payload={}",
            location,
            panic_excerpt(panic_info.payload())
        );
        previous_hook(panic_info);
    }));
}

/// Panic messages may quote record field values; only a capped one-line
/// excerpt reaches the log.
fn panic_excerpt(payload: &(dyn std::any::Any + Send)) -> String {
    let message = match (payload.downcast_ref::<&str>(), payload.downcast_ref::<String>()) {
        (Some(text), _) => *text,
        (None, Some(text)) => text.as_str(),
        (None, None) => "non-string panic payload",
    };
    one_line_excerpt(message, MAX_PANIC_PAYLOAD_CHARS)
}

fn one_line_excerpt(value: &str, max_chars: usize) -> String {
    let mut excerpt: String = value
        .chars()
        .take(max_chars)
        .map(|c| if matches!(c, '\n' | '\r') { ' ' } else { c })
        .collect();
    if value.chars().nth(max_chars).is_some() {
        excerpt.push_str("...");
    }
    excerpt
}

#[cfg(test)]
mod tests {
    use super::{normalize_level, one_line_excerpt, panic_excerpt, LogSettings, LoggingError};
    use std::any::Any;

    #[test]
    fn normalize_level_accepts_known_values() {
        assert_eq!(normalize_level("INFO"), Ok("info"));
        assert_eq!(normalize_level(" warning "), Ok("warn"));
        assert_eq!(
            normalize_level("loud"),
            Err(LoggingError::UnsupportedLevel("loud".to_string()))
        );
    }

    #[test]
    fn settings_reject_relative_and_empty_dirs() {
        let relative = LogSettings::parse("info", "logs/dev").unwrap_err();
        assert!(relative.to_string().contains("absolute"));

        let empty = LogSettings::parse("info", "   ").unwrap_err();
        assert_eq!(empty, LoggingError::EmptyLogDir);
    }

    #[test]
    fn one_line_excerpt_removes_newlines_and_truncates() {
        let sanitized = one_line_excerpt("line1\nline2\rline3", 8);
        assert!(!sanitized.contains('\n'));
        assert!(!sanitized.contains('\r'));
        assert!(sanitized.ends_with("..."));
        assert_eq!(one_line_excerpt("key=7", 8), "key=7");
    }

    #[test]
    fn panic_excerpt_reads_str_and_string_payloads() {
        let owned: Box<dyn Any + Send> = Box::new(String::from("bad\nrecord"));
        assert_eq!(panic_excerpt(&*owned), "bad record");

        let borrowed: Box<dyn Any + Send> = Box::new("static message");
        assert_eq!(panic_excerpt(&*borrowed), "static message");

        let opaque: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_excerpt(&*opaque), "non-string panic payload");
    }
}
