//! Rolling file logs.
//!
//! The library logs through the `log` facade only. A UI client that wants the
//! output on disk calls [`init_logging`] once at startup; logs land in
//! `<data_dir>/logs/minddump_rCURRENT.log` and rotate by size.
//!
//! Entry text is never logged. Diagnostics carry ids and counts.

use crate::error::{MindDumpError, Result};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "minddump";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 2 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

/// Starts file logging at `level` in `log_dir`.
///
/// Idempotent for identical arguments. Re-initialisation with a different
/// level or directory is rejected.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<()> {
    let level = normalize_level(level)?;

    if let Some(state) = LOGGING_STATE.get() {
        return check_same(state, level, log_dir);
    }

    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState> {
        std::fs::create_dir_all(log_dir).map_err(MindDumpError::Io)?;

        let logger = Logger::try_with_str(level)
            .map_err(|e| MindDumpError::Logging(format!("invalid log level `{}`: {}", level, e)))?
            .log_to_file(
                FileSpec::default()
                    .directory(log_dir)
                    .basename(LOG_FILE_BASENAME),
            )
            .rotate(
                Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(MAX_LOG_FILES),
            )
            .write_mode(WriteMode::Direct)
            .append()
            .format_for_files(flexi_logger::detailed_format)
            .start()
            .map_err(|e| MindDumpError::Logging(format!("failed to start logger: {}", e)))?;

        log::info!(
            "minddump {} started, level={} log_dir={}",
            env!("CARGO_PKG_VERSION"),
            level,
            log_dir.display()
        );

        Ok(LoggingState {
            level,
            log_dir: log_dir.to_path_buf(),
            _logger: logger,
        })
    })?;

    check_same(state, level, log_dir)
}

/// Active `(level, log_dir)`, if logging was initialised.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    LOGGING_STATE
        .get()
        .map(|state| (state.level, state.log_dir.clone()))
}

fn check_same(state: &LoggingState, level: &'static str, log_dir: &Path) -> Result<()> {
    if state.log_dir != log_dir {
        return Err(MindDumpError::Logging(format!(
            "logging already initialized at `{}`; refusing to switch to `{}`",
            state.log_dir.display(),
            log_dir.display()
        )));
    }
    if state.level != level {
        return Err(MindDumpError::Logging(format!(
            "logging already initialized with level `{}`; refusing to switch to `{}`",
            state.level, level
        )));
    }
    Ok(())
}

pub fn normalize_level(level: &str) -> Result<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(MindDumpError::Logging(format!(
            "unsupported log level `{}`; expected trace|debug|info|warn|error",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn normalize_level_accepts_known_values() {
        assert_eq!(normalize_level("TRACE").unwrap(), "trace");
        assert_eq!(normalize_level(" debug ").unwrap(), "debug");
        assert_eq!(normalize_level("Warning").unwrap(), "warn");
        assert_eq!(normalize_level("error").unwrap(), "error");
    }

    #[test]
    fn normalize_level_rejects_unknown_values() {
        assert!(normalize_level("verbose").is_err());
        assert!(normalize_level("").is_err());
    }

    // The only test that starts the global logger.
    #[test]
    fn init_is_idempotent_and_rejects_switching() {
        let dir = TempDir::new().unwrap();
        let log_dir = dir.path().join("logs");

        init_logging("info", &log_dir).unwrap();
        init_logging("INFO", &log_dir).unwrap();
        assert_eq!(logging_status(), Some(("info", log_dir.clone())));

        assert!(init_logging("debug", &log_dir).is_err());
        assert!(init_logging("info", &dir.path().join("elsewhere")).is_err());
        assert!(log_dir.exists());
    }
}
