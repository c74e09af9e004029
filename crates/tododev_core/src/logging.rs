//! Logging bootstrap for the dev tool.
//!
//! # Responsibility
//! - Install the `log` backend once per process.
//! - Route records to stderr, or to rolling files when a directory is given.
//!
//! # Invariants
//! - The first successful call wins; later calls are no-ops.
//! - File records are written through immediately, so nothing is lost when
//!   the process exits right after a command.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;
use std::path::Path;

const LOG_FILE_BASENAME: &str = "tododev";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

static LOGGER: OnceCell<LoggerHandle> = OnceCell::new();

/// Initializes logging at `level`, to stderr or to rotating files in `log_dir`.
///
/// # Errors
/// - Returns an error when `level` is unsupported.
/// - Returns an error when `log_dir` cannot be created.
/// - Returns an error when logger backend setup fails.
pub fn init_logging(level: &str, log_dir: Option<&Path>) -> Result<(), String> {
    let level = normalize_level(level)?;

    LOGGER.get_or_try_init(|| -> Result<LoggerHandle, String> {
        let logger = start_logger(level, log_dir)?;
        info!(
            "event=app_start module=core status=ok platform={} version={} level={} log_dir={}",
            std::env::consts::OS,
            env!("CARGO_PKG_VERSION"),
            level,
            log_dir.map_or_else(|| "stderr".to_string(), |dir| dir.display().to_string())
        );
        Ok(logger)
    })?;

    Ok(())
}

/// Returns the default log level for current build mode.
///
/// - `debug` builds -> `debug`
/// - `release` builds -> `info`
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(level: &'static str, log_dir: Option<&Path>) -> Result<LoggerHandle, String> {
    let logger =
        Logger::try_with_str(level).map_err(|err| format!("invalid log level `{level}`: {err}"))?;

    let logger = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(|err| {
                format!("failed to create log directory `{}`: {err}", dir.display())
            })?;
            logger
                .log_to_file(FileSpec::default().directory(dir).basename(LOG_FILE_BASENAME))
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .append()
                .format_for_files(flexi_logger::detailed_format)
        }
        None => logger
            .log_to_stderr()
            .format_for_stderr(flexi_logger::default_format),
    };

    logger
        .write_mode(WriteMode::Direct)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::{init_logging, normalize_level};
    use std::fs;

    #[test]
    fn normalize_level_accepts_known_values() {
        assert_eq!(normalize_level("INFO").unwrap(), "info");
        assert_eq!(normalize_level(" warning ").unwrap(), "warn");
        assert!(normalize_level("verbose").is_err());
    }

    #[test]
    fn file_logging_writes_records_before_exit() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");

        init_logging("info", Some(&log_dir)).unwrap();
        log::info!("event=test_marker module=logging status=ok");
        init_logging("debug", None).unwrap();

        let written: u64 = fs::read_dir(&log_dir)
            .unwrap()
            .map(|entry| entry.unwrap().metadata().unwrap().len())
            .sum();
        assert!(written > 0, "log directory holds only empty files");

        let contents: String = fs::read_dir(&log_dir)
            .unwrap()
            .map(|entry| fs::read_to_string(entry.unwrap().path()).unwrap())
            .collect();
        assert!(contents.contains("event=test_marker"));
    }
}
