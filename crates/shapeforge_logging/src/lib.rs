//! Shared logging utilities for Shapeforge binaries.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str = "shapeforge=info,shapeforge_core=info";
const VERBOSE_LOG_FILTER: &str = "shapeforge=debug,shapeforge_core=debug,shapeforge_schema=debug";

/// Environment variable overriding the Shapeforge home directory.
pub const HOME_ENV: &str = "SHAPEFORGE_HOME";

/// Logging configuration shared by Shapeforge binaries.
pub struct LogConfig<'a> {
    pub app_name: &'a str,
    pub verbose: bool,
    /// Write a daily-rolling log file under [`logs_dir`] as well as stderr.
    pub log_to_file: bool,
}

/// Initialize tracing with stderr output and an optional rolling file.
///
/// `RUST_LOG` overrides the default filter for both outputs; `verbose`
/// raises the console to debug when `RUST_LOG` is unset. Keep the returned
/// guard alive until exit so buffered file output is flushed.
///
/// If the log directory cannot be created, only the stderr layer is
/// installed, a warning is logged, and no guard is returned.
pub fn init_logging(config: LogConfig<'_>) -> Result<Option<WorkerGuard>> {
    let console_filter = console_filter(config.verbose);

    let mut guard = None;
    let mut file_error = None;
    let file_layer = if config.log_to_file {
        match ensure_logs_dir() {
            Ok(dir) => {
                let appender = tracing_appender::rolling::daily(
                    &dir,
                    format!("{}.log", sanitize_name(config.app_name)),
                );
                let (writer, worker_guard) = tracing_appender::non_blocking(appender);
                guard = Some(worker_guard);
                let file_filter = EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
                Some(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_filter(file_filter),
                )
            }
            Err(err) => {
                file_error = Some(err);
                None
            }
        }
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(console_filter),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    if let Some(err) = file_error {
        warn!("File logging disabled: {:#}", err);
    }

    Ok(guard)
}

fn console_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            VERBOSE_LOG_FILTER
        } else {
            DEFAULT_LOG_FILTER
        })
    })
}

/// Get the Shapeforge home directory: $SHAPEFORGE_HOME or ~/.shapeforge
pub fn shapeforge_home() -> PathBuf {
    if let Ok(override_path) = std::env::var(HOME_ENV) {
        return PathBuf::from(override_path);
    }
    home_under(dirs::home_dir().as_deref())
}

fn home_under(user_home: Option<&Path>) -> PathBuf {
    user_home
        .unwrap_or_else(|| Path::new("."))
        .join(".shapeforge")
}

/// Get the logs directory: ~/.shapeforge/logs
pub fn logs_dir() -> PathBuf {
    shapeforge_home().join("logs")
}

/// Ensure the logs directory exists.
pub fn ensure_logs_dir() -> Result<PathBuf> {
    let logs = logs_dir();
    fs::create_dir_all(&logs)
        .with_context(|| format!("Failed to create logs directory: {}", logs.display()))?;
    Ok(logs)
}

fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' { ch } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_falls_back_to_current_dir() {
        assert_eq!(home_under(None), PathBuf::from("./.shapeforge"));
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(home_under(Some(tmp.path())), tmp.path().join(".shapeforge"));
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("shapeforge"), "shapeforge");
        assert_eq!(sanitize_name("shape forge/cli"), "shape_forge_cli");
    }
}
