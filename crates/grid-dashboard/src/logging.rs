//! Logging initialization.
//!
//! Configures the `tracing` subscriber with level filtering via the
//! `GDASH_LOG` environment variable. Falls back to the `[log] level` of the
//! configuration when the variable is unset or invalid.
//!
//! ```bash
//! # Debug level for everything
//! GDASH_LOG=debug gdash widget list
//!
//! # Module-specific filtering
//! GDASH_LOG=grid_dashboard::grid=trace,warn gdash tui
//! ```

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::schema::LogLevel;
use crate::config::xdg;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "GDASH_LOG";

/// Builds the filter from `GDASH_LOG`, else from `fallback`.
pub fn filter(fallback: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback.as_directive()))
}

/// Logs to stderr. Used by one-shot CLI commands.
///
/// Does nothing if a global subscriber is already set.
pub fn init_stderr(level: LogLevel) {
    let _ = fmt()
        .with_env_filter(filter(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Logs to `path`, appending. Used while the TUI owns the terminal.
///
/// Creates the parent directory when missing.
pub fn init_file(level: LogLevel, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        xdg::ensure_dir(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let _ = fmt()
        .with_env_filter(filter(level))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::xdg::with_env;
    use serial_test::serial;

    #[test]
    fn env_filter_parses_config_levels() {
        for level in [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ] {
            assert!(EnvFilter::try_new(level.as_directive()).is_ok());
        }
    }

    #[test]
    #[serial]
    fn env_var_overrides_config_level() {
        with_env(&[(LOG_ENV, Some("grid_dashboard=trace"))], || {
            assert_eq!(filter(LogLevel::Warn).to_string(), "grid_dashboard=trace");
        });
    }

    #[test]
    #[serial]
    fn falls_back_to_config_level() {
        with_env(&[(LOG_ENV, None)], || {
            assert_eq!(filter(LogLevel::Debug).to_string(), "debug");
        });
    }

    #[test]
    fn init_file_creates_parent_directory() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("logs/gdash.log");
        init_file(LogLevel::Info, &path).expect("init");
        assert!(path.is_file());
    }
}
