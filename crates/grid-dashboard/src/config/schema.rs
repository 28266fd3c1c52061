//! TOML configuration schema types for the grid dashboard.
//!
//! All structs derive `Deserialize` and `Serialize` with defaults via
//! `#[serde(default)]`, so any subset of the file is valid.
//!
//! Duration fields use human-readable strings (e.g. `"1s"`, `"250ms"`)
//! parsed by the `humantime` crate through the accessor methods, which
//! report the offending key on failure.

use crate::config::error::ConfigError;
use crate::config::xdg;
use crate::layout::{BreakpointSpec, Breakpoints};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// File name of the persisted grid snapshot.
pub const GRID_FILE: &str = "grid.json";
/// File name of the persisted todo list.
pub const TODO_FILE: &str = "todos.json";
/// File name of the persisted notes.
pub const NOTES_FILE: &str = "notes.json";
/// File name of the TUI log, inside the data directory.
pub const LOG_FILE: &str = "gdash.log";

/// Root configuration encompassing all sections.
///
/// ```toml
/// [grid]
/// [grid.breakpoints.lg]
/// [tui]
/// [storage]
/// [log]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Grid geometry.
    pub grid: GridConfig,
    /// Terminal UI behavior.
    pub tui: TuiConfig,
    /// Where persisted state lives.
    pub storage: StorageConfig,
    /// Logging.
    pub log: LogConfig,
}

impl Config {
    /// Checks every value that `serde` alone cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        self.tui.tick_rate()?;
        self.tui.clock_refresh()?;
        self.tui.monitor_refresh()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// Grid geometry.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    /// Pixels attributed to one terminal column when resolving breakpoints.
    pub cell_width_px: u32,
    /// Terminal rows per grid row.
    pub row_height: u16,
    /// Breakpoint thresholds and column counts.
    pub breakpoints: BreakpointsConfig,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_width_px: 10,
            row_height: 3,
            breakpoints: BreakpointsConfig::default(),
        }
    }
}

impl GridConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_width_px == 0 {
            return Err(invalid("grid.cell_width_px", "must be at least 1"));
        }
        if self.row_height == 0 {
            return Err(invalid("grid.row_height", "must be at least 1"));
        }
        for (name, bp) in [
            ("lg", &self.breakpoints.lg),
            ("md", &self.breakpoints.md),
            ("sm", &self.breakpoints.sm),
            ("xs", &self.breakpoints.xs),
        ] {
            if bp.cols == 0 {
                return Err(invalid(
                    &format!("grid.breakpoints.{name}.cols"),
                    "must be at least 1",
                ));
            }
        }
        Ok(())
    }
}

/// One entry per breakpoint under `[grid.breakpoints]`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct BreakpointsConfig {
    /// Large screens.
    pub lg: BreakpointEntry,
    /// Medium screens.
    pub md: BreakpointEntry,
    /// Small screens.
    pub sm: BreakpointEntry,
    /// Extra-small screens.
    pub xs: BreakpointEntry,
}

impl Default for BreakpointsConfig {
    fn default() -> Self {
        Self {
            lg: BreakpointEntry::new(1200, 8),
            md: BreakpointEntry::new(996, 9),
            sm: BreakpointEntry::new(768, 3),
            xs: BreakpointEntry::new(480, 2),
        }
    }
}

impl BreakpointsConfig {
    /// The breakpoint table used by the grid.
    pub fn to_breakpoints(&self) -> Breakpoints {
        let spec = |e: &BreakpointEntry| BreakpointSpec::new(e.min_width, e.cols);
        Breakpoints::new(spec(&self.lg), spec(&self.md), spec(&self.sm), spec(&self.xs))
    }
}

/// Threshold and column count of one breakpoint.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct BreakpointEntry {
    /// Minimum viewport width in pixels.
    pub min_width: u32,
    /// Number of grid columns.
    pub cols: u16,
}

impl BreakpointEntry {
    const fn new(min_width: u32, cols: u16) -> Self {
        Self { min_width, cols }
    }
}

// ---------------------------------------------------------------------------
// TUI
// ---------------------------------------------------------------------------

/// Terminal UI settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TuiConfig {
    /// Event loop tick as a human-readable duration (e.g. `"250ms"`).
    pub tick_rate: String,
    /// How often clock widgets redraw.
    pub clock_refresh: String,
    /// How often the system monitor samples.
    pub monitor_refresh: String,
    /// Where system monitor readings come from.
    pub monitor_source: MonitorSource,
    /// Seed of the simulated monitor source.
    pub monitor_seed: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate: "250ms".to_string(),
            clock_refresh: "1s".to_string(),
            monitor_refresh: "2s".to_string(),
            monitor_source: MonitorSource::Live,
            monitor_seed: 42,
        }
    }
}

impl TuiConfig {
    /// Parsed `tick_rate`.
    pub fn tick_rate(&self) -> Result<Duration, ConfigError> {
        parse_duration("tui.tick_rate", &self.tick_rate)
    }

    /// Parsed `clock_refresh`.
    pub fn clock_refresh(&self) -> Result<Duration, ConfigError> {
        parse_duration("tui.clock_refresh", &self.clock_refresh)
    }

    /// Parsed `monitor_refresh`.
    pub fn monitor_refresh(&self) -> Result<Duration, ConfigError> {
        parse_duration("tui.monitor_refresh", &self.monitor_refresh)
    }
}

/// Source of system monitor readings (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MonitorSource {
    /// Real CPU and memory usage of this host.
    Live,
    /// A seeded random walk.
    Simulated,
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Location of persisted state.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Data directory. Empty means the platform data directory.
    pub dir: String,
}

impl StorageConfig {
    /// Resolved data directory.
    pub fn data_dir(&self) -> PathBuf {
        if self.dir.is_empty() {
            xdg::data_dir()
        } else {
            xdg::expand_tilde(&self.dir)
        }
    }

    /// Path of the grid snapshot.
    pub fn grid_path(&self) -> PathBuf {
        self.data_dir().join(GRID_FILE)
    }

    /// Path of the todo list.
    pub fn todo_path(&self) -> PathBuf {
        self.data_dir().join(TODO_FILE)
    }

    /// Path of the notes.
    pub fn notes_path(&self) -> PathBuf {
        self.data_dir().join(NOTES_FILE)
    }
}

// ---------------------------------------------------------------------------
// Log
// ---------------------------------------------------------------------------

/// Logging settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Verbosity when `GDASH_LOG` is not set.
    pub level: LogLevel,
    /// Log file of the TUI. Empty means `gdash.log` in the data directory.
    pub file: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            file: String::new(),
        }
    }
}

impl LogConfig {
    /// Resolved TUI log file.
    pub fn file_path(&self, storage: &StorageConfig) -> PathBuf {
        if self.file.is_empty() {
            storage.data_dir().join(LOG_FILE)
        } else {
            xdg::expand_tilde(&self.file)
        }
    }
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational messages (default).
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

fn parse_duration(field: &str, value: &str) -> Result<Duration, ConfigError> {
    let duration = humantime::parse_duration(value.trim()).map_err(|e| ConfigError::InvalidValue {
        field: field.to_string(),
        message: format!("{e} (expected a duration like \"250ms\" or \"2s\")"),
    })?;
    if duration.is_zero() {
        return Err(invalid(field, "must be greater than zero"));
    }
    Ok(duration)
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
