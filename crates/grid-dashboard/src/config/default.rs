//! Default configuration template and file creation.
//!
//! The template is what `gdash config init` writes. Every value in it must
//! match `Config::default()`; a test keeps the two in sync.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

/// A commented TOML template with all default values.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Grid Dashboard Configuration
#
# All values shown below are the built-in defaults.
# Remove or change options to customize your dashboard.
#
# Location: $XDG_CONFIG_HOME/grid-dashboard/config.toml

# ==============================================================================
# Grid
# ==============================================================================

[grid]

# Width in pixels attributed to one terminal column.
# The viewport width used to pick a breakpoint is columns * cell_width_px,
# so a 120-column terminal is 1200px wide and uses the "lg" layout.
cell_width_px = 10

# Terminal rows drawn for one grid row.
row_height = 3

# Breakpoints, checked from the widest threshold down.
# min_width - smallest viewport width (px) at which the breakpoint applies
# cols      - number of grid columns on that breakpoint
# Widths below every threshold use the breakpoint with the smallest one.

[grid.breakpoints.lg]
min_width = 1200
cols = 8

[grid.breakpoints.md]
min_width = 996
cols = 9

[grid.breakpoints.sm]
min_width = 768
cols = 3

[grid.breakpoints.xs]
min_width = 480
cols = 2

# ==============================================================================
# Terminal UI
# ==============================================================================

[tui]

# Event loop tick as a human-readable duration.
# Examples: "100ms", "250ms", "1s"
tick_rate = "250ms"

# How often clock widgets refresh.
clock_refresh = "1s"

# How often the system monitor takes a sample.
monitor_refresh = "2s"

# Where system monitor readings come from.
# Options:
#   live      - CPU and memory usage of this machine
#   simulated - a seeded random walk, useful for demos
monitor_source = "live"

# Seed of the simulated source.
monitor_seed = 42

# ==============================================================================
# Storage
# ==============================================================================

[storage]

# Directory holding grid.json, todos.json and notes.json.
# Empty string means $XDG_DATA_HOME/grid-dashboard.
# Tilde (~) is expanded to the user's home directory.
dir = ""

# ==============================================================================
# Logging
# ==============================================================================

[log]

# Log verbosity. The GDASH_LOG environment variable takes precedence.
# Options: "error", "warn", "info", "debug", "trace"
level = "info"

# Log file used while the TUI is running (CLI commands log to stderr).
# Empty string means gdash.log in the storage directory.
file = ""
"#;

/// Writes the default config to the XDG config path.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.backup` first.
///
/// Returns the path where the config was written.
pub fn create_default_config(force: bool) -> Result<PathBuf, ConfigError> {
    let path = xdg::config_path();
    write_template(&path, force)?;
    Ok(path)
}

fn write_template(path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        let backup_path = path.with_extension("toml.backup");
        fs::rename(path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    let write_err = |e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    };
    if let Some(parent) = path.parent() {
        xdg::ensure_dir(parent).map_err(write_err)?;
    }
    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(write_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(write_err)?;
    }

    tracing::info!("Wrote default configuration to {}", path.display());
    Ok(())
}
