//! Configuration file commands.

use super::fail;
use crate::ConfigAction;
use grid_dashboard::config::{default, xdg, ConfigLoader};
use std::path::Path;
use std::process::ExitCode;

/// Runs a `config` subcommand. `path` is the `--config` override, if any.
pub(crate) fn run_config_command(path: Option<&Path>, action: ConfigAction) -> ExitCode {
    match action {
        ConfigAction::Init { force } => match default::create_default_config(force) {
            Ok(path) => {
                println!("Created configuration at {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => fail(e),
        },
        ConfigAction::Path => {
            let path = path.map_or_else(xdg::config_path, Path::to_path_buf);
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        ConfigAction::Validate => match ConfigLoader::load(path) {
            Ok(config) => {
                println!("Configuration is valid");
                println!("{config:#?}");
                ExitCode::SUCCESS
            }
            Err(e) => fail(e),
        },
    }
}
