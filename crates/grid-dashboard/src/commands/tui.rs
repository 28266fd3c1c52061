//! The interactive dashboard command.

use super::{ensure_data_dir, fail, open_grid, open_notes, open_todos, system_clock};
use chrono::{Local, Offset};
use grid_dashboard::config::schema::{Config, MonitorSource};
use grid_dashboard::logging;
use grid_dashboard::tui::app::{App, AppOptions};
use grid_dashboard::widgets::{LiveSampler, MonitorFeed, SimulatedSampler, SystemSampler};
use std::process::ExitCode;

/// Runs the TUI until the user quits.
///
/// Logs go to the configured log file so they never tear the screen.
pub(crate) fn run_tui_command(config: &Config) -> ExitCode {
    let options = match AppOptions::from_config(config) {
        Ok(options) => options,
        Err(e) => return fail(e),
    };
    let monitor_refresh = match config.tui.monitor_refresh() {
        Ok(every) => every,
        Err(e) => return fail(e),
    };
    if let Err(e) = ensure_data_dir(config) {
        return fail(e);
    }
    let log_path = config.log.file_path(&config.storage);
    if let Err(e) = logging::init_file(config.log.level, &log_path) {
        return fail(format!("cannot open log file {}: {e}", log_path.display()));
    }
    tracing::info!(log = %log_path.display(), "starting dashboard");

    let sampler: Box<dyn SystemSampler> = match config.tui.monitor_source {
        MonitorSource::Live => Box::new(LiveSampler::new()),
        MonitorSource::Simulated => Box::new(SimulatedSampler::new(config.tui.monitor_seed)),
    };
    let clock = system_clock();
    let mut app = App::new(
        open_grid(config),
        open_todos(config, clock.clone()),
        open_notes(config, clock.clone()),
        MonitorFeed::new(sampler, monitor_refresh),
        clock,
        options,
    )
    .with_offset(Local::now().offset().fix());

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => return fail(format!("failed to create tokio runtime: {e}")),
    };
    match runtime.block_on(app.run()) {
        Ok(()) => {
            tracing::info!("dashboard closed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "dashboard failed");
            fail(format!("TUI error: {e}"))
        }
    }
}
