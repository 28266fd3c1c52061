//! Grid Dashboard - CLI entry point
//!
//! `gdash tui` opens the interactive dashboard. The other subcommands edit
//! the same persisted grid, todo list and notes from the shell.

mod commands;

#[cfg(test)]
#[path = "cli_tests/cli.rs"]
mod cli_tests;

use clap::{Parser, Subcommand};
use grid_dashboard::config::schema::Config;
use grid_dashboard::config::ConfigLoader;
use grid_dashboard::layout::Breakpoint;
use grid_dashboard::lists::Priority;
use grid_dashboard::logging;
use grid_dashboard::widgets::WidgetKind;
use std::path::PathBuf;
use std::process::ExitCode;

/// Responsive widget dashboard for the terminal
#[derive(Parser)]
#[command(name = "gdash")]
#[command(version, about = "Responsive widget dashboard for the terminal")]
pub(crate) struct Cli {
    /// Configuration file (defaults to the XDG config path)
    #[arg(long, global = true)]
    pub(crate) config: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

/// Available subcommands for the gdash CLI
#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Launch the interactive dashboard
    Tui,

    /// Inspect or reset the grid layouts
    Layout {
        #[command(subcommand)]
        action: LayoutAction,
    },

    /// Add, remove, move and resize widgets
    Widget {
        #[command(subcommand)]
        action: WidgetAction,
    },

    /// Manage the todo list
    Todo {
        #[command(subcommand)]
        action: TodoAction,
    },

    /// Manage notes
    Note {
        #[command(subcommand)]
        action: NoteAction,
    },

    /// Manage configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions for the `layout` subcommand.
#[derive(Subcommand)]
pub(crate) enum LayoutAction {
    /// Print the layout of one or every breakpoint
    Show {
        /// Only this breakpoint (lg, md, sm, xs)
        #[arg(long, short)]
        breakpoint: Option<Breakpoint>,
        /// Print the persisted document as JSON
        #[arg(long)]
        json: bool,
    },
    /// Re-pack every widget at its default size on all breakpoints
    Reset,
}

/// Actions for the `widget` subcommand.
#[derive(Subcommand)]
pub(crate) enum WidgetAction {
    /// Add a widget at the first free spot
    Add {
        /// Widget kind (clock, calendar, todo, notes, chart, system-monitor)
        kind: WidgetKind,
        /// Kind-specific option, e.g. 12h for a clock or bar for a chart
        #[arg(long)]
        variant: Option<String>,
    },
    /// Remove a widget from every breakpoint
    Remove {
        /// Widget id or unique prefix
        id: String,
    },
    /// List widgets
    List,
    /// Change a widget's title
    Rename {
        /// Widget id or unique prefix
        id: String,
        /// New title
        title: String,
    },
    /// Move a widget on one breakpoint
    #[command(allow_negative_numbers = true)]
    Move {
        /// Widget id or unique prefix
        id: String,
        /// Target column
        x: i32,
        /// Target row
        y: i32,
        /// Breakpoint to edit
        #[arg(long, short, default_value_t = Breakpoint::Lg)]
        breakpoint: Breakpoint,
    },
    /// Resize a widget on one breakpoint
    #[command(allow_negative_numbers = true)]
    Resize {
        /// Widget id or unique prefix
        id: String,
        /// Width in columns
        w: i32,
        /// Height in rows
        h: i32,
        /// Breakpoint to edit
        #[arg(long, short, default_value_t = Breakpoint::Lg)]
        breakpoint: Breakpoint,
    },
}

/// Actions for the `todo` subcommand.
#[derive(Subcommand)]
pub(crate) enum TodoAction {
    /// Add a todo
    Add {
        /// What needs doing
        text: String,
        /// low, medium or high
        #[arg(long, short, default_value_t = Priority::Medium)]
        priority: Priority,
    },
    /// List todos, newest first
    List,
    /// Mark a todo done or open
    Toggle {
        /// Todo id or unique prefix
        id: String,
    },
    /// Remove a todo
    Remove {
        /// Todo id or unique prefix
        id: String,
    },
    /// Remove every completed todo
    ClearCompleted,
}

/// Actions for the `note` subcommand.
#[derive(Subcommand)]
pub(crate) enum NoteAction {
    /// Add a note
    Add {
        /// Headline
        title: String,
        /// Body text
        #[arg(long, short)]
        content: Option<String>,
    },
    /// List notes, pinned first
    List,
    /// Pin or unpin a note
    Pin {
        /// Note id or unique prefix
        id: String,
    },
    /// Remove a note
    Remove {
        /// Note id or unique prefix
        id: String,
    },
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Config commands must work even when the file is broken.
    if let Commands::Config { action } = cli.command {
        logging::init_stderr(Config::default().log.level);
        return commands::run_config_command(cli.config.as_deref(), action);
    }

    let config = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return commands::fail(e),
    };
    if !matches!(cli.command, Commands::Tui) {
        logging::init_stderr(config.log.level);
    }

    match cli.command {
        Commands::Tui => commands::run_tui_command(&config),
        Commands::Layout { action } => commands::run_layout_command(&config, action),
        Commands::Widget { action } => commands::run_widget_command(&config, action),
        Commands::Todo { action } => commands::run_todo_command(&config, action),
        Commands::Note { action } => commands::run_note_command(&config, action),
        Commands::Config { action } => commands::run_config_command(cli.config.as_deref(), action),
    }
}
