//! CLI argument parsing tests.

use crate::{Cli, Commands, ConfigAction, LayoutAction, NoteAction, TodoAction, WidgetAction};
use clap::{CommandFactory, Parser};
use grid_dashboard::layout::Breakpoint;
use grid_dashboard::lists::Priority;
use grid_dashboard::widgets::WidgetKind;
use std::path::PathBuf;

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["gdash"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).expect("should parse")
}

#[test]
fn verify_cli() {
    Cli::command().debug_assert();
}

#[test]
fn test_missing_subcommand_fails() {
    assert!(Cli::try_parse_from(["gdash"]).is_err());
}

#[test]
fn test_unknown_subcommand_fails() {
    assert!(Cli::try_parse_from(["gdash", "frobnicate"]).is_err());
}

#[test]
fn test_tui_parses() {
    let cli = parse(&["tui"]);
    assert!(matches!(cli.command, Commands::Tui));
    assert!(cli.config.is_none());
}

#[test]
fn test_global_config_flag_after_subcommand() {
    let cli = parse(&["widget", "list", "--config", "/tmp/gdash.toml"]);
    assert_eq!(cli.config, Some(PathBuf::from("/tmp/gdash.toml")));
    assert!(matches!(
        cli.command,
        Commands::Widget {
            action: WidgetAction::List
        }
    ));
}

#[test]
fn test_layout_show_defaults() {
    match parse(&["layout", "show"]).command {
        Commands::Layout {
            action: LayoutAction::Show { breakpoint, json },
        } => {
            assert_eq!(breakpoint, None);
            assert!(!json);
        }
        _ => panic!("expected layout show"),
    }
}

#[test]
fn test_layout_show_breakpoint_and_json() {
    match parse(&["layout", "show", "--breakpoint", "sm", "--json"]).command {
        Commands::Layout {
            action: LayoutAction::Show { breakpoint, json },
        } => {
            assert_eq!(breakpoint, Some(Breakpoint::Sm));
            assert!(json);
        }
        _ => panic!("expected layout show"),
    }
}

#[test]
fn test_layout_show_rejects_unknown_breakpoint() {
    assert!(Cli::try_parse_from(["gdash", "layout", "show", "-b", "huge"]).is_err());
}

#[test]
fn test_widget_add_kind_and_variant() {
    match parse(&["widget", "add", "system-monitor", "--variant", "compact"]).command {
        Commands::Widget {
            action: WidgetAction::Add { kind, variant },
        } => {
            assert_eq!(kind, WidgetKind::SystemMonitor);
            assert_eq!(variant.as_deref(), Some("compact"));
        }
        _ => panic!("expected widget add"),
    }
}

#[test]
fn test_widget_add_rejects_unknown_kind() {
    assert!(Cli::try_parse_from(["gdash", "widget", "add", "weather"]).is_err());
}

#[test]
fn test_widget_move_accepts_negative_coordinates() {
    match parse(&["widget", "move", "clock-1", "-2", "3"]).command {
        Commands::Widget {
            action: WidgetAction::Move { id, x, y, breakpoint },
        } => {
            assert_eq!(id, "clock-1");
            assert_eq!((x, y), (-2, 3));
            assert_eq!(breakpoint, Breakpoint::Lg);
        }
        _ => panic!("expected widget move"),
    }
}

#[test]
fn test_widget_resize_on_breakpoint() {
    match parse(&["widget", "resize", "chart", "4", "5", "-b", "xs"]).command {
        Commands::Widget {
            action: WidgetAction::Resize { w, h, breakpoint, .. },
        } => {
            assert_eq!((w, h), (4, 5));
            assert_eq!(breakpoint, Breakpoint::Xs);
        }
        _ => panic!("expected widget resize"),
    }
}

#[test]
fn test_widget_move_requires_both_coordinates() {
    assert!(Cli::try_parse_from(["gdash", "widget", "move", "clock-1", "2"]).is_err());
}

#[test]
fn test_todo_add_default_priority() {
    match parse(&["todo", "add", "water plants"]).command {
        Commands::Todo {
            action: TodoAction::Add { text, priority },
        } => {
            assert_eq!(text, "water plants");
            assert_eq!(priority, Priority::Medium);
        }
        _ => panic!("expected todo add"),
    }
}

#[test]
fn test_todo_add_high_priority() {
    match parse(&["todo", "add", "pay rent", "-p", "high"]).command {
        Commands::Todo {
            action: TodoAction::Add { priority, .. },
        } => assert_eq!(priority, Priority::High),
        _ => panic!("expected todo add"),
    }
}

#[test]
fn test_todo_clear_completed_is_kebab_case() {
    assert!(matches!(
        parse(&["todo", "clear-completed"]).command,
        Commands::Todo {
            action: TodoAction::ClearCompleted
        }
    ));
}

#[test]
fn test_note_add_with_content() {
    match parse(&["note", "add", "Ideas", "--content", "rust tui"]).command {
        Commands::Note {
            action: NoteAction::Add { title, content },
        } => {
            assert_eq!(title, "Ideas");
            assert_eq!(content.as_deref(), Some("rust tui"));
        }
        _ => panic!("expected note add"),
    }
}

#[test]
fn test_note_pin_requires_id() {
    assert!(Cli::try_parse_from(["gdash", "note", "pin"]).is_err());
}

#[test]
fn test_config_init_force_parses() {
    match parse(&["config", "init", "--force"]).command {
        Commands::Config {
            action: ConfigAction::Init { force },
        } => assert!(force),
        _ => panic!("expected config init"),
    }
}

#[test]
fn test_config_without_action_fails() {
    assert!(Cli::try_parse_from(["gdash", "config"]).is_err());
}

#[test]
fn test_subcommands_in_help() {
    let help = Cli::command().render_help().to_string();
    for name in ["tui", "layout", "widget", "todo", "note", "config"] {
        assert!(help.contains(name), "help should list {name}");
    }
}
