//! Layout and widget commands.

use super::{ensure_data_dir, fail, open_grid, resolve_id};
use crate::{LayoutAction, WidgetAction};
use grid_dashboard::config::schema::Config;
use grid_dashboard::grid::GridController;
use grid_dashboard::layout::{Breakpoint, BreakpointLayout};
use std::process::ExitCode;

/// Marks used for widgets in the layout map, in layout order.
const MAP_MARKS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Runs a `layout` subcommand.
pub(crate) fn run_layout_command(config: &Config, action: LayoutAction) -> ExitCode {
    match action {
        LayoutAction::Show { breakpoint, json } => {
            let grid = open_grid(config);
            if json {
                return match serde_json::to_string_pretty(&grid.snapshot()) {
                    Ok(s) => {
                        println!("{s}");
                        ExitCode::SUCCESS
                    }
                    Err(e) => fail(e),
                };
            }
            let bps: Vec<Breakpoint> = match breakpoint {
                Some(bp) => vec![bp],
                None => Breakpoint::ALL.to_vec(),
            };
            for (i, bp) in bps.into_iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print_layout(&grid, bp);
            }
            ExitCode::SUCCESS
        }
        LayoutAction::Reset => {
            if let Err(e) = ensure_data_dir(config) {
                return fail(e);
            }
            let mut grid = open_grid(config);
            match grid.reset_layouts() {
                Ok(()) => {
                    println!("Reset layouts of {} widgets", grid.widgets().len());
                    ExitCode::SUCCESS
                }
                Err(e) => fail(e),
            }
        }
    }
}

fn print_layout(grid: &GridController, bp: Breakpoint) {
    let layout = grid.layout(bp);
    let cols = grid.breakpoints().cols(bp);
    println!("{bp} · {cols} cols · min width {}px", grid.breakpoints().spec(bp).min_width);
    if layout.is_empty() {
        println!("  (empty)");
        return;
    }
    for (i, rect) in layout.iter().enumerate() {
        let title = grid.widget(&rect.id).map_or("?", |w| w.title.as_str());
        println!(
            "  {} {:<20} {:<16} x={} y={} w={} h={}",
            mark(i),
            rect.id,
            title,
            rect.x,
            rect.y,
            rect.w,
            rect.h
        );
    }
    println!();
    for line in layout_map(layout, cols) {
        println!("  {line}");
    }
}

fn mark(index: usize) -> char {
    MAP_MARKS.get(index).map_or('#', |b| char::from(*b))
}

/// One string per grid row, one character per column: the widget's mark,
/// or `.` for a free cell.
pub(crate) fn layout_map(layout: &BreakpointLayout, cols: u16) -> Vec<String> {
    (0..layout.height())
        .map(|row| {
            (0..cols)
                .map(|col| {
                    layout
                        .iter()
                        .position(|r| r.contains_cell(col, row))
                        .map_or('.', mark)
                })
                .collect()
        })
        .collect()
}

/// Runs a `widget` subcommand.
pub(crate) fn run_widget_command(config: &Config, action: WidgetAction) -> ExitCode {
    let result = match action {
        WidgetAction::List => Ok(widget_table(&open_grid(config))),
        action => ensure_data_dir(config).and_then(|()| edit_widgets(config, action)),
    };
    match result {
        Ok(message) => {
            println!("{message}");
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

fn widget_table(grid: &GridController) -> String {
    if grid.widgets().is_empty() {
        return "No widgets".to_string();
    }
    let mut lines = vec![format!("{:<20} {:<15} {:<16} VARIANT", "ID", "KIND", "TITLE")];
    for w in grid.widgets() {
        lines.push(format!(
            "{:<20} {:<15} {:<16} {}",
            w.id,
            w.kind.name(),
            w.title,
            w.variant.as_deref().unwrap_or("-")
        ));
    }
    lines.join("\n")
}

fn edit_widgets(config: &Config, action: WidgetAction) -> Result<String, String> {
    let mut grid = open_grid(config);
    let ids: Vec<String> = grid.widgets().iter().map(|w| w.id.clone()).collect();
    let resolve = |query: &str| resolve_id(query, ids.iter().map(String::as_str));

    match action {
        WidgetAction::List => Ok(widget_table(&grid)),
        WidgetAction::Add { kind, variant } => {
            let id = grid
                .add_widget(kind, variant.as_deref())
                .map_err(|e| e.to_string())?;
            Ok(format!("Added {}", placed(&grid, &id, Breakpoint::Lg)))
        }
        WidgetAction::Remove { id } => {
            let id = resolve(&id)?;
            let removed = grid.remove_widget(&id).map_err(|e| e.to_string())?;
            Ok(format!("Removed {} ({})", removed.id, removed.title))
        }
        WidgetAction::Rename { id, title } => {
            let id = resolve(&id)?;
            grid.rename_widget(&id, title.as_str())
                .map_err(|e| e.to_string())?;
            Ok(format!("Renamed {id} to {title}"))
        }
        WidgetAction::Move { id, x, y, breakpoint } => {
            let id = resolve(&id)?;
            grid.set_active_breakpoint(breakpoint);
            grid.move_widget(&id, x, y).map_err(|e| e.to_string())?;
            Ok(placed(&grid, &id, breakpoint))
        }
        WidgetAction::Resize { id, w, h, breakpoint } => {
            let id = resolve(&id)?;
            grid.set_active_breakpoint(breakpoint);
            grid.resize_widget(&id, w, h).map_err(|e| e.to_string())?;
            Ok(placed(&grid, &id, breakpoint))
        }
    }
}

fn placed(grid: &GridController, id: &str, bp: Breakpoint) -> String {
    match grid.layout(bp).get(id) {
        Some(r) => format!("{id} on {bp}: x={} y={} w={} h={}", r.x, r.y, r.w, r.h),
        None => format!("{id} has no placement on {bp}"),
    }
}
