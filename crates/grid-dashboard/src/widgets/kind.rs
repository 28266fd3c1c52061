//! The closed set of widget kinds and their registered metadata.

use crate::layout::CellSize;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every kind of widget the dashboard knows how to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetKind {
    /// Digital clock.
    Clock,
    /// Month calendar.
    Calendar,
    /// Todo list.
    Todo,
    /// Notes board.
    Notes,
    /// Chart over a sample series.
    Chart,
    /// CPU and memory gauges.
    SystemMonitor,
}

impl WidgetKind {
    /// All kinds in menu order.
    pub const ALL: [WidgetKind; 6] = [
        WidgetKind::Clock,
        WidgetKind::Calendar,
        WidgetKind::Todo,
        WidgetKind::Notes,
        WidgetKind::Chart,
        WidgetKind::SystemMonitor,
    ];

    /// Stable name used in persisted documents and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            WidgetKind::Clock => "clock",
            WidgetKind::Calendar => "calendar",
            WidgetKind::Todo => "todo",
            WidgetKind::Notes => "notes",
            WidgetKind::Chart => "chart",
            WidgetKind::SystemMonitor => "system-monitor",
        }
    }

    /// Built-in title and minimum size.
    pub fn builtin_spec(self) -> WidgetSpec {
        let (title, w, h) = match self {
            WidgetKind::Clock => ("Clock", 3, 2),
            WidgetKind::Calendar => ("Calendar", 5, 4),
            WidgetKind::Todo => ("Todo List", 3, 4),
            WidgetKind::Notes => ("Notes", 3, 3),
            WidgetKind::Chart => ("Chart", 4, 3),
            WidgetKind::SystemMonitor => ("System Monitor", 3, 3),
        };
        WidgetSpec {
            title,
            min: CellSize::new(w, h),
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown widget kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown widget kind: {0} (expected one of clock, calendar, todo, notes, chart, system-monitor)")]
pub struct ParseWidgetKindError(pub String);

impl FromStr for WidgetKind {
    type Err = ParseWidgetKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        match normalized.as_str() {
            "clock" => Ok(WidgetKind::Clock),
            "calendar" => Ok(WidgetKind::Calendar),
            "todo" | "todo-list" => Ok(WidgetKind::Todo),
            "notes" | "note" => Ok(WidgetKind::Notes),
            "chart" => Ok(WidgetKind::Chart),
            "system-monitor" | "systemmonitor" | "monitor" => Ok(WidgetKind::SystemMonitor),
            _ => Err(ParseWidgetKindError(s.to_string())),
        }
    }
}

/// Registered metadata for a widget kind.
///
/// The minimum size doubles as the default size of a newly added widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetSpec {
    /// Default title of new instances.
    pub title: &'static str,
    /// Minimum (and default) size in grid cells.
    pub min: CellSize,
}
