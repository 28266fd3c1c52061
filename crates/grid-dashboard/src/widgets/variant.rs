//! Typed per-kind configuration parsed from an instance's variant string.

use super::WidgetKind;
use std::fmt;

/// Hour format of the clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClockFormat {
    /// `14:05`
    #[default]
    H24,
    /// `2:05 PM`
    H12,
}

/// Drawing style of the chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChartStyle {
    /// Sparkline.
    #[default]
    Line,
    /// Horizontal bars, one per sample.
    Bar,
    /// Filled columns.
    Area,
}

/// Level of detail of the system monitor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MonitorStyle {
    /// Gauges only.
    #[default]
    Compact,
    /// Gauges plus CPU history.
    Detailed,
}

/// Configuration of one widget instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetConfig {
    /// `12h` or `24h`.
    Clock {
        /// Hour format.
        format: ClockFormat,
    },
    /// No options.
    Calendar,
    /// `open` hides completed items.
    Todo {
        /// Skip completed items.
        hide_completed: bool,
    },
    /// `pinned` shows pinned notes only.
    Notes {
        /// Skip unpinned notes.
        pinned_only: bool,
    },
    /// `line`, `bar` or `area`.
    Chart {
        /// Drawing style.
        style: ChartStyle,
    },
    /// `compact` or `detailed`.
    SystemMonitor {
        /// Level of detail.
        style: MonitorStyle,
    },
}

impl WidgetConfig {
    /// Parses `variant` for `kind`.
    ///
    /// A missing or unrecognised variant yields the kind's default
    /// configuration.
    pub fn parse(kind: WidgetKind, variant: Option<&str>) -> Self {
        let v = variant.map(|s| s.trim().to_lowercase());
        let v = v.as_deref().unwrap_or("");
        let config = match (kind, v) {
            (WidgetKind::Clock, "12h" | "12") => Some(WidgetConfig::Clock {
                format: ClockFormat::H12,
            }),
            (WidgetKind::Clock, "24h" | "24") => Some(WidgetConfig::Clock {
                format: ClockFormat::H24,
            }),
            (WidgetKind::Todo, "open") => Some(WidgetConfig::Todo {
                hide_completed: true,
            }),
            (WidgetKind::Todo, "all") => Some(WidgetConfig::Todo {
                hide_completed: false,
            }),
            (WidgetKind::Notes, "pinned") => Some(WidgetConfig::Notes { pinned_only: true }),
            (WidgetKind::Notes, "all") => Some(WidgetConfig::Notes { pinned_only: false }),
            (WidgetKind::Chart, "line") => Some(WidgetConfig::Chart {
                style: ChartStyle::Line,
            }),
            (WidgetKind::Chart, "bar") => Some(WidgetConfig::Chart {
                style: ChartStyle::Bar,
            }),
            (WidgetKind::Chart, "area") => Some(WidgetConfig::Chart {
                style: ChartStyle::Area,
            }),
            (WidgetKind::SystemMonitor, "compact") => Some(WidgetConfig::SystemMonitor {
                style: MonitorStyle::Compact,
            }),
            (WidgetKind::SystemMonitor, "detailed") => Some(WidgetConfig::SystemMonitor {
                style: MonitorStyle::Detailed,
            }),
            _ => None,
        };
        config.unwrap_or_else(|| {
            if !v.is_empty() {
                tracing::debug!(kind = %kind, variant = v, "unrecognised variant, using default");
            }
            Self::default_for(kind)
        })
    }

    /// Default configuration of `kind`.
    pub fn default_for(kind: WidgetKind) -> Self {
        match kind {
            WidgetKind::Clock => WidgetConfig::Clock {
                format: ClockFormat::default(),
            },
            WidgetKind::Calendar => WidgetConfig::Calendar,
            WidgetKind::Todo => WidgetConfig::Todo {
                hide_completed: false,
            },
            WidgetKind::Notes => WidgetConfig::Notes { pinned_only: false },
            WidgetKind::Chart => WidgetConfig::Chart {
                style: ChartStyle::default(),
            },
            WidgetKind::SystemMonitor => WidgetConfig::SystemMonitor {
                style: MonitorStyle::default(),
            },
        }
    }

    /// Kind this configuration belongs to.
    pub fn kind(&self) -> WidgetKind {
        match self {
            WidgetConfig::Clock { .. } => WidgetKind::Clock,
            WidgetConfig::Calendar => WidgetKind::Calendar,
            WidgetConfig::Todo { .. } => WidgetKind::Todo,
            WidgetConfig::Notes { .. } => WidgetKind::Notes,
            WidgetConfig::Chart { .. } => WidgetKind::Chart,
            WidgetConfig::SystemMonitor { .. } => WidgetKind::SystemMonitor,
        }
    }
}

impl fmt::Display for WidgetConfig {
    /// Canonical variant string, empty for payload-less kinds.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WidgetConfig::Clock {
                format: ClockFormat::H24,
            } => "24h",
            WidgetConfig::Clock {
                format: ClockFormat::H12,
            } => "12h",
            WidgetConfig::Calendar => "",
            WidgetConfig::Todo { hide_completed } => {
                if *hide_completed {
                    "open"
                } else {
                    "all"
                }
            }
            WidgetConfig::Notes { pinned_only } => {
                if *pinned_only {
                    "pinned"
                } else {
                    "all"
                }
            }
            WidgetConfig::Chart { style } => match style {
                ChartStyle::Line => "line",
                ChartStyle::Bar => "bar",
                ChartStyle::Area => "area",
            },
            WidgetConfig::SystemMonitor { style } => match style {
                MonitorStyle::Compact => "compact",
                MonitorStyle::Detailed => "detailed",
            },
        };
        f.write_str(s)
    }
}
