//! Widget system for the grid dashboard.
//!
//! A [`Widget`] turns its typed [`WidgetConfig`] plus a shared
//! [`WidgetContext`] into styled text sized for the rectangle it occupies.
//! The [`WidgetRegistry`] maps each [`WidgetKind`] to its minimum size,
//! default title and factory; kinds without a registration render a
//! visible placeholder.
//!
//! # Example
//!
//! ```
//! use grid_dashboard::layout::CellSize;
//! use grid_dashboard::widgets::{RenderSize, WidgetConfig, WidgetContext, WidgetKind, WidgetRegistry};
//!
//! let registry = WidgetRegistry::new();
//! assert_eq!(registry.min_size(WidgetKind::Calendar), CellSize::new(5, 4));
//!
//! let config = WidgetConfig::parse(WidgetKind::Clock, Some("12h"));
//! let ctx = WidgetContext::new(chrono::Utc::now());
//! let text = registry.render(&config, RenderSize::new(CellSize::new(3, 2), 20, 4), &ctx);
//! assert!(!text.lines.is_empty());
//! ```

pub mod calendar;
pub mod chart;
pub mod clock;
pub mod context;
pub mod kind;
pub mod notes;
pub mod system_monitor;
pub mod todo;
pub mod variant;

pub use context::WidgetContext;
pub use kind::{ParseWidgetKindError, WidgetKind, WidgetSpec};
pub use system_monitor::{LiveSampler, MonitorFeed, SimulatedSampler, SystemSampler, SystemStats};
pub use variant::{ChartStyle, ClockFormat, MonitorStyle, WidgetConfig};

use crate::layout::CellSize;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Text};
use std::collections::HashMap;

/// How much detail a widget shows, derived from its size in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// `w <= 3` or `h <= 2`.
    Compact,
    /// Anything between compact and large.
    Medium,
    /// `w >= 6` and `h >= 4`.
    Large,
}

impl Presentation {
    /// Presentation mode of a rectangle of `size` cells.
    pub fn for_size(size: CellSize) -> Self {
        if size.w <= 3 || size.h <= 2 {
            Presentation::Compact
        } else if size.w >= 6 && size.h >= 4 {
            Presentation::Large
        } else {
            Presentation::Medium
        }
    }
}

/// Space a widget renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSize {
    /// Size of the placement in grid cells.
    pub cells: CellSize,
    /// Inner width in terminal columns.
    pub width: u16,
    /// Inner height in terminal rows.
    pub height: u16,
}

impl RenderSize {
    /// Creates a render size.
    pub fn new(cells: CellSize, width: u16, height: u16) -> Self {
        Self {
            cells,
            width,
            height,
        }
    }

    /// Presentation mode for these cells.
    pub fn presentation(&self) -> Presentation {
        Presentation::for_size(self.cells)
    }
}

/// A renderer for one widget instance.
pub trait Widget: Send + Sync {
    /// Renders the widget content.
    ///
    /// Implementations should not produce more lines than `size.height`
    /// nor lines wider than `size.width`; the host clips anything beyond.
    fn render(&self, size: RenderSize, context: &WidgetContext) -> Text<'static>;

    /// Name of the renderer, for diagnostics.
    fn name(&self) -> &'static str;
}

/// Creates a renderer from an instance configuration.
pub type WidgetFactory = fn(&WidgetConfig) -> Box<dyn Widget>;

#[derive(Clone, Copy)]
struct Registration {
    spec: WidgetSpec,
    factory: WidgetFactory,
}

/// Registry mapping widget kinds to metadata and factories.
pub struct WidgetRegistry {
    entries: HashMap<WidgetKind, Registration>,
}

impl WidgetRegistry {
    /// Creates a registry with every built-in widget.
    pub fn new() -> Self {
        let mut reg = Self::empty();
        for kind in WidgetKind::ALL {
            reg.register(kind, kind.builtin_spec(), builtin_factory(kind));
        }
        reg
    }

    /// Creates a registry with nothing registered.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Registers `kind`, replacing any previous registration.
    pub fn register(&mut self, kind: WidgetKind, spec: WidgetSpec, factory: WidgetFactory) {
        self.entries.insert(kind, Registration { spec, factory });
    }

    /// Removes the registration of `kind`. Returns `true` if it existed.
    pub fn unregister(&mut self, kind: WidgetKind) -> bool {
        self.entries.remove(&kind).is_some()
    }

    /// Returns `true` if `kind` is registered.
    pub fn is_registered(&self, kind: WidgetKind) -> bool {
        self.entries.contains_key(&kind)
    }

    /// Registered metadata of `kind`.
    pub fn spec(&self, kind: WidgetKind) -> Option<WidgetSpec> {
        self.entries.get(&kind).map(|r| r.spec)
    }

    /// Minimum size of `kind`, falling back to the built-in size.
    pub fn min_size(&self, kind: WidgetKind) -> CellSize {
        self.spec(kind)
            .unwrap_or_else(|| kind.builtin_spec())
            .min
    }

    /// Registered kinds in menu order.
    pub fn kinds(&self) -> Vec<WidgetKind> {
        WidgetKind::ALL
            .into_iter()
            .filter(|k| self.is_registered(*k))
            .collect()
    }

    /// Creates a renderer for `config`, or `None` if its kind is not
    /// registered.
    pub fn create(&self, config: &WidgetConfig) -> Option<Box<dyn Widget>> {
        self.entries
            .get(&config.kind())
            .map(|r| (r.factory)(config))
    }

    /// Renders `config`, drawing a placeholder for unregistered kinds.
    pub fn render(
        &self,
        config: &WidgetConfig,
        size: RenderSize,
        context: &WidgetContext,
    ) -> Text<'static> {
        match self.create(config) {
            Some(widget) => widget.render(size, context),
            None => PlaceholderWidget {
                label: config.kind().name(),
            }
            .render(size, context),
        }
    }
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn builtin_factory(kind: WidgetKind) -> WidgetFactory {
    match kind {
        WidgetKind::Clock => clock::ClockWidget::create,
        WidgetKind::Calendar => calendar::CalendarWidget::create,
        WidgetKind::Todo => todo::TodoWidget::create,
        WidgetKind::Notes => notes::NotesWidget::create,
        WidgetKind::Chart => chart::ChartWidget::create,
        WidgetKind::SystemMonitor => system_monitor::SystemMonitorWidget::create,
    }
}

/// Stand-in drawn for kinds without a registered renderer.
struct PlaceholderWidget {
    label: &'static str,
}

impl Widget for PlaceholderWidget {
    fn render(&self, size: RenderSize, _context: &WidgetContext) -> Text<'static> {
        let line = fit(&format!("[{}: unavailable]", self.label), size.width);
        Text::from(Line::styled(line, Style::default().add_modifier(Modifier::DIM)))
    }

    fn name(&self) -> &'static str {
        "placeholder"
    }
}

/// Truncates `s` to `width` columns, marking the cut with `…`.
pub(crate) fn fit(s: &str, width: u16) -> String {
    let width = width as usize;
    if s.chars().count() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// Keeps at most `height` lines, replacing the last kept line with a
/// `+N more` marker when some were dropped.
pub(crate) fn clip_lines(mut lines: Vec<Line<'static>>, height: u16, width: u16) -> Vec<Line<'static>> {
    let height = height as usize;
    if lines.len() <= height {
        return lines;
    }
    if height == 0 {
        return Vec::new();
    }
    let hidden = lines.len() - height + 1;
    lines.truncate(height - 1);
    lines.push(Line::styled(
        fit(&format!("+{hidden} more"), width),
        Style::default().add_modifier(Modifier::DIM),
    ));
    lines
}
