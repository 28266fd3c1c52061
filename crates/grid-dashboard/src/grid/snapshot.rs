//! The persisted grid document.

use crate::layout::Layouts;
use crate::widgets::{WidgetConfig, WidgetKind};
use serde::{Deserialize, Deserializer, Serialize};

/// Current document version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// One placed, configured widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetInstance {
    /// Unique id, shared by its rectangles on every breakpoint.
    pub id: String,
    /// Widget kind.
    pub kind: WidgetKind,
    /// Display title.
    pub title: String,
    /// Kind-specific option, e.g. `12h` for a clock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
}

impl WidgetInstance {
    /// Typed configuration parsed from the variant.
    pub fn config(&self) -> WidgetConfig {
        WidgetConfig::parse(self.kind, self.variant.as_deref())
    }
}

/// Everything needed to rebuild the grid.
///
/// ```json
/// {
///   "version": 1,
///   "widgets": [{ "id": "clock-1", "kind": "clock", "title": "Clock" }],
///   "layouts": { "lg": [{ "id": "clock-1", "x": 0, "y": 0, "w": 3, "h": 2 }], "md": [], "sm": [], "xs": [] }
/// }
/// ```
///
/// Widgets of an unknown kind are skipped while reading, so a document
/// written by a newer build still loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    /// Document version.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Widget instances in insertion order.
    #[serde(default, deserialize_with = "known_widgets")]
    pub widgets: Vec<WidgetInstance>,
    /// Rectangles per breakpoint.
    #[serde(default)]
    pub layouts: Layouts,
}

impl Default for GridSnapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            widgets: Vec::new(),
            layouts: Layouts::new(),
        }
    }
}

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

#[derive(Deserialize)]
struct StoredWidget {
    id: String,
    kind: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    variant: Option<String>,
}

fn known_widgets<'de, D>(deserializer: D) -> Result<Vec<WidgetInstance>, D::Error>
where
    D: Deserializer<'de>,
{
    let stored = Vec::<StoredWidget>::deserialize(deserializer)?;
    Ok(stored
        .into_iter()
        .filter_map(|w| match w.kind.parse::<WidgetKind>() {
            Ok(kind) => Some(WidgetInstance {
                title: w
                    .title
                    .unwrap_or_else(|| kind.builtin_spec().title.to_string()),
                id: w.id,
                kind,
                variant: w.variant,
            }),
            Err(_) => {
                tracing::warn!(id = %w.id, kind = %w.kind, "dropping widget of unknown kind");
                None
            }
        })
        .collect())
}
