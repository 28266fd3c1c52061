//! Gesture orchestration over the layout engine.

use super::gesture::{Gesture, GestureKind};
use super::snapshot::{GridSnapshot, WidgetInstance, SNAPSHOT_VERSION};
use super::GridError;
use crate::layout::{
    apply_change, compact, effective_min, first_fit, is_valid, Breakpoint, BreakpointLayout, Breakpoints,
    CellSize, Change, Layouts,
};
use crate::widgets::{WidgetConfig, WidgetKind, WidgetRegistry};
use grid_store::Store;
use std::collections::HashSet;

#[cfg(test)]
mod tests;

/// Owns the widget instances and their layouts, applies gestures and
/// persists every change.
///
/// One gesture at a time: a drag or resize begins on one widget, receives
/// cumulative deltas, and either ends (keeping the result) or is cancelled
/// (restoring the layout captured when it began). Gestures only edit the
/// active breakpoint; if the viewport crosses into another breakpoint the
/// gesture is cancelled.
pub struct GridController {
    registry: WidgetRegistry,
    breakpoints: Breakpoints,
    widgets: Vec<WidgetInstance>,
    layouts: Layouts,
    active: Breakpoint,
    gesture: Option<Gesture>,
    store: Box<dyn Store<GridSnapshot>>,
}

impl GridController {
    /// Creates an empty grid on the widest breakpoint.
    pub fn new(
        registry: WidgetRegistry,
        breakpoints: Breakpoints,
        store: Box<dyn Store<GridSnapshot>>,
    ) -> Self {
        Self {
            registry,
            breakpoints,
            widgets: Vec::new(),
            layouts: Layouts::new(),
            active: Breakpoint::Lg,
            gesture: None,
            store,
        }
    }

    /// Creates a grid from the snapshot in `store`.
    ///
    /// A missing snapshot gives an empty grid. An unreadable one is logged
    /// and also gives an empty grid; it is overwritten by the next change.
    pub fn load(
        registry: WidgetRegistry,
        breakpoints: Breakpoints,
        store: Box<dyn Store<GridSnapshot>>,
    ) -> Self {
        let loaded = store.load();
        let mut grid = Self::new(registry, breakpoints, store);
        match loaded {
            Ok(Some(snapshot)) => {
                grid.apply_snapshot(snapshot);
                tracing::debug!(widgets = grid.widgets.len(), "restored grid");
            }
            Ok(None) => tracing::debug!("no saved grid, starting empty"),
            Err(e) => tracing::warn!("failed to load grid, starting empty: {}", e),
        }
        grid
    }

    /// The widget registry.
    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    /// The breakpoint table.
    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    /// Breakpoint that gestures currently edit.
    pub fn active_breakpoint(&self) -> Breakpoint {
        self.active
    }

    /// Column count of the active breakpoint.
    pub fn cols(&self) -> u16 {
        self.breakpoints.cols(self.active)
    }

    /// Resolves `px` to a breakpoint and makes it active.
    ///
    /// Crossing into another breakpoint cancels any active gesture.
    pub fn set_viewport_width(&mut self, px: u32) -> Breakpoint {
        let bp = self.breakpoints.resolve(px);
        self.set_active_breakpoint(bp);
        bp
    }

    /// Makes `bp` active, cancelling any gesture on another breakpoint.
    pub fn set_active_breakpoint(&mut self, bp: Breakpoint) {
        if bp == self.active {
            return;
        }
        tracing::debug!(from = %self.active, to = %bp, "breakpoint changed");
        if let Some(gesture) = self.gesture.take() {
            tracing::debug!(id = %gesture.id, kind = %gesture.kind, "cancelling gesture on breakpoint change");
            self.layouts.set(gesture.breakpoint, gesture.before);
            self.persist();
        }
        self.active = bp;
    }

    /// Widget instances in insertion order.
    pub fn widgets(&self) -> &[WidgetInstance] {
        &self.widgets
    }

    /// Widget instance with the given id.
    pub fn widget(&self, id: &str) -> Option<&WidgetInstance> {
        self.widgets.iter().find(|w| w.id == id)
    }

    /// Layout of `bp`.
    pub fn layout(&self, bp: Breakpoint) -> &BreakpointLayout {
        self.layouts.get(bp)
    }

    /// Layout of the active breakpoint.
    pub fn active_layout(&self) -> &BreakpointLayout {
        self.layouts.get(self.active)
    }

    /// The gesture in progress, if any.
    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    /// Adds a widget of `kind` at its minimum size, first-fit on every
    /// breakpoint. Returns the new id.
    pub fn add_widget(&mut self, kind: WidgetKind, variant: Option<&str>) -> Result<String, GridError> {
        self.ensure_idle()?;
        let spec = self
            .registry
            .spec(kind)
            .ok_or(GridError::UnregisteredKind(kind))?;

        let id = self.fresh_id(kind);
        let variant = variant
            .map(|v| WidgetConfig::parse(kind, Some(v)).to_string())
            .filter(|v| !v.is_empty());
        for bp in Breakpoint::ALL {
            let cols = self.breakpoints.cols(bp);
            let size = effective_min(spec.min, cols);
            let layout = self.layouts.get_mut(bp);
            let rect = first_fit(layout, &id, size, cols);
            layout.upsert(rect);
        }
        self.widgets.push(WidgetInstance {
            id: id.clone(),
            kind,
            title: spec.title.to_string(),
            variant,
        });
        tracing::info!(%id, %kind, "added widget");
        self.persist();
        Ok(id)
    }

    /// Removes the widget `id` and its rectangles on every breakpoint.
    ///
    /// The remaining rectangles are left where they are.
    pub fn remove_widget(&mut self, id: &str) -> Result<WidgetInstance, GridError> {
        self.ensure_idle()?;
        let pos = self
            .widgets
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| GridError::UnknownWidget(id.to_string()))?;
        let removed = self.widgets.remove(pos);
        let rects = self.layouts.remove_widget(id);
        tracing::info!(%id, rects, "removed widget");
        self.persist();
        Ok(removed)
    }

    /// Changes the display title of the widget `id`.
    pub fn rename_widget(&mut self, id: &str, title: impl Into<String>) -> Result<(), GridError> {
        let widget = self
            .widgets
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| GridError::UnknownWidget(id.to_string()))?;
        widget.title = title.into();
        self.persist();
        Ok(())
    }

    /// Starts dragging the widget `id`.
    pub fn begin_drag(&mut self, id: &str) -> Result<(), GridError> {
        self.begin(GestureKind::Drag, id)
    }

    /// Moves the dragged widget to its origin plus (`dx`, `dy`).
    pub fn update_drag(&mut self, id: &str, dx: i32, dy: i32) -> Result<(), GridError> {
        self.update(GestureKind::Drag, id, dx, dy)
    }

    /// Keeps the current drag result.
    pub fn end_drag(&mut self, id: &str) -> Result<(), GridError> {
        self.end(GestureKind::Drag, id)
    }

    /// Restores the layout from before the drag.
    pub fn cancel_drag(&mut self, id: &str) -> Result<(), GridError> {
        self.cancel(GestureKind::Drag, id)
    }

    /// Starts resizing the widget `id`.
    pub fn begin_resize(&mut self, id: &str) -> Result<(), GridError> {
        self.begin(GestureKind::Resize, id)
    }

    /// Resizes the widget to its original size plus (`dw`, `dh`).
    pub fn update_resize(&mut self, id: &str, dw: i32, dh: i32) -> Result<(), GridError> {
        self.update(GestureKind::Resize, id, dw, dh)
    }

    /// Keeps the current resize result.
    pub fn end_resize(&mut self, id: &str) -> Result<(), GridError> {
        self.end(GestureKind::Resize, id)
    }

    /// Restores the layout from before the resize.
    pub fn cancel_resize(&mut self, id: &str) -> Result<(), GridError> {
        self.cancel(GestureKind::Resize, id)
    }

    /// Moves the widget `id` to (`x`, `y`) on the active breakpoint.
    pub fn move_widget(&mut self, id: &str, x: i32, y: i32) -> Result<(), GridError> {
        self.change_now(id, Change::Move { x, y })
    }

    /// Resizes the widget `id` to `w` × `h` on the active breakpoint.
    pub fn resize_widget(&mut self, id: &str, w: i32, h: i32) -> Result<(), GridError> {
        self.change_now(id, Change::Resize { w, h })
    }

    /// Re-packs every widget at its minimum size, in insertion order, on
    /// every breakpoint.
    pub fn reset_layouts(&mut self) -> Result<(), GridError> {
        self.ensure_idle()?;
        let mut layouts = Layouts::new();
        for bp in Breakpoint::ALL {
            let cols = self.breakpoints.cols(bp);
            let layout = layouts.get_mut(bp);
            for widget in &self.widgets {
                let size = effective_min(self.registry.min_size(widget.kind), cols);
                let rect = first_fit(layout, &widget.id, size, cols);
                layout.upsert(rect);
            }
        }
        self.layouts = layouts;
        tracing::info!("reset layouts");
        self.persist();
        Ok(())
    }

    /// The full persisted document.
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            version: SNAPSHOT_VERSION,
            widgets: self.widgets.clone(),
            layouts: self.layouts.clone(),
        }
    }

    /// Replaces the grid with `snapshot`, repairing it, and persists the
    /// result.
    ///
    /// Widgets of unregistered kinds are dropped. A layout that is already
    /// valid is kept exactly, gaps included. Any other layout is repaired:
    /// rectangles of unknown widgets are dropped, missing ones are placed
    /// first-fit and the result is compacted.
    pub fn restore(&mut self, snapshot: GridSnapshot) -> Result<(), GridError> {
        self.ensure_idle()?;
        self.apply_snapshot(snapshot);
        self.persist();
        Ok(())
    }

    fn apply_snapshot(&mut self, snapshot: GridSnapshot) {
        let mut seen = HashSet::new();
        let widgets: Vec<WidgetInstance> = snapshot
            .widgets
            .into_iter()
            .filter(|w| {
                if !self.registry.is_registered(w.kind) {
                    tracing::warn!(id = %w.id, kind = %w.kind, "dropping widget of unregistered kind");
                    return false;
                }
                seen.insert(w.id.clone())
            })
            .collect();

        let mut layouts = Layouts::new();
        for bp in Breakpoint::ALL {
            let cols = self.breakpoints.cols(bp);
            let min_of = |id: &str| {
                widgets
                    .iter()
                    .find(|w| w.id == id)
                    .map(|w| self.registry.min_size(w.kind))
                    .unwrap_or(CellSize::new(1, 1))
            };

            let mut layout = snapshot.layouts.get(bp).clone();
            let before = layout.len();
            layout.retain(|r| seen.contains(&r.id));
            let complete = widgets.iter().all(|w| layout.contains(&w.id));
            if layout.len() == before && complete && is_valid(&layout, cols, min_of) {
                layouts.set(bp, layout);
                continue;
            }
            tracing::debug!(
                breakpoint = %bp,
                dropped = before - layout.len(),
                complete,
                "repairing layout"
            );
            let mut layout = compact(&layout, cols, min_of);
            for widget in &widgets {
                if !layout.contains(&widget.id) {
                    let size = effective_min(min_of(&widget.id), cols);
                    let rect = first_fit(&layout, &widget.id, size, cols);
                    layout.upsert(rect);
                }
            }
            layouts.set(bp, compact(&layout, cols, min_of));
        }

        self.widgets = widgets;
        self.layouts = layouts;
    }

    fn begin(&mut self, kind: GestureKind, id: &str) -> Result<(), GridError> {
        self.ensure_idle()?;
        let layout = self.layouts.get(self.active);
        let origin = layout
            .get(id)
            .cloned()
            .ok_or_else(|| GridError::UnknownWidget(id.to_string()))?;
        tracing::debug!(%id, %kind, breakpoint = %self.active, "gesture started");
        self.gesture = Some(Gesture {
            kind,
            id: id.to_string(),
            breakpoint: self.active,
            origin,
            before: layout.clone(),
        });
        Ok(())
    }

    fn update(&mut self, kind: GestureKind, id: &str, d1: i32, d2: i32) -> Result<(), GridError> {
        let gesture = self.active_gesture(kind, id)?;
        let cols = self.breakpoints.cols(gesture.breakpoint);
        let min = self.min_size_of(id);
        let Some(next) = apply_change(&gesture.before, id, gesture.change(d1, d2), cols, min) else {
            return Err(GridError::UnknownWidget(id.to_string()));
        };
        let bp = gesture.breakpoint;
        if self.layouts.get(bp) != &next {
            self.layouts.set(bp, next);
            self.persist();
        }
        Ok(())
    }

    fn end(&mut self, kind: GestureKind, id: &str) -> Result<(), GridError> {
        self.active_gesture(kind, id)?;
        self.gesture = None;
        tracing::debug!(%id, %kind, "gesture ended");
        self.persist();
        Ok(())
    }

    fn cancel(&mut self, kind: GestureKind, id: &str) -> Result<(), GridError> {
        self.active_gesture(kind, id)?;
        if let Some(gesture) = self.gesture.take() {
            tracing::debug!(%id, %kind, "gesture cancelled");
            self.layouts.set(gesture.breakpoint, gesture.before);
            self.persist();
        }
        Ok(())
    }

    fn change_now(&mut self, id: &str, change: Change) -> Result<(), GridError> {
        self.ensure_idle()?;
        let min = self.min_size_of(id);
        let next = apply_change(self.layouts.get(self.active), id, change, self.cols(), min)
            .ok_or_else(|| GridError::UnknownWidget(id.to_string()))?;
        self.layouts.set(self.active, next);
        self.persist();
        Ok(())
    }

    fn active_gesture(&self, kind: GestureKind, id: &str) -> Result<&Gesture, GridError> {
        match &self.gesture {
            Some(g) if g.kind != kind => Err(GridError::NoGesture(kind)),
            Some(g) if g.id != id => Err(GridError::GestureMismatch {
                kind,
                active: g.id.clone(),
                requested: id.to_string(),
            }),
            Some(g) => Ok(g),
            None => Err(GridError::NoGesture(kind)),
        }
    }

    fn ensure_idle(&self) -> Result<(), GridError> {
        match &self.gesture {
            Some(g) => Err(GridError::GestureInProgress {
                kind: g.kind,
                id: g.id.clone(),
            }),
            None => Ok(()),
        }
    }

    fn min_size_of(&self, id: &str) -> CellSize {
        self.widget(id)
            .map(|w| self.registry.min_size(w.kind))
            .unwrap_or(CellSize::new(1, 1))
    }

    fn fresh_id(&self, kind: WidgetKind) -> String {
        loop {
            let suffix = uuid::Uuid::new_v4().simple().to_string();
            let id = format!("{}-{}", kind.name(), &suffix[..8]);
            if self.widget(&id).is_none() {
                return id;
            }
        }
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.snapshot()) {
            tracing::warn!("failed to save grid: {}", e);
        }
    }
}

impl std::fmt::Debug for GridController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridController")
            .field("active", &self.active)
            .field("widgets", &self.widgets)
            .field("layouts", &self.layouts)
            .field("gesture", &self.gesture)
            .finish()
    }
}
