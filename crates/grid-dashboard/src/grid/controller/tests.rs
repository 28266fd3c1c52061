use super::*;
use crate::layout::PlacementRect;
use grid_store::{MemoryStore, StoreError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

fn grid() -> (Arc<MemoryStore<GridSnapshot>>, GridController) {
    let store = Arc::new(MemoryStore::new());
    let grid = GridController::new(
        WidgetRegistry::new(),
        Breakpoints::default(),
        Box::new(store.clone()),
    );
    (store, grid)
}

fn rect_of(grid: &GridController, bp: Breakpoint, id: &str) -> (u16, u16, u16, u16) {
    let r = grid.layout(bp).get(id).expect("rect exists");
    (r.x, r.y, r.w, r.h)
}

struct FailingStore;

impl Store<GridSnapshot> for FailingStore {
    fn load(&self) -> grid_store::Result<Option<GridSnapshot>> {
        Err(StoreError::Parse("corrupt".to_string()))
    }
    fn save(&self, _: &GridSnapshot) -> grid_store::Result<()> {
        Err(StoreError::Serialize("disk full".to_string()))
    }
}

#[test]
fn test_clock_calendar_scenario() {
    let (_, mut grid) = grid();
    let clock = grid.add_widget(WidgetKind::Clock, None).expect("add clock");
    assert_eq!(rect_of(&grid, Breakpoint::Lg, &clock), (0, 0, 3, 2));

    let calendar = grid.add_widget(WidgetKind::Calendar, None).expect("add calendar");
    assert_eq!(rect_of(&grid, Breakpoint::Lg, &calendar), (3, 0, 5, 4));
    assert!(!grid.layout(Breakpoint::Lg).has_collisions());

    let before: Vec<_> = Breakpoint::ALL
        .iter()
        .map(|bp| rect_of(&grid, *bp, &calendar))
        .collect();
    grid.remove_widget(&clock).expect("remove clock");
    let after: Vec<_> = Breakpoint::ALL
        .iter()
        .map(|bp| rect_of(&grid, *bp, &calendar))
        .collect();
    assert_eq!(before, after);
    for bp in Breakpoint::ALL {
        assert!(!grid.layout(bp).contains(&clock), "clock left on {bp}");
    }
    assert!(grid.widget(&clock).is_none());
}

#[test]
fn test_add_places_on_every_breakpoint_with_capped_width() {
    let (_, mut grid) = grid();
    let clock = grid.add_widget(WidgetKind::Clock, None).expect("add");
    let calendar = grid.add_widget(WidgetKind::Calendar, None).expect("add");
    assert_eq!(rect_of(&grid, Breakpoint::Md, &calendar), (3, 0, 5, 4));
    assert_eq!(rect_of(&grid, Breakpoint::Sm, &calendar), (0, 2, 3, 4));
    assert_eq!(rect_of(&grid, Breakpoint::Xs, &clock), (0, 0, 2, 2));
    assert_eq!(rect_of(&grid, Breakpoint::Xs, &calendar), (0, 2, 2, 4));
}

#[test]
fn test_add_records_title_and_canonical_variant() {
    let (_, mut grid) = grid();
    let id = grid.add_widget(WidgetKind::Clock, Some("12")).expect("add");
    let widget = grid.widget(&id).expect("widget");
    assert_eq!(widget.title, "Clock");
    assert_eq!(widget.variant.as_deref(), Some("12h"));
    assert!(id.starts_with("clock-"));

    let cal = grid.add_widget(WidgetKind::Calendar, Some("anything")).expect("add");
    assert_eq!(grid.widget(&cal).and_then(|w| w.variant.clone()), None);
}

#[test]
fn test_add_unregistered_kind_fails() {
    let mut registry = WidgetRegistry::new();
    registry.unregister(WidgetKind::Chart);
    let mut grid = GridController::new(
        registry,
        Breakpoints::default(),
        Box::new(MemoryStore::new()),
    );
    assert!(matches!(
        grid.add_widget(WidgetKind::Chart, None),
        Err(GridError::UnregisteredKind(WidgetKind::Chart))
    ));
}

#[test]
fn test_resize_beyond_columns_is_clipped() {
    let (_, mut grid) = grid();
    let clock = grid.add_widget(WidgetKind::Clock, None).expect("add");
    grid.resize_widget(&clock, 10, 2).expect("resize");
    assert_eq!(rect_of(&grid, Breakpoint::Lg, &clock), (0, 0, 8, 2));

    grid.move_widget(&clock, 0, 0).expect("move");
    grid.resize_widget(&clock, 3, 2).expect("shrink");
    grid.move_widget(&clock, 5, 0).expect("move right");
    grid.resize_widget(&clock, 10, 2).expect("resize");
    assert_eq!(rect_of(&grid, Breakpoint::Lg, &clock), (5, 0, 3, 2));
}

#[test]
fn test_resize_below_minimum_is_raised() {
    let (_, mut grid) = grid();
    let todo = grid.add_widget(WidgetKind::Todo, None).expect("add");
    grid.resize_widget(&todo, 1, 1).expect("resize");
    assert_eq!(rect_of(&grid, Breakpoint::Lg, &todo), (0, 0, 3, 4));
}

#[test]
fn test_drag_overlap_pushes_later_widget_down_then_compacts() {
    let (_, mut grid) = grid();
    let a = grid.add_widget(WidgetKind::Clock, None).expect("add");
    let b = grid.add_widget(WidgetKind::Clock, None).expect("add");
    let c = grid.add_widget(WidgetKind::Notes, None).expect("add");
    // a (0,0) b (3,0) c (0,2) after first-fit.
    assert_eq!(rect_of(&grid, Breakpoint::Lg, &c), (0, 2, 3, 3));

    grid.begin_drag(&b).expect("begin");
    grid.update_drag(&b, -3, 0).expect("update");
    let layout = grid.layout(Breakpoint::Lg);
    assert!(!layout.has_collisions());
    assert_eq!(rect_of(&grid, Breakpoint::Lg, &b), (0, 0, 3, 2));
    assert_eq!(rect_of(&grid, Breakpoint::Lg, &a), (0, 2, 3, 2));
    assert_eq!(rect_of(&grid, Breakpoint::Lg, &c), (0, 4, 3, 3));

    grid.end_drag(&b).expect("end");
    assert!(grid.gesture().is_none());
}

#[test]
fn test_drag_update_is_cumulative_from_origin() {
    let (_, mut grid) = grid();
    let a = grid.add_widget(WidgetKind::Clock, None).expect("add");
    let b = grid.add_widget(WidgetKind::Clock, None).expect("add");

    grid.begin_drag(&b).expect("begin");
    grid.update_drag(&b, -3, 0).expect("over a");
    assert_eq!(rect_of(&grid, Breakpoint::Lg, &a), (0, 2, 3, 2));
    // Moving away again lets "a" return to where it started.
    grid.update_drag(&b, 2, 0).expect("away");
    assert_eq!(rect_of(&grid, Breakpoint::Lg, &a), (0, 0, 3, 2));
    assert_eq!(rect_of(&grid, Breakpoint::Lg, &b), (5, 0, 3, 2));
    grid.end_drag(&b).expect("end");
}

#[test]
fn test_cancel_drag_restores_exact_layout() {
    let (store, mut grid) = grid();
    let a = grid.add_widget(WidgetKind::Clock, None).expect("add");
    let b = grid.add_widget(WidgetKind::Calendar, None).expect("add");
    let before = grid.layout(Breakpoint::Lg).clone();

    grid.begin_drag(&a).expect("begin");
    grid.update_drag(&a, 4, 1).expect("update");
    assert_ne!(grid.layout(Breakpoint::Lg), &before);
    grid.cancel_drag(&a).expect("cancel");
    assert_eq!(grid.layout(Breakpoint::Lg), &before);
    assert!(grid.gesture().is_none());

    let saved = store.load().expect("load").expect("saved");
    assert_eq!(saved.layouts.get(Breakpoint::Lg), &before);
    assert!(grid.layout(Breakpoint::Lg).contains(&b));
}

#[test]
fn test_cancel_resize_restores_exact_layout() {
    let (_, mut grid) = grid();
    let a = grid.add_widget(WidgetKind::Chart, None).expect("add");
    grid.add_widget(WidgetKind::Clock, None).expect("add");
    let before = grid.layout(Breakpoint::Lg).clone();

    grid.begin_resize(&a).expect("begin");
    grid.update_resize(&a, 4, 2).expect("update");
    assert_eq!(rect_of(&grid, Breakpoint::Lg, &a), (0, 0, 8, 5));
    grid.cancel_resize(&a).expect("cancel");
    assert_eq!(grid.layout(Breakpoint::Lg), &before);
}

#[test]
fn test_gesture_misuse_is_an_error() {
    let (_, mut grid) = grid();
    let a = grid.add_widget(WidgetKind::Clock, None).expect("add");
    let b = grid.add_widget(WidgetKind::Clock, None).expect("add");

    assert!(matches!(grid.update_drag(&a, 1, 0), Err(GridError::NoGesture(GestureKind::Drag))));
    assert!(matches!(grid.begin_drag("missing"), Err(GridError::UnknownWidget(_))));

    grid.begin_drag(&a).expect("begin");
    assert!(matches!(grid.begin_drag(&b), Err(GridError::GestureInProgress { .. })));
    assert!(matches!(grid.begin_resize(&a), Err(GridError::GestureInProgress { .. })));
    assert!(matches!(grid.update_drag(&b, 1, 0), Err(GridError::GestureMismatch { .. })));
    assert!(matches!(grid.end_resize(&a), Err(GridError::NoGesture(GestureKind::Resize))));
    assert!(matches!(grid.remove_widget(&b), Err(GridError::GestureInProgress { .. })));
    assert!(matches!(grid.move_widget(&b, 0, 4), Err(GridError::GestureInProgress { .. })));
    grid.end_drag(&a).expect("end");
    grid.remove_widget(&b).expect("idle again");
}

#[test]
fn test_breakpoint_change_cancels_gesture() {
    let (_, mut grid) = grid();
    let a = grid.add_widget(WidgetKind::Clock, None).expect("add");
    grid.add_widget(WidgetKind::Clock, None).expect("add");
    let before = grid.layout(Breakpoint::Lg).clone();

    assert_eq!(grid.set_viewport_width(1400), Breakpoint::Lg);
    grid.begin_drag(&a).expect("begin");
    grid.update_drag(&a, 3, 0).expect("update");
    assert_eq!(grid.set_viewport_width(1000), Breakpoint::Md);
    assert!(grid.gesture().is_none());
    assert_eq!(grid.layout(Breakpoint::Lg), &before);
    assert!(matches!(grid.end_drag(&a), Err(GridError::NoGesture(_))));
}

#[test]
fn test_gestures_edit_only_active_breakpoint() {
    let (_, mut grid) = grid();
    let a = grid.add_widget(WidgetKind::Clock, None).expect("add");
    let md_before = grid.layout(Breakpoint::Md).clone();
    grid.set_viewport_width(1300);
    grid.move_widget(&a, 4, 0).expect("move");
    assert_eq!(rect_of(&grid, Breakpoint::Lg, &a), (4, 0, 3, 2));
    assert_eq!(grid.layout(Breakpoint::Md), &md_before);

    grid.set_viewport_width(500);
    assert_eq!(grid.active_breakpoint(), Breakpoint::Xs);
    assert_eq!(grid.cols(), 2);
    grid.move_widget(&a, 9, 0).expect("move");
    assert_eq!(rect_of(&grid, Breakpoint::Xs, &a), (0, 0, 2, 2));
}

#[test]
fn test_every_mutation_persists() {
    let (store, mut grid) = grid();
    let a = grid.add_widget(WidgetKind::Clock, None).expect("add");
    assert_eq!(store.save_count(), 1);
    grid.begin_drag(&a).expect("begin");
    assert_eq!(store.save_count(), 1);
    grid.update_drag(&a, 2, 0).expect("update");
    assert_eq!(store.save_count(), 2);
    grid.update_drag(&a, 2, 0).expect("same position");
    assert_eq!(store.save_count(), 2);
    grid.end_drag(&a).expect("end");
    assert_eq!(store.save_count(), 3);
    grid.remove_widget(&a).expect("remove");
    assert_eq!(store.save_count(), 4);
}

#[test]
fn test_save_failure_does_not_abort_gesture() {
    let mut grid = GridController::load(
        WidgetRegistry::new(),
        Breakpoints::default(),
        Box::new(FailingStore),
    );
    assert!(grid.widgets().is_empty());
    let a = grid.add_widget(WidgetKind::Clock, None).expect("add");
    grid.begin_drag(&a).expect("begin");
    grid.update_drag(&a, 2, 1).expect("update");
    grid.end_drag(&a).expect("end");
    assert_eq!(rect_of(&grid, Breakpoint::Lg, &a), (2, 0, 3, 2));
}

#[test]
fn test_snapshot_round_trip_through_store() {
    let (store, mut grid) = grid();
    let clock = grid.add_widget(WidgetKind::Clock, Some("12h")).expect("add");
    let chart = grid.add_widget(WidgetKind::Chart, Some("bar")).expect("add");
    grid.resize_widget(&chart, 5, 4).expect("resize");
    grid.set_viewport_width(800);
    grid.move_widget(&clock, 0, 6).expect("move");

    let reloaded = GridController::load(
        WidgetRegistry::new(),
        Breakpoints::default(),
        Box::new(store.clone()),
    );
    assert_eq!(reloaded.widgets(), grid.widgets());
    for bp in Breakpoint::ALL {
        assert_eq!(reloaded.layout(bp), grid.layout(bp), "layout {bp}");
    }
}

#[test]
fn test_round_trip_after_remove() {
    let (store, mut grid) = grid();
    let clock = grid.add_widget(WidgetKind::Clock, None).expect("add clock");
    grid.add_widget(WidgetKind::Calendar, None).expect("add calendar");
    let todo = grid.add_widget(WidgetKind::Todo, None).expect("add todo");
    assert_eq!(rect_of(&grid, Breakpoint::Lg, &todo), (0, 2, 3, 4));

    grid.remove_widget(&clock).expect("remove clock");
    // The gap left by the clock is kept.
    assert_eq!(rect_of(&grid, Breakpoint::Lg, &todo), (0, 2, 3, 4));
    let saved = grid.snapshot();

    let reloaded = GridController::load(
        WidgetRegistry::new(),
        Breakpoints::default(),
        Box::new(store.clone()),
    );
    assert_eq!(rect_of(&reloaded, Breakpoint::Lg, &todo), (0, 2, 3, 4));
    assert_eq!(reloaded.snapshot(), saved);
}

#[test]
fn test_load_repairs_only_invalid_layouts() {
    let (_, mut grid) = grid();
    let mut snapshot = GridSnapshot::default();
    for id in ["a", "b"] {
        snapshot.widgets.push(WidgetInstance {
            id: id.to_string(),
            kind: WidgetKind::Clock,
            title: "Clock".to_string(),
            variant: None,
        });
    }
    // lg has a gap but is otherwise valid; md overlaps.
    let lg = snapshot.layouts.get_mut(Breakpoint::Lg);
    lg.upsert(PlacementRect::new("a", 0, 4, 3, 2));
    lg.upsert(PlacementRect::new("b", 4, 0, 3, 2));
    let md = snapshot.layouts.get_mut(Breakpoint::Md);
    md.upsert(PlacementRect::new("a", 0, 0, 3, 2));
    md.upsert(PlacementRect::new("b", 1, 1, 3, 2));

    grid.restore(snapshot).expect("restore");
    assert_eq!(rect_of(&grid, Breakpoint::Lg, "a"), (0, 4, 3, 2));
    assert_eq!(rect_of(&grid, Breakpoint::Lg, "b"), (4, 0, 3, 2));
    assert!(!grid.layout(Breakpoint::Md).has_collisions());
    assert_eq!(rect_of(&grid, Breakpoint::Md, "a"), (0, 0, 3, 2));
}

#[test]
fn test_restore_repairs_snapshot() {
    let (_, mut grid) = grid();
    let mut snapshot = GridSnapshot::default();
    for (id, kind) in [("c1", WidgetKind::Clock), ("n1", WidgetKind::Notes), ("c1", WidgetKind::Chart)] {
        snapshot.widgets.push(WidgetInstance {
            id: id.to_string(),
            kind,
            title: "t".to_string(),
            variant: None,
        });
    }
    let lg = snapshot.layouts.get_mut(Breakpoint::Lg);
    lg.upsert(PlacementRect::new("c1", 6, 5, 1, 1));
    lg.upsert(PlacementRect::new("ghost", 0, 0, 4, 4));

    grid.restore(snapshot).expect("restore");
    assert_eq!(grid.widgets().len(), 2, "duplicate id dropped");
    let lg = grid.layout(Breakpoint::Lg);
    assert!(!lg.contains("ghost"));
    // c1 is raised to its minimum size, pulled left into the grid and up.
    assert_eq!(rect_of(&grid, Breakpoint::Lg, "c1"), (5, 0, 3, 2));
    // n1 had no rectangle and is placed first-fit.
    assert_eq!(rect_of(&grid, Breakpoint::Lg, "n1"), (0, 0, 3, 3));
    for bp in Breakpoint::ALL {
        assert_eq!(grid.layout(bp).len(), 2);
        assert!(!grid.layout(bp).has_collisions());
    }
}

#[test]
fn test_restore_drops_unregistered_kinds() {
    let mut registry = WidgetRegistry::new();
    registry.unregister(WidgetKind::SystemMonitor);
    let mut grid = GridController::new(
        registry,
        Breakpoints::default(),
        Box::new(MemoryStore::new()),
    );
    let mut snapshot = GridSnapshot::default();
    snapshot.widgets.push(WidgetInstance {
        id: "m".to_string(),
        kind: WidgetKind::SystemMonitor,
        title: "System Monitor".to_string(),
        variant: None,
    });
    grid.restore(snapshot).expect("restore");
    assert!(grid.widgets().is_empty());
    assert!(grid.layout(Breakpoint::Lg).is_empty());
}

#[test]
fn test_load_corrupt_store_starts_empty() {
    let store = MemoryStore::<GridSnapshot>::with_raw("{\"widgets\": [");
    let grid = GridController::load(
        WidgetRegistry::new(),
        Breakpoints::default(),
        Box::new(store),
    );
    assert!(grid.widgets().is_empty());
}

#[test]
fn test_reset_layouts_repacks() {
    let (_, mut grid) = grid();
    let a = grid.add_widget(WidgetKind::Clock, None).expect("add");
    let b = grid.add_widget(WidgetKind::Clock, None).expect("add");
    grid.resize_widget(&a, 8, 6).expect("resize");
    grid.reset_layouts().expect("reset");
    assert_eq!(rect_of(&grid, Breakpoint::Lg, &a), (0, 0, 3, 2));
    assert_eq!(rect_of(&grid, Breakpoint::Lg, &b), (3, 0, 3, 2));
}

#[test]
fn test_rename_widget() {
    let (_, mut grid) = grid();
    let a = grid.add_widget(WidgetKind::Notes, None).expect("add");
    grid.rename_widget(&a, "Ideas").expect("rename");
    assert_eq!(grid.widget(&a).map(|w| w.title.as_str()), Some("Ideas"));
    assert!(matches!(grid.rename_widget("x", "y"), Err(GridError::UnknownWidget(_))));
}

#[test]
fn test_random_gestures_keep_invariants() {
    let mut rng = StdRng::seed_from_u64(42);
    let (_, mut grid) = grid();
    let mut ids = Vec::new();
    for kind in WidgetKind::ALL {
        ids.push(grid.add_widget(kind, None).expect("add"));
    }
    for _ in 0..300 {
        let id = ids[rng.gen_range(0..ids.len())].clone();
        let width = [1300, 1000, 800, 500][rng.gen_range(0..4)];
        grid.set_viewport_width(width);
        if rng.gen_bool(0.5) {
            grid.begin_drag(&id).expect("begin");
            grid.update_drag(&id, rng.gen_range(-10..10), rng.gen_range(-10..10))
                .expect("update");
            if rng.gen_bool(0.2) {
                grid.cancel_drag(&id).expect("cancel");
            } else {
                grid.end_drag(&id).expect("end");
            }
        } else {
            grid.begin_resize(&id).expect("begin");
            grid.update_resize(&id, rng.gen_range(-6..6), rng.gen_range(-6..6))
                .expect("update");
            grid.end_resize(&id).expect("end");
        }

        for bp in Breakpoint::ALL {
            let cols = grid.breakpoints().cols(bp);
            let layout = grid.layout(bp);
            assert!(!layout.has_collisions(), "overlap on {bp}");
            for rect in layout.iter() {
                let kind = grid.widget(&rect.id).expect("instance").kind;
                let min = effective_min(grid.registry().min_size(kind), cols);
                assert!(rect.w >= min.w && rect.h >= min.h, "{rect:?} below {min:?}");
                assert!(rect.right() <= cols, "{rect:?} outside {cols} columns");
            }
            let again = compact(layout, cols, |id| {
                grid.widget(id)
                    .map(|w| grid.registry().min_size(w.kind))
                    .unwrap_or(CellSize::new(1, 1))
            });
            assert_eq!(&again, layout, "compaction not idempotent on {bp}");
        }
    }
}
