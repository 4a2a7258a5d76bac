//! Cascading push-apart of overlapping boxes.

use crate::geometry::{BoxId, intersects, overlap};
use crate::store::{Axis, PositionStore, SolverEvent};
use kurbo::{Rect, Vec2};

/// Push every box overlapping `target` out of its way, then recurse into
/// each pushed box so the displacement cascades.
///
/// `ignore` is never moved; pass the box the user is holding. Boxes are
/// visited in enumeration order. A box that `target` already displaced in
/// this cascade is left where it is, so a cycle of boxes blocking each other
/// ends with a residual overlap instead of looping.
pub fn repel(store: &mut PositionStore, target: &BoxId, ignore: Option<&BoxId>, margin: f64) {
    let ids = store.ids().to_vec();
    for node in &ids {
        if node == target {
            continue;
        }
        // Both rects are re-read each step: deeper cascades may have moved
        // either of them.
        let (Some(target_rect), Some(node_rect)) = (store.rect(target), store.rect(node)) else {
            continue;
        };
        if !intersects(target_rect, node_rect) {
            continue;
        }
        if ignore == Some(node) {
            continue;
        }
        if store.has_cause(node, target) {
            store.record_cycle(target, node);
            continue;
        }
        store.add_cause(node, target);

        let (axis, offset) = displacement(target_rect, node_rect, margin);
        let rect = node_rect + offset;
        log::debug!("repel: {} pushes {} by {:?}", target, node, offset);

        store.set_rect(node, rect);
        store.mark_moved(node);
        store.push_event(SolverEvent::Repelled {
            id: node.clone(),
            axis,
            rect,
        });

        repel(store, node, ignore, margin);
    }
}

/// Smallest single-axis offset that separates `node` from `target` by
/// `margin`, pointing away from the target's center.
///
/// The axis with less overlap wins; ties go to the vertical axis.
fn displacement(target: Rect, node: Rect, margin: f64) -> (Axis, Vec2) {
    let extent = overlap(target, node);
    let (tc, nc) = (target.center(), node.center());
    let x_sign = if nc.x > tc.x { 1.0 } else { -1.0 };
    let y_sign = if nc.y > tc.y { 1.0 } else { -1.0 };

    if extent.x.abs() < extent.y.abs() {
        let dx = x_sign * (extent.x.abs().ceil() + margin);
        (Axis::Horizontal, Vec2::new(dx, 0.0))
    } else {
        let dy = y_sign * (extent.y.abs().ceil() + margin);
        (Axis::Vertical, Vec2::new(0.0, dy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Position;

    const MARGIN: f64 = 20.0;

    fn id(s: &str) -> BoxId {
        BoxId::from(s)
    }

    #[test]
    fn test_repel_clears_the_mover() {
        let mut store = PositionStore::from_positions([
            Position::new("a", Rect::new(0.0, 0.0, 100.0, 50.0)),
            Position::new("b", Rect::new(90.0, 0.0, 190.0, 50.0)),
        ]);
        repel(&mut store, &id("a"), None, MARGIN);

        let a = store.rect(&id("a")).unwrap();
        let b = store.rect(&id("b")).unwrap();
        assert_eq!(a, Rect::new(0.0, 0.0, 100.0, 50.0));
        assert!(b.x0 >= a.x1 + MARGIN);
        assert_eq!(b.x0, 120.0);
        assert_eq!(b.width(), 100.0);
        assert!(!intersects(a, b));
        assert!(store.is_moved(&id("b")));
        assert!(!store.is_moved(&id("a")));
    }

    #[test]
    fn test_repel_picks_axis_with_smaller_overlap() {
        let mut store = PositionStore::from_positions([
            Position::new("a", Rect::new(0.0, 0.0, 100.0, 100.0)),
            Position::new("b", Rect::new(10.0, 90.0, 90.0, 150.0)),
        ]);
        repel(&mut store, &id("a"), None, MARGIN);

        assert_eq!(store.rect(&id("b")), Some(Rect::new(10.0, 120.0, 90.0, 180.0)));
        assert_eq!(
            store.events(),
            &[SolverEvent::Repelled {
                id: id("b"),
                axis: Axis::Vertical,
                rect: Rect::new(10.0, 120.0, 90.0, 180.0),
            }]
        );
    }

    #[test]
    fn test_repel_pushes_away_from_target_center() {
        let mut store = PositionStore::from_positions([
            Position::new("a", Rect::new(100.0, 0.0, 200.0, 50.0)),
            Position::new("b", Rect::new(20.0, 0.0, 110.0, 50.0)),
        ]);
        repel(&mut store, &id("a"), None, MARGIN);
        // 10 of overlap plus the margin, to the left.
        assert_eq!(store.rect(&id("b")), Some(Rect::new(-10.0, 0.0, 80.0, 50.0)));
    }

    #[test]
    fn test_repel_rounds_fractional_overlap_outward() {
        let mut store = PositionStore::from_positions([
            Position::new("a", Rect::new(0.0, 0.0, 100.0, 50.0)),
            Position::new("b", Rect::new(99.5, 0.0, 199.5, 50.0)),
            Position::new("c", Rect::new(-99.5, 0.0, 0.5, 50.0)),
        ]);
        repel(&mut store, &id("a"), None, MARGIN);
        assert_eq!(store.rect(&id("b")).unwrap().x0, 120.5);
        assert_eq!(store.rect(&id("c")).unwrap().x1, -20.5);
    }

    #[test]
    fn test_repel_touching_edges_separate_by_margin() {
        let mut store = PositionStore::from_positions([
            Position::new("a", Rect::new(0.0, 0.0, 100.0, 50.0)),
            Position::new("b", Rect::new(100.0, 0.0, 200.0, 50.0)),
        ]);
        repel(&mut store, &id("a"), None, MARGIN);
        assert_eq!(store.rect(&id("b")), Some(Rect::new(120.0, 0.0, 220.0, 50.0)));
    }

    #[test]
    fn test_repel_never_moves_ignored_box() {
        let mut store = PositionStore::from_positions([
            Position::new("a", Rect::new(0.0, 0.0, 100.0, 50.0)),
            Position::new("held", Rect::new(90.0, 0.0, 190.0, 50.0)),
        ]);
        repel(&mut store, &id("a"), Some(&id("held")), MARGIN);
        assert_eq!(store.rect(&id("held")), Some(Rect::new(90.0, 0.0, 190.0, 50.0)));
        assert!(store.events().is_empty());
    }

    #[test]
    fn test_repel_cascades_through_chain() {
        let mut store = PositionStore::from_positions([
            Position::new("a", Rect::new(0.0, 0.0, 100.0, 50.0)),
            Position::new("b", Rect::new(90.0, 0.0, 190.0, 50.0)),
            Position::new("c", Rect::new(200.0, 0.0, 300.0, 50.0)),
        ]);
        repel(&mut store, &id("a"), None, MARGIN);

        // b lands at 120..220 and overlaps c by 20, which moves 40 right.
        assert_eq!(store.rect(&id("b")), Some(Rect::new(120.0, 0.0, 220.0, 50.0)));
        assert_eq!(store.rect(&id("c")), Some(Rect::new(240.0, 0.0, 340.0, 50.0)));
        assert!(store.has_cause(&id("c"), &id("b")));
        assert!(store.is_moved(&id("c")));
    }

    #[test]
    fn test_repel_cycle_terminates_with_single_overlap() {
        let mut store = PositionStore::from_positions([
            Position::new("a", Rect::new(0.0, 0.0, 100.0, 50.0)),
            Position::new("b", Rect::new(90.0, 0.0, 190.0, 50.0)),
        ]);
        // a already displaced b earlier in this cascade.
        store.add_cause(&id("b"), &id("a"));
        repel(&mut store, &id("a"), None, MARGIN);

        let a = store.rect(&id("a")).unwrap();
        let b = store.rect(&id("b")).unwrap();
        assert!(intersects(a, b));
        assert_eq!(store.cycles_detected(), 1);
        assert_eq!(
            store.drain_events(),
            vec![SolverEvent::CycleDetected {
                cause: id("a"),
                blocked: id("b")
            }]
        );
    }

    #[test]
    fn test_repel_terminates_on_stacked_pile() {
        let rect = Rect::new(0.0, 0.0, 50.0, 50.0);
        let mut store = PositionStore::from_positions(
            (0..8).map(|i| Position::new(format!("box{i}"), rect)),
        );
        repel(&mut store, &id("box0"), None, MARGIN);

        // Every ordered pair pushes at most once.
        let pushes = store
            .events()
            .iter()
            .filter(|e| matches!(e, SolverEvent::Repelled { .. }))
            .count();
        assert!(pushes <= 8 * 7);
        assert_eq!(store.rect(&id("box0")), Some(rect));
        assert!(store.moved_count() >= 7);
    }

    #[test]
    fn test_repel_leaves_disjoint_boxes_alone() {
        let mut store = PositionStore::from_positions([
            Position::new("a", Rect::new(0.0, 0.0, 100.0, 50.0)),
            Position::new("b", Rect::new(0.0, 60.0, 100.0, 110.0)),
        ]);
        repel(&mut store, &id("a"), None, MARGIN);
        assert!(store.events().is_empty());
        assert!(!store.is_moved(&id("b")));
    }
}
