//! Restoring displaced boxes once there is room for them again.

use crate::geometry::{BoxId, Position, intersects, intersects_any, nearest_first};
use crate::store::{PositionStore, SolverEvent};

/// Move boxes displaced during this interaction back to their snapshot
/// position where that no longer collides with anything.
///
/// Boxes closest to `target` are considered first, so a restored box is
/// already in place when farther boxes check for room.
pub fn revert(store: &mut PositionStore, target: &BoxId) {
    let Some(target_rect) = store.rect(target) else {
        return;
    };
    let candidates = nearest_first(target_rect, store.positions());

    for Position { id: node, .. } in candidates {
        if &node == target || !store.is_moved(&node) {
            continue;
        }
        let Some(initial) = store.initial_rect(&node) else {
            log::debug!("revert: {} has no snapshot, leaving it", node);
            continue;
        };
        if intersects(initial, target_rect) {
            continue;
        }

        let restored = Position::new(node.clone(), initial);
        if intersects_any(&restored, &store.positions()) {
            continue;
        }

        log::debug!("revert: {} back to {:?}", node, initial);
        store.set_rect(&node, initial);
        store.clear_moved_flag(&node);
        store.push_event(SolverEvent::Reverted {
            id: node,
            rect: initial,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repel::repel;
    use kurbo::Rect;

    fn id(s: &str) -> BoxId {
        BoxId::from(s)
    }

    /// `a` dragged onto `b`, which was repelled, then `a` dragged back.
    fn dragged_back() -> PositionStore {
        let mut store = PositionStore::from_positions([
            Position::new("a", Rect::new(0.0, 0.0, 100.0, 50.0)),
            Position::new("b", Rect::new(110.0, 0.0, 210.0, 50.0)),
        ]);
        store.begin_interaction();
        store.set_rect(&id("a"), Rect::new(30.0, 0.0, 130.0, 50.0));
        repel(&mut store, &id("a"), Some(&id("a")), 20.0);
        assert_eq!(store.rect(&id("b")), Some(Rect::new(150.0, 0.0, 250.0, 50.0)));
        store.set_rect(&id("a"), Rect::new(0.0, 0.0, 100.0, 50.0));
        store.drain_events();
        store
    }

    #[test]
    fn test_revert_restores_when_room() {
        let mut store = dragged_back();
        revert(&mut store, &id("a"));
        assert_eq!(store.rect(&id("b")), Some(Rect::new(110.0, 0.0, 210.0, 50.0)));
        assert!(!store.is_moved(&id("b")));
        assert_eq!(
            store.drain_events(),
            vec![SolverEvent::Reverted {
                id: id("b"),
                rect: Rect::new(110.0, 0.0, 210.0, 50.0)
            }]
        );
    }

    #[test]
    fn test_revert_twice_is_noop() {
        let mut store = dragged_back();
        revert(&mut store, &id("a"));
        let after_first = store.positions();
        store.drain_events();

        revert(&mut store, &id("a"));
        assert_eq!(store.positions(), after_first);
        assert!(store.events().is_empty());
    }

    #[test]
    fn test_revert_blocked_by_target() {
        let mut store = dragged_back();
        // a still covers b's initial spot.
        store.set_rect(&id("a"), Rect::new(60.0, 0.0, 140.0, 50.0));
        revert(&mut store, &id("a"));
        assert_eq!(store.rect(&id("b")), Some(Rect::new(150.0, 0.0, 250.0, 50.0)));
        assert!(store.is_moved(&id("b")));
    }

    #[test]
    fn test_revert_respects_third_box() {
        let mut store = dragged_back();
        store.set_rect(&id("c"), Rect::new(180.0, 40.0, 260.0, 90.0));
        revert(&mut store, &id("a"));
        assert_eq!(store.rect(&id("b")), Some(Rect::new(150.0, 0.0, 250.0, 50.0)));
        assert!(store.is_moved(&id("b")));
    }

    #[test]
    fn test_revert_ignores_unmoved_boxes() {
        let mut store = PositionStore::from_positions([
            Position::new("a", Rect::new(0.0, 0.0, 100.0, 50.0)),
            Position::new("b", Rect::new(110.0, 0.0, 210.0, 50.0)),
        ]);
        store.begin_interaction();
        store.set_rect(&id("b"), Rect::new(400.0, 0.0, 500.0, 50.0));
        revert(&mut store, &id("a"));
        assert_eq!(store.rect(&id("b")), Some(Rect::new(400.0, 0.0, 500.0, 50.0)));
    }

    #[test]
    fn test_revert_nearest_first_frees_room_for_farther() {
        // b and c were both pushed; b returning first is what lets c fit.
        let mut store = PositionStore::from_positions([
            Position::new("a", Rect::new(0.0, 0.0, 100.0, 50.0)),
            Position::new("c", Rect::new(300.0, 0.0, 400.0, 50.0)),
            Position::new("b", Rect::new(150.0, 0.0, 250.0, 50.0)),
        ]);
        store.begin_interaction();
        store.set_rect(&id("b"), Rect::new(260.0, 0.0, 360.0, 50.0));
        store.set_rect(&id("c"), Rect::new(420.0, 0.0, 520.0, 50.0));
        store.mark_moved(&id("b"));
        store.mark_moved(&id("c"));

        revert(&mut store, &id("a"));
        assert_eq!(store.rect(&id("b")), Some(Rect::new(150.0, 0.0, 250.0, 50.0)));
        assert_eq!(store.rect(&id("c")), Some(Rect::new(300.0, 0.0, 400.0, 50.0)));
        assert_eq!(store.moved_count(), 0);
    }
}
