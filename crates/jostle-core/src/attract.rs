//! Closing the gap left behind by a shrinking box.

use crate::geometry::{BoxId, Position, intersects_any, nearest_first};
use crate::store::{Axis, PositionStore, SolverEvent};
use kurbo::{Rect, Vec2};

/// Pull neighbours of `target` inward after it shrank by `delta`
/// (negative components for a size reduction), cascading outward.
///
/// A box to the right of `target` whose gap to the pre-shrink edge is
/// within `2 * margin` and whose vertical span overlaps it moves left by
/// `delta.x`; boxes below are pulled up by `delta.y` the same way. A pull
/// is only applied when the moved box collides with nothing. Each box is
/// pulled at most once per cascade and `ignore` is never pulled.
pub fn attract(
    store: &mut PositionStore,
    target: &BoxId,
    delta: Vec2,
    ignore: Option<&BoxId>,
    margin: f64,
) {
    if ignore == Some(target) {
        return;
    }
    let Some(target_rect) = store.rect(target) else {
        return;
    };
    let band = 0.0..=margin * 2.0;
    // The origin of a cascade is never pulled by its own cascade.
    let next_ignore = ignore.unwrap_or(target).clone();

    for Position { id: node, .. } in nearest_first(target_rect, store.positions()) {
        if &node == target || ignore == Some(&node) || store.is_attracted(&node) {
            continue;
        }

        if delta.x != 0.0 {
            if let Some(rect) = store.rect(&node) {
                let gap = rect.x0 - target_rect.x1 + delta.x;
                if band.contains(&gap)
                    && spans_overlap(rect.y0, rect.y1, target_rect.y0, target_rect.y1)
                    && pull(store, &node, rect, Vec2::new(delta.x, 0.0), Axis::Horizontal)
                {
                    attract(store, &node, delta, Some(&next_ignore), margin);
                }
            }
        }

        if delta.y != 0.0 {
            if let Some(rect) = store.rect(&node) {
                let gap = rect.y0 - target_rect.y1 + delta.y;
                if band.contains(&gap)
                    && spans_overlap(rect.x0, rect.x1, target_rect.x0, target_rect.x1)
                    && pull(store, &node, rect, Vec2::new(0.0, delta.y), Axis::Vertical)
                {
                    attract(store, &node, delta, Some(&next_ignore), margin);
                }
            }
        }
    }
}

fn spans_overlap(a0: f64, a1: f64, b0: f64, b1: f64) -> bool {
    a0 < b1 && a1 > b0
}

/// Move `node` by `offset` unless that lands it on another box.
fn pull(store: &mut PositionStore, node: &BoxId, rect: Rect, offset: Vec2, axis: Axis) -> bool {
    let candidate = Position::new(node.clone(), rect + offset);
    if intersects_any(&candidate, &store.positions()) {
        log::debug!("attract: {} blocked along {:?}", node, axis);
        return false;
    }
    log::debug!("attract: {} pulled by {:?}", node, offset);
    store.set_rect(node, candidate.rect);
    store.mark_attracted(node);
    store.push_event(SolverEvent::Attracted {
        id: node.clone(),
        axis,
        rect: candidate.rect,
    });
    true
}
