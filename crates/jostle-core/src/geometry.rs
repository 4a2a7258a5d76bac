//! Rectangle tests and proximity ordering shared by the solver passes.

use kurbo::{Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable, caller-supplied identifier of a box.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoxId(pub String);

impl BoxId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BoxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BoxId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for BoxId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Geometry of one box at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: BoxId,
    pub rect: Rect,
}

impl Position {
    pub fn new(id: impl Into<BoxId>, rect: Rect) -> Self {
        Self { id: id.into(), rect }
    }
}

/// Check whether two rectangles intersect.
///
/// Rectangles that only share an edge count as intersecting.
pub fn intersects(a: Rect, b: Rect) -> bool {
    if a.x0 > b.x1 || b.x0 > a.x1 {
        return false;
    }
    if a.y0 > b.y1 || b.y0 > a.y1 {
        return false;
    }
    true
}

/// Check whether `candidate` intersects any position in `others` with a
/// different id. A position is never tested against itself.
pub fn intersects_any<'a>(
    candidate: &Position,
    others: impl IntoIterator<Item = &'a Position>,
) -> bool {
    others
        .into_iter()
        .filter(|other| other.id != candidate.id)
        .any(|other| intersects(candidate.rect, other.rect))
}

/// Order `positions` by the distance between their centers and the center
/// of `reference`, closest first. Equal distances keep their input order.
pub fn nearest_first(reference: Rect, mut positions: Vec<Position>) -> Vec<Position> {
    let center = reference.center();
    positions.sort_by(|a, b| {
        let da = a.rect.center().distance(center);
        let db = b.rect.center().distance(center);
        da.total_cmp(&db)
    });
    positions
}

/// Extent of the overlap of `a` and `b` on each axis.
///
/// Components are negative when the rectangles are apart on that axis.
pub fn overlap(a: Rect, b: Rect) -> Vec2 {
    Vec2::new(
        a.x1.min(b.x1) - a.x0.max(b.x0),
        a.y1.min(b.y1) - a.y0.max(b.y0),
    )
}
