//! Host abstraction: where box geometry comes from and goes back to.

mod memory;

pub use memory::{MemoryScene, SceneBox};

use crate::geometry::BoxId;
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// Advisory feedback tags a host may render. They never affect solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualState {
    /// The user is holding this box.
    Dragging,
    /// The solver moved this box.
    Repelling,
    /// The box is growing back from its collapsed size.
    Expanding,
}

impl VisualState {
    /// Tag name as a host would spell it.
    pub fn as_str(self) -> &'static str {
        match self {
            VisualState::Dragging => "dragging",
            VisualState::Repelling => "repelling",
            VisualState::Expanding => "expanding",
        }
    }
}

/// A partial position update. Only the axes that changed are set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
}

impl RectUpdate {
    pub fn left(left: f64) -> Self {
        Self {
            left: Some(left),
            top: None,
        }
    }

    pub fn top(top: f64) -> Self {
        Self {
            left: None,
            top: Some(top),
        }
    }

    pub fn origin(rect: Rect) -> Self {
        Self {
            left: Some(rect.x0),
            top: Some(rect.y0),
        }
    }

    /// Apply this update to `rect`, keeping its size.
    pub fn apply_to(&self, rect: Rect) -> Rect {
        let left = self.left.unwrap_or(rect.x0);
        let top = self.top.unwrap_or(rect.y0);
        Rect::from_origin_size((left, top), rect.size())
    }
}

/// The host surface owning the boxes.
///
/// The host owns each box's existence and intrinsic size; the engine only
/// reads geometry during discovery and commits positions back.
pub trait Scene {
    /// All participating boxes, in a stable order.
    fn enumerate(&self) -> Vec<BoxId>;

    /// Authoritative current geometry of a box.
    fn current_rect(&self, id: &BoxId) -> Option<Rect>;

    /// Commit a new position for a box.
    fn apply_rect(&mut self, id: &BoxId, update: RectUpdate);

    fn set_visual_state(&mut self, id: &BoxId, state: VisualState);

    fn clear_visual_state(&mut self, id: &BoxId, state: VisualState);

    fn is_collapsed(&self, id: &BoxId) -> bool;

    /// Collapse or expand a box. The host decides the resulting size.
    fn set_collapsed(&mut self, id: &BoxId, collapsed: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_update_keeps_size() {
        let rect = Rect::new(10.0, 20.0, 110.0, 70.0);
        assert_eq!(
            RectUpdate::left(50.0).apply_to(rect),
            Rect::new(50.0, 20.0, 150.0, 70.0)
        );
        assert_eq!(
            RectUpdate::top(0.0).apply_to(rect),
            Rect::new(10.0, 0.0, 110.0, 50.0)
        );
        assert_eq!(RectUpdate::default().apply_to(rect), rect);
    }

    #[test]
    fn test_visual_state_tags() {
        assert_eq!(VisualState::Repelling.as_str(), "repelling");
        assert_eq!(
            serde_json::to_string(&VisualState::Expanding).unwrap(),
            "\"expanding\""
        );
    }
}
