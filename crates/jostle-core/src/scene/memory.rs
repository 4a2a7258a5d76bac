//! In-memory scene for tests and headless use.

use super::{RectUpdate, Scene, VisualState};
use crate::geometry::BoxId;
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One box held by a [`MemoryScene`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneBox {
    pub id: BoxId,
    /// Top-left corner.
    pub origin: Point,
    /// Size when expanded.
    pub expanded_size: Size,
    /// Size when collapsed.
    pub collapsed_size: Size,
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default, skip_serializing_if = "HashSet::is_empty")]
    pub tags: HashSet<VisualState>,
}

impl SceneBox {
    /// Create an expanded box. It collapses to its own size unless
    /// [`SceneBox::with_collapsed_size`] says otherwise.
    pub fn new(id: impl Into<BoxId>, rect: Rect) -> Self {
        Self {
            id: id.into(),
            origin: rect.origin(),
            expanded_size: rect.size(),
            collapsed_size: rect.size(),
            collapsed: false,
            tags: HashSet::new(),
        }
    }

    pub fn with_collapsed_size(mut self, size: Size) -> Self {
        self.collapsed_size = size;
        self
    }

    /// Current geometry.
    pub fn rect(&self) -> Rect {
        let size = if self.collapsed {
            self.collapsed_size
        } else {
            self.expanded_size
        };
        Rect::from_origin_size(self.origin, size)
    }

    pub fn has_tag(&self, state: VisualState) -> bool {
        self.tags.contains(&state)
    }
}

/// Scene whose boxes live in a plain vector, in enumeration order.
#[derive(Debug, Default, Clone)]
pub struct MemoryScene {
    boxes: Vec<SceneBox>,
    /// Number of `apply_rect` calls received.
    commits: usize,
}

impl MemoryScene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_boxes(boxes: impl IntoIterator<Item = SceneBox>) -> Self {
        Self {
            boxes: boxes.into_iter().collect(),
            commits: 0,
        }
    }

    /// Add a box at the end of the enumeration order.
    pub fn add_box(&mut self, scene_box: SceneBox) {
        self.boxes.push(scene_box);
    }

    pub fn get(&self, id: &BoxId) -> Option<&SceneBox> {
        self.boxes.iter().find(|b| &b.id == id)
    }

    fn get_mut(&mut self, id: &BoxId) -> Option<&mut SceneBox> {
        self.boxes.iter_mut().find(|b| &b.id == id)
    }

    pub fn boxes(&self) -> &[SceneBox] {
        &self.boxes
    }

    pub fn commits(&self) -> usize {
        self.commits
    }
}

impl Scene for MemoryScene {
    fn enumerate(&self) -> Vec<BoxId> {
        self.boxes.iter().map(|b| b.id.clone()).collect()
    }

    fn current_rect(&self, id: &BoxId) -> Option<Rect> {
        self.get(id).map(SceneBox::rect)
    }

    fn apply_rect(&mut self, id: &BoxId, update: RectUpdate) {
        self.commits += 1;
        if let Some(b) = self.get_mut(id) {
            b.origin = update.apply_to(b.rect()).origin();
        }
    }

    fn set_visual_state(&mut self, id: &BoxId, state: VisualState) {
        if let Some(b) = self.get_mut(id) {
            b.tags.insert(state);
        }
    }

    fn clear_visual_state(&mut self, id: &BoxId, state: VisualState) {
        if let Some(b) = self.get_mut(id) {
            b.tags.remove(&state);
        }
    }

    fn is_collapsed(&self, id: &BoxId) -> bool {
        self.get(id).is_some_and(|b| b.collapsed)
    }

    fn set_collapsed(&mut self, id: &BoxId, collapsed: bool) {
        if let Some(b) = self.get_mut(id) {
            b.collapsed = collapsed;
        }
    }
}
