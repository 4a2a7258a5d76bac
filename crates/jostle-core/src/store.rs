//! Position bookkeeping shared by the solver passes.
//!
//! The store owns the current geometry of every discovered box plus the
//! interaction-scoped state: the snapshot taken when the interaction began,
//! which boxes were displaced away from it, which boxes caused each
//! displacement, and which boxes an attract cascade already pulled.

use crate::geometry::{BoxId, Position};
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// The single axis a solver step moved a box along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Something the solver did, queued for the host to apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SolverEvent {
    /// A box was pushed out of the way of another.
    Repelled { id: BoxId, axis: Axis, rect: Rect },
    /// A displaced box went back to its snapshot position.
    Reverted { id: BoxId, rect: Rect },
    /// A box was pulled toward a shrinking neighbour.
    Attracted { id: BoxId, axis: Axis, rect: Rect },
    /// `cause` overlapped `blocked` but had already displaced it in this
    /// cascade, so the push was skipped and the overlap left in place.
    CycleDetected { cause: BoxId, blocked: BoxId },
}

/// Current and interaction-scoped geometry for all boxes.
#[derive(Debug, Default, Clone)]
pub struct PositionStore {
    /// Enumeration order of the last discovery pass.
    order: Vec<BoxId>,
    positions: HashMap<BoxId, Rect>,
    initial: HashMap<BoxId, Rect>,
    moved: HashSet<BoxId>,
    causal: HashMap<BoxId, HashSet<BoxId>>,
    attracted: HashSet<BoxId>,
    /// Events not yet handed to the host.
    events: Vec<SolverEvent>,
    cycles_detected: usize,
}

impl PositionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from positions in enumeration order.
    pub fn from_positions(positions: impl IntoIterator<Item = Position>) -> Self {
        let mut store = Self::new();
        store.discover(positions);
        store
    }

    /// Replace current geometry with a fresh discovery pass.
    ///
    /// Boxes missing from the pass are forgotten; interaction state is kept.
    pub fn discover(&mut self, positions: impl IntoIterator<Item = Position>) {
        self.order.clear();
        let mut fresh = HashMap::with_capacity(self.positions.len());
        for Position { id, rect } in positions {
            log::trace!("discovered {} at {:?}", id, rect);
            if fresh.insert(id.clone(), rect).is_none() {
                self.order.push(id);
            }
        }
        self.positions = fresh;
    }

    /// Box ids in enumeration order.
    pub fn ids(&self) -> &[BoxId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &BoxId) -> bool {
        self.positions.contains_key(id)
    }

    /// Current rectangle of a box.
    pub fn rect(&self, id: &BoxId) -> Option<Rect> {
        self.positions.get(id).copied()
    }

    /// Overwrite the current rectangle of a box.
    pub fn set_rect(&mut self, id: &BoxId, rect: Rect) {
        if let Some(current) = self.positions.get_mut(id) {
            *current = rect;
        } else {
            self.order.push(id.clone());
            self.positions.insert(id.clone(), rect);
        }
    }

    /// All current positions in enumeration order.
    pub fn positions(&self) -> Vec<Position> {
        self.order
            .iter()
            .filter_map(|id| self.rect(id).map(|rect| Position::new(id.clone(), rect)))
            .collect()
    }

    // --- Interaction snapshot ---

    /// Copy every current rectangle into the snapshot, replacing it.
    pub fn snapshot_initial(&mut self) {
        self.initial = self.positions.clone();
    }

    /// Rectangle a box had when the interaction began.
    pub fn initial_rect(&self, id: &BoxId) -> Option<Rect> {
        self.initial.get(id).copied()
    }

    /// Clear snapshot, moved and causal state and take a new snapshot.
    pub fn begin_interaction(&mut self) {
        self.moved.clear();
        self.causal.clear();
        self.snapshot_initial();
    }

    // --- Moved set ---

    pub fn mark_moved(&mut self, id: &BoxId) {
        self.moved.insert(id.clone());
    }

    pub fn clear_moved_flag(&mut self, id: &BoxId) {
        self.moved.remove(id);
    }

    pub fn is_moved(&self, id: &BoxId) -> bool {
        self.moved.contains(id)
    }

    pub fn moved_count(&self) -> usize {
        self.moved.len()
    }

    // --- Causal graph ---

    /// Record that `cause` displaced `node`.
    pub fn add_cause(&mut self, node: &BoxId, cause: &BoxId) {
        self.causal
            .entry(node.clone())
            .or_default()
            .insert(cause.clone());
    }

    /// Check whether `cause` already displaced `node` in this cascade.
    pub fn has_cause(&self, node: &BoxId, cause: &BoxId) -> bool {
        self.causal
            .get(node)
            .is_some_and(|causes| causes.contains(cause))
    }

    pub fn clear_causal(&mut self) {
        self.causal.clear();
    }

    // --- Attracted set ---

    pub fn mark_attracted(&mut self, id: &BoxId) {
        self.attracted.insert(id.clone());
    }

    pub fn is_attracted(&self, id: &BoxId) -> bool {
        self.attracted.contains(id)
    }

    pub fn clear_attracted(&mut self) {
        self.attracted.clear();
    }

    // --- Outcomes ---

    pub(crate) fn push_event(&mut self, event: SolverEvent) {
        self.events.push(event);
    }

    pub(crate) fn record_cycle(&mut self, cause: &BoxId, blocked: &BoxId) {
        log::debug!("cycle: {} already displaced {}, leaving overlap", cause, blocked);
        self.cycles_detected += 1;
        self.events.push(SolverEvent::CycleDetected {
            cause: cause.clone(),
            blocked: blocked.clone(),
        });
    }

    /// Pending events, oldest first.
    pub fn events(&self) -> &[SolverEvent] {
        &self.events
    }

    /// Take all pending events.
    pub fn drain_events(&mut self) -> Vec<SolverEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of displacement cycles truncated since the store was created.
    pub fn cycles_detected(&self) -> usize {
        self.cycles_detected
    }
}
