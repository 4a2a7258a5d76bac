//! Interaction sequencing between a host [`Scene`] and the solver.
//!
//! A drag is `start`, any number of `on_move` (or `before_move`) calls with
//! `poll` driving the debounced `settle`, then `end`. A collapse or expand is
//! a single `toggle_size`. Every solver run ends by committing the moved
//! boxes back to the scene.

use crate::attract::attract;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::geometry::{BoxId, Position};
use crate::repel::repel;
use crate::revert::revert;
use crate::scene::{RectUpdate, Scene, VisualState};
use crate::settle::SettleTimer;
use crate::store::{Axis, PositionStore, SolverEvent};
use kurbo::{Rect, Vec2};

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

#[cfg(target_arch = "wasm32")]
use web_time::Instant;

/// One logical layout session over a scene.
#[derive(Debug)]
pub struct Session<S: Scene> {
    scene: S,
    store: PositionStore,
    config: EngineConfig,
    timer: SettleTimer,
}

impl<S: Scene> Session<S> {
    /// Create a session and run the first discovery pass.
    pub fn new(scene: S, config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        let mut session = Self {
            scene,
            store: PositionStore::new(),
            config,
            timer: SettleTimer::new(config.settle_delay),
        };
        session.discover()?;
        Ok(session)
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn into_scene(self) -> S {
        self.scene
    }

    pub fn store(&self) -> &PositionStore {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Tracked rectangle of a box.
    pub fn rect(&self, id: &BoxId) -> Option<Rect> {
        self.store.rect(id)
    }

    /// Tracked positions in scene order.
    pub fn positions(&self) -> Vec<Position> {
        self.store.positions()
    }

    pub fn cycles_detected(&self) -> usize {
        self.store.cycles_detected()
    }

    pub fn settle_pending(&self) -> bool {
        self.timer.is_pending()
    }

    /// Re-read every box's geometry from the scene.
    ///
    /// Fails if the scene lists a box it cannot measure.
    pub fn discover(&mut self) -> EngineResult<()> {
        let mut positions = Vec::new();
        for id in self.scene.enumerate() {
            let rect = self
                .scene
                .current_rect(&id)
                .ok_or_else(|| EngineError::UnknownBox(id.clone()))?;
            positions.push(Position::new(id, rect));
        }
        self.store.discover(positions);
        Ok(())
    }

    fn require(&self, id: &BoxId) -> EngineResult<()> {
        if self.store.contains(id) {
            Ok(())
        } else {
            Err(EngineError::UnknownBox(id.clone()))
        }
    }

    // --- Drag ---

    /// Begin dragging `id`: snapshot the layout and reset interaction state.
    pub fn start(&mut self, id: &BoxId) -> EngineResult<()> {
        self.discover()?;
        self.require(id)?;
        log::info!("drag start: {}", id);

        self.timer.cancel();
        self.store.begin_interaction();
        self.scene.clear_visual_state(id, VisualState::Repelling);
        self.scene.set_visual_state(id, VisualState::Dragging);
        Ok(())
    }

    /// Translate the dragged box right away. Neighbours are left alone
    /// until the next settle.
    pub fn before_move(&mut self, id: &BoxId, dx: f64, dy: f64) -> EngineResult<()> {
        let Some(rect) = self.store.rect(id) else {
            return Err(EngineError::UnknownBox(id.clone()));
        };
        let rect = rect + Vec2::new(dx, dy);
        self.store.set_rect(id, rect);
        self.scene.apply_rect(id, RectUpdate::origin(rect));
        self.store.clear_causal();
        Ok(())
    }

    /// A drag notification: move the box and re-arm the settle timer.
    pub fn on_move(&mut self, id: &BoxId, dx: f64, dy: f64, now: Instant) -> EngineResult<()> {
        self.before_move(id, dx, dy)?;
        self.timer.arm(id, now);
        Ok(())
    }

    /// Run the pending settle if motion has paused long enough.
    ///
    /// Returns the events applied, or `None` if nothing was due.
    pub fn poll(&mut self, now: Instant) -> EngineResult<Option<Vec<SolverEvent>>> {
        match self.timer.take_due(now) {
            Some(id) => self.settle(&id).map(Some),
            None => Ok(None),
        }
    }

    /// Resolve neighbours of the dragged box: restore what fits, then push
    /// aside what still overlaps. The dragged box itself is never moved.
    pub fn settle(&mut self, id: &BoxId) -> EngineResult<Vec<SolverEvent>> {
        self.require(id)?;
        log::debug!("settle: {}", id);
        self.store.clear_causal();
        revert(&mut self.store, id);
        repel(&mut self.store, id, Some(id), self.config.margin);
        Ok(self.flush())
    }

    /// Finish the drag. The released box may now be pushed by the cascade
    /// it starts.
    pub fn end(&mut self, id: &BoxId) -> EngineResult<Vec<SolverEvent>> {
        self.require(id)?;
        log::info!("drag end: {}", id);
        self.timer.cancel();
        repel(&mut self.store, id, None, self.config.margin);
        let events = self.flush();
        self.scene.clear_visual_state(id, VisualState::Dragging);
        Ok(events)
    }

    // --- Size ---

    /// Collapse an expanded box or expand a collapsed one.
    ///
    /// Collapsing pulls neighbours into the freed space; expanding pushes
    /// aside whatever the regrown box now covers. Returns the box's new
    /// collapsed state and the events applied.
    pub fn toggle_size(&mut self, id: &BoxId) -> EngineResult<(bool, Vec<SolverEvent>)> {
        self.require(id)?;
        self.timer.cancel();
        self.store.clear_attracted();
        self.store.clear_causal();

        if self.scene.is_collapsed(id) {
            log::info!("expand: {}", id);
            self.store.snapshot_initial();
            self.scene.set_visual_state(id, VisualState::Expanding);
            self.scene.set_collapsed(id, false);
            self.discover()?;

            repel(&mut self.store, id, None, self.config.margin);
            let events = self.flush();
            self.scene.clear_visual_state(id, VisualState::Expanding);
            Ok((false, events))
        } else {
            log::info!("collapse: {}", id);
            let before = self.measured(id)?;
            self.scene.set_collapsed(id, true);
            self.discover()?;
            let after = self.measured(id)?;

            let delta = Vec2::new(after.width() - before.width(), after.height() - before.height());
            attract(&mut self.store, id, delta, None, self.config.margin);
            let events = self.flush();
            self.discover()?;
            Ok((true, events))
        }
    }

    fn measured(&self, id: &BoxId) -> EngineResult<Rect> {
        self.store
            .rect(id)
            .ok_or_else(|| EngineError::UnknownBox(id.clone()))
    }

    /// Commit queued solver events to the scene.
    fn flush(&mut self) -> Vec<SolverEvent> {
        let events = self.store.drain_events();
        for event in &events {
            match event {
                SolverEvent::Repelled { id, axis, rect } => {
                    self.scene.apply_rect(id, axis_update(*axis, *rect));
                    self.scene.set_visual_state(id, VisualState::Repelling);
                }
                SolverEvent::Reverted { id, rect } => {
                    self.scene.apply_rect(id, RectUpdate::origin(*rect));
                    self.scene.set_visual_state(id, VisualState::Repelling);
                }
                SolverEvent::Attracted { id, axis, rect } => {
                    self.scene.apply_rect(id, axis_update(*axis, *rect));
                }
                SolverEvent::CycleDetected { .. } => {}
            }
        }
        events
    }
}

fn axis_update(axis: Axis, rect: Rect) -> RectUpdate {
    match axis {
        Axis::Horizontal => RectUpdate::left(rect.x0),
        Axis::Vertical => RectUpdate::top(rect.y0),
    }
}
