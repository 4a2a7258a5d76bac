//! Debouncing of drag motion into a single settle.
//!
//! Drag notifications arrive far more often than the neighbour solve needs
//! to run. Each notification re-arms the timer; the settle fires once the
//! motion has paused for the configured delay.

use crate::geometry::BoxId;

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// A single pending settle, replaced by each new notification.
#[derive(Debug, Clone)]
pub struct SettleTimer {
    delay: Duration,
    pending: Option<(BoxId, Instant)>,
}

impl SettleTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule a settle for `id`, cancelling whatever was pending.
    pub fn arm(&mut self, id: &BoxId, now: Instant) {
        self.pending = Some((id.clone(), now + self.delay));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending settle is due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at)
    }

    /// Take the pending box if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<BoxId> {
        let due = self.pending.as_ref().is_some_and(|(_, at)| now >= *at);
        if !due {
            return None;
        }
        self.pending.take().map(|(id, _)| id)
    }
}
