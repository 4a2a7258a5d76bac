//! Engine tunables.

use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default gap left between two boxes after a repel, in layout units.
pub const DEFAULT_MARGIN: f64 = 20.0;

/// Default pause in motion before a settle runs, in milliseconds.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 100;

/// Configuration fixed at session construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Minimum gap between two boxes separated by a repel.
    /// Attract considers neighbours up to twice this far away.
    #[serde(default = "default_margin")]
    pub margin: f64,
    /// Debounce window for drag motion.
    #[serde(
        rename = "settle_delay_ms",
        with = "duration_ms",
        default = "default_settle_delay"
    )]
    pub settle_delay: Duration,
}

fn default_margin() -> f64 {
    DEFAULT_MARGIN
}

fn default_settle_delay() -> Duration {
    Duration::from_millis(DEFAULT_SETTLE_DELAY_MS)
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            settle_delay: default_settle_delay(),
        }
    }
}

impl EngineConfig {
    /// Create a validated configuration.
    pub fn new(margin: f64, settle_delay: Duration) -> EngineResult<Self> {
        let config = Self {
            margin,
            settle_delay,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the margin is a finite, non-negative length.
    pub fn validate(&self) -> EngineResult<()> {
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "margin must be a finite, non-negative length, got {}",
                self.margin
            )));
        }
        Ok(())
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub(super) fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
