//! Jostle Core Library
//!
//! Keeps a set of axis-aligned boxes from overlapping while one of them is
//! dragged or changes size. The solver pushes overlapping boxes aside
//! ([`repel`]), puts displaced boxes back once there is room again
//! ([`revert`]) and closes gaps left behind by a collapsing box
//! ([`attract`]). A [`Session`] sequences these for a host [`Scene`].

pub mod attract;
pub mod config;
pub mod error;
pub mod geometry;
pub mod repel;
pub mod revert;
pub mod scene;
pub mod session;
pub mod settle;
pub mod store;

pub use attract::attract;
pub use config::{DEFAULT_MARGIN, DEFAULT_SETTLE_DELAY_MS, EngineConfig};
pub use error::{EngineError, EngineResult};
pub use geometry::{BoxId, Position, intersects, intersects_any, nearest_first, overlap};
pub use repel::repel;
pub use revert::revert;
pub use scene::{MemoryScene, RectUpdate, Scene, SceneBox, VisualState};
pub use session::Session;
pub use settle::SettleTimer;
pub use store::{Axis, PositionStore, SolverEvent};
