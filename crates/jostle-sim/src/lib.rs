//! Jostle Simulator
//!
//! Replays scripted drags and collapse toggles against an in-memory scene
//! so layouts can be checked without a rendering host.

mod script;

pub use script::{BoxReport, BoxSpec, DragStep, Report, ScriptFile, Step, run_script};
