//! Scene files and the interaction scripts replayed against them.

use jostle_core::{BoxId, EngineConfig, EngineResult, MemoryScene, SceneBox, Session};
use kurbo::{Rect, Size};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Default spacing between two drag notifications.
const DEFAULT_INTERVAL_MS: u64 = 16;

/// A scene plus the interactions to replay on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptFile {
    #[serde(default)]
    pub config: EngineConfig,
    pub boxes: Vec<BoxSpec>,
    #[serde(default)]
    pub script: Vec<Step>,
}

impl ScriptFile {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// A box as written in a scene file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxSpec {
    pub id: BoxId,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Collapsed size; defaults to the expanded one.
    #[serde(default)]
    pub collapsed_width: Option<f64>,
    #[serde(default)]
    pub collapsed_height: Option<f64>,
    #[serde(default)]
    pub collapsed: bool,
}

impl BoxSpec {
    fn to_scene_box(&self) -> SceneBox {
        let rect = Rect::from_origin_size((self.left, self.top), (self.width, self.height));
        let collapsed_size = Size::new(
            self.collapsed_width.unwrap_or(self.width),
            self.collapsed_height.unwrap_or(self.height),
        );
        let mut scene_box = SceneBox::new(self.id.clone(), rect).with_collapsed_size(collapsed_size);
        scene_box.collapsed = self.collapsed;
        scene_box
    }
}

/// One interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Drag(DragStep),
    Toggle(BoxId),
}

/// A drag made of incremental motion notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DragStep {
    pub id: BoxId,
    /// `[dx, dy]` per notification.
    pub moves: Vec<(f64, f64)>,
    /// Time between notifications.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

fn default_interval_ms() -> u64 {
    DEFAULT_INTERVAL_MS
}

/// Final geometry of one box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxReport {
    pub id: BoxId,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub collapsed: bool,
}

/// Outcome of replaying a script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub boxes: Vec<BoxReport>,
    /// Solver events applied over the whole script.
    pub events: usize,
    pub cycles_detected: usize,
}

/// Replay `file` on a fresh in-memory scene using `config`.
///
/// Time is simulated: notifications are spaced `interval_ms` apart and the
/// settle timer is polled at each one and once more after the drag pauses.
pub fn run_script(file: &ScriptFile, config: EngineConfig) -> EngineResult<Report> {
    let scene = MemoryScene::from_boxes(file.boxes.iter().map(BoxSpec::to_scene_box));
    let mut session = Session::new(scene, config)?;
    let mut clock = Instant::now();
    let mut events = 0;

    for (i, step) in file.script.iter().enumerate() {
        log::info!("step {}: {:?}", i, step);
        match step {
            Step::Drag(drag) => {
                let interval = Duration::from_millis(drag.interval_ms);
                session.start(&drag.id)?;
                for &(dx, dy) in &drag.moves {
                    clock += interval;
                    if let Some(applied) = session.poll(clock)? {
                        events += applied.len();
                    }
                    session.on_move(&drag.id, dx, dy, clock)?;
                }
                clock += config.settle_delay;
                if let Some(applied) = session.poll(clock)? {
                    events += applied.len();
                }
                events += session.end(&drag.id)?.len();
            }
            Step::Toggle(id) => {
                let (_, applied) = session.toggle_size(id)?;
                events += applied.len();
            }
        }
    }

    let cycles_detected = session.cycles_detected();
    let scene = session.into_scene();
    let boxes = scene
        .boxes()
        .iter()
        .map(|b| {
            let rect = b.rect();
            BoxReport {
                id: b.id.clone(),
                left: rect.x0,
                top: rect.y0,
                width: rect.width(),
                height: rect.height(),
                collapsed: b.collapsed,
            }
        })
        .collect();

    Ok(Report {
        boxes,
        events,
        cycles_detected,
    })
}
