//! Scripted pointer sessions against a headless scene.
//!
//! A [`ReplayScript`] describes a scene, one draggable and a list of pointer
//! events. Running it records every notification the draggable fires, which
//! makes drag behavior reproducible outside a UI:
//!
//! ```json
//! {
//!   "elements": [
//!     { "rect": { "left": 0, "top": 0, "width": 400, "height": 400 } },
//!     { "parent": 1, "rect": { "left": 0, "top": 0, "width": 50, "height": 50 } }
//!   ],
//!   "draggable": 2,
//!   "options": { "grid": 10, "limit": { "x": [0, 100] } },
//!   "events": [
//!     { "phase": "down", "x": 10, "y": 10 },
//!     { "phase": "move", "x": 33, "y": 10 },
//!     { "phase": "up", "x": 33, "y": 10 }
//!   ]
//! }
//! ```
//!
//! Elements get ids 1, 2, 3... in the order they are listed, so `parent` and
//! `draggable` refer to earlier entries by position.

use crate::draggable::Draggable;
use crate::error::{DragResult, Hook};
use crate::host::{PointerButton, PointerEvent, PointerPhase};
use crate::options::{DragEvent, DragOptions, DragSettings};
use crate::scene::Scene;
use crate::types::{ElementId, Position, Rect};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use tracing::{debug, info};

/// One element of the replay scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneElement {
    #[serde(default)]
    pub parent: Option<ElementId>,
    pub rect: Rect,
}

/// One scripted pointer event. The target is found by hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptEvent {
    pub phase: PointerPhase,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub pointer_id: u32,
    #[serde(default)]
    pub button: PointerButton,
}

impl ScriptEvent {
    pub fn to_pointer_event(&self) -> PointerEvent {
        PointerEvent::new(self.phase, Position::new(self.x, self.y))
            .with_pointer_id(self.pointer_id)
            .with_button(self.button)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplayScript {
    pub elements: Vec<SceneElement>,
    pub draggable: ElementId,
    #[serde(default)]
    pub options: DragSettings,
    pub events: Vec<ScriptEvent>,
}

/// A notification as observed during replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedNotification {
    pub hook: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayReport {
    pub notifications: Vec<RecordedNotification>,
    pub final_position: Position,
}

type Recording = Rc<RefCell<Vec<RecordedNotification>>>;

fn recorder(hook: Hook, log: &Recording) -> impl Fn(&DragEvent) -> anyhow::Result<()> + 'static {
    let log = log.clone();
    move |event: &DragEvent| {
        log.borrow_mut().push(RecordedNotification {
            hook: hook.name().to_string(),
            x: event.x(),
            y: event.y(),
        });
        Ok(())
    }
}

impl ReplayScript {
    pub fn from_json(json: &str) -> DragResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> DragResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Build the scene, attach the draggable, and feed every event.
    pub fn run(&self) -> DragResult<ReplayReport> {
        let scene = Scene::new();
        for element in &self.elements {
            scene.insert(element.parent, element.rect);
        }

        let log: Recording = Rc::default();
        let options = DragOptions::from(self.options.clone())
            .on_drag_start(recorder(Hook::DragStart, &log))
            .on_drag(recorder(Hook::Drag, &log))
            .on_drag_end(recorder(Hook::DragEnd, &log));

        let mut draggable = Draggable::new(scene.clone(), self.draggable, options)?;
        info!(
            elements = self.elements.len(),
            events = self.events.len(),
            draggable = %self.draggable,
            "Replaying script"
        );

        for event in &self.events {
            scene.dispatch(event.to_pointer_event())?;
        }

        let final_position = draggable.get();
        draggable.destroy();

        let notifications = std::mem::take(&mut *log.borrow_mut());
        debug!(notifications = notifications.len(), %final_position, "Replay finished");
        Ok(ReplayReport {
            notifications,
            final_position,
        })
    }
}
