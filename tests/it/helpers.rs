//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestSceneBuilder` - Builder for a scene with a container and a card
//! - `Recorder` - Captures notifications in firing order
//! - `drag_card()` - Attach a draggable to the card of a fresh scene

#![allow(dead_code)]

use draggable::error::Hook;
use draggable::{DragEvent, DragOptions, Draggable, ElementId, Position, Rect, Scene};
use std::cell::RefCell;
use std::rc::Rc;

// ============================================================================
// TestSceneBuilder
// ============================================================================

/// A scene with a 400x400 container at the origin holding a 50x50 card.
pub struct TestScene {
    pub scene: Scene,
    pub container: ElementId,
    pub card: ElementId,
}

pub struct TestSceneBuilder {
    container: Rect,
    card: Rect,
}

impl Default for TestSceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSceneBuilder {
    pub fn new() -> Self {
        Self {
            container: Rect::new(0.0, 0.0, 400.0, 400.0),
            card: Rect::new(0.0, 0.0, 50.0, 50.0),
        }
    }

    pub fn with_container(mut self, left: f64, top: f64, width: f64, height: f64) -> Self {
        self.container = Rect::new(left, top, width, height);
        self
    }

    pub fn with_card(mut self, left: f64, top: f64, width: f64, height: f64) -> Self {
        self.card = Rect::new(left, top, width, height);
        self
    }

    pub fn build(self) -> TestScene {
        let scene = Scene::new();
        let container = scene.insert(None, self.container);
        let card = scene.insert(Some(container), self.card);
        TestScene {
            scene,
            container,
            card,
        }
    }
}

// ============================================================================
// Recorder
// ============================================================================

/// One observed notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seen {
    pub hook: Hook,
    pub position: Position,
}

/// Collects notifications from all three hooks.
#[derive(Clone, Default)]
pub struct Recorder(Rc<RefCell<Vec<Seen>>>);

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    fn hook(&self, hook: Hook) -> impl Fn(&DragEvent) -> anyhow::Result<()> + 'static {
        let log = self.0.clone();
        move |event: &DragEvent| {
            log.borrow_mut().push(Seen {
                hook,
                position: event.position,
            });
            Ok(())
        }
    }

    /// Install the recorder on every hook of `options`.
    pub fn attach(&self, options: DragOptions) -> DragOptions {
        options
            .on_drag_start(self.hook(Hook::DragStart))
            .on_drag(self.hook(Hook::Drag))
            .on_drag_end(self.hook(Hook::DragEnd))
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.0.borrow().clone()
    }

    pub fn hooks(&self) -> Vec<Hook> {
        self.0.borrow().iter().map(|s| s.hook).collect()
    }

    pub fn positions(&self, hook: Hook) -> Vec<(f64, f64)> {
        self.0
            .borrow()
            .iter()
            .filter(|s| s.hook == hook)
            .map(|s| (s.position.x, s.position.y))
            .collect()
    }

    pub fn count(&self, hook: Hook) -> usize {
        self.0.borrow().iter().filter(|s| s.hook == hook).count()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

// ============================================================================
// Shortcuts
// ============================================================================

/// Default scene with a recorded draggable on the card.
pub fn drag_card(options: DragOptions) -> (TestScene, Draggable<Scene>, Recorder) {
    let test = TestSceneBuilder::new().build();
    let recorder = Recorder::new();
    let drag = Draggable::new(test.scene.clone(), test.card, recorder.attach(options))
        .expect("valid options");
    (test, drag, recorder)
}
