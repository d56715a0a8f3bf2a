//! Host integration contract.
//!
//! A host is whatever owns the render tree: it delivers pointer events,
//! answers layout queries and applies visual positions. The controller only
//! talks to the host through these traits, so any retained-mode UI (or the
//! headless [`Scene`](crate::scene::Scene)) can carry a draggable.

use crate::error::{DragResult, HostError};
use crate::types::{ElementId, Position, Rect};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

// ============================================================================
// Pointer Events
// ============================================================================

/// Lifecycle phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// Button that caused a down/up event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// Device that produced the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
    Pen,
}

/// A pointer event as delivered by the host, in layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub position: Position,
    /// Element under the pointer, if the host resolved one
    pub target: Option<ElementId>,
    pub pointer_id: u32,
    pub button: PointerButton,
    pub kind: PointerKind,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, position: Position) -> Self {
        Self {
            phase,
            position,
            target: None,
            pointer_id: crate::constants::PRIMARY_POINTER_ID,
            button: PointerButton::Primary,
            kind: PointerKind::Mouse,
        }
    }

    pub fn with_target(mut self, target: ElementId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_pointer_id(mut self, pointer_id: u32) -> Self {
        self.pointer_id = pointer_id;
        self
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_kind(mut self, kind: PointerKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether this event may start a drag gesture.
    ///
    /// Touch and pen contacts always report `Primary`.
    pub fn is_primary(&self) -> bool {
        self.button == PointerButton::Primary
    }
}

// ============================================================================
// Listener Registration
// ============================================================================

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerScope {
    /// Events targeting this element or one of its descendants
    Element(ElementId, PointerPhase),
    /// Every event of this phase, wherever it lands
    Root(PointerPhase),
}

impl ListenerScope {
    pub fn phase(&self) -> PointerPhase {
        match self {
            ListenerScope::Element(_, phase) | ListenerScope::Root(phase) => *phase,
        }
    }
}

/// Handle returned by [`Host::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Callback invoked by the host for each matching pointer event.
///
/// Errors are returned to whoever dispatched the event.
pub type PointerListener = Rc<dyn Fn(&PointerEvent) -> DragResult<()>>;

// ============================================================================
// Rendering Hints
// ============================================================================

/// How the host should apply a position write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderHints {
    /// Prefer a composited (GPU) transform over a layout-affecting write
    pub composited: bool,
}

/// Cursor affordances the controller may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cursor {
    Move,
}

/// Positioning mode of the dragged element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionMode {
    /// Left to the host's normal flow
    #[default]
    Flow,
    /// Placed at explicit coordinates, managed by the draggable
    Absolute,
}

// ============================================================================
// Traits
// ============================================================================

/// Read-only layout queries, all the constraint resolver needs.
pub trait Layout {
    /// Current bounding rectangle, or `None` if the element is not laid out.
    fn bounding_rect(&self, element: ElementId) -> Option<Rect>;
}

/// Everything the drag controller needs from its environment.
pub trait Host: Layout {
    /// Position the element currently sits at, if known.
    fn layout_position(&self, element: ElementId) -> Option<Position> {
        self.bounding_rect(element).map(|rect| rect.origin())
    }

    /// Whether `node` is `ancestor` or lies beneath it.
    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool;

    /// Apply a visual position to the element.
    fn write_position(
        &self,
        element: ElementId,
        position: Position,
        hints: RenderHints,
    ) -> Result<(), HostError>;

    /// Show (or clear, with `None`) a cursor affordance over the element.
    fn set_cursor(&self, element: ElementId, cursor: Option<Cursor>);

    /// Switch how the element is positioned.
    fn set_position_mode(&self, element: ElementId, mode: PositionMode);

    /// Start delivering events matching `scope` to `listener`.
    fn add_listener(&self, scope: ListenerScope, listener: PointerListener) -> ListenerId;

    /// Stop delivering to a listener. Returns false if it was not registered.
    fn remove_listener(&self, id: ListenerId) -> bool;
}

impl<T: Layout + ?Sized> Layout for &T {
    fn bounding_rect(&self, element: ElementId) -> Option<Rect> {
        (**self).bounding_rect(element)
    }
}
