//! Headless render tree implementing [`Host`].
//!
//! `Scene` keeps elements with layout rectangles, resolves pointer targets
//! through an R-tree, and dispatches pointer events to registered listeners.
//! It is what the test suite and the replay tool drive draggables with, and
//! it works as the host for any embedder without a retained tree of its own.
//!
//! `Scene` is a cheap handle: clones share the same tree.

use crate::error::{DragResult, HostError};
use crate::host::{
    Cursor, Host, Layout, ListenerId, ListenerScope, PointerEvent, PointerListener, PointerPhase,
    PositionMode, RenderHints,
};
use crate::spatial_index::SpatialIndex;
use crate::types::{ElementId, Position, Rect};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{trace, warn};

#[derive(Debug, Clone)]
struct Node {
    parent: Option<ElementId>,
    rect: Rect,
    attached: bool,
    order: u64,
    cursor: Option<Cursor>,
    mode: PositionMode,
    composited: bool,
    writes: usize,
}

struct Registered {
    id: ListenerId,
    scope: ListenerScope,
    listener: PointerListener,
}

#[derive(Default)]
struct SceneInner {
    nodes: HashMap<ElementId, Node>,
    index: SpatialIndex,
    listeners: Vec<Registered>,
    next_element: u64,
    next_listener: u64,
}

impl SceneInner {
    fn is_within(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }

    fn listens(&self, scope: &ListenerScope, event: &PointerEvent) -> bool {
        if scope.phase() != event.phase {
            return false;
        }
        match scope {
            ListenerScope::Root(_) => true,
            ListenerScope::Element(element, _) => event
                .target
                .is_some_and(|target| self.is_within(*element, target)),
        }
    }
}

/// In-memory host.
#[derive(Clone, Default)]
pub struct Scene {
    inner: Rc<RefCell<SceneInner>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element. Ids are handed out as 1, 2, 3... in insertion order,
    /// and later elements are painted above earlier ones.
    pub fn insert(&self, parent: Option<ElementId>, rect: Rect) -> ElementId {
        let mut inner = self.inner.borrow_mut();
        inner.next_element += 1;
        let id = ElementId(inner.next_element);
        let order = inner.next_element;
        let attached = parent.is_none_or(|p| inner.nodes.get(&p).is_some_and(|n| n.attached));
        inner.nodes.insert(
            id,
            Node {
                parent,
                rect,
                attached,
                order,
                cursor: None,
                mode: PositionMode::Flow,
                composited: false,
                writes: 0,
            },
        );
        if attached {
            inner.index.insert(id, order, rect);
        }
        id
    }

    /// Change an element's rectangle, as a scroll or resize would.
    pub fn set_rect(&self, element: ElementId, rect: Rect) {
        let mut inner = self.inner.borrow_mut();
        let Some(node) = inner.nodes.get_mut(&element) else {
            return;
        };
        node.rect = rect;
        let attached = node.attached;
        if attached {
            inner.index.update(element, rect);
        }
    }

    /// Remove an element and its descendants from layout.
    pub fn detach(&self, element: ElementId) {
        let mut inner = self.inner.borrow_mut();
        let doomed: Vec<ElementId> = inner
            .nodes
            .keys()
            .copied()
            .filter(|id| inner.is_within(element, *id))
            .collect();
        for id in doomed {
            if let Some(node) = inner.nodes.get_mut(&id) {
                node.attached = false;
            }
            inner.index.remove(id);
        }
    }

    pub fn is_attached(&self, element: ElementId) -> bool {
        self.inner
            .borrow()
            .nodes
            .get(&element)
            .is_some_and(|n| n.attached)
    }

    /// Stored rectangle, attached or not.
    pub fn rect(&self, element: ElementId) -> Option<Rect> {
        self.inner.borrow().nodes.get(&element).map(|n| n.rect)
    }

    pub fn cursor(&self, element: ElementId) -> Option<Cursor> {
        self.inner.borrow().nodes.get(&element).and_then(|n| n.cursor)
    }

    pub fn position_mode(&self, element: ElementId) -> Option<PositionMode> {
        self.inner.borrow().nodes.get(&element).map(|n| n.mode)
    }

    /// Whether the last position write asked for compositing.
    pub fn composited(&self, element: ElementId) -> bool {
        self.inner
            .borrow()
            .nodes
            .get(&element)
            .is_some_and(|n| n.composited)
    }

    /// Number of position writes applied to `element`.
    pub fn write_count(&self, element: ElementId) -> usize {
        self.inner
            .borrow()
            .nodes
            .get(&element)
            .map_or(0, |n| n.writes)
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Topmost attached element under `point`.
    pub fn hit_test(&self, point: Position) -> Option<ElementId> {
        self.inner.borrow().index.topmost_at(point)
    }

    /// Deliver an event to every matching listener, in registration order.
    ///
    /// A missing target is filled in by hit testing. Every listener sees the
    /// event even if an earlier one fails; the first error is returned.
    pub fn dispatch(&self, mut event: PointerEvent) -> DragResult<()> {
        if event.target.is_none() {
            event.target = self.hit_test(event.position);
        }

        let listeners: Vec<PointerListener> = {
            let inner = self.inner.borrow();
            inner
                .listeners
                .iter()
                .filter(|r| inner.listens(&r.scope, &event))
                .map(|r| r.listener.clone())
                .collect()
        };
        trace!(phase = ?event.phase, target = ?event.target, listeners = listeners.len(), "Dispatch");

        let mut first_error = None;
        for listener in listeners {
            if let Err(e) = listener(&event) {
                if first_error.is_some() {
                    warn!(phase = ?event.phase, error = %e, "Listener failed after an earlier error");
                } else {
                    first_error = Some(e);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    pub fn pointer_down(&self, x: f64, y: f64) -> DragResult<()> {
        self.dispatch(PointerEvent::new(PointerPhase::Down, Position::new(x, y)))
    }

    pub fn pointer_move(&self, x: f64, y: f64) -> DragResult<()> {
        self.dispatch(PointerEvent::new(PointerPhase::Move, Position::new(x, y)))
    }

    pub fn pointer_up(&self, x: f64, y: f64) -> DragResult<()> {
        self.dispatch(PointerEvent::new(PointerPhase::Up, Position::new(x, y)))
    }

    /// Down at `from`, one move per step, up at the last point.
    pub fn drag_path(&self, from: (f64, f64), path: &[(f64, f64)]) -> DragResult<()> {
        self.pointer_down(from.0, from.1)?;
        for &(x, y) in path {
            self.pointer_move(x, y)?;
        }
        let (x, y) = path.last().copied().unwrap_or(from);
        self.pointer_up(x, y)
    }

    /// Any phase, from a specific pointer.
    pub fn pointer(&self, phase: PointerPhase, x: f64, y: f64, pointer_id: u32) -> DragResult<()> {
        self.dispatch(PointerEvent::new(phase, Position::new(x, y)).with_pointer_id(pointer_id))
    }
}

impl Layout for Scene {
    fn bounding_rect(&self, element: ElementId) -> Option<Rect> {
        self.inner
            .borrow()
            .nodes
            .get(&element)
            .filter(|n| n.attached)
            .map(|n| n.rect)
    }
}

impl Host for Scene {
    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        self.inner.borrow().is_within(ancestor, node)
    }

    fn write_position(
        &self,
        element: ElementId,
        position: Position,
        hints: RenderHints,
    ) -> Result<(), HostError> {
        let mut inner = self.inner.borrow_mut();
        let node = inner
            .nodes
            .get_mut(&element)
            .ok_or(HostError::UnknownElement(element))?;
        if !node.attached {
            return Err(HostError::Detached(element));
        }
        node.rect = node.rect.moved_to(position);
        node.composited = hints.composited;
        node.writes += 1;
        let rect = node.rect;
        inner.index.update(element, rect);
        Ok(())
    }

    fn set_cursor(&self, element: ElementId, cursor: Option<Cursor>) {
        if let Some(node) = self.inner.borrow_mut().nodes.get_mut(&element) {
            node.cursor = cursor;
        }
    }

    fn set_position_mode(&self, element: ElementId, mode: PositionMode) {
        if let Some(node) = self.inner.borrow_mut().nodes.get_mut(&element) {
            node.mode = mode;
        }
    }

    fn add_listener(&self, scope: ListenerScope, listener: PointerListener) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        inner.next_listener += 1;
        let id = ListenerId(inner.next_listener);
        inner.listeners.push(Registered {
            id,
            scope,
            listener,
        });
        id
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.listeners.len();
        inner.listeners.retain(|r| r.id != id);
        inner.listeners.len() != before
    }
}
