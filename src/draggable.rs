//! The draggable controller and its public handle.
//!
//! A [`Draggable`] binds one element of a [`Host`] to pointer input. On
//! construction it registers its own listeners with the host (one
//! pointer-down listener on the handle or element, and root listeners for
//! move, up and cancel); [`Draggable::destroy`] releases exactly those.
//! There is no shared drag state between instances.
//!
//! ```ignore
//! let scene = Scene::new();
//! let card = scene.insert(None, Rect::new(0.0, 0.0, 50.0, 50.0));
//! let drag = Draggable::new(
//!     scene.clone(),
//!     card,
//!     DragOptions::default().with_grid(10.0).with_limit(Limit::x_range(0.0, 100.0)),
//! )?;
//! scene.drag_path((10.0, 10.0), &[(33.0, 10.0)])?;
//! assert_eq!(drag.get(), Position::new(20.0, 0.0));
//! ```

use crate::constants::FALLBACK_POSITION;
use crate::error::{DragError, DragResult};
use crate::host::{
    Host, ListenerId, ListenerScope, PointerEvent, PointerListener, PointerPhase, PositionMode,
    RenderHints,
};
use crate::input::{DragPhase, DragState, Notifications};
use crate::options::{DragEvent, DragOptions, DragSettings, OptionsUpdate};
use crate::types::{ElementId, InstanceId, Position};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, warn};

// ============================================================================
// Controller
// ============================================================================

/// Mutable per-instance state. Pointer handlers live in `crate::input`.
pub(crate) struct DragController<H> {
    pub(crate) id: InstanceId,
    pub(crate) element: ElementId,
    pub(crate) host: H,
    pub(crate) options: DragOptions,
    /// Last position written to the host
    pub(crate) position: Position,
    pub(crate) state: DragState,
}

impl<H: Host> DragController<H> {
    pub(crate) fn render_hints(&self) -> RenderHints {
        RenderHints {
            composited: self.options.use_gpu,
        }
    }

    /// Write `position` to the host; the stored position follows only on
    /// success. A failed write skips this frame.
    pub(crate) fn apply_position(&mut self, position: Position) -> bool {
        match self
            .host
            .write_position(self.element, position, self.render_hints())
        {
            Ok(()) => {
                self.position = position;
                true
            }
            Err(e) => {
                warn!(instance = %self.id, error = %e, "Position write failed, skipping frame");
                false
            }
        }
    }

    pub(crate) fn drag_event(&self, pointer: &PointerEvent) -> DragEvent {
        DragEvent {
            element: self.element,
            position: self.position,
            pointer: *pointer,
        }
    }

    fn apply_options(&mut self, update: OptionsUpdate) -> DragResult<()> {
        let enable_positioning = update.set_position == Some(true) && !self.options.set_position;
        self.options.apply(update)?;
        if enable_positioning {
            self.host
                .set_position_mode(self.element, PositionMode::Absolute);
        }
        Ok(())
    }

    /// Enter the terminal state; the element stays where it is.
    fn detach(&mut self) {
        if let Some(session) = self.state.detach() {
            if session.cursor_applied {
                self.host.set_cursor(self.element, None);
            }
            debug!(instance = %self.id, x = self.position.x, y = self.position.y, "Torn down mid-gesture");
        }
    }
}

/// Handle one event and fire its notifications outside the borrow.
fn dispatch<H: Host>(controller: &RefCell<DragController<H>>, event: &PointerEvent) -> DragResult<()> {
    let notifications: Notifications = {
        let Ok(mut controller) = controller.try_borrow_mut() else {
            warn!(phase = ?event.phase, "Reentrant pointer event ignored");
            return Ok(());
        };
        controller.handle_event(event)?
    };
    notifications.fire()
}

fn listener<H: Host + 'static>(controller: Weak<RefCell<DragController<H>>>) -> PointerListener {
    Rc::new(move |event: &PointerEvent| {
        let Some(controller) = controller.upgrade() else {
            return Ok(());
        };
        dispatch(&controller, event)
    })
}

// ============================================================================
// Listener Bindings
// ============================================================================

/// Listener registrations owned by one draggable.
struct Bindings {
    down: ListenerId,
    root: Vec<ListenerId>,
}

const ROOT_PHASES: [PointerPhase; 3] = [PointerPhase::Move, PointerPhase::Up, PointerPhase::Cancel];

impl Bindings {
    fn register<H: Host + 'static>(
        host: &H,
        controller: &Rc<RefCell<DragController<H>>>,
        down_scope: ElementId,
    ) -> Self {
        let down = host.add_listener(
            ListenerScope::Element(down_scope, PointerPhase::Down),
            listener(Rc::downgrade(controller)),
        );
        let root = ROOT_PHASES
            .iter()
            .map(|phase| {
                host.add_listener(ListenerScope::Root(*phase), listener(Rc::downgrade(controller)))
            })
            .collect();
        Self { down, root }
    }

    /// Move the pointer-down listener to a new element.
    fn rebind_down<H: Host + 'static>(
        &mut self,
        host: &H,
        controller: &Rc<RefCell<DragController<H>>>,
        down_scope: ElementId,
    ) {
        host.remove_listener(self.down);
        self.down = host.add_listener(
            ListenerScope::Element(down_scope, PointerPhase::Down),
            listener(Rc::downgrade(controller)),
        );
    }

    fn release<H: Host>(self, host: &H) -> usize {
        std::iter::once(self.down)
            .chain(self.root)
            .filter(|id| host.remove_listener(*id))
            .count()
    }
}

// ============================================================================
// Draggable
// ============================================================================

/// Makes one element follow pointer input.
///
/// Dropping a `Draggable` tears it down like [`destroy`](Self::destroy).
pub struct Draggable<H: Host + Clone + 'static> {
    id: InstanceId,
    element: ElementId,
    host: H,
    controller: Rc<RefCell<DragController<H>>>,
    bindings: Option<Bindings>,
}

impl<H: Host + Clone + 'static> Draggable<H> {
    /// Attach drag behavior to `element`.
    pub fn new(host: H, element: ElementId, options: DragOptions) -> DragResult<Self> {
        let options = options.validated()?;
        let id = InstanceId::new();

        if options.set_position {
            host.set_position_mode(element, PositionMode::Absolute);
        }
        let position = host.layout_position(element).unwrap_or_else(|| {
            debug!(instance = %id, %element, "No layout position, starting at fallback");
            Position::from(FALLBACK_POSITION)
        });
        let down_scope = options.handle.unwrap_or(element);

        let controller = Rc::new(RefCell::new(DragController {
            id,
            element,
            host: host.clone(),
            options,
            position,
            state: DragState::Idle,
        }));
        let bindings = Bindings::register(&host, &controller, down_scope);

        debug!(instance = %id, %element, x = position.x, y = position.y, "Draggable attached");

        Ok(Self {
            id,
            element,
            host,
            controller,
            bindings: Some(bindings),
        })
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Current position, in or out of a gesture.
    pub fn get(&self) -> Position {
        self.controller.borrow().position
    }

    /// Move the element right away, bypassing threshold, session and limits.
    pub fn set(&self, x: f64, y: f64) -> DragResult<()> {
        let position = Position::new(x, y);
        if !position.is_finite() {
            return Err(DragError::InvalidPosition { x, y });
        }
        let mut controller = self.controller.borrow_mut();
        let hints = controller.render_hints();
        controller.host.write_position(self.element, position, hints)?;
        controller.position = position;
        Ok(())
    }

    /// Apply a partial configuration change.
    ///
    /// Takes effect from the next event; an in-progress gesture keeps its
    /// origin. Nothing is applied if any value is invalid.
    pub fn update_options(&mut self, update: OptionsUpdate) -> DragResult<()> {
        let new_handle = update.handle;
        self.controller.borrow_mut().apply_options(update)?;

        if let (Some(handle), Some(bindings)) = (new_handle, self.bindings.as_mut()) {
            bindings.rebind_down(&self.host, &self.controller, handle.unwrap_or(self.element));
        }
        Ok(())
    }

    /// Parse and apply a JSON update such as `{"grid": 10}`.
    pub fn update_options_json(&mut self, json: &str) -> DragResult<()> {
        self.update_options(OptionsUpdate::from_json(json)?)
    }

    /// Read access to the live options.
    pub fn with_options<R>(&self, f: impl FnOnce(&DragOptions) -> R) -> R {
        f(&self.controller.borrow().options)
    }

    /// Data-only snapshot of the live options.
    pub fn settings(&self) -> DragSettings {
        self.controller.borrow().options.settings()
    }

    pub fn phase(&self) -> DragPhase {
        self.controller.borrow().state.phase()
    }

    /// Whether the threshold has been crossed in the current gesture.
    pub fn is_dragging(&self) -> bool {
        self.phase() == DragPhase::Dragging
    }

    pub fn is_destroyed(&self) -> bool {
        self.bindings.is_none()
    }

    /// Feed an event directly, for hosts that push events instead of
    /// calling registered listeners. Don't combine both for one host, or
    /// every event is seen twice.
    pub fn handle_event(&self, event: &PointerEvent) -> DragResult<()> {
        dispatch(&self.controller, event)
    }

    /// Release all listeners and stop reacting to input. Idempotent.
    pub fn destroy(&mut self) {
        let Some(bindings) = self.bindings.take() else {
            return;
        };
        let released = bindings.release(&self.host);
        self.controller.borrow_mut().detach();
        debug!(instance = %self.id, released, "Draggable destroyed");
    }
}

impl<H: Host + Clone + 'static> Drop for Draggable<H> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<H: Host + Clone + 'static> std::fmt::Debug for Draggable<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Draggable")
            .field("id", &self.id)
            .field("element", &self.element)
            .field("position", &self.get())
            .field("phase", &self.phase())
            .finish()
    }
}
