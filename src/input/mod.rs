//! Pointer input handling for the drag controller.
//!
//! The controller is an explicit state machine (`DragState`); each pointer
//! phase has its own handler module. Handlers mutate controller state and
//! return the observer notifications they produced; the caller fires those
//! only after it has released the controller, so observers are free to read
//! or move the draggable.
//!
//! ## Modules
//!
//! - `state` - Session state machine and helpers
//! - `coords` - Delta and threshold math
//! - `pointer_down` - Gesture start (handle and filter checks)
//! - `pointer_move` - Threshold crossing, snapping, limits, writes
//! - `pointer_up` - Deferred snap and gesture end

pub mod coords;
mod pointer_down;
mod pointer_move;
mod pointer_up;
mod state;

pub use state::{DragPhase, DragSession, DragState};

use crate::draggable::DragController;
use crate::error::{DragError, DragResult, Hook};
use crate::host::{Host, PointerEvent, PointerPhase};
use crate::options::{DragCallback, DragEvent};
use tracing::{trace, warn};

/// One observer call waiting to happen.
#[derive(Debug, Clone)]
pub struct Notification {
    pub hook: Hook,
    pub callback: DragCallback,
    pub event: DragEvent,
}

/// Observer calls produced by one pointer event, in firing order.
///
/// An error recorded with [`fail_after`](Self::fail_after) is returned only
/// after every queued observer has run.
#[derive(Debug, Default)]
#[must_use]
pub struct Notifications {
    queued: Vec<Notification>,
    deferred: Option<DragError>,
}

impl Notifications {
    pub fn none() -> Self {
        Self::default()
    }

    /// Queue `callback` if the hook has one.
    pub fn push(&mut self, hook: Hook, callback: Option<&DragCallback>, event: DragEvent) {
        if let Some(callback) = callback {
            self.queued.push(Notification {
                hook,
                callback: callback.clone(),
                event,
            });
        }
    }

    pub(crate) fn fail_after(&mut self, error: DragError) {
        self.deferred = Some(error);
    }

    /// Call every observer in order, stopping at the first failure.
    pub fn fire(self) -> DragResult<()> {
        for notification in self.queued {
            trace!(hook = %notification.hook, x = notification.event.x(), y = notification.event.y(), "Notify");
            notification
                .callback
                .call(&notification.event)
                .map_err(|source| DragError::Callback {
                    hook: notification.hook,
                    source,
                })
                .inspect_err(|_| {
                    if let Some(deferred) = &self.deferred {
                        warn!(error = %deferred, "Dropped behind an observer failure");
                    }
                })?;
        }
        match self.deferred {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl<H: Host> DragController<H> {
    /// Route one pointer event to its phase handler.
    pub(crate) fn handle_event(&mut self, event: &PointerEvent) -> DragResult<Notifications> {
        if self.state.is_detached() {
            return Ok(Notifications::none());
        }
        match event.phase {
            PointerPhase::Down => self.handle_pointer_down(event),
            PointerPhase::Move => self.handle_pointer_move(event),
            PointerPhase::Up | PointerPhase::Cancel => self.handle_pointer_up(event),
        }
    }
}
