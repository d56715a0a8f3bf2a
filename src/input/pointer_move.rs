//! Pointer move handling - threshold crossing and continuous dragging.
//!
//! ## Performance Notes
//!
//! Moves arrive at display rate. Pending gestures below the threshold exit
//! before any host call; active drags cost one resolve and one write.

use crate::draggable::DragController;
use crate::error::{DragResult, Hook};
use crate::host::{Cursor, Host, PointerEvent};
use crate::input::Notifications;
use crate::input::coords::{crossed_threshold, drag_candidate, travel};
use crate::profile_scope;
use crate::snap::snap_position;
use tracing::debug;

impl<H: Host> DragController<H> {
    pub(crate) fn handle_pointer_move(&mut self, event: &PointerEvent) -> DragResult<Notifications> {
        profile_scope!("pointer_move");

        let Some(session) = self.state.session().copied() else {
            return Ok(Notifications::none());
        };
        if event.pointer_id != session.pointer_id {
            return Ok(Notifications::none());
        }

        if self.state.is_pending()
            && !crossed_threshold(session.pointer_origin, event.position, self.options.threshold)
        {
            return Ok(Notifications::none());
        }

        let candidate = drag_candidate(session.origin, session.pointer_origin, event.position);
        let snapped = if self.options.smooth_drag {
            candidate
        } else {
            snap_position(candidate, self.options.grid)
        };
        // A failed resolve leaves the gesture where it was: still pending
        // if this move would have started it
        let resolved = self
            .options
            .limit
            .resolve(snapped, session.origin, &self.host, self.element)?;

        let mut notifications = Notifications::none();

        if self.state.is_pending() {
            self.state.confirm();
            if self.options.set_cursor {
                self.host.set_cursor(self.element, Some(Cursor::Move));
                if let Some(session) = self.state.session_mut() {
                    session.cursor_applied = true;
                }
            }
            debug!(
                instance = %self.id,
                x = self.position.x,
                y = self.position.y,
                travel = travel(session.pointer_origin, event.position),
                "Drag started"
            );
            notifications.push(
                Hook::DragStart,
                self.options.on_drag_start.as_ref(),
                self.drag_event(event),
            );
        }

        if let Some(session) = self.state.session_mut() {
            session.raw = candidate;
        }

        if self.apply_position(resolved) {
            notifications.push(Hook::Drag, self.options.on_drag.as_ref(), self.drag_event(event));
        }
        Ok(notifications)
    }
}
