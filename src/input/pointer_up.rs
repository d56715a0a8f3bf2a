//! Pointer up/cancel handling - deferred snapping and gesture end.

use crate::draggable::DragController;
use crate::error::{DragResult, Hook};
use crate::host::{Host, PointerEvent};
use crate::input::Notifications;
use crate::profile_scope;
use crate::snap::snap_position;
use tracing::{debug, trace};

impl<H: Host> DragController<H> {
    pub(crate) fn handle_pointer_up(&mut self, event: &PointerEvent) -> DragResult<Notifications> {
        profile_scope!("pointer_up");

        let Some(session) = self.state.session().copied() else {
            return Ok(Notifications::none());
        };
        if event.pointer_id != session.pointer_id {
            return Ok(Notifications::none());
        }

        let was_dragging = self.state.is_dragging();
        self.state.finish();

        if session.cursor_applied {
            self.host.set_cursor(self.element, None);
        }

        if !was_dragging {
            trace!(instance = %self.id, "Released before threshold");
            return Ok(Notifications::none());
        }

        let mut notifications = Notifications::none();

        // Deferred snap: only the final position lands on the grid. The
        // gesture is over either way, so a failed resolve still ends it.
        if self.options.smooth_drag && self.options.grid > 0.0 {
            let snapped = snap_position(session.raw, self.options.grid);
            match self
                .options
                .limit
                .resolve(snapped, session.origin, &self.host, self.element)
            {
                Ok(resolved) => {
                    if self.apply_position(resolved) {
                        notifications.push(Hook::Drag, self.options.on_drag.as_ref(), self.drag_event(event));
                    }
                }
                Err(e) => notifications.fail_after(e),
            }
        }

        debug!(
            instance = %self.id,
            x = self.position.x,
            y = self.position.y,
            "Drag ended"
        );
        notifications.push(
            Hook::DragEnd,
            self.options.on_drag_end.as_ref(),
            self.drag_event(event),
        );
        Ok(notifications)
    }
}
