//! Pointer down handling - gesture start, handle and filter checks.

use crate::draggable::DragController;
use crate::error::DragResult;
use crate::host::{Host, PointerEvent};
use crate::input::{DragSession, Notifications};
use crate::profile_scope;
use crate::types::ElementId;
use tracing::{debug, trace};

impl<H: Host> DragController<H> {
    pub(crate) fn handle_pointer_down(&mut self, event: &PointerEvent) -> DragResult<Notifications> {
        profile_scope!("pointer_down");

        if !self.state.is_idle() {
            trace!(instance = %self.id, pointer = event.pointer_id, "Gesture already in progress");
            return Ok(Notifications::none());
        }
        if !event.is_primary() {
            return Ok(Notifications::none());
        }
        if !self.accepts_target(event.target) {
            debug!(instance = %self.id, target = ?event.target, "Pointer-down rejected by handle/filter");
            return Ok(Notifications::none());
        }

        self.state
            .begin(DragSession::new(self.position, event.position, event.pointer_id));
        trace!(
            instance = %self.id,
            x = self.position.x,
            y = self.position.y,
            "Gesture pending"
        );
        Ok(Notifications::none())
    }

    /// Whether a pointer-down on `target` may start a gesture.
    ///
    /// With a handle, the target must be the handle or inside it; otherwise it
    /// must be inside the dragged element. An unresolved target only passes
    /// when there is no handle to test against.
    fn accepts_target(&self, target: Option<ElementId>) -> bool {
        let Some(target) = target else {
            return self.options.handle.is_none();
        };
        let scope = self.options.handle.unwrap_or(self.element);
        if !self.host.contains(scope, target) {
            return false;
        }
        match &self.options.filter_target {
            Some(filter) => !filter.rejects(target),
            None => true,
        }
    }
}
