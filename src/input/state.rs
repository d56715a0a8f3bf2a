//! Drag session state machine.
//!
//! ## State Transitions
//!
//! ```text
//! Idle     -> Pending    (primary pointer-down accepted by handle/filter)
//! Pending  -> Dragging   (pointer travelled >= threshold)
//! Pending  -> Idle       (pointer-up/cancel before threshold)
//! Dragging -> Idle       (pointer-up/cancel, finalizes the position)
//! Any      -> Detached   (destroy, terminal)
//! ```
//!
//! The session payload only exists while a gesture is in progress, so at
//! most one session per draggable is representable.

use crate::types::Position;

/// Per-gesture data captured at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Element position when the gesture began
    pub origin: Position,
    /// Pointer position when the gesture began
    pub pointer_origin: Position,
    /// Last candidate before snapping and limits
    pub raw: Position,
    /// Pointer that owns this gesture
    pub pointer_id: u32,
    /// Whether this session put up the move cursor
    pub cursor_applied: bool,
}

impl DragSession {
    pub fn new(origin: Position, pointer_origin: Position, pointer_id: u32) -> Self {
        Self {
            origin,
            pointer_origin,
            raw: origin,
            pointer_id,
            cursor_applied: false,
        }
    }
}

/// Coarse phase of a draggable, for callers that only need to branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Pending,
    Dragging,
    Detached,
}

#[derive(Debug, Clone, Default)]
pub enum DragState {
    /// No gesture in progress
    #[default]
    Idle,
    /// Pointer is down but has not moved far enough yet
    Pending(DragSession),
    /// Threshold crossed; moves update the element
    Dragging(DragSession),
    /// Torn down; every event is ignored
    Detached,
}

impl DragState {
    pub fn phase(&self) -> DragPhase {
        match self {
            Self::Idle => DragPhase::Idle,
            Self::Pending(_) => DragPhase::Pending,
            Self::Dragging(_) => DragPhase::Dragging,
            Self::Detached => DragPhase::Detached,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    pub fn is_detached(&self) -> bool {
        matches!(self, Self::Detached)
    }

    /// The live session, if a gesture is in progress.
    pub fn session(&self) -> Option<&DragSession> {
        match self {
            Self::Pending(session) | Self::Dragging(session) => Some(session),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut DragSession> {
        match self {
            Self::Pending(session) | Self::Dragging(session) => Some(session),
            _ => None,
        }
    }

    /// Start a gesture. Ignored unless idle.
    pub fn begin(&mut self, session: DragSession) {
        if self.is_idle() {
            *self = Self::Pending(session);
        }
    }

    /// Promote a pending gesture to an active drag.
    pub fn confirm(&mut self) {
        if let Self::Pending(session) = *self {
            *self = Self::Dragging(session);
        }
    }

    /// End the current gesture, returning its session.
    pub fn finish(&mut self) -> Option<DragSession> {
        match std::mem::take(self) {
            Self::Pending(session) | Self::Dragging(session) => Some(session),
            Self::Detached => {
                *self = Self::Detached;
                None
            }
            Self::Idle => None,
        }
    }

    /// Enter the terminal state, returning any session that was cut short.
    pub fn detach(&mut self) -> Option<DragSession> {
        let session = self.session().copied();
        *self = Self::Detached;
        session
    }
}
