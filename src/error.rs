//! Error types for draggable operations.
//!
//! Internal computation (snapping, clamping) never fails. Errors come from
//! configuration, from the host refusing an explicit write, and from
//! user-supplied closures, which are surfaced rather than swallowed.

use crate::types::ElementId;
use thiserror::Error;

/// Errors reported by a [`Host`](crate::host::Host).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The element is not (or no longer) attached to the render tree
    #[error("element {0} is not attached")]
    Detached(ElementId),

    /// The host has never heard of this element
    #[error("unknown element {0}")]
    UnknownElement(ElementId),
}

/// Which observer hook produced a callback error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    DragStart,
    Drag,
    DragEnd,
}

impl Hook {
    pub fn name(&self) -> &'static str {
        match self {
            Hook::DragStart => "on_drag_start",
            Hook::Drag => "on_drag",
            Hook::DragEnd => "on_drag_end",
        }
    }
}

impl std::fmt::Display for Hook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors that can occur while configuring or driving a draggable
#[derive(Error, Debug)]
pub enum DragError {
    /// An option value is outside its documented domain
    #[error("invalid value for option `{key}`: {reason}")]
    InvalidOption { key: &'static str, reason: String },

    /// An option key that does not exist
    #[error("unknown option `{0}`")]
    UnknownOption(String),

    /// Programmatic position with non-finite coordinates
    #[error("invalid position ({x}, {y}): coordinates must be finite")]
    InvalidPosition { x: f64, y: f64 },

    /// A user-supplied limit function failed
    #[error("custom limit failed: {0}")]
    Limit(#[source] anyhow::Error),

    /// A user-supplied observer failed
    #[error("{hook} callback failed: {source}")]
    Callback {
        hook: Hook,
        #[source]
        source: anyhow::Error,
    },

    /// The host refused an operation
    #[error("host error: {0}")]
    Host(#[from] HostError),

    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for draggable operations
pub type DragResult<T> = Result<T, DragError>;

impl DragError {
    pub(crate) fn invalid_option(key: &'static str, reason: impl Into<String>) -> Self {
        DragError::InvalidOption {
            key,
            reason: reason.into(),
        }
    }
}
