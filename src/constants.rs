//! Library-wide constants.
//!
//! Centralizes option defaults and tuning values so that `DragOptions`,
//! the JSON settings format and the headless scene agree on them.

// ============================================================================
// Option Defaults
// ============================================================================

/// Grid step; 0 disables snapping
pub const DEFAULT_GRID: f64 = 0.0;

/// Pointer travel (px) before a drag is confirmed
pub const DEFAULT_THRESHOLD: f64 = 0.0;

/// Whether the move cursor is shown during an active drag
pub const DEFAULT_SET_CURSOR: bool = false;

/// Whether the controller manages the element's positioning mode
pub const DEFAULT_SET_POSITION: bool = true;

/// Snap only on release instead of on every move
pub const DEFAULT_SMOOTH_DRAG: bool = true;

/// Ask the host for composited position updates
pub const DEFAULT_USE_GPU: bool = true;

// ============================================================================
// Pointer Handling
// ============================================================================

/// Pointer id used by the headless scene's convenience builders
pub const PRIMARY_POINTER_ID: u32 = 0;

/// Position reported for elements the host cannot place
pub const FALLBACK_POSITION: (f64, f64) = (0.0, 0.0);

// ============================================================================
// Profiling
// ============================================================================

/// Pointer handlers slower than this are logged (milliseconds)
pub const SLOW_HANDLER_MS: f64 = 4.0;
