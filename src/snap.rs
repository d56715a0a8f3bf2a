//! Grid snapping.
//!
//! Each axis is quantized independently. Halves round toward +inf so that a
//! value sitting exactly between two grid lines always lands on the same one
//! whichever direction it was dragged from.

use crate::types::Position;

/// Snap `value` to the nearest multiple of `grid`.
///
/// A non-positive or non-finite grid disables snapping.
#[inline]
pub fn snap(value: f64, grid: f64) -> f64 {
    if grid > 0.0 && grid.is_finite() {
        (value / grid + 0.5).floor() * grid
    } else {
        value
    }
}

/// Snap both axes of `position`.
#[inline]
pub fn snap_position(position: Position, grid: f64) -> Position {
    Position::new(snap(position.x, grid), snap(position.y, grid))
}

/// Whether `value` already lies on the grid.
pub fn is_aligned(value: f64, grid: f64) -> bool {
    snap(value, grid) == value
}
