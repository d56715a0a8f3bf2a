//! Coordinate math for pointer-driven movement.
//!
//! Keeps the delta and threshold formulas in one place so the move and up
//! handlers agree on them.

use crate::types::Position;

/// Where the element would be if it followed the pointer exactly.
///
/// `origin` is the element's position at pointer-down and `pointer_origin`
/// the pointer's position at the same moment.
#[inline]
pub fn drag_candidate(origin: Position, pointer_origin: Position, pointer: Position) -> Position {
    origin.translated(pointer.x - pointer_origin.x, pointer.y - pointer_origin.y)
}

/// Straight-line pointer travel between two points.
#[inline]
pub fn travel(from: Position, to: Position) -> f64 {
    (to.x - from.x).hypot(to.y - from.y)
}

/// Whether the pointer has moved at least `threshold` away from `from`.
///
/// A zero threshold is crossed by any move, including one that goes nowhere.
#[inline]
pub fn crossed_threshold(from: Position, to: Position, threshold: f64) -> bool {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    dx * dx + dy * dy >= threshold * threshold
}
