//! Constraint resolution for drag candidates.
//!
//! A [`Limit`] maps a proposed position (plus the position the drag started
//! from) to the position the element is allowed to occupy. Resolution is a
//! pure function of its inputs and the host's current layout; it never
//! touches session or configuration state.
//!
//! ## Variants
//!
//! ```text
//! Unbounded            candidate returned as is
//! Axes { x, y }        each axis Free, Range { min, max } or Fixed(v)
//! Element(id)          keep the dragged box inside id's bounding rect
//! Custom(f)            f(x, y, x0, y0) used verbatim
//! ```

use crate::error::{DragError, DragResult};
use crate::host::Layout;
use crate::types::{ElementId, Position, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use tracing::{debug, warn};

// ============================================================================
// Axis Limits
// ============================================================================

/// Constraint on a single axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AxisLimit {
    /// No constraint on this axis
    #[default]
    Free,
    /// Clamp into `[min, max]`; an inverted range pins to `min`
    Range { min: f64, max: f64 },
    /// Axis is locked to this value
    Fixed(f64),
}

impl AxisLimit {
    pub fn range(min: f64, max: f64) -> Self {
        AxisLimit::Range { min, max }
    }

    /// Apply this constraint to one coordinate.
    #[inline]
    pub fn apply(&self, value: f64) -> f64 {
        match *self {
            AxisLimit::Free => value,
            AxisLimit::Range { min, max } => clamp_axis(value, min, max),
            AxisLimit::Fixed(fixed) => fixed,
        }
    }
}

/// Clamp without panicking on inverted or NaN bounds.
#[inline]
pub fn clamp_axis(value: f64, min: f64, max: f64) -> f64 {
    if min > max {
        return min;
    }
    value.max(min).min(max)
}

// ============================================================================
// Custom Limits
// ============================================================================

type LimitFn = dyn Fn(Position, Position) -> anyhow::Result<Position>;

/// User-supplied limit: `(candidate, origin) -> allowed`.
///
/// Its result is trusted: it is neither clamped nor sanitized.
#[derive(Clone)]
pub struct CustomLimit(Rc<LimitFn>);

impl CustomLimit {
    pub fn call(&self, candidate: Position, origin: Position) -> anyhow::Result<Position> {
        (self.0)(candidate, origin)
    }
}

impl fmt::Debug for CustomLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomLimit(..)")
    }
}

impl PartialEq for CustomLimit {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

// ============================================================================
// Limit
// ============================================================================

/// The `limit` option.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Limit {
    #[default]
    Unbounded,
    Axes { x: AxisLimit, y: AxisLimit },
    Element(ElementId),
    Custom(CustomLimit),
}

impl Limit {
    pub fn axes(x: AxisLimit, y: AxisLimit) -> Self {
        Limit::Axes { x, y }
    }

    /// Limit only x to `[min, max]`.
    pub fn x_range(min: f64, max: f64) -> Self {
        Limit::axes(AxisLimit::range(min, max), AxisLimit::Free)
    }

    /// Limit only y to `[min, max]`.
    pub fn y_range(min: f64, max: f64) -> Self {
        Limit::axes(AxisLimit::Free, AxisLimit::range(min, max))
    }

    pub fn within(element: ElementId) -> Self {
        Limit::Element(element)
    }

    /// Infallible custom limit.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(Position, Position) -> Position + 'static,
    {
        Limit::Custom(CustomLimit(Rc::new(move |candidate, origin| {
            Ok(f(candidate, origin))
        })))
    }

    /// Custom limit whose errors propagate out of the event path.
    pub fn try_custom<F>(f: F) -> Self
    where
        F: Fn(Position, Position) -> anyhow::Result<Position> + 'static,
    {
        Limit::Custom(CustomLimit(Rc::new(f)))
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Limit::Unbounded)
    }

    /// Collapse variants that cannot constrain anything.
    pub fn normalized(self) -> Self {
        match self {
            Limit::Axes {
                x: AxisLimit::Free,
                y: AxisLimit::Free,
            } => Limit::Unbounded,
            other => other,
        }
    }

    /// Resolve `candidate` for a drag that started at `origin`.
    ///
    /// `dragged` is the element being moved; its size matters for
    /// element-bounded limits. Only a fallible custom limit can fail.
    pub fn resolve<L: Layout + ?Sized>(
        &self,
        candidate: Position,
        origin: Position,
        layout: &L,
        dragged: ElementId,
    ) -> DragResult<Position> {
        match self {
            Limit::Unbounded => Ok(candidate),
            Limit::Axes { x, y } => Ok(Position::new(x.apply(candidate.x), y.apply(candidate.y))),
            Limit::Element(bounds) => Ok(resolve_within(candidate, layout, *bounds, dragged)),
            Limit::Custom(f) => f.call(candidate, origin).map_err(DragError::Limit),
        }
    }

    /// Serializable form. `None` means `null` in JSON, which is also all a
    /// custom function can be written as.
    pub fn to_spec(&self) -> Option<LimitSpec> {
        match self {
            Limit::Unbounded => None,
            Limit::Axes { x, y } => Some(LimitSpec::Axes {
                x: AxisSpec::from_axis(x),
                y: AxisSpec::from_axis(y),
            }),
            Limit::Element(element) => Some(LimitSpec::Element { element: *element }),
            Limit::Custom(_) => None,
        }
    }
}

fn resolve_within<L: Layout + ?Sized>(
    candidate: Position,
    layout: &L,
    bounds: ElementId,
    dragged: ElementId,
) -> Position {
    let (Some(outer), Some(inner)) = (layout.bounding_rect(bounds), layout.bounding_rect(dragged))
    else {
        debug!(%bounds, %dragged, "Bounding rect unavailable, leaving candidate unbounded");
        return candidate;
    };
    clamp_into(candidate, inner, outer)
}

/// Clamp the top-left corner of a box of `inner`'s size so it stays in `outer`.
pub fn clamp_into(candidate: Position, inner: Rect, outer: Rect) -> Position {
    Position::new(
        clamp_axis(candidate.x, outer.left, outer.right() - inner.width),
        clamp_axis(candidate.y, outer.top, outer.bottom() - inner.height),
    )
}

// ============================================================================
// Serialized Form
// ============================================================================

/// One axis of a JSON limit: a fixed number or a `[min, max]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisSpec {
    Fixed(f64),
    Range([f64; 2]),
}

impl AxisSpec {
    fn from_axis(axis: &AxisLimit) -> Option<Self> {
        match *axis {
            AxisLimit::Free => None,
            AxisLimit::Range { min, max } => Some(AxisSpec::Range([min, max])),
            AxisLimit::Fixed(v) => Some(AxisSpec::Fixed(v)),
        }
    }

    fn to_axis(spec: Option<Self>) -> AxisLimit {
        match spec {
            None => AxisLimit::Free,
            Some(AxisSpec::Fixed(v)) => AxisLimit::Fixed(v),
            Some(AxisSpec::Range([min, max])) => AxisLimit::Range { min, max },
        }
    }
}

/// JSON form of [`Limit`]. Custom functions have no JSON form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LimitSpec {
    Element {
        element: ElementId,
    },
    Axes {
        #[serde(default)]
        x: Option<AxisSpec>,
        #[serde(default)]
        y: Option<AxisSpec>,
    },
}

impl From<LimitSpec> for Limit {
    fn from(spec: LimitSpec) -> Self {
        match spec {
            LimitSpec::Element { element } => Limit::Element(element),
            LimitSpec::Axes { x: None, y: None } => {
                warn!("Limit object sets neither x nor y, treating as unbounded");
                Limit::Unbounded
            }
            LimitSpec::Axes { x, y } => {
                Limit::axes(AxisSpec::to_axis(x), AxisSpec::to_axis(y)).normalized()
            }
        }
    }
}

/// `Option<LimitSpec>` is how a limit appears in settings: `null` is unbounded.
pub fn limit_from_spec(spec: Option<LimitSpec>) -> Limit {
    spec.map(Limit::from).unwrap_or_default()
}
