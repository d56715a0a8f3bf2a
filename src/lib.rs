//! Pointer-driven dragging for elements of a retained render tree.
//!
//! A [`Draggable`] turns pointer down/move/up on one element into position
//! updates, with optional grid snapping, a drag-start threshold, a handle
//! sub-element, and limits (per-axis ranges, fixed axes, a bounding element,
//! or a custom function). Observers are told when a drag starts, moves and
//! ends.
//!
//! The controller talks to its environment through the [`Host`] trait.
//! [`Scene`] is a headless host with R-tree hit testing, used by the tests and
//! by the `drag-replay` tool.

pub mod constants;
pub mod draggable;
pub mod error;
pub mod host;
pub mod input;
pub mod limit;
pub mod options;
pub mod perf;
pub mod replay;
pub mod scene;
pub mod snap;
pub mod spatial_index;
pub mod types;

pub use draggable::Draggable;
pub use error::{DragError, DragResult, HostError, Hook};
pub use host::{Host, Layout, PointerEvent, PointerPhase};
pub use input::DragPhase;
pub use limit::{AxisLimit, Limit};
pub use options::{DragEvent, DragOptions, DragSettings, OptionsUpdate};
pub use scene::Scene;
pub use types::{ElementId, Position, Rect};
