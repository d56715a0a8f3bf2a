//! Draggable configuration.
//!
//! [`DragOptions`] is the live configuration owned by a draggable. Its
//! data-only part round-trips through JSON as [`DragSettings`]; closures
//! (filter, custom limit, observers) can only be set from code.
//!
//! Changes after construction go through [`OptionsUpdate`], a partial record
//! with one optional field per option. Unknown keys in a JSON update are
//! rejected rather than ignored.

use crate::constants::{
    DEFAULT_GRID, DEFAULT_SET_CURSOR, DEFAULT_SET_POSITION, DEFAULT_SMOOTH_DRAG,
    DEFAULT_THRESHOLD, DEFAULT_USE_GPU,
};
use crate::error::{DragError, DragResult};
use crate::host::PointerEvent;
use crate::limit::{Limit, LimitSpec, limit_from_spec};
use crate::types::{ElementId, Position};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::rc::Rc;

// ============================================================================
// Closures
// ============================================================================

/// Payload passed to drag observers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEvent {
    /// The dragged element
    pub element: ElementId,
    /// Position after this step
    pub position: Position,
    /// Pointer event that caused the notification
    pub pointer: PointerEvent,
}

impl DragEvent {
    #[inline]
    pub fn x(&self) -> f64 {
        self.position.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.position.y
    }
}

/// Observer for drag start, move and end.
#[derive(Clone)]
pub struct DragCallback(Rc<dyn Fn(&DragEvent) -> anyhow::Result<()>>);

impl DragCallback {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&DragEvent) -> anyhow::Result<()> + 'static,
    {
        Self(Rc::new(f))
    }

    pub fn call(&self, event: &DragEvent) -> anyhow::Result<()> {
        (self.0)(event)
    }
}

impl fmt::Debug for DragCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DragCallback(..)")
    }
}

/// Predicate over a pointer-down target; `true` suppresses the drag.
#[derive(Clone)]
pub struct TargetFilter(Rc<dyn Fn(ElementId) -> bool>);

impl TargetFilter {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(ElementId) -> bool + 'static,
    {
        Self(Rc::new(f))
    }

    pub fn rejects(&self, target: ElementId) -> bool {
        (self.0)(target)
    }
}

impl fmt::Debug for TargetFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TargetFilter(..)")
    }
}

// ============================================================================
// DragOptions
// ============================================================================

/// Full configuration of one draggable.
#[derive(Debug, Clone)]
pub struct DragOptions {
    /// Snap step per axis; 0 disables snapping
    pub grid: f64,
    /// Sub-element that must receive the pointer-down; `None` = whole element
    pub handle: Option<ElementId>,
    pub filter_target: Option<TargetFilter>,
    pub limit: Limit,
    /// Pointer travel (px) before a drag starts
    pub threshold: f64,
    pub set_cursor: bool,
    pub set_position: bool,
    /// Snap only on release
    pub smooth_drag: bool,
    pub use_gpu: bool,
    pub on_drag: Option<DragCallback>,
    pub on_drag_start: Option<DragCallback>,
    pub on_drag_end: Option<DragCallback>,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self {
            grid: DEFAULT_GRID,
            handle: None,
            filter_target: None,
            limit: Limit::Unbounded,
            threshold: DEFAULT_THRESHOLD,
            set_cursor: DEFAULT_SET_CURSOR,
            set_position: DEFAULT_SET_POSITION,
            smooth_drag: DEFAULT_SMOOTH_DRAG,
            use_gpu: DEFAULT_USE_GPU,
            on_drag: None,
            on_drag_start: None,
            on_drag_end: None,
        }
    }
}

impl DragOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grid(mut self, grid: f64) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_handle(mut self, handle: ElementId) -> Self {
        self.handle = Some(handle);
        self
    }

    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(ElementId) -> bool + 'static,
    {
        self.filter_target = Some(TargetFilter::new(filter));
        self
    }

    pub fn with_limit(mut self, limit: Limit) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_set_cursor(mut self, set_cursor: bool) -> Self {
        self.set_cursor = set_cursor;
        self
    }

    pub fn with_set_position(mut self, set_position: bool) -> Self {
        self.set_position = set_position;
        self
    }

    pub fn with_smooth_drag(mut self, smooth_drag: bool) -> Self {
        self.smooth_drag = smooth_drag;
        self
    }

    pub fn with_use_gpu(mut self, use_gpu: bool) -> Self {
        self.use_gpu = use_gpu;
        self
    }

    pub fn on_drag<F>(mut self, f: F) -> Self
    where
        F: Fn(&DragEvent) -> anyhow::Result<()> + 'static,
    {
        self.on_drag = Some(DragCallback::new(f));
        self
    }

    pub fn on_drag_start<F>(mut self, f: F) -> Self
    where
        F: Fn(&DragEvent) -> anyhow::Result<()> + 'static,
    {
        self.on_drag_start = Some(DragCallback::new(f));
        self
    }

    pub fn on_drag_end<F>(mut self, f: F) -> Self
    where
        F: Fn(&DragEvent) -> anyhow::Result<()> + 'static,
    {
        self.on_drag_end = Some(DragCallback::new(f));
        self
    }

    /// Check numeric options and normalize the limit.
    pub fn validated(mut self) -> DragResult<Self> {
        validate_grid(self.grid)?;
        validate_threshold(self.threshold)?;
        self.limit = self.limit.normalized();
        Ok(self)
    }

    /// Parse options from a JSON [`DragSettings`] document.
    pub fn from_json(json: &str) -> DragResult<Self> {
        let settings: DragSettings = serde_json::from_str(json)?;
        Ok(settings.into())
    }

    /// Load options from a JSON settings file.
    pub fn load(path: impl AsRef<Path>) -> DragResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Data-only snapshot of these options.
    pub fn settings(&self) -> DragSettings {
        DragSettings::from(self)
    }

    /// Apply a partial update. Nothing changes if any value is invalid.
    pub fn apply(&mut self, update: OptionsUpdate) -> DragResult<()> {
        if let Some(grid) = update.grid {
            validate_grid(grid)?;
        }
        if let Some(threshold) = update.threshold {
            validate_threshold(threshold)?;
        }

        let OptionsUpdate {
            grid,
            handle,
            limit,
            threshold,
            set_cursor,
            set_position,
            smooth_drag,
            use_gpu,
            filter_target,
            on_drag,
            on_drag_start,
            on_drag_end,
        } = update;

        if let Some(grid) = grid {
            self.grid = grid;
        }
        if let Some(handle) = handle {
            self.handle = handle;
        }
        if let Some(limit) = limit {
            self.limit = limit.normalized();
        }
        if let Some(threshold) = threshold {
            self.threshold = threshold;
        }
        if let Some(set_cursor) = set_cursor {
            self.set_cursor = set_cursor;
        }
        if let Some(set_position) = set_position {
            self.set_position = set_position;
        }
        if let Some(smooth_drag) = smooth_drag {
            self.smooth_drag = smooth_drag;
        }
        if let Some(use_gpu) = use_gpu {
            self.use_gpu = use_gpu;
        }
        if let Some(filter_target) = filter_target {
            self.filter_target = filter_target;
        }
        if let Some(on_drag) = on_drag {
            self.on_drag = on_drag;
        }
        if let Some(on_drag_start) = on_drag_start {
            self.on_drag_start = on_drag_start;
        }
        if let Some(on_drag_end) = on_drag_end {
            self.on_drag_end = on_drag_end;
        }
        Ok(())
    }
}

fn validate_grid(grid: f64) -> DragResult<()> {
    if !grid.is_finite() || grid < 0.0 {
        return Err(DragError::invalid_option("grid", format!("{grid} is not a finite value >= 0")));
    }
    Ok(())
}

fn validate_threshold(threshold: f64) -> DragResult<()> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(DragError::invalid_option(
            "threshold",
            format!("{threshold} is not a finite value >= 0"),
        ));
    }
    Ok(())
}

// ============================================================================
// DragSettings (JSON)
// ============================================================================

/// The JSON-expressible part of [`DragOptions`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DragSettings {
    pub grid: f64,
    pub handle: Option<ElementId>,
    pub limit: Option<LimitSpec>,
    pub threshold: f64,
    pub set_cursor: bool,
    pub set_position: bool,
    pub smooth_drag: bool,
    pub use_gpu: bool,
}

impl Default for DragSettings {
    fn default() -> Self {
        DragSettings::from(&DragOptions::default())
    }
}

impl From<&DragOptions> for DragSettings {
    fn from(options: &DragOptions) -> Self {
        Self {
            grid: options.grid,
            handle: options.handle,
            limit: options.limit.to_spec(),
            threshold: options.threshold,
            set_cursor: options.set_cursor,
            set_position: options.set_position,
            smooth_drag: options.smooth_drag,
            use_gpu: options.use_gpu,
        }
    }
}

impl From<DragSettings> for DragOptions {
    fn from(settings: DragSettings) -> Self {
        Self {
            grid: settings.grid,
            handle: settings.handle,
            limit: limit_from_spec(settings.limit),
            threshold: settings.threshold,
            set_cursor: settings.set_cursor,
            set_position: settings.set_position,
            smooth_drag: settings.smooth_drag,
            use_gpu: settings.use_gpu,
            ..Self::default()
        }
    }
}

// ============================================================================
// OptionsUpdate
// ============================================================================

/// Partial configuration change. `None` fields are left alone.
///
/// Nullable options (`handle`, `limit`, closures) use a nested `Option` so an
/// update can clear them: `handle: Some(None)` removes the handle.
#[derive(Debug, Clone, Default)]
pub struct OptionsUpdate {
    pub grid: Option<f64>,
    pub handle: Option<Option<ElementId>>,
    pub limit: Option<Limit>,
    pub threshold: Option<f64>,
    pub set_cursor: Option<bool>,
    pub set_position: Option<bool>,
    pub smooth_drag: Option<bool>,
    pub use_gpu: Option<bool>,
    pub filter_target: Option<Option<TargetFilter>>,
    pub on_drag: Option<Option<DragCallback>>,
    pub on_drag_start: Option<Option<DragCallback>>,
    pub on_drag_end: Option<Option<DragCallback>>,
}

/// Wire form of an update. Present keys are applied, `null` clears.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct UpdateWire {
    #[serde(default)]
    grid: Option<f64>,
    #[serde(default, deserialize_with = "present")]
    handle: Option<Option<ElementId>>,
    #[serde(default, deserialize_with = "present")]
    limit: Option<Option<LimitSpec>>,
    #[serde(default)]
    threshold: Option<f64>,
    #[serde(default)]
    set_cursor: Option<bool>,
    #[serde(default)]
    set_position: Option<bool>,
    #[serde(default)]
    smooth_drag: Option<bool>,
    #[serde(default)]
    use_gpu: Option<bool>,
}

/// Distinguish a present `null` (`Some(None)`) from an absent key (`None`).
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

const OPTION_KEYS: &[&str] = &[
    "grid",
    "handle",
    "limit",
    "threshold",
    "set_cursor",
    "set_position",
    "smooth_drag",
    "use_gpu",
];

impl OptionsUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grid(mut self, grid: f64) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn handle(mut self, handle: Option<ElementId>) -> Self {
        self.handle = Some(handle);
        self
    }

    pub fn limit(mut self, limit: Limit) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn set_cursor(mut self, set_cursor: bool) -> Self {
        self.set_cursor = Some(set_cursor);
        self
    }

    pub fn set_position(mut self, set_position: bool) -> Self {
        self.set_position = Some(set_position);
        self
    }

    pub fn smooth_drag(mut self, smooth_drag: bool) -> Self {
        self.smooth_drag = Some(smooth_drag);
        self
    }

    pub fn use_gpu(mut self, use_gpu: bool) -> Self {
        self.use_gpu = Some(use_gpu);
        self
    }

    pub fn filter_target(mut self, filter: Option<TargetFilter>) -> Self {
        self.filter_target = Some(filter);
        self
    }

    pub fn on_drag(mut self, callback: Option<DragCallback>) -> Self {
        self.on_drag = Some(callback);
        self
    }

    pub fn on_drag_start(mut self, callback: Option<DragCallback>) -> Self {
        self.on_drag_start = Some(callback);
        self
    }

    pub fn on_drag_end(mut self, callback: Option<DragCallback>) -> Self {
        self.on_drag_end = Some(callback);
        self
    }

    /// Parse a JSON object of option keys. Unknown keys are an error.
    pub fn from_json(json: &str) -> DragResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if let Some(object) = value.as_object() {
            if let Some(unknown) = object.keys().find(|key| !OPTION_KEYS.contains(&key.as_str())) {
                return Err(DragError::UnknownOption(unknown.clone()));
            }
        }
        let wire: UpdateWire = serde_json::from_value(value)?;
        Ok(Self {
            grid: wire.grid,
            handle: wire.handle,
            limit: wire.limit.map(limit_from_spec),
            threshold: wire.threshold,
            set_cursor: wire.set_cursor,
            set_position: wire.set_position,
            smooth_drag: wire.smooth_drag,
            use_gpu: wire.use_gpu,
            ..Self::default()
        })
    }

    /// Whether this update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.grid.is_none()
            && self.handle.is_none()
            && self.limit.is_none()
            && self.threshold.is_none()
            && self.set_cursor.is_none()
            && self.set_position.is_none()
            && self.smooth_drag.is_none()
            && self.use_gpu.is_none()
            && self.filter_target.is_none()
            && self.on_drag.is_none()
            && self.on_drag_start.is_none()
            && self.on_drag_end.is_none()
    }
}
