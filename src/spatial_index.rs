//! Spatial Index Module
//!
//! R-tree over element rectangles, used by the headless scene to find the
//! element under a pointer in O(log n).

use crate::types::{ElementId, Position, Rect};
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

/// An element's bounding box plus its paint order.
#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry {
    pub element: ElementId,
    /// Higher values are painted on top
    pub order: u64,
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl SpatialEntry {
    pub fn new(element: ElementId, order: u64, rect: Rect) -> Self {
        Self {
            element,
            order,
            min_x: rect.left,
            min_y: rect.top,
            max_x: rect.right(),
            max_y: rect.bottom(),
        }
    }

    #[inline]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min_x, self.min_y], [self.max_x, self.max_y])
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.element == other.element
    }
}

/// Spatial index over element rectangles.
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<ElementId, SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            entries: HashMap::new(),
        }
    }

    /// Insert or replace the entry for `element`.
    pub fn insert(&mut self, element: ElementId, order: u64, rect: Rect) {
        if let Some(old_entry) = self.entries.remove(&element) {
            self.tree.remove(&old_entry);
        }

        let entry = SpatialEntry::new(element, order, rect);
        self.tree.insert(entry);
        self.entries.insert(element, entry);
    }

    pub fn remove(&mut self, element: ElementId) -> bool {
        if let Some(entry) = self.entries.remove(&element) {
            self.tree.remove(&entry);
            true
        } else {
            false
        }
    }

    /// Move an entry, keeping its paint order.
    pub fn update(&mut self, element: ElementId, rect: Rect) {
        let order = self.entries.get(&element).map(|e| e.order).unwrap_or_default();
        self.insert(element, order, rect);
    }

    /// All entries containing `point`.
    pub fn query_point(&self, point: Position) -> Vec<SpatialEntry> {
        let point_envelope = AABB::from_point([point.x, point.y]);

        self.tree
            .locate_in_envelope_intersecting(&point_envelope)
            .filter(|entry| entry.contains_point(point.x, point.y))
            .copied()
            .collect()
    }

    /// The entry painted on top at `point`, if any.
    pub fn topmost_at(&self, point: Position) -> Option<ElementId> {
        self.query_point(point)
            .into_iter()
            .max_by_key(|entry| entry.order)
            .map(|entry| entry.element)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
