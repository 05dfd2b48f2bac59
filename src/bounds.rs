//! Axis-aligned geometry shared across the engine.
//!
//! `BoundingBox` is the canvas-space rectangle used for selection extents,
//! snap catalogs, and spatial-index entries. `ObjectBounds` pairs a box with
//! the id of the host-owned object it describes; the engine never owns the
//! objects themselves, only their bounds.

#[cfg(test)]
#[path = "bounds_test.rs"]
mod bounds_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;

/// Unique identifier for an object owned by the host authority.
pub type ObjectId = Uuid;

/// Axis-aligned bounding box in canvas space. `width` and `height` are >= 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Build a normalized box from two opposite corners in any order.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether `point` lies inside the box (edges inclusive).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// True AABB intersection test. Touching edges count as intersecting.
    #[must_use]
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        !(self.right() < other.x
            || other.right() < self.x
            || self.bottom() < other.y
            || other.bottom() < self.y)
    }

    /// Smallest box covering both `self` and `other` (min of mins, max of maxes).
    #[must_use]
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        BoundingBox {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }

    /// The box shifted by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> BoundingBox {
        BoundingBox { x: self.x + dx, y: self.y + dy, ..*self }
    }

    /// The four corners, clockwise from top-left.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.right(), self.y),
            Point::new(self.right(), self.bottom()),
            Point::new(self.x, self.bottom()),
        ]
    }

    /// The four edge midpoints, clockwise from the top edge.
    #[must_use]
    pub fn edge_midpoints(&self) -> [Point; 4] {
        let c = self.center();
        [
            Point::new(c.x, self.y),
            Point::new(self.right(), c.y),
            Point::new(c.x, self.bottom()),
            Point::new(self.x, c.y),
        ]
    }
}

/// A spatial-index entry / snap-catalog element: an object id plus its
/// current bounds. Weak reference by id — the index holds no lifecycle
/// authority over the object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectBounds {
    pub id: ObjectId,
    pub bounds: BoundingBox,
}

impl ObjectBounds {
    #[must_use]
    pub fn new(id: ObjectId, bounds: BoundingBox) -> Self {
        Self { id, bounds }
    }
}
