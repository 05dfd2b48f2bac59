//! Snapping resolver: aligns candidate positions to other objects' geometry,
//! the canvas center, or a grid, and produces the guide lines the render
//! layer draws while a snap is active.
//!
//! Stateless per call. The X and Y axes resolve independently; on each axis
//! an object snap strictly beats a grid snap and the two never blend.
//! Thresholds are in canvas units — callers convert from screen pixels via
//! the camera before asking.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use crate::bounds::{BoundingBox, ObjectBounds, ObjectId};
use crate::camera::Point;
use crate::consts::{DEFAULT_GRID_SIZE, DEFAULT_SNAP_THRESHOLD_PX, GUIDE_PADDING};

/// Snap behavior configuration.
#[derive(Debug, Clone, Copy)]
pub struct SnapConfig {
    /// Master switch; when false no snapping happens at all.
    pub enabled: bool,
    /// Snap to grid lines when no object snap matched on an axis.
    pub snap_to_grid: bool,
    /// Grid spacing in canvas units.
    pub grid_size: f64,
    /// Snap to other objects' corners, edge midpoints, and centers.
    pub snap_to_objects: bool,
    /// Maximum snap distance in canvas units.
    pub threshold: f64,
    /// Emit guide geometry for applied snaps.
    pub show_guides: bool,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            snap_to_grid: false,
            grid_size: DEFAULT_GRID_SIZE,
            snap_to_objects: true,
            threshold: DEFAULT_SNAP_THRESHOLD_PX,
            show_guides: true,
        }
    }
}

/// What a snapped coordinate aligned with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapPointKind {
    Grid,
    ObjectCenter,
    ObjectEdge,
    ObjectCorner,
    CanvasCenter,
}

/// A candidate alignment target. Ephemeral — generated per query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapPoint {
    pub x: f64,
    pub y: f64,
    pub kind: SnapPointKind,
    /// The object that contributed this point, when there is one.
    pub source: Option<ObjectId>,
}

/// Guide line orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A transient alignment guide for the render layer, discarded each frame.
///
/// `position` is the shared coordinate (x for vertical guides, y for
/// horizontal); `start`/`end` span the guide along the other axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapGuide {
    pub orientation: Orientation,
    pub position: f64,
    pub start: f64,
    pub end: f64,
    pub kind: SnapPointKind,
}

/// Result of snapping a single point.
#[derive(Debug, Clone)]
pub struct PointSnap {
    pub point: Point,
    pub snapped_x: bool,
    pub snapped_y: bool,
    pub matched: Vec<SnapPoint>,
    pub guides: Vec<SnapGuide>,
}

/// Result of snapping a moving bounding box.
#[derive(Debug, Clone)]
pub struct BoundsSnap {
    pub bounds: BoundingBox,
    pub snapped_x: bool,
    pub snapped_y: bool,
    pub matched: Vec<SnapPoint>,
    pub guides: Vec<SnapGuide>,
}

/// The nine canonical points of a box: corners, edge midpoints, center.
fn canonical_points(bounds: &BoundingBox, source: Option<ObjectId>) -> [SnapPoint; 9] {
    let corners = bounds.corners();
    let edges = bounds.edge_midpoints();
    let center = bounds.center();
    let mk = |p: Point, kind: SnapPointKind| SnapPoint { x: p.x, y: p.y, kind, source };
    [
        mk(corners[0], SnapPointKind::ObjectCorner),
        mk(corners[1], SnapPointKind::ObjectCorner),
        mk(corners[2], SnapPointKind::ObjectCorner),
        mk(corners[3], SnapPointKind::ObjectCorner),
        mk(edges[0], SnapPointKind::ObjectEdge),
        mk(edges[1], SnapPointKind::ObjectEdge),
        mk(edges[2], SnapPointKind::ObjectEdge),
        mk(edges[3], SnapPointKind::ObjectEdge),
        mk(center, SnapPointKind::ObjectCenter),
    ]
}

/// Best object-derived target per axis for a single dragged point.
struct AxisBest {
    distance: f64,
    target: SnapPoint,
}

fn consider(best: &mut Option<AxisBest>, distance: f64, threshold: f64, target: SnapPoint) {
    if distance > threshold {
        return;
    }
    if best.as_ref().is_none_or(|b| distance < b.distance) {
        *best = Some(AxisBest { distance, target });
    }
}

/// Nearest grid line to `value`, if within threshold.
fn grid_candidate(value: f64, grid_size: f64, threshold: f64) -> Option<f64> {
    if grid_size <= 0.0 {
        return None;
    }
    let line = (value / grid_size).round() * grid_size;
    ((line - value).abs() <= threshold).then_some(line)
}

/// Guide spanning from the snapped coordinate to the matched target,
/// padded on each end. An X snap yields a vertical guide.
fn guide_for(axis_is_x: bool, target: &SnapPoint, snapped: Point) -> SnapGuide {
    if axis_is_x {
        SnapGuide {
            orientation: Orientation::Vertical,
            position: target.x,
            start: snapped.y.min(target.y) - GUIDE_PADDING,
            end: snapped.y.max(target.y) + GUIDE_PADDING,
            kind: target.kind,
        }
    } else {
        SnapGuide {
            orientation: Orientation::Horizontal,
            position: target.y,
            start: snapped.x.min(target.x) - GUIDE_PADDING,
            end: snapped.x.max(target.x) + GUIDE_PADDING,
            kind: target.kind,
        }
    }
}

/// Snap a single point against a catalog of other objects' bounds, an
/// optional canvas-viewport center, and the grid.
///
/// Each axis resolves independently: the nearest object-derived candidate
/// within threshold wins; the grid is consulted only for axes with no object
/// match. Entries whose id appears in `exclude` contribute no candidates.
#[must_use]
pub fn snap_point(
    point: Point,
    catalog: &[ObjectBounds],
    exclude: &[ObjectId],
    viewport_center: Option<Point>,
    config: &SnapConfig,
) -> PointSnap {
    let mut out = PointSnap {
        point,
        snapped_x: false,
        snapped_y: false,
        matched: Vec::new(),
        guides: Vec::new(),
    };
    if !config.enabled {
        return out;
    }

    let mut best_x: Option<AxisBest> = None;
    let mut best_y: Option<AxisBest> = None;

    if config.snap_to_objects {
        for entry in catalog {
            if exclude.contains(&entry.id) {
                continue;
            }
            for target in canonical_points(&entry.bounds, Some(entry.id)) {
                consider(&mut best_x, (target.x - point.x).abs(), config.threshold, target);
                consider(&mut best_y, (target.y - point.y).abs(), config.threshold, target);
            }
        }
    }

    if let Some(center) = viewport_center {
        let target = SnapPoint {
            x: center.x,
            y: center.y,
            kind: SnapPointKind::CanvasCenter,
            source: None,
        };
        consider(&mut best_x, (target.x - point.x).abs(), config.threshold, target);
        consider(&mut best_y, (target.y - point.y).abs(), config.threshold, target);
    }

    if let Some(best) = best_x {
        out.point.x = best.target.x;
        out.snapped_x = true;
        if config.show_guides {
            out.guides.push(guide_for(true, &best.target, out.point));
        }
        out.matched.push(best.target);
    } else if config.snap_to_grid {
        if let Some(line) = grid_candidate(point.x, config.grid_size, config.threshold) {
            out.point.x = line;
            out.snapped_x = true;
            out.matched.push(SnapPoint {
                x: line,
                y: point.y,
                kind: SnapPointKind::Grid,
                source: None,
            });
        }
    }

    if let Some(best) = best_y {
        out.point.y = best.target.y;
        out.snapped_y = true;
        if config.show_guides {
            out.guides.push(guide_for(false, &best.target, out.point));
        }
        out.matched.push(best.target);
    } else if config.snap_to_grid {
        if let Some(line) = grid_candidate(point.y, config.grid_size, config.threshold) {
            out.point.y = line;
            out.snapped_y = true;
            out.matched.push(SnapPoint {
                x: out.point.x,
                y: line,
                kind: SnapPointKind::Grid,
                source: None,
            });
        }
    }

    out
}

/// Best (drag point, target) pair per axis for a moving box.
struct AxisPairBest {
    distance: f64,
    delta: f64,
    drag: SnapPoint,
    target: SnapPoint,
}

fn consider_pair(
    best: &mut Option<AxisPairBest>,
    threshold: f64,
    delta: f64,
    drag: SnapPoint,
    target: SnapPoint,
) {
    let distance = delta.abs();
    if distance > threshold {
        return;
    }
    if best.as_ref().is_none_or(|b| distance < b.distance) {
        *best = Some(AxisPairBest { distance, delta, drag, target });
    }
}

/// Snap a moving bounding box (a whole-selection drag, not a resize).
///
/// The drag points are the box's own nine canonical points. Per axis, every
/// (drag point, target point) pair is evaluated and the globally closest
/// within-threshold pair wins; its delta shifts the whole box origin. With no
/// object match on an axis, the grid is consulted with the box's edge and
/// center values as drag candidates.
#[must_use]
pub fn snap_bounds(
    bounds: &BoundingBox,
    catalog: &[ObjectBounds],
    exclude: &[ObjectId],
    config: &SnapConfig,
) -> BoundsSnap {
    let mut out = BoundsSnap {
        bounds: *bounds,
        snapped_x: false,
        snapped_y: false,
        matched: Vec::new(),
        guides: Vec::new(),
    };
    if !config.enabled {
        return out;
    }

    let drag_points = canonical_points(bounds, None);
    let mut best_x: Option<AxisPairBest> = None;
    let mut best_y: Option<AxisPairBest> = None;

    if config.snap_to_objects {
        for entry in catalog {
            if exclude.contains(&entry.id) {
                continue;
            }
            for target in canonical_points(&entry.bounds, Some(entry.id)) {
                for drag in drag_points {
                    consider_pair(&mut best_x, config.threshold, target.x - drag.x, drag, target);
                    consider_pair(&mut best_y, config.threshold, target.y - drag.y, drag, target);
                }
            }
        }
    }

    if best_x.is_none() && config.snap_to_grid {
        for drag in drag_points {
            if let Some(line) = grid_candidate(drag.x, config.grid_size, config.threshold) {
                let target = SnapPoint {
                    x: line,
                    y: drag.y,
                    kind: SnapPointKind::Grid,
                    source: None,
                };
                consider_pair(&mut best_x, config.threshold, line - drag.x, drag, target);
            }
        }
    }
    if best_y.is_none() && config.snap_to_grid {
        for drag in drag_points {
            if let Some(line) = grid_candidate(drag.y, config.grid_size, config.threshold) {
                let target = SnapPoint {
                    x: drag.x,
                    y: line,
                    kind: SnapPointKind::Grid,
                    source: None,
                };
                consider_pair(&mut best_y, config.threshold, line - drag.y, drag, target);
            }
        }
    }

    if let Some(best) = best_x {
        out.bounds.x += best.delta;
        out.snapped_x = true;
        if config.show_guides && best.target.kind != SnapPointKind::Grid {
            let snapped_drag = Point::new(best.drag.x + best.delta, best.drag.y);
            out.guides.push(guide_for(true, &best.target, snapped_drag));
        }
        out.matched.push(best.target);
    }
    if let Some(best) = best_y {
        out.bounds.y += best.delta;
        out.snapped_y = true;
        if config.show_guides && best.target.kind != SnapPointKind::Grid {
            let snapped_drag = Point::new(best.drag.x, best.drag.y + best.delta);
            out.guides.push(guide_for(false, &best.target, snapped_drag));
        }
        out.matched.push(best.target);
    }

    out
}
