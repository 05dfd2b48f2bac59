//! Selection state and the move/resize/rotate transform machine.
//!
//! The controller owns selection membership, the selection's bounding box and
//! rotation, and the transient drag state. Handle geometry is derived from
//! the current bounds on every read — never cached — so there is no screen
//! geometry to invalidate. The drag state is a single `Option<TransformState>`:
//! `None` is the one representation of "no active drag".

#[cfg(test)]
#[path = "select_test.rs"]
mod select_test;

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::bounds::{BoundingBox, ObjectId};
use crate::camera::{Camera, Point};
use crate::consts::{
    HANDLE_HIT_SCALE, HANDLE_SIZE_PX, MIN_OBJECT_SIZE, ROTATE_HANDLE_OFFSET_PX,
    ROTATION_SNAP_STEP,
};

/// Anchor position for the eight resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAnchor {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeAnchor {
    pub const ALL: [ResizeAnchor; 8] = [
        Self::N,
        Self::Ne,
        Self::E,
        Self::Se,
        Self::S,
        Self::Sw,
        Self::W,
        Self::Nw,
    ];

    /// Canvas-space position of this anchor on `bounds`.
    #[must_use]
    pub fn position(self, bounds: &BoundingBox) -> Point {
        let c = bounds.center();
        match self {
            Self::N => Point::new(c.x, bounds.y),
            Self::Ne => Point::new(bounds.right(), bounds.y),
            Self::E => Point::new(bounds.right(), c.y),
            Self::Se => Point::new(bounds.right(), bounds.bottom()),
            Self::S => Point::new(c.x, bounds.bottom()),
            Self::Sw => Point::new(bounds.x, bounds.bottom()),
            Self::W => Point::new(bounds.x, c.y),
            Self::Nw => Point::new(bounds.x, bounds.y),
        }
    }

    /// CSS cursor for this anchor.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::Se | Self::Nw => "nwse-resize",
        }
    }

    /// Whether this anchor moves the west edge (so the east edge is fixed).
    fn moves_west_edge(self) -> bool {
        matches!(self, Self::Nw | Self::W | Self::Sw)
    }

    /// Whether this anchor moves the north edge (so the south edge is fixed).
    fn moves_north_edge(self) -> bool {
        matches!(self, Self::Nw | Self::N | Self::Ne)
    }
}

/// A draggable control on the selection: one of the eight resize anchors or
/// the rotate handle above the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Resize(ResizeAnchor),
    Rotate,
}

impl Handle {
    /// CSS cursor for this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Resize(anchor) => anchor.cursor(),
            Self::Rotate => "grab",
        }
    }
}

/// A handle with its derived screen-space position and cursor hint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandlePlacement {
    pub handle: Handle,
    pub screen: Point,
    pub cursor: &'static str,
}

/// What part of the selection a point hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionHit {
    Handle(Handle),
    Body,
}

/// The operation an active drag performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformOp {
    Move,
    Resize(ResizeAnchor),
    Rotate,
}

/// Transient drag state. Exists only between `start_transform` and
/// `end_transform`/`cancel_transform`. The `original_*` fields are the
/// immutable baseline every update recomputes from.
#[derive(Debug, Clone, Copy)]
pub struct TransformState {
    pub op: TransformOp,
    pub start: Point,
    pub current: Point,
    pub original_bounds: BoundingBox,
    pub original_rotation: f64,
}

/// Geometry committed by `end_transform`, for the host to apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommittedTransform {
    pub previous_bounds: BoundingBox,
    pub previous_rotation: f64,
    pub bounds: BoundingBox,
    pub rotation: f64,
}

/// Selection membership, bounds, rotation, and the transform state machine.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    selected_ids: HashSet<ObjectId>,
    bounds: Option<BoundingBox>,
    rotation: f64,
    /// Sticky aspect-ratio lock; a transient constrain request (shift) is
    /// passed per update on top of this.
    pub aspect_locked: bool,
    transform: Option<TransformState>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ids(&self) -> &HashSet<ObjectId> {
        &self.selected_ids
    }

    #[must_use]
    pub fn contains(&self, id: &ObjectId) -> bool {
        self.selected_ids.contains(id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected_ids.is_empty()
    }

    #[must_use]
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }

    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    #[must_use]
    pub fn transform(&self) -> Option<&TransformState> {
        self.transform.as_ref()
    }

    #[must_use]
    pub fn is_transforming(&self) -> bool {
        self.transform.is_some()
    }

    /// Replace membership and bounds atomically. Rotation resets to zero only
    /// when the selection becomes empty.
    pub fn set_selection(&mut self, ids: Vec<ObjectId>, bounds: Option<BoundingBox>) {
        if !ids.is_empty() && bounds.is_none() {
            warn!(count = ids.len(), "set_selection with ids but no bounds; clearing");
        }
        if ids.is_empty() || bounds.is_none() {
            self.clear();
            return;
        }
        self.selected_ids = ids.into_iter().collect();
        self.bounds = bounds;
        self.transform = None;
    }

    /// Add members, expanding bounds to the union of the prior and new boxes.
    pub fn add_to_selection(&mut self, ids: Vec<ObjectId>, bounds: BoundingBox) {
        if ids.is_empty() {
            return;
        }
        self.selected_ids.extend(ids);
        self.bounds = Some(match self.bounds {
            Some(existing) => existing.union(&bounds),
            None => bounds,
        });
    }

    /// Remove members. Bounds are kept as-is while the selection is
    /// non-empty; an emptied selection resets bounds and rotation.
    pub fn remove_from_selection(&mut self, ids: &[ObjectId]) {
        for id in ids {
            self.selected_ids.remove(id);
        }
        if self.selected_ids.is_empty() {
            self.clear();
        }
    }

    /// Reset to the empty selection.
    pub fn clear(&mut self) {
        self.selected_ids.clear();
        self.bounds = None;
        self.rotation = 0.0;
        self.transform = None;
    }

    /// Begin a drag at `point` (canvas space). `None` starts a move (press
    /// inside the selection body); a handle starts a resize or rotate.
    /// Returns `false` without state change when there is no selection or a
    /// drag is already active.
    pub fn start_transform(&mut self, point: Point, handle: Option<Handle>) -> bool {
        let Some(bounds) = self.bounds else {
            debug!("start_transform ignored: empty selection");
            return false;
        };
        if self.transform.is_some() {
            warn!("start_transform ignored: drag already active");
            return false;
        }

        let op = match handle {
            None => TransformOp::Move,
            Some(Handle::Rotate) => TransformOp::Rotate,
            Some(Handle::Resize(anchor)) => TransformOp::Resize(anchor),
        };
        self.transform = Some(TransformState {
            op,
            start: point,
            current: point,
            original_bounds: bounds,
            original_rotation: self.rotation,
        });
        true
    }

    /// Recompute bounds/rotation from the drag snapshot and the new pointer
    /// position. `constrain` requests aspect lock for resizes and 15-degree
    /// snapping for rotates; moves ignore it.
    pub fn update_transform(&mut self, point: Point, constrain: bool) {
        let aspect_locked = self.aspect_locked;
        let Some(ts) = self.transform.as_mut() else {
            debug!("update_transform ignored: no active drag");
            return;
        };
        ts.current = point;
        let dx = point.x - ts.start.x;
        let dy = point.y - ts.start.y;

        match ts.op {
            TransformOp::Move => {
                self.bounds = Some(ts.original_bounds.translated(dx, dy));
            }
            TransformOp::Resize(anchor) => {
                let locked = aspect_locked || constrain;
                let resized = resize_bounds(&ts.original_bounds, anchor, dx, dy, locked);
                self.bounds = Some(clamp_min_size(resized, &ts.original_bounds, anchor));
            }
            TransformOp::Rotate => {
                let center = ts.original_bounds.center();
                let delta = center.angle_to(point) - center.angle_to(ts.start);
                let mut rotation = ts.original_rotation + delta;
                if constrain {
                    rotation = snap_rotation(rotation);
                }
                self.rotation = rotation;
            }
        }
    }

    /// Commit the drag: the current bounds/rotation become the selection
    /// state and the before/after pair is returned for the host. Without an
    /// active drag this is a no-op diagnostic.
    pub fn end_transform(&mut self) -> Option<CommittedTransform> {
        let Some(ts) = self.transform.take() else {
            warn!("end_transform ignored: no active drag");
            return None;
        };
        let bounds = self.bounds?;
        Some(CommittedTransform {
            previous_bounds: ts.original_bounds,
            previous_rotation: ts.original_rotation,
            bounds,
            rotation: self.rotation,
        })
    }

    /// Abandon the drag and restore the pre-drag snapshot, synchronously and
    /// totally. No notification is produced.
    pub fn cancel_transform(&mut self) {
        let Some(ts) = self.transform.take() else {
            debug!("cancel_transform ignored: no active drag");
            return;
        };
        self.bounds = Some(ts.original_bounds);
        self.rotation = ts.original_rotation;
    }

    /// Derived screen-space handle geometry: the eight resize anchors plus
    /// the rotate handle above the top edge. Empty when nothing is selected.
    #[must_use]
    pub fn handle_placements(&self, camera: &Camera) -> Vec<HandlePlacement> {
        let Some(bounds) = self.bounds else {
            return Vec::new();
        };

        let mut placements: Vec<HandlePlacement> = ResizeAnchor::ALL
            .iter()
            .map(|anchor| {
                let handle = Handle::Resize(*anchor);
                HandlePlacement {
                    handle,
                    screen: camera.canvas_to_screen(anchor.position(&bounds)),
                    cursor: handle.cursor(),
                }
            })
            .collect();

        let top_mid = camera.canvas_to_screen(ResizeAnchor::N.position(&bounds));
        placements.push(HandlePlacement {
            handle: Handle::Rotate,
            screen: Point::new(top_mid.x, top_mid.y - ROTATE_HANDLE_OFFSET_PX),
            cursor: Handle::Rotate.cursor(),
        });
        placements
    }

    /// Hit-test a screen-space point against the selection. Handles take
    /// priority over the body; the body test is axis-aligned containment
    /// against the unrotated bounds. `None` when nothing is selected or
    /// nothing was hit.
    #[must_use]
    pub fn hit_test(&self, screen: Point, camera: &Camera) -> Option<SelectionHit> {
        let bounds = self.bounds?;

        let hit_size = HANDLE_SIZE_PX.max(HANDLE_SIZE_PX / camera.zoom) * HANDLE_HIT_SCALE;
        let half = hit_size / 2.0;
        for placement in self.handle_placements(camera) {
            if (screen.x - placement.screen.x).abs() <= half
                && (screen.y - placement.screen.y).abs() <= half
            {
                return Some(SelectionHit::Handle(placement.handle));
            }
        }

        let canvas = camera.screen_to_canvas(screen);
        if bounds.contains(canvas) {
            return Some(SelectionHit::Body);
        }
        None
    }
}

/// Apply the per-handle resize update to `base`. `dx`/`dy` are the canvas
/// deltas from the drag start. With `aspect_locked`, each handle constrains
/// the result to the base aspect ratio around its fixed edge or center.
#[must_use]
pub fn resize_bounds(
    base: &BoundingBox,
    anchor: ResizeAnchor,
    dx: f64,
    dy: f64,
    aspect_locked: bool,
) -> BoundingBox {
    if !aspect_locked || base.width <= 0.0 || base.height <= 0.0 {
        return match anchor {
            ResizeAnchor::Nw => BoundingBox::new(
                base.x + dx,
                base.y + dy,
                base.width - dx,
                base.height - dy,
            ),
            ResizeAnchor::N => {
                BoundingBox::new(base.x, base.y + dy, base.width, base.height - dy)
            }
            ResizeAnchor::Ne => BoundingBox::new(
                base.x,
                base.y + dy,
                base.width + dx,
                base.height - dy,
            ),
            ResizeAnchor::E => BoundingBox::new(base.x, base.y, base.width + dx, base.height),
            ResizeAnchor::Se => {
                BoundingBox::new(base.x, base.y, base.width + dx, base.height + dy)
            }
            ResizeAnchor::S => BoundingBox::new(base.x, base.y, base.width, base.height + dy),
            ResizeAnchor::Sw => BoundingBox::new(
                base.x + dx,
                base.y,
                base.width - dx,
                base.height + dy,
            ),
            ResizeAnchor::W => {
                BoundingBox::new(base.x + dx, base.y, base.width - dx, base.height)
            }
        };
    }

    let ar = base.width / base.height;
    match anchor {
        ResizeAnchor::Nw => {
            let avg = (dx + dy) / 2.0;
            let width = base.width - avg;
            BoundingBox::new(base.x + avg, base.y + avg / ar, width, width / ar)
        }
        ResizeAnchor::N => {
            let height = base.height - dy;
            let width = height * ar;
            BoundingBox::new(base.x + (base.width - width) / 2.0, base.y + dy, width, height)
        }
        ResizeAnchor::Ne => {
            let avg = (dx - dy) / 2.0;
            let width = base.width + avg;
            let height = width / ar;
            BoundingBox::new(base.x, base.y + base.height - height, width, height)
        }
        ResizeAnchor::E => {
            let width = base.width + dx;
            let height = width / ar;
            BoundingBox::new(base.x, base.y + (base.height - height) / 2.0, width, height)
        }
        ResizeAnchor::Se => {
            let avg = (dx + dy) / 2.0;
            let width = base.width + avg;
            BoundingBox::new(base.x, base.y, width, width / ar)
        }
        ResizeAnchor::S => {
            let height = base.height + dy;
            let width = height * ar;
            BoundingBox::new(base.x + (base.width - width) / 2.0, base.y, width, height)
        }
        ResizeAnchor::Sw => {
            let avg = (-dx + dy) / 2.0;
            let width = base.width + avg;
            BoundingBox::new(base.x + base.width - width, base.y, width, width / ar)
        }
        ResizeAnchor::W => {
            let width = base.width - dx;
            let height = width / ar;
            BoundingBox::new(base.x + dx, base.y + (base.height - height) / 2.0, width, height)
        }
    }
}

/// Floor each dimension at the minimum object size, pinning the edge the
/// anchor does not move: shrinking past the floor from a west handle pins
/// the east edge, and symmetrically for the other sides.
#[must_use]
pub fn clamp_min_size(
    mut bounds: BoundingBox,
    base: &BoundingBox,
    anchor: ResizeAnchor,
) -> BoundingBox {
    if bounds.width < MIN_OBJECT_SIZE {
        if anchor.moves_west_edge() {
            bounds.x = base.x + base.width - MIN_OBJECT_SIZE;
        }
        bounds.width = MIN_OBJECT_SIZE;
    }
    if bounds.height < MIN_OBJECT_SIZE {
        if anchor.moves_north_edge() {
            bounds.y = base.y + base.height - MIN_OBJECT_SIZE;
        }
        bounds.height = MIN_OBJECT_SIZE;
    }
    bounds
}

/// Round an angle to the nearest 15-degree increment.
#[must_use]
pub fn snap_rotation(angle: f64) -> f64 {
    (angle / ROTATION_SNAP_STEP).round() * ROTATION_SNAP_STEP
}

/// Map any angle into `[-π, π]` for display. Stored rotations stay
/// unbounded so a drag never jumps across the branch cut.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    let mut a = angle % TAU;
    if a > PI {
        a -= TAU;
    } else if a < -PI {
        a += TAU;
    }
    a
}
