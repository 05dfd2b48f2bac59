//! Engine boundary: the testable core that turns normalized input events
//! into selection/transform state changes and host-facing actions.
//!
//! The host (the rendering/object-authority engine) pushes object bounds in
//! through the data-input methods, feeds events through
//! [`EventSink::handle_event`], and drains the resulting [`Action`]s. The
//! core owns the camera, the selection, the snap configuration, and the
//! spatial index; it owns no objects and draws nothing.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, warn};

use crate::bounds::{BoundingBox, ObjectBounds, ObjectId};
use crate::camera::{Camera, Point};
use crate::consts::{DEFAULT_OVERSCAN_PX, ZOOM_STEP};
use crate::dispatch::EventSink;
use crate::input::{Button, EngineEvent, KeyEvent, PointerEvent, WheelEvent};
use crate::select::{Selection, SelectionHit, TransformOp};
use crate::snap::{SnapConfig, SnapGuide, snap_bounds};
use crate::spatial::SpatialIndex;

/// Boundary initialization failure. The one user-visible error path in the
/// core: everything else is a no-op guard.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine backend failed to initialize: {0}")]
    BackendUnavailable(String),
}

/// Lifecycle status of the engine boundary. `Failed` is terminal until
/// re-initialization and is distinct from `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineStatus {
    #[default]
    Loading,
    Ready,
    Failed,
}

/// Commands and notifications returned to the host for processing.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Selection membership or bounds changed.
    SelectionChanged {
        ids: Vec<ObjectId>,
        bounds: Option<BoundingBox>,
    },
    /// A drag committed. The host remaps member geometry from the
    /// before/after pair; rotations are absolute.
    TransformCommitted {
        ids: Vec<ObjectId>,
        from: BoundingBox,
        to: BoundingBox,
        from_rotation: f64,
        rotation: f64,
    },
    /// The hover cursor hint changed.
    SetCursor(String),
    /// State changed in a way the next frame must reflect.
    RenderNeeded,
}

/// Core engine state. All logic lives here, free of any platform surface,
/// so the full input flow is testable in isolation.
pub struct EngineCore {
    pub camera: Camera,
    pub selection: Selection,
    pub snap: SnapConfig,
    index: SpatialIndex,
    objects: HashMap<ObjectId, BoundingBox>,
    status: EngineStatus,
    init_error: Option<EngineError>,
    viewport_width: f64,
    viewport_height: f64,
    guides: Vec<SnapGuide>,
    cursor: String,
    pending: Vec<Action>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            camera: Camera::default(),
            selection: Selection::new(),
            snap: SnapConfig::default(),
            index: SpatialIndex::default(),
            objects: HashMap::new(),
            status: EngineStatus::Loading,
            init_error: None,
            viewport_width: 0.0,
            viewport_height: 0.0,
            guides: Vec::new(),
            cursor: String::new(),
            pending: Vec::new(),
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Lifecycle ---

    /// The backend loaded: adopt its object snapshot and become ready.
    pub fn initialize(&mut self, snapshot: Vec<ObjectBounds>) {
        self.status = EngineStatus::Ready;
        self.init_error = None;
        self.replace_objects(snapshot);
    }

    /// The backend failed to load: enter the terminal failed state. No
    /// further operations run until [`EngineCore::reinitialize`].
    pub fn fail_initialization(&mut self, error: EngineError) {
        warn!(error = %error, "engine initialization failed");
        self.status = EngineStatus::Failed;
        self.init_error = Some(error);
    }

    /// Drop all state and return to `Loading` for another initialization
    /// attempt.
    pub fn reinitialize(&mut self) {
        self.status = EngineStatus::Loading;
        self.init_error = None;
        self.objects.clear();
        self.index.clear();
        self.selection.clear();
        self.guides.clear();
        self.pending.clear();
    }

    #[must_use]
    pub fn status(&self) -> EngineStatus {
        self.status
    }

    #[must_use]
    pub fn init_error(&self) -> Option<&EngineError> {
        self.init_error.as_ref()
    }

    // --- Data inputs from the object authority ---

    /// Replace the whole bounds catalog (wholesale index rebuild).
    pub fn load_snapshot(&mut self, objects: Vec<ObjectBounds>) {
        if self.status != EngineStatus::Ready {
            debug!("load_snapshot ignored: engine not ready");
            return;
        }
        self.replace_objects(objects);
    }

    /// Insert or update one object's bounds.
    pub fn upsert_object(&mut self, id: ObjectId, bounds: BoundingBox) {
        if self.status != EngineStatus::Ready {
            debug!("upsert_object ignored: engine not ready");
            return;
        }
        self.objects.insert(id, bounds);
        self.index.insert(ObjectBounds::new(id, bounds));
    }

    /// Remove an object. A removed object also leaves the selection.
    pub fn remove_object(&mut self, id: &ObjectId) {
        if self.status != EngineStatus::Ready {
            debug!("remove_object ignored: engine not ready");
            return;
        }
        self.objects.remove(id);
        self.index.remove(id);
        if self.selection.contains(id) {
            self.selection.remove_from_selection(&[*id]);
            self.push_selection_changed();
        }
    }

    fn replace_objects(&mut self, objects: Vec<ObjectBounds>) {
        self.objects.clear();
        self.index.clear();
        for entry in objects {
            self.objects.insert(entry.id, entry.bounds);
            self.index.insert(entry);
        }
    }

    // --- Viewport ---

    /// Update viewport dimensions in screen pixels.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// The candidate visible set for the current camera and viewport, with
    /// the default overscan margin.
    #[must_use]
    pub fn visible_ids(&self) -> Vec<ObjectId> {
        self.index.query_viewport(
            &self.camera,
            self.viewport_width,
            self.viewport_height,
            DEFAULT_OVERSCAN_PX,
        )
    }

    // --- Queries ---

    /// Guides for the snap currently in effect; emptied when no snap is
    /// active. Consumed by the render layer each frame.
    #[must_use]
    pub fn guides(&self) -> &[SnapGuide] {
        &self.guides
    }

    /// The bounds the authority last reported for an object.
    #[must_use]
    pub fn object_bounds(&self, id: &ObjectId) -> Option<BoundingBox> {
        self.objects.get(id).copied()
    }

    /// Number of objects in the catalog.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Drain the actions produced since the last call.
    pub fn take_actions(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.pending)
    }

    // --- Event handling ---

    fn on_pointer_down(&mut self, ev: &PointerEvent) -> bool {
        if ev.button != Button::Primary {
            return false;
        }
        let screen = Point::new(ev.screen_x, ev.screen_y);
        let canvas = Point::new(ev.canvas_x, ev.canvas_y);

        // Handles take priority over the body, the body over object picking.
        if let Some(hit) = self.selection.hit_test(screen, &self.camera) {
            let handle = match hit {
                SelectionHit::Handle(handle) => Some(handle),
                SelectionHit::Body => None,
            };
            if self.selection.start_transform(canvas, handle) {
                self.push(Action::RenderNeeded);
                return true;
            }
            return false;
        }

        if let Some(id) = self.pick_object(canvas) {
            let Some(bounds) = self.object_bounds(&id) else {
                return false;
            };
            if ev.modifiers.shift {
                self.selection.add_to_selection(vec![id], bounds);
            } else {
                self.selection.set_selection(vec![id], Some(bounds));
            }
            self.push_selection_changed();
            // A fresh selection drags immediately.
            self.selection.start_transform(canvas, None);
            self.push(Action::RenderNeeded);
            return true;
        }

        if !ev.modifiers.shift && !self.selection.is_empty() {
            self.selection.clear();
            self.push_selection_changed();
            self.push(Action::RenderNeeded);
            return true;
        }
        false
    }

    fn on_pointer_move(&mut self, ev: &PointerEvent) -> bool {
        let screen = Point::new(ev.screen_x, ev.screen_y);
        let canvas = Point::new(ev.canvas_x, ev.canvas_y);

        if self.selection.is_transforming() {
            let constrain = ev.modifiers.shift;
            self.selection.update_transform(canvas, constrain);
            self.guides.clear();
            self.apply_move_snapping(canvas, constrain);
            self.push(Action::RenderNeeded);
            return true;
        }

        self.update_cursor(screen, canvas);
        false
    }

    /// Snap a move drag by adjusting the pointer position with the delta
    /// that aligns the selection bounds, then recomputing. Resizes and
    /// rotates do not snap to objects.
    fn apply_move_snapping(&mut self, canvas: Point, constrain: bool) {
        if !self.snap.enabled {
            return;
        }
        let is_move = self
            .selection
            .transform()
            .is_some_and(|ts| ts.op == TransformOp::Move);
        if !is_move {
            return;
        }
        let Some(bounds) = self.selection.bounds() else {
            return;
        };

        // The configured threshold is in screen pixels; the resolver wants
        // canvas units.
        let config = SnapConfig {
            threshold: self.camera.screen_dist_to_canvas(self.snap.threshold),
            ..self.snap
        };
        let catalog = self.snap_catalog();
        let exclude: Vec<ObjectId> = self.selection.ids().iter().copied().collect();
        let result = snap_bounds(&bounds, &catalog, &exclude, &config);
        if result.snapped_x || result.snapped_y {
            let adjusted = Point::new(
                canvas.x + (result.bounds.x - bounds.x),
                canvas.y + (result.bounds.y - bounds.y),
            );
            self.selection.update_transform(adjusted, constrain);
            self.guides = result.guides;
        }
    }

    fn on_pointer_up(&mut self, _ev: &PointerEvent) -> bool {
        if !self.selection.is_transforming() {
            return false;
        }
        self.guides.clear();
        let Some(committed) = self.selection.end_transform() else {
            return false;
        };
        let mut ids: Vec<ObjectId> = self.selection.ids().iter().copied().collect();
        ids.sort();
        self.push(Action::TransformCommitted {
            ids,
            from: committed.previous_bounds,
            to: committed.bounds,
            from_rotation: committed.previous_rotation,
            rotation: committed.rotation,
        });
        self.push(Action::RenderNeeded);
        true
    }

    fn on_wheel(&mut self, ev: &WheelEvent) -> bool {
        if ev.modifiers.ctrl || ev.modifiers.meta {
            let canvas = Point::new(ev.canvas_x, ev.canvas_y);
            let screen = self.camera.canvas_to_screen(canvas);
            let factor = if ev.delta_y < 0.0 { ZOOM_STEP } else { 1.0 / ZOOM_STEP };
            self.camera = self.camera.zoom_at(screen, self.camera.zoom * factor);
        } else {
            self.camera = self.camera.pan_by(ev.delta_x, ev.delta_y);
        }
        self.push(Action::RenderNeeded);
        true
    }

    fn on_key(&mut self, ev: &KeyEvent) -> bool {
        if ev.key == "Escape" {
            if self.selection.is_transforming() {
                self.selection.cancel_transform();
                self.guides.clear();
                self.push(Action::RenderNeeded);
                return true;
            }
            if !self.selection.is_empty() {
                self.selection.clear();
                self.push_selection_changed();
                self.push(Action::RenderNeeded);
                return true;
            }
        }
        false
    }

    // --- Internals ---

    /// Topmost-pick stand-in: the catalog carries no stacking order, so the
    /// smallest-area candidate wins, tie-broken by id for determinism.
    fn pick_object(&self, canvas: Point) -> Option<ObjectId> {
        let probe = BoundingBox::new(canvas.x, canvas.y, 0.0, 0.0);
        let mut best: Option<(f64, ObjectId)> = None;
        for id in self.index.query(&probe) {
            let Some(bounds) = self.objects.get(&id) else {
                continue;
            };
            if !bounds.contains(canvas) {
                continue;
            }
            let area = bounds.width * bounds.height;
            let better = match best {
                None => true,
                Some((best_area, best_id)) => {
                    area < best_area || (area == best_area && id < best_id)
                }
            };
            if better {
                best = Some((area, id));
            }
        }
        best.map(|(_, id)| id)
    }

    fn snap_catalog(&self) -> Vec<ObjectBounds> {
        self.objects
            .iter()
            .map(|(id, bounds)| ObjectBounds::new(*id, *bounds))
            .collect()
    }

    fn update_cursor(&mut self, screen: Point, canvas: Point) {
        let cursor = match self.selection.hit_test(screen, &self.camera) {
            Some(SelectionHit::Handle(handle)) => handle.cursor(),
            Some(SelectionHit::Body) => "move",
            None => {
                if self.pick_object(canvas).is_some() {
                    "pointer"
                } else {
                    "default"
                }
            }
        };
        if cursor != self.cursor {
            self.cursor = cursor.to_string();
            self.pending.push(Action::SetCursor(self.cursor.clone()));
        }
    }

    fn push(&mut self, action: Action) {
        self.pending.push(action);
    }

    fn push_selection_changed(&mut self) {
        let mut ids: Vec<ObjectId> = self.selection.ids().iter().copied().collect();
        ids.sort();
        self.pending.push(Action::SelectionChanged {
            ids,
            bounds: self.selection.bounds(),
        });
    }
}

impl EventSink for EngineCore {
    /// The single engine-boundary entry point.
    fn handle_event(&mut self, event: &EngineEvent) -> bool {
        if self.status != EngineStatus::Ready {
            debug!(status = ?self.status, "event ignored: engine not ready");
            return false;
        }
        match event {
            EngineEvent::PointerDown(ev) => self.on_pointer_down(ev),
            EngineEvent::PointerMove(ev) => self.on_pointer_move(ev),
            EngineEvent::PointerUp(ev) => self.on_pointer_up(ev),
            EngineEvent::Wheel(ev) => self.on_wheel(ev),
            EngineEvent::Key(ev) => self.on_key(ev),
        }
    }
}
