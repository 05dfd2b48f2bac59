//! Event dispatcher: the seam between a host input surface and the engine.
//!
//! The dispatcher attaches to one interactive surface at a time, tracks
//! active pointers, classifies gestures (click vs. drag vs. long-press),
//! converts raw platform events into the boundary vocabulary, and forwards
//! them to an [`EventSink`]. All timer behavior is deadline-based and driven
//! by `tick` from the host's frame loop — the dispatcher owns no threads,
//! so cancellation is deterministic.

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod dispatch_test;

use std::collections::HashMap;

use tracing::debug;

use crate::camera::{Camera, Point};
use crate::consts::{DRAG_THRESHOLD_PX, LONG_PRESS_MS};
use crate::input::{EngineEvent, RawKeyEvent, RawPointerEvent, RawWheelEvent};

/// The engine-boundary entry point: one call per normalized event, returning
/// whether the event was consumed (and platform default behavior should be
/// suppressed).
pub trait EventSink {
    fn handle_event(&mut self, event: &EngineEvent) -> bool;
}

/// The host-side interactive surface the dispatcher attaches to. Pointer
/// capture routes all subsequent events for a pointer id to the capturing
/// surface until released, regardless of cursor position.
pub trait Surface {
    fn capture_pointer(&mut self, pointer_id: i64);
    fn release_pointer(&mut self, pointer_id: i64);
}

/// Gesture thresholds.
#[derive(Debug, Clone, Copy)]
pub struct DispatcherConfig {
    /// Screen-pixel movement beyond which a press becomes a drag.
    pub drag_threshold_px: f64,
    /// Hold duration in milliseconds before a stationary press long-presses.
    pub long_press_ms: f64,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: DRAG_THRESHOLD_PX,
            long_press_ms: LONG_PRESS_MS,
        }
    }
}

/// Captures raw device input and forwards normalized events to the engine.
pub struct EventDispatcher {
    config: DispatcherConfig,
    surface: Option<Box<dyn Surface>>,
    viewport_height: f64,
    active_pointers: HashMap<i64, Point>,
    drag_start: Option<Point>,
    dragging: bool,
    long_press_deadline: Option<f64>,
    long_press_fired: bool,
    last_click_at: Option<f64>,
    last_click_pos: Option<Point>,
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl EventDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DispatcherConfig::default())
    }

    #[must_use]
    pub fn with_config(config: DispatcherConfig) -> Self {
        Self {
            config,
            surface: None,
            viewport_height: 0.0,
            active_pointers: HashMap::new(),
            drag_start: None,
            dragging: false,
            long_press_deadline: None,
            long_press_fired: false,
            last_click_at: None,
            last_click_pos: None,
        }
    }

    /// Attach to a surface. Any previously attached surface is fully
    /// detached first — there is never a dual-attachment state.
    pub fn attach(&mut self, surface: Box<dyn Surface>) {
        self.detach();
        self.surface = Some(surface);
    }

    /// Detach from the current surface: release every captured pointer and
    /// clear all internal maps and timers. Idempotent.
    pub fn detach(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            for pointer_id in self.active_pointers.keys() {
                surface.release_pointer(*pointer_id);
            }
        }
        self.surface = None;
        self.active_pointers.clear();
        self.drag_start = None;
        self.dragging = false;
        self.long_press_deadline = None;
        self.long_press_fired = false;
        self.last_click_at = None;
        self.last_click_pos = None;
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    /// Viewport height in pixels, used to normalize page-mode wheel deltas.
    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height;
    }

    /// Pointer pressed: capture the pointer, start gesture tracking, arm the
    /// long-press deadline, and forward the converted event.
    pub fn on_pointer_down(
        &mut self,
        raw: &RawPointerEvent,
        camera: &Camera,
        now_ms: f64,
        sink: &mut dyn EventSink,
    ) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            debug!("pointer-down ignored: no surface attached");
            return false;
        };
        surface.capture_pointer(raw.pointer_id);

        let pos = Point::new(raw.screen_x, raw.screen_y);
        if self.active_pointers.is_empty() {
            self.drag_start = Some(pos);
            self.dragging = false;
            self.long_press_deadline = Some(now_ms + self.config.long_press_ms);
            self.long_press_fired = false;
        }
        self.active_pointers.insert(raw.pointer_id, pos);

        sink.handle_event(&EngineEvent::PointerDown(raw.normalized(camera)))
    }

    /// Pointer moved: flip to dragging once movement exceeds the threshold
    /// (which cancels the long-press — a tap that moves too far is never a
    /// long-press), then forward the converted event regardless.
    pub fn on_pointer_move(
        &mut self,
        raw: &RawPointerEvent,
        camera: &Camera,
        sink: &mut dyn EventSink,
    ) -> bool {
        if self.surface.is_none() {
            return false;
        }

        let pos = Point::new(raw.screen_x, raw.screen_y);
        if let Some(tracked) = self.active_pointers.get_mut(&raw.pointer_id) {
            *tracked = pos;
        }
        if !self.dragging {
            if let Some(start) = self.drag_start {
                if start.distance(pos) > self.config.drag_threshold_px {
                    self.dragging = true;
                    self.long_press_deadline = None;
                }
            }
        }

        sink.handle_event(&EngineEvent::PointerMove(raw.normalized(camera)))
    }

    /// Pointer released: release capture, record the click when the gesture
    /// never became a drag, clear gesture state, and forward the converted
    /// event.
    pub fn on_pointer_up(
        &mut self,
        raw: &RawPointerEvent,
        camera: &Camera,
        now_ms: f64,
        sink: &mut dyn EventSink,
    ) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        surface.release_pointer(raw.pointer_id);
        self.active_pointers.remove(&raw.pointer_id);

        if self.active_pointers.is_empty() {
            if !self.dragging && self.drag_start.is_some() {
                self.last_click_at = Some(now_ms);
                self.last_click_pos = Some(Point::new(raw.screen_x, raw.screen_y));
            }
            self.drag_start = None;
            self.dragging = false;
            self.long_press_deadline = None;
        }

        sink.handle_event(&EngineEvent::PointerUp(raw.normalized(camera)))
    }

    /// Pointer canceled by the platform: release capture and drop gesture
    /// state without forwarding or click bookkeeping.
    pub fn cancel_pointer(&mut self, pointer_id: i64) {
        if let Some(surface) = self.surface.as_mut() {
            surface.release_pointer(pointer_id);
        }
        self.active_pointers.remove(&pointer_id);
        if self.active_pointers.is_empty() {
            self.drag_start = None;
            self.dragging = false;
            self.long_press_deadline = None;
        }
    }

    /// Wheel input: forward with axis-normalized deltas. Always consumed —
    /// default scrolling never reaches the platform while attached.
    pub fn on_wheel(
        &mut self,
        raw: &RawWheelEvent,
        camera: &Camera,
        sink: &mut dyn EventSink,
    ) -> bool {
        if self.surface.is_none() {
            return false;
        }
        sink.handle_event(&EngineEvent::Wheel(raw.normalized(camera, self.viewport_height)));
        true
    }

    /// Keyboard input: events targeting editable fields, or matching the
    /// refresh/devtools allow-list, are never forwarded. Everything else is
    /// converted and forwarded; consumption suppresses default behavior.
    pub fn on_key(&mut self, raw: &RawKeyEvent, sink: &mut dyn EventSink) -> bool {
        if self.surface.is_none() {
            return false;
        }
        if raw.target_editable || is_browser_reserved(raw) {
            return false;
        }
        sink.handle_event(&EngineEvent::Key(raw.normalized()))
    }

    /// Advance deadline-based timers. Fires the long-press once its deadline
    /// passes; the result is recorded as gesture state (no boundary event
    /// exists for it yet).
    pub fn tick(&mut self, now_ms: f64) {
        if let Some(deadline) = self.long_press_deadline {
            if now_ms >= deadline {
                self.long_press_deadline = None;
                self.long_press_fired = true;
                debug!("long-press fired");
            }
        }
    }

    /// Number of pointers currently down.
    #[must_use]
    pub fn active_pointer_count(&self) -> usize {
        self.active_pointers.len()
    }

    /// Whether the current gesture has crossed the drag threshold.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Whether the current press long-pressed.
    #[must_use]
    pub fn long_press_fired(&self) -> bool {
        self.long_press_fired
    }

    /// Time and position of the last completed click, if any. Tracked for
    /// double-click routing, which is intentionally not wired to an action.
    #[must_use]
    pub fn last_click(&self) -> Option<(f64, Point)> {
        match (self.last_click_at, self.last_click_pos) {
            (Some(at), Some(pos)) => Some((at, pos)),
            _ => None,
        }
    }
}

/// Keys the platform keeps for itself: refresh and devtools chords.
fn is_browser_reserved(raw: &RawKeyEvent) -> bool {
    matches!(raw.key.as_str(), "F5" | "F12")
        || ((raw.modifiers.ctrl || raw.modifiers.meta) && raw.key.eq_ignore_ascii_case("r"))
        || (raw.modifiers.ctrl && raw.modifiers.shift && raw.key.eq_ignore_ascii_case("i"))
        || (raw.modifiers.meta && raw.modifiers.alt && raw.key.eq_ignore_ascii_case("i"))
}
