//! Input model: modifier keys, buttons, the raw events a host surface
//! produces, and the normalized event vocabulary crossing the engine
//! boundary.
//!
//! Raw events carry only what the platform reports (screen coordinates,
//! device deltas, key names). The dispatcher converts them into the
//! `EngineEvent` vocabulary, which additionally carries canvas-space
//! coordinates and normalized wheel deltas. The vocabulary is serde-derived
//! because its shape crosses the engine/UI seam.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Camera;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    #[serde(rename = "left")]
    Primary,
    /// Middle mouse button (scroll wheel click).
    #[serde(rename = "middle")]
    Middle,
    /// Right mouse button (or two-finger tap).
    #[serde(rename = "right")]
    Secondary,
}

/// Wheel delta unit as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WheelDeltaMode {
    /// Deltas are already in pixels.
    Pixel,
    /// Deltas are in text lines.
    Line,
    /// Deltas are in pages.
    Page,
}

/// A pointer event as produced by the host surface, in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPointerEvent {
    pub screen_x: f64,
    pub screen_y: f64,
    pub button: Button,
    /// Bitmask of buttons held during the event.
    pub buttons: u8,
    pub modifiers: Modifiers,
    pub pressure: f64,
    pub pointer_id: i64,
}

/// A wheel event as produced by the host surface, deltas still in the
/// platform's delta mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawWheelEvent {
    pub screen_x: f64,
    pub screen_y: f64,
    pub delta_x: f64,
    pub delta_y: f64,
    pub delta_z: f64,
    pub delta_mode: WheelDeltaMode,
    pub modifiers: Modifiers,
}

/// A keyboard event as produced by the host surface.
#[derive(Debug, Clone, PartialEq)]
pub struct RawKeyEvent {
    /// Key value as reported by the platform (e.g. `"Escape"`, `"a"`).
    pub key: String,
    /// Physical key code (e.g. `"KeyA"`).
    pub code: String,
    pub modifiers: Modifiers,
    /// The event targets an editable text field and must not reach the
    /// engine.
    pub target_editable: bool,
}

/// Normalized pointer event at the engine boundary: screen and canvas
/// coordinates, both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub canvas_x: f64,
    pub canvas_y: f64,
    pub screen_x: f64,
    pub screen_y: f64,
    pub button: Button,
    pub buttons: u8,
    pub modifiers: Modifiers,
    pub pressure: f64,
    pub pointer_id: i64,
}

/// Normalized wheel event: canvas coordinates plus pixel-equivalent deltas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelEvent {
    pub canvas_x: f64,
    pub canvas_y: f64,
    pub delta_x: f64,
    pub delta_y: f64,
    pub delta_z: f64,
    pub modifiers: Modifiers,
}

/// Normalized keyboard event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: String,
    pub code: String,
    pub modifiers: Modifiers,
}

/// The engine-facing event vocabulary forwarded by the dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
    Wheel(WheelEvent),
    Key(KeyEvent),
}

impl RawPointerEvent {
    /// Convert to the boundary shape by adding canvas-space coordinates.
    #[must_use]
    pub fn normalized(&self, camera: &Camera) -> PointerEvent {
        let canvas = camera.screen_to_canvas(crate::camera::Point::new(self.screen_x, self.screen_y));
        PointerEvent {
            canvas_x: canvas.x,
            canvas_y: canvas.y,
            screen_x: self.screen_x,
            screen_y: self.screen_y,
            button: self.button,
            buttons: self.buttons,
            modifiers: self.modifiers,
            pressure: self.pressure,
            pointer_id: self.pointer_id,
        }
    }
}

impl RawWheelEvent {
    /// Convert to the boundary shape: canvas-space coordinates plus deltas
    /// normalized to pixel-equivalent units (`line` × the fixed line height,
    /// `page` × the viewport height).
    #[must_use]
    pub fn normalized(&self, camera: &Camera, viewport_height: f64) -> WheelEvent {
        let canvas = camera.screen_to_canvas(crate::camera::Point::new(self.screen_x, self.screen_y));
        let multiplier = match self.delta_mode {
            WheelDeltaMode::Pixel => 1.0,
            WheelDeltaMode::Line => crate::consts::WHEEL_LINE_PX,
            WheelDeltaMode::Page => viewport_height,
        };
        WheelEvent {
            canvas_x: canvas.x,
            canvas_y: canvas.y,
            delta_x: self.delta_x * multiplier,
            delta_y: self.delta_y * multiplier,
            delta_z: self.delta_z * multiplier,
            modifiers: self.modifiers,
        }
    }
}

impl RawKeyEvent {
    /// Convert to the boundary shape.
    #[must_use]
    pub fn normalized(&self) -> KeyEvent {
        KeyEvent {
            key: self.key.clone(),
            code: self.code.clone(),
            modifiers: self.modifiers,
        }
    }
}
