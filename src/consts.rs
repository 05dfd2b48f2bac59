//! Shared numeric constants for the interaction engine.

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest permitted camera zoom factor.
pub const MIN_ZOOM: f64 = 0.1;

/// Largest permitted camera zoom factor.
pub const MAX_ZOOM: f64 = 10.0;

/// Multiplier applied per step of the zoom-in / zoom-out helpers.
pub const ZOOM_STEP: f64 = 1.2;

// ── Selection and handles ───────────────────────────────────────

/// Base handle size in screen pixels.
pub const HANDLE_SIZE_PX: f64 = 8.0;

/// Multiplier applied to the handle size to form its hit box.
pub const HANDLE_HIT_SCALE: f64 = 1.5;

/// Distance from the bounding box top edge to the rotate handle, in screen pixels.
pub const ROTATE_HANDLE_OFFSET_PX: f64 = 24.0;

/// Minimum width/height of selection bounds in canvas units.
pub const MIN_OBJECT_SIZE: f64 = 10.0;

/// Rotation snap increment (15 degrees).
pub const ROTATION_SNAP_STEP: f64 = std::f64::consts::PI / 12.0;

// ── Snapping ────────────────────────────────────────────────────

/// Default grid spacing in canvas units.
pub const DEFAULT_GRID_SIZE: f64 = 20.0;

/// Default snap threshold in screen pixels.
pub const DEFAULT_SNAP_THRESHOLD_PX: f64 = 8.0;

/// Padding added to each end of a snap guide, in canvas units.
pub const GUIDE_PADDING: f64 = 20.0;

// ── Spatial index and virtualization ────────────────────────────

/// Default spatial-index cell size in canvas units.
pub const DEFAULT_CELL_SIZE: f64 = 200.0;

/// Default overscan margin around the viewport, in screen pixels.
pub const DEFAULT_OVERSCAN_PX: f64 = 200.0;

/// Default number of items revealed per chunked-load batch.
pub const CHUNK_BATCH_SIZE: usize = 64;

/// Default delay between chunked-load batches, in milliseconds.
pub const CHUNK_DELAY_MS: f64 = 16.0;

// ── Gestures ────────────────────────────────────────────────────

/// Movement in screen pixels beyond which a pointer gesture becomes a drag.
pub const DRAG_THRESHOLD_PX: f64 = 4.0;

/// Hold duration in milliseconds before a stationary press counts as a long-press.
pub const LONG_PRESS_MS: f64 = 500.0;

/// Pixels per wheel line-mode delta unit.
pub const WHEEL_LINE_PX: f64 = 16.0;
