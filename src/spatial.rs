//! Spatial index and viewport virtualization.
//!
//! A uniform grid over canvas space answers "which objects intersect this
//! region" in sub-linear time. Cell membership is a broad-phase filter only;
//! every query result passes a true AABB intersection test. The index owns
//! nothing but `{id, bounds}` entries — callers insert and remove entries
//! whenever an object's bounds change, and rebuild wholesale (clear plus
//! reinsert) when the item set changes wholesale.

#[cfg(test)]
#[path = "spatial_test.rs"]
mod spatial_test;

use std::collections::{HashMap, HashSet};

use crate::bounds::{BoundingBox, ObjectBounds, ObjectId};
use crate::camera::Camera;
use crate::consts::{CHUNK_BATCH_SIZE, CHUNK_DELAY_MS, DEFAULT_CELL_SIZE};

/// Grid cell coordinates.
type Cell = (i64, i64);

struct IndexedItem {
    bounds: BoundingBox,
    cells: Vec<Cell>,
}

/// Uniform-grid spatial index over object bounding boxes.
pub struct SpatialIndex {
    cell_size: f64,
    cells: HashMap<Cell, Vec<ObjectId>>,
    items: HashMap<ObjectId, IndexedItem>,
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE)
    }
}

impl SpatialIndex {
    /// Create an empty index with the given cell size in canvas units.
    #[must_use]
    pub fn new(cell_size: f64) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
            items: HashMap::new(),
        }
    }

    /// Inclusive cell range overlapped by `bounds` on both axes.
    fn cell_range(&self, bounds: &BoundingBox) -> (Cell, Cell) {
        let min = (
            (bounds.x / self.cell_size).floor() as i64,
            (bounds.y / self.cell_size).floor() as i64,
        );
        let max = (
            (bounds.right() / self.cell_size).floor() as i64,
            (bounds.bottom() / self.cell_size).floor() as i64,
        );
        (min, max)
    }

    /// Insert an entry, replacing any previous entry with the same id.
    pub fn insert(&mut self, item: ObjectBounds) {
        self.remove(&item.id);

        let (min, max) = self.cell_range(&item.bounds);
        let mut recorded = Vec::new();
        for cx in min.0..=max.0 {
            for cy in min.1..=max.1 {
                self.cells.entry((cx, cy)).or_default().push(item.id);
                recorded.push((cx, cy));
            }
        }
        self.items.insert(item.id, IndexedItem { bounds: item.bounds, cells: recorded });
    }

    /// Remove an entry by id. Returns `false` if it was not present.
    pub fn remove(&mut self, id: &ObjectId) -> bool {
        let Some(item) = self.items.remove(id) else {
            return false;
        };
        for cell in item.cells {
            if let Some(ids) = self.cells.get_mut(&cell) {
                ids.retain(|other| other != id);
                if ids.is_empty() {
                    self.cells.remove(&cell);
                }
            }
        }
        true
    }

    /// All ids whose bounds truly intersect `region`, deduplicated.
    #[must_use]
    pub fn query(&self, region: &BoundingBox) -> Vec<ObjectId> {
        let (min, max) = self.cell_range(region);
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for cx in min.0..=max.0 {
            for cy in min.1..=max.1 {
                let Some(ids) = self.cells.get(&(cx, cy)) else {
                    continue;
                };
                for id in ids {
                    if !seen.insert(*id) {
                        continue;
                    }
                    if let Some(item) = self.items.get(id) {
                        if item.bounds.intersects(region) {
                            out.push(*id);
                        }
                    }
                }
            }
        }
        out
    }

    /// All ids intersecting the camera's viewport plus an overscan margin.
    #[must_use]
    pub fn query_viewport(
        &self,
        camera: &Camera,
        viewport_width: f64,
        viewport_height: f64,
        overscan_px: f64,
    ) -> Vec<ObjectId> {
        self.query(&visible_region(camera, viewport_width, viewport_height, overscan_px))
    }

    /// The recorded bounds for an id, if indexed.
    #[must_use]
    pub fn bounds_of(&self, id: &ObjectId) -> Option<BoundingBox> {
        self.items.get(id).map(|item| item.bounds)
    }

    /// Number of indexed entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the index contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop every entry. The first step of a wholesale rebuild.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.items.clear();
    }
}

/// Canvas-space region covered by the viewport plus `overscan_px` on every
/// side, both converted to canvas units by dividing by the zoom.
#[must_use]
pub fn visible_region(
    camera: &Camera,
    viewport_width: f64,
    viewport_height: f64,
    overscan_px: f64,
) -> BoundingBox {
    let margin = overscan_px / camera.zoom;
    BoundingBox::new(
        camera.x - margin,
        camera.y - margin,
        viewport_width / camera.zoom + 2.0 * margin,
        viewport_height / camera.zoom + 2.0 * margin,
    )
}

/// Incremental reveal of a freshly loaded item set.
///
/// Items are revealed in batches of `batch_size` on a fixed delay so a large
/// load never pays its full render cost in one frame. Driven by `tick` from
/// the host's frame loop; the running flag is cleared before the final batch
/// is reported, so nothing remains scheduled after completion.
pub struct ChunkedLoader {
    batch_size: usize,
    delay_ms: f64,
    total: usize,
    revealed: usize,
    next_batch_at: Option<f64>,
    running: bool,
}

impl Default for ChunkedLoader {
    fn default() -> Self {
        Self::new(CHUNK_BATCH_SIZE, CHUNK_DELAY_MS)
    }
}

impl ChunkedLoader {
    #[must_use]
    pub fn new(batch_size: usize, delay_ms: f64) -> Self {
        Self {
            batch_size: batch_size.max(1),
            delay_ms,
            total: 0,
            revealed: 0,
            next_batch_at: None,
            running: false,
        }
    }

    /// Start revealing a set of `total` items. The first batch is due
    /// immediately on the next `tick`.
    pub fn begin(&mut self, total: usize, now_ms: f64) {
        self.total = total;
        self.revealed = 0;
        self.running = total > 0;
        self.next_batch_at = if self.running { Some(now_ms) } else { None };
    }

    /// Reveal the next batch if it is due. Returns the number of newly
    /// revealed items (zero when idle or not yet due).
    pub fn tick(&mut self, now_ms: f64) -> usize {
        if !self.running {
            return 0;
        }
        let Some(due) = self.next_batch_at else {
            return 0;
        };
        if now_ms < due {
            return 0;
        }

        let batch = self.batch_size.min(self.total - self.revealed);
        self.revealed += batch;
        if self.revealed >= self.total {
            self.running = false;
            self.next_batch_at = None;
        } else {
            self.next_batch_at = Some(now_ms + self.delay_ms);
        }
        batch
    }

    /// Cancel the reveal outright; no further batches fire.
    pub fn stop(&mut self) {
        self.running = false;
        self.next_batch_at = None;
    }

    /// Items revealed so far.
    #[must_use]
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// Total items in the current reveal.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Whether more batches are scheduled.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether every item has been revealed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.revealed >= self.total
    }
}
