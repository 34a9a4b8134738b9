//! Tail crossing detection for the incremental loader.
//!
//! The watch contract: subscribe to the visibility of the element that
//! represents the final item of the full sequence, fire at most once per
//! crossing into the viewport, re-arm when the watched identity changes or
//! the watch is re-attached, release on teardown.

use crate::layout::{self, GridLayoutConfig};
use crate::{CellBox, ViewportGeometry};

/// Edge-triggered visibility watch on the final item of the sequence.
///
/// Stores the watched identity (an item index) and the last observed level so
/// [`TailWatch::update`] can report rising edges only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TailWatch {
    target: Option<usize>,
    intersecting: bool,
}

impl TailWatch {
    /// Points the watch at a new element identity. Retargeting resets the
    /// level, so the next intersection counts as a fresh crossing.
    pub(crate) fn retarget(&mut self, target: Option<usize>) {
        if self.target != target {
            self.target = target;
            self.intersecting = false;
        }
    }

    /// Re-attach semantics: keep the identity, forget the level. A target
    /// that is still visible will report another crossing.
    pub(crate) fn rearm(&mut self) {
        self.intersecting = false;
    }

    pub(crate) fn release(&mut self) {
        self.target = None;
        self.intersecting = false;
    }

    pub(crate) fn target(&self) -> Option<usize> {
        self.target
    }

    /// Feeds the current level; returns true on a crossing into the viewport.
    pub(crate) fn update(&mut self, intersecting: bool) -> bool {
        let crossed = intersecting && !self.intersecting && self.target.is_some();
        self.intersecting = intersecting;
        crossed
    }
}

/// Whether the final row's cell span overlaps the viewport span.
pub(crate) fn tail_intersects(
    config: &GridLayoutConfig,
    cell: CellBox,
    geometry: ViewportGeometry,
    item_count: usize,
) -> bool {
    if item_count == 0 || !cell.is_measured() {
        return false;
    }
    let columns = layout::column_count(config, cell, geometry.client_width);
    let last_row = layout::total_rows(item_count, columns) - 1;
    let top = last_row as u64 * layout::row_pitch(config, cell);
    let bottom = top + cell.height as u64;
    let view_top = geometry.scroll_top;
    let view_bottom = geometry.scroll_top.saturating_add(geometry.client_height as u64);
    top < view_bottom && bottom > view_top
}
