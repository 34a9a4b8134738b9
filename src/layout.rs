//! Pure grid layout math.
//!
//! Everything here is a function of its arguments: no I/O, no callbacks, no
//! dependence on a previously computed window. The engine feeds it geometry
//! and a measured cell box; adapters and tests can call it directly.

use crate::{CellBox, ViewportGeometry, VisibleWindow};

/// Layout knobs fixed per grid instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridLayoutConfig {
    /// Vertical space between rows, in pixels.
    pub row_gap: u32,
    /// Horizontal space between columns, in pixels.
    pub column_gap: u32,
    /// The narrowest cell the grid template will produce. The effective cell
    /// width entering the column-count formula is the probed width floored by
    /// this value, so a glitched probe can only under-claim columns.
    pub min_column_width: u32,
    /// Extra fully materialized rows above and below the visible span.
    pub overscan_rows: usize,
}

pub const DEFAULT_MIN_COLUMN_WIDTH: u32 = 250;

impl Default for GridLayoutConfig {
    fn default() -> Self {
        Self {
            row_gap: 0,
            column_gap: 0,
            min_column_width: DEFAULT_MIN_COLUMN_WIDTH,
            overscan_rows: 0,
        }
    }
}

/// Number of columns the viewport can hold: `floor((clientWidth + columnGap)
/// / (cellWidth + columnGap))`, minimum 1.
///
/// Floor (not ceil) guarantees a partial column is never claimed as
/// renderable, so every computed index maps to an actual cell position.
pub fn column_count(config: &GridLayoutConfig, cell: CellBox, client_width: u32) -> usize {
    let cell_width = cell.width.max(config.min_column_width) as u64;
    let gap = config.column_gap as u64;
    let span = (cell_width + gap).max(1);
    let columns = (client_width as u64 + gap) / span;
    columns.max(1) as usize
}

/// Vertical distance from one row's top to the next row's top.
pub fn row_pitch(config: &GridLayoutConfig, cell: CellBox) -> u64 {
    cell.height as u64 + config.row_gap as u64
}

pub fn total_rows(item_count: usize, columns: usize) -> usize {
    if columns == 0 {
        return 0;
    }
    item_count.div_ceil(columns)
}

/// Full pixel height of the grid: `totalRows * pitch - rowGap` (gaps sit
/// between rows, not after the last one). Zero when there are no items.
pub fn grid_height(config: &GridLayoutConfig, cell: CellBox, item_count: usize, columns: usize) -> u64 {
    let rows = total_rows(item_count, columns);
    if rows == 0 {
        return 0;
    }
    (rows as u64 * row_pitch(config, cell)).saturating_sub(config.row_gap as u64)
}

/// Computes the visible window for the given inputs.
///
/// Returns [`VisibleWindow::EMPTY`] when the item set is empty or the cell box
/// is unmeasured; callers that want to retain a previous window on the
/// unmeasured case should check [`CellBox::is_measured`] before calling.
///
/// The scroll offset is clamped to the maximum scrollable position first, so
/// overscrolled inputs resolve to the window at the end of the content.
pub fn compute_window(
    config: &GridLayoutConfig,
    cell: CellBox,
    geometry: ViewportGeometry,
    item_count: usize,
) -> VisibleWindow {
    if item_count == 0 || !cell.is_measured() {
        return VisibleWindow::EMPTY;
    }

    let columns = column_count(config, cell, geometry.client_width);
    let rows = total_rows(item_count, columns);
    let last_row = rows - 1;
    let pitch = row_pitch(config, cell);

    let height = grid_height(config, cell, item_count, columns);
    let max_scroll = height.saturating_sub(geometry.client_height as u64);
    let scroll_top = geometry.scroll_top.min(max_scroll);

    // +2 absorbs partial-row exposure at both viewport edges; overscan is
    // symmetric on top of that.
    let visible_rows = (geometry.client_height as u64).div_ceil(pitch) as usize
        + 2
        + 2 * config.overscan_rows;

    // The extra row below the overscan keeps one full row pre-rendered above
    // the fold when scrolling up fast.
    let start_row = ((scroll_top / pitch) as usize)
        .saturating_sub(config.overscan_rows + 1)
        .min(last_row);
    let end_row = last_row.min(start_row + visible_rows - 1);

    VisibleWindow {
        start_index: start_row * columns,
        end_index: item_count.min((end_row + 1) * columns),
        offset_top: start_row as u64 * pitch,
        offset_bottom: (last_row - end_row) as u64 * pitch,
    }
}
