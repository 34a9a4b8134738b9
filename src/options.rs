use alloc::sync::Arc;

use crate::engine::GridVirtualizer;
use crate::layout::GridLayoutConfig;
use crate::{CellBox, ViewportGeometry};

/// Synchronous probe of one rendered reference cell.
///
/// Returning a box with a zero dimension means "not measurable yet" (e.g. the
/// sample cell has not been painted); the engine keeps its previous cell box
/// and declines to relayout until a later probe succeeds.
pub type MeasureItemCallback = Arc<dyn Fn() -> CellBox + Send + Sync>;

/// Synchronous read of the scroll container's current geometry.
///
/// Called on every recalculation so the engine never works from a stale
/// scroll offset or client size.
pub type ViewportCallback = Arc<dyn Fn() -> ViewportGeometry + Send + Sync>;

/// Fire-and-forget request for more data.
///
/// The engine never awaits completion; the data source reports progress by
/// pushing [`crate::LoadState`] and item-count updates back in.
pub type LoadMoreCallback = Arc<dyn Fn() + Send + Sync>;

/// A callback fired when the engine's observable state changes.
///
/// The second argument is `is_scrolling`.
pub type OnChangeCallback = Arc<dyn Fn(&GridVirtualizer, bool) + Send + Sync>;

/// Configuration for [`crate::GridVirtualizer`].
///
/// Cheap to clone: collaborator callbacks are stored in `Arc`s. The layout
/// knobs are fixed for the lifetime of a grid instance; build a new engine to
/// change them.
pub struct GridOptions {
    /// Current length of the item sequence.
    pub item_count: usize,
    pub measure_item: MeasureItemCallback,
    pub get_viewport: ViewportCallback,
    pub load_more: Option<LoadMoreCallback>,
    /// Optional hook for adapters to drive re-rendering from engine updates.
    pub on_change: Option<OnChangeCallback>,

    /// Vertical space between rows, in pixels.
    pub row_gap: u32,
    /// Horizontal space between columns, in pixels.
    pub column_gap: u32,
    /// Floor for the effective cell width in column math; see
    /// [`GridLayoutConfig::min_column_width`].
    pub min_column_width: u32,
    /// Extra fully materialized rows above and below the visible span.
    pub overscan_rows: usize,

    /// Quiet period after the most recent scroll event before `is_scrolling`
    /// resets.
    pub is_scrolling_reset_delay_ms: u64,
    /// Debounce for resize events; 0 re-probes and relayouts immediately.
    pub resize_debounce_ms: u64,
}

impl GridOptions {
    /// Creates options for a grid of `item_count` items.
    ///
    /// `measure_item` and `get_viewport` are the two collaborator probes the
    /// engine consumes; everything else has a default and a `with_*` setter.
    pub fn new(
        item_count: usize,
        measure_item: impl Fn() -> CellBox + Send + Sync + 'static,
        get_viewport: impl Fn() -> ViewportGeometry + Send + Sync + 'static,
    ) -> Self {
        let layout = GridLayoutConfig::default();
        Self {
            item_count,
            measure_item: Arc::new(measure_item),
            get_viewport: Arc::new(get_viewport),
            load_more: None,
            on_change: None,
            row_gap: layout.row_gap,
            column_gap: layout.column_gap,
            min_column_width: layout.min_column_width,
            overscan_rows: layout.overscan_rows,
            is_scrolling_reset_delay_ms: 100,
            resize_debounce_ms: 0,
        }
    }

    /// The layout knobs as the pure calculator consumes them.
    pub fn layout_config(&self) -> GridLayoutConfig {
        GridLayoutConfig {
            row_gap: self.row_gap,
            column_gap: self.column_gap,
            min_column_width: self.min_column_width,
            overscan_rows: self.overscan_rows,
        }
    }

    pub fn with_row_gap(mut self, row_gap: u32) -> Self {
        self.row_gap = row_gap;
        self
    }

    pub fn with_column_gap(mut self, column_gap: u32) -> Self {
        self.column_gap = column_gap;
        self
    }

    pub fn with_min_column_width(mut self, min_column_width: u32) -> Self {
        self.min_column_width = min_column_width;
        self
    }

    pub fn with_overscan_rows(mut self, overscan_rows: usize) -> Self {
        self.overscan_rows = overscan_rows;
        self
    }

    pub fn with_is_scrolling_reset_delay_ms(mut self, delay_ms: u64) -> Self {
        self.is_scrolling_reset_delay_ms = delay_ms;
        self
    }

    pub fn with_resize_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.resize_debounce_ms = debounce_ms;
        self
    }

    pub fn with_load_more(
        mut self,
        load_more: Option<impl Fn() + Send + Sync + 'static>,
    ) -> Self {
        self.load_more = load_more.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&GridVirtualizer, bool) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl Clone for GridOptions {
    fn clone(&self) -> Self {
        Self {
            item_count: self.item_count,
            measure_item: Arc::clone(&self.measure_item),
            get_viewport: Arc::clone(&self.get_viewport),
            load_more: self.load_more.clone(),
            on_change: self.on_change.clone(),
            row_gap: self.row_gap,
            column_gap: self.column_gap,
            min_column_width: self.min_column_width,
            overscan_rows: self.overscan_rows,
            is_scrolling_reset_delay_ms: self.is_scrolling_reset_delay_ms,
            resize_debounce_ms: self.resize_debounce_ms,
        }
    }
}

impl core::fmt::Debug for GridOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GridOptions")
            .field("item_count", &self.item_count)
            .field("row_gap", &self.row_gap)
            .field("column_gap", &self.column_gap)
            .field("min_column_width", &self.min_column_width)
            .field("overscan_rows", &self.overscan_rows)
            .field(
                "is_scrolling_reset_delay_ms",
                &self.is_scrolling_reset_delay_ms,
            )
            .field("resize_debounce_ms", &self.resize_debounce_ms)
            .finish_non_exhaustive()
    }
}
