use alloc::sync::Arc;
use core::cell::Cell;
use core::cmp;

use crate::layout;
use crate::loader::{self, TailWatch};
use crate::{
    CellBox, GridOptions, LoadState, ScrollDirection, ViewportGeometry, VisibleWindow,
};

/// A headless windowing engine for uniform grids.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold any UI objects.
/// - Your adapter drives it with events (`on_scroll`, `on_resize`, `tick`)
///   plus data-source pushes (`set_item_count`, `set_load_state`).
/// - Geometry and cell measurements are pulled fresh through the callbacks in
///   [`GridOptions`] whenever the engine recomputes.
///
/// Time is supplied by the adapter as wall-clock milliseconds; the two
/// "timers" (scroll quiet-period, optional resize debounce) are owned deadline
/// values that each new event replaces, fired from [`GridVirtualizer::tick`].
#[derive(Clone, Debug)]
pub struct GridVirtualizer {
    options: GridOptions,
    cell: CellBox,
    geometry: ViewportGeometry,
    window: VisibleWindow,

    is_scrolling: bool,
    scroll_direction: Option<ScrollDirection>,
    last_scroll_event_ms: Option<u64>,
    pending_resize_ms: Option<u64>,

    load: LoadState,
    tail: TailWatch,
    highest_end_row: usize,
    disposed: bool,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl GridVirtualizer {
    /// Creates a new engine from options.
    ///
    /// Runs the dimension probe once (skipped while the item set is empty)
    /// and computes the initial window.
    pub fn new(options: GridOptions) -> Self {
        gdebug!(
            count = options.item_count,
            overscan_rows = options.overscan_rows,
            "GridVirtualizer::new"
        );
        let mut v = Self {
            cell: CellBox::default(),
            geometry: ViewportGeometry::default(),
            window: VisibleWindow::EMPTY,
            is_scrolling: false,
            scroll_direction: None,
            last_scroll_event_ms: None,
            pending_resize_ms: None,
            load: LoadState::default(),
            tail: TailWatch::default(),
            highest_end_row: 0,
            disposed: false,
            options,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        };
        v.batch_update(|v| {
            v.probe_inner();
            v.recompute();
        });
        v
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self, self.is_scrolling);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    ///
    /// Every event entry point already batches internally; use this when
    /// applying several data-source pushes in one frame.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.scroll_direction
    }

    /// Adapter override for platforms with a native scroll-end signal.
    pub fn set_is_scrolling(&mut self, is_scrolling: bool) {
        if self.disposed || self.is_scrolling == is_scrolling {
            return;
        }
        self.is_scrolling = is_scrolling;
        if !is_scrolling {
            self.scroll_direction = None;
            self.last_scroll_event_ms = None;
        }
        self.notify();
    }

    /// Handles one scroll event at `now_ms`.
    ///
    /// Marks the engine as scrolling, recomputes the window synchronously
    /// against freshly read geometry, and restarts the quiet-period deadline
    /// (replacing any pending one, so only the last event's timer fires).
    pub fn on_scroll(&mut self, now_ms: u64) {
        if self.disposed {
            return;
        }
        gtrace!(now_ms, "on_scroll");
        self.batch_update(|v| {
            let prev_top = v.geometry.scroll_top;
            v.set_is_scrolling(true);
            v.last_scroll_event_ms = Some(now_ms);
            v.recompute();
            v.scroll_direction = match v.geometry.scroll_top.cmp(&prev_top) {
                cmp::Ordering::Greater => Some(ScrollDirection::Forward),
                cmp::Ordering::Less => Some(ScrollDirection::Backward),
                cmp::Ordering::Equal => v.scroll_direction,
            };
        });
    }

    fn settle_scrolling(&mut self, now_ms: u64) {
        if !self.is_scrolling {
            return;
        }
        let Some(last) = self.last_scroll_event_ms else {
            return;
        };
        if now_ms.saturating_sub(last) >= self.options.is_scrolling_reset_delay_ms {
            self.set_is_scrolling(false);
        }
    }

    /// Handles a viewport resize at `now_ms`.
    ///
    /// With `resize_debounce_ms == 0` this re-probes the cell box and
    /// relayouts immediately; otherwise it replaces the pending resize
    /// deadline, which [`GridVirtualizer::tick`] fires once it elapses.
    pub fn on_resize(&mut self, now_ms: u64) {
        if self.disposed {
            return;
        }
        gtrace!(now_ms, "on_resize");
        if self.options.resize_debounce_ms == 0 {
            self.batch_update(|v| v.handle_resize());
            return;
        }
        self.pending_resize_ms = Some(now_ms.saturating_add(self.options.resize_debounce_ms));
    }

    fn fire_pending_resize(&mut self, now_ms: u64) {
        let Some(deadline) = self.pending_resize_ms else {
            return;
        };
        if now_ms < deadline {
            return;
        }
        self.pending_resize_ms = None;
        self.handle_resize();
    }

    fn handle_resize(&mut self) {
        // Column count depends on the available width, so the retained
        // high-water row is no longer comparable.
        self.highest_end_row = 0;
        self.probe_inner();
        self.recompute();
    }

    /// Advances the engine's timers.
    ///
    /// Fires whichever owned deadlines have elapsed: the scroll quiet-period
    /// (resets `is_scrolling`) and a pending debounced resize. Safe to call at
    /// any frequency.
    pub fn tick(&mut self, now_ms: u64) {
        if self.disposed {
            return;
        }
        self.batch_update(|v| {
            v.settle_scrolling(now_ms);
            v.fire_pending_resize(now_ms);
        });
    }

    /// Re-runs the dimension probe and relayouts (mount/first-paint hook).
    pub fn probe(&mut self) {
        if self.disposed {
            return;
        }
        self.batch_update(|v| {
            v.probe_inner();
            v.recompute();
        });
    }

    fn probe_inner(&mut self) {
        if self.options.item_count == 0 {
            // Nothing to render a reference cell from; layout stays idle
            // until items arrive.
            return;
        }
        let cell = (self.options.measure_item)();
        if !cell.is_measured() {
            gwarn!(
                width = cell.width,
                height = cell.height,
                "probe returned an unmeasured cell box"
            );
            return;
        }
        gdebug!(width = cell.width, height = cell.height, "probe");
        self.cell = cell;
    }

    /// Updates the item sequence length.
    ///
    /// Growth is the normal append-only path; a shrink is treated as a
    /// sequence restart. Recomputes the window and retargets the tail watch
    /// to the new final item.
    pub fn set_item_count(&mut self, item_count: usize) {
        if self.disposed || self.options.item_count == item_count {
            return;
        }
        gdebug!(
            from = self.options.item_count,
            to = item_count,
            "set_item_count"
        );
        if item_count < self.options.item_count {
            self.highest_end_row = 0;
        }
        self.options.item_count = item_count;
        self.batch_update(|v| {
            if !v.cell.is_measured() {
                v.probe_inner();
            }
            v.recompute();
        });
    }

    /// Consumes a load-state update pushed by the external data source.
    ///
    /// Re-attaches the tail watch, so a tail that is still inside the
    /// viewport reports a fresh crossing once the guards clear.
    pub fn set_load_state(&mut self, load: LoadState) {
        if self.disposed || self.load == load {
            return;
        }
        gtrace!(
            is_loading = load.is_loading,
            has_more = load.has_more,
            "set_load_state"
        );
        self.load = load;
        self.batch_update(|v| {
            v.tail.rearm();
            v.evaluate_tail();
            v.notify();
        });
    }

    pub fn load_state(&self) -> LoadState {
        self.load
    }

    /// True while the view layer should append trailing skeleton cells.
    pub fn show_loading_placeholders(&self) -> bool {
        self.load.is_loading && self.load.has_more
    }

    /// Recomputes the window from freshly read geometry.
    ///
    /// For adapters whose platform coalesces several mutations into one
    /// "something changed" signal.
    pub fn relayout(&mut self) {
        if self.disposed {
            return;
        }
        self.batch_update(|v| v.recompute());
    }

    fn recompute(&mut self) {
        if self.options.item_count == 0 {
            self.set_window(VisibleWindow::EMPTY);
            self.evaluate_tail();
            return;
        }
        if !self.cell.is_measured() {
            // Not probed yet: retain the previous window.
            return;
        }

        let geometry = (self.options.get_viewport)();
        self.geometry = geometry;

        let config = self.options.layout_config();
        let window = layout::compute_window(&config, self.cell, geometry, self.options.item_count);
        if let Some(last) = window.last_index() {
            let columns = layout::column_count(&config, self.cell, geometry.client_width);
            let end_row = last / columns;
            if end_row > self.highest_end_row {
                self.highest_end_row = end_row;
            }
        }
        self.set_window(window);
        self.evaluate_tail();
    }

    fn set_window(&mut self, window: VisibleWindow) {
        // The window is replaced wholesale; nothing mutates it in place.
        if self.window == window {
            return;
        }
        gtrace!(
            start_index = window.start_index,
            end_index = window.end_index,
            offset_top = window.offset_top,
            offset_bottom = window.offset_bottom,
            "window"
        );
        self.window = window;
        self.notify();
    }

    fn evaluate_tail(&mut self) {
        let count = self.options.item_count;
        // The watch attaches to the final item of the full sequence, and only
        // while that element is materialized by the current window.
        let target = (count > 0 && self.window.end_index == count && !self.window.is_empty())
            .then(|| count - 1);
        self.tail.retarget(target);
        if self.tail.target().is_none() {
            return;
        }

        let hit = loader::tail_intersects(
            &self.options.layout_config(),
            self.cell,
            self.geometry,
            count,
        );
        if !self.tail.update(hit) {
            return;
        }

        // Guard re-checked at dispatch time, not at watch setup.
        if self.load.is_loading || !self.load.has_more {
            return;
        }
        if let Some(load_more) = &self.options.load_more {
            gdebug!(count, "load_more");
            load_more();
        }
    }

    /// Releases the tail watch and invalidates both timers. Every later event
    /// or callback is a guaranteed no-op.
    pub fn teardown(&mut self) {
        if self.disposed {
            return;
        }
        gdebug!("teardown");
        self.disposed = true;
        self.tail.release();
        self.pending_resize_ms = None;
        self.last_scroll_event_ms = None;
        self.is_scrolling = false;
        self.scroll_direction = None;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn visible_window(&self) -> VisibleWindow {
        self.window
    }

    pub fn cell_box(&self) -> CellBox {
        self.cell
    }

    /// The geometry the current window was computed against.
    pub fn viewport_geometry(&self) -> ViewportGeometry {
        self.geometry
    }

    pub fn item_count(&self) -> usize {
        self.options.item_count
    }

    /// Columns at the current cell box and client width; 0 while unmeasured.
    pub fn columns(&self) -> usize {
        if !self.cell.is_measured() {
            return 0;
        }
        layout::column_count(
            &self.options.layout_config(),
            self.cell,
            self.geometry.client_width,
        )
    }

    pub fn total_rows(&self) -> usize {
        layout::total_rows(self.options.item_count, self.columns())
    }

    /// Full pixel height of the grid content; 0 while empty or unmeasured.
    pub fn total_size(&self) -> u64 {
        let columns = self.columns();
        if columns == 0 {
            return 0;
        }
        layout::grid_height(
            &self.options.layout_config(),
            self.cell,
            self.options.item_count,
            columns,
        )
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.total_size()
            .saturating_sub(self.geometry.client_height as u64)
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    /// Highest end row observed since the last resize or sequence restart.
    pub fn highest_end_row(&self) -> usize {
        self.highest_end_row
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&GridVirtualizer, bool) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
        self.notify();
    }
}
