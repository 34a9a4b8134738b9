//! A headless windowing engine for uniform, incrementally loaded grids.
//!
//! The engine keeps render cost bounded for very large (possibly unbounded)
//! item collections: only the rows intersecting the viewport, plus a
//! configurable overscan margin, are materialized, while top/bottom offset
//! surrogates preserve the full scrollable height so the native scrollbar
//! never jumps. A tail watch on the final item requests more data from an
//! external source as the user approaches the end of the sequence.
//!
//! It is UI-agnostic. A GUI/DOM/TUI layer is expected to provide:
//! - a synchronous probe for the rendered size of one reference cell
//! - fresh viewport geometry (scroll offset, client size) on demand
//! - a fire-and-forget `load_more` hook, with [`LoadState`] and item-count
//!   updates pushed back in as the source makes progress
//!
//! Events (`on_scroll`, `on_resize`) and the timer pump (`tick`) take
//! wall-clock milliseconds from the adapter, so the engine runs identically
//! under a real event loop or a scripted test.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod engine;
mod layout;
mod loader;
mod options;
mod types;


pub use engine::GridVirtualizer;
pub use layout::{
    DEFAULT_MIN_COLUMN_WIDTH, GridLayoutConfig, column_count, compute_window, grid_height,
    row_pitch, total_rows,
};
pub use options::{
    GridOptions, LoadMoreCallback, MeasureItemCallback, OnChangeCallback, ViewportCallback,
};
pub use types::{CellBox, LoadState, ScrollDirection, ViewportGeometry, VisibleWindow};
