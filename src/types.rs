/// The measured bounding box of one reference cell, in viewport pixels.
///
/// All layout math assumes every cell in the grid shares this box. Until both
/// dimensions are positive the box counts as unmeasured and layout declines to
/// run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellBox {
    pub width: u32,
    pub height: u32,
}

impl CellBox {
    pub fn is_measured(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// A fresh read of the scroll container's geometry.
///
/// Adapters return this from their viewport callback; the engine re-reads it
/// on every recalculation rather than caching a stale copy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportGeometry {
    pub scroll_top: u64,
    pub client_width: u32,
    pub client_height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// The authoritative render instruction: which index range to materialize and
/// how much scroll space to reserve above and below it.
///
/// `offset_top + rendered height + offset_bottom` always equals the full grid
/// height implied by the item count and cell box, so the native scrollbar
/// never jumps as the window moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleWindow {
    pub start_index: usize,
    pub end_index: usize, // exclusive
    /// Leading spacer height in pixels (rows above the window).
    pub offset_top: u64,
    /// Trailing spacer height in pixels (rows below the window).
    pub offset_bottom: u64,
}

impl VisibleWindow {
    pub const EMPTY: Self = Self {
        start_index: 0,
        end_index: 0,
        offset_top: 0,
        offset_bottom: 0,
    };

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    /// Number of item slots the view layer should materialize.
    pub fn slot_count(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    /// Highest materialized index, if any.
    pub fn last_index(&self) -> Option<usize> {
        (!self.is_empty()).then(|| self.end_index - 1)
    }
}

/// Load state owned by the external data source, consumed read-only by the
/// loader trigger.
///
/// A new load request is never dispatched while `is_loading` is true or once
/// `has_more` is false.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadState {
    pub is_loading: bool,
    pub has_more: bool,
}

impl Default for LoadState {
    /// Idle with more data assumed available until the source says otherwise.
    fn default() -> Self {
        Self {
            is_loading: false,
            has_more: true,
        }
    }
}
