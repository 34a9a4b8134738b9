// Example: an adapter loop against a simulated asynchronous data source.
//
// The loader callback only flags a request; the "fetch" resolves on a later
// frame by pushing a new item count and load state back into the engine.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use gridwindow::{CellBox, GridOptions, GridVirtualizer, LoadState, ViewportGeometry};

const PAGE: usize = 24;
const CATALOG: usize = 144;

fn main() {
    let scroll_top = Arc::new(AtomicU64::new(0));
    let requested = Arc::new(AtomicBool::new(false));

    let opts = GridOptions::new(
        48,
        || CellBox {
            width: 250,
            height: 200,
        },
        {
            let scroll_top = Arc::clone(&scroll_top);
            move || ViewportGeometry {
                scroll_top: scroll_top.load(Ordering::Relaxed),
                client_width: 1000,
                client_height: 800,
            }
        },
    )
    .with_load_more(Some({
        let requested = Arc::clone(&requested);
        move || {
            requested.store(true, Ordering::Relaxed);
        }
    }));

    let mut grid = GridVirtualizer::new(opts);
    let mut count = 48usize;
    let mut now_ms = 0u64;

    while count < CATALOG {
        now_ms += 16;
        let pos = (scroll_top.load(Ordering::Relaxed) + 600).min(grid.max_scroll_offset());
        scroll_top.store(pos, Ordering::Relaxed);
        grid.on_scroll(now_ms);
        grid.tick(now_ms);

        if requested.swap(false, Ordering::Relaxed) {
            println!("load_more() at t={now_ms}ms (count={count})");
            grid.set_load_state(LoadState {
                is_loading: true,
                has_more: true,
            });

            // The fetch resolves a frame later.
            now_ms += 16;
            count += PAGE;
            grid.set_item_count(count);
            grid.set_load_state(LoadState {
                is_loading: false,
                has_more: count < CATALOG,
            });
        }
    }

    now_ms += 200;
    grid.tick(now_ms);
    println!(
        "final count={count} window={:?} is_scrolling={} has_more={}",
        grid.visible_window(),
        grid.is_scrolling(),
        grid.load_state().has_more
    );
}
