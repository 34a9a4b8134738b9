// Example: drive the windowing engine through a scripted scroll session.
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use gridwindow::{CellBox, GridOptions, GridVirtualizer, ViewportGeometry};

fn main() {
    let scroll_top = Arc::new(AtomicU64::new(0));

    let opts = GridOptions::new(
        1000,
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
    .with_overscan_rows(1);

    let mut grid = GridVirtualizer::new(opts);
    println!(
        "columns={} total_rows={} total_size={}px",
        grid.columns(),
        grid.total_rows(),
        grid.total_size()
    );

    for (now_ms, pos) in [(0u64, 0u64), (16, 400), (32, 1000), (48, 5000)] {
        scroll_top.store(pos, Ordering::Relaxed);
        grid.on_scroll(now_ms);
        let w = grid.visible_window();
        println!(
            "t={now_ms}ms scroll_top={pos} slots={} window={w:?} is_scrolling={}",
            w.slot_count(),
            grid.is_scrolling()
        );
    }

    grid.tick(200);
    println!("after settle: is_scrolling={}", grid.is_scrolling());
}
