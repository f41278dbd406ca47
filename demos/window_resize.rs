//=========================================================================
// Window Resize Demo
//
// Opens a window and prints every resize delta, along with the running
// total since the first resize.
//
// Run with:
//   cargo run --example window_resize
//
//=========================================================================

use resize_driver::prelude::*;

fn main() -> Result<(), RunnerError> {
    let mut total = ResizeDelta::ZERO;

    ResizeRunnerBuilder::new()
        .with_title("Resize me")
        .with_inner_size(640, 480)
        .build()
        .run(move |delta| {
            total += delta;
            println!(
                "delta: {:+5} x {:+5}   total: {:+5} x {:+5}",
                delta.delta_x, delta.delta_y, total.delta_x, total.delta_y
            );
        })
}
