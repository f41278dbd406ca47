//=========================================================================
// Resize Driver: Library Root
//
// This crate turns window resize notifications into a stream of relative
// size changes (deltas).
//
// Responsibilities:
// - Expose the resize sources (`LiveResizeSource`, `MockResizeSource`)
//   and the driver factory (`make_resize_driver`)
// - Keep internal modules (like `platform`) hidden from end users
// - Provide a windowed runner for watching deltas from a real window
//
// Typical usage:
// ```no_run
// use resize_driver::ResizeRunnerBuilder;
//
// fn main() {
//     ResizeRunnerBuilder::new()
//         .build()
//         .run(|delta| println!("{:?}", delta))
//         .unwrap();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the resize pipeline, the stream it is built on, the
// host contract and the mock timeline.
//
// `runner` opens a real window and forwards its deltas to a consumer.
//
pub mod core;
pub mod prelude;
pub mod runner;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains OS-specific logic (window, Winit integration,
// event loop) and is kept private, as it is not part of the public API
// surface.
//
mod platform;

//--- Public Exports ------------------------------------------------------
//
// Re-exports the main entry points so applications can skip the internal
// module structure.
//
pub use crate::core::platform_bridge::RunnerError;
pub use crate::core::resize::{
    make_resize_driver, mock_resize_source, LiveResizeSource, MockResizeSource,
    RawSizeSnapshot, ResizeDelta, ResizeSource,
};
pub use runner::{ResizeRunner, ResizeRunnerBuilder};
