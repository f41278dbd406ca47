//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level window events) with the resize viewport.
//
// Architecture:
// ```text
//  Main Thread:                           Consumer Thread:
//  ┌────────────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop              │    │  EventCollector  │
//  │   ↓ WindowEvent::Resized       │    │   ↓              │
//  │  Viewport::resize_to()         │    │  consumer(delta) │
//  │   ↓ host callback              │    │                  │
//  │  LiveResizeSource (deltas)     │    └──────────────────┘
//  │   ↓                            │             ↑
//  │  DeltaForwarder ───────────────┼─────────────┘
//  └────────────────────────────────┘    RunnerEvent
// ```
//
// Key Design Decisions:
// - **Initial size is silent**: The window's first inner size seeds the
//   viewport without notifying, so the first real resize becomes the
//   first snapshot
// - **Graceful channel disconnect**: If the consumer thread dies, the
//   platform logs a warning but keeps running to allow window closure
// - **Main thread requirement**: Winit mandates main thread on macOS/iOS,
//   so this runs on the thread that called `ResizeRunner::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod event_mapper;

//=== External Crates =====================================================

use std::rc::Rc;

use crossbeam_channel::Sender;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::core::host::Viewport;
use crate::core::platform_bridge::{RunnerError, RunnerEvent};
use crate::core::resize::RawSizeSnapshot;

//=== WindowConfig ========================================================

/// Window attributes chosen by the runner builder.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WindowConfig {
    pub(crate) title: String,
    pub(crate) inner_size: (u32, u32),
}

//=== Platform ============================================================

/// Window owner and resize notifier.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(..)` - no window yet
/// 2. **Execution**: `platform.run()` - starts event loop
/// 3. **Event processing**: Winit calls `ApplicationHandler` methods
/// 4. **Shutdown**: User closes window → sends `WindowClosed` → exits
///
/// # Thread Safety
///
/// Holds an `Rc<Viewport>`, so it is neither Send nor Sync and stays on
/// the main thread. The consumer is reached only through the sender.
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    /// Host the live resize source is registered with.
    viewport: Rc<Viewport>,

    /// Channel to the consumer thread (close notification only).
    event_sender: Sender<RunnerEvent>,

    config: WindowConfig,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Does not create the window yet - that happens lazily in `resumed()`.
    pub(crate) fn new(
        viewport: Rc<Viewport>,
        event_sender: Sender<RunnerEvent>,
        config: WindowConfig,
    ) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            viewport,
            event_sender,
            config,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the Winit event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the event loop cannot be created or
    /// terminates with an error.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub(crate) fn run(mut self) -> Result<(), RunnerError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(RunnerError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(RunnerError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Pushes a new window size into the viewport, firing its listeners.
    fn handle_resize(&self, size: PhysicalSize<u32>) {
        let snapshot = RawSizeSnapshot::from(size);
        trace!(
            target: "platform",
            "Window resized to {}x{}",
            snapshot.width,
            snapshot.height
        );
        self.viewport.resize_to(snapshot.width, snapshot.height);
    }

    /// Tells the consumer thread to finish.
    fn notify_closed(&self) {
        if self.event_sender.send(RunnerEvent::WindowClosed).is_err() {
            warn!(target: "platform", "Channel disconnected, consumer already gone");
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Called when app becomes active (startup or mobile resume).
    ///
    /// Creates the window if it doesn't exist yet. On mobile, this may be
    /// called multiple times (suspend/resume cycle).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let (width, height) = self.config.inner_size;
        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(width, height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    size.width,
                    size.height,
                    window.scale_factor()
                );
                self.viewport.set_size(size.width, size.height);
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.notify_closed();
                event_loop.exit();
            }
        }
    }

    /// Handles per-window events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.notify_closed();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => self.handle_resize(size),

            _ => {
                // Ignore: input, focus, redraw, etc. (not needed for resize)
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::ResizeHost;
    use crossbeam_channel::unbounded;
    use std::cell::Cell;

    fn config() -> WindowConfig {
        WindowConfig {
            title: "test".to_string(),
            inner_size: (800, 600),
        }
    }

    //=====================================================================
    // Platform Tests
    //=====================================================================

    #[test]
    fn platform_creation() {
        let (tx, _rx) = unbounded();
        let platform = Platform::new(Rc::new(Viewport::new(0, 0)), tx, config());
        assert!(platform.window().is_none(), "Window should be created lazily");
    }

    #[test]
    fn resize_updates_viewport_and_notifies() {
        let (tx, _rx) = unbounded();
        let viewport = Rc::new(Viewport::new(800, 600));
        let platform = Platform::new(Rc::clone(&viewport), tx, config());

        let fired = Rc::new(Cell::new(0));
        let fired_in = Rc::clone(&fired);
        viewport.subscribe(Box::new(move || fired_in.set(fired_in.get() + 1)));

        platform.handle_resize(PhysicalSize::new(1024, 768));

        assert_eq!(viewport.size(), RawSizeSnapshot::new(1024, 768));
        assert_eq!(fired.get(), 1, "Each Resized event must notify once");
    }

    #[test]
    fn notify_closed_sends_window_closed() {
        let (tx, rx) = unbounded();
        let platform = Platform::new(Rc::new(Viewport::default()), tx, config());

        platform.notify_closed();

        assert_eq!(rx.try_recv().unwrap(), RunnerEvent::WindowClosed);
    }

    #[test]
    fn notify_closed_handles_disconnected_channel() {
        let (tx, rx) = unbounded();
        let platform = Platform::new(Rc::new(Viewport::default()), tx, config());
        drop(rx);

        // Should not panic, just log warning
        platform.notify_closed();
    }
}
