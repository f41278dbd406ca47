//=========================================================================
// Resize Runner
//
// Opens a real window and streams its resize deltas to a consumer.
//
// Architecture:
// ```text
//     ResizeRunnerBuilder  ──build()──>  ResizeRunner  ──run(consumer)──>  [Runtime]
//         │                                  │
//         ├─ with_title()                    ├─ spawns consumer thread
//         ├─ with_inner_size()               ├─ subscribes a live source
//         └─ with_channel_capacity()         ├─ runs platform
//                                            └─ blocks until exit
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::Rc;
use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::host::Viewport;
use crate::core::platform_bridge::{
    DeltaForwarder, EventCollector, RunnerError, RunnerEvent,
};
use crate::core::resize::{make_resize_driver, ResizeDelta, ResizeSource};
use crate::platform::{Platform, WindowConfig};

//=== ResizeRunnerBuilder =================================================

/// Builder for configuring and constructing a [`ResizeRunner`].
///
/// # Default Values
///
/// - **Title**: `"Resize Driver"`
/// - **Inner size**: 800×600 (logical pixels)
/// - **Channel capacity**: 128 events
///
/// # Examples
///
/// ```no_run
/// use resize_driver::ResizeRunnerBuilder;
///
/// ResizeRunnerBuilder::new()
///     .with_title("Drag me")
///     .with_inner_size(1024, 768)
///     .with_channel_capacity(256)
///     .build()
///     .run(|delta| println!("{:+} {:+}", delta.delta_x, delta.delta_y))
///     .expect("event loop failed");
/// ```
#[derive(Debug, Clone)]
pub struct ResizeRunnerBuilder {
    title: String,
    inner_size: (u32, u32),
    channel_capacity: usize,
}

impl ResizeRunnerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            title: "Resize Driver".to_string(),
            inner_size: (800, 600),
            channel_capacity: 128,
        }
    }

    /// Sets the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the initial inner size of the window in logical pixels.
    ///
    /// The initial size is never reported as a delta; only later resizes are.
    ///
    /// Default: 800×600
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_inner_size(mut self, width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "Inner size must be positive, got {}x{}",
            width,
            height
        );
        self.inner_size = (width, height);
        self
    }

    /// Sets the channel capacity for window → consumer communication.
    ///
    /// When the consumer falls behind and the channel is full, the window
    /// thread blocks until there is room again.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Builds the runner instance.
    pub fn build(self) -> ResizeRunner {
        info!(
            target: "runner",
            "Building runner (\"{}\", {}x{}, channel: {})",
            self.title,
            self.inner_size.0,
            self.inner_size.1,
            self.channel_capacity
        );

        ResizeRunner {
            config: WindowConfig {
                title: self.title,
                inner_size: self.inner_size,
            },
            channel_capacity: self.channel_capacity,
        }
    }
}

impl Default for ResizeRunnerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== ResizeRunner ========================================================

/// Windowed host for a live resize source.
///
/// # Architecture
///
/// ```text
/// ResizeRunner (Main Thread)
///   ├─► Viewport ◄── Platform (Winit event loop)
///   │     └─► LiveResizeSource ─► DeltaForwarder
///   │                                  │ bounded channel (RunnerEvent)
///   └─► Consumer Thread ◄──────────────┘
///         └─► consumer(delta)
/// ```
#[derive(Debug)]
pub struct ResizeRunner {
    config: WindowConfig,
    channel_capacity: usize,
}

impl ResizeRunner {
    /// Starts the window and blocks until it closes.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the bounded channel and spawns the consumer thread
    /// 2. Builds a live source through the driver and subscribes to it
    /// 3. Runs the platform event loop (blocks here)
    /// 4. On window close: unsubscribes, then joins the consumer thread
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the event loop cannot be created or fails.
    /// The consumer thread is still joined before returning.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread on platforms where Winit
    /// requires it (macOS/iOS).
    pub fn run<F>(self, consumer: F) -> Result<(), RunnerError>
    where
        F: FnMut(ResizeDelta) + Send + 'static,
    {
        info!(target: "runner", "Starting resize runner");

        //--- 1. Create communication channel ------------------------------
        let (tx, rx): (Sender<RunnerEvent>, Receiver<RunnerEvent>) =
            bounded(self.channel_capacity);

        info!(target: "runner", "Channel created (capacity: {})", self.channel_capacity);

        let consumer_handle = thread::spawn(move || EventCollector::new(rx).run(consumer));
        info!(target: "runner", "Consumer thread spawned");

        //--- 2. Wire a live source to the channel -------------------------
        let viewport = Rc::new(Viewport::default());
        let driver = make_resize_driver(viewport.clone());
        let subscription = driver().resize().subscribe(DeltaForwarder::new(tx.clone()));

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(viewport, tx, self.config);
        let result = platform.run();

        match &result {
            Ok(()) => info!(target: "runner", "Platform event loop exited"),
            Err(e) => error!(target: "runner", "Platform error: {}", e),
        }

        //--- 4. Cleanup ---------------------------------------------------
        // Dropping the last sender ends the consumer loop even if the
        // window never reported a close.
        subscription.unsubscribe();

        match consumer_handle.join() {
            Ok(delivered) => {
                info!(target: "runner", "Consumer thread finished ({} deltas)", delivered);
            }
            Err(e) => {
                error!(target: "runner", "Consumer thread panicked: {:?}", e);
            }
        }

        info!(target: "runner", "Runner shutdown complete");
        result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
