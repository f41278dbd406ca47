//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform-to-consumer interface types (events and errors).
//
// Defines the contract between the window thread and the consumer thread.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::resize::ResizeDelta;

//=== RunnerEvent =========================================================

/// Events sent from the window thread to the consumer thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RunnerEvent {
    /// One delta from the live resize source.
    Resized(ResizeDelta),

    /// Window close requested. The consumer thread exits on this.
    WindowClosed,
}

//=== RunnerError =========================================================

/// Window runner initialization and runtime errors.
///
/// These are fatal: without an event loop there is no window to resize.
#[derive(Debug)]
pub enum RunnerError {
    /// Event loop creation failed (OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop execution error.
    EventLoopExecution(winit::error::EventLoopError),
}

impl std::fmt::Display for RunnerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
        }
    }
}

impl std::error::Error for RunnerError {}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runner_event_is_cloneable() {
        let event = RunnerEvent::Resized(ResizeDelta::new(1, 2));
        assert_eq!(event.clone(), event);
    }

    #[test]
    fn runner_event_is_debug() {
        let debug_str = format!("{:?}", RunnerEvent::WindowClosed);
        assert!(debug_str.contains("WindowClosed"));
    }

    #[test]
    fn runner_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<RunnerError>();
    }
}
