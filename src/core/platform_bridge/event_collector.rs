//=========================================================================
// Event Collector
//=========================================================================
//
// Both ends of the window → consumer channel.
//
// Architecture:
//   LiveResizeSource ─► DeltaForwarder ─► Sender<RunnerEvent>
//                                              │ (bounded)
//                                              ▼
//   consumer thread ◄─ EventCollector ◄─ Receiver<RunnerEvent>
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, Sender};
use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::RunnerEvent;
use crate::core::resize::ResizeDelta;
use crate::core::stream::Listener;

//=== TickControl =========================================================

/// Consumer loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== DeltaForwarder ======================================================

/// Listener that pushes every delta onto the consumer channel.
///
/// A disconnected channel (consumer gone) drops the delta with a warning
/// so the window thread keeps running until the user closes it.
pub(crate) struct DeltaForwarder {
    sender: Sender<RunnerEvent>,
}

impl DeltaForwarder {
    pub(crate) fn new(sender: Sender<RunnerEvent>) -> Self {
        Self { sender }
    }
}

impl Listener<ResizeDelta> for DeltaForwarder {
    fn next(&mut self, delta: ResizeDelta) {
        trace!(target: "runner", "Forwarding {:?}", delta);
        if self.sender.send(RunnerEvent::Resized(delta)).is_err() {
            warn!(target: "runner", "Channel disconnected, dropping {:?}", delta);
        }
    }
}

//=== EventCollector ======================================================

/// Consumer-side receiver: hands deltas to the consumer until close.
pub(crate) struct EventCollector {
    receiver: Receiver<RunnerEvent>,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<RunnerEvent>) -> Self {
        Self { receiver }
    }

    /// Blocks for one event and dispatches it.
    pub(crate) fn collect<F>(&self, consumer: &mut F) -> TickControl
    where
        F: FnMut(ResizeDelta),
    {
        match self.receiver.recv() {
            Ok(RunnerEvent::Resized(delta)) => {
                consumer(delta);
                TickControl::Continue
            }
            Ok(RunnerEvent::WindowClosed) => TickControl::Exit,
            Err(_) => TickControl::Exit,
        }
    }

    /// Dispatches events until the window closes or the sender goes away.
    /// Returns the number of deltas delivered.
    pub(crate) fn run<F>(&self, mut consumer: F) -> usize
    where
        F: FnMut(ResizeDelta),
    {
        let mut delivered = 0;
        let mut counting = |delta| {
            delivered += 1;
            consumer(delta);
        };
        while self.collect(&mut counting) == TickControl::Continue {}
        delivered
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
