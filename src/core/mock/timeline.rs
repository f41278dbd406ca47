//=========================================================================
// Virtual Timeline
//=========================================================================
//
// Deterministic clock for driving mock streams from marble diagrams.
//
// Architecture:
// ```text
//   diagram("-a--b-|") ──parse──> [(1, a), (4, b), (6, |)]
//                                      │ start(sink)
//                                      ▼
//   VirtualTimeline queue: BTreeMap<(frame, seq), action>
//                                      │ advance_to(n) / run()
//                                      ▼
//                              sink.next(a), sink.next(b), sink.complete()
// ```
//
// Frames are absolute from timeline creation. A stream started at frame n
// only schedules entries at frames >= n.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::{Rc, Weak};

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::stream::{EventStream, Producer, Sink};

//=== DiagramError ========================================================

/// Marble diagram parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagramError {
    /// A marble character has no entry in the value map.
    MissingValue(char),

    /// Something other than `-` or whitespace follows `|`.
    ValueAfterCompletion { frame: u64 },
}

impl fmt::Display for DiagramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingValue(c) => write!(f, "No value given for marble '{}'", c),
            Self::ValueAfterCompletion { frame } => {
                write!(f, "Marble at frame {} follows completion", frame)
            }
        }
    }
}

impl std::error::Error for DiagramError {}

//=== Marble Parsing ======================================================

#[derive(Debug, Clone, PartialEq)]
enum Marble<T> {
    Next(T),
    Complete,
}

fn parse<T: Clone>(
    marbles: &str,
    values: &HashMap<char, T>,
) -> Result<Vec<(u64, Marble<T>)>, DiagramError> {
    let mut entries = Vec::new();
    let mut frame = 0u64;
    let mut completed = false;

    for c in marbles.chars().filter(|c| !c.is_whitespace()) {
        match c {
            '-' => {}
            '|' if !completed => {
                entries.push((frame, Marble::Complete));
                completed = true;
            }
            _ if completed => return Err(DiagramError::ValueAfterCompletion { frame }),
            _ => {
                let value = values.get(&c).ok_or(DiagramError::MissingValue(c))?;
                entries.push((frame, Marble::Next(value.clone())));
            }
        }
        frame += 1;
    }

    Ok(entries)
}

//=== VirtualTimeline =====================================================

type Action = Box<dyn FnOnce()>;

struct Schedule {
    now: u64,
    seq: u64,
    queue: BTreeMap<(u64, u64), Action>,
}

/// Simulated clock. Cloning yields another handle to the same clock.
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use std::collections::HashMap;
/// use std::rc::Rc;
/// use resize_driver::core::mock::VirtualTimeline;
/// use resize_driver::core::resize::{mock_resize_source, ResizeDelta, ResizeSource};
///
/// let timeline = VirtualTimeline::new();
/// let values = HashMap::from([
///     ('a', ResizeDelta::new(250, 0)),
///     ('b', ResizeDelta::new(0, -150)),
/// ]);
/// let source = mock_resize_source(timeline.diagram("-a--b-", &values).unwrap());
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
/// let _sub = source.resize().subscribe(move |d| sink.borrow_mut().push(d));
///
/// timeline.advance_to(2);
/// assert_eq!(seen.borrow().len(), 1);
///
/// timeline.run();
/// assert_eq!(seen.borrow().len(), 2);
/// ```
#[derive(Clone)]
pub struct VirtualTimeline {
    schedule: Rc<RefCell<Schedule>>,
}

impl VirtualTimeline {
    pub fn new() -> Self {
        Self {
            schedule: Rc::new(RefCell::new(Schedule {
                now: 0,
                seq: 0,
                queue: BTreeMap::new(),
            })),
        }
    }

    /// Current frame.
    pub fn now(&self) -> u64 {
        self.schedule.borrow().now
    }

    /// Number of actions waiting to run.
    pub fn pending(&self) -> usize {
        self.schedule.borrow().queue.len()
    }

    /// Builds a stream that replays `marbles` on this timeline.
    ///
    /// `-` is an empty frame, `|` completes, whitespace is ignored and any
    /// other character is looked up in `values`. Every non-whitespace
    /// character occupies one frame.
    pub fn diagram<T>(
        &self,
        marbles: &str,
        values: &HashMap<char, T>,
    ) -> Result<EventStream<T>, DiagramError>
    where
        T: Clone + 'static,
    {
        let entries = parse(marbles, values)?;
        Ok(EventStream::create(DiagramProducer {
            timeline: Rc::downgrade(&self.schedule),
            entries: Rc::new(entries),
            scheduled: Vec::new(),
        }))
    }

    /// Runs every action scheduled at or before `frame`, then sets the
    /// clock to `frame`. Never moves the clock backwards.
    pub fn advance_to(&self, frame: u64) {
        while let Some(action) = self.pop_due(frame) {
            action();
        }
        let mut schedule = self.schedule.borrow_mut();
        schedule.now = schedule.now.max(frame);
    }

    /// Runs until nothing is scheduled.
    pub fn run(&self) {
        while let Some(action) = self.pop_due(u64::MAX) {
            action();
        }
    }

    fn pop_due(&self, limit: u64) -> Option<Action> {
        let mut schedule = self.schedule.borrow_mut();
        let (&(frame, seq), _) = schedule.queue.first_key_value()?;
        if frame > limit {
            return None;
        }
        schedule.now = frame;
        trace!(target: "resize::mock", "Running action at frame {}", frame);
        schedule.queue.remove(&(frame, seq))
    }
}

impl Default for VirtualTimeline {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VirtualTimeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let schedule = self.schedule.borrow();
        f.debug_struct("VirtualTimeline")
            .field("now", &schedule.now)
            .field("pending", &schedule.queue.len())
            .finish()
    }
}

type Slot = (u64, u64);

fn schedule_at(schedule: &Rc<RefCell<Schedule>>, frame: u64, action: Action) -> Slot {
    let mut schedule = schedule.borrow_mut();
    let slot = (frame, schedule.seq);
    schedule.seq += 1;
    schedule.queue.insert(slot, action);
    slot
}

//=== DiagramProducer =====================================================

struct DiagramProducer<T> {
    timeline: Weak<RefCell<Schedule>>,
    entries: Rc<Vec<(u64, Marble<T>)>>,

    /// Queue slots of this run's entries that may still be waiting.
    scheduled: Vec<Slot>,
}

impl<T: Clone + 'static> Producer<T> for DiagramProducer<T> {
    fn start(&mut self, sink: Sink<T>) {
        let Some(schedule) = self.timeline.upgrade() else {
            return;
        };

        let now = schedule.borrow().now;
        for (index, (frame, _)) in self.entries.iter().enumerate() {
            if *frame < now {
                continue;
            }

            let entries = Rc::clone(&self.entries);
            let sink = sink.clone();
            let slot = schedule_at(
                &schedule,
                *frame,
                Box::new(move || match &entries[index].1 {
                    Marble::Next(value) => sink.next(value.clone()),
                    Marble::Complete => sink.complete(),
                }),
            );
            self.scheduled.push(slot);
        }
    }

    fn stop(&mut self) {
        let slots = std::mem::take(&mut self.scheduled);
        let Some(schedule) = self.timeline.upgrade() else {
            return;
        };

        // Slots already run are gone from the queue; removing them is a no-op.
        let cancelled: Vec<Action> = {
            let mut schedule = schedule.borrow_mut();
            slots
                .iter()
                .filter_map(|slot| schedule.queue.remove(slot))
                .collect()
        };
        trace!(target: "resize::mock", "Cancelled {} pending actions", cancelled.len());
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::stream::{Listener, Subscription};
    use std::cell::Cell;

    fn values() -> HashMap<char, i32> {
        HashMap::from([('a', 1), ('b', 2), ('c', 3)])
    }

    struct Recorder {
        timeline: VirtualTimeline,
        seen: Rc<RefCell<Vec<(u64, i32)>>>,
        completed_at: Rc<Cell<Option<u64>>>,
    }

    impl Listener<i32> for Recorder {
        fn next(&mut self, value: i32) {
            self.seen.borrow_mut().push((self.timeline.now(), value));
        }

        fn complete(&mut self) {
            self.completed_at.set(Some(self.timeline.now()));
        }
    }

    type Seen = Rc<RefCell<Vec<(u64, i32)>>>;

    fn record(timeline: &VirtualTimeline, stream: &EventStream<i32>) -> (Seen, Rc<Cell<Option<u64>>>, Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let completed_at = Rc::new(Cell::new(None));
        let sub = stream.subscribe(Recorder {
            timeline: timeline.clone(),
            seen: Rc::clone(&seen),
            completed_at: Rc::clone(&completed_at),
        });
        (seen, completed_at, sub)
    }

    //=====================================================================
    // Parsing Tests
    //=====================================================================

    #[test]
    fn parse_assigns_frames() {
        let entries = parse("-a--b-|", &values()).unwrap();
        assert_eq!(
            entries,
            vec![(1, Marble::Next(1)), (4, Marble::Next(2)), (6, Marble::Complete)]
        );
    }

    #[test]
    fn parse_ignores_whitespace() {
        let entries = parse(" a - b ", &values()).unwrap();
        assert_eq!(entries, vec![(0, Marble::Next(1)), (2, Marble::Next(2))]);
    }

    #[test]
    fn parse_rejects_unknown_marble() {
        assert_eq!(parse("-x-", &values()), Err(DiagramError::MissingValue('x')));
    }

    #[test]
    fn parse_rejects_value_after_completion() {
        assert_eq!(
            parse("a|-b", &values()),
            Err(DiagramError::ValueAfterCompletion { frame: 3 })
        );
    }

    #[test]
    fn diagram_error_display() {
        let msg = DiagramError::MissingValue('q').to_string();
        assert!(msg.contains("'q'"), "Message should name the marble: {}", msg);
    }

    //=====================================================================
    // Timeline Tests
    //=====================================================================

    #[test]
    fn values_arrive_on_their_frames() {
        let timeline = VirtualTimeline::new();
        let stream = timeline.diagram("-a--b-|", &values()).unwrap();
        let (seen, completed_at, _sub) = record(&timeline, &stream);

        timeline.run();

        assert_eq!(*seen.borrow(), vec![(1, 1), (4, 2)]);
        assert_eq!(completed_at.get(), Some(6));
        assert_eq!(timeline.pending(), 0);
    }

    #[test]
    fn advance_to_runs_only_due_actions() {
        let timeline = VirtualTimeline::new();
        let stream = timeline.diagram("a-b-c", &values()).unwrap();
        let (seen, _completed, _sub) = record(&timeline, &stream);

        timeline.advance_to(2);
        assert_eq!(*seen.borrow(), vec![(0, 1), (2, 2)]);
        assert_eq!(timeline.now(), 2);

        timeline.advance_to(10);
        assert_eq!(seen.borrow().len(), 3);
        assert_eq!(timeline.now(), 10);
    }

    #[test]
    fn advance_never_moves_backwards() {
        let timeline = VirtualTimeline::new();
        timeline.advance_to(5);
        timeline.advance_to(3);
        assert_eq!(timeline.now(), 5);
    }

    #[test]
    fn nothing_scheduled_before_subscription() {
        let timeline = VirtualTimeline::new();
        let _stream = timeline.diagram("a-b", &values()).unwrap();
        assert_eq!(timeline.pending(), 0, "Diagram streams are lazy");
    }

    #[test]
    fn late_start_skips_past_frames() {
        let timeline = VirtualTimeline::new();
        let stream = timeline.diagram("a-b-c", &values()).unwrap();

        timeline.advance_to(3);
        let (seen, _completed, _sub) = record(&timeline, &stream);
        timeline.run();

        assert_eq!(*seen.borrow(), vec![(4, 3)], "Entries before the start frame are not replayed");
    }

    #[test]
    fn unsubscribe_cancels_pending_entries() {
        let timeline = VirtualTimeline::new();
        let stream = timeline.diagram("a-b-c", &values()).unwrap();
        let (seen, _completed, sub) = record(&timeline, &stream);

        timeline.advance_to(1);
        sub.unsubscribe();
        timeline.run();

        assert_eq!(*seen.borrow(), vec![(0, 1)]);
    }

    #[test]
    fn unsubscribe_removes_pending_entries() {
        let timeline = VirtualTimeline::new();
        let stream = timeline.diagram("a-b-c|", &values()).unwrap();
        let (_seen, _completed, sub) = record(&timeline, &stream);

        assert_eq!(timeline.pending(), 4);
        timeline.advance_to(1);
        assert_eq!(timeline.pending(), 3);

        sub.unsubscribe();
        assert_eq!(timeline.pending(), 0, "A stopped run leaves nothing queued");
    }

    #[test]
    fn resubscribe_after_unsubscribe_schedules_fresh_run() {
        let timeline = VirtualTimeline::new();
        let stream = timeline.diagram("a-b-c", &values()).unwrap();

        let (_old, _old_completed, sub) = record(&timeline, &stream);
        timeline.advance_to(1);
        sub.unsubscribe();

        let (seen, _completed, _sub) = record(&timeline, &stream);
        assert_eq!(timeline.pending(), 2, "Only the new run's remaining entries are queued");

        timeline.run();
        assert_eq!(*seen.borrow(), vec![(2, 2), (4, 3)]);
    }

    #[test]
    fn two_diagrams_interleave_by_frame() {
        let timeline = VirtualTimeline::new();
        let first = timeline.diagram("a---b", &values()).unwrap();
        let second = timeline.diagram("-c-c-", &values()).unwrap();

        let order = Rc::new(RefCell::new(Vec::new()));
        let o1 = Rc::clone(&order);
        let o2 = Rc::clone(&order);
        let _s1 = first.subscribe(move |v| o1.borrow_mut().push(v));
        let _s2 = second.subscribe(move |v| o2.borrow_mut().push(v));

        timeline.run();

        assert_eq!(*order.borrow(), vec![1, 3, 3, 2]);
    }
}
