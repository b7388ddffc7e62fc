use crate::core::patient::Patient;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A pending state change in the simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A patient arrives at the clinic.
    Arrival { time: f64, patient: Patient },
    /// Server `server` finishes its current service and becomes free.
    Release { time: f64, server: usize },
}

impl Event {
    pub fn time(&self) -> f64 {
        match self {
            Event::Arrival { time, .. } => *time,
            Event::Release { time, .. } => *time,
        }
    }
}

/// Heap entry pairing an event with its insertion sequence number. The
/// sequence number breaks time ties so equal-time events pop in insertion
/// order, keeping runs deterministic for a fixed event sequence.
#[derive(Debug)]
struct Scheduled {
    seq: u64,
    event: Event,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on both keys for min-heap behavior in BinaryHeap: earliest
        // time first, lowest sequence number first among equal times.
        other
            .event
            .time()
            .total_cmp(&self.event.time())
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Time-ordered multiset of pending events with O(log n) push and pop.
#[derive(Debug, Default)]
pub struct EventTimeline {
    events: BinaryHeap<Scheduled>,
    next_seq: u64,
}

impl EventTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push(Scheduled { seq, event });
    }

    /// Remove and return the earliest pending event, or `None` if none remain.
    pub fn pop_earliest(&mut self) -> Option<Event> {
        self.events.pop().map(|scheduled| scheduled.event)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
