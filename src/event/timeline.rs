//! Per-track event storage in emission order.
//!
//! A [`TrackTimeline`] is append-only: the sequencer pushes events in
//! non-decreasing onset order and never revisits them.

use serde::Serialize;

use super::types::{TimedEvent, TrackRole};

/// The resolved events of one instrument role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackTimeline {
    pub role: TrackRole,
    pub channel: u8,
    /// General MIDI program, `None` for percussion.
    pub program: Option<u8>,
    events: Vec<TimedEvent>,
}

impl TrackTimeline {
    pub fn new(role: TrackRole, program: Option<u8>) -> Self {
        Self {
            role,
            channel: role.channel(),
            program,
            events: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, event: TimedEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[TimedEvent] {
        &self.events
    }

    /// Delta ticks in emission order.
    pub fn deltas(&self) -> impl Iterator<Item = u64> + '_ {
        self.events.iter().map(|e| e.delta_ticks)
    }

    /// Tick at which the last note ends, or 0 for an empty track.
    pub fn end_tick(&self) -> u64 {
        self.events.iter().map(TimedEvent::end_tick).max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
