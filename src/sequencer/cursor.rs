//! Per-track delta bookkeeping.
//!
//! A [`TrackCursor`] owns the "last emitted tick" of one track and turns
//! absolute onsets into delta-timed events. Deltas never go negative and
//! no event extends past the song end.

use crate::event::TimedEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackCursor {
    last_emitted: u64,
    total_ticks: u64,
}

impl TrackCursor {
    pub fn new(total_ticks: u64) -> Self {
        Self {
            last_emitted: 0,
            total_ticks,
        }
    }

    pub fn last_emitted(&self) -> u64 {
        self.last_emitted
    }

    /// Place a note at `start_tick`. Returns `None` for onsets at or past
    /// the song end.
    ///
    /// `delta = max(0, start - last_emitted)`; the duration is clamped to
    /// `1..=total - start`; afterwards `last_emitted = start + duration`.
    pub fn emit(
        &mut self,
        start_tick: u64,
        duration_ticks: u64,
        pitch: u8,
        velocity: u8,
        channel: u8,
    ) -> Option<TimedEvent> {
        if start_tick >= self.total_ticks {
            return None;
        }
        let duration_ticks = duration_ticks.clamp(1, self.total_ticks - start_tick);
        let delta_ticks = start_tick.saturating_sub(self.last_emitted);
        self.last_emitted = start_tick + duration_ticks;

        Some(TimedEvent {
            pitch,
            delta_ticks,
            duration_ticks,
            velocity,
            channel,
            start_tick,
        })
    }
}
