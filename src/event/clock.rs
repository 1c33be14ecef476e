//! Musical time in integer ticks.
//!
//! Generators think in fractional beats; everything downstream of the
//! sequencer is integer ticks at a single resolution shared by all tracks.
//! Conversion happens once, here.

use serde::{Deserialize, Serialize};

/// Default resolution: 480 ticks per quarter note.
pub const DEFAULT_TICKS_PER_BEAT: u16 = 480;

/// Largest resolution a Standard MIDI File header can carry (15 bits).
pub const MAX_TICKS_PER_BEAT: u16 = 0x7FFF;

/// Fixed time signature: 4 beats per bar.
pub const BEATS_PER_BAR: u32 = 4;

/// Converts beat positions to ticks at a fixed resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickClock {
    ticks_per_beat: u16,
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(DEFAULT_TICKS_PER_BEAT)
    }
}

impl TickClock {
    /// A zero resolution is bumped to one tick per beat.
    pub fn new(ticks_per_beat: u16) -> Self {
        Self {
            ticks_per_beat: ticks_per_beat.max(1),
        }
    }

    pub fn ticks_per_beat(self) -> u16 {
        self.ticks_per_beat
    }

    /// Round a fractional beat offset to the nearest tick. Negative offsets
    /// clamp to zero.
    pub fn beats_to_ticks(self, beats: f64) -> u64 {
        (beats.max(0.0) * self.ticks_per_beat as f64).round() as u64
    }

    pub fn bar_ticks(self) -> u64 {
        BEATS_PER_BAR as u64 * self.ticks_per_beat as u64
    }

    pub fn bars_to_ticks(self, bars: u32) -> u64 {
        bars as u64 * self.bar_ticks()
    }
}

/// Microseconds per quarter note for a tempo in BPM, as stored in a MIDI
/// tempo meta event.
pub fn micros_per_beat(bpm: u32) -> u32 {
    60_000_000 / bpm.max(1)
}
