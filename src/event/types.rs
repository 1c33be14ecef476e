//! Event data model — bar-local notes from generators and resolved,
//! tick-timed events on a track.

use std::fmt;

use serde::{Deserialize, Serialize};

/// General MIDI reserves channel 10 (index 9) for percussion.
pub const PERCUSSION_CHANNEL: u8 = 9;

/// Instrument role of a track. Declared in track order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackRole {
    Chords,
    Bass,
    Melody,
    Lead,
    Percussion,
}

impl TrackRole {
    pub const ALL: [TrackRole; 5] = [
        TrackRole::Chords,
        TrackRole::Bass,
        TrackRole::Melody,
        TrackRole::Lead,
        TrackRole::Percussion,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TrackRole::Chords => "chords",
            TrackRole::Bass => "bass",
            TrackRole::Melody => "melody",
            TrackRole::Lead => "lead",
            TrackRole::Percussion => "percussion",
        }
    }

    /// Zero-based MIDI channel.
    pub fn channel(self) -> u8 {
        match self {
            TrackRole::Chords => 0,
            TrackRole::Bass => 1,
            TrackRole::Melody => 2,
            TrackRole::Lead => 3,
            TrackRole::Percussion => PERCUSSION_CHANNEL,
        }
    }

    /// Whether key changes apply to this role.
    pub fn is_pitched(self) -> bool {
        self != TrackRole::Percussion
    }
}

impl fmt::Display for TrackRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A note inside one bar, as produced by a generator.
///
/// `beat` is the offset from the bar start in `[0, 4)`. A rest is never
/// a `NoteEvent`; generators simply emit nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    pub pitch: u8,
    pub beat: f64,
    /// Length in beats.
    pub duration: f64,
    pub velocity: u8,
}

impl NoteEvent {
    /// Pitch is clamped to 0–127 and velocity to 1–127.
    pub fn new(pitch: u8, beat: f64, duration: f64, velocity: u8) -> Self {
        Self {
            pitch: pitch.min(127),
            beat,
            duration,
            velocity: velocity.clamp(1, 127),
        }
    }
}

/// A note resolved onto a track's tick timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedEvent {
    pub pitch: u8,
    /// Ticks since the end of the previous event on the same track.
    pub delta_ticks: u64,
    pub duration_ticks: u64,
    pub velocity: u8,
    pub channel: u8,
    /// Absolute onset from song start.
    pub start_tick: u64,
}

impl TimedEvent {
    pub fn end_tick(&self) -> u64 {
        self.start_tick + self.duration_ticks
    }
}
