//! Event model — bar-local generator output, tick clock and per-track
//! timelines.
//!
//! Generators emit [`NoteEvent`]s in beats relative to their bar. The
//! sequencer resolves them through a [`TickClock`] into [`TimedEvent`]s on
//! a [`TrackTimeline`] per [`TrackRole`].

pub mod clock;
pub mod timeline;
pub mod types;

pub use clock::{micros_per_beat, TickClock, BEATS_PER_BAR, DEFAULT_TICKS_PER_BEAT, MAX_TICKS_PER_BEAT};
pub use timeline::TrackTimeline;
pub use types::{NoteEvent, TimedEvent, TrackRole, PERCUSSION_CHANNEL};
