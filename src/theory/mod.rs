//! Music theory primitives — pitch classes, scales, and typed chords.

pub mod chord;
pub mod pitch;
pub mod scale;

pub use chord::{Chord, ChordQuality};
pub use pitch::{PitchClass, DEFAULT_ROOT};
pub use scale::ScaleMode;
