//! Part generators — one per instrument role, each turning a bar's chord
//! and section context into bar-local [`NoteEvent`]s.
//!
//! Generators are independent of each other. Randomness is always passed
//! in by the caller; none of them own a generator or touch global state.

pub mod bass;
pub mod chords;
pub mod groove;
pub mod melody;

pub use bass::BassGenerator;
pub use chords::{ChordGenerator, ChordVoicer, LeadGenerator};
pub use groove::GrooveGenerator;
pub use melody::MelodyGenerator;

use rand::RngCore;

use crate::config::RenderConfig;
use crate::event::{NoteEvent, TrackRole};
use crate::section::SectionKind;
use crate::style::StyleProfile;
use crate::theory::{Chord, PitchClass, ScaleMode};

/// Everything a generator may look at for one bar.
///
/// `chord` and `key` already include any active key change.
#[derive(Debug, Clone, Copy)]
pub struct BarContext<'a> {
    pub chord: Chord,
    pub section: SectionKind,
    pub style: &'a StyleProfile,
    pub key: PitchClass,
    pub mode: ScaleMode,
    pub energy: f64,
    pub valence: f64,
}

impl BarContext<'_> {
    /// Groove density: `min(1, 0.6·energy + 0.6·intensity)`.
    pub fn density(&self) -> f64 {
        (0.6 * self.energy + 0.6 * self.section.intensity()).clamp(0.0, 1.0)
    }
}

/// A per-role bar generator.
///
/// `generate_bar` is called once per bar in song order. Implementations may
/// keep simple running counters between calls but nothing else.
pub trait PartGenerator {
    fn role(&self) -> TrackRole;

    fn generate_bar(&mut self, ctx: &BarContext<'_>, rng: &mut dyn RngCore) -> Vec<NoteEvent>;
}

/// The standard ensemble, one generator per [`TrackRole`] in track order.
pub fn standard_parts(config: &RenderConfig) -> Vec<Box<dyn PartGenerator>> {
    let voicer = ChordVoicer::new(config.chord_octave, config.strum_spread_beats);
    vec![
        Box::new(ChordGenerator::new(voicer)),
        Box::new(BassGenerator::new(config.bass_octave)),
        Box::new(MelodyGenerator::new(config.melody_octave)),
        Box::new(LeadGenerator::new(voicer)),
        Box::new(GrooveGenerator),
    ]
}
