//! Chord voicing — block, arpeggio and strum layouts of one chord per bar.
//!
//! [`ChordVoicer`] does the layout. [`ChordGenerator`] and [`LeadGenerator`]
//! split the work between the chords and lead tracks: with a lead timbre the
//! chords track holds block chords and the lead plays the pattern an octave
//! up; without one the chords track plays the pattern itself.

use rand::RngCore;

use crate::event::{NoteEvent, TrackRole};
use crate::style::VoicingStyle;
use crate::theory::Chord;

use super::{BarContext, PartGenerator};

/// Velocity boost of the lead over the sustained chords.
const LEAD_ACCENT: u8 = 10;

/// Lays out a voiced chord across a bar.
#[derive(Debug, Clone, Copy)]
pub struct ChordVoicer {
    octave: u8,
    /// Stagger between strummed tones, in beats.
    strum_spread: f64,
}

impl ChordVoicer {
    pub fn new(octave: u8, strum_spread: f64) -> Self {
        Self {
            octave,
            strum_spread: strum_spread.clamp(0.0, 0.25),
        }
    }

    /// The same voicer one octave higher.
    pub fn octave_up(self) -> Self {
        Self {
            octave: self.octave.saturating_add(1),
            ..self
        }
    }

    pub fn voice(&self, chord: &Chord, style: VoicingStyle, velocity: u8) -> Vec<NoteEvent> {
        let tones = chord.voice(self.octave);
        match style {
            VoicingStyle::Block => tones
                .iter()
                .map(|&p| NoteEvent::new(p, 0.0, 4.0, velocity))
                .collect(),
            VoicingStyle::Arpeggio => (0..8)
                .map(|slot| {
                    let pitch = tones[slot % tones.len()];
                    NoteEvent::new(pitch, slot as f64 * 0.5, 0.5, velocity)
                })
                .collect(),
            VoicingStyle::Strum => [0.0, 2.0]
                .iter()
                .flat_map(|&downbeat| {
                    tones.iter().enumerate().map(move |(i, &p)| {
                        let offset = i as f64 * self.strum_spread;
                        NoteEvent::new(p, downbeat + offset, 2.0 - offset, velocity)
                    })
                })
                .collect(),
        }
    }
}

/// The chords (keys/pad) track.
#[derive(Debug, Clone, Copy)]
pub struct ChordGenerator {
    voicer: ChordVoicer,
}

impl ChordGenerator {
    pub fn new(voicer: ChordVoicer) -> Self {
        Self { voicer }
    }
}

impl PartGenerator for ChordGenerator {
    fn role(&self) -> TrackRole {
        TrackRole::Chords
    }

    fn generate_bar(&mut self, ctx: &BarContext<'_>, _rng: &mut dyn RngCore) -> Vec<NoteEvent> {
        let style = if ctx.style.lead.is_some() {
            VoicingStyle::Block
        } else {
            ctx.style.voicing
        };
        self.voicer.voice(&ctx.chord, style, ctx.section.velocity())
    }
}

/// The rhythm-instrument track. Silent when the style has no lead timbre.
#[derive(Debug, Clone, Copy)]
pub struct LeadGenerator {
    voicer: ChordVoicer,
}

impl LeadGenerator {
    /// `voicer` is the chords voicer; the lead plays one octave above it.
    pub fn new(voicer: ChordVoicer) -> Self {
        Self {
            voicer: voicer.octave_up(),
        }
    }
}

impl PartGenerator for LeadGenerator {
    fn role(&self) -> TrackRole {
        TrackRole::Lead
    }

    fn generate_bar(&mut self, ctx: &BarContext<'_>, _rng: &mut dyn RngCore) -> Vec<NoteEvent> {
        if ctx.style.lead.is_none() {
            return Vec::new();
        }
        let velocity = ctx.section.velocity().saturating_add(LEAD_ACCENT);
        self.voicer.voice(&ctx.chord, ctx.style.voicing, velocity)
    }
}
