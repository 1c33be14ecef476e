//! Melody generator — a four-step motif walked across the whole song.
//!
//! The motif is chosen by the sign of valence and is offset from the bar
//! chord's scale degree. One motif step is consumed per beat whether the
//! beat sounds or rests, so the phrase shape survives any rest pattern.

use rand::{Rng, RngCore};

use crate::event::{NoteEvent, TrackRole};

use super::{BarContext, PartGenerator};

/// Scale-degree offsets for non-negative valence.
pub const BRIGHT_MOTIF: [i32; 4] = [0, 2, 4, 2];
/// Scale-degree offsets for negative valence.
pub const DARK_MOTIF: [i32; 4] = [4, 3, 1, 0];

const LEAP_ENERGY: f64 = 0.7;
const LEAP_PROBABILITY: f64 = 0.25;
const LEAPS: [i32; 3] = [2, 4, 7];
const VELOCITY: u8 = 84;

#[derive(Debug, Clone)]
pub struct MelodyGenerator {
    octave: u8,
    step: u64,
}

impl MelodyGenerator {
    pub fn new(octave: u8) -> Self {
        Self { octave, step: 0 }
    }

    /// Number of beats walked so far, rests included.
    pub fn step(&self) -> u64 {
        self.step
    }

    fn motif(valence: f64) -> &'static [i32; 4] {
        if valence >= 0.0 {
            &BRIGHT_MOTIF
        } else {
            &DARK_MOTIF
        }
    }

    fn pitch_for(&self, ctx: &BarContext<'_>, motif_offset: i32) -> i32 {
        let chord_degree = ctx
            .mode
            .degree_at_or_below(ctx.chord.root.interval_from(ctx.key));
        let tonic = ctx.key.in_octave(self.octave) as i32;
        let mut pitch = tonic + ctx.mode.degree_offset(chord_degree + motif_offset);
        if ctx.section.is_chorus() {
            pitch += ctx.style.chorus_lift as i32;
        }
        pitch
    }
}

impl PartGenerator for MelodyGenerator {
    fn role(&self) -> TrackRole {
        TrackRole::Melody
    }

    fn generate_bar(&mut self, ctx: &BarContext<'_>, rng: &mut dyn RngCore) -> Vec<NoteEvent> {
        let motif = Self::motif(ctx.valence);
        let density = ctx.style.melody_density;
        let mut notes = Vec::new();

        for beat in 0..4u8 {
            let offset = motif[(self.step % motif.len() as u64) as usize];
            self.step += 1;

            if rng.gen::<f64>() >= density {
                continue;
            }

            let mut pitch = self.pitch_for(ctx, offset);
            if ctx.energy > LEAP_ENERGY && rng.gen_bool(LEAP_PROBABILITY) {
                pitch += LEAPS[rng.gen_range(0..LEAPS.len())];
            }
            notes.push(NoteEvent::new(
                pitch.clamp(0, 127) as u8,
                beat as f64,
                1.0,
                VELOCITY,
            ));
        }
        notes
    }
}
