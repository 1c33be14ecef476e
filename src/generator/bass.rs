//! Bass generator — root skeleton with activity-gated passing tones.
//!
//! Every bar has the chord root on beats 0 and 3. Above activity 0.55 a
//! fifth is added at 1.5; above 0.75 a random passing tone (root + 2, 3
//! or 5 semitones) at 2.5. Each note lasts until the next onset.

use rand::{Rng, RngCore};

use crate::event::{NoteEvent, TrackRole};

use super::{BarContext, PartGenerator};

const FIFTH_THRESHOLD: f64 = 0.55;
const PASSING_THRESHOLD: f64 = 0.75;
const PASSING_INTERVALS: [u8; 3] = [2, 3, 5];

#[derive(Debug, Clone, Copy)]
pub struct BassGenerator {
    octave: u8,
}

impl BassGenerator {
    pub fn new(octave: u8) -> Self {
        Self { octave }
    }

    /// Onsets `(beat, pitch, velocity)` for one bar, before durations.
    fn onsets(&self, ctx: &BarContext<'_>, rng: &mut dyn RngCore) -> Vec<(f64, u8, u8)> {
        let root = ctx.chord.root.in_octave(self.octave);
        let activity = ctx.style.bass_activity;

        let mut notes = vec![(0.0, root, 96)];
        if activity > FIFTH_THRESHOLD {
            notes.push((1.5, root.saturating_add(7), 80));
        }
        if activity > PASSING_THRESHOLD {
            let interval = PASSING_INTERVALS[rng.gen_range(0..PASSING_INTERVALS.len())];
            notes.push((2.5, root.saturating_add(interval), 76));
        }
        notes.push((3.0, root, 90));
        notes
    }
}

impl PartGenerator for BassGenerator {
    fn role(&self) -> TrackRole {
        TrackRole::Bass
    }

    fn generate_bar(&mut self, ctx: &BarContext<'_>, rng: &mut dyn RngCore) -> Vec<NoteEvent> {
        let onsets = self.onsets(ctx, rng);
        onsets
            .iter()
            .enumerate()
            .map(|(i, &(beat, pitch, velocity))| {
                let next = onsets.get(i + 1).map_or(4.0, |n| n.0);
                NoteEvent::new(pitch, beat, next - beat, velocity)
            })
            .collect()
    }
}
