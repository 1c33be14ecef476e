//! Groove generator — state-free drum patterns per percussion family.
//!
//! Each family is a fixed rule table scaled by the bar's density
//! (see [`BarContext::density`]). Pitches are General MIDI drum keys on
//! the percussion channel.

use rand::RngCore;

use crate::event::{NoteEvent, TrackRole};
use crate::section::SectionKind;
use crate::style::PercussionFamily;

use super::{BarContext, PartGenerator};

pub const KICK: u8 = 36;
pub const SNARE: u8 = 38;
pub const CLOSED_HAT: u8 = 42;
pub const OPEN_HAT: u8 = 46;
pub const RIDE: u8 = 51;

/// Drum hits are short triggers.
const HIT_BEATS: f64 = 0.1;

/// Positions `0, step, 2·step, …` strictly below the end of the bar.
fn grid(step: f64) -> impl Iterator<Item = f64> {
    (0u32..)
        .map(move |i| i as f64 * step)
        .take_while(|&beat| beat < 4.0)
}

fn on_beat(beat: f64) -> bool {
    beat.fract() == 0.0
}

fn hit(pitch: u8, beat: f64, velocity: u8) -> NoteEvent {
    NoteEvent::new(pitch, beat, HIT_BEATS, velocity)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GrooveGenerator;

impl GrooveGenerator {
    /// One bar of hits for a family. Pure: same inputs, same hits.
    pub fn pattern(family: PercussionFamily, ctx: &BarContext<'_>) -> Vec<NoteEvent> {
        let density = ctx.density();
        let chorus = ctx.section.is_chorus();

        match family {
            PercussionFamily::SparseAmbient => sparse_ambient(chorus, density),
            PercussionFamily::Lofi => lofi(density),
            PercussionFamily::Backbeat => backbeat(chorus, density),
            PercussionFamily::FourOnFloor => four_on_floor(density),
            PercussionFamily::Metal => metal(chorus, density),
            PercussionFamily::Swing => swing(ctx, density),
        }
    }
}

impl PartGenerator for GrooveGenerator {
    fn role(&self) -> TrackRole {
        TrackRole::Percussion
    }

    fn generate_bar(&mut self, ctx: &BarContext<'_>, _rng: &mut dyn RngCore) -> Vec<NoteEvent> {
        Self::pattern(ctx.style.percussion, ctx)
    }
}

/// Silent except for a token kick and open hat in dense choruses.
fn sparse_ambient(chorus: bool, density: f64) -> Vec<NoteEvent> {
    if chorus && density > 0.65 {
        vec![hit(KICK, 0.0, 70), hit(OPEN_HAT, 2.0, 50)]
    } else {
        Vec::new()
    }
}

fn lofi(density: f64) -> Vec<NoteEvent> {
    let mut hits = vec![
        hit(KICK, 0.0, 70),
        hit(KICK, 2.5, 62),
        hit(SNARE, 1.0, 64),
        hit(SNARE, 3.0, 64),
    ];
    let step = if density > 0.65 { 0.5 } else { 1.0 };
    hits.extend(
        grid(step).map(|beat| hit(CLOSED_HAT, beat, if on_beat(beat) { 44 } else { 38 })),
    );
    hits
}

/// Rock backbeat. Kick subdivides half → quarter → eighth as density rises.
fn backbeat(chorus: bool, density: f64) -> Vec<NoteEvent> {
    let kick_step = if density < 0.6 {
        2.0
    } else if density < 0.85 {
        1.0
    } else {
        0.5
    };
    let mut hits: Vec<NoteEvent> = grid(kick_step)
        .map(|beat| {
            let velocity = if beat == 0.0 || beat == 2.0 { 92 } else { 84 };
            hit(KICK, beat, velocity)
        })
        .collect();
    hits.push(hit(SNARE, 1.0, 92));
    hits.push(hit(SNARE, 3.0, 92));

    let hat_step = if density > 0.65 { 0.5 } else { 1.0 };
    hits.extend(grid(hat_step).map(|beat| hit(CLOSED_HAT, beat, 58)));

    if chorus && density > 0.7 {
        hits.push(hit(OPEN_HAT, 3.5, 62));
    }
    hits
}

fn four_on_floor(density: f64) -> Vec<NoteEvent> {
    let mut hits: Vec<NoteEvent> = grid(1.0)
        .map(|beat| hit(KICK, beat, if beat % 2.0 == 0.0 { 92 } else { 86 }))
        .collect();
    hits.push(hit(SNARE, 1.0, 88));
    hits.push(hit(SNARE, 3.0, 88));

    let step = if density > 0.65 { 0.5 } else { 1.0 };
    hits.extend(grid(step).map(|beat| hit(CLOSED_HAT, beat, if on_beat(beat) { 60 } else { 55 })));
    hits
}

fn metal(chorus: bool, density: f64) -> Vec<NoteEvent> {
    let mut hits = vec![hit(SNARE, 1.0, 98), hit(SNARE, 3.0, 98)];

    let kick_step = if density < 0.75 { 0.5 } else { 0.25 };
    hits.extend(grid(kick_step).map(|beat| hit(KICK, beat, if on_beat(beat) { 95 } else { 82 })));

    let (cymbal, velocity) = if chorus && density > 0.75 {
        (RIDE, 70)
    } else {
        (CLOSED_HAT, 62)
    };
    hits.extend(grid(0.5).map(|beat| hit(cymbal, beat, velocity)));
    hits
}

/// Ride-led swing with light kick feathering and snare comping.
fn swing(ctx: &BarContext<'_>, density: f64) -> Vec<NoteEvent> {
    let mut hits: Vec<NoteEvent> = grid(1.0)
        .map(|beat| hit(RIDE, beat, if beat % 2.0 == 0.0 { 68 } else { 62 }))
        .collect();

    if density > 0.55 {
        hits.push(hit(CLOSED_HAT, 2.0, 55));
        hits.push(hit(CLOSED_HAT, 3.75, 55));
    }
    if density > 0.5 {
        hits.push(hit(KICK, 0.0, 45));
        hits.push(hit(KICK, 2.0, 45));
    }
    let comping = ctx.section.is_chorus() || ctx.section == SectionKind::Bridge;
    if comping && density > 0.6 {
        hits.push(hit(SNARE, 1.5, 52));
        hits.push(hit(SNARE, 2.5, 52));
    }
    hits
}
