//! Standard MIDI File writer.
//!
//! Output is SMF format 1: a conductor track carrying the tempo, then one
//! track per role with its name, program change and note on/off pairs.
//! Note-offs sort before note-ons on the same tick so repeated pitches
//! retrigger cleanly. Resolutions above 15 bits and gaps above 28 bits are
//! refused rather than truncated.

use std::path::Path;

use midly::{
    num::{u15, u24, u28, u4, u7},
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
};

use crate::error::{Error, Result};
use crate::event::{micros_per_beat, TrackTimeline, MAX_TICKS_PER_BEAT};
use crate::sequencer::Render;

const CONDUCTOR_NAME: &str = "moodscore";

/// Largest delta a variable-length quantity can hold.
const MAX_DELTA: u64 = (1 << 28) - 1;

fn delta(ticks: u64, track: &str) -> Result<u28> {
    if ticks > MAX_DELTA {
        return Err(Error::Export(format!(
            "{track} track has a gap of {ticks} ticks, above the {MAX_DELTA} limit"
        )));
    }
    Ok(u28::new(ticks as u32))
}

/// Absolute-tick message before delta conversion. Offs order before ons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Pending {
    tick: u64,
    is_on: bool,
    key: u8,
    vel: u8,
}

fn meta(delta: u28, message: MetaMessage<'static>) -> TrackEvent<'static> {
    TrackEvent {
        delta,
        kind: TrackEventKind::Meta(message),
    }
}

fn conductor_track(render: &Render) -> Track<'static> {
    vec![
        meta(u28::new(0), MetaMessage::TrackName(CONDUCTOR_NAME.as_bytes())),
        meta(
            u28::new(0),
            MetaMessage::Tempo(u24::new(micros_per_beat(render.tempo_bpm))),
        ),
        meta(u28::new(0), MetaMessage::EndOfTrack),
    ]
}

fn role_track(timeline: &TrackTimeline, total_ticks: u64) -> Result<Track<'static>> {
    let name = timeline.role.name();
    let channel = u4::new(timeline.channel);
    let mut track: Track<'static> =
        vec![meta(u28::new(0), MetaMessage::TrackName(name.as_bytes()))];

    if let Some(program) = timeline.program {
        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::ProgramChange {
                    program: u7::new(program),
                },
            },
        });
    }

    let mut pending: Vec<Pending> = timeline
        .events()
        .iter()
        .flat_map(|e| {
            [
                Pending {
                    tick: e.start_tick,
                    is_on: true,
                    key: e.pitch,
                    vel: e.velocity,
                },
                Pending {
                    tick: e.end_tick(),
                    is_on: false,
                    key: e.pitch,
                    vel: 0,
                },
            ]
        })
        .collect();
    pending.sort();

    let mut last_tick = 0u64;
    for p in pending {
        let gap = delta(p.tick - last_tick, name)?;
        last_tick = p.tick;
        let message = if p.is_on {
            MidiMessage::NoteOn {
                key: u7::new(p.key),
                vel: u7::new(p.vel),
            }
        } else {
            MidiMessage::NoteOff {
                key: u7::new(p.key),
                vel: u7::new(0),
            }
        };
        track.push(TrackEvent {
            delta: gap,
            kind: TrackEventKind::Midi { channel, message },
        });
    }

    let tail = delta(total_ticks.saturating_sub(last_tick), name)?;
    track.push(meta(tail, MetaMessage::EndOfTrack));
    Ok(track)
}

/// Build the in-memory SMF for a render.
///
/// Fails with [`Error::Export`] if the resolution or any gap does not fit
/// the file format.
pub fn to_smf(render: &Render) -> Result<Smf<'static>> {
    if render.ticks_per_beat == 0 || render.ticks_per_beat > MAX_TICKS_PER_BEAT {
        return Err(Error::Export(format!(
            "{} ticks per beat does not fit a 15-bit header",
            render.ticks_per_beat
        )));
    }
    let mut smf = Smf::new(Header::new(
        Format::Parallel,
        Timing::Metrical(u15::new(render.ticks_per_beat)),
    ));
    smf.tracks.push(conductor_track(render));
    for timeline in &render.tracks {
        smf.tracks.push(role_track(timeline, render.total_ticks)?);
    }
    Ok(smf)
}

/// Encode a render as SMF bytes.
pub fn to_smf_bytes(render: &Render) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    to_smf(render)?.write_std(&mut buf)?;
    Ok(buf)
}

/// Encode a render and write it to `path`.
pub fn write_midi(render: &Render, path: &Path) -> Result<()> {
    let bytes = to_smf_bytes(render)?;
    std::fs::write(path, bytes)?;
    tracing::info!(path = %path.display(), tracks = render.tracks.len(), "wrote midi file");
    Ok(())
}
