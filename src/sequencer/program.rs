//! General MIDI program selection per track role.

use crate::event::TrackRole;
use crate::style::{PercussionFamily, StyleProfile};

pub const ACOUSTIC_GRAND_PIANO: u8 = 0;
pub const ELECTRIC_BASS_FINGER: u8 = 33;
pub const FLUTE: u8 = 73;
pub const WARM_PAD: u8 = 89;

/// Program for a role under a style. Percussion has none; the lead has
/// none when the style has no lead timbre.
pub fn program_for(role: TrackRole, style: &StyleProfile) -> Option<u8> {
    match role {
        TrackRole::Chords => Some(if style.percussion == PercussionFamily::SparseAmbient {
            WARM_PAD
        } else {
            ACOUSTIC_GRAND_PIANO
        }),
        TrackRole::Bass => Some(ELECTRIC_BASS_FINGER),
        TrackRole::Melody => Some(FLUTE),
        TrackRole::Lead => style.lead.map(|timbre| timbre.program()),
        TrackRole::Percussion => None,
    }
}
