//! Performance style — how the parts are played, derived from the mood.
//!
//! [`select_style`] is a first-match decision table over the mood. The
//! result can be refined for the song's genre with
//! [`StyleProfile::refine_for_genre`]. Both are pure functions.

use serde::{Deserialize, Serialize};

use crate::harmony::Genre;
use crate::mood::{MoodLabel, MoodProfile};

/// Drum pattern family used by the groove generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercussionFamily {
    /// Almost silent: a token kick and hat in dense choruses only.
    SparseAmbient,
    /// Laid-back, low-velocity kit.
    Lofi,
    /// Rock kick/snare backbeat.
    Backbeat,
    /// Pop four-on-the-floor.
    FourOnFloor,
    /// Driving double-kick.
    Metal,
    /// Ride-led swing.
    Swing,
}

/// Timbre of the optional lead (rhythm guitar) part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadTimbre {
    CleanGuitar,
    OverdriveGuitar,
    DistortionGuitar,
}

impl LeadTimbre {
    /// General MIDI program number.
    pub fn program(self) -> u8 {
        match self {
            LeadTimbre::CleanGuitar => 27,
            LeadTimbre::OverdriveGuitar => 29,
            LeadTimbre::DistortionGuitar => 30,
        }
    }
}

/// How chord tones are laid out across a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoicingStyle {
    Block,
    Arpeggio,
    Strum,
}

/// Style parameters attached to one render request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleProfile {
    pub name: String,
    pub percussion: PercussionFamily,
    pub lead: Option<LeadTimbre>,
    pub voicing: VoicingStyle,
    /// 0.0–1.0: how much the bass moves beyond its root skeleton.
    pub bass_activity: f64,
    /// 0.0–1.0: probability a melody beat sounds rather than rests.
    pub melody_density: f64,
    /// Semitones the melody is lifted by in chorus sections.
    pub chorus_lift: u8,
}

/// Map a mood to a style. First matching rule wins:
///
/// 1. angry, or energy ≥ 0.75 → aggressive rock
/// 2. sad/romantic with energy < 0.55 → melancholic
/// 3. otherwise → moderate pop/indie, shaped by energy
pub fn select_style(mood: &MoodProfile) -> StyleProfile {
    let energy = mood.energy.clamp(0.0, 1.0);

    let style = if mood.label == MoodLabel::Angry || energy >= 0.75 {
        StyleProfile {
            name: "aggressive_rock".to_string(),
            percussion: PercussionFamily::Backbeat,
            lead: Some(LeadTimbre::DistortionGuitar),
            voicing: VoicingStyle::Strum,
            bass_activity: 0.9,
            melody_density: 0.85,
            chorus_lift: 0,
        }
    } else if mood.label.is_melancholic() && energy < 0.55 {
        StyleProfile {
            name: "melancholic".to_string(),
            percussion: PercussionFamily::Lofi,
            lead: Some(LeadTimbre::CleanGuitar),
            voicing: VoicingStyle::Arpeggio,
            bass_activity: 0.65,
            melody_density: 0.55,
            chorus_lift: 12,
        }
    } else {
        let lead = if energy > 0.6 {
            LeadTimbre::OverdriveGuitar
        } else {
            LeadTimbre::CleanGuitar
        };
        let voicing = if energy < 0.3 {
            VoicingStyle::Block
        } else if energy < 0.5 {
            VoicingStyle::Arpeggio
        } else {
            VoicingStyle::Strum
        };
        StyleProfile {
            name: "indie_pop".to_string(),
            percussion: PercussionFamily::Backbeat,
            lead: Some(lead),
            voicing,
            bass_activity: 0.7,
            melody_density: 0.75,
            chorus_lift: 12,
        }
    };

    tracing::debug!(style = %style.name, ?style.percussion, ?style.voicing, "style selected");
    style
}

impl StyleProfile {
    /// Adjust the percussion family (and for ambient, the lead) to the
    /// song's genre. Rock and classical keep the mood's choices.
    pub fn refine_for_genre(mut self, genre: Genre) -> Self {
        match genre {
            Genre::Pop => {
                if self.percussion == PercussionFamily::Backbeat {
                    self.percussion = PercussionFamily::FourOnFloor;
                }
            }
            Genre::Metal => {
                if matches!(
                    self.percussion,
                    PercussionFamily::Backbeat | PercussionFamily::Lofi
                ) {
                    self.percussion = PercussionFamily::Metal;
                }
            }
            Genre::Jazz => self.percussion = PercussionFamily::Swing,
            Genre::Ambient => {
                self.percussion = PercussionFamily::SparseAmbient;
                self.lead = None;
            }
            Genre::Rock | Genre::Classical => {}
        }
        self
    }
}
