//! Render configuration — loaded from ~/.moodscore/render.yaml or an explicit path.

use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::event::{TickClock, DEFAULT_TICKS_PER_BEAT, MAX_TICKS_PER_BEAT};
use crate::section::{SectionKind, SectionSpec};

pub const DEFAULT_SEED: u64 = 42;

/// Settings for one render. Every field has a default, so a partial or
/// missing file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "RenderConfig::default_ticks_per_beat")]
    pub ticks_per_beat: u16,
    /// RNG seed. An explicit `null` is rejected when the render starts.
    #[serde(default = "RenderConfig::default_seed")]
    pub seed: Option<u64>,
    /// Semitones added when the Final Chorus starts.
    #[serde(default)]
    pub key_change_semitones: i32,
    #[serde(default = "RenderConfig::default_chord_octave")]
    pub chord_octave: u8,
    #[serde(default = "RenderConfig::default_bass_octave")]
    pub bass_octave: u8,
    #[serde(default = "RenderConfig::default_melody_octave")]
    pub melody_octave: u8,
    /// Section layout override. None = canonical layout.
    #[serde(default)]
    pub structure: Option<Vec<SectionSpec>>,
    #[serde(default = "RenderConfig::default_strum_spread")]
    pub strum_spread_beats: f64,
}

impl RenderConfig {
    /// Load config from the standard path (~/.moodscore/render.yaml).
    /// Returns None if the file is missing or unreadable.
    pub fn load() -> Option<Self> {
        let path = config_path()?;
        let content = std::fs::read_to_string(path).ok()?;
        let parsed = serde_yaml::from_str::<Self>(&content)
            .map_err(Error::from)
            .and_then(|config| config.validate().map(|()| config));
        match parsed {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring malformed render config");
                None
            }
        }
    }

    /// Load config from an explicit path. Errors are surfaced.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that cannot be rendered or written to a MIDI file.
    pub fn validate(&self) -> Result<()> {
        if self.ticks_per_beat == 0 || self.ticks_per_beat > MAX_TICKS_PER_BEAT {
            return Err(Error::InvalidConfig(format!(
                "ticks_per_beat must be 1..={MAX_TICKS_PER_BEAT}, got {}",
                self.ticks_per_beat
            )));
        }
        Ok(())
    }

    /// A seeded generator for one render. Never falls back to entropy.
    pub fn rng(&self) -> Result<ChaCha8Rng> {
        let seed = self.seed.ok_or(Error::MissingSeed)?;
        Ok(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn clock(&self) -> Result<TickClock> {
        self.validate()?;
        Ok(TickClock::new(self.ticks_per_beat))
    }

    /// The section layout to build: the override if set, else canonical.
    pub fn layout(&self) -> Vec<SectionSpec> {
        match &self.structure {
            Some(specs) => specs.clone(),
            None => SectionKind::CANONICAL
                .iter()
                .map(|&(section, bars)| SectionSpec { section, bars })
                .collect(),
        }
    }

    fn default_ticks_per_beat() -> u16 {
        DEFAULT_TICKS_PER_BEAT
    }

    fn default_seed() -> Option<u64> {
        Some(DEFAULT_SEED)
    }

    fn default_chord_octave() -> u8 {
        4
    }

    fn default_bass_octave() -> u8 {
        2
    }

    fn default_melody_octave() -> u8 {
        5
    }

    fn default_strum_spread() -> f64 {
        0.03
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            ticks_per_beat: Self::default_ticks_per_beat(),
            seed: Self::default_seed(),
            key_change_semitones: 0,
            chord_octave: Self::default_chord_octave(),
            bass_octave: Self::default_bass_octave(),
            melody_octave: Self::default_melody_octave(),
            structure: None,
            strum_spread_beats: Self::default_strum_spread(),
        }
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".moodscore").join("render.yaml"))
}
