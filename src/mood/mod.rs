//! Mood profiles — the categorical mood, energy and valence that drive a render.
//!
//! A [`MoodProfile`] normally comes from an external text analyzer. The
//! [`keywords`] module carries a small keyword-based stand-in so the CLI can
//! work from a free-text description.

pub mod keywords;

pub use keywords::KeywordMoodAnalyzer;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::theory::ScaleMode;

/// Categorical mood label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodLabel {
    Sad,
    Happy,
    Angry,
    Calm,
    Romantic,
}

impl MoodLabel {
    /// All labels in catalog order (used for keyword tie-breaking).
    pub const ALL: [MoodLabel; 5] = [
        MoodLabel::Sad,
        MoodLabel::Happy,
        MoodLabel::Angry,
        MoodLabel::Calm,
        MoodLabel::Romantic,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sad" => Some(MoodLabel::Sad),
            "happy" => Some(MoodLabel::Happy),
            "angry" => Some(MoodLabel::Angry),
            "calm" => Some(MoodLabel::Calm),
            "romantic" => Some(MoodLabel::Romantic),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MoodLabel::Sad => "sad",
            MoodLabel::Happy => "happy",
            MoodLabel::Angry => "angry",
            MoodLabel::Calm => "calm",
            MoodLabel::Romantic => "romantic",
        }
    }

    /// Sad and romantic moods share the minor-key, melancholic treatment.
    pub fn is_melancholic(self) -> bool {
        matches!(self, MoodLabel::Sad | MoodLabel::Romantic)
    }
}

/// The analyzed mood of a request. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodProfile {
    pub label: MoodLabel,
    /// Suggested tempo in BPM.
    pub tempo: u32,
    /// Arousal in 0.0–1.0.
    pub energy: f64,
    /// Sentiment in -1.0–1.0.
    pub valence: f64,
    pub mode: ScaleMode,
    /// The free text the profile was derived from, if any.
    #[serde(default)]
    pub description: String,
}

impl MoodProfile {
    /// Build a profile from label, energy and valence. Tempo follows energy
    /// (60–150 BPM) and the mode follows the sign of valence.
    pub fn new(label: MoodLabel, energy: f64, valence: f64) -> Self {
        let energy = energy.clamp(0.0, 1.0);
        Self {
            label,
            tempo: (60.0 + energy * 90.0) as u32,
            energy,
            valence: valence.clamp(-1.0, 1.0),
            mode: if valence < 0.0 {
                ScaleMode::Minor
            } else {
                ScaleMode::Major
            },
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check the numeric fields are within their documented ranges.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.energy) {
            return Err(Error::InvalidMood(format!(
                "energy {} outside 0..1",
                self.energy
            )));
        }
        if !(-1.0..=1.0).contains(&self.valence) {
            return Err(Error::InvalidMood(format!(
                "valence {} outside -1..1",
                self.valence
            )));
        }
        if self.tempo == 0 {
            return Err(Error::InvalidMood("tempo must be positive".to_string()));
        }
        Ok(())
    }

    /// Load and validate a profile from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let profile: MoodProfile = serde_yaml::from_str(&content)?;
        profile.validate()?;
        Ok(profile)
    }
}
