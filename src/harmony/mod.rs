//! Harmony planning — key, scale mode, tempo and base chord progression.
//!
//! The [`HarmonyPlanner`] turns a [`MoodProfile`] (plus an optional forced
//! genre) into a [`SongPlan`]. Genre selection for `"auto"` is delegated to
//! a [`GenreClassifier`]; everything else comes from fixed tables.

pub mod genre;
pub mod roman;

pub use genre::{FixedClassifier, Genre, GenreChoice, GenreClassifier, PrototypeClassifier};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::mood::{MoodLabel, MoodProfile};
use crate::theory::{Chord, PitchClass, ScaleMode};

/// The harmonic plan of one song. Produced once per request, read-only after.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SongPlan {
    pub key: PitchClass,
    pub mode: ScaleMode,
    progression: Vec<Chord>,
    pub tempo_bpm: u32,
    pub genre: Genre,
}

impl SongPlan {
    /// Build a plan, rejecting an empty progression.
    pub fn new(
        key: PitchClass,
        mode: ScaleMode,
        progression: Vec<Chord>,
        tempo_bpm: u32,
        genre: Genre,
    ) -> Result<Self> {
        if progression.is_empty() {
            return Err(Error::EmptyProgression);
        }
        Ok(Self {
            key,
            mode,
            progression,
            tempo_bpm: tempo_bpm.max(1),
            genre,
        })
    }

    /// Build a plan from chord symbols, parsing each once with the lenient
    /// fallback rules of [`Chord::parse_lenient`].
    pub fn from_symbols(
        key: PitchClass,
        mode: ScaleMode,
        symbols: &[&str],
        tempo_bpm: u32,
        genre: Genre,
    ) -> Result<Self> {
        let progression = symbols.iter().map(|s| Chord::parse_lenient(s)).collect();
        Self::new(key, mode, progression, tempo_bpm, genre)
    }

    /// The base progression. Never empty.
    pub fn progression(&self) -> &[Chord] {
        &self.progression
    }

    /// Progression rendered back to chord symbols.
    pub fn symbols(&self) -> Vec<String> {
        self.progression.iter().map(|c| c.to_string()).collect()
    }
}

/// Resolves a mood into a [`SongPlan`].
#[derive(Debug, Clone, Default)]
pub struct HarmonyPlanner<C = PrototypeClassifier> {
    classifier: C,
}

impl HarmonyPlanner<PrototypeClassifier> {
    pub fn new() -> Self {
        Self {
            classifier: PrototypeClassifier,
        }
    }
}

impl<C: GenreClassifier> HarmonyPlanner<C> {
    pub fn with_classifier(classifier: C) -> Self {
        Self { classifier }
    }

    /// Pick the genre: forced if given, otherwise classified from the
    /// mood description.
    pub fn choose_genre(&self, mood: &MoodProfile, forced: Option<&str>) -> Genre {
        match Genre::resolve(forced) {
            GenreChoice::Forced(genre) => genre,
            GenreChoice::Auto => self.classifier.classify(&mood.description),
        }
    }

    /// Plan a song. Never fails: unknown genres use the pop tables.
    pub fn plan(&self, mood: &MoodProfile, forced_genre: Option<&str>) -> SongPlan {
        let genre = self.choose_genre(mood, forced_genre);
        let key = key_for(mood.label);
        let mode = mode_for(mood.label);
        let tempo_bpm = genre.tempo_for(mood.energy);

        let numerals = genre.progression_for(mode, mood.energy);
        let progression = roman::resolve_progression(numerals, key, mode);

        tracing::info!(
            genre = genre.name(),
            key = %key,
            mode = mode.name(),
            tempo_bpm,
            progression = numerals,
            "song planned"
        );

        SongPlan {
            key,
            mode,
            progression,
            tempo_bpm,
            genre,
        }
    }
}

/// Tonic chosen per mood label.
pub fn key_for(label: MoodLabel) -> PitchClass {
    match label {
        MoodLabel::Sad | MoodLabel::Romantic => PitchClass::A,
        MoodLabel::Angry => PitchClass::E,
        MoodLabel::Calm => PitchClass::D,
        MoodLabel::Happy => PitchClass::C,
    }
}

/// Minor for sad and romantic moods, major otherwise.
pub fn mode_for(label: MoodLabel) -> ScaleMode {
    if label.is_melancholic() {
        ScaleMode::Minor
    } else {
        ScaleMode::Major
    }
}
