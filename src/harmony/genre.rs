//! Genres — tempo ranges, progression tables, and genre classification.

use serde::{Deserialize, Serialize};

use crate::theory::ScaleMode;

/// Energy at or above which the busier progression variant is used.
pub const BUSY_ENERGY_THRESHOLD: f64 = 0.6;

/// Musical genre of a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    Pop,
    Rock,
    Metal,
    Jazz,
    Ambient,
    Classical,
}

/// How the caller asked for a genre.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenreChoice {
    /// Let the classifier pick from the mood description.
    Auto,
    Forced(Genre),
}

/// Calm and busy progression variants for one scale mode.
#[derive(Debug, Clone, Copy)]
pub struct ProgressionPair {
    pub calm: &'static str,
    pub busy: &'static str,
}

impl Genre {
    pub const ALL: [Genre; 6] = [
        Genre::Pop,
        Genre::Rock,
        Genre::Metal,
        Genre::Jazz,
        Genre::Ambient,
        Genre::Classical,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "pop" => Some(Genre::Pop),
            "rock" => Some(Genre::Rock),
            "metal" => Some(Genre::Metal),
            "jazz" => Some(Genre::Jazz),
            "ambient" => Some(Genre::Ambient),
            "classical" => Some(Genre::Classical),
            _ => None,
        }
    }

    /// Interpret a request's genre field. Absent, empty or `"auto"` asks for
    /// classification; unknown names fall back to pop.
    pub fn resolve(name: Option<&str>) -> GenreChoice {
        match name.map(str::trim) {
            None | Some("") => GenreChoice::Auto,
            Some(n) if n.eq_ignore_ascii_case("auto") => GenreChoice::Auto,
            Some(n) => match Genre::parse(n) {
                Some(genre) => GenreChoice::Forced(genre),
                None => {
                    tracing::warn!(genre = n, "unknown genre, falling back to pop");
                    GenreChoice::Forced(Genre::Pop)
                }
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Genre::Pop => "pop",
            Genre::Rock => "rock",
            Genre::Metal => "metal",
            Genre::Jazz => "jazz",
            Genre::Ambient => "ambient",
            Genre::Classical => "classical",
        }
    }

    /// Inclusive BPM range the tempo is interpolated across.
    pub fn tempo_range(self) -> (u32, u32) {
        match self {
            Genre::Pop => (90, 120),
            Genre::Rock => (110, 140),
            Genre::Metal => (140, 180),
            Genre::Jazz => (80, 130),
            Genre::Ambient => (60, 80),
            Genre::Classical => (60, 100),
        }
    }

    /// `min + (max - min) * energy`, rounded to the nearest BPM.
    pub fn tempo_for(self, energy: f64) -> u32 {
        let (min, max) = self.tempo_range();
        let energy = energy.clamp(0.0, 1.0);
        (min as f64 + (max - min) as f64 * energy).round() as u32
    }

    /// Roman-numeral progressions for a scale mode.
    pub fn progressions(self, mode: ScaleMode) -> ProgressionPair {
        use ScaleMode::{Major, Minor};
        let (calm, busy) = match (self, mode) {
            (Genre::Pop, Major) => ("I-V-vi-IV", "vi-IV-I-V"),
            (Genre::Pop, Minor) => ("i-VI-III-VII", "i-iv-VI-V"),
            (Genre::Rock, Major) => ("I-IV-V-IV", "I-bVII-IV-I"),
            (Genre::Rock, Minor) => ("i-VII-VI-VII", "i-VI-VII-i"),
            (Genre::Metal, Major) => ("I-bVI-bVII-I", "I-bVII-bVI-bVII"),
            (Genre::Metal, Minor) => ("i-VI-iv-V", "i-VI-VII-V"),
            (Genre::Jazz, Major) => ("ii7-V7-Imaj7-vi7", "Imaj7-vi7-ii7-V7"),
            (Genre::Jazz, Minor) => ("i7-iv7-VII7-IIImaj7", "i7-VImaj7-ii7-V7"),
            (Genre::Ambient, Major) => ("Imaj7-IVmaj7", "I-iii-IV-vi"),
            (Genre::Ambient, Minor) => ("i-VI", "i-III-VI-iv"),
            (Genre::Classical, Major) => ("I-IV-V-I", "I-vi-ii-V"),
            (Genre::Classical, Minor) => ("i-iv-V-i", "i-VI-iv-V"),
        };
        ProgressionPair { calm, busy }
    }

    /// Pick the calm or busy variant by energy.
    pub fn progression_for(self, mode: ScaleMode, energy: f64) -> &'static str {
        let pair = self.progressions(mode);
        if energy >= BUSY_ENERGY_THRESHOLD {
            pair.busy
        } else {
            pair.calm
        }
    }

    /// Prototype description used by [`PrototypeClassifier`].
    pub fn prototype(self) -> &'static [&'static str] {
        match self {
            Genre::Pop => &["catchy", "simple", "emotional", "happy", "upbeat", "love"],
            Genre::Rock => &["electric", "guitar", "drums", "bass", "power", "loud"],
            Genre::Metal => &["distortion", "aggressive", "dark", "angry", "rage", "heavy"],
            Genre::Jazz => &["swing", "complex", "harmony", "improvisation", "smoky", "night"],
            Genre::Ambient => &["slow", "pads", "atmosphere", "calm", "peaceful", "drifting"],
            Genre::Classical => &["orchestral", "strings", "piano", "elegant", "grand"],
        }
    }
}

/// Picks a genre from a mood description.
pub trait GenreClassifier {
    fn classify(&self, description: &str) -> Genre;
}

/// Word-overlap classifier against each genre's prototype keywords. Ties go
/// to the genre listed first; no overlap at all means pop.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrototypeClassifier;

impl GenreClassifier for PrototypeClassifier {
    fn classify(&self, description: &str) -> Genre {
        let text = description.to_lowercase();
        let words: Vec<&str> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        let mut best = (Genre::Pop, 0usize);
        for genre in Genre::ALL {
            let score = genre
                .prototype()
                .iter()
                .filter(|kw| words.contains(*kw))
                .count();
            if score > best.1 {
                best = (genre, score);
            }
        }
        best.0
    }
}

/// A classifier that always answers the same genre.
#[derive(Debug, Clone, Copy)]
pub struct FixedClassifier(pub Genre);

impl GenreClassifier for FixedClassifier {
    fn classify(&self, _description: &str) -> Genre {
        self.0
    }
}
