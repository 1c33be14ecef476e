//! Major and minor scales — degree tables and degree-to-semitone mapping.

use serde::{Deserialize, Serialize};

/// Scale mode of a song.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    Major,
    Minor,
}

impl ScaleMode {
    /// Semitone intervals from the tonic to each of the seven degrees.
    pub fn intervals(self) -> [u8; 7] {
        match self {
            ScaleMode::Major => [0, 2, 4, 5, 7, 9, 11],
            ScaleMode::Minor => [0, 2, 3, 5, 7, 8, 10],
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "major" | "maj" | "ionian" => Some(ScaleMode::Major),
            "minor" | "min" | "aeolian" => Some(ScaleMode::Minor),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ScaleMode::Major => "major",
            ScaleMode::Minor => "minor",
        }
    }

    /// Semitone offset of a scale degree. Degrees outside 0–6 continue into
    /// neighbouring octaves (7 = tonic an octave up, -1 = leading tone below).
    pub fn degree_offset(self, degree: i32) -> i32 {
        let octave = degree.div_euclid(7);
        let idx = degree.rem_euclid(7) as usize;
        octave * 12 + self.intervals()[idx] as i32
    }

    /// The highest degree whose interval is at or below `semitones` above the
    /// tonic. Out-of-scale pitches resolve to the degree just beneath them.
    pub fn degree_at_or_below(self, semitones: u8) -> i32 {
        let target = semitones % 12;
        self.intervals()
            .iter()
            .rposition(|&iv| iv <= target)
            .unwrap_or(0) as i32
    }
}
