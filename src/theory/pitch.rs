//! Pitch classes — parses "C", "F#", "Bb" into 0–11 and places them in octaves.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A pitch class in 0–11, C = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PitchClass(u8);

/// Root used when a chord or key symbol cannot be read.
pub const DEFAULT_ROOT: PitchClass = PitchClass::C;

const NAMES: [&str; 12] = [
    "C", "C#", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "B",
];

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);
    pub const D: PitchClass = PitchClass(2);
    pub const E: PitchClass = PitchClass(4);
    pub const F: PitchClass = PitchClass(5);
    pub const G: PitchClass = PitchClass(7);
    pub const A: PitchClass = PitchClass(9);
    pub const B: PitchClass = PitchClass(11);

    /// Create a pitch class, wrapping values above 11.
    pub fn new(pc: u8) -> Self {
        Self(pc % 12)
    }

    /// Move by a signed number of semitones, wrapping around the octave.
    pub fn transpose(self, semitones: i32) -> Self {
        Self((self.0 as i32 + semitones).rem_euclid(12) as u8)
    }

    /// Semitones from `other` up to `self` (0–11).
    pub fn interval_from(self, other: PitchClass) -> u8 {
        (self.0 + 12 - other.0) % 12
    }

    /// Parse a leading note name and return it with the number of bytes consumed.
    ///
    /// Format: `<letter><optional accidental>`, letter case-insensitive,
    /// accidental `#` or `b`.
    pub fn parse_prefix(symbol: &str) -> Option<(Self, usize)> {
        let mut chars = symbol.chars();
        let base: i32 = match chars.next()?.to_ascii_uppercase() {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return None,
        };

        let (accidental, consumed) = match chars.next() {
            Some('#') => (1, 2),
            Some('b') => (-1, 2),
            _ => (0, 1),
        };

        Some((Self::new((base + accidental).rem_euclid(12) as u8), consumed))
    }

    /// Parse a complete note name with nothing trailing.
    pub fn parse(symbol: &str) -> Option<Self> {
        let trimmed = symbol.trim();
        let (pc, consumed) = Self::parse_prefix(trimmed)?;
        (consumed == trimmed.len()).then_some(pc)
    }

    /// MIDI note number of this pitch class in an octave (C4 = 60).
    ///
    /// Results above 127 fold down by octaves so the note stays playable.
    pub fn in_octave(self, octave: u8) -> u8 {
        let mut note = (octave as u16 + 1) * 12 + self.0 as u16;
        while note > 127 {
            note -= 12;
        }
        note as u8
    }

    pub fn name(self) -> &'static str {
        NAMES[self.0 as usize]
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
