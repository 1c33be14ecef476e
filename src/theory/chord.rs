//! Typed chords — symbols like "Am", "Fmaj7", "G7" parsed once into a root
//! and a quality, then voiced into MIDI pitches.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::pitch::{PitchClass, DEFAULT_ROOT};
use crate::error::Error;

/// Triad or seventh quality of a chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChordQuality {
    Major,
    Minor,
    Major7,
    Minor7,
    Dominant7,
}

impl ChordQuality {
    /// Semitone intervals above the root.
    pub fn intervals(self) -> &'static [u8] {
        match self {
            ChordQuality::Major => &[0, 4, 7],
            ChordQuality::Minor => &[0, 3, 7],
            ChordQuality::Major7 => &[0, 4, 7, 11],
            ChordQuality::Minor7 => &[0, 3, 7, 10],
            ChordQuality::Dominant7 => &[0, 4, 7, 10],
        }
    }

    /// Read a chord suffix. The empty suffix is a major triad.
    pub fn parse_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "" | "maj" | "M" => Some(ChordQuality::Major),
            "m" | "min" | "-" => Some(ChordQuality::Minor),
            "maj7" | "M7" | "Δ7" => Some(ChordQuality::Major7),
            "m7" | "min7" | "-7" => Some(ChordQuality::Minor7),
            "7" | "dom7" => Some(ChordQuality::Dominant7),
            _ => None,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Major7 => "maj7",
            ChordQuality::Minor7 => "m7",
            ChordQuality::Dominant7 => "7",
        }
    }

    pub fn is_minor(self) -> bool {
        matches!(self, ChordQuality::Minor | ChordQuality::Minor7)
    }
}

/// A chord: root pitch class plus quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chord {
    pub root: PitchClass,
    pub quality: ChordQuality,
}

impl Chord {
    pub fn new(root: PitchClass, quality: ChordQuality) -> Self {
        Self { root, quality }
    }

    /// Parse a chord symbol, substituting documented defaults for anything
    /// unreadable: an unknown root becomes [`DEFAULT_ROOT`], an unknown
    /// suffix is read as minor when it starts with `m` and major otherwise.
    pub fn parse_lenient(symbol: &str) -> Self {
        let trimmed = symbol.trim();
        let (root, rest) = match PitchClass::parse_prefix(trimmed) {
            Some((root, consumed)) => (root, &trimmed[consumed..]),
            None => {
                tracing::warn!(symbol = trimmed, "unknown chord root, using {}", DEFAULT_ROOT);
                (DEFAULT_ROOT, "")
            }
        };

        let quality = ChordQuality::parse_suffix(rest).unwrap_or_else(|| {
            let guess = if rest.starts_with('m') && !rest.starts_with("maj") {
                ChordQuality::Minor
            } else {
                ChordQuality::Major
            };
            tracing::warn!(symbol = trimmed, ?guess, "unknown chord suffix");
            guess
        });

        Self { root, quality }
    }

    /// Move the root by a signed number of semitones.
    pub fn transpose(self, semitones: i32) -> Self {
        Self {
            root: self.root.transpose(semitones),
            quality: self.quality,
        }
    }

    /// Stack the chord tones upward from the root placed in `octave`.
    ///
    /// Always returns 3 or 4 pitches within 0–127; a voicing that would
    /// overflow is dropped by whole octaves.
    pub fn voice(&self, octave: u8) -> Vec<u8> {
        let intervals = self.quality.intervals();
        let top = intervals.last().copied().unwrap_or(0) as u16;
        let mut root = self.root.in_octave(octave) as u16;
        while root + top > 127 {
            root -= 12;
        }
        intervals.iter().map(|&iv| (root + iv as u16) as u8).collect()
    }
}

impl FromStr for Chord {
    type Err = Error;

    /// Strict parse: unknown roots or suffixes are errors.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (root, consumed) =
            PitchClass::parse_prefix(trimmed).ok_or_else(|| Error::UnknownChord(s.to_string()))?;
        let quality = ChordQuality::parse_suffix(&trimmed[consumed..])
            .ok_or_else(|| Error::UnknownChord(s.to_string()))?;
        Ok(Self { root, quality })
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.quality.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_parse_common_symbols() {
        let am: Chord = "Am".parse().unwrap();
        assert_eq!(am.root, PitchClass::A);
        assert_eq!(am.quality, ChordQuality::Minor);

        let fmaj7: Chord = "Fmaj7".parse().unwrap();
        assert_eq!(fmaj7.quality, ChordQuality::Major7);

        let g7: Chord = "G7".parse().unwrap();
        assert_eq!(g7.quality, ChordQuality::Dominant7);

        let bbm7: Chord = "Bbm7".parse().unwrap();
        assert_eq!(bbm7.root, PitchClass::new(10));
        assert_eq!(bbm7.quality, ChordQuality::Minor7);
    }

    #[test]
    fn strict_parse_rejects_unknown() {
        assert!(matches!("Xm".parse::<Chord>(), Err(Error::UnknownChord(_))));
        assert!(matches!("Csus4".parse::<Chord>(), Err(Error::UnknownChord(_))));
    }

    #[test]
    fn lenient_parse_falls_back() {
        let chord = Chord::parse_lenient("Hm");
        assert_eq!(chord.root, DEFAULT_ROOT);

        let chord = Chord::parse_lenient("Dmadd9");
        assert_eq!(chord.root, PitchClass::D);
        assert_eq!(chord.quality, ChordQuality::Minor);

        let chord = Chord::parse_lenient("Esus2");
        assert_eq!(chord.quality, ChordQuality::Major);
    }

    #[test]
    fn voicing_sizes_and_range() {
        for symbol in ["C", "Am", "Fmaj7", "Em7", "G7", "B"] {
            let chord: Chord = symbol.parse().unwrap();
            for octave in 0..=9 {
                let pitches = chord.voice(octave);
                assert!(pitches.len() == 3 || pitches.len() == 4, "{symbol}");
                assert!(pitches.iter().all(|&p| p <= 127), "{symbol} octave {octave}");
            }
        }
    }

    #[test]
    fn voicing_stacks_from_root() {
        let c: Chord = "C".parse().unwrap();
        assert_eq!(c.voice(4), vec![60, 64, 67]);

        let am7: Chord = "Am7".parse().unwrap();
        assert_eq!(am7.voice(3), vec![57, 60, 64, 67]);
    }

    #[test]
    fn display_round_trip() {
        for symbol in ["C", "Am", "Fmaj7", "Em7", "G7", "Bb"] {
            let chord: Chord = symbol.parse().unwrap();
            assert_eq!(chord.to_string(), symbol);
        }
    }

    #[test]
    fn transpose_keeps_quality() {
        let chord: Chord = "Am".parse().unwrap();
        let up = chord.transpose(2);
        assert_eq!(up.to_string(), "Bm");
    }
}
