//! Song sections — the named, bar-counted segments a song is laid out in.
//!
//! A [`SongStructure`] is the ordered list of [`Section`]s, each carrying
//! one chord per bar. [`builder`] expands a [`SongPlan`](crate::harmony::SongPlan)
//! into a structure by cycling its progression.

pub mod builder;

pub use builder::{build_structure, build_structure_with, cycle_chords};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::theory::Chord;

/// The fixed catalog of section names, declared in canonical song order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Intro,
    Verse1,
    Chorus,
    Verse2,
    FinalChorus,
    Bridge,
    Outro,
}

impl SectionKind {
    /// Canonical layout: section and bar count, in song order.
    pub const CANONICAL: [(SectionKind, u32); 7] = [
        (SectionKind::Intro, 4),
        (SectionKind::Verse1, 8),
        (SectionKind::Chorus, 8),
        (SectionKind::Verse2, 8),
        (SectionKind::FinalChorus, 8),
        (SectionKind::Bridge, 4),
        (SectionKind::Outro, 4),
    ];

    pub fn name(self) -> &'static str {
        match self {
            SectionKind::Intro => "Intro",
            SectionKind::Verse1 => "Verse 1",
            SectionKind::Chorus => "Chorus",
            SectionKind::Verse2 => "Verse 2",
            SectionKind::FinalChorus => "Final Chorus",
            SectionKind::Bridge => "Bridge",
            SectionKind::Outro => "Outro",
        }
    }

    /// Fixed intensity used to scale groove density and dynamics.
    pub fn intensity(self) -> f64 {
        match self {
            SectionKind::Intro | SectionKind::Outro => 0.4,
            SectionKind::Verse1 | SectionKind::Verse2 => 0.6,
            SectionKind::Bridge => 0.7,
            SectionKind::Chorus => 0.85,
            SectionKind::FinalChorus => 0.9,
        }
    }

    pub fn is_chorus(self) -> bool {
        matches!(self, SectionKind::Chorus | SectionKind::FinalChorus)
    }

    /// Intro and outro only cycle the opening chords of the progression.
    pub fn uses_opening_chords(self) -> bool {
        matches!(self, SectionKind::Intro | SectionKind::Outro)
    }

    /// MIDI-style velocity for sustained parts: 45 at silence, 90 at full intensity.
    pub fn velocity(self) -> u8 {
        (45.0 + self.intensity() * 45.0).round() as u8
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry of a structure layout: which section and how many bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub section: SectionKind,
    pub bars: u32,
}

/// A laid-out section with one chord per bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub bars: u32,
    pub chords: Vec<Chord>,
}

/// The whole song, sections in playing order. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SongStructure {
    sections: Vec<Section>,
}

impl SongStructure {
    pub(crate) fn from_sections(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn total_bars(&self) -> u32 {
        self.sections.iter().map(|s| s.bars).sum()
    }

    /// Every bar's chord in song order.
    pub fn bar_chords(&self) -> impl Iterator<Item = &Chord> {
        self.sections.iter().flat_map(|s| s.chords.iter())
    }

    /// Look up the first section of a kind.
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}
