//! Structure builder — expands a base progression into per-bar chords.

use crate::error::{Error, Result};
use crate::harmony::SongPlan;
use crate::theory::Chord;

use super::{Section, SectionKind, SectionSpec, SongStructure};

/// Number of opening chords intro and outro sections cycle through.
const OPENING_CHORDS: usize = 2;

/// Repeat `source` whole chords at a time until exactly `bars` are filled.
pub fn cycle_chords(source: &[Chord], bars: u32) -> Vec<Chord> {
    source.iter().copied().cycle().take(bars as usize).collect()
}

/// Build the canonical structure:
/// Intro(4) → Verse 1(8) → Chorus(8) → Verse 2(8) → Final Chorus(8) → Bridge(4) → Outro(4).
pub fn build_structure(plan: &SongPlan) -> Result<SongStructure> {
    let layout: Vec<SectionSpec> = SectionKind::CANONICAL
        .iter()
        .map(|&(section, bars)| SectionSpec { section, bars })
        .collect();
    build_structure_with(plan, &layout)
}

/// Build a structure from an explicit layout. Empty progressions, empty
/// layouts and zero-bar sections are rejected before any chord is assigned.
pub fn build_structure_with(plan: &SongPlan, layout: &[SectionSpec]) -> Result<SongStructure> {
    let progression = plan.progression();
    if progression.is_empty() {
        return Err(Error::EmptyProgression);
    }
    if layout.is_empty() {
        return Err(Error::EmptyStructure);
    }
    if let Some(bad) = layout.iter().find(|s| s.bars == 0) {
        return Err(Error::ZeroBarSection {
            section: bad.section.name().to_string(),
        });
    }

    let opening = &progression[..progression.len().min(OPENING_CHORDS)];

    let sections: Vec<Section> = layout
        .iter()
        .map(|spec| {
            let source = if spec.section.uses_opening_chords() {
                opening
            } else {
                progression
            };
            Section {
                kind: spec.section,
                bars: spec.bars,
                chords: cycle_chords(source, spec.bars),
            }
        })
        .collect();

    let structure = SongStructure::from_sections(sections);
    tracing::debug!(
        sections = structure.sections().len(),
        total_bars = structure.total_bars(),
        "structure built"
    );
    Ok(structure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harmony::Genre;
    use crate::theory::{PitchClass, ScaleMode};

    fn plan(symbols: &[&str]) -> SongPlan {
        SongPlan::from_symbols(PitchClass::C, ScaleMode::Major, symbols, 100, Genre::Pop).unwrap()
    }

    fn names(chords: &[Chord]) -> Vec<String> {
        chords.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn canonical_layout() {
        let structure = build_structure(&plan(&["C", "G", "Am", "F"])).unwrap();
        let kinds: Vec<SectionKind> = structure.sections().iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            [
                SectionKind::Intro,
                SectionKind::Verse1,
                SectionKind::Chorus,
                SectionKind::Verse2,
                SectionKind::FinalChorus,
                SectionKind::Bridge,
                SectionKind::Outro,
            ]
        );
        assert_eq!(structure.total_bars(), 44);
        assert_eq!(structure.bar_chords().count(), 44);
    }

    #[test]
    fn intro_cycles_opening_pair() {
        let structure = build_structure(&plan(&["C", "G", "Am", "F"])).unwrap();
        let intro = structure.section(SectionKind::Intro).unwrap();
        assert_eq!(names(&intro.chords), ["C", "G", "C", "G"]);

        let verse = structure.section(SectionKind::Verse1).unwrap();
        assert_eq!(
            names(&verse.chords),
            ["C", "G", "Am", "F", "C", "G", "Am", "F"]
        );
    }

    #[test]
    fn odd_length_progression_fills_exactly() {
        let structure = build_structure(&plan(&["Dm", "G", "C"])).unwrap();
        let verse = structure.section(SectionKind::Verse1).unwrap();
        assert_eq!(names(&verse.chords), ["Dm", "G", "C", "Dm", "G", "C", "Dm", "G"]);
        for section in structure.sections() {
            assert_eq!(section.chords.len() as u32, section.bars);
        }
    }

    #[test]
    fn single_chord_progression() {
        let structure = build_structure(&plan(&["Em"])).unwrap();
        assert!(structure.bar_chords().all(|c| c.to_string() == "Em"));
    }

    #[test]
    fn zero_bar_section_is_rejected() {
        let layout = [
            SectionSpec {
                section: SectionKind::Intro,
                bars: 4,
            },
            SectionSpec {
                section: SectionKind::Bridge,
                bars: 0,
            },
        ];
        let err = build_structure_with(&plan(&["C"]), &layout).unwrap_err();
        assert!(matches!(err, Error::ZeroBarSection { ref section } if section == "Bridge"));
    }

    #[test]
    fn empty_layout_is_not_an_empty_progression() {
        let err = build_structure_with(&plan(&["C", "G"]), &[]).unwrap_err();
        assert!(matches!(err, Error::EmptyStructure));
        assert_eq!(err.to_string(), "section layout is empty");
    }

    #[test]
    fn custom_layout() {
        let layout = [
            SectionSpec {
                section: SectionKind::Verse1,
                bars: 2,
            },
            SectionSpec {
                section: SectionKind::Chorus,
                bars: 3,
            },
        ];
        let structure = build_structure_with(&plan(&["C", "F"]), &layout).unwrap();
        assert_eq!(structure.total_bars(), 5);
        let all: Vec<Chord> = structure.bar_chords().copied().collect();
        assert_eq!(names(&all), ["C", "F", "C", "F", "C"]);
    }
}
