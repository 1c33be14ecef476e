//! Track sequencer — walks the song bar by bar and resolves every part's
//! bar-local notes into delta-timed track timelines.
//!
//! Sections are walked in order, then bars. Each bar starts
//! `4 · ticks_per_beat` after the previous one. Within a bar a part's notes
//! are ordered by beat, ties broken by ascending pitch, then placed through
//! that track's [`TrackCursor`].

pub mod cursor;
pub mod program;

pub use cursor::TrackCursor;
pub use program::program_for;

use rand::RngCore;
use serde::Serialize;

use crate::event::{NoteEvent, TickClock, TrackRole, TrackTimeline};
use crate::generator::{BarContext, PartGenerator};
use crate::harmony::{Genre, SongPlan};
use crate::mood::MoodProfile;
use crate::section::{SectionKind, SongStructure};
use crate::style::StyleProfile;

/// The output of one render, owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Render {
    pub tempo_bpm: u32,
    pub ticks_per_beat: u16,
    pub total_ticks: u64,
    pub genre: Genre,
    pub tracks: Vec<TrackTimeline>,
}

impl Render {
    pub fn track(&self, role: TrackRole) -> Option<&TrackTimeline> {
        self.tracks.iter().find(|t| t.role == role)
    }

    pub fn event_count(&self) -> usize {
        self.tracks.iter().map(TrackTimeline::len).sum()
    }
}

/// Sort a bar's notes by beat, then pitch. Stable for exact duplicates.
pub fn order_bar(notes: &mut [NoteEvent]) {
    notes.sort_by(|a, b| a.beat.total_cmp(&b.beat).then(a.pitch.cmp(&b.pitch)));
}

#[derive(Debug, Clone, Copy)]
pub struct TrackSequencer {
    clock: TickClock,
    key_change: i32,
}

impl TrackSequencer {
    pub fn new(clock: TickClock) -> Self {
        Self {
            clock,
            key_change: 0,
        }
    }

    /// Semitones added to every pitched part from the Final Chorus on.
    pub fn with_key_change(mut self, semitones: i32) -> Self {
        self.key_change = semitones;
        self
    }

    /// Render every part across the whole structure.
    ///
    /// Parts are asked for their bar in slice order, so a given `rng` state
    /// always yields the same render.
    pub fn sequence(
        &self,
        plan: &SongPlan,
        structure: &SongStructure,
        style: &StyleProfile,
        mood: &MoodProfile,
        parts: &mut [Box<dyn PartGenerator>],
        rng: &mut dyn RngCore,
    ) -> Render {
        let total_ticks = self.clock.bars_to_ticks(structure.total_bars());
        let mut tracks: Vec<TrackTimeline> = parts
            .iter()
            .map(|p| TrackTimeline::new(p.role(), program_for(p.role(), style)))
            .collect();
        let mut cursors = vec![TrackCursor::new(total_ticks); parts.len()];

        let mut transpose = 0i32;
        let mut bar_start = 0u64;

        for section in structure.sections() {
            if section.kind == SectionKind::FinalChorus && self.key_change != 0 {
                transpose += self.key_change;
                tracing::debug!(transpose, "key change");
            }
            tracing::debug!(section = %section.kind, bars = section.bars, bar_start, "sequencing section");

            for chord in &section.chords {
                let written = BarContext {
                    chord: *chord,
                    section: section.kind,
                    style,
                    key: plan.key,
                    mode: plan.mode,
                    energy: mood.energy,
                    valence: mood.valence,
                };
                let lifted = BarContext {
                    chord: chord.transpose(transpose),
                    key: plan.key.transpose(transpose),
                    ..written
                };

                for ((part, track), cursor) in
                    parts.iter_mut().zip(tracks.iter_mut()).zip(cursors.iter_mut())
                {
                    let ctx = if part.role().is_pitched() { &lifted } else { &written };
                    let mut notes = part.generate_bar(ctx, rng);
                    order_bar(&mut notes);
                    for note in notes {
                        let start = bar_start + self.clock.beats_to_ticks(note.beat);
                        let duration = self.clock.beats_to_ticks(note.duration);
                        if let Some(event) =
                            cursor.emit(start, duration, note.pitch, note.velocity, track.channel)
                        {
                            track.push(event);
                        }
                    }
                }

                bar_start += self.clock.bar_ticks();
            }
        }

        let render = Render {
            tempo_bpm: plan.tempo_bpm,
            ticks_per_beat: self.clock.ticks_per_beat(),
            total_ticks,
            genre: plan.genre,
            tracks,
        };
        for track in &render.tracks {
            tracing::debug!(role = %track.role, events = track.len(), "track sequenced");
        }
        tracing::info!(
            bars = structure.total_bars(),
            total_ticks,
            events = render.event_count(),
            "render finished"
        );
        render
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::standard_parts;
    use crate::config::RenderConfig;
    use crate::mood::MoodLabel;
    use crate::section::{build_structure, build_structure_with, SectionSpec};
    use crate::style::select_style;
    use crate::theory::{PitchClass, ScaleMode};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Emits fixed notes every bar, in the order given.
    struct Fixed {
        role: TrackRole,
        notes: Vec<NoteEvent>,
    }

    impl PartGenerator for Fixed {
        fn role(&self) -> TrackRole {
            self.role
        }

        fn generate_bar(&mut self, _ctx: &BarContext<'_>, _rng: &mut dyn RngCore) -> Vec<NoteEvent> {
            self.notes.clone()
        }
    }

    /// Records the bass root it was asked to play.
    struct RootProbe;

    impl PartGenerator for RootProbe {
        fn role(&self) -> TrackRole {
            TrackRole::Bass
        }

        fn generate_bar(&mut self, ctx: &BarContext<'_>, _rng: &mut dyn RngCore) -> Vec<NoteEvent> {
            vec![NoteEvent::new(ctx.chord.root.in_octave(3), 0.0, 4.0, 90)]
        }
    }

    fn plan() -> SongPlan {
        SongPlan::from_symbols(PitchClass::C, ScaleMode::Major, &["C", "G", "Am", "F"], 100, Genre::Pop)
            .unwrap()
    }

    fn mood() -> MoodProfile {
        MoodProfile::new(MoodLabel::Happy, 0.6, 0.5)
    }

    fn two_bars() -> SongStructure {
        let layout = [SectionSpec {
            section: SectionKind::Verse1,
            bars: 2,
        }];
        build_structure_with(&plan(), &layout).unwrap()
    }

    #[test]
    fn simultaneous_onsets_tie_break_by_pitch() {
        let mood = mood();
        let style = select_style(&mood);
        let mut parts: Vec<Box<dyn PartGenerator>> = vec![Box::new(Fixed {
            role: TrackRole::Lead,
            notes: vec![NoteEvent::new(64, 0.0, 1.0, 80), NoteEvent::new(60, 0.0, 1.0, 80)],
        })];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let render = TrackSequencer::new(TickClock::new(480)).sequence(
            &plan(),
            &two_bars(),
            &style,
            &mood,
            &mut parts,
            &mut rng,
        );

        let events = render.tracks[0].events();
        assert_eq!(events[0].pitch, 60);
        assert_eq!(events[1].pitch, 64);
        assert_eq!(events[1].delta_ticks, 0);
        // second bar starts 1920 ticks in; previous note ended at 480
        assert_eq!(events[2].start_tick, 1920);
        assert_eq!(events[2].delta_ticks, 1440);
    }

    #[test]
    fn beats_map_to_absolute_ticks() {
        let mood = mood();
        let style = select_style(&mood);
        let mut parts: Vec<Box<dyn PartGenerator>> = vec![Box::new(Fixed {
            role: TrackRole::Melody,
            notes: vec![NoteEvent::new(72, 2.5, 0.5, 80), NoteEvent::new(70, 0.5, 0.5, 80)],
        })];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let render = TrackSequencer::new(TickClock::new(96)).sequence(
            &plan(),
            &two_bars(),
            &style,
            &mood,
            &mut parts,
            &mut rng,
        );
        let starts: Vec<u64> = render.tracks[0].events().iter().map(|e| e.start_tick).collect();
        assert_eq!(starts, [48, 240, 432, 624]);
        assert_eq!(render.total_ticks, 768);
    }

    #[test]
    fn key_change_applies_from_final_chorus() {
        let mood = mood();
        let style = select_style(&mood);
        let layout = [
            SectionSpec {
                section: SectionKind::Chorus,
                bars: 1,
            },
            SectionSpec {
                section: SectionKind::FinalChorus,
                bars: 1,
            },
            SectionSpec {
                section: SectionKind::Outro,
                bars: 1,
            },
        ];
        let structure = build_structure_with(&plan(), &layout).unwrap();
        let mut parts: Vec<Box<dyn PartGenerator>> = vec![Box::new(RootProbe)];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let render = TrackSequencer::new(TickClock::default())
            .with_key_change(2)
            .sequence(&plan(), &structure, &style, &mood, &mut parts, &mut rng);

        let pitches: Vec<u8> = render.tracks[0].events().iter().map(|e| e.pitch).collect();
        // C, then C + 2 in the final chorus, and the outro stays lifted
        assert_eq!(pitches, [48, 50, 50]);
    }

    #[test]
    fn key_change_skips_unpitched_roles() {
        struct RootAsDrum;

        impl PartGenerator for RootAsDrum {
            fn role(&self) -> TrackRole {
                TrackRole::Percussion
            }

            fn generate_bar(&mut self, ctx: &BarContext<'_>, _rng: &mut dyn RngCore) -> Vec<NoteEvent> {
                vec![NoteEvent::new(ctx.chord.root.in_octave(3), 0.0, 1.0, 90)]
            }
        }

        let mood = mood();
        let style = select_style(&mood);
        let layout = [
            SectionSpec {
                section: SectionKind::Chorus,
                bars: 1,
            },
            SectionSpec {
                section: SectionKind::FinalChorus,
                bars: 1,
            },
        ];
        let structure = build_structure_with(&plan(), &layout).unwrap();
        let mut parts: Vec<Box<dyn PartGenerator>> = vec![Box::new(RootProbe), Box::new(RootAsDrum)];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let render = TrackSequencer::new(TickClock::default())
            .with_key_change(3)
            .sequence(&plan(), &structure, &style, &mood, &mut parts, &mut rng);

        let pitches = |role| -> Vec<u8> {
            render.track(role).unwrap().events().iter().map(|e| e.pitch).collect()
        };
        assert_eq!(pitches(TrackRole::Bass), [48, 51]);
        assert_eq!(pitches(TrackRole::Percussion), [48, 48]);
    }

    #[test]
    fn standard_render_invariants() {
        let mood = mood();
        let style = select_style(&mood);
        let structure = build_structure(&plan()).unwrap();
        let config = RenderConfig::default();
        let mut parts = standard_parts(&config);
        let mut rng = config.rng().unwrap();
        let render = TrackSequencer::new(config.clock().unwrap()).sequence(
            &plan(),
            &structure,
            &style,
            &mood,
            &mut parts,
            &mut rng,
        );

        assert_eq!(render.total_ticks, 44 * 1920);
        assert_eq!(render.tracks.len(), 5);
        for track in &render.tracks {
            let sum: u64 = track.deltas().sum();
            assert!(sum <= render.total_ticks);
            assert!(track.end_tick() <= render.total_ticks);
            assert!(track.events().windows(2).all(|w| w[0].start_tick <= w[1].start_tick));
            assert!(track.events().iter().all(|e| e.channel == track.channel));
        }
        assert_eq!(render.track(TrackRole::Percussion).map(|t| t.channel), Some(9));
        assert_eq!(render.track(TrackRole::Bass).and_then(|t| t.program), Some(33));
    }
}
