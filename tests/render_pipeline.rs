//! Render pipeline integration tests — mood → plan → structure → style → tracks.
//!
//! Everything runs in memory with a fixed seed; no files or devices.

use moodscore::config::RenderConfig;
use moodscore::event::{NoteEvent, TickClock, TrackRole};
use moodscore::generator::{BarContext, BassGenerator, MelodyGenerator, PartGenerator};
use moodscore::harmony::{Genre, SongPlan};
use moodscore::mood::{MoodLabel, MoodProfile};
use moodscore::pipeline::{compose, render};
use moodscore::section::{build_structure, build_structure_with, SectionKind, SectionSpec};
use moodscore::sequencer::TrackSequencer;
use moodscore::style::{select_style, StyleProfile};
use moodscore::theory::{Chord, PitchClass, ScaleMode};
use moodscore::Error;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SEED: u64 = 42;

fn c_major_plan() -> SongPlan {
    SongPlan::from_symbols(
        PitchClass::C,
        ScaleMode::Major,
        &["C", "G", "Am", "F"],
        110,
        Genre::Rock,
    )
    .unwrap()
}

fn moods() -> Vec<MoodProfile> {
    vec![
        MoodProfile::new(MoodLabel::Sad, 0.3, -0.6),
        MoodProfile::new(MoodLabel::Happy, 0.7, 0.8),
        MoodProfile::new(MoodLabel::Angry, 0.9, -0.7),
        MoodProfile::new(MoodLabel::Calm, 0.1, 0.2),
        MoodProfile::new(MoodLabel::Romantic, 0.45, 0.5),
    ]
}

// =============================================================================
// Structure invariants
// =============================================================================

#[test]
fn bar_counts_match_chord_counts() {
    let progressions: [&[&str]; 4] = [
        &["C"],
        &["C", "G"],
        &["Dm", "G", "C"],
        &["C", "G", "Am", "F", "Em"],
    ];
    for symbols in progressions {
        let plan =
            SongPlan::from_symbols(PitchClass::C, ScaleMode::Major, symbols, 100, Genre::Pop)
                .unwrap();
        let structure = build_structure(&plan).unwrap();
        let summed: u32 = structure.sections().iter().map(|s| s.bars).sum();
        assert_eq!(summed, structure.total_bars());
        assert_eq!(structure.bar_chords().count() as u32, structure.total_bars());
    }
}

#[test]
fn intro_cycles_the_opening_chords() {
    let layout = [
        SectionSpec {
            section: SectionKind::Intro,
            bars: 4,
        },
        SectionSpec {
            section: SectionKind::Verse1,
            bars: 8,
        },
    ];
    let structure = build_structure_with(&c_major_plan(), &layout).unwrap();
    let first_four: Vec<String> = structure
        .bar_chords()
        .take(4)
        .map(|c| c.to_string())
        .collect();
    assert_eq!(first_four, ["C", "G", "C", "G"]);
    assert_eq!(structure.total_bars(), 12);
}

#[test]
fn every_chord_voices_in_range() {
    let symbols = ["C", "Am", "F#m7", "Bbmaj7", "G7", "Ebm", "B", "Dm7"];
    for symbol in symbols {
        let chord: Chord = symbol.parse().unwrap();
        for octave in 0..=9 {
            let voiced = chord.voice(octave);
            assert!(voiced.len() == 3 || voiced.len() == 4, "{symbol} at {octave}");
            assert!(voiced.iter().all(|&p| p <= 127));
        }
    }
}

#[test]
fn malformed_plans_fail_before_generation() {
    assert!(matches!(
        SongPlan::new(PitchClass::C, ScaleMode::Major, vec![], 100, Genre::Pop),
        Err(Error::EmptyProgression)
    ));

    let layout = [SectionSpec {
        section: SectionKind::Verse2,
        bars: 0,
    }];
    assert!(matches!(
        build_structure_with(&c_major_plan(), &layout),
        Err(Error::ZeroBarSection { .. })
    ));
}

// =============================================================================
// Style
// =============================================================================

#[test]
fn angry_high_energy_is_aggressive() {
    let style = select_style(&MoodProfile::new(MoodLabel::Angry, 0.8, -0.5));
    assert_eq!(style.chorus_lift, 0);
    assert!(style.melody_density > 0.8);
}

// =============================================================================
// Generators
// =============================================================================

fn bar_context<'a>(style: &'a StyleProfile, chord: &str) -> BarContext<'a> {
    BarContext {
        chord: Chord::parse_lenient(chord),
        section: SectionKind::Verse1,
        style,
        key: PitchClass::C,
        mode: ScaleMode::Major,
        energy: 0.5,
        valence: 0.5,
    }
}

#[test]
fn active_bass_plays_four_notes() {
    let mut style = select_style(&MoodProfile::new(MoodLabel::Happy, 0.5, 0.5));
    style.bass_activity = 0.9;
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let notes = BassGenerator::new(2).generate_bar(&bar_context(&style, "C"), &mut rng);

    assert_eq!(notes.len(), 4);
    let beats: Vec<f64> = notes.iter().map(|n| n.beat).collect();
    assert_eq!(beats, [0.0, 1.5, 2.5, 3.0]);
    let root = notes[0].pitch;
    assert_eq!(notes[1].pitch, root + 7);
    assert!([root + 2, root + 3, root + 5].contains(&notes[2].pitch));
    assert_eq!(notes[3].pitch, root);
}

#[test]
fn melody_rests_advance_the_motif() {
    let mut style = select_style(&MoodProfile::new(MoodLabel::Happy, 0.5, 0.5));
    style.melody_density = 0.5;
    let mut melody = MelodyGenerator::new(5);
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);

    let mut sounded = 0;
    for bar in 1..=16u64 {
        let notes = melody.generate_bar(&bar_context(&style, "C"), &mut rng);
        sounded += notes.len();
        assert_eq!(melody.step(), bar * 4);
        // every sounding note sits on its own beat
        assert!(notes.iter().all(|n| n.beat.fract() == 0.0));
    }
    assert!(sounded < 64);
    assert!(sounded > 0);
}

// =============================================================================
// Sequencer
// =============================================================================

/// Emits pitches 64 then 60, both on beat 0.
struct Unsorted;

impl PartGenerator for Unsorted {
    fn role(&self) -> TrackRole {
        TrackRole::Chords
    }

    fn generate_bar(&mut self, _ctx: &BarContext<'_>, _rng: &mut dyn RngCore) -> Vec<NoteEvent> {
        vec![
            NoteEvent::new(64, 0.0, 1.0, 80),
            NoteEvent::new(60, 0.0, 1.0, 80),
        ]
    }
}

#[test]
fn simultaneous_onsets_emit_lower_pitch_first() {
    let mood = MoodProfile::new(MoodLabel::Happy, 0.5, 0.5);
    let style = select_style(&mood);
    let layout = [SectionSpec {
        section: SectionKind::Verse1,
        bars: 1,
    }];
    let structure = build_structure_with(&c_major_plan(), &layout).unwrap();
    let mut parts: Vec<Box<dyn PartGenerator>> = vec![Box::new(Unsorted)];
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);

    let render = TrackSequencer::new(TickClock::default()).sequence(
        &c_major_plan(),
        &structure,
        &style,
        &mood,
        &mut parts,
        &mut rng,
    );
    let events = render.tracks[0].events();
    assert_eq!(events.len(), 2);
    assert_eq!((events[0].pitch, events[0].delta_ticks), (60, 0));
    assert_eq!((events[1].pitch, events[1].delta_ticks), (64, 0));
}

#[test]
fn deltas_are_bounded_for_every_mood_and_genre() {
    let config = RenderConfig::default();
    for mood in moods() {
        for genre in Genre::ALL {
            let composition = compose(&mood, Some(genre.name()), &config).unwrap();
            let render = &composition.render;
            assert_eq!(
                render.total_ticks,
                composition.structure.total_bars() as u64 * 4 * 480
            );
            for track in &render.tracks {
                let mut absolute = 0u64;
                for event in track.events() {
                    absolute += event.delta_ticks;
                    assert!(absolute <= render.total_ticks);
                    assert!(event.duration_ticks > 0);
                    assert!(event.pitch <= 127);
                    assert!(event.velocity >= 1 && event.velocity <= 127);
                    assert!(event.end_tick() <= render.total_ticks);
                }
            }
        }
    }
}

#[test]
fn renders_are_reproducible() {
    let config = RenderConfig::default();
    let mood = MoodProfile::new(MoodLabel::Happy, 0.8, 0.7);
    let plan = c_major_plan();
    let structure = build_structure(&plan).unwrap();
    let style = select_style(&mood);

    let a = render(&plan, &structure, &style, &mood, &config).unwrap();
    let b = render(&plan, &structure, &style, &mood, &config).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn percussion_lives_on_channel_nine() {
    let mood = MoodProfile::new(MoodLabel::Angry, 0.9, -0.5);
    let composition = compose(&mood, Some("rock"), &RenderConfig::default()).unwrap();
    let drums = composition.render.track(TrackRole::Percussion).unwrap();
    assert!(!drums.is_empty());
    assert!(drums.events().iter().all(|e| e.channel == 9));
    assert_eq!(drums.program, None);

    let lead = composition.render.track(TrackRole::Lead).unwrap();
    assert_eq!(lead.program, Some(30));
}

#[test]
fn ambient_drops_the_lead_and_uses_a_pad() {
    let mood = MoodProfile::new(MoodLabel::Calm, 0.2, 0.3);
    let composition = compose(&mood, Some("ambient"), &RenderConfig::default()).unwrap();
    let render = &composition.render;
    assert!(render.track(TrackRole::Lead).unwrap().is_empty());
    assert_eq!(render.track(TrackRole::Chords).unwrap().program, Some(89));
    // only the final chorus is dense enough for the token kick and hat
    let drums = render.track(TrackRole::Percussion).unwrap();
    assert_eq!(drums.len(), 2 * 8);
}

#[test]
fn key_change_lifts_the_final_chorus_only_forward() {
    let mood = MoodProfile::new(MoodLabel::Happy, 0.5, 0.5);
    let plan = c_major_plan();
    let structure = build_structure(&plan).unwrap();
    let style = select_style(&mood);

    let plain = render(&plan, &structure, &style, &mood, &RenderConfig::default()).unwrap();
    let lifted_config = RenderConfig {
        key_change_semitones: 2,
        ..RenderConfig::default()
    };
    let lifted = render(&plan, &structure, &style, &mood, &lifted_config).unwrap();

    let final_chorus_start = 28 * 1920;
    let bass = |r: &moodscore::sequencer::Render| -> Vec<(u64, u8)> {
        r.track(TrackRole::Bass)
            .unwrap()
            .events()
            .iter()
            .map(|e| (e.start_tick, e.pitch))
            .collect()
    };
    let before: Vec<_> = bass(&plain)
        .into_iter()
        .filter(|(t, _)| *t < final_chorus_start)
        .collect();
    let before_lifted: Vec<_> = bass(&lifted)
        .into_iter()
        .filter(|(t, _)| *t < final_chorus_start)
        .collect();
    assert_eq!(before, before_lifted);

    let plain_fc = bass(&plain)
        .into_iter()
        .find(|(t, _)| *t == final_chorus_start)
        .unwrap();
    let lifted_fc = bass(&lifted)
        .into_iter()
        .find(|(t, _)| *t == final_chorus_start)
        .unwrap();
    assert_eq!(lifted_fc.1, plain_fc.1 + 2);

    // drums are never transposed
    assert_eq!(
        plain.track(TrackRole::Percussion),
        lifted.track(TrackRole::Percussion)
    );
}
