//! Roman-numeral progressions — "I-V-vi-IV" resolved against a key.
//!
//! Numeral case picks the triad quality (upper = major, lower = minor). A `b`
//! prefix borrows from the parallel major scale lowered a semitone (bVI,
//! bVII). Suffixes: `7` (dominant on upper, minor seventh on lower),
//! `maj7`, and `°` (read as minor, there is no diminished quality).

use crate::theory::{Chord, ChordQuality, PitchClass, ScaleMode};

/// Resolve one numeral to a chord in `key`/`mode`. Unknown numerals resolve
/// to the tonic triad.
pub fn resolve_numeral(numeral: &str, key: PitchClass, mode: ScaleMode) -> Chord {
    let (borrowed, body) = match numeral.strip_prefix('b') {
        Some(rest) => (true, rest),
        None => (false, numeral),
    };

    let split = body
        .find(|c: char| !matches!(c, 'I' | 'V' | 'i' | 'v'))
        .unwrap_or(body.len());
    let (letters, suffix) = body.split_at(split);

    let Some(degree) = degree_index(letters) else {
        tracing::warn!(numeral, "unknown roman numeral, using tonic");
        let quality = match mode {
            ScaleMode::Major => ChordQuality::Major,
            ScaleMode::Minor => ChordQuality::Minor,
        };
        return Chord::new(key, quality);
    };

    let upper = letters.chars().all(|c| c.is_ascii_uppercase());
    let quality = match (suffix.trim_end_matches('°'), upper) {
        ("maj7", _) => ChordQuality::Major7,
        ("7", true) => ChordQuality::Dominant7,
        ("7", false) => ChordQuality::Minor7,
        (_, true) => ChordQuality::Major,
        (_, false) => ChordQuality::Minor,
    };

    let semitones = if borrowed {
        ScaleMode::Major.intervals()[degree] as i32 - 1
    } else {
        mode.intervals()[degree] as i32
    };

    Chord::new(key.transpose(semitones), quality)
}

/// Resolve a dash-separated progression such as `"vi-IV-I-V"`.
pub fn resolve_progression(progression: &str, key: PitchClass, mode: ScaleMode) -> Vec<Chord> {
    progression
        .split('-')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(|n| resolve_numeral(n, key, mode))
        .collect()
}

fn degree_index(letters: &str) -> Option<usize> {
    match letters.to_ascii_uppercase().as_str() {
        "I" => Some(0),
        "II" => Some(1),
        "III" => Some(2),
        "IV" => Some(3),
        "V" => Some(4),
        "VI" => Some(5),
        "VII" => Some(6),
        _ => None,
    }
}
