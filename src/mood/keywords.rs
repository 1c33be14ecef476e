//! Keyword mood analysis — a lightweight text-to-mood stand-in.
//!
//! Counts label keywords, nudges energy with arousal words, and estimates
//! valence from a small sentiment lexicon. Good enough for the CLI; real
//! deployments feed a [`MoodProfile`] from a proper analyzer instead.

use super::{MoodLabel, MoodProfile};

const BASE_ENERGY: f64 = 0.5;
const AROUSAL_STEP: f64 = 0.12;

const AROUSAL_UP: &[&str] = &[
    "excited", "thrilled", "furious", "rage", "panic", "anxious", "ecstatic", "hyped",
];
const AROUSAL_DOWN: &[&str] = &[
    "tired", "calm", "peaceful", "empty", "numb", "sleepy", "still", "quiet",
];

const POSITIVE: &[&str] = &[
    "happy", "joy", "love", "great", "good", "hopeful", "grateful", "smile", "excited",
    "wonderful", "tender", "celebrate", "peaceful", "relaxed",
];
const NEGATIVE: &[&str] = &[
    "sad", "lonely", "angry", "hate", "cry", "grief", "loss", "furious", "empty", "tired",
    "heartbroken", "depressed", "betrayed", "frustrated", "bad",
];

fn label_keywords(label: MoodLabel) -> &'static [&'static str] {
    match label {
        MoodLabel::Sad => &[
            "sad", "lonely", "heartbroken", "depressed", "melancholy", "cry", "grief", "loss",
        ],
        MoodLabel::Happy => &[
            "happy", "joy", "excited", "celebrate", "victory", "smile", "grateful", "hopeful",
        ],
        MoodLabel::Angry => &[
            "angry", "furious", "rage", "frustrated", "fight", "hate", "betrayed",
        ],
        MoodLabel::Calm => &[
            "calm", "peaceful", "relaxed", "chill", "serene", "soft", "meditative",
        ],
        MoodLabel::Romantic => &[
            "love", "romantic", "crush", "tender", "affection", "kiss", "yearning",
        ],
    }
}

/// Derives a [`MoodProfile`] from free text using keyword tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordMoodAnalyzer;

impl KeywordMoodAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, description: &str) -> MoodProfile {
        let text = description.to_lowercase();
        let words: Vec<&str> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        let valence = estimate_valence(&words);
        let energy = estimate_energy(&words);

        let label = match keyword_label(&text) {
            Some(label) => label,
            None => fallback_label(valence, energy),
        };

        let mut profile = MoodProfile::new(label, energy, valence);
        profile.description = description.to_string();
        tracing::debug!(
            label = label.name(),
            energy,
            valence,
            "analyzed mood from keywords"
        );
        profile
    }
}

/// Best-scoring label by substring keyword hits; ties go to catalog order.
fn keyword_label(text: &str) -> Option<MoodLabel> {
    let mut best: Option<(MoodLabel, usize)> = None;
    for label in MoodLabel::ALL {
        let hits = label_keywords(label)
            .iter()
            .filter(|kw| text.contains(*kw))
            .count();
        if hits > 0 && best.map_or(true, |(_, top)| hits > top) {
            best = Some((label, hits));
        }
    }
    best.map(|(label, _)| label)
}

fn count(words: &[&str], lexicon: &[&str]) -> usize {
    words.iter().filter(|w| lexicon.contains(*w)).count()
}

fn estimate_energy(words: &[&str]) -> f64 {
    let up = count(words, AROUSAL_UP) as f64;
    let down = count(words, AROUSAL_DOWN) as f64;
    (BASE_ENERGY + AROUSAL_STEP * (up - down)).clamp(0.0, 1.0)
}

fn estimate_valence(words: &[&str]) -> f64 {
    let pos = count(words, POSITIVE) as f64;
    let neg = count(words, NEGATIVE) as f64;
    if pos + neg == 0.0 {
        0.0
    } else {
        (pos - neg) / (pos + neg)
    }
}

/// Quadrant fallback when no label keyword matched.
fn fallback_label(valence: f64, energy: f64) -> MoodLabel {
    if valence < -0.25 && energy < 0.55 {
        MoodLabel::Sad
    } else if valence < -0.25 {
        MoodLabel::Angry
    } else if valence > 0.25 && energy >= 0.55 {
        MoodLabel::Happy
    } else if valence > 0.25 {
        MoodLabel::Romantic
    } else {
        MoodLabel::Calm
    }
}
