//! Error types for planning and rendering.
//!
//! Unknown symbols never show up here: chord roots and genre names fall back
//! to documented defaults where they are read. What remains are plans that
//! cannot produce a valid timeline and configuration problems.

/// Errors surfaced by the sequencing core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("chord progression is empty")]
    EmptyProgression,

    #[error("section layout is empty")]
    EmptyStructure,

    #[error("section {section} has zero bars")]
    ZeroBarSection { section: String },

    #[error("unrecognized chord symbol: {0:?}")]
    UnknownChord(String),

    #[error("no random seed configured; set `seed` in the render config")]
    MissingSeed,

    #[error("invalid mood profile: {0}")]
    InvalidMood(String),

    #[error("invalid render config: {0}")]
    InvalidConfig(String),

    #[error("cannot encode MIDI file: {0}")]
    Export(String),

    #[error("config parse error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
