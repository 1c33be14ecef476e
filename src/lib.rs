//! Moodscore — procedural multi-track song sequencing from a mood.
//!
//! A [`MoodProfile`](mood::MoodProfile) is planned into key, tempo and
//! progression ([`harmony`]), laid out into sections ([`section`]), given a
//! performance [`style`], played by per-role [`generator`]s and resolved by
//! the [`sequencer`] into delta-timed tracks. [`export`] turns the result
//! into a Standard MIDI File.

pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod generator;
pub mod harmony;
pub mod mood;
pub mod pipeline;
pub mod section;
pub mod sequencer;
pub mod style;
pub mod theory;

pub use error::{Error, Result};
