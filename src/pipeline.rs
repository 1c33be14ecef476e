//! End-to-end composition: mood → plan → structure → style → render.
//!
//! Every call builds its own plan, structure and generators; nothing is
//! shared between renders.

use serde::Serialize;

use crate::config::RenderConfig;
use crate::error::Result;
use crate::generator::standard_parts;
use crate::harmony::{GenreClassifier, HarmonyPlanner, PrototypeClassifier, SongPlan};
use crate::mood::MoodProfile;
use crate::section::{build_structure_with, SongStructure};
use crate::sequencer::{Render, TrackSequencer};
use crate::style::{select_style, StyleProfile};

/// Everything produced for one request.
#[derive(Debug, Clone, Serialize)]
pub struct Composition {
    pub plan: SongPlan,
    pub structure: SongStructure,
    pub style: StyleProfile,
    pub render: Render,
}

/// Plan, structure and style without rendering.
#[derive(Debug, Clone, Serialize)]
pub struct Arrangement {
    pub plan: SongPlan,
    pub structure: SongStructure,
    pub style: StyleProfile,
}

/// Resolve everything up to (not including) sequencing.
pub fn arrange_with<C: GenreClassifier>(
    planner: &HarmonyPlanner<C>,
    mood: &MoodProfile,
    forced_genre: Option<&str>,
    config: &RenderConfig,
) -> Result<Arrangement> {
    mood.validate()?;
    let plan = planner.plan(mood, forced_genre);
    let structure = build_structure_with(&plan, &config.layout())?;
    let style = select_style(mood).refine_for_genre(plan.genre);
    Ok(Arrangement {
        plan,
        structure,
        style,
    })
}

pub fn arrange(
    mood: &MoodProfile,
    forced_genre: Option<&str>,
    config: &RenderConfig,
) -> Result<Arrangement> {
    arrange_with(&HarmonyPlanner::<PrototypeClassifier>::new(), mood, forced_genre, config)
}

/// Render an already resolved plan with the standard ensemble.
///
/// Fails with [`Error::MissingSeed`](crate::Error::MissingSeed) or
/// [`Error::InvalidConfig`](crate::Error::InvalidConfig) before any
/// generation if the config has no seed or an unusable resolution.
pub fn render(
    plan: &SongPlan,
    structure: &SongStructure,
    style: &StyleProfile,
    mood: &MoodProfile,
    config: &RenderConfig,
) -> Result<Render> {
    let mut rng = config.rng()?;
    let clock = config.clock()?;
    let mut parts = standard_parts(config);
    let sequencer = TrackSequencer::new(clock).with_key_change(config.key_change_semitones);
    Ok(sequencer.sequence(plan, structure, style, mood, &mut parts, &mut rng))
}

/// The whole pipeline with the default genre classifier.
pub fn compose(
    mood: &MoodProfile,
    forced_genre: Option<&str>,
    config: &RenderConfig,
) -> Result<Composition> {
    let Arrangement {
        plan,
        structure,
        style,
    } = arrange(mood, forced_genre, config)?;
    let render = render(&plan, &structure, &style, mood, config)?;
    Ok(Composition {
        plan,
        structure,
        style,
        render,
    })
}
