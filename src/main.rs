//! moodscore — render a mood into a multi-track MIDI sketch.
//!
//! Subcommands:
//! - `moodscore render` - plan, sequence and optionally write a .mid file
//! - `moodscore plan` - print the plan, structure and style only

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use moodscore::config::RenderConfig;
use moodscore::event::TrackRole;
use moodscore::export::write_midi;
use moodscore::harmony::SongPlan;
use moodscore::mood::{KeywordMoodAnalyzer, MoodLabel, MoodProfile};
use moodscore::pipeline::{arrange, render, Arrangement};
use moodscore::section::SongStructure;
use moodscore::style::StyleProfile;

#[derive(Parser)]
#[command(name = "moodscore")]
#[command(about = "Procedural multi-track song sketches from a mood")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render all tracks and optionally write a MIDI file
    Render {
        #[command(flatten)]
        request: RequestArgs,

        /// Write a Standard MIDI File here
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// What to print on stdout
        #[arg(short, long, value_enum, default_value = "summary")]
        format: OutputFormat,
    },

    /// Print plan, structure and style without rendering
    Plan {
        #[command(flatten)]
        request: RequestArgs,

        /// What to print on stdout
        #[arg(short, long, value_enum, default_value = "summary")]
        format: OutputFormat,
    },
}

#[derive(Args)]
struct RequestArgs {
    /// Free-text mood description, analyzed by keyword
    #[arg(short, long, conflicts_with_all = ["mood_file", "label"])]
    describe: Option<String>,

    /// YAML file holding a mood profile
    #[arg(long, conflicts_with = "label")]
    mood_file: Option<PathBuf>,

    /// Mood label (sad, happy, angry, calm, romantic)
    #[arg(short, long)]
    label: Option<String>,

    /// Energy 0.0–1.0, used with --label
    #[arg(long, default_value = "0.5")]
    energy: f64,

    /// Valence -1.0–1.0, used with --label
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    valence: f64,

    /// Override the planned song tempo (BPM)
    #[arg(long)]
    tempo: Option<u32>,

    /// Genre name, or "auto" to classify from the description
    #[arg(short, long, default_value = "auto")]
    genre: String,

    /// RNG seed; overrides the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Render config YAML (default: ~/.moodscore/render.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Summary,
    Json,
}

impl RequestArgs {
    fn mood(&self) -> Result<MoodProfile> {
        let mood = if let Some(path) = &self.mood_file {
            MoodProfile::load(path)
                .with_context(|| format!("loading mood profile {}", path.display()))?
        } else if let Some(text) = &self.describe {
            KeywordMoodAnalyzer::new().analyze(text)
        } else if let Some(name) = &self.label {
            let Some(label) = MoodLabel::parse(name) else {
                bail!("unknown mood label {name:?}");
            };
            MoodProfile::new(label, self.energy, self.valence)
        } else {
            bail!("one of --describe, --mood-file or --label is required");
        };
        mood.validate()?;
        Ok(mood)
    }

    fn arrange(&self) -> Result<(MoodProfile, RenderConfig, Arrangement)> {
        let mood = self.mood()?;
        let config = self.config()?;
        let mut arrangement = arrange(&mood, Some(&self.genre), &config)?;
        if let Some(tempo) = self.tempo {
            if tempo == 0 {
                bail!("--tempo must be positive");
            }
            arrangement.plan.tempo_bpm = tempo;
        }
        Ok((mood, config, arrangement))
    }

    fn config(&self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::load_from(path)
                .with_context(|| format!("loading render config {}", path.display()))?,
            None => RenderConfig::load().unwrap_or_default(),
        };
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        Ok(config)
    }
}

fn print_arrangement(
    mood: &MoodProfile,
    plan: &SongPlan,
    structure: &SongStructure,
    style: &StyleProfile,
) {
    println!(
        "mood      {} (energy {:.2}, valence {:+.2})",
        mood.label.name(),
        mood.energy,
        mood.valence
    );
    println!("genre     {}", plan.genre.name());
    println!("key       {} {}", plan.key, plan.mode.name());
    println!("tempo     {} bpm", plan.tempo_bpm);
    println!("chords    {}", plan.symbols().join(" "));
    println!("style     {}", style.name);
    println!();
    for section in structure.sections() {
        let chords: Vec<String> = section.chords.iter().map(|c| c.to_string()).collect();
        println!("  {:<13} {:>2} bars  {}", section.kind.name(), section.bars, chords.join(" "));
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plan { request, format } => {
            let (mood, _, arrangement) = request.arrange()?;
            match format {
                OutputFormat::Summary => print_arrangement(
                    &mood,
                    &arrangement.plan,
                    &arrangement.structure,
                    &arrangement.style,
                ),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&arrangement)?),
            }
        }
        Commands::Render {
            request,
            out,
            format,
        } => {
            let (mood, config, arrangement) = request.arrange()?;
            let rendered = render(
                &arrangement.plan,
                &arrangement.structure,
                &arrangement.style,
                &mood,
                &config,
            )?;

            if let Some(path) = &out {
                write_midi(&rendered, path)
                    .with_context(|| format!("writing {}", path.display()))?;
            }

            match format {
                OutputFormat::Summary => {
                    print_arrangement(
                        &mood,
                        &arrangement.plan,
                        &arrangement.structure,
                        &arrangement.style,
                    );
                    println!();
                    for role in TrackRole::ALL {
                        if let Some(track) = rendered.track(role) {
                            println!(
                                "  {:<10} ch {:>2}  program {:>4}  {:>5} events",
                                role.name(),
                                track.channel,
                                track.program.map_or("-".to_string(), |p| p.to_string()),
                                track.len()
                            );
                        }
                    }
                    println!("  total     {} ticks", rendered.total_ticks);
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&rendered)?)
                }
            }
        }
    }

    Ok(())
}
