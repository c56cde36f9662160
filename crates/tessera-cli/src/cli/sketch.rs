//! Sketch command: replay an editor script and export the tiling.
//!
//! Scripts drive the same stroke/fill/undo operations an interactive
//! front end would, using viewport coordinates:
//!
//! ```yaml
//! tile_size: 150
//! output: { width: 450, height: 450 }
//! steps:
//!   - { op: begin, at: [20, 20] }
//!   - { op: commit, at: [130, 20] }
//!   - { op: begin, stroke: arc, at: [20, 130] }
//!   - { op: commit, at: [130, 130] }
//!   - { op: complete-arc, through: [75, 100] }
//!   - { op: fill, at: [75, 10], color: "#dc1e1e" }
//!   - { op: undo }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tessera::fill::filled_pixels;
use tessera::{
    Color, Compositor, DrawAction, Palette, Point, StrokeKind, StrokeOutcome, TileDescriptor, TileKind,
    DEFAULT_TILE_SIZE,
};

use super::config::ViewportConfig;
use super::render::save_png;

#[derive(Args, Debug)]
pub struct SketchArgs {
    /// YAML sketch script
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Output PNG path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Write the single tile instead of the tiling
    #[arg(long)]
    pub tile_only: bool,

    /// Print a JSON summary of the action log to stdout
    #[arg(long)]
    pub json: bool,
}

/// A recorded editing session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SketchScript {
    pub tile_size: u32,
    pub palette: Palette,
    pub output: ViewportConfig,
    pub steps: Vec<SketchStep>,
}

impl Default for SketchScript {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            palette: Palette::default(),
            output: ViewportConfig::default(),
            steps: Vec::new(),
        }
    }
}

/// One editor operation. Points are `[x, y]` in viewport pixels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum SketchStep {
    Begin {
        #[serde(default)]
        stroke: StrokeKind,
        at: [f64; 2],
    },
    Update {
        at: [f64; 2],
    },
    Commit {
        at: [f64; 2],
    },
    CompleteArc {
        through: [f64; 2],
    },
    Fill {
        at: [f64; 2],
        color: Color,
    },
    Undo,
    Clear,
}

impl SketchScript {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read sketch script {}", path.display()))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse sketch YAML {}", path.display()))
    }

    pub fn descriptor(&self) -> TileDescriptor {
        TileDescriptor::new(TileKind::User, self.tile_size).with_palette(self.palette)
    }
}

/// Counts of what the replay did with each step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplayTally {
    pub committed: usize,
    pub awaiting_curvature: usize,
    pub discarded: usize,
    pub ignored: usize,
    pub fills: usize,
    pub empty_fills: usize,
    pub undos: usize,
}

impl ReplayTally {
    fn record(&mut self, outcome: StrokeOutcome) {
        match outcome {
            StrokeOutcome::Committed => self.committed += 1,
            StrokeOutcome::AwaitingCurvature => self.awaiting_curvature += 1,
            StrokeOutcome::Discarded => self.discarded += 1,
            StrokeOutcome::Ignored => self.ignored += 1,
        }
    }
}

fn point([x, y]: [f64; 2]) -> Point {
    Point::new(x, y)
}

/// Feed every step to the compositor in order.
pub fn replay(compositor: &mut Compositor, steps: &[SketchStep]) -> Result<ReplayTally> {
    let mut tally = ReplayTally::default();

    for (i, step) in steps.iter().enumerate() {
        match *step {
            SketchStep::Begin { stroke, at } => compositor.begin_stroke(stroke, point(at)),
            SketchStep::Update { at } => compositor.update_stroke(point(at)),
            SketchStep::Commit { at } => {
                let outcome = compositor.commit_stroke(point(at));
                debug!("step {}: stroke {:?}", i, outcome);
                tally.record(outcome);
            }
            SketchStep::CompleteArc { through } => {
                if compositor.complete_arc(point(through)) {
                    tally.committed += 1;
                } else {
                    warn!("step {}: no arc is waiting for a curvature point", i);
                }
            }
            SketchStep::Fill { at, color } => {
                let action = compositor
                    .fill_at(point(at), color)
                    .with_context(|| format!("Fill failed at step {}", i))?;
                match action {
                    Some(_) => tally.fills += 1,
                    None => {
                        warn!("step {}: fill at ({}, {}) changed nothing", i, at[0], at[1]);
                        tally.empty_fills += 1;
                    }
                }
            }
            SketchStep::Undo => {
                if compositor.undo() {
                    tally.undos += 1;
                } else {
                    debug!("step {}: nothing to undo", i);
                }
            }
            SketchStep::Clear => compositor.clear(),
        }
    }

    Ok(tally)
}

/// JSON view of one logged action.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum ActionSummary {
    Line { from: [f64; 2], to: [f64; 2], color: Color },
    Arc { start: [f64; 2], end: [f64; 2], through: Option<[f64; 2]>, color: Color },
    Fill { pixels: usize },
}

impl From<&DrawAction> for ActionSummary {
    fn from(action: &DrawAction) -> Self {
        let xy = |p: Point| [p.x, p.y];
        match action {
            DrawAction::Line { from, to, color } => {
                ActionSummary::Line { from: xy(*from), to: xy(*to), color: *color }
            }
            DrawAction::Arc { start, end, through, color } => ActionSummary::Arc {
                start: xy(*start),
                end: xy(*end),
                through: through.map(xy),
                color: *color,
            },
            DrawAction::Fill { patch } => ActionSummary::Fill { pixels: filled_pixels(patch) },
        }
    }
}

#[derive(Debug, Serialize)]
struct SketchSummary {
    output: String,
    tile_size: u32,
    revision: u64,
    tally: ReplayTally,
    actions: Vec<ActionSummary>,
}

/// Execute the sketch command.
pub fn cmd_sketch(args: &SketchArgs) -> Result<()> {
    let script = SketchScript::load(&args.script)?;
    info!("Replaying {} steps at tile size {}", script.steps.len(), script.tile_size);

    let mut compositor = Compositor::new(script.descriptor());
    let tally = replay(&mut compositor, &script.steps)?;

    let pixmap = if args.tile_only {
        compositor.render_tile()?.clone()
    } else {
        compositor.export_composite(script.output.width, script.output.height)?
    };
    save_png(&pixmap, &args.output)?;

    let log = compositor.log();
    if args.json {
        let summary = SketchSummary {
            output: args.output.display().to_string(),
            tile_size: script.tile_size,
            revision: log.revision(),
            tally,
            actions: log.iter().map(ActionSummary::from).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{} actions in log, wrote {}", log.len(), args.output.display());
    }
    Ok(())
}
