//! Scripted stroke playback.
//!
//! A stroke script is a JSON document listing host events in order, plus a
//! few surface commands. It lets the CLI and tests drive a surface exactly as
//! a host would, including display resizes in the middle of a stroke.
//!
//! ```json
//! {
//!   "display": { "width": 512, "height": 512 },
//!   "steps": [
//!     { "type": "mouse_down", "x": 20, "y": 20 },
//!     { "type": "mouse_move", "x": 400, "y": 400 },
//!     { "type": "mouse_up" }
//!   ]
//! }
//! ```

use crate::config::ColorSpec;
use crate::draw::DrawingSurface;
use crate::input::{DisplayRect, PointerEvent};
use anyhow::{Context, Result, bail};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CURRENT_VERSION: u32 = 1;

fn default_version() -> u32 {
    CURRENT_VERSION
}

/// A recorded sequence of events and commands for one surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeScript {
    #[serde(default = "default_version")]
    pub version: u32,

    /// Where the surface is displayed when playback starts; defaults to 1:1
    #[serde(default)]
    pub display: Option<DisplayRect>,

    /// Pen width applied before the first step
    #[serde(default)]
    pub pen_width: Option<f64>,

    pub steps: Vec<ScriptStep>,
}

/// One entry of a script: either a surface command or a host event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    Command(ScriptCommand),
    Event(PointerEvent),
}

/// Surface operations that are not pointer input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptCommand {
    PenWidth { width: f64 },
    PenColor { color: ColorSpec },
    Clear,
    /// The surface moved or was resized on screen
    Display(DisplayRect),
}

/// Counters reported after playback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub events: usize,
    pub commands: usize,
}

impl StrokeScript {
    /// Parses a script from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let script: Self = serde_json::from_str(text).context("failed to parse stroke script")?;
        if script.version > CURRENT_VERSION {
            bail!(
                "stroke script version {} is newer than supported version {}",
                script.version,
                CURRENT_VERSION
            );
        }
        Ok(script)
    }

    /// Reads and parses a script file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read stroke script {}", path.display()))?;
        let script = Self::from_json(&text)
            .with_context(|| format!("invalid stroke script {}", path.display()))?;
        debug!(
            "Loaded stroke script {} with {} steps",
            path.display(),
            script.steps.len()
        );
        Ok(script)
    }

    /// Plays every step against `surface` in order.
    pub fn apply(&self, surface: &mut DrawingSurface) -> ReplaySummary {
        let mut display = self
            .display
            .unwrap_or_else(|| DisplayRect::identity(surface.width(), surface.height()));
        if let Some(width) = self.pen_width {
            surface.set_pen_width(width);
        }

        let mut summary = ReplaySummary::default();
        for step in &self.steps {
            match step {
                ScriptStep::Event(event) => {
                    surface.handle_event(event, &display);
                    summary.events += 1;
                }
                ScriptStep::Command(command) => {
                    match command {
                        ScriptCommand::PenWidth { width } => surface.set_pen_width(*width),
                        ScriptCommand::PenColor { color } => surface.set_pen_color(color.to_color()),
                        ScriptCommand::Clear => surface.clear(),
                        ScriptCommand::Display(rect) => display = *rect,
                    }
                    summary.commands += 1;
                }
            }
        }

        info!(
            "Replayed {} events and {} commands (surface {})",
            summary.events,
            summary.commands,
            if surface.is_empty() { "empty" } else { "inked" }
        );
        summary
    }
}
