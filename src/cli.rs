// cli.rs - Command-line interface configuration
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::SceneConfig;

#[derive(Parser, Debug, Clone)]
#[command(name = "scroll-scene")]
#[command(about = "Headless scroll-synchronized scene driver", long_about = None)]
pub struct Cli {
    /// JSON scene configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Model to load instead of the configured one
    #[arg(short, long, env = "GLTF_FILE")]
    pub model: Option<String>,

    /// Use the built-in procedural orb
    #[arg(long)]
    pub procedural: bool,

    /// Directory that absolute asset paths are resolved against
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 600)]
    pub frames: u64,

    /// Simulated frame rate
    #[arg(long, default_value_t = 60.0, value_parser = positive_rate)]
    pub fps: f32,

    /// Pace frames against the wall clock instead of simulating them
    #[arg(long)]
    pub realtime: bool,

    /// Simulated scroll speed in pixels per second
    #[arg(long, default_value_t = 400.0)]
    pub scroll_speed: f32,

    /// Disable UI elements and console output
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Load a model once and print what was decoded
    Inspect {
        /// Path to a .glb or .gltf file
        path: String,
    },
}

/// Frame rates become frame durations, so only finite values above zero are usable
fn positive_rate(value: &str) -> Result<f32, String> {
    let rate: f32 = value
        .parse()
        .map_err(|e| format!("'{}' is not a number: {}", value, e))?;
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(format!("frame rate must be a positive number, got {}", value))
    }
}

impl Cli {
    /// Configuration file (or defaults) with command-line overrides applied
    pub fn scene_config(&self) -> anyhow::Result<SceneConfig> {
        let mut config = match &self.config {
            Some(path) => SceneConfig::from_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => SceneConfig::default(),
        };

        if let Some(model) = &self.model {
            config.model.path = model.clone();
        }
        if self.procedural {
            config.model.procedural = true;
        }
        Ok(config)
    }
}
