use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_4;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::scroll::{BoundaryParseError, Scrub, TriggerSpec};
use crate::transform::MapperConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The animated model and how it is loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Asset path handed to the fetcher
    pub path: String,
    /// Build the procedural orb instead of fetching
    pub procedural: bool,
    pub position: [f32; 3],
    /// Initial yaw in radians
    pub yaw: f32,
    pub scale: f32,
    /// Seconds before a pending load is replaced by the fallback
    pub load_timeout: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: "/models/hero.glb".to_string(),
            procedural: false,
            position: [0.0, -2.5, 0.0],
            yaw: FRAC_PI_4,
            scale: 1.5,
            load_timeout: 10.0,
        }
    }
}

/// The model's scroll region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub trigger_id: String,
    pub selector: String,
    pub start: String,
    pub end: String,
    /// Smoothing time constant in seconds, 0 disables smoothing
    pub scrub_seconds: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            trigger_id: "landing-model".to_string(),
            selector: ".landing-section".to_string(),
            start: "top top".to_string(),
            end: "bottom top".to_string(),
            scrub_seconds: 1.0,
        }
    }
}

impl ScrollConfig {
    pub fn trigger_spec(&self) -> Result<TriggerSpec, BoundaryParseError> {
        Ok(TriggerSpec::parse(&self.trigger_id, &self.selector, &self.start, &self.end)?
            .with_scrub(Scrub::from_seconds(self.scrub_seconds)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdleConfig {
    /// Radians per second
    pub angular_rate: f32,
}

impl Default for IdleConfig {
    fn default() -> Self {
        Self { angular_rate: 0.2 }
    }
}

/// The pinned horizontal gallery that shares the trigger registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub trigger_id: String,
    pub selector: String,
    pub card_widths: Vec<f32>,
    pub margin_left: f32,
    pub padding_right: f32,
    /// Extra pixels so the last card clears the viewport edge
    pub end_buffer: f32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            trigger_id: "work".to_string(),
            selector: ".work-section".to_string(),
            card_widths: vec![600.0, 600.0, 600.0, 800.0],
            margin_left: 120.0,
            padding_right: 0.0,
            end_buffer: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub camera_position: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    pub environment: Option<String>,
    pub environment_intensity: f32,
    pub environment_blur: f32,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            camera_position: [0.0, -0.5, 4.0],
            fov: 45.0,
            environment: Some("/models/environment.hdr".to_string()),
            environment_intensity: 1.0,
            environment_blur: 0.5,
        }
    }
}

/// Complete scene configuration. Every field has a default, so a config
/// file only needs the values it changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub model: ModelConfig,
    pub scroll: ScrollConfig,
    pub mapping: MapperConfig,
    pub idle: IdleConfig,
    pub gallery: GalleryConfig,
    pub stage: StageConfig,
}

impl SceneConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Triggers that survive registry reconciliation
    pub fn retained_trigger_ids(&self) -> [&str; 2] {
        [self.gallery.trigger_id.as_str(), self.scroll.trigger_id.as_str()]
    }
}
