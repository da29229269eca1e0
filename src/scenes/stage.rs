use std::sync::Arc;
use std::thread;

use futures::channel::oneshot;
use glam::Vec3;
use log::{debug, info, warn};

use crate::camera::Camera;
use crate::config::StageConfig;
use crate::math::hex_to_rgb;
use crate::traits::AssetFetcher;

/// Scene light
#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    Directional {
        position: Vec3,
        intensity: f32,
        cast_shadow: bool,
        shadow_map_size: u32,
    },
    Point {
        position: Vec3,
        color: [f32; 3],
        intensity: f32,
        /// 0 means unlimited range
        distance: f32,
        decay: f32,
    },
}

/// Image-based lighting backdrop
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentMap {
    pub path: String,
    pub byte_len: usize,
    pub intensity: f32,
    pub blur: f32,
}

/// Backdrop fetch running on a worker thread
pub struct EnvironmentLoad {
    path: String,
    receiver: oneshot::Receiver<anyhow::Result<Vec<u8>>>,
}

impl EnvironmentLoad {
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Camera, lights and backdrop around the animated model
#[derive(Debug, Clone)]
pub struct Stage {
    pub camera: Camera,
    pub lights: Vec<Light>,
    pub environment: Option<EnvironmentMap>,
    config: StageConfig,
}

impl Stage {
    pub fn from_config(config: &StageConfig) -> Self {
        let camera = Camera::new(Vec3::from_array(config.camera_position), config.fov)
            .look_at(Vec3::ZERO);

        Self {
            camera,
            lights: default_lights(),
            environment: None,
            config: config.clone(),
        }
    }

    /// Start fetching the backdrop off the event loop. `None` when no
    /// backdrop is configured or the worker could not be spawned.
    pub fn begin_environment(&self, fetcher: Arc<dyn AssetFetcher>) -> Option<EnvironmentLoad> {
        let path = self.config.environment.clone()?;
        let (sender, receiver) = oneshot::channel();
        let worker_path = path.clone();

        let spawned = thread::Builder::new()
            .name("environment-loader".to_string())
            .spawn(move || {
                let _ = sender.send(fetcher.fetch(&worker_path));
            });
        if let Err(e) = spawned {
            warn!("Environment '{}' not fetched: {}", path, e);
            return None;
        }

        debug!("Environment '{}' requested", path);
        Some(EnvironmentLoad { path, receiver })
    }

    /// Check a pending backdrop fetch. `None` while it is still in flight,
    /// otherwise whether the backdrop was installed. A failure only costs
    /// the reflections.
    pub fn poll_environment(&mut self, load: &mut EnvironmentLoad) -> Option<bool> {
        let result = match load.receiver.try_recv() {
            Ok(Some(result)) => result,
            Ok(None) => return None,
            Err(oneshot::Canceled) => Err(anyhow::anyhow!("environment worker stopped")),
        };
        Some(self.install_environment(&load.path, result))
    }

    fn install_environment(&mut self, path: &str, fetched: anyhow::Result<Vec<u8>>) -> bool {
        match fetched {
            Ok(bytes) if is_radiance_hdr(&bytes) => {
                info!("Environment '{}' loaded ({} bytes)", path, bytes.len());
                self.environment = Some(EnvironmentMap {
                    path: path.to_string(),
                    byte_len: bytes.len(),
                    intensity: self.config.environment_intensity,
                    blur: self.config.environment_blur,
                });
                true
            }
            Ok(_) => {
                warn!("Environment '{}' is not a Radiance HDR image, skipping", path);
                false
            }
            Err(e) => {
                warn!("Environment '{}' unavailable: {:#}", path, e);
                false
            }
        }
    }

    /// Keep the projection matched to the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera = self.camera.with_aspect(width, height);
    }
}

/// Key light front-right, cool fill from the left, blue accent inside the model
fn default_lights() -> Vec<Light> {
    vec![
        Light::Directional {
            position: Vec3::new(5.0, 5.0, 5.0),
            intensity: 0.8,
            cast_shadow: true,
            shadow_map_size: 512,
        },
        Light::Point {
            position: Vec3::new(-5.0, 0.0, 5.0),
            color: hex_to_rgb(0xeeeeff),
            intensity: 0.3,
            distance: 0.0,
            decay: 2.0,
        },
        Light::Point {
            position: Vec3::new(0.0, 1.0, 0.0),
            color: hex_to_rgb(0x4488ff),
            intensity: 1.0,
            distance: 5.0,
            decay: 2.0,
        },
    ]
}

fn is_radiance_hdr(bytes: &[u8]) -> bool {
    bytes.starts_with(b"#?RADIANCE") || bytes.starts_with(b"#?RGBE")
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::time::{Duration, Instant};

    struct StaticFetcher(&'static [u8]);

    impl AssetFetcher for StaticFetcher {
        fn fetch(&self, _path: &str) -> Result<Vec<u8>> {
            Ok(self.0.to_vec())
        }
    }

    struct Offline;

    impl AssetFetcher for Offline {
        fn fetch(&self, path: &str) -> Result<Vec<u8>> {
            anyhow::bail!("offline: {}", path)
        }
    }

    fn settle(stage: &mut Stage, fetcher: Arc<dyn AssetFetcher>) -> bool {
        let mut load = stage.begin_environment(fetcher).expect("backdrop configured");
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(installed) = stage.poll_environment(&mut load) {
                return installed;
            }
            assert!(Instant::now() < deadline, "environment fetch never settled");
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn stage_has_three_lights_and_one_shadow_caster() {
        let stage = Stage::from_config(&StageConfig::default());
        assert_eq!(stage.lights.len(), 3);
        let casters = stage
            .lights
            .iter()
            .filter(|l| matches!(l, Light::Directional { cast_shadow: true, .. }))
            .count();
        assert_eq!(casters, 1);
        assert_eq!(stage.camera.position, Vec3::new(0.0, -0.5, 4.0));
    }

    #[test]
    fn environment_loads_from_hdr_bytes() {
        let mut stage = Stage::from_config(&StageConfig::default());
        assert!(settle(&mut stage, Arc::new(StaticFetcher(b"#?RADIANCE\nFORMAT=32-bit_rle_rgbe\n"))));
        let environment = stage.environment.as_ref().unwrap();
        assert_eq!(environment.path, "/models/environment.hdr");
        assert_eq!(environment.blur, 0.5);
    }

    #[test]
    fn environment_failure_is_tolerated() {
        let mut stage = Stage::from_config(&StageConfig::default());
        assert!(!settle(&mut stage, Arc::new(Offline)));
        assert!(!settle(&mut stage, Arc::new(StaticFetcher(b"PNG"))));
        assert!(stage.environment.is_none());
    }

    #[test]
    fn no_backdrop_configured_means_no_fetch() {
        let config = StageConfig {
            environment: None,
            ..StageConfig::default()
        };
        let stage = Stage::from_config(&config);
        assert!(stage.begin_environment(Arc::new(Offline)).is_none());
    }
}
