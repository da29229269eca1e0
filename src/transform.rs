use serde::{Deserialize, Serialize};

use crate::math::clamp_unit;
use crate::types::Model;

/// Tunables of the scroll → transform mapping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// World units the model descends over the full scroll region
    pub descent: f32,
    /// Opacity lost per unit of progress; 1.5 fades out at two thirds of the region
    pub fade_rate: f32,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            descent: 5.0,
            fade_rate: 1.5,
        }
    }
}

/// Derived state for one progress value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappedTransform {
    pub y: f32,
    pub opacity: f32,
    pub visible: bool,
}

/// Pure mapping from scroll progress to vertical offset and opacity
pub fn map_progress(progress: f32, base_y: f32, config: &MapperConfig) -> MappedTransform {
    let progress = clamp_unit(progress);
    let opacity = clamp_unit(1.0 - config.fade_rate * progress);

    MappedTransform {
        y: base_y - config.descent * progress,
        opacity,
        visible: opacity > 0.0,
    }
}

/// Write a mapped transform onto the model. Touches position and
/// materials only; rotation belongs to the idle animator.
pub fn apply(model: &mut Model, mapped: &MappedTransform) {
    model.root.position.y = mapped.y;
    for mesh in &mut model.meshes {
        mesh.material.set_opacity(mapped.opacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::procedural_orb;

    const BASE_Y: f32 = -2.5;

    fn opacity_at(progress: f32) -> f32 {
        map_progress(progress, BASE_Y, &MapperConfig::default()).opacity
    }

    #[test]
    fn opacity_falls_off_linearly() {
        assert_eq!(opacity_at(0.0), 1.0);
        assert!((opacity_at(0.5) - 0.25).abs() < 1e-6);
        assert!(opacity_at(0.667) < 1e-3);
        assert_eq!(opacity_at(0.7), 0.0);
        assert_eq!(opacity_at(1.0), 0.0);
    }

    #[test]
    fn visibility_tracks_opacity() {
        let config = MapperConfig::default();
        assert!(map_progress(0.5, BASE_Y, &config).visible);
        assert!(!map_progress(0.67, BASE_Y, &config).visible);
        assert!(!map_progress(1.0, BASE_Y, &config).visible);
    }

    #[test]
    fn offset_descends_with_progress() {
        let config = MapperConfig::default();
        assert_eq!(map_progress(0.0, BASE_Y, &config).y, BASE_Y);
        assert_eq!(map_progress(1.0, BASE_Y, &config).y, BASE_Y - 5.0);
        assert!((map_progress(0.5, BASE_Y, &config).y - (BASE_Y - 2.5)).abs() < 1e-6);
    }

    #[test]
    fn offset_is_monotonic() {
        let config = MapperConfig::default();
        let samples: Vec<f32> = (0..=100)
            .map(|i| map_progress(i as f32 / 100.0, BASE_Y, &config).y)
            .collect();
        assert!(samples.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        let config = MapperConfig::default();
        assert_eq!(map_progress(-0.5, BASE_Y, &config), map_progress(0.0, BASE_Y, &config));
        assert_eq!(map_progress(1.5, BASE_Y, &config), map_progress(1.0, BASE_Y, &config));
    }

    #[test]
    fn custom_fade_rate() {
        let config = MapperConfig {
            descent: 5.0,
            fade_rate: 1.0,
        };
        assert!(map_progress(0.9, BASE_Y, &config).visible);
        assert!(!map_progress(1.0, BASE_Y, &config).visible);
    }

    #[test]
    fn apply_updates_every_mesh_but_not_rotation() {
        let mut model = procedural_orb();
        model.root.rotation.y = 1.0;

        apply(&mut model, &map_progress(0.8, BASE_Y, &MapperConfig::default()));

        assert_eq!(model.root.rotation.y, 1.0);
        assert!((model.root.position.y - (BASE_Y - 4.0)).abs() < 1e-6);
        assert_eq!(model.visible_mesh_count(), 0);
        assert!(model.meshes.iter().all(|m| m.material.opacity == 0.0));
    }

    #[test]
    fn apply_reveals_meshes_again_when_scrolling_back() {
        let mut model = procedural_orb();
        let config = MapperConfig::default();

        apply(&mut model, &map_progress(1.0, BASE_Y, &config));
        assert_eq!(model.visible_mesh_count(), 0);

        let mapped = map_progress(0.2, BASE_Y, &config);
        apply(&mut model, &mapped);
        assert!(mapped.visible);
        assert_eq!(model.visible_mesh_count(), model.meshes.len());
        assert!(model
            .meshes
            .iter()
            .all(|m| (m.material.opacity - 0.7).abs() < 1e-6 && m.material.visible == mapped.visible));
    }
}
