use crate::math::wrap_angle;
use crate::types::Model;

/// Constant yaw spin applied every rendered frame, regardless of scroll state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdleAnimator {
    /// Radians per second
    pub angular_rate: f32,
}

impl IdleAnimator {
    pub fn new(angular_rate: f32) -> Self {
        Self { angular_rate }
    }

    /// Yaw increment for a frame of `delta` seconds
    pub fn step(&self, delta: f32) -> f32 {
        self.angular_rate * delta
    }

    pub fn advance(&self, model: &mut Model, delta: f32) {
        model.root.rotation.y = wrap_angle(model.root.rotation.y + self.step(delta));
    }
}

impl Default for IdleAnimator {
    fn default() -> Self {
        Self::new(0.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::fallback_model;
    use crate::transform::{apply, map_progress, MapperConfig};
    use std::f32::consts::TAU;

    #[test]
    fn rotation_is_frame_rate_independent() {
        let animator = IdleAnimator::default();
        let mut coarse = fallback_model();
        let mut fine = fallback_model();

        for _ in 0..30 {
            animator.advance(&mut coarse, 1.0 / 30.0);
        }
        for _ in 0..120 {
            animator.advance(&mut fine, 1.0 / 120.0);
        }

        assert!((coarse.yaw() - 0.2).abs() < 1e-4);
        assert!((fine.yaw() - 0.2).abs() < 1e-4);
    }

    #[test]
    fn rotation_wraps_at_full_turn() {
        let animator = IdleAnimator::new(1.0);
        let mut model = fallback_model();

        for _ in 0..700 {
            animator.advance(&mut model, 0.01);
        }

        let expected = 7.0 % TAU;
        assert!((model.yaw() - expected).abs() < 1e-3);
        assert!(model.yaw() < TAU);
    }

    #[test]
    fn rotation_ignores_visibility() {
        let animator = IdleAnimator::default();
        let mut model = fallback_model();
        apply(&mut model, &map_progress(1.0, 0.0, &MapperConfig::default()));
        assert_eq!(model.visible_mesh_count(), 0);

        animator.advance(&mut model, 1.0);
        assert!((model.yaw() - 0.2).abs() < 1e-6);
    }
}
