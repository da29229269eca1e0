use glam::{Mat4, Vec3};

use crate::types::CameraUniform;

/// Fixed perspective camera looking at a target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(position: Vec3, fov: f32) -> Self {
        Self {
            position,
            target: Vec3::ZERO,
            fov,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        }
    }

    pub fn look_at(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    pub fn with_aspect(mut self, width: f32, height: f32) -> Self {
        if height > 0.0 {
            self.aspect = width / height;
        }
        self
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).try_normalize().unwrap_or(Vec3::NEG_Z)
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn to_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: (self.projection_matrix() * self.view_matrix()).to_cols_array_2d(),
            position: self.position.to_array(),
            fov: self.fov,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_looks_at_origin() {
        let camera = Camera::new(Vec3::new(0.0, -0.5, 4.0), 45.0).look_at(Vec3::ZERO);
        let forward = camera.forward();
        assert!(forward.z < 0.0);
        assert!(forward.y > 0.0);
        assert!((forward.length() - 1.0).abs() < 1e-5);
        assert!(camera.up().y > 0.9);
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let camera = Camera::new(Vec3::new(0.0, -0.5, 4.0), 45.0).look_at(Vec3::ZERO);
        let uniform = camera.to_uniform();
        let clip = Mat4::from_cols_array_2d(&uniform.view_proj).project_point3(Vec3::ZERO);
        assert!(clip.x.abs() < 1e-5);
        assert!(clip.y.abs() < 1e-5);
    }
}
