use glam::{EulerRot, Mat4, Quat, Vec3};
use std::cell::RefCell;
use std::rc::Rc;

use crate::math::AABB;

/// Camera uniform buffer data for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 3],
    pub fov: f32,
}

/// Vertex layout shared by loaded and procedural geometry
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }
}

/// Triangle geometry for a single mesh primitive
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Geometry {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn bounds(&self) -> Option<AABB> {
        AABB::from_points(self.vertices.iter().map(|v| Vec3::from_array(v.position)))
    }

    /// Vertex bytes as they would be uploaded to a vertex buffer
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Surface material. Opacity is animated in place, never swapped.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub color: [f32; 3],
    pub opacity: f32,
    pub metalness: f32,
    pub roughness: f32,
    pub transparent: bool,
    /// Derived from opacity; invisible meshes are skipped by the renderer
    pub visible: bool,
    /// Set when the GPU copy must be re-uploaded
    pub needs_update: bool,
}

impl Material {
    pub fn new(color: [f32; 3], opacity: f32, metalness: f32, roughness: f32) -> Self {
        Self {
            color,
            opacity,
            metalness,
            roughness,
            transparent: opacity < 1.0,
            visible: opacity > 0.0,
            needs_update: false,
        }
    }

    /// Mark translucent-capable so opacity can be animated smoothly
    pub fn make_animatable(&mut self) {
        self.transparent = true;
        self.needs_update = true;
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
        self.visible = opacity > 0.0;
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new([0.7, 0.7, 0.7], 1.0, 0.0, 1.0)
    }
}

/// Position, Euler rotation (XYZ, radians) and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }

    /// Decompose a node matrix into a transform
    pub fn from_matrix(matrix: &Mat4) -> Self {
        let (scale, rotation, position) = matrix.to_scale_rotation_translation();
        let (x, y, z) = rotation.to_euler(EulerRot::XYZ);
        Self {
            position,
            rotation: Vec3::new(x, y, z),
            scale,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One renderable primitive of a model
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: Option<String>,
    pub geometry: Geometry,
    pub material: Material,
    pub local: Transform,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Mesh {
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self {
            name: None,
            geometry,
            material,
            local: Transform::IDENTITY,
            cast_shadow: false,
            receive_shadow: false,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_local(mut self, local: Transform) -> Self {
        self.local = local;
        self
    }
}

/// A group of mesh primitives under one root transform
#[derive(Debug, Clone)]
pub struct Model {
    pub name: String,
    pub meshes: Vec<Mesh>,
    pub root: Transform,
    disposed: bool,
}

/// The model as owned by a mounted controller. Callbacks only ever hold `Weak`s.
pub type SharedModel = Rc<RefCell<Model>>;

impl Model {
    pub fn new(name: impl Into<String>, meshes: Vec<Mesh>) -> Self {
        Self {
            name: name.into(),
            meshes,
            root: Transform::IDENTITY,
            disposed: false,
        }
    }

    pub fn into_shared(self) -> SharedModel {
        Rc::new(RefCell::new(self))
    }

    /// Prepare a freshly loaded model for scroll animation
    pub fn prepare_for_animation(&mut self) {
        for mesh in &mut self.meshes {
            mesh.cast_shadow = true;
            mesh.receive_shadow = true;
            mesh.material.make_animatable();
        }
    }

    pub fn yaw(&self) -> f32 {
        self.root.rotation.y
    }

    pub fn visible_mesh_count(&self) -> usize {
        self.meshes.iter().filter(|m| m.material.visible).count()
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|m| m.geometry.triangle_count()).sum()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Bounds of all meshes in model space (local transforms applied)
    pub fn bounds(&self) -> Option<AABB> {
        self.meshes
            .iter()
            .filter_map(|mesh| {
                let matrix = mesh.local.matrix();
                AABB::from_points(
                    mesh.geometry
                        .vertices
                        .iter()
                        .map(|v| matrix.transform_point3(Vec3::from_array(v.position))),
                )
            })
            .reduce(|a, b| a.union(&b))
    }

    /// Release geometry. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        log::debug!("Disposing model '{}' ({} meshes)", self.name, self.meshes.len());
        for mesh in &mut self.meshes {
            mesh.geometry = Geometry::default();
        }
        self.disposed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Geometry {
        Geometry::new(
            vec![
                Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
                Vertex::new([1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
                Vertex::new([0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
            ],
            vec![0, 1, 2],
        )
    }

    #[test]
    fn prepare_marks_meshes_for_animation() {
        let mut model = Model::new("tri", vec![Mesh::new(triangle(), Material::default())]);
        model.prepare_for_animation();

        let mesh = &model.meshes[0];
        assert!(mesh.cast_shadow && mesh.receive_shadow);
        assert!(mesh.material.transparent);
        assert!(mesh.material.needs_update);
    }

    #[test]
    fn opacity_drives_visibility() {
        let mut material = Material::default();
        material.set_opacity(0.0);
        assert!(!material.visible);
        material.set_opacity(0.01);
        assert!(material.visible);
    }

    #[test]
    fn dispose_releases_geometry_once() {
        let mut model = Model::new("tri", vec![Mesh::new(triangle(), Material::default())]);
        assert_eq!(model.triangle_count(), 1);

        model.dispose();
        assert!(model.is_disposed());
        assert_eq!(model.triangle_count(), 0);

        model.dispose();
        assert!(model.is_disposed());
    }

    #[test]
    fn transform_matrix_round_trips() {
        let transform = Transform::from_position(Vec3::new(1.0, -2.5, 0.0))
            .with_rotation(Vec3::new(0.0, std::f32::consts::FRAC_PI_4, 0.0))
            .with_scale(Vec3::splat(1.5));

        let back = Transform::from_matrix(&transform.matrix());
        assert!(back.position.abs_diff_eq(transform.position, 1e-5));
        assert!(back.rotation.abs_diff_eq(transform.rotation, 1e-5));
        assert!(back.scale.abs_diff_eq(transform.scale, 1e-5));
    }

    #[test]
    fn model_bounds_apply_local_transform() {
        let mesh = Mesh::new(triangle(), Material::default())
            .with_local(Transform::from_position(Vec3::new(10.0, 0.0, 0.0)));
        let model = Model::new("tri", vec![mesh]);

        let bounds = model.bounds().unwrap();
        assert_eq!(bounds.min, Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(11.0, 1.0, 0.0));
    }
}
