use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, TAU};

use super::primitives::{cylinder, sphere};
use crate::math::hex_to_rgb;
use crate::types::{Material, Mesh, Model, Transform};

const ORB_PALETTE: [u32; 4] = [0x42aaff, 0x3388ff, 0x2266ee, 0x1144dd];

/// Name given to the fallback model so callers can tell it apart
pub const FALLBACK_MODEL_NAME: &str = "fallback-sphere";

/// Stand-in used whenever the real asset cannot be loaded.
/// A single translucent sphere, already prepared for scroll animation.
pub fn fallback_model() -> Model {
    let material = Material::new(hex_to_rgb(ORB_PALETTE[0]), 0.9, 0.3, 0.5);
    let mut model = Model::new(
        FALLBACK_MODEL_NAME,
        vec![Mesh::new(sphere(1.0, 32, 32), material).named("sphere")],
    );
    model.prepare_for_animation();
    model
}

/// Decorative orb: a core sphere ringed by eight tilted cylinders
pub fn procedural_orb() -> Model {
    let core = Mesh::new(
        sphere(1.0, 32, 32),
        Material::new(hex_to_rgb(ORB_PALETTE[0]), 0.9, 0.3, 0.5),
    )
    .named("core");

    let ring_radius = 1.5;
    let rods = (0..8).map(|i| {
        let angle = i as f32 / 8.0 * TAU;
        let position = Vec3::new(
            angle.cos() * ring_radius,
            angle.sin() * 0.3,
            angle.sin() * ring_radius,
        );
        Mesh::new(
            cylinder(0.2, 0.8, 16),
            Material::new(hex_to_rgb(ORB_PALETTE[i % ORB_PALETTE.len()]), 0.7, 0.2, 0.6),
        )
        .named(format!("rod-{}", i))
        .with_local(Transform::from_position(position).with_rotation(Vec3::new(FRAC_PI_2, 0.0, angle)))
    });

    let mut model = Model::new("procedural-orb", std::iter::once(core).chain(rods).collect());
    model.prepare_for_animation();
    model
}
