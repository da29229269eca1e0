mod aabb;
mod color;
mod progress;

pub use aabb::AABB;
pub use color::hex_to_rgb;
pub use progress::{clamp_unit, inverse_lerp, wrap_angle};
