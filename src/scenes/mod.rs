mod placeholder;
mod primitives;
mod stage;

pub use placeholder::{fallback_model, procedural_orb, FALLBACK_MODEL_NAME};
pub use primitives::{cylinder, sphere};
pub use stage::{EnvironmentLoad, EnvironmentMap, Light, Stage};
