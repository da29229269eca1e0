use crate::math::clamp_unit;

/// Below this distance a smoothed value snaps onto its target
const SNAP_EPSILON: f32 = 1e-4;

/// Temporal smoothing applied between the raw scroll fraction and the
/// progress reported to callbacks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scrub {
    /// Progress follows scroll exactly
    Immediate,
    /// Progress approaches scroll exponentially with this time constant (seconds)
    Smoothed(f32),
}

impl Scrub {
    /// `0` or negative means no smoothing
    pub fn from_seconds(seconds: f32) -> Self {
        if seconds > 0.0 {
            Scrub::Smoothed(seconds)
        } else {
            Scrub::Immediate
        }
    }

    /// Advance `current` toward `target` over `delta` seconds
    pub fn step(&self, current: f32, target: f32, delta: f32) -> f32 {
        let next = match *self {
            Scrub::Immediate => target,
            Scrub::Smoothed(tau) => {
                let blend = 1.0 - (-delta.max(0.0) / tau).exp();
                current + (target - current) * blend
            }
        };

        if (target - next).abs() < SNAP_EPSILON {
            target
        } else {
            clamp_unit(next)
        }
    }
}

impl Default for Scrub {
    fn default() -> Self {
        Scrub::Smoothed(1.0)
    }
}
