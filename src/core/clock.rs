use std::time::Instant;

/// Longest delta handed to the scene; longer gaps (suspended tab, debugger) are clamped
pub const MAX_FRAME_DELTA: f32 = 0.25;

/// Wall-clock source of frame deltas for real-time runs
#[derive(Debug)]
pub struct Clock {
    last_tick: Instant,
    max_delta: f32,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            max_delta: MAX_FRAME_DELTA,
        }
    }

    /// Override the delta clamp
    pub fn with_max_delta(mut self, max_delta: f32) -> Self {
        self.max_delta = max_delta;
        self
    }

    /// Seconds since the previous tick, clamped to the maximum
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        delta.min(self.max_delta)
    }

    /// Forget the time spent since the last tick
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
