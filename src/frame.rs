use crate::core::Clock;
use crate::traits::FrameSource;

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    pub time: f32,
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }
}

/// Infinite iterator that yields wall-clock frame information
/// Use this in a loop: `for frame in frames { ... }`
pub struct FrameIterator {
    frame_number: u64,
    time: f32,
    last_delta: f32,
    clock: Clock,
}

impl FrameIterator {
    pub fn new() -> Self {
        Self {
            frame_number: 0,
            time: 0.0,
            last_delta: 0.0,
            clock: Clock::new(),
        }
    }

    /// Scene time so far (sum of clamped deltas)
    pub fn time(&self) -> f32 {
        self.time
    }
}

impl Default for FrameIterator {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for FrameIterator {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        let delta = self.clock.tick();
        self.time += delta;

        let info = FrameInfo::new(self.frame_number, self.time, delta);

        self.frame_number += 1;
        self.last_delta = delta;

        Some(info)
    }
}

impl FrameSource for FrameIterator {
    fn delta_time(&self) -> f32 {
        self.last_delta
    }

    fn frame_count(&self) -> u64 {
        self.frame_number
    }
}

/// Deterministic frames at a fixed rate, for headless runs and tests
#[derive(Debug, Clone)]
pub struct FixedStepFrames {
    frame_number: u64,
    delta: f32,
    remaining: Option<u64>,
}

impl FixedStepFrames {
    /// Endless frames at `hz`
    pub fn new(hz: f32) -> Self {
        Self {
            frame_number: 0,
            delta: 1.0 / hz,
            remaining: None,
        }
    }

    /// Stop after `count` frames
    pub fn take_frames(mut self, count: u64) -> Self {
        self.remaining = Some(count);
        self
    }
}

impl Iterator for FixedStepFrames {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }

        self.frame_number += 1;
        Some(FrameInfo::new(
            self.frame_number - 1,
            self.frame_number as f32 * self.delta,
            self.delta,
        ))
    }
}

impl FrameSource for FixedStepFrames {
    fn delta_time(&self) -> f32 {
        self.delta
    }

    fn frame_count(&self) -> u64 {
        self.frame_number
    }
}
