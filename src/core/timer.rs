//! Delta-driven timers. Each owns its state and is advanced with the frame
//! delta, so it behaves the same under simulated and wall-clock frames.

/// Fires at most once per interval; the very first call always fires
#[derive(Debug, Clone, Copy)]
pub struct Throttled {
    interval: f32,
    since_fire: f32,
}

impl Throttled {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            since_fire: interval,
        }
    }

    pub fn try_tick(&mut self, delta: f32) -> bool {
        self.since_fire += delta;
        let ready = self.since_fire >= self.interval;
        if ready {
            self.since_fire = 0.0;
        }
        ready
    }
}

/// One-shot deadline measured in accumulated frame time
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    duration: f32,
    /// `None` while stopped
    remaining: Option<f32>,
}

impl Countdown {
    /// A stopped countdown
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            remaining: None,
        }
    }

    pub fn started(duration: f32) -> Self {
        Self {
            duration,
            remaining: Some(duration),
        }
    }

    /// (Re)start from the full duration
    pub fn start(&mut self) {
        self.remaining = Some(self.duration);
    }

    /// Stop without firing
    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_active(&self) -> bool {
        self.remaining.is_some()
    }

    /// True on the tick that reaches the deadline, false before and after
    pub fn tick(&mut self, delta: f32) -> bool {
        let Some(remaining) = self.remaining.as_mut() else {
            return false;
        };

        *remaining -= delta;
        if *remaining > 0.0 {
            return false;
        }
        self.remaining = None;
        true
    }

    /// Fraction of the duration used up; 0 while stopped
    pub fn progress(&self) -> f32 {
        match self.remaining {
            None => 0.0,
            Some(_) if self.duration <= 0.0 => 1.0,
            Some(remaining) => (1.0 - remaining / self.duration).clamp(0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throttled_first_call_fires() {
        let mut status = Throttled::new(1.0);
        assert!(status.try_tick(0.0));
        assert!(!status.try_tick(0.5));
        assert!(status.try_tick(0.5));
    }

    #[test]
    fn throttled_counts_frame_deltas() {
        let mut status = Throttled::new(1.0);
        status.try_tick(0.0);
        let fired = (0..120).filter(|_| status.try_tick(1.0 / 60.0)).count();
        assert_eq!(fired, 2);
    }

    #[test]
    fn countdown_fires_once_at_deadline() {
        let mut timeout = Countdown::new(1.0);
        assert!(!timeout.tick(2.0), "stopped countdowns never fire");

        timeout.start();
        assert!(!timeout.tick(0.5));
        assert_eq!(timeout.progress(), 0.5);

        assert!(timeout.tick(0.6));
        assert!(!timeout.is_active());
        assert!(!timeout.tick(0.1));
    }

    #[test]
    fn cancelled_countdown_never_fires() {
        let mut timeout = Countdown::started(0.1);
        timeout.cancel();
        assert!(!timeout.is_active());
        assert!(!timeout.tick(1.0));
    }

    #[test]
    fn infinite_countdown_never_fires() {
        let mut timeout = Countdown::started(f32::INFINITY);
        assert!(!timeout.tick(1.0e6));
        assert!(timeout.is_active());
    }

    #[test]
    fn zero_duration_fires_on_first_tick() {
        let mut timeout = Countdown::started(0.0);
        assert_eq!(timeout.progress(), 1.0);
        assert!(timeout.tick(0.0));
    }
}
