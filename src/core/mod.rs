pub mod clock;
pub mod frame_loop;
pub mod timer;

pub use clock::Clock;
pub use frame_loop::{FrameCallback, FrameLoop, FrameSubscription};
pub use timer::{Countdown, Throttled};
