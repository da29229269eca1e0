use crate::frame::FrameInfo;

/// Per-frame callback registered with the host render loop
pub type FrameCallback = Box<dyn FnMut(&FrameInfo)>;

/// Handle returned by [`FrameLoop::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameSubscription(u64);

/// Host render loop: invokes every subscribed callback once per frame, in
/// subscription order. Callbacks must not block.
#[derive(Default)]
pub struct FrameLoop {
    next_id: u64,
    callbacks: Vec<(FrameSubscription, FrameCallback)>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: FrameCallback) -> FrameSubscription {
        let subscription = FrameSubscription(self.next_id);
        self.next_id += 1;
        self.callbacks.push((subscription, callback));
        subscription
    }

    /// Remove a callback. Once this returns it will never run again.
    pub fn unsubscribe(&mut self, subscription: FrameSubscription) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(id, _)| *id != subscription);
        self.callbacks.len() != before
    }

    pub fn tick(&mut self, frame: &FrameInfo) {
        for (_, callback) in self.callbacks.iter_mut() {
            callback(frame);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}
