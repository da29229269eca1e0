use log::debug;

use crate::traits::LoadingConsumer;

/// Lifecycle of the page loading signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoadingState {
    Idle,
    /// Progress in percent, 0..=100
    Reporting(f32),
    /// Terminal
    Complete,
}

/// Listener registered on a [`LoadingSignal`]
pub type LoadingListener = Box<dyn FnMut(LoadingState)>;

/// Readiness signal consumed by a loading screen.
/// `Idle → Reporting(v)* → Complete`; completion is terminal and idempotent.
pub struct LoadingSignal {
    state: LoadingState,
    listeners: Vec<LoadingListener>,
}

impl LoadingSignal {
    pub fn new() -> Self {
        Self {
            state: LoadingState::Idle,
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> LoadingState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == LoadingState::Complete
    }

    pub fn subscribe(&mut self, listener: LoadingListener) {
        self.listeners.push(listener);
    }

    /// Route transitions into a [`LoadingConsumer`]
    pub fn subscribe_consumer<C: LoadingConsumer + 'static>(
        &mut self,
        consumer: std::rc::Rc<std::cell::RefCell<C>>,
    ) {
        self.subscribe(Box::new(move |state| consumer.borrow_mut().on_loading(state)));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Report progress in percent. Ignored once complete.
    pub fn report(&mut self, value: f32) {
        if self.is_complete() {
            return;
        }
        self.transition(LoadingState::Reporting(value.clamp(0.0, 100.0)));
    }

    /// Drive to the terminal state. Listeners hear about it exactly once.
    pub fn complete(&mut self) {
        if self.is_complete() {
            return;
        }
        self.transition(LoadingState::Complete);
    }

    /// Drop every listener; the state is kept
    pub fn clear(&mut self) {
        debug!("Clearing {} loading listener(s)", self.listeners.len());
        self.listeners.clear();
    }

    fn transition(&mut self, state: LoadingState) {
        self.state = state;
        for listener in self.listeners.iter_mut() {
            listener(state);
        }
    }
}

impl Default for LoadingSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Page-level loading screen: shown until the signal completes
#[derive(Debug, Clone, Default)]
pub struct LoadingScreen {
    percent: f32,
    completions: u32,
    history: Vec<LoadingState>,
}

impl LoadingScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.completions == 0
    }

    pub fn percent(&self) -> f32 {
        self.percent
    }

    /// How many times a completion was delivered (across mounts)
    pub fn completions(&self) -> u32 {
        self.completions
    }

    pub fn history(&self) -> &[LoadingState] {
        &self.history
    }
}

impl LoadingConsumer for LoadingScreen {
    fn on_loading(&mut self, state: LoadingState) {
        match state {
            LoadingState::Idle => {}
            LoadingState::Reporting(value) => self.percent = value,
            LoadingState::Complete => {
                self.percent = 100.0;
                self.completions += 1;
            }
        }
        self.history.push(state);
    }
}
