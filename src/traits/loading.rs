use crate::loading::LoadingState;

/// Receiver of loading-signal transitions, e.g. a loading screen
pub trait LoadingConsumer {
    /// Called for each accepted transition of the signal
    fn on_loading(&mut self, state: LoadingState);
}
