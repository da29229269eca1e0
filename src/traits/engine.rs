use crate::scroll::{TriggerError, TriggerId, TriggerInfo, TriggerSpec, UpdateCallback};

/// Host scroll-trigger engine: a table of named, boundary-defined scroll observers
pub trait ScrollTriggerEngine {
    /// Register an observer. An existing observer with the same id is killed first.
    fn create(&mut self, spec: TriggerSpec, on_update: UpdateCallback) -> Result<TriggerId, TriggerError>;

    /// Snapshot of an active observer
    fn get_by_id(&self, id: &str) -> Option<TriggerInfo>;

    /// Unregister an observer; returns false if it was not active
    fn kill(&mut self, id: &str) -> bool;

    /// Ids of every active observer
    fn active_ids(&self) -> Vec<TriggerId>;

    /// Recompute all boundary geometry from the current layout
    fn refresh(&mut self);
}
