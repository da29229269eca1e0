pub mod binder;
pub mod boundary;
pub mod layout;
pub mod registry;
pub mod scrub;
pub mod trigger;

pub use binder::ScrollBinder;
pub use boundary::{Boundary, BoundaryParseError, Edge};
pub use layout::{PageLayout, SectionRect};
pub use registry::{global, SharedRegistry, TriggerRegistry};
pub use scrub::Scrub;
pub use trigger::{
    Direction, TriggerError, TriggerId, TriggerInfo, TriggerSpec, TriggerUpdate, UpdateCallback,
};
