use std::borrow::Borrow;
use std::fmt;
use thiserror::Error;

use super::boundary::{Boundary, BoundaryParseError};
use super::scrub::Scrub;

/// Identifier of a registered scroll trigger
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriggerId(String);

impl TriggerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TriggerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl Borrow<str> for TriggerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TriggerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything the engine needs to create a trigger
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerSpec {
    pub id: TriggerId,
    /// Selector of the section whose geometry defines the region
    pub target: String,
    pub start: Boundary,
    pub end: Boundary,
    pub scrub: Scrub,
}

impl TriggerSpec {
    pub fn new(id: impl Into<String>, target: impl Into<String>, start: Boundary, end: Boundary) -> Self {
        Self {
            id: TriggerId::new(id),
            target: target.into(),
            start,
            end,
            scrub: Scrub::Immediate,
        }
    }

    /// Build from boundary expressions such as `"top top"` / `"bottom top"`
    pub fn parse(
        id: impl Into<String>,
        target: impl Into<String>,
        start: &str,
        end: &str,
    ) -> Result<Self, BoundaryParseError> {
        Ok(Self::new(id, target, start.parse()?, end.parse()?))
    }

    pub fn with_scrub(mut self, scrub: Scrub) -> Self {
        self.scrub = scrub;
        self
    }
}

/// Scroll direction since the previous report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
    Still,
}

/// Payload passed to a trigger's update callback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerUpdate {
    /// Smoothed progress in [0, 1]
    pub progress: f32,
    pub direction: Direction,
    /// Whether the scroll position is currently inside the region
    pub active: bool,
}

/// Update callback. Runs while the engine is borrowed, so it must not call back into it.
pub type UpdateCallback = Box<dyn FnMut(&TriggerUpdate)>;

/// Read-only view of an active trigger
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerInfo {
    pub id: TriggerId,
    pub target: String,
    /// Resolved scroll offsets, `None` while the target is missing from the layout
    pub bounds: Option<(f32, f32)>,
    /// Unsmoothed scroll fraction
    pub raw_progress: f32,
    pub progress: f32,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TriggerError {
    #[error("scroll trigger target '{0}' is not in the page layout")]
    MissingTarget(String),

    #[error(transparent)]
    InvalidBoundary(#[from] BoundaryParseError),
}
