use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::layout::SectionRect;

/// A point along an element or the viewport, measured from its top
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
    /// Percentage of the extent, `50%` == `Center`
    Percent(f32),
    /// Absolute pixel offset from the top
    Pixels(f32),
}

impl Edge {
    /// Offset from the top for something `extent` pixels tall
    pub fn offset(&self, extent: f32) -> f32 {
        match *self {
            Edge::Top => 0.0,
            Edge::Center => extent * 0.5,
            Edge::Bottom => extent,
            Edge::Percent(pct) => extent * pct / 100.0,
            Edge::Pixels(px) => px,
        }
    }
}

impl FromStr for Edge {
    type Err = BoundaryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Edge::Top),
            "center" => Ok(Edge::Center),
            "bottom" => Ok(Edge::Bottom),
            _ => {
                let number = |digits: &str| {
                    digits
                        .parse::<f32>()
                        .map_err(|_| BoundaryParseError::UnknownEdge(s.to_string()))
                };
                if let Some(pct) = s.strip_suffix('%') {
                    number(pct).map(Edge::Percent)
                } else if let Some(px) = s.strip_suffix("px") {
                    number(px).map(Edge::Pixels)
                } else {
                    number(s).map(Edge::Pixels)
                }
            }
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Top => write!(f, "top"),
            Edge::Center => write!(f, "center"),
            Edge::Bottom => write!(f, "bottom"),
            Edge::Percent(pct) => write!(f, "{}%", pct),
            Edge::Pixels(px) => write!(f, "{}px", px),
        }
    }
}

/// Start or end condition of a scroll region.
///
/// `"top top"` reads "when the top of the element reaches the top of the
/// viewport"; `"+=400"` means 400px after the start boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Boundary {
    Anchor { element: Edge, viewport: Edge },
    Relative(f32),
}

impl Boundary {
    pub const fn anchor(element: Edge, viewport: Edge) -> Self {
        Boundary::Anchor { element, viewport }
    }

    /// Scroll offset at which this boundary is met.
    /// `origin` is the already-resolved start for relative end boundaries.
    pub fn resolve(&self, section: &SectionRect, viewport_height: f32, origin: f32) -> f32 {
        match *self {
            Boundary::Anchor { element, viewport } => {
                section.top + element.offset(section.height) - viewport.offset(viewport_height)
            }
            Boundary::Relative(distance) => origin + distance,
        }
    }
}

impl FromStr for Boundary {
    type Err = BoundaryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(BoundaryParseError::Empty);
        }

        if let Some(distance) = s.strip_prefix("+=") {
            return distance
                .trim()
                .trim_end_matches("px")
                .parse::<f32>()
                .map(Boundary::Relative)
                .map_err(|_| BoundaryParseError::InvalidDistance(distance.to_string()));
        }

        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(element), Some(viewport), None) => Ok(Boundary::Anchor {
                element: element.parse()?,
                viewport: viewport.parse()?,
            }),
            _ => Err(BoundaryParseError::ExpectedTwoEdges(s.to_string())),
        }
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Boundary::Anchor { element, viewport } => write!(f, "{} {}", element, viewport),
            Boundary::Relative(distance) => write!(f, "+={}", distance),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoundaryParseError {
    #[error("empty boundary expression")]
    Empty,

    #[error("unknown edge '{0}' (expected top, center, bottom, N% or Npx)")]
    UnknownEdge(String),

    #[error("expected '<element-edge> <viewport-edge>', got '{0}'")]
    ExpectedTwoEdges(String),

    #[error("invalid relative distance '{0}'")]
    InvalidDistance(String),
}
