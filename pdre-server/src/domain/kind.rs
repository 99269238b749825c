//! Object and route kind tags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown object kind tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid object kind: {tag:?}")]
pub struct InvalidObjectKind {
    tag: String,
}

/// Error returned when parsing an unknown route kind tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid route kind: {tag:?}")]
pub struct InvalidRouteKind {
    tag: String,
}

/// Geometric kind of a tourism object.
///
/// Only areal and linear objects have a capacity formula. Point objects
/// (viewpoints, camp sites) are stored alongside them but always have a
/// base capacity of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Areal,
    Linear,
    Point,
}

impl ObjectKind {
    /// Parse a kind from its stored tag (`"areal"`, `"linear"`, `"point"`).
    pub fn parse(s: &str) -> Result<Self, InvalidObjectKind> {
        match s {
            "areal" => Ok(ObjectKind::Areal),
            "linear" => Ok(ObjectKind::Linear),
            "point" => Ok(ObjectKind::Point),
            _ => Err(InvalidObjectKind { tag: s.to_string() }),
        }
    }

    /// Returns the stored tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Areal => "areal",
            ObjectKind::Linear => "linear",
            ObjectKind::Point => "point",
        }
    }
}

/// How visitors move along a linear route.
///
/// Each variant encodes a different queueing assumption:
/// - `DayTrip`: travellers enter continuously during the operating window.
/// - `MultiDay`: groups depart in fixed slots.
/// - `Autonomous`: the same groups traverse every segment in order, so the
///   slowest segment caps the route.
///
/// `Facility` marks infrastructure objects that are not routes at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    DayTrip,
    MultiDay,
    Autonomous,
    Facility,
}

impl RouteKind {
    /// Parse a route kind from its stored tag.
    pub fn parse(s: &str) -> Result<Self, InvalidRouteKind> {
        match s {
            "day_trip" => Ok(RouteKind::DayTrip),
            "multi_day" => Ok(RouteKind::MultiDay),
            "autonomous" => Ok(RouteKind::Autonomous),
            "facility" => Ok(RouteKind::Facility),
            _ => Err(InvalidRouteKind { tag: s.to_string() }),
        }
    }

    /// Returns the stored tag for this route kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteKind::DayTrip => "day_trip",
            RouteKind::MultiDay => "multi_day",
            RouteKind::Autonomous => "autonomous",
            RouteKind::Facility => "facility",
        }
    }
}

impl FromStr for ObjectKind {
    type Err = InvalidObjectKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl FromStr for RouteKind {
    type Err = InvalidRouteKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
