//! Per-object capacity parameters.

use serde::{Deserialize, Serialize};

use super::{ObjectKind, RouteKind, RouteSegment};

/// Default space each visitor needs (square metres).
pub const DEFAULT_AREA_PER_VISITOR: f64 = 10.0;

/// Default hours per day an object is accessible.
pub const DEFAULT_OPERATING_HOURS: f64 = 8.0;

/// Default visit length (hours).
pub const DEFAULT_AVG_VISIT_DURATION: f64 = 2.0;

/// Default number of people per group.
pub const DEFAULT_AVG_GROUP_SIZE: f64 = 3.0;

/// Default reporting period (days).
pub const DEFAULT_PERIOD_DAYS: u32 = 30;

/// Default share of potential capacity that management can sustain.
pub const DEFAULT_MANAGEMENT_FACTOR: f64 = 0.8;

/// Parameter set for one capacity calculation.
///
/// Built fresh from an object record for every calculation and never
/// mutated afterwards. Numeric fields are not validated: degenerate values
/// (zero divisors, negative lengths) make the affected formula return zero
/// rather than fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityInputs {
    /// Which formula family applies.
    pub object_kind: ObjectKind,

    /// Movement model. Only consulted for linear objects.
    pub route_kind: RouteKind,

    /// Usable area (square metres). Areal objects only.
    #[serde(default)]
    pub area_sq_m: Option<f64>,

    /// Space required per visitor (square metres).
    #[serde(default = "default_area_per_visitor")]
    pub area_per_visitor: f64,

    /// Hours per day the object is accessible.
    #[serde(default = "default_operating_hours")]
    pub operating_hours: f64,

    /// Average visit duration (hours).
    #[serde(default = "default_avg_visit_duration")]
    pub avg_visit_duration: f64,

    /// Persons per group. Linear objects only.
    #[serde(default = "default_avg_group_size")]
    pub avg_group_size: f64,

    /// Length of the reporting period (days).
    #[serde(default = "default_period_days")]
    pub period_days: u32,

    /// Ordered route legs. Empty for areal objects.
    #[serde(default)]
    pub route_segments: Vec<RouteSegment>,

    /// Independent degrading conditions, each in (0, 1].
    #[serde(default)]
    pub correction_factors: Vec<f64>,

    /// Management sufficiency, in [0, 1].
    #[serde(default = "default_management_factor")]
    pub management_factor: f64,
}

pub(crate) fn default_area_per_visitor() -> f64 {
    DEFAULT_AREA_PER_VISITOR
}

pub(crate) fn default_operating_hours() -> f64 {
    DEFAULT_OPERATING_HOURS
}

pub(crate) fn default_avg_visit_duration() -> f64 {
    DEFAULT_AVG_VISIT_DURATION
}

pub(crate) fn default_avg_group_size() -> f64 {
    DEFAULT_AVG_GROUP_SIZE
}

fn default_period_days() -> u32 {
    DEFAULT_PERIOD_DAYS
}

pub(crate) fn default_management_factor() -> f64 {
    DEFAULT_MANAGEMENT_FACTOR
}

impl CapacityInputs {
    /// Create inputs of the given kinds with every other field at its default.
    pub fn new(object_kind: ObjectKind, route_kind: RouteKind) -> Self {
        Self {
            object_kind,
            route_kind,
            area_sq_m: None,
            area_per_visitor: DEFAULT_AREA_PER_VISITOR,
            operating_hours: DEFAULT_OPERATING_HOURS,
            avg_visit_duration: DEFAULT_AVG_VISIT_DURATION,
            avg_group_size: DEFAULT_AVG_GROUP_SIZE,
            period_days: DEFAULT_PERIOD_DAYS,
            route_segments: Vec::new(),
            correction_factors: Vec::new(),
            management_factor: DEFAULT_MANAGEMENT_FACTOR,
        }
    }

    /// Inputs for an areal object covering `area_sq_m` square metres.
    pub fn areal(area_sq_m: f64) -> Self {
        let mut inputs = Self::new(ObjectKind::Areal, RouteKind::DayTrip);
        inputs.area_sq_m = Some(area_sq_m);
        inputs
    }

    /// Inputs for a linear route made of `segments`.
    pub fn linear(route_kind: RouteKind, segments: Vec<RouteSegment>) -> Self {
        let mut inputs = Self::new(ObjectKind::Linear, route_kind);
        inputs.route_segments = segments;
        inputs
    }

    pub fn with_area_per_visitor(mut self, sq_m: f64) -> Self {
        self.area_per_visitor = sq_m;
        self
    }

    pub fn with_operating_hours(mut self, hours: f64) -> Self {
        self.operating_hours = hours;
        self
    }

    pub fn with_visit_duration(mut self, hours: f64) -> Self {
        self.avg_visit_duration = hours;
        self
    }

    pub fn with_group_size(mut self, persons: f64) -> Self {
        self.avg_group_size = persons;
        self
    }

    pub fn with_period_days(mut self, days: u32) -> Self {
        self.period_days = days;
        self
    }

    pub fn with_correction_factors(mut self, factors: Vec<f64>) -> Self {
        self.correction_factors = factors;
        self
    }

    pub fn with_management_factor(mut self, factor: f64) -> Self {
        self.management_factor = factor;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let inputs = CapacityInputs::new(ObjectKind::Linear, RouteKind::MultiDay);

        assert_eq!(inputs.area_sq_m, None);
        assert_eq!(inputs.area_per_visitor, 10.0);
        assert_eq!(inputs.operating_hours, 8.0);
        assert_eq!(inputs.avg_visit_duration, 2.0);
        assert_eq!(inputs.avg_group_size, 3.0);
        assert_eq!(inputs.period_days, 30);
        assert!(inputs.route_segments.is_empty());
        assert!(inputs.correction_factors.is_empty());
        assert_eq!(inputs.management_factor, 0.8);
    }

    #[test]
    fn areal_constructor() {
        let inputs = CapacityInputs::areal(1000.0).with_operating_hours(10.0);

        assert_eq!(inputs.object_kind, ObjectKind::Areal);
        assert_eq!(inputs.area_sq_m, Some(1000.0));
        assert_eq!(inputs.operating_hours, 10.0);
    }

    #[test]
    fn deserialize_minimal_json_uses_defaults() {
        let json = r#"{
            "object_kind": "linear",
            "route_kind": "autonomous",
            "route_segments": [{"length_km": 3.0}]
        }"#;
        let inputs: CapacityInputs = serde_json::from_str(json).unwrap();

        assert_eq!(inputs.object_kind, ObjectKind::Linear);
        assert_eq!(inputs.route_kind, RouteKind::Autonomous);
        assert_eq!(inputs.route_segments.len(), 1);
        assert_eq!(inputs.period_days, 30);
        assert_eq!(inputs.management_factor, 0.8);
    }
}
