//! Route segment records.

use serde::{Deserialize, Serialize};

fn default_optimal_distance_km() -> f64 {
    1.0
}

fn default_travel_time_hours() -> f64 {
    1.0
}

fn default_avg_speed_kmh() -> f64 {
    3.0
}

/// One travel leg of a linear route.
///
/// Stored segments often omit fields; missing fields take the defaults of
/// [`RouteSegment::default`], except `length_km` which defaults to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    /// Segment length (km).
    #[serde(default)]
    pub length_km: f64,

    /// Optimal distance between consecutive groups (km).
    #[serde(default = "default_optimal_distance_km")]
    pub optimal_distance_km: f64,

    /// Time needed to travel the segment (hours).
    #[serde(default = "default_travel_time_hours")]
    pub travel_time_hours: f64,

    /// Average group speed on the segment (km/h).
    #[serde(default = "default_avg_speed_kmh")]
    pub avg_speed_kmh: f64,
}

impl RouteSegment {
    /// Create a segment of the given length with default spacing, time and speed.
    pub fn new(length_km: f64) -> Self {
        Self {
            length_km,
            ..Self::default()
        }
    }

    /// Set the optimal distance between groups.
    pub fn with_optimal_distance(mut self, km: f64) -> Self {
        self.optimal_distance_km = km;
        self
    }

    /// Set the travel time.
    pub fn with_travel_time(mut self, hours: f64) -> Self {
        self.travel_time_hours = hours;
        self
    }

    /// Set the average speed.
    pub fn with_speed(mut self, kmh: f64) -> Self {
        self.avg_speed_kmh = kmh;
        self
    }
}

impl Default for RouteSegment {
    fn default() -> Self {
        Self {
            length_km: 0.0,
            optimal_distance_km: default_optimal_distance_km(),
            travel_time_hours: default_travel_time_hours(),
            avg_speed_kmh: default_avg_speed_kmh(),
        }
    }
}
