//! Base capacity of linear routes.
//!
//! Three movement models, one per [`RouteKind`]:
//!
//! | Kind         | Per segment                       | Combined            | Scale                                  |
//! |--------------|-----------------------------------|---------------------|----------------------------------------|
//! | `DayTrip`    | `(len / dist) * (hours / time)`   | sum                 | `group * period_days / days_on_route`  |
//! | `MultiDay`   | `gp` (max groups per day)         | sum                 | `group * period_days / days_on_route`  |
//! | `Autonomous` | `gp`                              | min (bottleneck)    | `group * period_days`                  |
//!
//! `days_on_route` is the segment count, at least one.

use crate::domain::{CapacityInputs, RouteKind, RouteSegment};

/// Base capacity of a linear object, dispatched on its route kind.
///
/// Facility objects are not routes and have no linear capacity.
pub fn base_capacity_linear(inputs: &CapacityInputs) -> f64 {
    let segments = &inputs.route_segments;
    let hours = inputs.operating_hours;
    let group = inputs.avg_group_size;
    let days = inputs.period_days;

    match inputs.route_kind {
        RouteKind::DayTrip => day_trip_capacity(segments, hours, group, days),
        RouteKind::MultiDay => multi_day_capacity(segments, hours, group, days),
        RouteKind::Autonomous => autonomous_capacity(segments, hours, group, days),
        RouteKind::Facility => 0.0,
    }
}

/// Maximum number of groups per day on one segment (`gp`).
///
/// `1 + avg_speed_kmh * (operating_hours - travel_time_hours) / optimal_distance_km`,
/// or zero when the optimal distance or the travel time is not positive.
/// The result is not clamped: a segment that takes longer than the
/// operating window yields fewer than one group.
pub fn max_groups_per_day(segment: &RouteSegment, operating_hours: f64) -> f64 {
    if segment.optimal_distance_km <= 0.0 || segment.travel_time_hours <= 0.0 {
        return 0.0;
    }
    1.0 + (segment.avg_speed_kmh * (operating_hours - segment.travel_time_hours))
        / segment.optimal_distance_km
}

/// Route with an unrestricted departure window.
///
/// Segments with a non-positive optimal distance or travel time contribute
/// nothing but still count towards `days_on_route`.
pub fn day_trip_capacity(
    segments: &[RouteSegment],
    operating_hours: f64,
    avg_group_size: f64,
    period_days: u32,
) -> f64 {
    if segments.is_empty() {
        return 0.0;
    }

    let total: f64 = segments
        .iter()
        .filter(|s| s.optimal_distance_km > 0.0 && s.travel_time_hours > 0.0)
        .map(|s| (s.length_km / s.optimal_distance_km) * (operating_hours / s.travel_time_hours))
        .sum();

    total * avg_group_size * (f64::from(period_days) / days_on_route(segments))
}

/// Route with fixed departure slots.
pub fn multi_day_capacity(
    segments: &[RouteSegment],
    operating_hours: f64,
    avg_group_size: f64,
    period_days: u32,
) -> f64 {
    if segments.is_empty() {
        return 0.0;
    }

    let total_groups: f64 = segments
        .iter()
        .map(|s| max_groups_per_day(s, operating_hours))
        .sum();

    total_groups * avg_group_size * (f64::from(period_days) / days_on_route(segments))
}

/// Single itinerary traversed segment by segment by the same groups.
///
/// The slowest segment caps the whole route, and the period is not divided
/// by the segment count.
// NOTE: the missing division by days_on_route differs from the other two
// route kinds. Kept as-is until the methodology owners confirm it.
pub fn autonomous_capacity(
    segments: &[RouteSegment],
    operating_hours: f64,
    avg_group_size: f64,
    period_days: u32,
) -> f64 {
    let bottleneck = segments
        .iter()
        .map(|s| max_groups_per_day(s, operating_hours))
        .fold(None, |min: Option<f64>, gp| {
            Some(min.map_or(gp, |m| m.min(gp)))
        });

    match bottleneck {
        Some(groups) => groups * avg_group_size * f64::from(period_days),
        None => 0.0,
    }
}

fn days_on_route(segments: &[RouteSegment]) -> f64 {
    segments.len().max(1) as f64
}
