//! Per-object capacity calculation.
//!
//! Composes the formula library into the full layered result:
//! return factor, base, potential and permissible capacity.

use crate::domain::{CapacityInputs, CapacityResult, ObjectKind};
use crate::formula;

/// Compute all capacity metrics for one object.
///
/// Total over its domain: bad numbers degrade to zero instead of failing.
pub fn compute(inputs: &CapacityInputs) -> CapacityResult {
    let base_capacity = match inputs.object_kind {
        ObjectKind::Areal => formula::base_capacity_areal(inputs),
        ObjectKind::Linear => formula::base_capacity_linear(inputs),
        // Point objects carry no capacity formula.
        ObjectKind::Point => 0.0,
    };

    let return_factor = formula::return_factor(inputs.operating_hours, inputs.avg_visit_duration);
    let potential_capacity = formula::potential_capacity(base_capacity, &inputs.correction_factors);
    let permissible_capacity =
        formula::permissible_capacity(potential_capacity, inputs.management_factor);

    CapacityResult {
        return_factor,
        base_capacity,
        potential_capacity,
        permissible_capacity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RouteKind, RouteSegment};

    #[test]
    fn areal_object_full_chain() {
        let inputs = CapacityInputs::areal(1000.0)
            .with_operating_hours(8.0)
            .with_visit_duration(2.0)
            .with_correction_factors(vec![0.5, 0.5])
            .with_management_factor(0.8);

        let result = compute(&inputs);

        assert_eq!(result.return_factor, 4.0);
        assert_eq!(result.base_capacity, 12000.0);
        assert_eq!(result.potential_capacity, 3000.0);
        assert_eq!(result.permissible_capacity, 2400.0);
    }

    #[test]
    fn day_trip_object() {
        let inputs = CapacityInputs::linear(
            RouteKind::DayTrip,
            vec![RouteSegment::new(5.0)
                .with_optimal_distance(5.0)
                .with_travel_time(2.0)],
        )
        .with_operating_hours(8.0)
        .with_group_size(3.0)
        .with_period_days(30)
        .with_management_factor(1.0);

        let result = compute(&inputs);

        assert_eq!(result.base_capacity, 360.0);
        assert_eq!(result.potential_capacity, 360.0);
        assert_eq!(result.permissible_capacity, 360.0);
    }

    #[test]
    fn return_factor_independent_of_kind() {
        let linear = CapacityInputs::linear(RouteKind::DayTrip, Vec::new()).with_visit_duration(4.0);
        let result = compute(&linear);

        // No segments, so no capacity, but the turnover rate is still reported.
        assert_eq!(result.return_factor, 2.0);
        assert_eq!(result.base_capacity, 0.0);
    }

    #[test]
    fn point_object_has_no_capacity() {
        let inputs = CapacityInputs::new(ObjectKind::Point, RouteKind::Facility);
        let result = compute(&inputs);

        assert_eq!(result.base_capacity, 0.0);
        assert_eq!(result.permissible_capacity, 0.0);
        assert_eq!(result.return_factor, 4.0);
    }

    #[test]
    fn areal_ignores_route_kind() {
        let mut inputs = CapacityInputs::areal(500.0);
        let day_trip = compute(&inputs);
        inputs.route_kind = RouteKind::Autonomous;

        assert_eq!(compute(&inputs), day_trip);
    }
}
