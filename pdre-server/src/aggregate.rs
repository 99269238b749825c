//! Area-wide aggregation.
//!
//! Runs the object calculator over every entry of one protected area and
//! sums the permissible capacities. This is a pure reduction: persisting
//! the results is left to the caller (see [`crate::job`]).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculator::compute;
use crate::domain::{AreaReport, CapacityInputs, ObjectId, ObjectResult};
use crate::formula::total_permissible;

/// One object to include in an area calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaEntry {
    pub id: ObjectId,
    pub name: String,
    pub inputs: CapacityInputs,
}

impl AreaEntry {
    /// Create a new entry.
    pub fn new(id: ObjectId, name: impl Into<String>, inputs: CapacityInputs) -> Self {
        Self {
            id,
            name: name.into(),
            inputs,
        }
    }
}

/// Compute every entry and total the permissible capacities.
///
/// Results are listed in input order. The total does not depend on the
/// order beyond floating-point rounding.
pub fn compute_area(entries: &[AreaEntry]) -> AreaReport {
    let objects: Vec<ObjectResult> = entries
        .iter()
        .map(|entry| {
            let result = compute(&entry.inputs);
            debug!(
                object_id = %entry.id,
                object = %entry.name,
                base = result.base_capacity,
                permissible = result.permissible_capacity,
                "computed object capacity"
            );
            ObjectResult {
                object_id: entry.id,
                object_name: entry.name.clone(),
                result,
            }
        })
        .collect();

    let total_permissible = total_permissible(
        objects
            .iter()
            .map(|o| o.result.permissible_capacity),
    );

    AreaReport {
        total_permissible,
        objects,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RouteKind, RouteSegment};

    fn meadow() -> AreaEntry {
        AreaEntry::new(
            ObjectId(1),
            "Meadow",
            CapacityInputs::areal(1000.0).with_management_factor(1.0),
        )
    }

    fn ridge_trail() -> AreaEntry {
        AreaEntry::new(
            ObjectId(2),
            "Ridge trail",
            CapacityInputs::linear(
                RouteKind::DayTrip,
                vec![RouteSegment::new(5.0)
                    .with_optimal_distance(5.0)
                    .with_travel_time(2.0)],
            )
            .with_management_factor(0.5),
        )
    }

    #[test]
    fn empty_area() {
        let report = compute_area(&[]);
        assert_eq!(report, AreaReport::default());
        assert_eq!(report.total_permissible, 0.0);
        assert!(report.objects.is_empty());
    }

    #[test]
    fn totals_objects_in_order() {
        let report = compute_area(&[meadow(), ridge_trail()]);

        assert_eq!(report.len(), 2);
        assert_eq!(report.objects[0].object_name, "Meadow");
        assert_eq!(report.objects[1].object_name, "Ridge trail");
        assert_eq!(report.objects[0].result.permissible_capacity, 12000.0);
        assert_eq!(report.objects[1].result.permissible_capacity, 180.0);
        assert_eq!(report.total_permissible, 12180.0);
    }

    #[test]
    fn matches_independent_computation() {
        let entries = [meadow(), ridge_trail()];
        let report = compute_area(&entries);

        for (entry, object) in entries.iter().zip(&report.objects) {
            assert_eq!(object.object_id, entry.id);
            assert_eq!(object.result, compute(&entry.inputs));
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{RouteKind, RouteSegment};
    use proptest::prelude::*;

    fn areal_strategy() -> impl Strategy<Value = CapacityInputs> {
        (0.0f64..1e5, 0.5f64..12.0).prop_map(|(area, duration)| {
            CapacityInputs::areal(area).with_visit_duration(duration)
        })
    }

    /// Travel times stay inside the default eight-hour window.
    fn linear_strategy() -> impl Strategy<Value = CapacityInputs> {
        let kind = prop_oneof![
            Just(RouteKind::DayTrip),
            Just(RouteKind::MultiDay),
            Just(RouteKind::Autonomous),
        ];
        let segment = (0.0f64..30.0, 0.1f64..5.0, 0.1f64..8.0).prop_map(|(len, dist, time)| {
            RouteSegment::new(len)
                .with_optimal_distance(dist)
                .with_travel_time(time)
        });
        (kind, prop::collection::vec(segment, 0..5), 1.0f64..15.0).prop_map(
            |(kind, segments, group)| CapacityInputs::linear(kind, segments).with_group_size(group),
        )
    }

    fn entry_strategy() -> impl Strategy<Value = AreaEntry> {
        (
            0u64..1000,
            prop_oneof![areal_strategy(), linear_strategy()],
            prop::collection::vec(0.0f64..=1.0, 0..3),
            0.0f64..=1.0,
        )
            .prop_map(|(id, inputs, factors, management)| {
                AreaEntry::new(
                    ObjectId(id),
                    format!("Object {id}"),
                    inputs
                        .with_correction_factors(factors)
                        .with_management_factor(management),
                )
            })
    }

    proptest! {
        #[test]
        fn total_equals_sum_of_objects(
            entries in prop::collection::vec(entry_strategy(), 0..12),
        ) {
            let report = compute_area(&entries);
            let expected: f64 = entries
                .iter()
                .map(|e| compute(&e.inputs).permissible_capacity)
                .sum();

            prop_assert_eq!(report.objects.len(), entries.len());
            prop_assert!((report.total_permissible - expected).abs() <= 1e-9 * expected.max(1.0));
        }

        #[test]
        fn total_is_order_independent(
            entries in prop::collection::vec(entry_strategy(), 0..12),
        ) {
            let mut reversed = entries.clone();
            reversed.reverse();

            let forward = compute_area(&entries).total_permissible;
            let backward = compute_area(&reversed).total_permissible;
            prop_assert!((forward - backward).abs() <= 1e-9 * forward.max(1.0));
        }
    }
}
