//! Calculation outputs.

use serde::{Deserialize, Serialize};

use super::ObjectId;

/// The four layered capacity metrics for one object.
///
/// For correction and management factors in [0, 1] the three capacities
/// never increase from one stage to the next.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CapacityResult {
    /// Daily turnover multiplier.
    pub return_factor: f64,
    /// Theoretical visitor turnover from physical and time constraints.
    pub base_capacity: f64,
    /// Base capacity after correction factors.
    pub potential_capacity: f64,
    /// Potential capacity after the management factor.
    pub permissible_capacity: f64,
}

/// A computed result tagged with the object it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectResult {
    pub object_id: ObjectId,
    pub object_name: String,
    #[serde(flatten)]
    pub result: CapacityResult,
}

/// Area-wide aggregation of object results.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AreaReport {
    /// Sum of every object's permissible capacity.
    pub total_permissible: f64,
    /// Per-object results in input order.
    pub objects: Vec<ObjectResult>,
}

impl AreaReport {
    /// Returns the number of objects in the report.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if the report covers no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
