//! Stored record types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::{
    self, AreaId, AreaReport, CalculationPeriod, CapacityInputs, CapacityResult, ObjectId,
    ObjectKind, RouteKind, RouteSegment,
};

/// Parameter-bag key holding a linear object's route segments.
///
/// Every other numeric entry in the bag is a correction factor.
pub const ROUTE_SEGMENTS_KEY: &str = "route_segments";

/// A protected natural area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtectedArea {
    pub id: AreaId,
    pub name: String,

    /// Administrative level (federal, regional, local).
    #[serde(default)]
    pub area_type: String,

    /// Territory size in hectares, as derived by the geometry layer.
    #[serde(default)]
    pub area_ha: f64,

    /// Last stored area-wide permissible capacity.
    #[serde(default)]
    pub pdre_value: Option<f64>,

    /// Label of the method that produced `pdre_value`.
    #[serde(default)]
    pub calculation_method: Option<String>,

    #[serde(default)]
    pub calculated_at: Option<DateTime<Utc>>,
}

impl ProtectedArea {
    /// Create an area with no stored calculation.
    pub fn new(id: AreaId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            area_type: String::new(),
            area_ha: 0.0,
            pdre_value: None,
            calculation_method: None,
            calculated_at: None,
        }
    }
}

fn default_true() -> bool {
    true
}

/// A tourism object (site, trail or point) inside a protected area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourismObject {
    pub id: ObjectId,
    pub area_id: AreaId,
    pub name: String,
    pub object_kind: ObjectKind,
    pub route_kind: RouteKind,

    #[serde(default)]
    pub area_sq_m: Option<f64>,

    /// Route length (km). Informational; linear capacity uses the segments.
    #[serde(default)]
    pub length_km: Option<f64>,

    #[serde(default = "domain::default_area_per_visitor")]
    pub area_per_visitor: f64,
    #[serde(default = "domain::default_operating_hours")]
    pub operating_hours: f64,
    #[serde(default = "domain::default_avg_visit_duration")]
    pub avg_visit_duration: f64,
    #[serde(default = "domain::default_avg_group_size")]
    pub avg_group_size: f64,
    #[serde(default = "domain::default_management_factor")]
    pub management_factor: f64,

    #[serde(default = "default_true")]
    pub is_active: bool,

    /// Named correction factors (`cf1`, `cf2`, ...) and, for linear
    /// objects, the `route_segments` array.
    #[serde(default)]
    pub parameters: Map<String, Value>,

    /// Result of the last calculation, if any.
    #[serde(default)]
    pub capacity: Option<CapacityResult>,
}

impl TourismObject {
    /// Create an object whose numeric fields take the engine defaults.
    pub fn new(
        id: ObjectId,
        area_id: AreaId,
        name: impl Into<String>,
        object_kind: ObjectKind,
        route_kind: RouteKind,
    ) -> Self {
        let defaults = CapacityInputs::new(object_kind, route_kind);
        Self {
            id,
            area_id,
            name: name.into(),
            object_kind,
            route_kind,
            area_sq_m: None,
            length_km: None,
            area_per_visitor: defaults.area_per_visitor,
            operating_hours: defaults.operating_hours,
            avg_visit_duration: defaults.avg_visit_duration,
            avg_group_size: defaults.avg_group_size,
            management_factor: defaults.management_factor,
            is_active: true,
            parameters: Map::new(),
            capacity: None,
        }
    }

    /// Correction factors from the parameter bag, in key order.
    ///
    /// Non-numeric entries are ignored.
    pub fn correction_factors(&self) -> Vec<f64> {
        self.parameters
            .iter()
            .filter(|(key, _)| key.as_str() != ROUTE_SEGMENTS_KEY)
            .filter_map(|(_, value)| value.as_f64())
            .collect()
    }

    /// Route segments from the parameter bag.
    ///
    /// Entries that are not segment records are skipped.
    pub fn route_segments(&self) -> Vec<RouteSegment> {
        let items = match self.parameters.get(ROUTE_SEGMENTS_KEY) {
            Some(Value::Array(items)) => items,
            Some(other) => {
                warn!(object_id = %self.id, value = %other, "route_segments is not an array");
                return Vec::new();
            }
            None => return Vec::new(),
        };

        items
            .iter()
            .enumerate()
            .filter_map(|(idx, item)| match RouteSegment::deserialize(item) {
                Ok(segment) => Some(segment),
                Err(e) => {
                    warn!(object_id = %self.id, segment = idx, error = %e, "skipping malformed route segment");
                    None
                }
            })
            .collect()
    }

    /// Build calculation inputs from the current state of the record.
    pub fn capacity_inputs(&self, period_days: u32) -> CapacityInputs {
        CapacityInputs {
            object_kind: self.object_kind,
            route_kind: self.route_kind,
            area_sq_m: self.area_sq_m,
            area_per_visitor: self.area_per_visitor,
            operating_hours: self.operating_hours,
            avg_visit_duration: self.avg_visit_duration,
            avg_group_size: self.avg_group_size,
            period_days,
            route_segments: self.route_segments(),
            correction_factors: self.correction_factors(),
            management_factor: self.management_factor,
        }
    }
}

/// Progress of a calculation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationStatus {
    Processing,
    Completed,
    Failed,
}

/// History entry for one area calculation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub id: u64,
    pub area_id: AreaId,
    pub period: CalculationPeriod,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
    pub status: CalculationStatus,
    #[serde(default)]
    pub total_permissible: Option<f64>,
    /// Permissible capacity per object name.
    #[serde(default)]
    pub object_capacities: BTreeMap<String, f64>,
    #[serde(default)]
    pub report: Option<AreaReport>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl CalculationRecord {
    /// A freshly opened record.
    pub fn processing(
        id: u64,
        area_id: AreaId,
        period: CalculationPeriod,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            area_id,
            period,
            started_at,
            finished_at: None,
            status: CalculationStatus::Processing,
            total_permissible: None,
            object_capacities: BTreeMap::new(),
            report: None,
            error_message: None,
        }
    }

    /// Mark the run as completed with its report.
    pub fn complete(&mut self, report: AreaReport, finished_at: DateTime<Utc>) {
        self.status = CalculationStatus::Completed;
        self.finished_at = Some(finished_at);
        self.total_permissible = Some(report.total_permissible);
        self.object_capacities = report
            .objects
            .iter()
            .map(|o| (o.object_name.clone(), o.result.permissible_capacity))
            .collect();
        self.report = Some(report);
    }

    /// Mark the run as failed.
    pub fn fail(&mut self, message: impl Into<String>, finished_at: DateTime<Utc>) {
        self.status = CalculationStatus::Failed;
        self.finished_at = Some(finished_at);
        self.error_message = Some(message.into());
    }
}
