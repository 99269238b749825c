//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::aggregate::AreaEntry;
use crate::domain::{
    AreaId, CapacityInputs, CapacityResult, InvalidObjectKind, InvalidRouteKind, ObjectId,
    ObjectKind, RouteKind, RouteSegment,
};
use crate::store::{ProtectedArea, TourismObject};

/// A request body that names an unknown kind.
#[derive(Debug, thiserror::Error)]
pub enum InvalidInput {
    #[error(transparent)]
    ObjectKind(#[from] InvalidObjectKind),

    #[error(transparent)]
    RouteKind(#[from] InvalidRouteKind),
}

/// Capacity parameters for one object.
///
/// Kinds are plain strings so that unknown tags can be reported as a bad
/// request; omitted numeric fields take the engine defaults.
#[derive(Debug, Deserialize)]
pub struct CapacityInputsRequest {
    /// `areal`, `linear` or `point`
    pub object_kind: String,

    /// `day_trip`, `multi_day`, `autonomous` or `facility`.
    /// Defaults to `day_trip`.
    pub route_kind: Option<String>,

    pub area_sq_m: Option<f64>,
    pub area_per_visitor: Option<f64>,
    pub operating_hours: Option<f64>,
    pub avg_visit_duration: Option<f64>,
    pub avg_group_size: Option<f64>,
    pub period_days: Option<u32>,

    #[serde(default)]
    pub route_segments: Vec<RouteSegment>,

    #[serde(default)]
    pub correction_factors: Vec<f64>,

    pub management_factor: Option<f64>,
}

impl CapacityInputsRequest {
    /// Validate the kind tags and fill in defaults.
    pub fn into_inputs(self) -> Result<CapacityInputs, InvalidInput> {
        let object_kind = ObjectKind::parse(&self.object_kind)?;
        let route_kind = match self.route_kind.as_deref() {
            Some(tag) => RouteKind::parse(tag)?,
            None => RouteKind::DayTrip,
        };

        let mut inputs = CapacityInputs::new(object_kind, route_kind);
        inputs.area_sq_m = self.area_sq_m;
        if let Some(v) = self.area_per_visitor {
            inputs.area_per_visitor = v;
        }
        if let Some(v) = self.operating_hours {
            inputs.operating_hours = v;
        }
        if let Some(v) = self.avg_visit_duration {
            inputs.avg_visit_duration = v;
        }
        if let Some(v) = self.avg_group_size {
            inputs.avg_group_size = v;
        }
        if let Some(v) = self.period_days {
            inputs.period_days = v;
        }
        if let Some(v) = self.management_factor {
            inputs.management_factor = v;
        }
        inputs.route_segments = self.route_segments;
        inputs.correction_factors = self.correction_factors;

        Ok(inputs)
    }
}

/// One object of an ad-hoc area calculation.
#[derive(Debug, Deserialize)]
pub struct AreaEntryRequest {
    pub id: u64,
    pub name: String,
    pub inputs: CapacityInputsRequest,
}

impl AreaEntryRequest {
    pub fn into_entry(self) -> Result<AreaEntry, InvalidInput> {
        Ok(AreaEntry::new(
            ObjectId(self.id),
            self.name,
            self.inputs.into_inputs()?,
        ))
    }
}

/// Body of `PUT /areas/:id`.
#[derive(Debug, Deserialize)]
pub struct AreaRequest {
    pub name: String,
    #[serde(default)]
    pub area_type: String,
    #[serde(default)]
    pub area_ha: f64,
}

impl AreaRequest {
    /// Build the stored area, keeping the last calculation of `existing`.
    pub fn into_area(self, id: AreaId, existing: Option<ProtectedArea>) -> ProtectedArea {
        let mut area = existing.unwrap_or_else(|| ProtectedArea::new(id, ""));
        area.name = self.name;
        area.area_type = self.area_type;
        area.area_ha = self.area_ha;
        area
    }
}

/// Body of `PUT /objects/:id`.
///
/// Omitted numeric fields take the engine defaults.
#[derive(Debug, Deserialize)]
pub struct ObjectRequest {
    pub area_id: u64,
    pub name: String,
    pub object_kind: String,
    pub route_kind: Option<String>,
    pub area_sq_m: Option<f64>,
    pub length_km: Option<f64>,
    pub area_per_visitor: Option<f64>,
    pub operating_hours: Option<f64>,
    pub avg_visit_duration: Option<f64>,
    pub avg_group_size: Option<f64>,
    pub management_factor: Option<f64>,
    pub is_active: Option<bool>,

    /// Correction factors and route segments.
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

impl ObjectRequest {
    /// Validate the kind tags and build the stored object.
    ///
    /// The object has no stored capacity until it is next calculated.
    pub fn into_object(self, id: ObjectId) -> Result<TourismObject, InvalidInput> {
        let object_kind = ObjectKind::parse(&self.object_kind)?;
        let route_kind = match self.route_kind.as_deref() {
            Some(tag) => RouteKind::parse(tag)?,
            None => RouteKind::DayTrip,
        };

        let mut object = TourismObject::new(
            id,
            AreaId(self.area_id),
            self.name,
            object_kind,
            route_kind,
        );
        object.area_sq_m = self.area_sq_m;
        object.length_km = self.length_km;
        if let Some(v) = self.area_per_visitor {
            object.area_per_visitor = v;
        }
        if let Some(v) = self.operating_hours {
            object.operating_hours = v;
        }
        if let Some(v) = self.avg_visit_duration {
            object.avg_visit_duration = v;
        }
        if let Some(v) = self.avg_group_size {
            object.avg_group_size = v;
        }
        if let Some(v) = self.management_factor {
            object.management_factor = v;
        }
        if let Some(v) = self.is_active {
            object.is_active = v;
        }
        object.parameters = self.parameters;

        Ok(object)
    }
}

/// Request to run a stored area calculation or object recalculation.
#[derive(Debug, Default, Deserialize)]
pub struct CalculateRequest {
    /// Period label; the server default applies when absent.
    pub calculation_period: Option<String>,
}

/// A protected area in listings.
#[derive(Debug, Serialize)]
pub struct AreaView {
    pub id: AreaId,
    pub name: String,
    pub area_type: String,
    pub area_ha: f64,
    pub pdre_value: Option<f64>,
    pub calculation_method: Option<String>,
    pub calculated_at: Option<DateTime<Utc>>,
}

impl AreaView {
    pub fn from_area(area: &ProtectedArea) -> Self {
        Self {
            id: area.id,
            name: area.name.clone(),
            area_type: area.area_type.clone(),
            area_ha: area.area_ha,
            pdre_value: area.pdre_value,
            calculation_method: area.calculation_method.clone(),
            calculated_at: area.calculated_at,
        }
    }
}

/// A tourism object in listings.
#[derive(Debug, Serialize)]
pub struct ObjectView {
    pub id: ObjectId,
    pub area_id: AreaId,
    pub name: String,
    pub object_kind: ObjectKind,
    pub route_kind: RouteKind,
    pub area_sq_m: Option<f64>,
    pub length_km: Option<f64>,
    pub is_active: bool,

    /// Last computed capacity, if the object has been calculated.
    pub capacity: Option<CapacityResult>,
}

impl ObjectView {
    pub fn from_object(object: &TourismObject) -> Self {
        Self {
            id: object.id,
            area_id: object.area_id,
            name: object.name.clone(),
            object_kind: object.object_kind,
            route_kind: object.route_kind,
            area_sq_m: object.area_sq_m,
            length_km: object.length_km,
            is_active: object.is_active,
            capacity: object.capacity,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> CapacityInputsRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn minimal_request_uses_defaults() {
        let inputs = request(r#"{"object_kind": "areal", "area_sq_m": 1000.0}"#)
            .into_inputs()
            .unwrap();

        assert_eq!(inputs, CapacityInputs::areal(1000.0));
    }

    #[test]
    fn overrides_are_applied() {
        let inputs = request(
            r#"{
                "object_kind": "linear",
                "route_kind": "autonomous",
                "operating_hours": 10.0,
                "avg_group_size": 6.0,
                "period_days": 7,
                "management_factor": 0.5,
                "correction_factors": [0.9],
                "route_segments": [{"length_km": 3.0}]
            }"#,
        )
        .into_inputs()
        .unwrap();

        assert_eq!(inputs.object_kind, ObjectKind::Linear);
        assert_eq!(inputs.route_kind, RouteKind::Autonomous);
        assert_eq!(inputs.operating_hours, 10.0);
        assert_eq!(inputs.avg_group_size, 6.0);
        assert_eq!(inputs.period_days, 7);
        assert_eq!(inputs.management_factor, 0.5);
        assert_eq!(inputs.correction_factors, vec![0.9]);
        assert_eq!(inputs.route_segments, vec![RouteSegment::new(3.0)]);
    }

    #[test]
    fn unknown_kinds_are_rejected() {
        let err = request(r#"{"object_kind": "polygon"}"#)
            .into_inputs()
            .unwrap_err();
        assert!(matches!(err, InvalidInput::ObjectKind(_)));
        assert_eq!(err.to_string(), "invalid object kind: \"polygon\"");

        let err = request(r#"{"object_kind": "linear", "route_kind": "cruise"}"#)
            .into_inputs()
            .unwrap_err();
        assert!(matches!(err, InvalidInput::RouteKind(_)));
    }

    #[test]
    fn area_entry_conversion() {
        let entry: AreaEntryRequest = serde_json::from_str(
            r#"{"id": 4, "name": "Meadow", "inputs": {"object_kind": "areal", "area_sq_m": 50.0}}"#,
        )
        .unwrap();
        let entry = entry.into_entry().unwrap();

        assert_eq!(entry.id, ObjectId(4));
        assert_eq!(entry.name, "Meadow");
        assert_eq!(entry.inputs.area_sq_m, Some(50.0));
    }

    #[test]
    fn area_request_keeps_last_calculation() {
        let req: AreaRequest =
            serde_json::from_str(r#"{"name": "Lake park", "area_ha": 500.0}"#).unwrap();

        let mut existing = ProtectedArea::new(AreaId(1), "Old name");
        existing.pdre_value = Some(42.0);

        let area = req.into_area(AreaId(1), Some(existing));
        assert_eq!(area.name, "Lake park");
        assert_eq!(area.area_ha, 500.0);
        assert_eq!(area.area_type, "");
        assert_eq!(area.pdre_value, Some(42.0));
    }

    #[test]
    fn object_request_conversion() {
        let req: ObjectRequest = serde_json::from_str(
            r#"{
                "area_id": 1,
                "name": "Shore trail",
                "object_kind": "linear",
                "route_kind": "multi_day",
                "avg_group_size": 5.0,
                "parameters": {"cf1": 0.9, "route_segments": [{"length_km": 2.0}]}
            }"#,
        )
        .unwrap();

        let object = req.into_object(ObjectId(8)).unwrap();
        assert_eq!(object.id, ObjectId(8));
        assert_eq!(object.area_id, AreaId(1));
        assert_eq!(object.route_kind, RouteKind::MultiDay);
        assert_eq!(object.avg_group_size, 5.0);
        assert_eq!(object.operating_hours, 8.0);
        assert!(object.is_active);
        assert_eq!(object.correction_factors(), vec![0.9]);
        assert_eq!(object.route_segments(), vec![RouteSegment::new(2.0)]);
        assert!(object.capacity.is_none());

        let req: ObjectRequest = serde_json::from_str(
            r#"{"area_id": 1, "name": "X", "object_kind": "areal", "route_kind": "zipline"}"#,
        )
        .unwrap();
        assert!(matches!(
            req.into_object(ObjectId(9)),
            Err(InvalidInput::RouteKind(_))
        ));
    }

    #[test]
    fn object_view_from_object() {
        let mut object = TourismObject::new(
            ObjectId(2),
            AreaId(1),
            "Shore trail",
            ObjectKind::Linear,
            RouteKind::MultiDay,
        );
        object.length_km = Some(12.5);

        let view = ObjectView::from_object(&object);
        assert_eq!(view.id, ObjectId(2));
        assert_eq!(view.name, "Shore trail");
        assert_eq!(view.length_km, Some(12.5));
        assert!(view.capacity.is_none());

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["route_kind"], "multi_day");
    }
}
