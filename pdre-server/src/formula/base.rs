//! Return factor and areal base capacity.

use crate::domain::CapacityInputs;

/// Daily turnover multiplier: `operating_hours / avg_visit_duration`.
///
/// Zero when the visit duration is not positive.
pub fn return_factor(operating_hours: f64, avg_visit_duration: f64) -> f64 {
    if avg_visit_duration <= 0.0 {
        return 0.0;
    }
    operating_hours / avg_visit_duration
}

/// Base capacity of an areal object.
///
/// `(area_sq_m / area_per_visitor) * return_factor * period_days`, or zero
/// when the area is missing or not positive, or when `area_per_visitor`
/// is not positive.
pub fn base_capacity_areal(inputs: &CapacityInputs) -> f64 {
    let area = match inputs.area_sq_m {
        Some(area) if area > 0.0 => area,
        _ => return 0.0,
    };
    if inputs.area_per_visitor <= 0.0 {
        return 0.0;
    }

    let rf = return_factor(inputs.operating_hours, inputs.avg_visit_duration);
    (area / inputs.area_per_visitor) * rf * f64::from(inputs.period_days)
}
