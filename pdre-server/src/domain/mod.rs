//! Domain types for the carrying-capacity engine.
//!
//! This module holds the per-object parameter set, the layered capacity
//! results and the tags that select which formula family applies. The
//! types carry no behaviour beyond construction and parsing; the formulas
//! live in [`crate::formula`].

mod ids;
mod inputs;
mod kind;
mod period;
mod result;
mod segment;

pub use ids::{AreaId, ObjectId};
pub use inputs::CapacityInputs;
pub(crate) use inputs::{
    default_area_per_visitor, default_avg_group_size, default_avg_visit_duration,
    default_management_factor, default_operating_hours,
};
pub use kind::{InvalidObjectKind, InvalidRouteKind, ObjectKind, RouteKind};
pub use period::{CalculationPeriod, InvalidPeriod};
pub use result::{AreaReport, CapacityResult, ObjectResult};
pub use segment::RouteSegment;
