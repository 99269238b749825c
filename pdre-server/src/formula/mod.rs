//! Capacity formula library.
//!
//! Pure numeric functions implementing the base formulas of the
//! recreational carrying-capacity methodology. Nothing here holds state or
//! returns errors: a degenerate input (zero divisor, empty segment list)
//! yields zero or the neutral multiplier as documented on each function, so
//! one malformed object can never abort an area-wide run.

mod adjust;
mod base;
mod route;

pub use adjust::{permissible_capacity, potential_capacity, total_permissible};
pub use base::{base_capacity_areal, return_factor};
pub use route::{
    autonomous_capacity, base_capacity_linear, day_trip_capacity, max_groups_per_day,
    multi_day_capacity,
};
