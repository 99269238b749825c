//! Potential and permissible capacity, and the area total.

/// Base capacity discounted by every correction factor.
///
/// Factors are applied left to right; an empty list leaves the base
/// capacity unchanged.
pub fn potential_capacity(base_capacity: f64, correction_factors: &[f64]) -> f64 {
    correction_factors
        .iter()
        .fold(base_capacity, |capacity, factor| capacity * factor)
}

/// Potential capacity discounted by management sufficiency.
pub fn permissible_capacity(potential_capacity: f64, management_factor: f64) -> f64 {
    potential_capacity * management_factor
}

/// Sum of object permissible capacities. Zero for no objects.
pub fn total_permissible<I>(capacities: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    capacities.into_iter().sum()
}
