//! The temporal precondition gating every run.

use crate::error::UpdateError;

/// Check that the effective year strictly postdates every disturbance year.
///
/// A fuel raster dated `effective_year` may only reflect fires that happened
/// before it, so equality is rejected along with later years. Runs call this
/// before any raster is read.
///
/// # Errors
/// Returns [`UpdateError::NoDisturbanceYears`] for an empty year set, or
/// [`UpdateError::EffectiveYearNotAfter`] naming every violating year.
pub fn validate_effective_year(effective_year: u16, fire_years: &[u16]) -> Result<(), UpdateError> {
    if fire_years.is_empty() {
        return Err(UpdateError::NoDisturbanceYears);
    }

    let mut violating: Vec<u16> = fire_years
        .iter()
        .copied()
        .filter(|&year| year >= effective_year)
        .collect();
    if violating.is_empty() {
        return Ok(());
    }
    violating.sort_unstable();
    violating.dedup();
    Err(UpdateError::EffectiveYearNotAfter {
        effective_year,
        violating,
    })
}
