//! End-to-end orchestration of a single effective-year update.

use tracing::debug;

use crate::error::UpdateError;
use crate::grid::CodeGrid;
use crate::remap::apply_ruleset;
use crate::ruleset::Ruleset;
use crate::stack::{build_composite, AnnualSeverity};
use crate::temporal::validate_effective_year;

/// Borrowed inputs for one update run.
#[derive(Debug)]
pub struct EffectiveYearRun<'a> {
    /// Baseline fuel-model grid the update starts from.
    pub baseline: &'a CodeGrid,
    /// One burn-severity grid per disturbance year.
    pub annual: &'a [AnnualSeverity],
    /// The year the updated grid is valid for.
    pub effective_year: u16,
    /// Compiled remap rules.
    pub ruleset: &'a Ruleset,
}

/// Grids produced by a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutput {
    /// The updated fuel-model grid.
    pub updated: CodeGrid,
    /// The merged disturbance grid the update was driven by.
    pub composite: CodeGrid,
}

impl EffectiveYearRun<'_> {
    /// Validate the temporal setup, build the composite disturbance grid,
    /// and apply the ruleset.
    ///
    /// The temporal check runs before any grid work, so a bad effective
    /// year fails without touching pixel data.
    ///
    /// # Errors
    /// Returns [`UpdateError::NoDisturbanceYears`] when no severity grids
    /// were supplied, [`UpdateError::EffectiveYearNotAfter`] when the
    /// effective year does not postdate every disturbance year, and
    /// [`UpdateError::Misaligned`] when any grid disagrees with the
    /// baseline's geometry.
    pub fn execute(&self) -> Result<RunOutput, UpdateError> {
        let years: Vec<u16> = self.annual.iter().map(|a| a.fire_year).collect();
        validate_effective_year(self.effective_year, &years)?;
        debug!(
            effective_year = self.effective_year,
            years = ?years,
            "starting fuel model update"
        );

        let composite = build_composite(self.baseline, self.annual, self.effective_year)?;
        let updated = apply_ruleset(self.baseline, &composite, self.ruleset)?;
        Ok(RunOutput { updated, composite })
    }
}
