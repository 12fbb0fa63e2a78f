//! The remap engine: the per-pixel application of a compiled ruleset.

use rayon::prelude::*;
use tracing::info;

use crate::error::UpdateError;
use crate::grid::CodeGrid;
use crate::ruleset::{RuleOutcome, Ruleset};

/// Produce the updated fuel-model grid from the baseline and the composite
/// disturbance grid.
///
/// Per pixel: baseline nodata stays nodata and is never looked up; a
/// composite cell marking no disturbance leaves the pixel unchanged;
/// otherwise the ruleset decides, and anything short of a mapped rule
/// (no rule for the pair, invalid values, non-burnable baseline fuel)
/// also leaves the pixel unchanged.
///
/// The output inherits the baseline's shape, transform, CRS, and nodata
/// value. The function is pure: identical inputs give identical output,
/// and rows are processed in parallel without affecting the result.
///
/// # Errors
/// Returns [`UpdateError::Misaligned`] if the composite does not share the
/// baseline's geometry.
pub fn apply_ruleset(
    baseline: &CodeGrid,
    composite: &CodeGrid,
    ruleset: &Ruleset,
) -> Result<CodeGrid, UpdateError> {
    if let Some(mismatch) = composite.alignment_mismatch(baseline) {
        return Err(UpdateError::Misaligned {
            grid: "composite disturbance grid".to_string(),
            mismatch,
        });
    }

    let width = baseline.width();
    let mut cells = baseline.cells().to_vec();
    cells.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        for (x, cell) in row.iter_mut().enumerate() {
            if baseline.is_nodata(*cell) {
                continue;
            }
            let dist = composite.get(x, y);
            if composite.is_nodata(dist) {
                continue;
            }
            if let RuleOutcome::Mapped(new_code) = ruleset.lookup_cells(dist, *cell) {
                *cell = new_code.value();
            }
        }
    });

    let changed = cells
        .iter()
        .zip(baseline.cells())
        .filter(|(after, before)| after != before)
        .count();
    info!(changed, total = cells.len(), "fuel model update applied");

    Ok(CodeGrid::new(
        width,
        baseline.height(),
        cells,
        baseline.nodata(),
        baseline.transform(),
        baseline.crs().map(str::to_owned),
    ))
}
