//! Disturbance stack construction: one composite DIST grid per run.
//!
//! Each requested fire year contributes an annual burn-severity grid. The
//! stack builder converts every annual grid into DIST codes aged against
//! the effective year, then merges them pixel by pixel so the single most
//! impactful disturbance survives.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::codes::{BurnSeverity, DistCode, TimeSinceFire, NO_DISTURBANCE};
use crate::error::UpdateError;
use crate::grid::CodeGrid;

/// Merge rank for cells carrying no valid DIST code; loses to every real one.
const UNRANKED: u8 = 99;

/// One year's burn-severity observations.
#[derive(Debug, Clone)]
pub struct AnnualSeverity {
    /// Calendar year of the fire season this grid describes.
    pub fire_year: u16,
    /// Burn-severity classes, aligned with the run's baseline.
    pub grid: CodeGrid,
}

/// Convert an annual burn-severity grid into a DIST grid for the given
/// effective year.
///
/// Recognized severity classes become `100 + severity * 10 + time_code`;
/// the grid's nodata cells and unrecognized classes become
/// [`NO_DISTURBANCE`]. A fire outside the ten-year aging window yields an
/// all-nodata grid, with a warning, rather than an error: the year simply
/// no longer influences fuels.
#[must_use]
pub fn severity_to_dist_grid(severity: &CodeGrid, fire_year: u16, effective_year: u16) -> CodeGrid {
    let crs = severity.crs().map(str::to_owned);
    let elapsed = i32::from(effective_year) - i32::from(fire_year);
    let Some(time_since) = TimeSinceFire::from_years_elapsed(elapsed) else {
        warn!(
            fire_year,
            effective_year, "fire outside the ten-year aging window contributes no disturbance"
        );
        return CodeGrid::filled(
            severity.width(),
            severity.height(),
            NO_DISTURBANCE,
            NO_DISTURBANCE,
            severity.transform(),
            crs,
        );
    };

    let cells: Vec<i32> = severity
        .cells()
        .iter()
        .map(|&value| {
            if severity.is_nodata(value) {
                return NO_DISTURBANCE;
            }
            match BurnSeverity::from_cell(value) {
                Some(burn) => DistCode::compose(burn.dist_severity(), time_since).value(),
                None => NO_DISTURBANCE,
            }
        })
        .collect();

    CodeGrid::new(
        severity.width(),
        severity.height(),
        cells,
        NO_DISTURBANCE,
        severity.transform(),
        crs,
    )
}

/// Merge per-year DIST grids into the composite disturbance grid.
///
/// Per pixel, the code with the best impact rank wins: severity first, then
/// recency. Invalid cells never outrank a real code; a pixel left untouched
/// by every year stays [`NO_DISTURBANCE`]. The merge is pure, so grid order
/// only matters when two years carry the very same code.
///
/// # Errors
/// Returns [`UpdateError::NoDisturbanceYears`] for an empty slice and
/// [`UpdateError::Misaligned`] if the grids disagree on geometry.
pub fn combine_dist_grids(grids: &[CodeGrid]) -> Result<CodeGrid, UpdateError> {
    let Some(first) = grids.first() else {
        return Err(UpdateError::NoDisturbanceYears);
    };
    for (i, grid) in grids.iter().enumerate().skip(1) {
        if let Some(mismatch) = grid.alignment_mismatch(first) {
            return Err(UpdateError::Misaligned {
                grid: format!("disturbance grid {i}"),
                mismatch,
            });
        }
    }

    let width = first.width();
    let mut cells = vec![NO_DISTURBANCE; width * first.height()];
    cells.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        for (x, cell) in row.iter_mut().enumerate() {
            let mut best_value = NO_DISTURBANCE;
            let mut best_rank = UNRANKED;
            for grid in grids {
                let value = grid.get(x, y);
                let rank = DistCode::try_new(value).map_or(UNRANKED, DistCode::impact_rank);
                // Strict comparison keeps the earliest grid on ties.
                if rank < best_rank {
                    best_rank = rank;
                    best_value = value;
                }
            }
            *cell = best_value;
        }
    });

    Ok(CodeGrid::new(
        width,
        first.height(),
        cells,
        NO_DISTURBANCE,
        first.transform(),
        first.crs().map(str::to_owned),
    ))
}

/// Build the composite disturbance grid for one effective year.
///
/// Every annual grid is checked against the baseline's geometry, converted
/// to DIST codes, and merged.
///
/// # Errors
/// Returns [`UpdateError::Misaligned`] naming the offending year, or
/// [`UpdateError::NoDisturbanceYears`] when `annual` is empty.
pub fn build_composite(
    baseline: &CodeGrid,
    annual: &[AnnualSeverity],
    effective_year: u16,
) -> Result<CodeGrid, UpdateError> {
    for year in annual {
        if let Some(mismatch) = year.grid.alignment_mismatch(baseline) {
            return Err(UpdateError::Misaligned {
                grid: format!("severity grid for {}", year.fire_year),
                mismatch,
            });
        }
    }

    let converted: Vec<CodeGrid> = annual
        .iter()
        .map(|year| severity_to_dist_grid(&year.grid, year.fire_year, effective_year))
        .collect();
    let composite = combine_dist_grids(&converted)?;
    debug!(
        years = annual.len(),
        effective_year, "composite disturbance grid built"
    );
    Ok(composite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GeoTransform;

    fn transform() -> GeoTransform {
        GeoTransform::north_up(500_000.0, 4_000_000.0, 30.0)
    }

    fn severity_grid(cells: Vec<i32>) -> CodeGrid {
        CodeGrid::new(cells.len(), 1, cells, -9999, transform(), None)
    }

    fn dist_grid(cells: Vec<i32>) -> CodeGrid {
        CodeGrid::new(cells.len(), 1, cells, NO_DISTURBANCE, transform(), None)
    }

    #[test]
    fn test_conversion_one_to_five_years() {
        let severity = severity_grid(vec![1, 2, 3, 4, 5, -9999]);
        let dist = severity_to_dist_grid(&severity, 2018, 2019);
        assert_eq!(dist.cells(), &[112, 112, 122, 132, 112, 0]);
        assert_eq!(dist.nodata(), NO_DISTURBANCE);
    }

    #[test]
    fn test_conversion_six_to_ten_years() {
        let severity = severity_grid(vec![4, 3]);
        let dist = severity_to_dist_grid(&severity, 2012, 2019);
        assert_eq!(dist.cells(), &[133, 123]);
    }

    #[test]
    fn test_conversion_unrecognized_classes_are_nodata() {
        let severity = severity_grid(vec![0, 6, 99, 131]);
        let dist = severity_to_dist_grid(&severity, 2018, 2019);
        assert_eq!(dist.cells(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_conversion_outside_aging_window() {
        let severity = severity_grid(vec![4, 4, 4]);
        // Fourteen years old: aged out entirely.
        let old = severity_to_dist_grid(&severity, 2005, 2019);
        assert_eq!(old.cells(), &[0, 0, 0]);
        // Dated after the effective year: contributes nothing either.
        let future = severity_to_dist_grid(&severity, 2020, 2019);
        assert_eq!(future.cells(), &[0, 0, 0]);
    }

    #[test]
    fn test_combine_severity_beats_recency() {
        // Older but more severe vs newer but milder.
        let older = dist_grid(vec![133, 123, 0, 0]);
        let newer = dist_grid(vec![122, 122, 112, 0]);
        let composite = combine_dist_grids(&[older, newer]).unwrap();
        assert_eq!(composite.cells(), &[133, 122, 112, 0]);
    }

    #[test]
    fn test_combine_single_grid_normalizes_junk() {
        let grid = dist_grid(vec![132, 7, -9999, 0]);
        let composite = combine_dist_grids(&[grid]).unwrap();
        assert_eq!(composite.cells(), &[132, 0, 0, 0]);
    }

    #[test]
    fn test_combine_empty_is_an_error() {
        assert!(matches!(
            combine_dist_grids(&[]),
            Err(UpdateError::NoDisturbanceYears)
        ));
    }

    #[test]
    fn test_combine_rejects_misaligned_grids() {
        let a = dist_grid(vec![0, 0, 0]);
        let b = CodeGrid::filled(3, 1, 0, NO_DISTURBANCE, GeoTransform::north_up(0.0, 0.0, 10.0), None);
        let err = combine_dist_grids(&[a, b]).unwrap_err();
        match err {
            UpdateError::Misaligned { grid, .. } => assert_eq!(grid, "disturbance grid 1"),
            other => panic!("expected Misaligned, got {other:?}"),
        }
    }

    #[test]
    fn test_build_composite_ignores_sentinel_years() {
        let baseline = CodeGrid::filled(2, 1, 101, -9999, transform(), None);
        let annual = vec![
            AnnualSeverity {
                fire_year: 2017,
                grid: severity_grid(vec![-9999, -9999]),
            },
            AnnualSeverity {
                fire_year: 2018,
                grid: severity_grid(vec![3, -9999]),
            },
        ];
        let composite = build_composite(&baseline, &annual, 2019).unwrap();
        // Only the 2018 moderate burn leaves a mark.
        assert_eq!(composite.cells(), &[122, 0]);
    }

    #[test]
    fn test_build_composite_rejects_misaligned_year() {
        let baseline = CodeGrid::filled(2, 1, 101, -9999, transform(), None);
        let annual = vec![AnnualSeverity {
            fire_year: 2018,
            grid: CodeGrid::filled(2, 1, 3, -9999, GeoTransform::north_up(0.0, 0.0, 30.0), None),
        }];
        let err = build_composite(&baseline, &annual, 2019).unwrap_err();
        match err {
            UpdateError::Misaligned { grid, .. } => assert_eq!(grid, "severity grid for 2018"),
            other => panic!("expected Misaligned, got {other:?}"),
        }
    }
}
