//! Update command: run one effective-year fuel model update end to end.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use fm40_update_core::{AnnualSeverity, EffectiveYearRun, Ruleset, validate_effective_year};
use fm40_update_raster::{read_ascii_grid, severity_files_for_years, write_ascii_grid};

use crate::cli::Cli;

/// Run the update pipeline.
pub fn run(args: Cli) -> Result<()> {
    let _cmd = info_span!("update").entered();

    // 1. Check the temporal setup before touching any input
    validate_effective_year(args.effective_year, &args.years)?;

    // 2. Compile the ruleset
    info!(path = %args.ruleset.display(), "compiling ruleset");
    let ruleset = Ruleset::from_csv_path(&args.ruleset)
        .with_context(|| format!("failed to compile ruleset: {}", args.ruleset.display()))?;

    // 3. Resolve severity rasters for the requested years
    let rasters = severity_files_for_years(&args.severity_dir, &args.years)
        .context("failed to resolve severity rasters")?;

    // 4. Read the baseline
    info!(path = %args.baseline.display(), "reading baseline fuel grid");
    let baseline = read_ascii_grid(&args.baseline)
        .with_context(|| format!("failed to read baseline: {}", args.baseline.display()))?;

    // 5. Read the per-year severity grids
    let mut annual = Vec::with_capacity(rasters.len());
    for (fire_year, path) in rasters {
        info!(fire_year, path = %path.display(), "reading severity grid");
        let grid = read_ascii_grid(&path)
            .with_context(|| format!("failed to read severity grid: {}", path.display()))?;
        annual.push(AnnualSeverity { fire_year, grid });
    }

    // 6. Run the update
    let output = EffectiveYearRun {
        baseline: &baseline,
        annual: &annual,
        effective_year: args.effective_year,
        ruleset: &ruleset,
    }
    .execute()?;

    // 7. Write the updated raster
    let out_path = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("fm40_updated_{}.asc", args.effective_year)));
    write_ascii_grid(&out_path, &output.updated)
        .with_context(|| format!("failed to write output: {}", out_path.display()))?;
    info!(path = %out_path.display(), "updated fuel grid written");

    // 8. Optionally write the composite disturbance grid
    if let Some(composite_path) = args.composite_output {
        write_ascii_grid(&composite_path, &output.composite)
            .with_context(|| format!("failed to write composite: {}", composite_path.display()))?;
        info!(path = %composite_path.display(), "composite disturbance grid written");
    }

    Ok(())
}
