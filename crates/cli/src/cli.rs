use std::path::PathBuf;

use clap::Parser;

/// Annual FM40 fuel model update driven by burn severity rasters.
#[derive(Parser)]
#[command(
    name = "fm40-update",
    version,
    about = "Update a LANDFIRE FM40 raster from MTBS burn severity"
)]
pub struct Cli {
    /// Path to the baseline FM40 ASCII grid.
    #[arg(long)]
    pub baseline: PathBuf,

    /// Directory holding per-year burn severity ASCII grids.
    #[arg(long)]
    pub severity_dir: PathBuf,

    /// Fire years to include; each must match a raster in the severity directory.
    #[arg(long, num_args = 1.., required = true)]
    pub years: Vec<u16>,

    /// Year the updated raster is valid for; must be later than every fire year.
    #[arg(long)]
    pub effective_year: u16,

    /// Path to the remap ruleset CSV.
    #[arg(long)]
    pub ruleset: PathBuf,

    /// Path for the updated raster (default: fm40_updated_<effective-year>.asc).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Optional path for the composite disturbance grid.
    #[arg(long)]
    pub composite_output: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
