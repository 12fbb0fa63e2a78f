//! Fuel Model Update Core Library
//!
//! Engine for ageing a LANDFIRE FM40 fuel-model raster forward through
//! one or more fire seasons. Burn-severity rasters are translated into
//! disturbance (DIST) codes, merged into a single composite grid, and a
//! CSV ruleset then remaps each disturbed pixel to its post-fire fuel
//! model.
//!
//! ## Pipeline
//!
//! - Severity grids become per-year DIST grids keyed on severity and
//!   time since fire
//! - Competing years merge per pixel, most severe first, most recent
//!   breaking ties
//! - The compiled ruleset rewrites disturbed pixels; everything else is
//!   carried through unchanged

// Code domains and grid primitives
pub mod codes;
pub mod grid;

// Pipeline stages
pub mod remap;
pub mod ruleset;
pub mod run;
pub mod stack;
pub mod temporal;

pub mod error;

// Re-export the code domains
pub use codes::{BurnSeverity, DistCode, FuelClass, FuelCode, Severity, TimeSinceFire};
pub use codes::NO_DISTURBANCE;

// Re-export the grid primitives
pub use grid::{CodeGrid, GeoTransform, ALIGNMENT_EPSILON};

// Re-export the pipeline surface
pub use error::{RulesetError, UpdateError};
pub use remap::apply_ruleset;
pub use ruleset::{RuleOutcome, Ruleset};
pub use run::{EffectiveYearRun, RunOutput};
pub use stack::{build_composite, combine_dist_grids, severity_to_dist_grid, AnnualSeverity};
pub use temporal::validate_effective_year;
