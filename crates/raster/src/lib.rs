//! # fm40-update-raster
//!
//! Arc/Info ASCII grid input and output for fuel model updates, plus
//! discovery of per-year burn severity rasters on disk. Bridges files
//! into the in-memory [`CodeGrid`](fm40_update_core::CodeGrid) the core
//! crate operates on.

mod ascii_grid;
mod discover;
mod error;

pub use ascii_grid::{DEFAULT_NODATA, read_ascii_grid, write_ascii_grid};
pub use discover::{extract_year, severity_files_for_years};
pub use error::{DiscoverError, RasterError};
