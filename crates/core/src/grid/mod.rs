//! Raster containers: georeferenced integer grids and their alignment rules.

pub mod code_grid;
pub mod geo;

pub use code_grid::CodeGrid;
pub use geo::{GeoTransform, ALIGNMENT_EPSILON};
