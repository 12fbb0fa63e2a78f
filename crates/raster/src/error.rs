//! Error types for fm40-update-raster.

use std::path::PathBuf;

/// Error type for reading and writing Arc/Info ASCII grids.
///
/// Covers filesystem failures, header problems, and cell data that does
/// not match what the header promised.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RasterError {
    /// Wraps a filesystem error with the path that triggered it.
    #[error("failed to access {}: {reason}", path.display())]
    Io {
        /// Path of the file being read or written.
        path: PathBuf,
        /// Description of the underlying I/O failure.
        reason: String,
    },

    /// Returned when a header line is recognized but cannot be parsed.
    #[error("malformed header at line {line}: '{content}'")]
    MalformedHeader {
        /// 1-based line number of the offending header line.
        line: usize,
        /// The header line as it appeared in the file.
        content: String,
    },

    /// Returned when a required header field never appears.
    #[error("header is missing required field '{field}'")]
    MissingHeader {
        /// Name of the absent field.
        field: String,
    },

    /// Returned when the declared grid shape is empty, negative, or too
    /// large to address.
    #[error("invalid raster dimensions {ncols}x{nrows}")]
    InvalidDimensions {
        /// Declared column count.
        ncols: i64,
        /// Declared row count.
        nrows: i64,
    },

    /// Returned when the declared cell size is zero or negative.
    #[error("cell size must be positive, got {value}")]
    InvalidCellSize {
        /// Declared cell size.
        value: f64,
    },

    /// Returned when a data token is not an integer code.
    #[error("invalid cell value '{token}' at line {line}")]
    InvalidCell {
        /// 1-based line number of the offending token.
        line: usize,
        /// The token as it appeared in the file.
        token: String,
    },

    /// Returned when the data section holds the wrong number of values.
    #[error("expected {expected} cell values, found {found}")]
    CellCount {
        /// Cell count promised by the header.
        expected: usize,
        /// Cell count actually present.
        found: usize,
    },

    /// Returned when a grid's geotransform cannot be expressed in the
    /// corner-plus-cellsize header the format uses.
    #[error("grid is not representable as an ASCII raster: {reason}")]
    UnsupportedTransform {
        /// Why the transform cannot be represented.
        reason: String,
    },
}

/// Error type for locating per-year severity rasters.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DiscoverError {
    /// Wraps a filesystem error raised while scanning the directory.
    #[error("failed to scan severity directory {}: {reason}", path.display())]
    Io {
        /// Directory being scanned.
        path: PathBuf,
        /// Description of the underlying I/O failure.
        reason: String,
    },

    /// Returned when a severity raster carries no recognizable year.
    #[error("cannot infer a fire year from file name '{file}'")]
    UndatedFile {
        /// Name of the file without a year.
        file: String,
    },

    /// Returned when a requested year has no raster in the directory.
    #[error("no severity raster for {year} found in {}", dir.display())]
    YearNotFound {
        /// The requested fire year.
        year: u16,
        /// Directory that was searched.
        dir: PathBuf,
    },
}
