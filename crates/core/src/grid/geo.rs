//! Georeferencing for code grids: the six-coefficient affine transform.

use serde::{Deserialize, Serialize};

/// Absolute tolerance used when comparing transforms for alignment.
///
/// Coordinates are in map units (typically metres), so a micro-unit
/// tolerance absorbs float noise without hiding a real half-pixel shift.
pub const ALIGNMENT_EPSILON: f64 = 1e-6;

/// Affine geotransform in the usual raster convention.
///
/// A pixel `(col, row)` maps to map coordinates as:
///
/// ```text
/// x = origin_x + col * pixel_width  + row * row_rotation
/// y = origin_y + col * col_rotation + row * pixel_height
/// ```
///
/// `origin_x`/`origin_y` locate the top-left corner of the top-left pixel,
/// and `pixel_height` is negative for north-up grids.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    /// X coordinate of the top-left corner.
    pub origin_x: f64,
    /// Pixel width in map units.
    pub pixel_width: f64,
    /// Row rotation term (zero for axis-aligned grids).
    pub row_rotation: f64,
    /// Y coordinate of the top-left corner.
    pub origin_y: f64,
    /// Column rotation term (zero for axis-aligned grids).
    pub col_rotation: f64,
    /// Pixel height in map units, negative when rows run north to south.
    pub pixel_height: f64,
}

impl GeoTransform {
    /// Axis-aligned, north-up transform with square pixels.
    #[must_use]
    pub const fn north_up(origin_x: f64, origin_y: f64, cell_size: f64) -> Self {
        Self {
            origin_x,
            pixel_width: cell_size,
            row_rotation: 0.0,
            origin_y,
            col_rotation: 0.0,
            pixel_height: -cell_size,
        }
    }

    /// North-up transform from a lower-left corner, as declared by ASCII
    /// grid headers. The upper-left origin sits `rows * cell_size` above the
    /// corner.
    #[must_use]
    pub fn from_ll_corner(xll: f64, yll: f64, cell_size: f64, rows: usize) -> Self {
        Self::north_up(xll, yll + rows as f64 * cell_size, cell_size)
    }

    /// Compare all six coefficients within an absolute tolerance.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.origin_x - other.origin_x).abs() <= epsilon
            && (self.pixel_width - other.pixel_width).abs() <= epsilon
            && (self.row_rotation - other.row_rotation).abs() <= epsilon
            && (self.origin_y - other.origin_y).abs() <= epsilon
            && (self.col_rotation - other.col_rotation).abs() <= epsilon
            && (self.pixel_height - other.pixel_height).abs() <= epsilon
    }

    /// Whether rows run north to south with no rotation.
    #[must_use]
    pub fn is_north_up(&self) -> bool {
        self.row_rotation == 0.0
            && self.col_rotation == 0.0
            && self.pixel_width > 0.0
            && self.pixel_height < 0.0
    }

    /// The common pixel edge length, if the transform is north-up with
    /// square pixels. Writers of corner-based formats require this.
    #[must_use]
    pub fn cell_size(&self) -> Option<f64> {
        if self.is_north_up() && (self.pixel_width + self.pixel_height).abs() <= ALIGNMENT_EPSILON {
            Some(self.pixel_width)
        } else {
            None
        }
    }
}
