//! Row-major integer raster with georeferencing and a nodata value.

use serde::{Deserialize, Serialize};

use crate::grid::geo::{GeoTransform, ALIGNMENT_EPSILON};

/// A grid of integer codes (fuel models, burn severities, DIST codes).
///
/// Cells are stored row-major from the top-left corner (`y * width + x`),
/// matching north-up raster file order. The transform and CRS travel with
/// the data so outputs inherit the baseline's georeferencing unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeGrid {
    width: usize,
    height: usize,
    nodata: i32,
    transform: GeoTransform,
    /// Opaque CRS description (WKT). Compared verbatim for alignment.
    crs: Option<String>,
    cells: Vec<i32>,
}

impl CodeGrid {
    /// Wrap existing cell data.
    ///
    /// # Panics
    /// Panics if `width` or `height` is zero, or if
    /// `cells.len() != width * height`.
    #[must_use]
    pub fn new(
        width: usize,
        height: usize,
        cells: Vec<i32>,
        nodata: i32,
        transform: GeoTransform,
        crs: Option<String>,
    ) -> Self {
        assert!(
            width > 0 && height > 0,
            "grid dimensions {width}x{height} must be nonzero"
        );
        assert_eq!(
            cells.len(),
            width * height,
            "cell count {} does not match {width}x{height}",
            cells.len()
        );
        Self {
            width,
            height,
            nodata,
            transform,
            crs,
            cells,
        }
    }

    /// Grid of a single value.
    #[must_use]
    pub fn filled(
        width: usize,
        height: usize,
        value: i32,
        nodata: i32,
        transform: GeoTransform,
        crs: Option<String>,
    ) -> Self {
        Self::new(width, height, vec![value; width * height], nodata, transform, crs)
    }

    /// Width in cells.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// The value marking missing data.
    #[must_use]
    pub const fn nodata(&self) -> i32 {
        self.nodata
    }

    /// The affine geotransform.
    #[must_use]
    pub const fn transform(&self) -> GeoTransform {
        self.transform
    }

    /// The CRS description, if one accompanied the raster.
    #[must_use]
    pub fn crs(&self) -> Option<&str> {
        self.crs.as_deref()
    }

    /// All cells, row-major from the top-left.
    #[must_use]
    pub fn cells(&self) -> &[i32] {
        &self.cells
    }

    /// Cell value at `(x, y)`.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> i32 {
        self.cells[self.index(x, y)]
    }

    /// Overwrite the cell at `(x, y)`.
    pub fn set(&mut self, x: usize, y: usize, value: i32) {
        let idx = self.index(x, y);
        self.cells[idx] = value;
    }

    /// Whether a value is this grid's nodata sentinel.
    #[must_use]
    pub const fn is_nodata(&self, value: i32) -> bool {
        value == self.nodata
    }

    /// Describe the first property on which `self` disagrees with `other`,
    /// or `None` when the grids are aligned.
    ///
    /// Alignment covers shape, geotransform (within [`ALIGNMENT_EPSILON`]),
    /// and the verbatim CRS string. Nodata values may legitimately differ
    /// between products and are not part of alignment.
    #[must_use]
    pub fn alignment_mismatch(&self, other: &Self) -> Option<String> {
        if self.width != other.width || self.height != other.height {
            return Some(format!(
                "shape {}x{} vs {}x{}",
                self.width, self.height, other.width, other.height
            ));
        }
        if !self.transform.approx_eq(&other.transform, ALIGNMENT_EPSILON) {
            return Some(format!(
                "geotransform {:?} vs {:?}",
                self.transform, other.transform
            ));
        }
        if self.crs != other.crs {
            return Some(format!("crs {:?} vs {:?}", self.crs, other.crs));
        }
        None
    }

    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) out of bounds for {}x{}",
            self.width,
            self.height
        );
        y * self.width + x
    }
}
