//! Arc/Info ASCII grid codec with `.prj` sidecar handling.
//!
//! The format is six whitespace-separated header lines followed by the
//! cell values, rows running top to bottom. The `NODATA_value` line is
//! optional. A `.prj` file next to the raster carries the projection as
//! opaque WKT text.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use fm40_update_core::{CodeGrid, GeoTransform};
use tracing::debug;

use crate::error::RasterError;

/// Nodata marker assumed when the header omits `NODATA_value`.
pub const DEFAULT_NODATA: i32 = -9999;

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Read an Arc/Info ASCII grid into a [`CodeGrid`].
///
/// Header keys are matched case-insensitively. `xllcenter`/`yllcenter`
/// headers are converted to the corner convention by shifting half a
/// cell. If a `.prj` sidecar exists next to the raster, its contents
/// become the grid's CRS; otherwise the grid has none.
///
/// # Errors
///
/// Returns [`RasterError::Io`] when the file cannot be read, and the
/// header/cell variants when the content does not parse or the cell
/// count disagrees with the header.
pub fn read_ascii_grid(path: &Path) -> Result<CodeGrid, RasterError> {
    let contents = read_file(path)?;
    let (header, data_start) = parse_header(&contents)?;
    let cells = parse_cells(&contents, data_start, header.ncols * header.nrows)?;

    let transform = GeoTransform::from_ll_corner(
        header.xll_corner,
        header.yll_corner,
        header.cellsize,
        header.nrows,
    );
    let crs = read_prj_sidecar(path)?;

    debug!(
        path = %path.display(),
        ncols = header.ncols,
        nrows = header.nrows,
        nodata = header.nodata,
        has_crs = crs.is_some(),
        "read ascii grid"
    );
    Ok(CodeGrid::new(
        header.ncols,
        header.nrows,
        cells,
        header.nodata,
        transform,
        crs,
    ))
}

/// Resolved header values, in the corner convention.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AsciiHeader {
    ncols: usize,
    nrows: usize,
    xll_corner: f64,
    yll_corner: f64,
    cellsize: f64,
    nodata: i32,
}

/// Parse the header block. Returns the resolved header and the number of
/// lines it occupied, so cell parsing knows where to start.
fn parse_header(contents: &str) -> Result<(AsciiHeader, usize), RasterError> {
    let mut ncols: Option<i64> = None;
    let mut nrows: Option<i64> = None;
    let mut xll: Option<(f64, bool)> = None;
    let mut yll: Option<(f64, bool)> = None;
    let mut cellsize: Option<f64> = None;
    let mut nodata: Option<i32> = None;

    let mut consumed = 0_usize;
    for (idx, line) in contents.lines().enumerate() {
        let mut tokens = line.split_whitespace();
        let Some(key) = tokens.next() else {
            // Blank line before any data: treat as end of header.
            break;
        };
        let key = key.to_ascii_lowercase();
        if !matches!(
            key.as_str(),
            "ncols"
                | "nrows"
                | "xllcorner"
                | "xllcenter"
                | "yllcorner"
                | "yllcenter"
                | "cellsize"
                | "nodata_value"
        ) {
            break;
        }

        let malformed = || RasterError::MalformedHeader {
            line: idx + 1,
            content: line.trim().to_string(),
        };
        let value = tokens.next().ok_or_else(malformed)?;
        if tokens.next().is_some() {
            return Err(malformed());
        }

        match key.as_str() {
            "ncols" => ncols = Some(value.parse().map_err(|_| malformed())?),
            "nrows" => nrows = Some(value.parse().map_err(|_| malformed())?),
            "xllcorner" => xll = Some((value.parse().map_err(|_| malformed())?, false)),
            "xllcenter" => xll = Some((value.parse().map_err(|_| malformed())?, true)),
            "yllcorner" => yll = Some((value.parse().map_err(|_| malformed())?, false)),
            "yllcenter" => yll = Some((value.parse().map_err(|_| malformed())?, true)),
            "cellsize" => cellsize = Some(value.parse().map_err(|_| malformed())?),
            _ => nodata = Some(value.parse().map_err(|_| malformed())?),
        }
        consumed = idx + 1;
    }

    let missing = |field: &str| RasterError::MissingHeader {
        field: field.to_string(),
    };
    let ncols = ncols.ok_or_else(|| missing("ncols"))?;
    let nrows = nrows.ok_or_else(|| missing("nrows"))?;
    let (x, x_is_center) = xll.ok_or_else(|| missing("xllcorner"))?;
    let (y, y_is_center) = yll.ok_or_else(|| missing("yllcorner"))?;
    let cellsize = cellsize.ok_or_else(|| missing("cellsize"))?;

    if ncols <= 0 || nrows <= 0 || ncols.checked_mul(nrows).is_none() {
        return Err(RasterError::InvalidDimensions { ncols, nrows });
    }
    if cellsize <= 0.0 {
        return Err(RasterError::InvalidCellSize { value: cellsize });
    }

    let half = cellsize / 2.0;
    let header = AsciiHeader {
        ncols: ncols as usize,
        nrows: nrows as usize,
        xll_corner: if x_is_center { x - half } else { x },
        yll_corner: if y_is_center { y - half } else { y },
        cellsize,
        nodata: nodata.unwrap_or(DEFAULT_NODATA),
    };
    Ok((header, consumed))
}

/// Cap on the up-front cell reservation. The header's declared size is
/// unverified until the data section has been counted, so larger grids
/// start from this reservation and grow.
const CELL_RESERVE_LIMIT: usize = 1 << 20;

/// Parse the data section into exactly `expected` integer cells.
fn parse_cells(
    contents: &str,
    skip_lines: usize,
    expected: usize,
) -> Result<Vec<i32>, RasterError> {
    let mut cells = Vec::with_capacity(expected.min(CELL_RESERVE_LIMIT));
    for (idx, line) in contents.lines().enumerate().skip(skip_lines) {
        for token in line.split_whitespace() {
            let value = token.parse::<i32>().map_err(|_| RasterError::InvalidCell {
                line: idx + 1,
                token: token.to_string(),
            })?;
            cells.push(value);
        }
    }
    if cells.len() != expected {
        return Err(RasterError::CellCount {
            expected,
            found: cells.len(),
        });
    }
    Ok(cells)
}

fn read_file(path: &Path) -> Result<String, RasterError> {
    let io_err = |e: &std::io::Error| RasterError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };
    let file = File::open(path).map_err(|e| io_err(&e))?;
    let mut contents = String::new();
    BufReader::new(file)
        .read_to_string(&mut contents)
        .map_err(|e| io_err(&e))?;
    Ok(contents)
}

fn read_prj_sidecar(path: &Path) -> Result<Option<String>, RasterError> {
    let prj = path.with_extension("prj");
    if !prj.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(&prj).map_err(|e| RasterError::Io {
        path: prj.clone(),
        reason: e.to_string(),
    })?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Write a [`CodeGrid`] as an Arc/Info ASCII grid.
///
/// The header always includes `NODATA_value`. If the grid carries a CRS,
/// a `.prj` sidecar is written next to the raster. Output bytes are a
/// pure function of the grid, so repeated writes are identical.
///
/// # Errors
///
/// Returns [`RasterError::UnsupportedTransform`] when the grid is not
/// north-up with square pixels, and [`RasterError::Io`] when a file
/// cannot be written.
pub fn write_ascii_grid(path: &Path, grid: &CodeGrid) -> Result<(), RasterError> {
    let Some(cellsize) = grid.transform().cell_size() else {
        return Err(RasterError::UnsupportedTransform {
            reason: "only north-up grids with square pixels have a corner-plus-cellsize header"
                .to_string(),
        });
    };

    write_body(path, grid, cellsize).map_err(|e| RasterError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if let Some(crs) = grid.crs() {
        let prj = path.with_extension("prj");
        std::fs::write(&prj, format!("{crs}\n")).map_err(|e| RasterError::Io {
            path: prj,
            reason: e.to_string(),
        })?;
    }

    debug!(path = %path.display(), "wrote ascii grid");
    Ok(())
}

fn write_body(path: &Path, grid: &CodeGrid, cellsize: f64) -> std::io::Result<()> {
    let transform = grid.transform();
    let yll = transform.origin_y + transform.pixel_height * grid.height() as f64;

    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "ncols        {}", grid.width())?;
    writeln!(out, "nrows        {}", grid.height())?;
    writeln!(out, "xllcorner    {}", transform.origin_x)?;
    writeln!(out, "yllcorner    {yll}")?;
    writeln!(out, "cellsize     {cellsize}")?;
    writeln!(out, "NODATA_value {}", grid.nodata())?;

    for row in grid.cells().chunks(grid.width()) {
        for (i, value) in row.iter().enumerate() {
            if i > 0 {
                out.write_all(b" ")?;
            }
            write!(out, "{value}")?;
        }
        out.write_all(b"\n")?;
    }
    out.flush()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
