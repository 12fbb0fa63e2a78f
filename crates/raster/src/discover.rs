//! Locating per-year burn severity rasters on disk.
//!
//! Severity directories hold one `.asc` raster per fire year, with the
//! year embedded somewhere in the file name (`mtbs_CA_2017.asc`). Every
//! raster in the directory must carry a year, so a stray undated file is
//! an error rather than a silently skipped input.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::DiscoverError;

/// Extract the fire year from a file name: the first run of four
/// consecutive ASCII digits.
#[must_use]
pub fn extract_year(name: &str) -> Option<u16> {
    let bytes = name.as_bytes();
    let start = bytes.windows(4).position(|w| w.iter().all(u8::is_ascii_digit))?;
    name.get(start..start + 4)?.parse().ok()
}

/// Resolve one severity raster per requested year.
///
/// Scans `dir` for `.asc` files (extension matched case-insensitively),
/// dates each by [`extract_year`], and pairs every requested year with
/// its raster, preserving the order of `years`. When several files carry
/// the same year, the lexicographically first is used and a warning is
/// logged.
///
/// # Errors
///
/// Returns [`DiscoverError::Io`] when the directory cannot be scanned,
/// [`DiscoverError::UndatedFile`] when any `.asc` file has no year in
/// its name, and [`DiscoverError::YearNotFound`] when a requested year
/// has no raster.
pub fn severity_files_for_years(
    dir: &Path,
    years: &[u16],
) -> Result<Vec<(u16, PathBuf)>, DiscoverError> {
    let io_err = |e: &std::io::Error| DiscoverError::Io {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| io_err(&e))? {
        let path = entry.map_err(|e| io_err(&e))?.path();
        let is_asc = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("asc"));
        if is_asc && path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    let mut dated = Vec::with_capacity(files.len());
    for path in files {
        let Some(name) = path.file_name().and_then(std::ffi::OsStr::to_str) else {
            return Err(DiscoverError::UndatedFile {
                file: path.display().to_string(),
            });
        };
        let Some(year) = extract_year(name) else {
            return Err(DiscoverError::UndatedFile {
                file: name.to_string(),
            });
        };
        dated.push((year, path));
    }

    let mut resolved = Vec::with_capacity(years.len());
    for &year in years {
        let mut matches = dated.iter().filter(|(y, _)| *y == year).map(|(_, p)| p);
        let Some(first) = matches.next() else {
            return Err(DiscoverError::YearNotFound {
                year,
                dir: dir.to_path_buf(),
            });
        };
        let extra = matches.count();
        if extra > 0 {
            warn!(
                year,
                chosen = %first.display(),
                extra,
                "multiple severity rasters match the year; using the first by name"
            );
        }
        resolved.push((year, first.clone()));
    }

    debug!(count = resolved.len(), "resolved severity rasters");
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_year_from_common_names() {
        assert_eq!(extract_year("mtbs_CA_2017.asc"), Some(2017));
        assert_eq!(extract_year("2016.asc"), Some(2016));
        assert_eq!(extract_year("severity-1999-v2.asc"), Some(1999));
    }

    #[test]
    fn test_extract_year_takes_the_first_run() {
        assert_eq!(extract_year("mtbs_2016_to_2018.asc"), Some(2016));
        // A longer digit run still yields its leading four digits.
        assert_eq!(extract_year("scene_20170615.asc"), Some(2017));
    }

    #[test]
    fn test_extract_year_needs_four_consecutive_digits() {
        assert_eq!(extract_year("severity.asc"), None);
        assert_eq!(extract_year("v1_2_3_4.asc"), None);
        assert_eq!(extract_year("970.asc"), None);
    }
}
