//! Integration tests: resolving severity rasters from a directory.

use std::path::Path;

use fm40_update_raster::{DiscoverError, severity_files_for_years};

fn touch(dir: &Path, name: &str) {
    std::fs::write(dir.join(name), "stub").expect("create file");
}

#[test]
fn test_resolves_requested_years_in_order() {
    let dir = tempfile::tempdir().expect("create temp dir");
    touch(dir.path(), "mtbs_CA_2016.asc");
    touch(dir.path(), "mtbs_CA_2017.asc");
    touch(dir.path(), "mtbs_CA_2018.asc");

    let resolved = severity_files_for_years(dir.path(), &[2018, 2016]).expect("resolve succeeds");

    assert_eq!(resolved.len(), 2);
    assert_eq!(resolved[0].0, 2018);
    assert!(resolved[0].1.ends_with("mtbs_CA_2018.asc"));
    assert_eq!(resolved[1].0, 2016);
    assert!(resolved[1].1.ends_with("mtbs_CA_2016.asc"));
}

#[test]
fn test_non_raster_files_are_ignored() {
    let dir = tempfile::tempdir().expect("create temp dir");
    touch(dir.path(), "mtbs_2017.asc");
    touch(dir.path(), "readme.txt");
    touch(dir.path(), "mtbs_2017.tif");
    touch(dir.path(), "notes_without_year.md");

    let resolved = severity_files_for_years(dir.path(), &[2017]).expect("resolve succeeds");
    assert_eq!(resolved.len(), 1);
    assert!(resolved[0].1.ends_with("mtbs_2017.asc"));
}

#[test]
fn test_uppercase_extension_is_accepted() {
    let dir = tempfile::tempdir().expect("create temp dir");
    touch(dir.path(), "MTBS_2017.ASC");

    let resolved = severity_files_for_years(dir.path(), &[2017]).expect("resolve succeeds");
    assert!(resolved[0].1.ends_with("MTBS_2017.ASC"));
}

#[test]
fn test_missing_year_is_fatal() {
    let dir = tempfile::tempdir().expect("create temp dir");
    touch(dir.path(), "mtbs_2016.asc");

    let err = severity_files_for_years(dir.path(), &[2016, 2017]).unwrap_err();
    match err {
        DiscoverError::YearNotFound { year, .. } => assert_eq!(year, 2017),
        other => panic!("expected YearNotFound, got {other:?}"),
    }
}

#[test]
fn test_undated_raster_is_fatal() {
    // One undated .asc poisons the directory even when the requested
    // year itself is present.
    let dir = tempfile::tempdir().expect("create temp dir");
    touch(dir.path(), "mtbs_2016.asc");
    touch(dir.path(), "severity.asc");

    let err = severity_files_for_years(dir.path(), &[2016]).unwrap_err();
    match err {
        DiscoverError::UndatedFile { file } => assert_eq!(file, "severity.asc"),
        other => panic!("expected UndatedFile, got {other:?}"),
    }
}

#[test]
fn test_multiple_matches_prefer_first_by_name() {
    let dir = tempfile::tempdir().expect("create temp dir");
    touch(dir.path(), "mtbs_2017_b.asc");
    touch(dir.path(), "mtbs_2017_a.asc");

    let resolved = severity_files_for_years(dir.path(), &[2017]).expect("resolve succeeds");
    assert!(resolved[0].1.ends_with("mtbs_2017_a.asc"));
}

#[test]
fn test_missing_directory_is_an_io_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let absent = dir.path().join("nowhere");

    let err = severity_files_for_years(&absent, &[2017]).unwrap_err();
    assert!(matches!(err, DiscoverError::Io { .. }));
}
