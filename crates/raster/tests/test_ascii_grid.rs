//! Integration tests: ASCII grid files on disk, including `.prj` sidecars.

use fm40_update_core::{CodeGrid, GeoTransform};
use fm40_update_raster::{DEFAULT_NODATA, RasterError, read_ascii_grid, write_ascii_grid};

const WKT: &str = "PROJCS[\"NAD83 / UTM zone 11N\"]";

fn write_fixture(dir: &std::path::Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn test_read_grid_with_sidecar() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_fixture(
        dir.path(),
        "fm40.asc",
        "ncols 3\nnrows 2\nxllcorner 500000\nyllcorner 4000000\ncellsize 30\nNODATA_value -9999\n\
         101 102 -9999\n141 142 143\n",
    );
    write_fixture(dir.path(), "fm40.prj", &format!("{WKT}\n"));

    let grid = read_ascii_grid(&path).expect("read succeeds");

    assert_eq!(grid.width(), 3);
    assert_eq!(grid.height(), 2);
    assert_eq!(grid.nodata(), -9999);
    assert_eq!(grid.cells(), &[101, 102, -9999, 141, 142, 143]);
    assert_eq!(grid.crs(), Some(WKT));

    // Two rows of 30 m cells above the lower-left corner.
    let transform = grid.transform();
    assert_eq!(transform.origin_x, 500_000.0);
    assert_eq!(transform.origin_y, 4_000_060.0);
    assert_eq!(transform.cell_size(), Some(30.0));
}

#[test]
fn test_read_without_sidecar_has_no_crs() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_fixture(
        dir.path(),
        "plain.asc",
        "ncols 1\nnrows 1\nxllcorner 0\nyllcorner 0\ncellsize 10\n7\n",
    );

    let grid = read_ascii_grid(&path).expect("read succeeds");
    assert_eq!(grid.crs(), None);
    assert_eq!(grid.nodata(), DEFAULT_NODATA);
    assert_eq!(grid.cells(), &[7]);
}

#[test]
fn test_write_then_read_preserves_the_grid() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("out.asc");

    let grid = CodeGrid::new(
        3,
        2,
        vec![101, -9999, 103, 121, 122, 123],
        -9999,
        GeoTransform::from_ll_corner(500_000.0, 4_000_000.0, 30.0, 2),
        Some(WKT.to_string()),
    );

    write_ascii_grid(&path, &grid).expect("write succeeds");
    let reread = read_ascii_grid(&path).expect("read succeeds");

    assert_eq!(reread, grid);
    assert!(path.with_extension("prj").exists(), "sidecar written");
}

#[test]
fn test_written_bytes_are_deterministic() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let grid = CodeGrid::new(
        2,
        2,
        vec![101, 102, -9999, 104],
        -9999,
        GeoTransform::from_ll_corner(100.0, 200.0, 30.0, 2),
        None,
    );

    let first = dir.path().join("a.asc");
    let second = dir.path().join("b.asc");
    write_ascii_grid(&first, &grid).expect("write a");
    write_ascii_grid(&second, &grid).expect("write b");

    let bytes_a = std::fs::read(&first).expect("read a");
    let bytes_b = std::fs::read(&second).expect("read b");
    assert_eq!(bytes_a, bytes_b);

    let expected = "ncols        2\n\
                    nrows        2\n\
                    xllcorner    100\n\
                    yllcorner    200\n\
                    cellsize     30\n\
                    NODATA_value -9999\n\
                    101 102\n\
                    -9999 104\n";
    assert_eq!(String::from_utf8(bytes_a).expect("utf8"), expected);
}

#[test]
fn test_write_rejects_rotated_transform() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let mut transform = GeoTransform::north_up(0.0, 0.0, 30.0);
    transform.row_rotation = 0.5;
    let grid = CodeGrid::new(1, 1, vec![101], -9999, transform, None);

    let err = write_ascii_grid(&dir.path().join("bad.asc"), &grid).unwrap_err();
    assert!(matches!(err, RasterError::UnsupportedTransform { .. }));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let err = read_ascii_grid(&dir.path().join("absent.asc")).unwrap_err();
    match err {
        RasterError::Io { path, .. } => {
            assert!(path.ends_with("absent.asc"), "unexpected path {path:?}");
        }
        other => panic!("expected Io, got {other:?}"),
    }
}

#[test]
fn test_truncated_data_is_a_cell_count_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_fixture(
        dir.path(),
        "short.asc",
        "ncols 2\nnrows 2\nxllcorner 0\nyllcorner 0\ncellsize 10\n1 2 3\n",
    );

    let err = read_ascii_grid(&path).unwrap_err();
    assert!(matches!(
        err,
        RasterError::CellCount {
            expected: 4,
            found: 3
        }
    ));
}
