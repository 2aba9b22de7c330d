use std::fs;
use std::path::Path;

use apa_series::config::{PanelSpec, SeriesConfig};
use apa_series::core::naming::{inter_name, intra_name};
use apa_series::{ApaError, compose_series, compose_series_with};
use ndarray::Array2;
use ndarray_npy::write_npy;

/// Square test matrix with a bright centre and a dim background.
fn apa_matrix(n: usize, peak: f64) -> Array2<f64> {
    let mut m = Array2::from_shape_fn((n, n), |(r, c)| 0.2 + 0.01 * ((r + c) % 5) as f64);
    m[[n / 2, n / 2]] = peak;
    m
}

fn write_series(dir: &Path, stem: &str, with_inter: bool) -> String {
    let stem = format!("{}/{}", dir.display(), stem);
    for k in 0..8 {
        write_npy(intra_name(&stem, k), &apa_matrix(21, 1.0 + k as f64)).unwrap();
    }
    if with_inter {
        write_npy(inter_name(&stem), &apa_matrix(21, 0.5)).unwrap();
    }
    stem
}

#[test]
fn writes_non_empty_png() {
    let dir = tempfile::tempdir().unwrap();
    let stem = write_series(dir.path(), "test_", true);
    let out = dir.path().join("out.png");

    compose_series(&stem, &out).unwrap();

    let bytes = fs::read(&out).unwrap();
    assert!(!bytes.is_empty());
    assert_eq!(&bytes[1..4], b"PNG");
}

#[test]
fn missing_inter_file_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let stem = write_series(dir.path(), "test_", false);
    let out = dir.path().join("out.png");

    let err = compose_series(&stem, &out).unwrap_err();
    match err {
        ApaError::Load { path, .. } => assert_eq!(path, Path::new(&inter_name(&stem))),
        other => panic!("expected load error, got {other:?}"),
    }
    assert!(!out.exists());
}

#[test]
fn missing_inputs_win_over_bad_extension() {
    let dir = tempfile::tempdir().unwrap();
    let stem = format!("{}/none_", dir.path().display());
    let err = compose_series(&stem, dir.path().join("out.eps")).unwrap_err();
    assert!(matches!(err, ApaError::Load { .. }));
}

#[test]
fn unsupported_extension_is_rejected_after_loading() {
    let dir = tempfile::tempdir().unwrap();
    let stem = write_series(dir.path(), "test_", true);
    let out = dir.path().join("out.eps");

    let err = compose_series(&stem, &out).unwrap_err();
    assert!(matches!(err, ApaError::UnsupportedFormat { .. }));
    assert!(!out.exists());
}

#[test]
fn writes_svg() {
    let dir = tempfile::tempdir().unwrap();
    let stem = write_series(dir.path(), "test_", true);
    let out = dir.path().join("out.svg");

    compose_series(&stem, &out).unwrap();

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("<svg"));
    assert!(text.contains("APA score: "));
    assert!(text.contains("0.5MB-1MB"));
    assert!(text.contains("64MB-128MB"));
    assert!(text.contains("INTER"));
}

#[test]
fn writes_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let stem = write_series(dir.path(), "test_", true);
    let out = dir.path().join("out.pdf");

    compose_series(&stem, &out).unwrap();

    let bytes = fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn path_without_extension_gets_png_suffix() {
    let dir = tempfile::tempdir().unwrap();
    let stem = write_series(dir.path(), "test_", true);

    compose_series(&stem, dir.path().join("out")).unwrap();

    let png = dir.path().join("out.png");
    let bytes = fs::read(&png).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
    assert!(!dir.path().join("out").exists());
}

#[test]
fn rerun_overwrites_with_identical_output() {
    let dir = tempfile::tempdir().unwrap();
    let stem = write_series(dir.path(), "test_", true);
    let out = dir.path().join("out.png");

    compose_series(&stem, &out).unwrap();
    let first = fs::read(&out).unwrap();
    compose_series(&stem, &out).unwrap();
    let second = fs::read(&out).unwrap();

    assert!(!second.is_empty());
    assert_eq!(first, second);
}

#[test]
fn tiny_matrices_render_without_error() {
    let dir = tempfile::tempdir().unwrap();
    let stem = format!("{}/tiny_", dir.path().display());
    for k in 0..8 {
        write_npy(intra_name(&stem, k), &Array2::<f64>::ones((2, 2))).unwrap();
    }
    write_npy(inter_name(&stem), &Array2::<f64>::ones((3, 3))).unwrap();
    let out = dir.path().join("tiny.svg");

    compose_series(&stem, &out).unwrap();

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("APA score: nan"));
}

#[test]
fn custom_panel_sequence_only_needs_its_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let stem = format!("{}/pair_", dir.path().display());
    write_npy(intra_name(&stem, 2), &apa_matrix(12, 3.0)).unwrap();
    write_npy(inter_name(&stem), &apa_matrix(12, 1.0)).unwrap();

    let config = SeriesConfig {
        panels: vec![PanelSpec::Intra { index: 2 }, PanelSpec::Inter],
        ..SeriesConfig::default()
    };
    let out = dir.path().join("pair.svg");
    compose_series_with(&stem, &out, &config).unwrap();

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("2MB-4MB"));
    assert!(text.contains("INTER"));
}
