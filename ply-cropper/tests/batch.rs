mod common;

use common::xyz_rgb_file;
use ply_cropper::batch::{
    BatchConfig, FileOutcome, FileResult, discover_ply_files, process_file, run_batch,
};
use ply_cropper::{CropBounds, CropError, CropTransform, FormatError, NullReporter};
use std::fs;
use tempfile::tempdir;

fn config(source: &std::path::Path, dest: &std::path::Path) -> BatchConfig {
    BatchConfig {
        source_dir: source.to_path_buf(),
        dest_dir: dest.to_path_buf(),
        bounds: CropBounds::cube(1.0),
        jobs: Some(2),
        ..BatchConfig::default()
    }
}

#[test]
fn test_discover_filters_and_sorts() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    for name in ["b.ply", "a.ply", "notes.txt", ".hidden.ply"] {
        fs::write(root.join(name), b"").unwrap();
    }
    fs::create_dir(root.join("nested.ply")).unwrap();

    let files = discover_ply_files(root, "*.ply").unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec![".hidden.ply", "a.ply", "b.ply"]);
}

#[test]
fn test_discover_errors() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");
    assert!(matches!(
        discover_ply_files(&missing, "*.ply"),
        Err(CropError::MissingSource(_))
    ));
    assert!(matches!(
        discover_ply_files(dir.path(), "*.ply"),
        Err(CropError::NoInputFiles { .. })
    ));
}

#[test]
fn test_process_file_writes_output_and_creates_dirs() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("scene.ply");
    fs::write(
        &input,
        xyz_rgb_file(&[(0.0, 0.0, 0.0, [1, 1, 1]), (4.0, 0.0, 0.0, [2, 2, 2])]),
    )
    .unwrap();
    let output = dir.path().join("out").join("deep").join("scene.ply");

    let transform = CropTransform::new(CropBounds::cube(1.0));
    let outcome = process_file(&input, &output, &transform, &NullReporter).unwrap();

    let FileOutcome::Written(stats) = outcome else {
        panic!("expected a written file");
    };
    assert_eq!(stats.output_points, 1);
    assert_eq!(fs::metadata(&output).unwrap().len() as usize, stats.output_bytes);
}

#[test]
fn test_process_file_skips_empty_result() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("far.ply");
    fs::write(&input, xyz_rgb_file(&[(9.0, 9.0, 9.0, [0; 3])])).unwrap();
    let output = dir.path().join("out").join("far.ply");

    let transform = CropTransform::new(CropBounds::cube(1.0));
    let outcome = process_file(&input, &output, &transform, &NullReporter).unwrap();

    assert!(matches!(outcome, FileOutcome::Empty(_)));
    assert!(!output.exists());
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_process_file_reports_read_and_format_errors() {
    let dir = tempdir().unwrap();
    let transform = CropTransform::new(CropBounds::default());
    let output = dir.path().join("out.ply");

    let err = process_file(&dir.path().join("nope.ply"), &output, &transform, &NullReporter)
        .unwrap_err();
    assert!(matches!(err, CropError::Read { .. }));

    let garbage = dir.path().join("garbage.ply");
    fs::write(&garbage, b"\x00\x01\x02").unwrap();
    let err = process_file(&garbage, &output, &transform, &NullReporter).unwrap_err();
    assert!(matches!(
        err,
        CropError::Format(FormatError::MissingHeaderTerminator)
    ));
}

#[test]
fn test_batch_isolates_failures_and_writes_report() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("splats");
    let dest = dir.path().join("public");
    fs::create_dir(&source).unwrap();

    fs::write(
        source.join("a_room.ply"),
        xyz_rgb_file(&[(0.0, 0.0, 0.0, [1, 2, 3]), (0.5, 0.5, 0.5, [4, 5, 6])]),
    )
    .unwrap();
    fs::write(source.join("b_broken.ply"), b"ply\nelement vertex 3\n").unwrap();
    fs::write(
        source.join("c_far.ply"),
        xyz_rgb_file(&[(7.0, 7.0, 7.0, [0; 3])]),
    )
    .unwrap();

    let report_path = dir.path().join("reports").join("crop.json");
    let config = BatchConfig {
        report_path: Some(report_path.clone()),
        ..config(&source, &dest)
    };
    let summary = run_batch(&config, None).unwrap();

    assert_eq!(summary.total(), 3);
    assert_eq!(summary.written, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.empty, 1);
    assert!(matches!(summary.files[0].result, FileResult::Written(_)));
    assert!(matches!(summary.files[1].result, FileResult::Failed { .. }));
    assert!(matches!(summary.files[2].result, FileResult::Empty(_)));

    assert!(dest.join("a_room.ply").exists());
    assert!(!dest.join("b_broken.ply").exists());
    assert!(!dest.join("c_far.ply").exists());

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(report["written"], 1);
    assert_eq!(report["files"][0]["status"], "written");
    assert_eq!(report["files"][0]["output_points"], 2);
    assert_eq!(report["files"][2]["status"], "empty");
}

#[test]
fn test_batch_honours_pattern_and_no_sort() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("in");
    let dest = dir.path().join("out");
    fs::create_dir(&source).unwrap();
    let data = xyz_rgb_file(&[(0.1, 0.0, 0.0, [1; 3]), (0.2, 0.0, 0.0, [2; 3])]);
    fs::write(source.join("keep_1.ply"), &data).unwrap();
    fs::write(source.join("skip.ply"), &data).unwrap();

    let config = BatchConfig {
        pattern: "keep_*.ply".to_string(),
        sort_by_importance: false,
        ..config(&source, &dest)
    };
    let summary = run_batch(&config, None).unwrap();

    assert_eq!(summary.total(), 1);
    assert_eq!(fs::read(dest.join("keep_1.ply")).unwrap(), data);
    assert!(!dest.join("skip.ply").exists());
}

#[test]
fn test_batch_survives_file_with_huge_count_and_no_fields() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("in");
    let dest = dir.path().join("out");
    fs::create_dir(&source).unwrap();
    fs::write(
        source.join("a_hostile.ply"),
        b"ply\nelement vertex 100000000000000\nproperty list uchar int idx\nend_header\n",
    )
    .unwrap();
    fs::write(
        source.join("b_room.ply"),
        xyz_rgb_file(&[(0.0, 0.0, 0.0, [1; 3])]),
    )
    .unwrap();

    let summary = run_batch(&config(&source, &dest), None).unwrap();
    assert!(matches!(summary.files[0].result, FileResult::Empty(_)));
    assert!(matches!(summary.files[1].result, FileResult::Written(_)));
    assert!(dest.join("b_room.ply").exists());
}
