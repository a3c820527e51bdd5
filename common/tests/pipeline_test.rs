//! Detection workflow tests against stub detectors.

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use tempfile::tempdir;

use neurovision_common::annotate::DISPLAY_SIZE;
use neurovision_common::pipeline::run_scan;
use neurovision_common::report::save_annotated;
use neurovision_common::theme::LIGHT_THEME;
use neurovision_common::{Detection, Detector, NeuroVisionError, Outcome, Result};

struct StubDetector {
    detections: Vec<Detection>,
}

impl Detector for StubDetector {
    fn detect(&self, _image: &Path) -> Result<Vec<Detection>> {
        Ok(self.detections.clone())
    }
}

struct FailingDetector;

impl Detector for FailingDetector {
    fn detect(&self, _image: &Path) -> Result<Vec<Detection>> {
        Err(NeuroVisionError::Inference("model crashed".into()))
    }
}

fn write_scan(dir: &Path) -> PathBuf {
    let path = dir.join("scan.png");
    let img = RgbaImage::from_pixel(64, 64, Rgba([90, 90, 90, 255]));
    img.save(&path).unwrap();
    path
}

#[test]
fn test_zero_boxes_yields_negative_record_with_image() {
    let dir = tempdir().unwrap();
    let scan = write_scan(dir.path());

    let detector = StubDetector { detections: vec![] };
    let record = run_scan(&detector, &scan, &LIGHT_THEME).unwrap();

    assert_eq!(record.outcome, Outcome::Negative);
    assert_eq!(record.confidence, 0.9);
    assert_eq!(record.file_name, "scan.png");
    assert_eq!(record.image.dimensions(), (DISPLAY_SIZE, DISPLAY_SIZE));
}

#[test]
fn test_boxes_yield_positive_record_with_max_confidence() {
    let dir = tempdir().unwrap();
    let scan = write_scan(dir.path());

    let detector = StubDetector {
        detections: vec![
            Detection { x: 50.0, y: 50.0, width: 40.0, height: 40.0, confidence: 0.71 },
            Detection { x: 200.0, y: 180.0, width: 60.0, height: 30.0, confidence: 0.93 },
        ],
    };
    let record = run_scan(&detector, &scan, &LIGHT_THEME).unwrap();

    assert_eq!(record.outcome, Outcome::Positive);
    assert_eq!(record.confidence, 0.93);
}

#[test]
fn test_detector_failure_propagates_without_record() {
    let dir = tempdir().unwrap();
    let scan = write_scan(dir.path());

    let result = run_scan(&FailingDetector, &scan, &LIGHT_THEME);
    assert!(matches!(result, Err(NeuroVisionError::Inference(_))));
}

#[test]
fn test_unreadable_image_is_a_load_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("not_an_image.dcm");
    std::fs::write(&path, b"DICM fake payload").unwrap();

    let detector = StubDetector { detections: vec![] };
    let result = run_scan(&detector, &path, &LIGHT_THEME);
    assert!(matches!(result, Err(NeuroVisionError::ImageLoad(_))));
}

#[test]
fn test_save_annotated_writes_png() {
    let dir = tempdir().unwrap();
    let scan = write_scan(dir.path());
    let results_dir = dir.path().join("results");

    let detector = StubDetector { detections: vec![] };
    let record = run_scan(&detector, &scan, &LIGHT_THEME).unwrap();

    let written = save_annotated(&results_dir, Path::new(&record.file_name), &record.image).unwrap();
    assert!(written.exists());
    let name = written.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("scan_result_"));
    assert!(name.ends_with(".png"));

    let back = image::open(&written).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (DISPLAY_SIZE, DISPLAY_SIZE));
}
