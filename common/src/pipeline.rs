//! One detection run: load the image, call the detector, annotate,
//! build the history record. GUI-free so the worker thread stays thin
//! and the whole flow is testable.

use std::path::Path;
use std::time::Instant;

use chrono::Local;
use log::info;

use crate::annotate::{self, NEGATIVE_CONFIDENCE};
use crate::detect::Detector;
use crate::error::Result;
use crate::history::{DetectionRecord, Outcome};
use crate::theme::ThemeTable;

pub fn run_scan(
    detector: &dyn Detector,
    image_path: &Path,
    theme: &ThemeTable,
) -> Result<DetectionRecord> {
    let started = Instant::now();

    let base = annotate::load_display_image(image_path)?;
    let detections = detector.detect(image_path)?;
    let elapsed = started.elapsed();

    let file_name = image_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    let record = if detections.is_empty() {
        info!("{file_name}: no tumor detected in {:.2}s", elapsed.as_secs_f64());
        DetectionRecord {
            timestamp,
            file_name,
            outcome: Outcome::Negative,
            confidence: NEGATIVE_CONFIDENCE,
            image: annotate::annotate_negative(&base, NEGATIVE_CONFIDENCE, theme),
            elapsed,
        }
    } else {
        let confidence = detections
            .iter()
            .map(|d| d.confidence)
            .fold(0.0f32, f32::max);
        info!(
            "{file_name}: {} region(s) detected in {:.2}s",
            detections.len(),
            elapsed.as_secs_f64()
        );
        DetectionRecord {
            timestamp,
            file_name,
            outcome: Outcome::Positive,
            confidence,
            image: annotate::annotate_positive(&base, &detections, theme),
            elapsed,
        }
    };

    Ok(record)
}
