//! Annotated result output.

use std::path::{Path, PathBuf};

use chrono::Local;
use image::RgbaImage;
use log::info;

use crate::error::{NeuroVisionError, Result};

/// `{basename}_result_{timestamp}.png` inside the results directory.
pub fn result_path(results_dir: &Path, source: &Path, timestamp: &str) -> PathBuf {
    let base = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("scan");
    results_dir.join(format!("{base}_result_{timestamp}.png"))
}

/// Write the annotated image as a PNG, creating the results directory
/// if needed. Returns the written path.
pub fn save_annotated(results_dir: &Path, source: &Path, image: &RgbaImage) -> Result<PathBuf> {
    std::fs::create_dir_all(results_dir)?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let path = result_path(results_dir, source, &timestamp);
    image
        .save(&path)
        .map_err(|e| NeuroVisionError::Save(format!("{}: {}", path.display(), e)))?;

    info!("results saved to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_path_format() {
        let path = result_path(
            Path::new("NeuroVision_Results"),
            Path::new("/scans/patient_042.jpg"),
            "20260830_141530",
        );
        assert_eq!(
            path,
            Path::new("NeuroVision_Results/patient_042_result_20260830_141530.png")
        );
    }

    #[test]
    fn test_result_path_no_extension() {
        let path = result_path(Path::new("out"), Path::new("scan"), "20260830_000000");
        assert_eq!(path, Path::new("out/scan_result_20260830_000000.png"));
    }
}
