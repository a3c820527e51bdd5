//! Detector adapter.
//!
//! The pretrained model lives behind an external inference command; we
//! hand it the image path and read a JSON array of detections from
//! stdout. Zero detections is a valid negative outcome, not an error.

use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{NeuroVisionError, Result};

/// One bounding box with its confidence score, in pixel coordinates of
/// the source image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub confidence: f32,
}

pub trait Detector {
    /// Run inference on one image file. An empty vec means "no tumor".
    fn detect(&self, image: &Path) -> Result<Vec<Detection>>;
}

/// Production detector: spawns the configured inference command once per
/// run and parses its stdout. One-shot local call, no retries.
#[derive(Debug, Clone)]
pub struct CommandDetector {
    program: String,
    model_path: PathBuf,
    conf_threshold: f32,
}

impl CommandDetector {
    pub fn new(program: impl Into<String>, model_path: impl Into<PathBuf>, conf_threshold: f32) -> Self {
        Self {
            program: program.into(),
            model_path: model_path.into(),
            conf_threshold,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.model_command, &config.model_path, config.conf_threshold)
    }
}

impl Detector for CommandDetector {
    fn detect(&self, image: &Path) -> Result<Vec<Detection>> {
        if !image.exists() {
            return Err(NeuroVisionError::FileNotFound(image.display().to_string()));
        }

        let conf_arg = self.conf_threshold.to_string();
        debug!("spawning {} for {}", self.program, image.display());

        let output = Command::new(&self.program)
            .args([
                "--model",
                self.model_path.to_string_lossy().as_ref(),
                "--source",
                image.to_string_lossy().as_ref(),
                "--conf",
                conf_arg.as_str(),
                "--format",
                "json",
            ])
            .output()
            .map_err(|e| NeuroVisionError::Inference(format!("{}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(NeuroVisionError::Inference(format!(
                "{} failed (code {:?}): {}",
                self.program,
                output.status.code(),
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        debug!("inference output: {} chars", stdout.len());
        parse_detections(&stdout)
    }
}

/// Extract the JSON array from the inference output.
///
/// Priority: a ```json fenced block, then a raw `[...]` array.
pub fn extract_json(response: &str) -> Result<&str> {
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7;
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    if let Some(start) = response.find('[') {
        if let Some(end) = response.rfind(']') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(NeuroVisionError::InferenceParse("no JSON array in output".into()))
}

pub fn parse_detections(response: &str) -> Result<Vec<Detection>> {
    let json_str = extract_json(response)?;
    let detections: Vec<Detection> = serde_json::from_str(json_str.trim())
        .map_err(|e| NeuroVisionError::InferenceParse(e.to_string()))?;
    Ok(detections)
}
