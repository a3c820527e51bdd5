use crate::error::{NeuroVisionError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub model_command: String,
    pub model_path: PathBuf,
    pub conf_threshold: f32,
    pub results_dir: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| NeuroVisionError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("neurovision").join("config.json"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_command: "yolo".into(),
            model_path: "best.pt".into(),
            conf_threshold: 0.25,
            results_dir: "NeuroVision_Results".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.model_path, PathBuf::from("best.pt"));
        assert_eq!(config.conf_threshold, 0.25);
        assert_eq!(config.results_dir, PathBuf::from("NeuroVision_Results"));
    }

    #[test]
    fn test_json_round_trip() {
        let config = Config {
            model_command: "onnx-infer".into(),
            model_path: "/models/tumor.onnx".into(),
            conf_threshold: 0.4,
            results_dir: "/tmp/results".into(),
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.model_command, "onnx-infer");
        assert_eq!(back.conf_threshold, 0.4);
    }
}
