//! Error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NeuroVisionError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Image load error: {0}")]
    ImageLoad(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Inference output parse error: {0}")]
    InferenceParse(String),

    #[error("Save error: {0}")]
    Save(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NeuroVisionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = NeuroVisionError::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let error = NeuroVisionError::Json(json_error);
        let display = format!("{}", error);
        assert!(display.contains("JSON error"));
    }

    #[test]
    fn test_error_display_inference() {
        let error = NeuroVisionError::Inference("model exited with code 1".to_string());
        let display = format!("{}", error);
        assert_eq!(display, "Inference error: model exited with code 1");
    }
}
