//! NeuroVision Common Library
//!
//! Non-GUI core of the brain-MRI detection viewer: detector adapter,
//! overlay rendering, session history and theme tables. The desktop
//! binary wires these into an egui shell.

pub mod annotate;
pub mod color;
pub mod config;
pub mod detect;
pub mod error;
pub mod history;
pub mod pipeline;
pub mod report;
pub mod theme;

pub use color::Rgb;
pub use config::Config;
pub use detect::{CommandDetector, Detection, Detector};
pub use error::{NeuroVisionError, Result};
pub use history::{DetectionRecord, HistoryLedger, Outcome, SessionStats};
pub use theme::{ThemeKind, ThemeTable};
