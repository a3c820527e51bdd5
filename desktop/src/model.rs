use std::path::PathBuf;

use neurovision_common::{HistoryLedger, ThemeKind};

/// All mutable UI-facing state, owned and mutated by the UI thread only.
#[derive(Debug, Default)]
pub struct AppState {
    pub image_path: Option<PathBuf>,
    pub busy: bool,
    pub ledger: HistoryLedger,
    pub theme: ThemeKind,
    /// Ledger index of the record shown in the result panel.
    pub result_index: Option<usize>,
}

impl AppState {
    /// Claim the single detection slot. Returns false (a no-op for the
    /// caller) while a run is in flight or no image is loaded.
    pub fn begin_scan(&mut self) -> bool {
        if self.busy || self.image_path.is_none() {
            return false;
        }
        self.busy = true;
        true
    }

    pub fn finish_scan(&mut self) {
        self.busy = false;
    }

    pub fn can_save(&self) -> bool {
        self.result_index.is_some()
    }

    pub fn clear_image(&mut self) {
        self.image_path = None;
        self.result_index = None;
    }
}
