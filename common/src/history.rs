//! Session history: an append-only ledger of detection runs and the
//! statistics derived from it.

use std::time::Duration;

use image::RgbaImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Positive,
    Negative,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Positive => "Positive",
            Outcome::Negative => "Negative",
        }
    }
}

/// One completed detection run. Immutable once appended.
#[derive(Debug, Clone)]
pub struct DetectionRecord {
    pub timestamp: String,
    pub file_name: String,
    pub outcome: Outcome,
    pub confidence: f32,
    pub image: RgbaImage,
    pub elapsed: Duration,
}

/// Append-only, session-scoped. Not a store: nothing is deduplicated or
/// evicted, and everything is lost on exit.
#[derive(Debug, Default)]
pub struct HistoryLedger {
    records: Vec<DetectionRecord>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: DetectionRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DetectionRecord> {
        self.records.get(index)
    }

    /// Ledger indices paired with records, newest first (display order).
    pub fn newest_first(&self) -> impl Iterator<Item = (usize, &DetectionRecord)> {
        self.records.iter().enumerate().rev()
    }

    /// Full O(n) recount; cheap at the scale of one interactive session.
    pub fn stats(&self) -> SessionStats {
        let total = self.records.len();
        let positive = self
            .records
            .iter()
            .filter(|r| r.outcome == Outcome::Positive)
            .count();
        SessionStats {
            positive,
            negative: total - positive,
            total,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub positive: usize,
    pub negative: usize,
    pub total: usize,
}
