//! Ingestion statistics

use crate::constants::SUCCESS_RATE_THRESHOLD;
use serde::Serialize;

/// Counters for one ingestion run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IngestStats {
    /// Lines examined, excluding the terminating blank line
    pub lines_read: usize,
    /// Lines that produced a record
    pub records_parsed: usize,
    /// Lines rejected by validation
    pub lines_rejected: usize,
    /// Blank lines passed over when blank lines do not end the input
    pub blank_lines_skipped: usize,
    /// 1-based number of the blank line that ended the input, if any
    pub stopped_at_line: Option<usize>,
}

impl IngestStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate success rate as a percentage of non-blank lines
    pub fn success_rate(&self) -> f64 {
        let attempted = self.records_parsed + self.lines_rejected;
        if attempted == 0 {
            0.0
        } else {
            (self.records_parsed as f64 / attempted as f64) * 100.0
        }
    }

    /// Check if ingestion was mostly successful (>90% success rate)
    pub fn is_successful(&self) -> bool {
        self.success_rate() > SUCCESS_RATE_THRESHOLD
    }

    pub fn stopped_early(&self) -> bool {
        self.stopped_at_line.is_some()
    }

    /// Combine the counters of another run, e.g. another file of the same upload
    pub fn merge(&mut self, other: &IngestStats) {
        self.lines_read += other.lines_read;
        self.records_parsed += other.records_parsed;
        self.lines_rejected += other.lines_rejected;
        self.blank_lines_skipped += other.blank_lines_skipped;
        self.stopped_at_line = self.stopped_at_line.or(other.stopped_at_line);
    }
}
