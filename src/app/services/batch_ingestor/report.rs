//! Ingestion results: the partition of valid records and rejected lines

use super::stats::IngestStats;
use crate::app::models::{Record, RecordKind};
use crate::app::services::record_parser::ValidationErrors;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// A rejected input line and why it was rejected
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvalidLine {
    /// 1-based position in the input
    pub line_number: usize,
    /// The line exactly as read
    pub line: String,
    /// The first error collected for the line
    pub message: String,
    /// Every error collected for the line
    pub errors: Vec<String>,
}

impl InvalidLine {
    pub fn new(line_number: usize, line: impl Into<String>, errors: &ValidationErrors) -> Self {
        Self {
            line_number,
            line: line.into(),
            message: errors.first().to_string(),
            errors: errors.messages(),
        }
    }
}

/// Diagnostic in the form `<line> (<first error>)`
impl fmt::Display for InvalidLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.line, self.message)
    }
}

/// Result of ingesting one batch of lines
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub kind: RecordKind,
    pub ingested_at: DateTime<Utc>,
    /// Valid records in input order
    pub records: Vec<Record>,
    /// Rejected lines in input order
    pub invalid_lines: Vec<InvalidLine>,
    pub stats: IngestStats,
}

impl IngestReport {
    /// Create an empty report for a record kind
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            ingested_at: Utc::now(),
            records: Vec::new(),
            invalid_lines: Vec::new(),
            stats: IngestStats::new(),
        }
    }

    pub(crate) fn with_record(mut self, record: Record) -> Self {
        self.stats.lines_read += 1;
        self.stats.records_parsed += 1;
        self.records.push(record);
        self
    }

    pub(crate) fn with_invalid_line(mut self, invalid: InvalidLine) -> Self {
        self.stats.lines_read += 1;
        self.stats.lines_rejected += 1;
        self.invalid_lines.push(invalid);
        self
    }

    pub(crate) fn with_blank_line(mut self) -> Self {
        self.stats.lines_read += 1;
        self.stats.blank_lines_skipped += 1;
        self
    }

    pub(crate) fn stopped_at(mut self, line_number: usize) -> Self {
        self.stats.stopped_at_line = Some(line_number);
        self
    }

    pub fn valid_count(&self) -> usize {
        self.records.len()
    }

    pub fn invalid_count(&self) -> usize {
        self.invalid_lines.len()
    }

    /// Invalid-line diagnostics, `<line> (<first error>)`, in input order
    pub fn diagnostics(&self) -> Vec<String> {
        self.invalid_lines.iter().map(ToString::to_string).collect()
    }

    /// Split into valid records and invalid-line diagnostics
    pub fn into_parts(self) -> (Vec<Record>, Vec<String>) {
        let diagnostics = self.diagnostics();
        (self.records, diagnostics)
    }

    /// Append another report of the same kind
    pub fn merge(&mut self, other: IngestReport) {
        self.records.extend(other.records);
        self.invalid_lines.extend(other.invalid_lines);
        self.stats.merge(&other.stats);
    }

    pub fn to_json(&self) -> crate::Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| crate::Error::serialization("Failed to serialize ingest report", e))
    }
}
