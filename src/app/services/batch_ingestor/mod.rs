//! Batch ingestion of OpenFlights data lines
//!
//! The ingestor parses every line of a batch independently and partitions
//! the results into valid records and rejected lines. A bad line never stops
//! the batch; only a blank line ends the input early (unless configured
//! otherwise).
//!
//! ## Usage
//!
//! ```rust
//! use openflights_ingest::{BatchIngestor, Config, RecordKind};
//!
//! let ingestor = BatchIngestor::new(&Config::default());
//! let report = ingestor.ingest(
//!     ["FIX,ATMAP,35000,-12,118.255", "F1X,ATMAP,35000,-12,118.255"],
//!     RecordKind::FlightPath,
//! );
//!
//! assert_eq!(report.valid_count(), 1);
//! assert_eq!(
//!     report.diagnostics(),
//!     vec!["F1X,ATMAP,35000,-12,118.255 (Invalid type)"]
//! );
//! ```

pub mod report;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use report::{IngestReport, InvalidLine};
pub use stats::IngestStats;

use crate::app::adapters::persistence::RecordStore;
use crate::app::models::RecordKind;
use crate::app::services::record_parser::RecordParser;
use crate::config::Config;
use crate::{Error, Result};
use std::io::BufRead;
use std::ops::ControlFlow;
use tracing::{debug, info, warn};

/// Partitions batches of raw lines into valid records and rejected lines
#[derive(Debug, Clone)]
pub struct BatchIngestor {
    parser: RecordParser,
    blank_line_terminates: bool,
}

impl Default for BatchIngestor {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl BatchIngestor {
    /// Create a new ingestor from configuration
    pub fn new(config: &Config) -> Self {
        Self {
            parser: RecordParser::new(config),
            blank_line_terminates: config.ingest.blank_line_terminates,
        }
    }

    /// Ingest lines of one record kind, in order
    pub fn ingest<I, S>(&self, lines: I, kind: RecordKind) -> IngestReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let outcome = lines.into_iter().enumerate().try_fold(
            IngestReport::new(kind),
            |report, (index, line)| self.fold_line(report, index + 1, line.as_ref()),
        );
        let report = match outcome {
            ControlFlow::Continue(report) | ControlFlow::Break(report) => report,
        };

        info!(
            "Ingested {} {} records, rejected {} lines ({:.1}% success)",
            report.valid_count(),
            kind,
            report.invalid_count(),
            report.stats.success_rate()
        );
        report
    }

    fn fold_line(
        &self,
        report: IngestReport,
        line_number: usize,
        line: &str,
    ) -> ControlFlow<IngestReport, IngestReport> {
        if line.trim().is_empty() {
            if self.blank_line_terminates {
                warn!("Blank line {} ends the input", line_number);
                return ControlFlow::Break(report.stopped_at(line_number));
            }
            return ControlFlow::Continue(report.with_blank_line());
        }

        match self.parser.parse_line(report.kind, line) {
            Ok(record) => ControlFlow::Continue(report.with_record(record)),
            Err(errors) => {
                debug!("Rejected line {}: {}", line_number, errors);
                let invalid = InvalidLine::new(line_number, line, &errors);
                ControlFlow::Continue(report.with_invalid_line(invalid))
            }
        }
    }

    /// Ingest every line a reader yields
    ///
    /// Lines are read lazily, so nothing past a terminating blank line is
    /// read. Bytes that are not valid UTF-8 are replaced with U+FFFD and the
    /// line is validated like any other. Only a failing reader is an error.
    pub fn ingest_reader<R: BufRead>(&self, reader: R, kind: RecordKind) -> Result<IngestReport> {
        let mut read_error = None;
        let lines = reader.split(b'\n').map_while(|bytes| match bytes {
            Ok(bytes) => Some(decode_line(&bytes)),
            Err(e) => {
                read_error = Some(e);
                None
            }
        });
        let report = self.ingest(lines, kind);

        match read_error {
            Some(e) => Err(Error::io("Failed to read ingest input", e)),
            None => Ok(report),
        }
    }

    /// Ingest lines and store every valid record as a member of `set_name`
    ///
    /// Stored records carry the identity the store assigned. Invalid lines
    /// are reported exactly as [`ingest`](Self::ingest) reports them. The
    /// store is not rolled back when an insert fails: the returned
    /// [`UploadError`] carries the report, in which the first `stored`
    /// records have identities and the rest have none.
    pub fn upload<I, S>(
        &self,
        lines: I,
        kind: RecordKind,
        set_name: &str,
        store: &mut impl RecordStore,
    ) -> std::result::Result<IngestReport, UploadError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = self.ingest(lines, kind);
        let total = report.valid_count();
        for stored in 0..total {
            match store.insert(set_name, &report.records[stored]) {
                Ok(id) => report.records[stored].set_id(id),
                Err(source) => {
                    warn!(
                        "Upload to set {} failed after {} of {} records",
                        set_name, stored, total
                    );
                    return Err(UploadError {
                        stored,
                        report,
                        source,
                    });
                }
            }
        }

        info!(
            "Uploaded {} {} records to set {}",
            report.valid_count(),
            kind,
            set_name
        );
        Ok(report)
    }
}

/// An upload the store rejected partway through
#[derive(thiserror::Error, Debug)]
#[error("Upload stopped after storing {stored} records: {source}")]
pub struct UploadError {
    /// Number of leading records that were stored
    pub stored: usize,
    /// The full ingest report, identities assigned up to `stored`
    pub report: IngestReport,
    #[source]
    pub source: Error,
}

impl From<UploadError> for Error {
    fn from(error: UploadError) -> Self {
        Error::upload_incomplete(error.stored, error.source)
    }
}

/// Decode one raw line, replacing invalid UTF-8 and dropping a trailing CR
fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}
