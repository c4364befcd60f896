//! Record parsers for OpenFlights data lines
//!
//! This module turns raw comma-separated lines, or attribute lists that are
//! already split, into typed records. Every attribute of a line is checked
//! so callers receive the complete list of problems, not just the first.
//!
//! ## Architecture
//!
//! - [`fields`] - Quote stripping, splitting and checked conversion
//! - [`errors`] - Per-attribute diagnostics
//! - [`airline`], [`airport`], [`route`], [`flight_path`] - One parser per kind
//!
//! ## Usage
//!
//! ```rust
//! use openflights_ingest::{RecordKind, parse_record};
//!
//! let record = parse_record(RecordKind::Route, "BA,1355,SIN,3316,MEL,3339,Y,0,744").unwrap();
//! assert_eq!(record.as_route().unwrap().destination_airport_code, "MEL");
//!
//! let errors = parse_record(RecordKind::Route, "BA,1355,SIN").unwrap_err();
//! assert_eq!(errors.first().to_string(), "Invalid number of attributes");
//! ```

pub mod airline;
pub mod airport;
pub mod errors;
pub mod fields;
pub mod flight_path;
pub mod route;

#[cfg(test)]
pub mod tests;

pub use errors::{Attribute, FieldError, ValidationErrors};

use crate::app::models::{Record, RecordKind};
use crate::config::{Config, RouteLayout};
use fields::{split_fields, strip_quotes};
use std::borrow::Cow;

/// Outcome of parsing one line
pub type ParseResult<T> = std::result::Result<T, ValidationErrors>;

/// Parser for every record kind, configured with line handling and layout
#[derive(Debug, Clone)]
pub struct RecordParser {
    strip_quotes: bool,
    route_layout: RouteLayout,
}

impl RecordParser {
    /// Create a parser from the ingestion settings of a configuration
    pub fn new(config: &Config) -> Self {
        Self {
            strip_quotes: config.ingest.strip_quotes,
            route_layout: config.route_layout.clone(),
        }
    }

    /// Parse one raw data line
    pub fn parse_line(&self, kind: RecordKind, line: &str) -> ParseResult<Record> {
        let cleaned = if self.strip_quotes {
            strip_quotes(line)
        } else {
            Cow::Borrowed(line)
        };
        let fields = split_fields(&cleaned);

        match kind {
            RecordKind::Airline => airline::from_raw_fields(&fields).map(Record::from),
            RecordKind::Airport => airport::from_raw_fields(&fields).map(Record::from),
            RecordKind::Route => route::from_raw_fields(&fields, &self.route_layout).map(Record::from),
            RecordKind::FlightPath => flight_path::from_raw_fields(&fields).map(Record::from),
        }
    }

    /// Validate attributes that were already split and stripped of index columns
    pub fn parse_attributes(&self, kind: RecordKind, attributes: &[&str]) -> ParseResult<Record> {
        match kind {
            RecordKind::Airline => airline::from_attributes(attributes).map(Record::from),
            RecordKind::Airport => airport::from_attributes(attributes).map(Record::from),
            RecordKind::Route => route::from_attributes(attributes).map(Record::from),
            RecordKind::FlightPath => flight_path::from_attributes(attributes).map(Record::from),
        }
    }
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

/// Parse one raw line with the default configuration
pub fn parse_record(kind: RecordKind, line: &str) -> ParseResult<Record> {
    RecordParser::default().parse_line(kind, line)
}
