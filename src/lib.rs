//! OpenFlights Ingest Library
//!
//! A Rust library for validating and ingesting OpenFlights-style airline,
//! airport, route and flight path records from loosely structured delimited
//! text, and for deriving route distance and carbon offset figures.
//!
//! This library provides tools for:
//! - Checking individual fields against the OpenFlights character rules
//! - Parsing raw lines into typed records while collecting every field error
//! - Ingesting whole batches without aborting on a bad line
//! - Computing great-circle route distances and the emissions chain
//! - Handing validated records to a persistence collaborator as field maps

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod airport_registry;
        pub mod batch_ingestor;
        pub mod emissions;
        pub mod field_validators;
        pub mod record_parser;
    }
    pub mod adapters {
        pub mod persistence;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Airline, Airport, DstCode, FlightPath, Record, RecordId, RecordKind, Route};
pub use app::services::batch_ingestor::{BatchIngestor, IngestReport, InvalidLine, UploadError};
pub use app::services::emissions::{EmissionsChain, RouteMetrics, haversine_distance_km};
pub use app::services::record_parser::{RecordParser, ValidationErrors, parse_record};
pub use config::Config;

/// Result type alias for the ingest library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for operations that can genuinely fail
///
/// Invalid input records are not errors: they are reported through
/// [`ValidationErrors`] and the ingestion report instead.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Configuration file could not be parsed
    #[error("Failed to parse configuration file '{path}': {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// No airport with the requested code exists in the lookup
    #[error("Airport not found: code = {code}")]
    AirportNotFound { code: String },

    /// More than one airport shares the requested code
    #[error("Airport code {code} matches {matches} airports")]
    AmbiguousAirportCode { code: String, matches: usize },

    /// A stored record with the given identity does not exist
    #[error("{kind} record not found: id = {id}")]
    RecordNotFound { kind: RecordKind, id: RecordId },

    /// Unknown record kind name
    #[error("Unknown record kind: {name}")]
    UnknownRecordKind { name: String },

    /// Report serialization failed
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// The record store rejected an upload partway through
    #[error("Upload incomplete after {stored} stored records: {source}")]
    UploadIncomplete {
        stored: usize,
        #[source]
        source: Box<Error>,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a configuration parse error
    pub fn config_parse(path: impl Into<String>, source: toml::de::Error) -> Self {
        Self::ConfigParse {
            path: path.into(),
            source,
        }
    }

    /// Create an airport not found error
    pub fn airport_not_found(code: impl Into<String>) -> Self {
        Self::AirportNotFound { code: code.into() }
    }

    /// Create an ambiguous airport code error
    pub fn ambiguous_airport_code(code: impl Into<String>, matches: usize) -> Self {
        Self::AmbiguousAirportCode {
            code: code.into(),
            matches,
        }
    }

    /// Create a record not found error
    pub fn record_not_found(kind: RecordKind, id: RecordId) -> Self {
        Self::RecordNotFound { kind, id }
    }

    /// Create an unknown record kind error
    pub fn unknown_record_kind(name: impl Into<String>) -> Self {
        Self::UnknownRecordKind { name: name.into() }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create an upload incomplete error
    pub fn upload_incomplete(stored: usize, source: Error) -> Self {
        Self::UploadIncomplete {
            stored,
            source: Box::new(source),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}
