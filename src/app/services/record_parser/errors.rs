//! Field-level diagnostics collected while parsing a record
//!
//! Invalid input is an expected outcome of parsing, so these types are
//! separate from the library [`Error`](crate::Error): a parser reports every
//! failing attribute of a line in input order and never aborts a batch.

use std::fmt;

/// A record attribute that can fail validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Name,
    Alias,
    Iata,
    Icao,
    CallSign,
    Country,
    RecentlyActive,
    City,
    Latitude,
    Longitude,
    Altitude,
    TimeZone,
    DaylightSavingsTime,
    TzDatabase,
    Airline,
    SourceAirport,
    DestinationAirport,
    Codeshare,
    Stops,
    Equipment,
    Type,
    Id,
}

impl Attribute {
    /// Human-readable label used in diagnostics
    pub fn label(self) -> &'static str {
        match self {
            Attribute::Name => "name",
            Attribute::Alias => "alias",
            Attribute::Iata => "IATA",
            Attribute::Icao => "ICAO",
            Attribute::CallSign => "call sign",
            Attribute::Country => "country",
            Attribute::RecentlyActive => "recently active",
            Attribute::City => "city",
            Attribute::Latitude => "latitude",
            Attribute::Longitude => "longitude",
            Attribute::Altitude => "altitude",
            Attribute::TimeZone => "time zone",
            Attribute::DaylightSavingsTime => "daylight savings time",
            Attribute::TzDatabase => "tz database",
            Attribute::Airline => "airline",
            Attribute::SourceAirport => "source airport",
            Attribute::DestinationAirport => "destination airport",
            Attribute::Codeshare => "codeshare",
            Attribute::Stops => "stops",
            Attribute::Equipment => "equipment",
            Attribute::Type => "type",
            Attribute::Id => "ID",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a single line was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum FieldError {
    /// The line has the wrong number of fields for its kind
    #[error("Invalid number of attributes")]
    AttributeCount,

    /// One attribute failed its validator
    #[error("Invalid {0}")]
    Invalid(Attribute),
}

/// Every error collected for one line, in attribute order
///
/// Never empty: a parser only produces this when at least one check failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// The shape error, which is always reported alone
    pub fn attribute_count() -> Self {
        Self {
            errors: vec![FieldError::AttributeCount],
        }
    }

    fn from_errors(errors: Vec<FieldError>) -> Option<Self> {
        (!errors.is_empty()).then_some(Self { errors })
    }

    /// The error reported for the line in batch diagnostics
    pub fn first(&self) -> FieldError {
        self.errors[0]
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn contains(&self, error: FieldError) -> bool {
        self.errors.contains(&error)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_shape_error(&self) -> bool {
        self.errors == [FieldError::AttributeCount]
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Runs every attribute check of a record without short-circuiting
#[derive(Debug, Default)]
pub(crate) struct FieldChecks {
    errors: Vec<FieldError>,
}

impl FieldChecks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `attribute` unless `valid`
    pub fn check(&mut self, valid: bool, attribute: Attribute) {
        if !valid {
            self.errors.push(FieldError::Invalid(attribute));
        }
    }

    /// Record a failure for `attribute` when a converted value is missing
    pub fn value<T>(&mut self, value: Option<T>, attribute: Attribute) -> Option<T> {
        self.check(value.is_some(), attribute);
        value
    }

    /// Fail with everything collected so far, if anything failed
    pub fn finish(self) -> Result<(), ValidationErrors> {
        match ValidationErrors::from_errors(self.errors) {
            Some(errors) => Err(errors),
            None => Ok(()),
        }
    }
}
