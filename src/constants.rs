//! Application constants for the OpenFlights ingest engine
//!
//! This module contains record shapes, marker values, physical constants
//! and emission factors used throughout the library.

// =============================================================================
// Record Shapes
// =============================================================================

/// Placeholder OpenFlights uses for an unknown value
pub const NULL_MARKER: &str = "\\N";

/// Raw airline line: index column plus seven domain fields
pub const AIRLINE_RECORD_LENGTH: usize = 8;

/// Raw airport line when the city contains an embedded comma
pub const AIRPORT_RECORD_LENGTH: usize = 13;

/// Raw airport line in its regular shape
pub const AIRPORT_RECORD_LENGTH_REGULAR: usize = AIRPORT_RECORD_LENGTH - 1;

/// Raw route line in its full shape
pub const ROUTE_RECORD_LENGTH: usize = 9;

/// Raw flight path line
pub const FLIGHT_PATH_RECORD_LENGTH: usize = 5;

/// Decimal places kept for latitude and longitude values
pub const COORDINATE_DECIMAL_PLACES: usize = 2;

// =============================================================================
// Airport Attribute Ranges
// =============================================================================

/// Daylight savings codes as used by the OpenFlights airport data
pub mod dst_codes {
    /// Europe
    pub const EUROPE: char = 'E';
    /// US/Canada
    pub const NORTH_AMERICA: char = 'A';
    /// South America
    pub const SOUTH_AMERICA: char = 'S';
    /// Australia
    pub const AUSTRALIA: char = 'O';
    /// New Zealand
    pub const NEW_ZEALAND: char = 'Z';
    /// None
    pub const NONE: char = 'N';
    /// Unknown
    pub const UNKNOWN: char = 'U';

    pub const ALL: &[char] = &[
        EUROPE,
        NORTH_AMERICA,
        SOUTH_AMERICA,
        AUSTRALIA,
        NEW_ZEALAND,
        NONE,
        UNKNOWN,
    ];
}

/// Lowest accepted UTC offset in hours
pub const MIN_TIMEZONE_OFFSET: f64 = -12.0;

/// Highest accepted UTC offset in hours
pub const MAX_TIMEZONE_OFFSET: f64 = 14.0;

// =============================================================================
// Distance and Emissions
// =============================================================================

/// Mean Earth radius used by the haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Average CO2 emitted per passenger per kilometre, reference aircraft at 65% capacity
pub const AVG_PASSENGER_CO2_KG_PER_KM: f64 = 0.115;

/// Cost in NZD to offset one kilogram of CO2
pub const CO2_OFFSET_NZD_PER_KG: f64 = 0.01479;

// =============================================================================
// Configuration Defaults
// =============================================================================

/// Directory name under the user config directory
pub const CONFIG_DIR_NAME: &str = "openflights-ingest";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Success rate above which an ingestion counts as mostly successful
pub const SUCCESS_RATE_THRESHOLD: f64 = 90.0;
