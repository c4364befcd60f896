//! Data models for OpenFlights records
//!
//! This module contains the four record kinds the engine validates
//! (airlines, airports, routes and flight paths) and the closed [`Record`]
//! enum that the ingestor and persistence collaborators work with.

use crate::app::services::emissions::RouteMetrics;
use crate::constants::{COORDINATE_DECIMAL_PLACES, dst_codes};
use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub mod field_map;

pub use field_map::{FieldMap, FieldValue};

/// Identity assigned to a record by the persistence collaborator
pub type RecordId = i64;

// =============================================================================
// Record Kinds
// =============================================================================

/// The closed set of record kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RecordKind {
    Airline,
    Airport,
    Route,
    FlightPath,
}

impl RecordKind {
    /// Name of the table holding records of this kind
    pub fn type_name(self) -> &'static str {
        match self {
            RecordKind::Airline => "Airline",
            RecordKind::Airport => "Airport",
            RecordKind::Route => "Route",
            RecordKind::FlightPath => "FlightPath",
        }
    }

    /// Name of the table holding the upload sets of this kind
    pub fn set_name(self) -> &'static str {
        match self {
            RecordKind::Airline => "AirlineSet",
            RecordKind::Airport => "AirportSet",
            RecordKind::Route => "RouteSet",
            RecordKind::FlightPath => "FlightPathSet",
        }
    }
}

impl FromStr for RecordKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "airline" | "airlines" => Ok(RecordKind::Airline),
            "airport" | "airports" => Ok(RecordKind::Airport),
            "route" | "routes" => Ok(RecordKind::Route),
            "flightpath" | "flightpaths" | "flight-path" | "flight-paths" | "flight_path" => {
                Ok(RecordKind::FlightPath)
            }
            _ => Err(Error::unknown_record_kind(s)),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

// =============================================================================
// Daylight Savings Code
// =============================================================================

/// Daylight savings region of an airport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "char")]
pub enum DstCode {
    Europe,
    UsCanada,
    SouthAmerica,
    Australia,
    NewZealand,
    NotObserved,
    Unknown,
}

impl DstCode {
    /// Single-letter code as written in the data files
    pub fn as_char(self) -> char {
        match self {
            DstCode::Europe => dst_codes::EUROPE,
            DstCode::UsCanada => dst_codes::NORTH_AMERICA,
            DstCode::SouthAmerica => dst_codes::SOUTH_AMERICA,
            DstCode::Australia => dst_codes::AUSTRALIA,
            DstCode::NewZealand => dst_codes::NEW_ZEALAND,
            DstCode::NotObserved => dst_codes::NONE,
            DstCode::Unknown => dst_codes::UNKNOWN,
        }
    }

    /// Decode a single code letter (case-sensitive)
    pub fn from_char(code: char) -> Option<Self> {
        match code {
            dst_codes::EUROPE => Some(DstCode::Europe),
            dst_codes::NORTH_AMERICA => Some(DstCode::UsCanada),
            dst_codes::SOUTH_AMERICA => Some(DstCode::SouthAmerica),
            dst_codes::AUSTRALIA => Some(DstCode::Australia),
            dst_codes::NEW_ZEALAND => Some(DstCode::NewZealand),
            dst_codes::NONE => Some(DstCode::NotObserved),
            dst_codes::UNKNOWN => Some(DstCode::Unknown),
            _ => None,
        }
    }

    /// Decode a field that must hold exactly one code letter
    pub fn from_field(value: &str) -> Option<Self> {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => Self::from_char(code),
            _ => None,
        }
    }
}

impl From<DstCode> for char {
    fn from(code: DstCode) -> Self {
        code.as_char()
    }
}

impl fmt::Display for DstCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// =============================================================================
// Coordinate Helpers
// =============================================================================

/// Round half away from zero on the shortest decimal representation
///
/// Rounding the decimal text rather than `value * 10^places` keeps values
/// such as `118.255` rounding up to `118.26`, as a human reading the file
/// would expect.
pub fn round_half_up(value: f64, places: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let repr = value.abs().to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
    if frac_part.len() <= places {
        return value;
    }

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(places))
        .map(|b| b - b'0')
        .collect();

    if frac_part.as_bytes()[places] >= b'5' {
        let mut index = digits.len();
        loop {
            if index == 0 {
                digits.insert(0, 1);
                break;
            }
            index -= 1;
            if digits[index] == 9 {
                digits[index] = 0;
            } else {
                digits[index] += 1;
                break;
            }
        }
    }

    let split = digits.len() - places;
    let whole: String = digits[..split].iter().map(|d| char::from(b'0' + d)).collect();
    let fraction: String = digits[split..].iter().map(|d| char::from(b'0' + d)).collect();
    let text = if fraction.is_empty() {
        whole
    } else {
        format!("{}.{}", whole, fraction)
    };

    let rounded = text.parse::<f64>().unwrap_or(value.abs());
    if value.is_sign_negative() {
        -rounded
    } else {
        rounded
    }
}

/// Round a latitude or longitude to the stored precision
pub fn round_coordinate(value: f64) -> f64 {
    round_half_up(value, COORDINATE_DECIMAL_PLACES)
}

/// Format a coordinate pair for display, in the order given
pub fn format_coordinates(longitude: f64, latitude: f64) -> String {
    format!("{:.2}, {:.2}", longitude, latitude)
}

// =============================================================================
// Airline
// =============================================================================

/// An airline from the OpenFlights airlines data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Airline {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<RecordId>,

    pub name: String,

    /// Alternative name or code, `\N` when unknown
    pub alias: String,

    /// Two-letter IATA code, empty or `\N` when unknown
    pub iata: String,

    /// Three-letter ICAO code, empty or `\N` when unknown
    pub icao: String,

    pub call_sign: String,
    pub country: String,

    /// Whether the airline is, or was recently, operational
    pub recently_active: bool,
}

impl Airline {
    pub fn new(
        name: impl Into<String>,
        alias: impl Into<String>,
        iata: impl Into<String>,
        icao: impl Into<String>,
        call_sign: impl Into<String>,
        country: impl Into<String>,
        recently_active: bool,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            alias: alias.into(),
            iata: iata.into(),
            icao: icao.into(),
            call_sign: call_sign.into(),
            country: country.into(),
            recently_active,
        }
    }

    pub fn id(&self) -> Option<RecordId> {
        self.id
    }

    pub fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    /// Column values for the persistence layer
    pub fn field_map(&self) -> FieldMap {
        FieldMap::with_capacity(7)
            .with("Name", FieldValue::text(&self.name))
            .with("Alias", FieldValue::text(&self.alias))
            .with("IATA", FieldValue::text(&self.iata))
            .with("ICAO", FieldValue::text(&self.icao))
            .with("CallSign", FieldValue::text(&self.call_sign))
            .with("Country", FieldValue::text(&self.country))
            .with("RecentlyActive", FieldValue::Flag(self.recently_active))
    }
}

// =============================================================================
// Airport
// =============================================================================

/// An airport from the OpenFlights airports data
///
/// Latitude and longitude are stored rounded to two decimal places, and the
/// display coordinates string is recomputed whenever either changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Airport {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<RecordId>,

    pub name: String,
    pub city: String,
    pub country: String,

    /// Three-letter IATA code, empty or `\N` when unknown
    pub iata: String,

    /// Four-letter ICAO code, empty or `\N` when unknown
    pub icao: String,

    latitude: f64,
    longitude: f64,

    /// "longitude, latitude" with two decimals
    coordinates: String,

    /// Altitude in feet
    pub altitude: i32,

    /// Hours offset from UTC
    pub timezone: f32,

    pub dst: DstCode,

    /// Timezone in "tz" (Olson) format, e.g. "America/Los_Angeles"
    pub tz_database: String,
}

impl Airport {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
        iata: impl Into<String>,
        icao: impl Into<String>,
        latitude: f64,
        longitude: f64,
        altitude: i32,
        timezone: f32,
        dst: DstCode,
        tz_database: impl Into<String>,
    ) -> Self {
        let latitude = round_coordinate(latitude);
        let longitude = round_coordinate(longitude);
        Self {
            id: None,
            name: name.into(),
            city: city.into(),
            country: country.into(),
            iata: iata.into(),
            icao: icao.into(),
            latitude,
            longitude,
            coordinates: format_coordinates(longitude, latitude),
            altitude,
            timezone,
            dst,
            tz_database: tz_database.into(),
        }
    }

    pub fn id(&self) -> Option<RecordId> {
        self.id
    }

    pub fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Location as (latitude, longitude)
    pub fn location(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    pub fn coordinates(&self) -> &str {
        &self.coordinates
    }

    pub fn set_latitude(&mut self, latitude: f64) {
        self.latitude = round_coordinate(latitude);
        self.refresh_coordinates();
    }

    pub fn set_longitude(&mut self, longitude: f64) {
        self.longitude = round_coordinate(longitude);
        self.refresh_coordinates();
    }

    fn refresh_coordinates(&mut self) {
        self.coordinates = format_coordinates(self.longitude, self.latitude);
    }

    /// Column values for the persistence layer
    pub fn field_map(&self) -> FieldMap {
        FieldMap::with_capacity(11)
            .with("Name", FieldValue::text(&self.name))
            .with("City", FieldValue::text(&self.city))
            .with("Country", FieldValue::text(&self.country))
            .with("IATA", FieldValue::text(&self.iata))
            .with("ICAO", FieldValue::text(&self.icao))
            .with("Latitude", FieldValue::Real(self.latitude))
            .with("Longitude", FieldValue::Real(self.longitude))
            .with("Altitude", FieldValue::Integer(i64::from(self.altitude)))
            .with("TimeZone", FieldValue::Real(f64::from(self.timezone)))
            .with("DST", FieldValue::Text(self.dst.to_string()))
            .with("TzDatabaseTime", FieldValue::text(&self.tz_database))
    }
}

// =============================================================================
// Route
// =============================================================================

/// A route between two airports
///
/// Distance and the derived emissions fields stay zero until the route is
/// selected and its metrics are applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<RecordId>,

    /// IATA or ICAO code of the operating airline
    pub airline_code: String,

    /// IATA or ICAO code of the source airport
    pub source_airport_code: String,

    /// IATA or ICAO code of the destination airport
    pub destination_airport_code: String,

    /// Marketed by this airline but operated by another
    pub codeshare: bool,

    /// Number of stops, zero for direct flights
    pub stops: u32,

    /// Plane type codes, space separated
    pub plane_type_code: String,

    distance_km: f64,
    carbon_emissions_kg: f64,
    dollar_offset: f64,
    tree_equivalent: u64,
}

impl Route {
    pub fn new(
        airline_code: impl Into<String>,
        source_airport_code: impl Into<String>,
        destination_airport_code: impl Into<String>,
        codeshare: bool,
        stops: u32,
        plane_type_code: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            airline_code: airline_code.into(),
            source_airport_code: source_airport_code.into(),
            destination_airport_code: destination_airport_code.into(),
            codeshare,
            stops,
            plane_type_code: plane_type_code.into(),
            distance_km: 0.0,
            carbon_emissions_kg: 0.0,
            dollar_offset: 0.0,
            tree_equivalent: 0,
        }
    }

    pub fn id(&self) -> Option<RecordId> {
        self.id
    }

    pub fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Kilograms of CO2 per passenger
    pub fn carbon_emissions_kg(&self) -> f64 {
        self.carbon_emissions_kg
    }

    /// NZD needed to offset the emissions
    pub fn dollar_offset(&self) -> f64 {
        self.dollar_offset
    }

    pub fn tree_equivalent(&self) -> u64 {
        self.tree_equivalent
    }

    /// Attach computed distance and emissions figures
    pub fn apply_metrics(&mut self, metrics: &RouteMetrics) {
        self.distance_km = metrics.distance_km;
        self.carbon_emissions_kg = metrics.chain.emissions_kg;
        self.dollar_offset = metrics.chain.dollar_offset;
        self.tree_equivalent = metrics.chain.trees;
    }

    /// Reset derived figures to zero, as for an unselected route
    pub fn clear_metrics(&mut self) {
        self.distance_km = 0.0;
        self.carbon_emissions_kg = 0.0;
        self.dollar_offset = 0.0;
        self.tree_equivalent = 0;
    }

    pub fn has_metrics(&self) -> bool {
        self.distance_km != 0.0
    }

    /// Column values for the persistence layer
    pub fn field_map(&self) -> FieldMap {
        FieldMap::with_capacity(7)
            .with("Airline", FieldValue::text(&self.airline_code))
            .with("SourceAirport", FieldValue::text(&self.source_airport_code))
            .with(
                "DestinationAirport",
                FieldValue::text(&self.destination_airport_code),
            )
            .with("Codeshare", FieldValue::Flag(self.codeshare))
            .with("Stops", FieldValue::Integer(i64::from(self.stops)))
            .with("Equipment", FieldValue::text(&self.plane_type_code))
            .with("Distance", FieldValue::Real(self.distance_km))
    }
}

// =============================================================================
// Flight Path
// =============================================================================

/// A single waypoint of a flight path
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightPath {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<RecordId>,

    /// Waypoint type, e.g. "APT", "FIX", "VOR"
    pub path_type: String,

    /// Waypoint identifier, shared by every point of a path
    pub path_id: String,

    /// Altitude in feet
    pub altitude: i32,

    latitude: f64,
    longitude: f64,
}

impl FlightPath {
    pub fn new(
        path_type: impl Into<String>,
        path_id: impl Into<String>,
        altitude: i32,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            id: None,
            path_type: path_type.into(),
            path_id: path_id.into(),
            altitude,
            latitude: round_coordinate(latitude),
            longitude: round_coordinate(longitude),
        }
    }

    pub fn id(&self) -> Option<RecordId> {
        self.id
    }

    pub fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn set_latitude(&mut self, latitude: f64) {
        self.latitude = round_coordinate(latitude);
    }

    pub fn set_longitude(&mut self, longitude: f64) {
        self.longitude = round_coordinate(longitude);
    }

    /// Column values for the persistence layer
    pub fn field_map(&self) -> FieldMap {
        FieldMap::with_capacity(5)
            .with("Type", FieldValue::text(&self.path_type))
            .with("FlightPathId", FieldValue::text(&self.path_id))
            .with("Altitude", FieldValue::Integer(i64::from(self.altitude)))
            .with("Latitude", FieldValue::Real(self.latitude))
            .with("Longitude", FieldValue::Real(self.longitude))
    }
}

// =============================================================================
// Record Enumeration
// =============================================================================

/// Any validated record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Record {
    Airline(Airline),
    Airport(Airport),
    Route(Route),
    FlightPath(FlightPath),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Airline(_) => RecordKind::Airline,
            Record::Airport(_) => RecordKind::Airport,
            Record::Route(_) => RecordKind::Route,
            Record::FlightPath(_) => RecordKind::FlightPath,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().type_name()
    }

    pub fn id(&self) -> Option<RecordId> {
        match self {
            Record::Airline(airline) => airline.id(),
            Record::Airport(airport) => airport.id(),
            Record::Route(route) => route.id(),
            Record::FlightPath(path) => path.id(),
        }
    }

    pub fn set_id(&mut self, id: RecordId) {
        match self {
            Record::Airline(airline) => airline.set_id(id),
            Record::Airport(airport) => airport.set_id(id),
            Record::Route(route) => route.set_id(id),
            Record::FlightPath(path) => path.set_id(id),
        }
    }

    /// Column values for the persistence layer
    pub fn field_map(&self) -> FieldMap {
        match self {
            Record::Airline(airline) => airline.field_map(),
            Record::Airport(airport) => airport.field_map(),
            Record::Route(route) => route.field_map(),
            Record::FlightPath(path) => path.field_map(),
        }
    }

    pub fn as_airline(&self) -> Option<&Airline> {
        match self {
            Record::Airline(airline) => Some(airline),
            _ => None,
        }
    }

    pub fn as_airport(&self) -> Option<&Airport> {
        match self {
            Record::Airport(airport) => Some(airport),
            _ => None,
        }
    }

    pub fn as_route(&self) -> Option<&Route> {
        match self {
            Record::Route(route) => Some(route),
            _ => None,
        }
    }

    pub fn as_flight_path(&self) -> Option<&FlightPath> {
        match self {
            Record::FlightPath(path) => Some(path),
            _ => None,
        }
    }
}

impl From<Airline> for Record {
    fn from(airline: Airline) -> Self {
        Record::Airline(airline)
    }
}

impl From<Airport> for Record {
    fn from(airport: Airport) -> Self {
        Record::Airport(airport)
    }
}

impl From<Route> for Record {
    fn from(route: Route) -> Self {
        Record::Route(route)
    }
}

impl From<FlightPath> for Record {
    fn from(path: FlightPath) -> Self {
        Record::FlightPath(path)
    }
}
