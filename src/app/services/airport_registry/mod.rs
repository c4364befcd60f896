//! Airport registry for coordinate lookups by airport code
//!
//! The registry indexes validated airports by IATA code, with ICAO as a
//! fallback, and implements [`CoordinateLookup`] for route selection. A code
//! shared by several airports is kept and reported as ambiguous on lookup
//! rather than silently resolved to one of them.

use crate::app::models::{Airport, Record};
use crate::constants::NULL_MARKER;
use crate::{Error, Result};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Position and name of a resolved airport
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirportLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
}

impl From<&Airport> for AirportLocation {
    fn from(airport: &Airport) -> Self {
        Self {
            latitude: airport.latitude(),
            longitude: airport.longitude(),
            name: airport.name.clone(),
        }
    }
}

/// Resolves an airport code to exactly one location
pub trait CoordinateLookup {
    /// Look up a code, failing when it matches no airport or several
    fn lookup(&self, code: &str) -> Result<AirportLocation>;
}

/// In-memory airport index
#[derive(Debug, Clone, Default)]
pub struct AirportRegistry {
    airports: Vec<Airport>,
    by_iata: HashMap<String, Vec<usize>>,
    by_icao: HashMap<String, Vec<usize>>,
}

impl AirportRegistry {
    /// Create a new empty airport registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from airports
    pub fn from_airports(airports: impl IntoIterator<Item = Airport>) -> Self {
        let mut registry = Self::new();
        for airport in airports {
            registry.add(airport);
        }
        debug!(
            "Airport registry holds {} airports, {} IATA codes",
            registry.airport_count(),
            registry.by_iata.len()
        );
        registry
    }

    /// Build a registry from ingested records, ignoring other kinds
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        Self::from_airports(records.into_iter().filter_map(Record::as_airport).cloned())
    }

    /// Index an airport under its known codes
    pub fn add(&mut self, airport: Airport) {
        let index = self.airports.len();
        if is_known_code(&airport.iata) {
            index_code(&mut self.by_iata, &airport.iata, index, "IATA");
        }
        if is_known_code(&airport.icao) {
            index_code(&mut self.by_icao, &airport.icao, index, "ICAO");
        }
        self.airports.push(airport);
    }

    pub fn airport_count(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// Codes shared by more than one airport
    pub fn ambiguous_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self
            .by_iata
            .iter()
            .chain(self.by_icao.iter())
            .filter(|(_, indices)| indices.len() > 1)
            .map(|(code, _)| code.as_str())
            .collect();
        codes.sort_unstable();
        codes
    }

    /// Airports matching a code, IATA first then ICAO
    pub fn airports_with_code(&self, code: &str) -> Vec<&Airport> {
        let key = code.trim().to_uppercase();
        self.by_iata
            .get(&key)
            .or_else(|| self.by_icao.get(&key))
            .map(|indices| indices.iter().map(|&index| &self.airports[index]).collect())
            .unwrap_or_default()
    }
}

impl CoordinateLookup for AirportRegistry {
    fn lookup(&self, code: &str) -> Result<AirportLocation> {
        match self.airports_with_code(code).as_slice() {
            [] => Err(Error::airport_not_found(code)),
            [airport] => Ok(AirportLocation::from(*airport)),
            matches => Err(Error::ambiguous_airport_code(code, matches.len())),
        }
    }
}

fn is_known_code(code: &str) -> bool {
    !code.is_empty() && code != NULL_MARKER
}

fn index_code(index: &mut HashMap<String, Vec<usize>>, code: &str, position: usize, label: &str) {
    let entries = index.entry(code.to_uppercase()).or_default();
    if !entries.is_empty() {
        warn!("Duplicate {} code {} in airport data", label, code);
    }
    entries.push(position);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::DstCode;

    fn airport(name: &str, iata: &str, icao: &str, latitude: f64, longitude: f64) -> Airport {
        Airport::new(
            name,
            "City",
            "Country",
            iata,
            icao,
            latitude,
            longitude,
            0,
            0.0,
            DstCode::Unknown,
            "",
        )
    }

    fn create_test_registry() -> AirportRegistry {
        AirportRegistry::from_airports([
            airport("Goroka", "GKA", "AYGA", -6.081689, 145.391881),
            airport("Madang", "MAG", "AYMD", -5.207083, 145.7887),
            airport("No Code Strip", "", "\\N", 10.0, 10.0),
            airport("Twin One", "TWN", "TWN1", 1.0, 1.0),
            airport("Twin Two", "TWN", "TWN2", 2.0, 2.0),
        ])
    }

    #[test]
    fn test_lookup_by_iata() {
        let registry = create_test_registry();
        let location = registry.lookup("GKA").unwrap();
        assert_eq!(location.name, "Goroka");
        assert_eq!(location.latitude, -6.08);
        assert_eq!(location.longitude, 145.39);
    }

    #[test]
    fn test_lookup_is_case_insensitive_and_falls_back_to_icao() {
        let registry = create_test_registry();
        assert_eq!(registry.lookup("mag").unwrap().name, "Madang");
        assert_eq!(registry.lookup("AYMD").unwrap().name, "Madang");
        assert_eq!(registry.lookup("TWN2").unwrap().name, "Twin Two");
    }

    #[test]
    fn test_lookup_missing_code() {
        let registry = create_test_registry();
        let err = registry.lookup("XXX").unwrap_err();
        assert!(matches!(err, Error::AirportNotFound { .. }));
    }

    #[test]
    fn test_unknown_codes_are_not_indexed() {
        let registry = create_test_registry();
        assert!(registry.lookup("").is_err());
        assert!(registry.lookup("\\N").is_err());
        assert_eq!(registry.airport_count(), 5);
    }

    #[test]
    fn test_duplicate_code_is_ambiguous() {
        let registry = create_test_registry();
        let err = registry.lookup("TWN").unwrap_err();
        assert!(matches!(err, Error::AmbiguousAirportCode { matches: 2, .. }));
        assert_eq!(registry.ambiguous_codes(), vec!["TWN"]);
    }
}
