//! Route distance and carbon offset calculations
//!
//! Distance comes from the haversine great-circle formula. The emissions
//! chain then derives, strictly in order, the kilograms of CO2 per passenger,
//! the NZD cost of offsetting them and the number of trees that cost buys.

use crate::app::models::Route;
use crate::app::services::airport_registry::{AirportLocation, CoordinateLookup};
use crate::constants::{AVG_PASSENGER_CO2_KG_PER_KM, CO2_OFFSET_NZD_PER_KG, EARTH_RADIUS_KM};
use crate::Result;
use serde::Serialize;
use tracing::debug;

/// Great-circle distance in kilometres between two points given in degrees
pub fn haversine_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();
    let delta_lat = lat2 - lat1;
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    2.0 * a.sqrt().asin() * EARTH_RADIUS_KM
}

/// Kilograms of CO2 per passenger for a distance
pub fn emissions_kg(distance_km: f64) -> f64 {
    distance_km * AVG_PASSENGER_CO2_KG_PER_KM
}

/// NZD needed to offset an amount of CO2
pub fn dollar_offset(emissions_kg: f64) -> f64 {
    emissions_kg * CO2_OFFSET_NZD_PER_KG
}

/// Trees equivalent to an offset cost, any fraction counting as a whole tree
pub fn tree_equivalent(dollars: f64) -> u64 {
    dollars.ceil().max(0.0) as u64
}

/// The emissions-derived figures for one distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmissionsChain {
    pub emissions_kg: f64,
    pub dollar_offset: f64,
    pub trees: u64,
}

impl EmissionsChain {
    /// Run the full chain for a distance
    pub fn from_distance(distance_km: f64) -> Self {
        let emissions_kg = emissions_kg(distance_km);
        let dollar_offset = dollar_offset(emissions_kg);
        Self {
            emissions_kg,
            dollar_offset,
            trees: tree_equivalent(dollar_offset),
        }
    }
}

/// Distance plus the emissions chain for a route
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteMetrics {
    pub distance_km: f64,
    #[serde(flatten)]
    pub chain: EmissionsChain,
}

impl RouteMetrics {
    pub fn from_distance(distance_km: f64) -> Self {
        Self {
            distance_km,
            chain: EmissionsChain::from_distance(distance_km),
        }
    }

    /// Metrics for travel between two resolved airports
    pub fn between(source: &AirportLocation, destination: &AirportLocation) -> Self {
        Self::from_distance(haversine_distance_km(
            source.latitude,
            source.longitude,
            destination.latitude,
            destination.longitude,
        ))
    }
}

/// Resolve both airport codes and compute the metrics between them
pub fn route_metrics(
    source_code: &str,
    destination_code: &str,
    lookup: &impl CoordinateLookup,
) -> Result<RouteMetrics> {
    let source = lookup.lookup(source_code)?;
    let destination = lookup.lookup(destination_code)?;
    let metrics = RouteMetrics::between(&source, &destination);

    debug!(
        "{} ({}) -> {} ({}): {:.2} km",
        source_code, source.name, destination_code, destination.name, metrics.distance_km
    );
    Ok(metrics)
}

/// Select a route: a copy carrying its distance and emissions figures
pub fn select_route(route: &Route, lookup: &impl CoordinateLookup) -> Result<Route> {
    let metrics = route_metrics(
        &route.source_airport_code,
        &route.destination_airport_code,
        lookup,
    )?;
    let mut selected = route.clone();
    selected.apply_metrics(&metrics);
    Ok(selected)
}
