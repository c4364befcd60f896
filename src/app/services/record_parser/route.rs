//! Route record parsing

use super::errors::{Attribute, FieldChecks, ValidationErrors};
use super::fields::parse_checked;
use crate::app::models::Route;
use crate::app::services::field_validators::{
    is_airline_code, is_airport_code, is_alpha_numeric, is_integer,
};
use crate::config::RouteLayout;

/// Parse the split fields of a raw routes.dat line
///
/// Lines in the short shape have no equipment column and get an empty
/// equipment code. Airline and airport id columns are ignored.
pub fn from_raw_fields(fields: &[&str], layout: &RouteLayout) -> Result<Route, ValidationErrors> {
    let column = |index: usize| fields.get(index).copied();
    let equipment = if fields.len() == layout.full_length {
        column(layout.equipment)
    } else if fields.len() == layout.short_length {
        Some("")
    } else {
        None
    };

    let (Some(airline), Some(source), Some(destination), Some(codeshare), Some(stops), Some(equipment)) = (
        column(layout.airline),
        column(layout.source_airport),
        column(layout.destination_airport),
        column(layout.codeshare),
        column(layout.stops),
        equipment,
    ) else {
        return Err(ValidationErrors::attribute_count());
    };

    from_attributes(&[airline, source, destination, codeshare, stops, equipment])
}

/// Validate airline, source, destination, codeshare, stops and equipment
pub fn from_attributes(attributes: &[&str]) -> Result<Route, ValidationErrors> {
    let &[airline, source, destination, codeshare, stops, equipment] = attributes else {
        return Err(ValidationErrors::attribute_count());
    };

    let mut checks = FieldChecks::new();
    checks.check(is_airline_code(airline), Attribute::Airline);
    checks.check(is_airport_code(source), Attribute::SourceAirport);
    checks.check(is_airport_code(destination), Attribute::DestinationAirport);
    let codeshare = checks.value(parse_codeshare(codeshare), Attribute::Codeshare);
    let stops = checks.value(parse_checked::<u32>(stops, is_integer), Attribute::Stops);
    checks.check(is_alpha_numeric(equipment), Attribute::Equipment);
    checks.finish()?;

    Ok(Route::new(
        airline,
        source,
        destination,
        codeshare.unwrap_or_default(),
        stops.unwrap_or_default(),
        equipment,
    ))
}

/// `Y` marks a codeshare; an empty field marks an operated route
fn parse_codeshare(value: &str) -> Option<bool> {
    match value {
        "Y" => Some(true),
        "" => Some(false),
        _ => None,
    }
}
