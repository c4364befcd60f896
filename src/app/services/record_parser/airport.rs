//! Airport record parsing

use super::errors::{Attribute, FieldChecks, ValidationErrors};
use super::fields::parse_checked;
use crate::app::models::{Airport, DstCode};
use crate::app::services::field_validators::{
    is_airport_iata, is_airport_icao, is_alpha_multi_language, is_float, is_integer,
    is_valid_time_zone, is_valid_tz_database,
};
use crate::constants::{AIRPORT_RECORD_LENGTH, AIRPORT_RECORD_LENGTH_REGULAR};

/// Raw column holding the city, which may itself contain a comma
const CITY_COLUMN: usize = 2;

/// Parse the split fields of a raw airports.dat line
///
/// A 13-field line is a city with an embedded comma: the two city pieces
/// are joined with a space. The leading airport id column is then dropped.
pub fn from_raw_fields(fields: &[&str]) -> Result<Airport, ValidationErrors> {
    match fields.len() {
        AIRPORT_RECORD_LENGTH_REGULAR => from_attributes(&fields[1..]),
        AIRPORT_RECORD_LENGTH => {
            let city = format!("{} {}", fields[CITY_COLUMN], fields[CITY_COLUMN + 1]);
            let mut attributes: Vec<&str> = Vec::with_capacity(AIRPORT_RECORD_LENGTH_REGULAR - 1);
            attributes.extend_from_slice(&fields[1..CITY_COLUMN]);
            attributes.push(&city);
            attributes.extend_from_slice(&fields[CITY_COLUMN + 2..]);
            from_attributes(&attributes)
        }
        _ => Err(ValidationErrors::attribute_count()),
    }
}

/// Validate the eleven airport attributes, name through tz database
pub fn from_attributes(attributes: &[&str]) -> Result<Airport, ValidationErrors> {
    let &[
        name,
        city,
        country,
        iata,
        icao,
        latitude,
        longitude,
        altitude,
        timezone,
        dst,
        tz_database,
    ] = attributes
    else {
        return Err(ValidationErrors::attribute_count());
    };

    let mut checks = FieldChecks::new();
    checks.check(is_alpha_multi_language(name), Attribute::Name);
    checks.check(is_alpha_multi_language(city), Attribute::City);
    checks.check(is_alpha_multi_language(country), Attribute::Country);
    checks.check(is_airport_iata(iata), Attribute::Iata);
    checks.check(is_airport_icao(icao), Attribute::Icao);
    let latitude = checks.value(parse_checked::<f64>(latitude, is_float), Attribute::Latitude);
    let longitude = checks.value(parse_checked::<f64>(longitude, is_float), Attribute::Longitude);
    let altitude = checks.value(parse_checked::<i32>(altitude, is_integer), Attribute::Altitude);
    let timezone = checks.value(
        parse_checked::<f32>(timezone, is_valid_time_zone),
        Attribute::TimeZone,
    );
    let dst = checks.value(DstCode::from_field(dst), Attribute::DaylightSavingsTime);
    checks.check(is_valid_tz_database(tz_database), Attribute::TzDatabase);
    checks.finish()?;

    Ok(Airport::new(
        name,
        city,
        country,
        iata,
        icao,
        latitude.unwrap_or_default(),
        longitude.unwrap_or_default(),
        altitude.unwrap_or_default(),
        timezone.unwrap_or_default(),
        dst.unwrap_or(DstCode::Unknown),
        tz_database,
    ))
}
