//! Flight path waypoint parsing

use super::errors::{Attribute, FieldChecks, ValidationErrors};
use super::fields::parse_checked;
use crate::app::models::FlightPath;
use crate::app::services::field_validators::{is_alpha, is_float, is_integer};
use crate::constants::FLIGHT_PATH_RECORD_LENGTH;

/// Parse the split fields of a raw waypoint line
///
/// Waypoint lines carry no index column, so every field is an attribute.
pub fn from_raw_fields(fields: &[&str]) -> Result<FlightPath, ValidationErrors> {
    if fields.len() != FLIGHT_PATH_RECORD_LENGTH {
        return Err(ValidationErrors::attribute_count());
    }
    from_attributes(fields)
}

/// Validate type, id, altitude, latitude and longitude
pub fn from_attributes(attributes: &[&str]) -> Result<FlightPath, ValidationErrors> {
    let &[path_type, path_id, altitude, latitude, longitude] = attributes else {
        return Err(ValidationErrors::attribute_count());
    };

    let mut checks = FieldChecks::new();
    checks.check(is_alpha(path_type), Attribute::Type);
    checks.check(is_alpha(path_id), Attribute::Id);
    let altitude = checks.value(parse_checked::<i32>(altitude, is_integer), Attribute::Altitude);
    let latitude = checks.value(parse_checked::<f64>(latitude, is_float), Attribute::Latitude);
    let longitude = checks.value(parse_checked::<f64>(longitude, is_float), Attribute::Longitude);
    checks.finish()?;

    Ok(FlightPath::new(
        path_type,
        path_id,
        altitude.unwrap_or_default(),
        latitude.unwrap_or_default(),
        longitude.unwrap_or_default(),
    ))
}
