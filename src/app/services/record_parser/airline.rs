//! Airline record parsing

use super::errors::{Attribute, FieldChecks, ValidationErrors};
use crate::app::models::Airline;
use crate::app::services::field_validators::{
    is_airline_iata, is_airline_icao, is_alpha_multi_language,
};
use crate::constants::{AIRLINE_RECORD_LENGTH, NULL_MARKER};

/// Parse the split fields of a raw airlines.dat line
///
/// The leading airline id column is dropped before validation.
pub fn from_raw_fields(fields: &[&str]) -> Result<Airline, ValidationErrors> {
    if fields.len() != AIRLINE_RECORD_LENGTH {
        return Err(ValidationErrors::attribute_count());
    }
    from_attributes(&fields[1..])
}

/// Validate name, alias, IATA, ICAO, call sign, country and active flag
pub fn from_attributes(attributes: &[&str]) -> Result<Airline, ValidationErrors> {
    let &[name, alias, iata, icao, call_sign, country, active] = attributes else {
        return Err(ValidationErrors::attribute_count());
    };

    let mut checks = FieldChecks::new();
    checks.check(is_alpha_multi_language(name), Attribute::Name);
    checks.check(
        is_alpha_multi_language(alias) || alias == NULL_MARKER,
        Attribute::Alias,
    );
    checks.check(is_airline_iata(iata), Attribute::Iata);
    checks.check(is_airline_icao(icao), Attribute::Icao);
    checks.check(is_alpha_multi_language(call_sign), Attribute::CallSign);
    checks.check(is_alpha_multi_language(country), Attribute::Country);
    let recently_active = checks.value(parse_active_flag(active), Attribute::RecentlyActive);
    checks.finish()?;

    Ok(Airline::new(
        name,
        alias,
        iata,
        icao,
        call_sign,
        country,
        recently_active.unwrap_or_default(),
    ))
}

/// `Y` or `N` in either case
fn parse_active_flag(value: &str) -> Option<bool> {
    match value.to_uppercase().as_str() {
        "Y" => Some(true),
        "N" => Some(false),
        _ => None,
    }
}
