//! Field validators for OpenFlights record attributes
//!
//! Every validator is a total predicate over a field value: it never panics
//! and never errors, it only answers whether the value is acceptable. All
//! patterns must match the whole value.

use crate::constants::{MAX_TIMEZONE_OFFSET, MIN_TIMEZONE_OFFSET, NULL_MARKER};
use regex::Regex;
use std::sync::OnceLock;

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        fn $name() -> &'static Regex {
            static PATTERN: OnceLock<Regex> = OnceLock::new();
            PATTERN.get_or_init(|| Regex::new($re).expect("field validator pattern is valid"))
        }
    };
}

pattern!(integer_pattern, r"^-?[0-9]+$");
pattern!(float_pattern, r"^-?[0-9]+(\.[0-9]+)?$");
pattern!(alpha_pattern, r"^[A-Za-z][A-Za-z \t\n\x0B\f\r]*$");
pattern!(alpha_numeric_pattern, r"^[A-Za-z0-9 \t\n\x0B\f\r]*$");
pattern!(
    alpha_multi_language_pattern,
    r"^[\-a-zA-Z0-9 '.\x{0080}-\x{9FFF}]*$"
);
pattern!(airport_iata_pattern, r"^[a-zA-Z0-9а-яА-Я%]{3}$");
pattern!(airport_icao_pattern, r"^[a-zA-Z0-9\-_%]{3,4}$");
pattern!(airline_iata_pattern, r"^[\-a-zA-Z0-9а-яА-Я +\^;:\&.?!]*$");
pattern!(airline_icao_pattern, r"^[\-a-zA-Z0-9а-яА-Я '*/+=:\&.?!]*$");
pattern!(tz_database_pattern, r"^[a-zA-Z]+/[a-zA-Z_\-]+$");

/// True for the empty string or the `\N` unknown marker
fn is_empty_or_null(value: &str) -> bool {
    value.is_empty() || value == NULL_MARKER
}

/// Optional leading minus followed by one or more digits
pub fn is_integer(value: &str) -> bool {
    integer_pattern().is_match(value)
}

/// Optional leading minus, digits, then an optional fractional part
pub fn is_float(value: &str) -> bool {
    float_pattern().is_match(value)
}

/// A letter followed by letters or whitespace; never empty
pub fn is_alpha(value: &str) -> bool {
    alpha_pattern().is_match(value)
}

/// Letters, digits and whitespace only; empty is accepted
pub fn is_alpha_numeric(value: &str) -> bool {
    alpha_numeric_pattern().is_match(value)
}

/// Names in any script: ASCII letters and digits, space, `-`, `.`, `'` and
/// the code points from U+0080 through U+9FFF. Empty is accepted.
pub fn is_alpha_multi_language(value: &str) -> bool {
    alpha_multi_language_pattern().is_match(value)
}

/// Empty, `\N`, or exactly three letters, digits, Cyrillic letters or `%`
pub fn is_airport_iata(value: &str) -> bool {
    is_empty_or_null(value) || airport_iata_pattern().is_match(value)
}

/// Empty, `\N`, or three to four letters, digits, `-`, `_` or `%`
pub fn is_airport_icao(value: &str) -> bool {
    is_empty_or_null(value) || airport_icao_pattern().is_match(value)
}

pub fn is_airline_iata(value: &str) -> bool {
    is_empty_or_null(value) || airline_iata_pattern().is_match(value)
}

pub fn is_airline_icao(value: &str) -> bool {
    is_empty_or_null(value) || airline_icao_pattern().is_match(value)
}

/// Either airport code form
pub fn is_airport_code(value: &str) -> bool {
    is_airport_iata(value) || is_airport_icao(value)
}

/// Either airline code form
pub fn is_airline_code(value: &str) -> bool {
    is_airline_iata(value) || is_airline_icao(value)
}

/// A UTC offset in hours within [-12, 14]
pub fn is_valid_time_zone(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .map(|offset| (MIN_TIMEZONE_OFFSET..=MAX_TIMEZONE_OFFSET).contains(&offset))
        .unwrap_or(false)
}

/// Empty, `\N`, or an `Area/Location` tz database name
pub fn is_valid_tz_database(value: &str) -> bool {
    is_empty_or_null(value) || tz_database_pattern().is_match(value)
}

/// Missing, or made only of ASCII characters
pub fn is_ascii_or_null(value: Option<&str>) -> bool {
    value.is_none_or(str::is_ascii)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_integer() {
        assert!(is_integer("35000"));
        assert!(is_integer("-4"));
        assert!(!is_integer(""));
        assert!(!is_integer("-"));
        assert!(!is_integer("3500O"));
        assert!(!is_integer("1.5"));
        assert!(!is_integer("١٢٣"));
    }

    #[test]
    fn test_is_float() {
        assert!(is_float("76.531203"));
        assert!(is_float("-68"));
        assert!(!is_float("1."));
        assert!(!is_float(".5"));
        assert!(!is_float("1e5"));
        assert!(!is_float("abc"));
    }

    #[test]
    fn test_is_alpha() {
        assert!(is_alpha("FIX"));
        assert!(is_alpha("Air Base"));
        assert!(!is_alpha(""));
        assert!(!is_alpha("   "));
        assert!(!is_alpha(" FIX"));
        assert!(!is_alpha("F1X"));
    }

    #[test]
    fn test_is_alpha_numeric() {
        assert!(is_alpha_numeric("744 320"));
        assert!(is_alpha_numeric(""));
        assert!(!is_alpha_numeric("Airport 123!$%"));
        assert!(!is_alpha_numeric("744@"));
    }

    #[test]
    fn test_is_alpha_multi_language() {
        assert!(is_alpha_multi_language("Rainbow Air Canada"));
        assert!(is_alpha_multi_language("Côte d'Ivoire"));
        assert!(is_alpha_multi_language("St. John-Smith"));
        assert!(is_alpha_multi_language("北京首都国际机场"));
        assert!(is_alpha_multi_language(""));
        assert!(!is_alpha_multi_language("~"));
        assert!(!is_alpha_multi_language("Air/Line"));
    }

    #[test]
    fn test_airport_codes() {
        assert!(is_airport_iata("THU"));
        assert!(is_airport_iata(""));
        assert!(is_airport_iata("\\N"));
        assert!(is_airport_iata("ЛЕД"));
        assert!(!is_airport_iata("ABCD"));
        assert!(!is_airport_iata("AB"));

        assert!(is_airport_icao("BGTL"));
        assert!(is_airport_icao("K-_"));
        assert!(is_airport_icao(""));
        assert!(!is_airport_icao("AB"));
        assert!(!is_airport_icao("ABCDE"));

        assert!(is_airport_code("SIN"));
        assert!(is_airport_code("WSSS"));
        assert!(!is_airport_code("SIN!!"));
    }

    #[test]
    fn test_airline_codes() {
        assert!(is_airline_iata("RY"));
        assert!(is_airline_iata("A+;"));
        assert!(is_airline_iata("\\N"));
        assert!(!is_airline_iata("RYAN~"));

        assert!(is_airline_icao("RAY"));
        assert!(is_airline_icao("A'*/="));
        assert!(!is_airline_icao("RYAN~"));

        assert!(is_airline_code("BA"));
        assert!(!is_airline_code("BA~"));
    }

    #[test]
    fn test_is_valid_time_zone() {
        assert!(is_valid_time_zone("-4"));
        assert!(is_valid_time_zone(" 5.5 "));
        assert!(is_valid_time_zone("-12"));
        assert!(is_valid_time_zone("14"));
        assert!(!is_valid_time_zone("14.5"));
        assert!(!is_valid_time_zone("-13"));
        assert!(!is_valid_time_zone("aa"));
        assert!(!is_valid_time_zone("NaN"));
        assert!(!is_valid_time_zone(""));
    }

    #[test]
    fn test_is_valid_tz_database() {
        assert!(is_valid_tz_database("America/Thule"));
        assert!(is_valid_tz_database("America/Port-au-Prince"));
        assert!(is_valid_tz_database("America/Los_Angeles"));
        assert!(is_valid_tz_database(""));
        assert!(is_valid_tz_database("\\N"));
        assert!(!is_valid_tz_database("America"));
        assert!(!is_valid_tz_database("Amer1ca/Thul3"));
        assert!(!is_valid_tz_database("America/Argentina/Salta"));
    }

    #[test]
    fn test_is_ascii_or_null() {
        assert!(is_ascii_or_null(None));
        assert!(is_ascii_or_null(Some("Thule")));
        assert!(!is_ascii_or_null(Some("Zürich")));
    }
}
