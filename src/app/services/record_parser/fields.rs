//! Raw line splitting and checked field conversion

use std::borrow::Cow;
use std::str::FromStr;

/// Remove every double quote character from a line
pub fn strip_quotes(line: &str) -> Cow<'_, str> {
    if line.contains('"') {
        Cow::Owned(line.replace('"', ""))
    } else {
        Cow::Borrowed(line)
    }
}

/// Split a line on commas, discarding trailing empty fields
///
/// A line without any comma is a single field, even when empty. Trailing
/// empty fields are dropped, so `"a,b,,"` yields two fields; interior empty
/// fields are kept. This is what makes a route line with no equipment code
/// arrive in its short shape.
pub fn split_fields(line: &str) -> Vec<&str> {
    if !line.contains(',') {
        return vec![line];
    }

    let mut fields: Vec<&str> = line.split(',').collect();
    while fields.last().is_some_and(|field| field.is_empty()) {
        fields.pop();
    }
    fields
}

/// Convert a field only when it passes its validator
///
/// Values that pass the pattern but still fail conversion (for example an
/// integer that overflows) yield `None` as well.
pub fn parse_checked<T: FromStr>(value: &str, valid: impl Fn(&str) -> bool) -> Option<T> {
    if valid(value) {
        value.trim().parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::field_validators::{is_float, is_integer};

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes(r#""Thule","Greenland""#), "Thule,Greenland");
        assert!(matches!(strip_quotes("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_split_keeps_interior_empties() {
        assert_eq!(split_fields("BA,,SIN"), vec!["BA", "", "SIN"]);
    }

    #[test]
    fn test_split_drops_trailing_empties() {
        assert_eq!(split_fields("BA,1,SIN,,"), vec!["BA", "1", "SIN"]);
        assert!(split_fields(",,,").is_empty());
    }

    #[test]
    fn test_split_without_comma() {
        assert_eq!(split_fields(""), vec![""]);
        assert_eq!(split_fields("single"), vec!["single"]);
    }

    #[test]
    fn test_parse_checked() {
        assert_eq!(parse_checked::<i32>("35000", is_integer), Some(35000));
        assert_eq!(parse_checked::<i32>("3500O", is_integer), None);
        assert_eq!(parse_checked::<i32>("99999999999", is_integer), None);
        assert_eq!(parse_checked::<u32>("-1", is_integer), None);
        assert_eq!(parse_checked::<f64>("-12", is_float), Some(-12.0));
    }
}
