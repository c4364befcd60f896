//! Test fixtures shared by the record parser suites

use super::{ParseResult, RecordParser};
use crate::app::models::{Record, RecordKind};


pub const AIRLINE_LINE: &str =
    r#"1,"Rainbow Air Canada","Rainbow Air CAN","RY","RAY","Rainbow CAN","Canada","Y""#;

pub const AIRPORT_LINE: &str = r#"10,"Thule Air Base","Thule","Greenland","THU","BGTL",76.531203,-68.703161,251,-4,"E","America/Thule""#;

pub const ROUTE_LINE: &str = "BA,1355,SIN,3316,MEL,3339,Y,0,744";

pub const FLIGHT_PATH_LINE: &str = "FIX,ATMAP,35000,-12,118.255";

/// Parse a line with the default parser
pub fn parse(kind: RecordKind, line: &str) -> ParseResult<Record> {
    RecordParser::default().parse_line(kind, line)
}

/// Messages of every error reported for a line that must fail
pub fn error_messages(kind: RecordKind, line: &str) -> Vec<String> {
    parse(kind, line)
        .expect_err("line should be rejected")
        .messages()
}
