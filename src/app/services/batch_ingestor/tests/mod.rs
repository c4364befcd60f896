//! Test fixtures for batch ingestion

use std::io::Write;
use tempfile::NamedTempFile;

mod ingestor_tests;

/// Airline lines: valid, invalid IATA, wrong shape, valid
pub fn create_airline_lines() -> Vec<&'static str> {
    vec![
        r#"1,"Rainbow Air Canada","Rainbow Air CAN","RY","RAY","Rainbow CAN","Canada","Y""#,
        r#"2,"Rainbow Air US","Rainbow Air USA","RYAN~","RNY","Rainbow USA","United States","S""#,
        r#"3,"Rainbow Air Polynesia""#,
        r#"4,"Air New Zealand",\N,"NZ","ANZ","NEW ZEALAND","New Zealand","Y""#,
    ]
}

/// Route lines mixing both shapes with rejected lines
pub fn create_route_lines() -> Vec<&'static str> {
    vec![
        "BA,1355,SIN,3316,MEL,3339,Y,0,744",
        "BA~,1355,SIN,3316,MEL,3339,Y,0,744",
        "2B,410,AER,2965,KZN,2990,,0,CR2",
        "2B,410,ASF,2966,KZN,2990,,0",
        "2B,410,ASF,2966,MRV,2962,,0a,CR2",
    ]
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}
