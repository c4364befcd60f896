//! Tests for batch ingestion and upload

use super::*;
use crate::app::adapters::persistence::{MemoryStore, RecordStore};
use crate::app::models::{Record, RecordId, RecordKind};
use crate::app::services::batch_ingestor::BatchIngestor;
use crate::config::Config;
use std::fs::File;
use std::io::{self, BufReader, Cursor, Read};

/// Reader that fails on every read
struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("disk went away"))
    }
}

/// Store that rejects every insert after the first `limit`
struct LimitedStore {
    inner: MemoryStore,
    limit: usize,
}

impl RecordStore for LimitedStore {
    fn insert(&mut self, set_name: &str, record: &Record) -> crate::Result<RecordId> {
        if self.inner.count(record.kind()) >= self.limit {
            return Err(crate::Error::configuration("store is full"));
        }
        self.inner.insert(set_name, record)
    }

    fn update(&mut self, id: RecordId, record: &Record) -> crate::Result<()> {
        self.inner.update(id, record)
    }

    fn delete(&mut self, kind: RecordKind, id: RecordId) -> crate::Result<()> {
        self.inner.delete(kind, id)
    }
}

#[test]
fn test_partitions_valid_and_invalid_lines() {
    let ingestor = BatchIngestor::default();
    let report = ingestor.ingest(create_airline_lines(), RecordKind::Airline);

    assert_eq!(report.valid_count(), 2);
    assert_eq!(report.invalid_count(), 2);
    assert_eq!(report.records[0].as_airline().unwrap().name, "Rainbow Air Canada");
    assert_eq!(report.records[1].as_airline().unwrap().iata, "NZ");
}

#[test]
fn test_invalid_lines_keep_input_order_and_first_error() {
    let lines = create_airline_lines();
    let report = BatchIngestor::default().ingest(lines.clone(), RecordKind::Airline);

    assert_eq!(
        report.diagnostics(),
        vec![
            format!("{} (Invalid IATA)", lines[1]),
            format!("{} (Invalid number of attributes)", lines[2]),
        ]
    );
    assert_eq!(report.invalid_lines[0].line_number, 2);
    assert_eq!(report.invalid_lines[0].errors, vec!["Invalid IATA", "Invalid recently active"]);
    assert_eq!(report.invalid_lines[1].line_number, 3);
}

#[test]
fn test_failures_anywhere_do_not_stop_the_batch() {
    let report = BatchIngestor::default().ingest(create_route_lines(), RecordKind::Route);

    assert_eq!(report.valid_count(), 3);
    assert_eq!(report.invalid_count(), 2);
    assert_eq!(report.stats.lines_read, 5);
    assert_eq!(
        report.invalid_lines.iter().map(|l| l.line_number).collect::<Vec<_>>(),
        vec![2, 5]
    );
    assert_eq!(
        report.records[2].as_route().unwrap().plane_type_code,
        "",
        "short shape line has no equipment"
    );
}

#[test]
fn test_blank_line_ends_input() {
    let lines = vec![
        "BA,1355,SIN,3316,MEL,3339,Y,0,744",
        "   ",
        "2B,410,AER,2965,KZN,2990,,0,CR2",
        "not a route",
    ];
    let report = BatchIngestor::default().ingest(lines, RecordKind::Route);

    assert_eq!(report.valid_count(), 1);
    assert_eq!(report.invalid_count(), 0);
    assert_eq!(report.stats.lines_read, 1);
    assert_eq!(report.stats.stopped_at_line, Some(2));
    assert!(report.stats.stopped_early());
}

#[test]
fn test_blank_lines_skipped_when_configured() {
    let lines = vec![
        "BA,1355,SIN,3316,MEL,3339,Y,0,744",
        "",
        "2B,410,AER,2965,KZN,2990,,0,CR2",
        "not a route",
    ];
    let ingestor = BatchIngestor::new(&Config::default().without_blank_line_termination());
    let report = ingestor.ingest(lines, RecordKind::Route);

    assert_eq!(report.valid_count(), 2);
    assert_eq!(report.invalid_count(), 1);
    assert_eq!(report.stats.blank_lines_skipped, 1);
    assert_eq!(report.stats.stopped_at_line, None);
    assert_eq!(report.invalid_lines[0].line_number, 4);
}

#[test]
fn test_empty_input() {
    let report = BatchIngestor::default().ingest(Vec::<String>::new(), RecordKind::Airport);
    assert_eq!(report.valid_count(), 0);
    assert_eq!(report.invalid_count(), 0);
    assert_eq!(report.kind, RecordKind::Airport);
}

#[test]
fn test_ingest_reader_from_file() {
    let file = create_temp_file("FIX,ATMAP,35000,-12,118.255\r\nVOR,CH,12000,-43.5,172.5\nF1X,A,0,0,0\n");
    let reader = BufReader::new(File::open(file.path()).unwrap());
    let report = BatchIngestor::default()
        .ingest_reader(reader, RecordKind::FlightPath)
        .unwrap();

    assert_eq!(report.valid_count(), 2);
    assert_eq!(report.diagnostics(), vec!["F1X,A,0,0,0 (Invalid type)"]);
}

#[test]
fn test_ingest_reader_replaces_invalid_utf8() {
    let mut input = b"FIX,ATMAP,35000,-12,118.255\n".to_vec();
    input.extend_from_slice(b"APT,Z\xfcrich,0,47,8\n");
    input.extend_from_slice(b"VOR,CH,12000,-43.5,172.5\n");

    let report = BatchIngestor::default()
        .ingest_reader(Cursor::new(input), RecordKind::FlightPath)
        .unwrap();

    assert_eq!(report.valid_count(), 2);
    assert_eq!(report.invalid_count(), 1);
    assert_eq!(report.invalid_lines[0].line_number, 2);
    assert!(report.invalid_lines[0].line.contains('\u{FFFD}'));
}

#[test]
fn test_ingest_reader_stops_reading_at_blank_line() {
    let input = Cursor::new(b"FIX,ATMAP,35000,-12,118.255\n\n".to_vec());
    let reader = BufReader::new(input.chain(FailingReader));
    let report = BatchIngestor::default()
        .ingest_reader(reader, RecordKind::FlightPath)
        .unwrap();

    assert_eq!(report.valid_count(), 1);
    assert_eq!(report.stats.stopped_at_line, Some(2));
}

#[test]
fn test_ingest_reader_propagates_read_failure() {
    let input = Cursor::new(b"FIX,ATMAP,35000,-12,118.255\n".to_vec());
    let reader = BufReader::new(input.chain(FailingReader));
    let err = BatchIngestor::default()
        .ingest_reader(reader, RecordKind::FlightPath)
        .unwrap_err();
    assert!(matches!(err, crate::Error::Io { .. }));
}

#[test]
fn test_upload_assigns_identities() {
    let mut store = MemoryStore::new();
    let report = BatchIngestor::default()
        .upload(create_route_lines(), RecordKind::Route, "Test routes", &mut store)
        .unwrap();

    let ids: Vec<_> = report.records.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec![Some(1), Some(2), Some(3)]);
    assert_eq!(store.count(RecordKind::Route), 3);
    assert_eq!(store.set_members(RecordKind::Route, "Test routes"), vec![1, 2, 3]);
    assert_eq!(report.invalid_count(), 2);
}

#[test]
fn test_upload_failure_returns_partial_report() {
    let mut store = LimitedStore {
        inner: MemoryStore::new(),
        limit: 2,
    };
    let failure = BatchIngestor::default()
        .upload(create_route_lines(), RecordKind::Route, "Test routes", &mut store)
        .unwrap_err();

    assert_eq!(failure.stored, 2);
    let ids: Vec<_> = failure.report.records.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec![Some(1), Some(2), None]);
    assert_eq!(failure.report.invalid_count(), 2);
    assert_eq!(store.inner.count(RecordKind::Route), 2);

    let error = crate::Error::from(failure);
    assert!(matches!(error, crate::Error::UploadIncomplete { stored: 2, .. }));
}

#[test]
fn test_into_parts() {
    let (records, invalid) = BatchIngestor::default()
        .ingest(create_route_lines(), RecordKind::Route)
        .into_parts();
    assert_eq!(records.len(), 3);
    assert_eq!(invalid[0], "BA~,1355,SIN,3316,MEL,3339,Y,0,744 (Invalid airline)");
    assert_eq!(invalid[1], "2B,410,ASF,2966,MRV,2962,,0a,CR2 (Invalid stops)");
}

#[test]
fn test_report_json() {
    let report = BatchIngestor::default().ingest(create_route_lines(), RecordKind::Route);
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    assert_eq!(json["kind"], "Route");
    assert_eq!(json["stats"]["records_parsed"], 3);
    assert_eq!(json["invalid_lines"][0]["message"], "Invalid airline");
    assert_eq!(json["records"][0]["kind"], "Route");
}
