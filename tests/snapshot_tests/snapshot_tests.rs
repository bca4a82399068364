//! Tests for SnapshotWriter and SnapshotReader
//!
//! These tests verify:
//! - Canonical line format and isbn ordering
//! - Idempotent emission
//! - Round trip through reload
//! - Best-effort reload of damaged snapshots

use std::io::Cursor;

use bookshelf::catalog::Catalog;
use bookshelf::error::CatalogError;
use bookshelf::record::Record;
use bookshelf::replay::CommandReplayer;
use bookshelf::snapshot::{SnapshotReader, SnapshotWriter};

// =============================================================================
// Helper Functions
// =============================================================================

fn emit(catalog: &Catalog) -> String {
    let mut writer = SnapshotWriter::new(Vec::new());
    writer.write_catalog(catalog).unwrap();
    String::from_utf8(writer.finish().unwrap()).unwrap()
}

fn sample_catalog() -> Catalog {
    [
        Record::new("9780553293357", "Foundation", "Isaac Asimov", 7.99, 3).unwrap(),
        Record::new("9780441172719", "Dune", "Frank Herbert", 9.99, 12).unwrap(),
        Record::new("9780553803709", "I, Robot", "Isaac Asimov", 8, 0).unwrap(),
    ]
    .into_iter()
    .collect()
}

// =============================================================================
// Writer Tests
// =============================================================================

#[test]
fn test_empty_catalog_writes_nothing() {
    assert_eq!(emit(&Catalog::new()), "");
}

#[test]
fn test_patch_scenario_output() {
    let mut catalog = Catalog::new();
    let input = "INSERT;{\"isbn\":\"A1\",\"name\":\"X\",\"author\":\"Y\",\"price\":10,\"quantity\":2}\n\
                 PATCH;{\"isbn\":\"A1\",\"price\":15}\n";
    CommandReplayer::default()
        .replay(Cursor::new(input), &mut catalog)
        .unwrap();

    assert_eq!(
        emit(&catalog),
        "{\"isbn\":\"A1\",\"name\":\"X\",\"author\":\"Y\",\"price\":15,\"quantity\":2}\n"
    );
}

#[test]
fn test_lines_sorted_by_isbn() {
    let output = emit(&sample_catalog());
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("{\"isbn\":\"9780441172719\""));
    assert!(lines[1].starts_with("{\"isbn\":\"9780553293357\""));
    assert!(lines[2].starts_with("{\"isbn\":\"9780553803709\""));
}

#[test]
fn test_emission_is_idempotent() {
    let catalog = sample_catalog();
    assert_eq!(emit(&catalog), emit(&catalog));
}

#[test]
fn test_extra_fields_not_written() {
    let mut catalog = Catalog::new();
    let input = "INSERT;{\"isbn\":\"A1\",\"name\":\"X\",\"author\":\"Y\",\"price\":1,\"quantity\":1,\"shelf\":\"B\"}\n";
    CommandReplayer::default()
        .replay(Cursor::new(input), &mut catalog)
        .unwrap();

    assert!(catalog.get("A1").unwrap().get("shelf").is_some());
    assert!(!emit(&catalog).contains("shelf"));
}

#[test]
fn test_writer_counts_records() {
    let catalog = sample_catalog();
    let mut writer = SnapshotWriter::new(Vec::new());

    assert_eq!(writer.write_catalog(&catalog).unwrap(), 3);
    assert_eq!(writer.write_catalog(&catalog).unwrap(), 3);
    assert_eq!(writer.records_written(), 6);
}

// =============================================================================
// Reload Tests
// =============================================================================

#[test]
fn test_round_trip_preserves_catalog() {
    let catalog = sample_catalog();
    let output = emit(&catalog);

    let (reloaded, result) = SnapshotReader::reload(Cursor::new(output)).unwrap();

    assert_eq!(result.records_loaded, 3);
    assert!(result.diagnostics.is_empty());
    assert_eq!(reloaded, catalog);
}

#[test]
fn test_round_trip_full_precision_prices() {
    let prices = [
        1604.7802727821427,
        0.1 + 0.2,
        123456.78901234567,
        9.999999999999998,
        2.2250738585072014e-308,
        f64::MAX,
    ];
    let catalog: Catalog = prices
        .iter()
        .enumerate()
        .map(|(i, price)| Record::new(format!("P{}", i), "N", "A", *price, 1).unwrap())
        .collect();

    let (reloaded, result) = SnapshotReader::reload(Cursor::new(emit(&catalog))).unwrap();

    assert!(result.diagnostics.is_empty());
    assert_eq!(reloaded, catalog);
    for (i, price) in prices.iter().enumerate() {
        let reloaded_price = reloaded.get(&format!("P{}", i)).unwrap().price().unwrap();
        assert_eq!(reloaded_price.to_bits(), price.to_bits());
    }
}

#[test]
fn test_reload_is_independent_of_source() {
    let mut catalog = sample_catalog();
    let output = emit(&catalog);
    let (reloaded, _) = SnapshotReader::reload(Cursor::new(output)).unwrap();

    catalog.remove("9780441172719");

    assert!(reloaded.contains("9780441172719"));
    assert_eq!(reloaded.len(), 3);
}

#[test]
fn test_reload_skips_bad_lines() {
    let snapshot = "{\"isbn\":\"A1\",\"name\":\"X\",\"author\":\"Y\",\"price\":1,\"quantity\":1}\n\
                    not json at all\n\
                    {\"name\":\"no key\"}\n\
                    \n\
                    {\"isbn\":\"B2\",\"name\":\"Z\",\"author\":\"W\",\"price\":2,\"quantity\":2}\n";

    let (reloaded, result) = SnapshotReader::reload(Cursor::new(snapshot)).unwrap();

    assert_eq!(reloaded.len(), 2);
    assert_eq!(result.records_loaded, 2);

    let failed: Vec<usize> = result.diagnostics.iter().map(|d| d.line_number).collect();
    assert_eq!(failed, vec![2, 3, 4]);
    assert!(matches!(
        result.diagnostics[1].error,
        CatalogError::MissingKeyField { field: "isbn" }
    ));
}

#[test]
fn test_reload_duplicate_isbn_keeps_last() {
    let snapshot = "{\"isbn\":\"A1\",\"name\":\"First\"}\n{\"isbn\":\"A1\",\"name\":\"Second\"}\n";
    let (reloaded, result) = SnapshotReader::reload(Cursor::new(snapshot)).unwrap();

    assert_eq!(result.records_loaded, 2);
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.get("A1").unwrap().name(), Some("Second"));
}
