//! Tests for Engine
//!
//! These tests verify:
//! - The full replay → snapshot → search pipeline over real files
//! - Stage isolation when a file is missing
//! - Files are fully rewritten on each run

use std::fs;
use std::path::Path;

use bookshelf::catalog::Catalog;
use bookshelf::config::{Config, StreamRole};
use bookshelf::engine::Engine;
use bookshelf::error::CatalogError;
use bookshelf::record::Record;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

const COMMANDS: &str = "\
INSERT;{\"isbn\":\"978-0553293357\",\"name\":\"Foundation\",\"author\":\"Isaac Asimov\",\"price\":7.99,\"quantity\":3}
INSERT;{\"isbn\":\"978-0441172719\",\"name\":\"Dune\",\"author\":\"Frank Herbert\",\"price\":9.99,\"quantity\":12}
INSERT;{\"isbn\":\"978-0007117116\",\"name\":\"Foundation\",\"author\":\"Isaac Asimov\",\"price\":11,\"quantity\":1}
PATCH;{\"isbn\":\"978-0441172719\",\"quantity\":11}
this line has no delimiter
INSERT;{\"isbn\":\"broken\",
DELETE;{\"isbn\":\"978-0007117116\"}
PATCH;{\"isbn\":\"missing\",\"price\":1}
INSERT;{\"isbn\":\"978-0007117116\",\"name\":\"Foundation\",\"author\":\"Isaac Asimov\",\"price\":12.5,\"quantity\":2}
";

const QUERIES: &str = "\
SEARCH;{\"name\":\"Foundation\"}
SEARCH;{\"name\":\"Neuromancer\"}
SEARCH;{\"name\":
";

fn setup_temp_engine(commands: Option<&str>, queries: Option<&str>) -> (TempDir, Engine) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder().dir(temp_dir.path()).build();

    if let Some(commands) = commands {
        fs::write(&config.commands_path, commands).unwrap();
    }
    if let Some(queries) = queries {
        fs::write(&config.queries_path, queries).unwrap();
    }

    let engine = Engine::new(config).unwrap();
    (temp_dir, engine)
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

// =============================================================================
// Pipeline Tests
// =============================================================================

#[test]
fn test_run_full_pipeline() {
    let (_temp, engine) = setup_temp_engine(Some(COMMANDS), Some(QUERIES));

    let report = engine.run();

    assert!(report.stage_errors.is_empty());
    assert_eq!(report.records_written, Some(3));

    assert_eq!(
        read(&engine.config().snapshot_path),
        "\
{\"isbn\":\"978-0007117116\",\"name\":\"Foundation\",\"author\":\"Isaac Asimov\",\"price\":12.5,\"quantity\":2}
{\"isbn\":\"978-0441172719\",\"name\":\"Dune\",\"author\":\"Frank Herbert\",\"price\":9.99,\"quantity\":11}
{\"isbn\":\"978-0553293357\",\"name\":\"Foundation\",\"author\":\"Isaac Asimov\",\"price\":7.99,\"quantity\":3}
"
    );

    assert_eq!(
        read(&engine.config().results_path),
        "\
{\"isbn\":\"978-0007117116\",\"name\":\"Foundation\",\"author\":\"Isaac Asimov\",\"price\":12.5,\"quantity\":2}
{\"isbn\":\"978-0553293357\",\"name\":\"Foundation\",\"author\":\"Isaac Asimov\",\"price\":7.99,\"quantity\":3}
"
    );
}

#[test]
fn test_run_report_counts() {
    let (_temp, engine) = setup_temp_engine(Some(COMMANDS), Some(QUERIES));

    let report = engine.run();

    let replay = report.replay.as_ref().unwrap();
    assert_eq!(replay.lines_read, 9);
    assert_eq!(replay.commands_applied, 6);
    assert_eq!(replay.commands_dropped, 1);
    assert_eq!(replay.lines_skipped, 1);
    assert_eq!(replay.diagnostics.len(), 1);
    assert_eq!(replay.diagnostics[0].line_number, 6);

    let search = report.search.as_ref().unwrap();
    assert_eq!(search.reload.records_loaded, 3);
    assert_eq!(search.queries.commands_applied, 2);
    assert_eq!(search.queries.diagnostics.len(), 1);
    assert_eq!(search.matches_written, 2);

    assert_eq!(report.diagnostic_count(), 2);
    assert!(!report.is_clean());
}

#[test]
fn test_run_clean_report() {
    let (_temp, engine) = setup_temp_engine(
        Some("INSERT;{\"isbn\":\"A1\",\"name\":\"X\",\"author\":\"Y\",\"price\":1,\"quantity\":1}\n"),
        Some("SEARCH;{\"name\":\"X\"}\n"),
    );

    let report = engine.run();

    assert!(report.is_clean());
    assert_eq!(report.diagnostic_count(), 0);
}

#[test]
fn test_run_twice_rewrites_outputs() {
    let (_temp, engine) = setup_temp_engine(Some(COMMANDS), Some(QUERIES));

    engine.run();
    let snapshot = read(&engine.config().snapshot_path);
    let results = read(&engine.config().results_path);

    engine.run();

    assert_eq!(read(&engine.config().snapshot_path), snapshot);
    assert_eq!(read(&engine.config().results_path), results);
}

// =============================================================================
// Missing File Tests
// =============================================================================

#[test]
fn test_missing_commands_writes_empty_snapshot() {
    let (_temp, engine) = setup_temp_engine(None, Some(QUERIES));

    let report = engine.run();

    assert!(report.replay.is_none());
    assert_eq!(report.records_written, Some(0));
    assert_eq!(report.stage_errors.len(), 1);
    assert!(report.stage_errors[0].starts_with("replay"));
    assert_eq!(read(&engine.config().snapshot_path), "");

    let search = report.search.unwrap();
    assert_eq!(search.matches_written, 0);
    assert_eq!(read(&engine.config().results_path), "");
}

#[test]
fn test_missing_queries_skips_search() {
    let (_temp, engine) = setup_temp_engine(Some(COMMANDS), None);

    let report = engine.run();

    assert_eq!(report.records_written, Some(3));
    assert!(report.search.is_none());
    assert_eq!(report.stage_errors.len(), 1);
    assert!(!engine.config().results_path.exists());
}

#[test]
fn test_replay_commands_source_unavailable() {
    let (_temp, engine) = setup_temp_engine(None, None);

    match engine.replay_commands() {
        Err(CatalogError::SourceUnavailable { role, path, .. }) => {
            assert_eq!(role, StreamRole::Commands);
            assert_eq!(path, engine.config().commands_path);
        }
        other => panic!("Expected SourceUnavailable, got {:?}", other.map(|(c, _)| c.len())),
    }
}

#[test]
fn test_replay_into_keeps_catalog_on_read_error() {
    let (_temp, engine) = setup_temp_engine(None, None);
    // Opens fine, but every read fails
    fs::create_dir(&engine.config().commands_path).unwrap();

    let mut catalog: Catalog = [Record::new("A1", "X", "Y", 10, 2).unwrap()]
        .into_iter()
        .collect();

    let err = engine.replay_into(&mut catalog).unwrap_err();

    assert!(matches!(err, CatalogError::Io(_)));
    assert_eq!(catalog.len(), 1);
    assert!(catalog.contains("A1"));
}

#[test]
fn test_replay_into_appends_to_existing_catalog() {
    let (_temp, engine) = setup_temp_engine(Some(COMMANDS), None);
    let mut catalog: Catalog = [Record::new("A1", "X", "Y", 10, 2).unwrap()]
        .into_iter()
        .collect();

    let result = engine.replay_into(&mut catalog).unwrap();

    assert_eq!(result.commands_applied, 6);
    assert_eq!(catalog.len(), 4);
    assert!(catalog.contains("A1"));
}

#[test]
fn test_resolve_searches_needs_snapshot() {
    let (_temp, engine) = setup_temp_engine(Some(COMMANDS), Some(QUERIES));

    let err = engine.resolve_searches().unwrap_err();

    assert!(matches!(
        err,
        CatalogError::SourceUnavailable {
            role: StreamRole::Snapshot,
            ..
        }
    ));
    assert!(!engine.config().results_path.exists());
}

#[test]
fn test_search_reads_existing_snapshot() {
    let (_temp, engine) = setup_temp_engine(None, Some(QUERIES));
    fs::write(
        &engine.config().snapshot_path,
        "{\"isbn\":\"Z1\",\"name\":\"Foundation\",\"author\":\"A\",\"price\":1,\"quantity\":1}\n",
    )
    .unwrap();

    let outcome = engine.resolve_searches().unwrap();

    assert_eq!(outcome.matches_written, 1);
    assert!(read(&engine.config().results_path).starts_with("{\"isbn\":\"Z1\""));
}

#[test]
fn test_unwritable_snapshot_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .dir(temp_dir.path())
        .snapshot_path(temp_dir.path().join("no_such_dir").join("output.txt"))
        .build();
    fs::write(&config.commands_path, COMMANDS).unwrap();
    fs::write(&config.queries_path, QUERIES).unwrap();
    let engine = Engine::new(config).unwrap();

    let report = engine.run();

    assert!(report.replay.is_some());
    assert!(report.records_written.is_none());
    assert!(report.search.is_none());
    assert_eq!(report.stage_errors.len(), 2);
}

// =============================================================================
// Configuration Tests
// =============================================================================

#[test]
fn test_engine_rejects_invalid_config() {
    let config = Config::builder().commands_path("").build();
    assert!(matches!(Engine::new(config), Err(CatalogError::Config(_))));
}

#[test]
fn test_custom_delimiter_pipeline() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder().delimiter('|').dir(temp_dir.path()).build();
    fs::write(
        &config.commands_path,
        "INSERT|{\"isbn\":\"A1\",\"name\":\"X\",\"author\":\"Y\",\"price\":1,\"quantity\":1}\n",
    )
    .unwrap();
    fs::write(&config.queries_path, "SEARCH|{\"name\":\"X\"}\n").unwrap();
    let engine = Engine::new(config).unwrap();

    let report = engine.run();

    assert!(report.is_clean());
    assert_eq!(report.search.unwrap().matches_written, 1);
}
