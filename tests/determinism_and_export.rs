//! Integration tests: repeated runs and file export

use leach_rs::analysis::{KineticSummary, ScenarioComparison};
use leach_rs::config::{ContactIntensity, SolutionType};
use leach_rs::output::export::{CsvConfig, CsvExporter, CsvMetadata, Exporter, JsonExporter, read_json, write_json};
use leach_rs::solver::{RunDriver, Scenario, SimulationResult, Solver, try_run_batch};
use std::fs;
use tempfile::tempdir;

mod common;
use common::run_canonical;

#[test]
fn test_identical_runs_give_identical_json() {
    for scenario in Scenario::canonical_set() {
        let first = RunDriver::new().solve(&scenario).unwrap();
        let second = RunDriver::new().solve(&scenario).unwrap();

        let exporter = JsonExporter::default();
        assert_eq!(
            exporter.to_string(&first).unwrap(),
            exporter.to_string(&second).unwrap(),
            "{} is not deterministic",
            scenario.id()
        );
    }
}

#[test]
fn test_json_and_csv_written_for_all_scenarios() {
    let results = try_run_batch(&RunDriver::new(), &Scenario::canonical_set()).unwrap();
    let dir = tempdir().unwrap();

    let json_paths = JsonExporter::default().export_all(&results, dir.path()).unwrap();
    let csv_paths = CsvExporter::default().export_all(&results, dir.path()).unwrap();

    assert_eq!(json_paths.len(), 6);
    assert_eq!(csv_paths.len(), 6);
    for (result, path) in results.iter().zip(&json_paths) {
        let loaded: SimulationResult = read_json(path).unwrap();
        assert_eq!(&loaded, result);
    }
    for path in &csv_paths {
        let text = fs::read_to_string(path).unwrap();
        assert_eq!(text.lines().count(), 22);
    }
}

#[test]
fn test_csv_with_metadata_header() {
    let result = run_canonical(SolutionType::ChlorideBrine, ContactIntensity::EnhancedFlow);
    let dir = tempdir().unwrap();
    let path = dir.path().join("nacl.csv");

    let config = CsvConfig::high_precision().with_metadata(CsvMetadata::from_result(&result));
    CsvExporter::new(config).export(&result, &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let comments = text.lines().take_while(|l| l.starts_with('#')).count();
    assert!(comments >= 7);
    assert_eq!(text.lines().count(), comments + 22);
}

#[test]
fn test_summaries_serialize() {
    let results = try_run_batch(&RunDriver::new(), &Scenario::canonical_set()).unwrap();
    let dir = tempdir().unwrap();

    let summaries: Vec<KineticSummary> = results
        .iter()
        .map(|r| KineticSummary::from_result(r).unwrap())
        .collect();
    let comparison = ScenarioComparison::new(&results).unwrap();

    write_json(&summaries, &dir.path().join("kinetics.json")).unwrap();
    write_json(&comparison, &dir.path().join("comparison.json")).unwrap();

    let loaded: ScenarioComparison = read_json(&dir.path().join("comparison.json")).unwrap();
    assert_eq!(loaded, comparison);
}

#[test]
fn test_missing_directory_is_an_io_error() {
    let result = run_canonical(SolutionType::PureWater, ContactIntensity::LowFlow);
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("out.json");

    let err = JsonExporter::default().export(&result, &path).unwrap_err();
    assert!(err.to_string().starts_with("I/O error"));
}
