//! Export module for simulation results.
//!
//! # Architecture
//!
//! This module defines the [`Exporter`] trait that abstracts the export format.
//! Each format is an independent implementation in its own sub-module, so a new
//! format is a new file.
//!
//! # Available formats
//!
//! | Format | Module   | Content |
//! |--------|----------|---------|
//! | JSON   | [`json`] | Full result document (info, time series, final state, metrics) |
//! | CSV    | [`csv`]  | One row per step record |
//!
//! # Usage example
//!
//! ```rust,no_run
//! use leach_rs::config::{ContactIntensity, SolutionType};
//! use leach_rs::output::export::{CsvExporter, Exporter, JsonExporter};
//! use leach_rs::solver::{RunDriver, Scenario, Solver};
//!
//! let scenario = Scenario::canonical(SolutionType::MixedBrine, ContactIntensity::EnhancedFlow);
//! let result = RunDriver::new().solve(&scenario).unwrap();
//!
//! JsonExporter::default().export(&result, "mixed_enhanced_flow.json".as_ref()).unwrap();
//! CsvExporter::default().export(&result, "mixed_enhanced_flow.csv".as_ref()).unwrap();
//! ```

pub mod csv;
pub mod json;

pub use csv::{CsvConfig, CsvExporter, CsvMetadata};
pub use json::{JsonExporter, read_json, write_json};

use crate::solver::SimulationResult;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors shared by the built-in exporters
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("result {scenario} has no step records")]
    EmptyResult { scenario: String },

    #[error("invalid data in {scenario}: {reason}")]
    InvalidData { scenario: String, reason: String },
}

/// Abstraction trait for all export formats.
///
/// # Associated type `Error`
///
/// Each format manages its own errors via the associated type, so callers
/// can react to the concrete error instead of a boxed one.
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error + From<std::io::Error>;

    /// File extension without the dot
    fn extension(&self) -> &str;

    /// Writes one result to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the path is invalid or the directory does not exist
    /// - `result` contains no step records
    fn export(&self, result: &SimulationResult, path: &Path) -> Result<(), Self::Error>;

    /// Writes every result to `<dir>/<scenario id>.<extension>`, creating
    /// `dir` if needed. Returns the written paths in input order.
    fn export_all(&self, results: &[SimulationResult], dir: &Path) -> Result<Vec<PathBuf>, Self::Error> {
        fs::create_dir_all(dir)?;
        results
            .iter()
            .map(|result| {
                let path = dir.join(format!("{}.{}", result.scenario_id(), self.extension()));
                self.export(result, &path)?;
                Ok(path)
            })
            .collect()
    }
}

/// Rejects results the exporters cannot write
pub(crate) fn check_exportable(result: &SimulationResult) -> Result<(), ExportError> {
    if result.is_empty() {
        return Err(ExportError::EmptyResult {
            scenario: result.scenario_id().to_string(),
        });
    }
    for record in &result.time_series {
        if !record.phases.is_finite() || !record.pore_solution.is_finite() {
            return Err(ExportError::InvalidData {
                scenario: result.scenario_id().to_string(),
                reason: format!("non-finite value at step {}", record.step),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chemistry::Phase;
    use crate::config::{ContactIntensity, SolutionType};
    use crate::solver::{RunDriver, Scenario, Solver, try_run_batch};
    use tempfile::tempdir;

    #[test]
    fn test_export_all_names_files_by_scenario() {
        let results = try_run_batch(&RunDriver::new(), &Scenario::canonical_set()).unwrap();
        let dir = tempdir().unwrap();
        let out = dir.path().join("results");

        let paths = JsonExporter::default().export_all(&results, &out).unwrap();

        assert_eq!(paths.len(), 6);
        assert_eq!(paths[0], out.join("PW_low_flow.json"));
        assert!(paths.iter().all(|p| p.exists()));
    }

    #[test]
    fn test_empty_result_rejected() {
        let scenario = Scenario::canonical(SolutionType::PureWater, ContactIntensity::LowFlow);
        let mut result = RunDriver::new().solve(&scenario).unwrap();
        result.time_series.clear();

        assert!(matches!(
            check_exportable(&result),
            Err(ExportError::EmptyResult { .. })
        ));
    }

    #[test]
    fn test_non_finite_result_rejected() {
        let scenario = Scenario::canonical(SolutionType::PureWater, ContactIntensity::LowFlow);
        let mut result = RunDriver::new().solve(&scenario).unwrap();
        result.time_series[4].phases.set(Phase::Calcite, f64::NAN);

        let err = check_exportable(&result).unwrap_err();
        assert!(err.to_string().contains("step 4"));
    }
}
