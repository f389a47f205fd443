//! JSON export of simulation results
//!
//! The document carries four content keys plus the run metadata:
//!
//! ```text
//! {
//!   "simulation_info":     scenario id, parameters, provenance
//!   "time_series":         [StepRecord; N + 1]
//!   "final_state":         last StepRecord
//!   "degradation_metrics": DegradationMetrics
//!   "metadata":            solver / chemistry labels
//! }
//! ```
//!
//! Phase and ion maps are written in their fixed enumeration order and the
//! metadata map is sorted, so identical runs produce byte-identical files.

use crate::analysis::DegradationMetrics;
use crate::output::export::{ExportError, Exporter, check_exportable};
use crate::solver::{SimulationInfo, SimulationResult, StepRecord};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

#[derive(Serialize)]
struct ResultDocument<'a> {
    simulation_info: &'a SimulationInfo,
    time_series: &'a [StepRecord],
    final_state: Option<&'a StepRecord>,
    degradation_metrics: &'a DegradationMetrics,
    metadata: &'a BTreeMap<String, String>,
}

impl<'a> From<&'a SimulationResult> for ResultDocument<'a> {
    fn from(result: &'a SimulationResult) -> Self {
        Self {
            simulation_info: &result.simulation_info,
            time_series: &result.time_series,
            final_state: result.final_state(),
            degradation_metrics: &result.degradation_metrics,
            metadata: &result.metadata,
        }
    }
}

/// Writes [`SimulationResult`]s as JSON documents
#[derive(Debug, Clone, Copy)]
pub struct JsonExporter {
    /// Indented output (default: true)
    pub pretty: bool,
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl JsonExporter {
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Render the result document as a string
    pub fn to_string(&self, result: &SimulationResult) -> Result<String, ExportError> {
        check_exportable(result)?;
        let document = ResultDocument::from(result);
        let text = if self.pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        Ok(text)
    }
}

impl Exporter for JsonExporter {
    type Error = ExportError;

    fn extension(&self) -> &str {
        "json"
    }

    fn export(&self, result: &SimulationResult, path: &Path) -> Result<(), ExportError> {
        let text = self.to_string(result)?;
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(text.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

/// Write any serializable value (summaries, comparisons) as pretty JSON
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<(), ExportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Read back a JSON document
///
/// A result document loads as a [`SimulationResult`]; the redundant
/// `final_state` key is ignored.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ExportError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ContactIntensity, SolutionType};
    use crate::solver::{RunDriver, Scenario, Solver};
    use tempfile::NamedTempFile;

    fn result() -> SimulationResult {
        let scenario = Scenario::canonical(SolutionType::ChlorideBrine, ContactIntensity::LowFlow);
        RunDriver::new().solve(&scenario).unwrap()
    }

    #[test]
    fn test_document_keys() {
        let text = JsonExporter::default().to_string(&result()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        for key in ["simulation_info", "time_series", "final_state", "degradation_metrics"] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(value["time_series"].as_array().unwrap().len(), 21);
        assert_eq!(value["final_state"]["step"], 20);
        assert_eq!(value["simulation_info"]["scenario_id"], "NaCl_low_flow");
        assert_eq!(value["time_series"][0]["pore_solution"]["pH"], 13.72);
    }

    #[test]
    fn test_phase_keys_are_stable() {
        let text = JsonExporter::compact().to_string(&result()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let phases = value["final_state"]["phases"].as_object().unwrap();

        assert!(phases.contains_key("portlandite"));
        assert!(phases.contains_key("CSH_gel"));
        assert!(!text.contains('\n'));
    }

    #[test]
    fn test_file_reads_back_as_result() {
        let original = result();
        let file = NamedTempFile::new().unwrap();

        JsonExporter::default().export(&original, file.path()).unwrap();
        let loaded: SimulationResult = read_json(file.path()).unwrap();

        assert_eq!(loaded, original);
    }

    #[test]
    fn test_write_json_for_metrics() {
        let original = result();
        let file = NamedTempFile::new().unwrap();

        write_json(&original.degradation_metrics, file.path()).unwrap();
        let loaded: DegradationMetrics = read_json(file.path()).unwrap();
        assert_eq!(loaded, original.degradation_metrics);
    }
}
