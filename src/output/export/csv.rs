//! CSV export of step records
//!
//! One row per [`StepRecord`](crate::solver::StepRecord), compatible with
//! spreadsheets, pandas and most data analysis tools.
//!
//! # Columns
//!
//! `step`, `time (d)`, `cumulative water (kg)`, `progress`, `regime`, `pH`,
//! `porosity`, `ionic strength (mol/kg)`, then one `<phase> (mol)` column per
//! solid phase and one `<ion> (mol/kg)` column per pore-solution ion, both in
//! their fixed enumeration order.
//!
//! # With Metadata
//!
//! ```rust,ignore
//! let config = CsvConfig::default().with_metadata(CsvMetadata::from_result(&result));
//! CsvExporter::new(config).export(&result, "mixed.csv".as_ref())?;
//! ```
//!
//! **Output** (`mixed.csv`):
//! ```csv
//! # Cement Paste Leaching Data
//! # Generated: 2026-10-17T09:30:00+00:00
//! # Scenario: mixed_enhanced_flow
//! # Chemistry: placeholder_kinetics
//! # Solver: Sequential batch (forward Euler)
//! # Steps: 20
//! # Step Interval: 3 d
//! #
//! step,time (d),cumulative water (kg),...
//! 0,0.000000,0.000000,...
//! ```

use crate::chemistry::{Ion, Phase, Species};
use crate::output::export::{ExportError, Exporter, check_exportable};
use crate::solver::SimulationResult;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust,ignore
/// let config = CsvConfig {
///     delimiter: ';',        // European CSV
///     precision: 10,         // High precision
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
        }
    }
}

impl CsvConfig {
    /// Semicolon-delimited, comma decimal separator
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// 12 decimal places
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// Only fields that are set are written.
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    pub scenario: Option<String>,
    pub chemistry: Option<String>,
    pub solver: Option<String>,
    pub steps: Option<usize>,
    /// Days between contacts
    pub step_interval_days: Option<f64>,
    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Collect the header fields from a finished run
    pub fn from_result(result: &SimulationResult) -> Self {
        let config = &result.simulation_info.config;
        Self {
            scenario: Some(result.scenario_id().to_string()),
            chemistry: result.metadata.get("chemistry").cloned(),
            solver: result.metadata.get("solver").cloned(),
            steps: Some(config.steps),
            step_interval_days: Some(config.step_interval_days),
            custom: Vec::new(),
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: &str, value: &str) {
        self.custom.push((key.to_string(), value.to_string()));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn write_metadata_header<W: Write>(out: &mut W, metadata: &CsvMetadata) -> std::io::Result<()> {
    writeln!(out, "# Cement Paste Leaching Data")?;
    writeln!(out, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;

    if let Some(scenario) = &metadata.scenario {
        writeln!(out, "# Scenario: {}", scenario)?;
    }
    if let Some(chemistry) = &metadata.chemistry {
        writeln!(out, "# Chemistry: {}", chemistry)?;
    }
    if let Some(solver) = &metadata.solver {
        writeln!(out, "# Solver: {}", solver)?;
    }
    if let Some(steps) = metadata.steps {
        writeln!(out, "# Steps: {}", steps)?;
    }
    if let Some(interval) = metadata.step_interval_days {
        writeln!(out, "# Step Interval: {} d", interval)?;
    }

    for (key, value) in &metadata.custom {
        writeln!(out, "# {}: {}", key, value)?;
    }

    writeln!(out, "#")
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

/// Column headers, in row order
pub fn column_headers() -> Vec<String> {
    let mut headers: Vec<String> = [
        "step",
        "time (d)",
        "cumulative water (kg)",
        "progress",
        "regime",
        "pH",
        "porosity",
        "ionic strength (mol/kg)",
    ]
    .iter()
    .map(|h| h.to_string())
    .collect();

    headers.extend(Phase::ALL.iter().map(|p| format!("{} (mol)", p.key())));
    headers.extend(Ion::ALL.iter().map(|i| format!("{} (mol/kg)", i.key())));
    headers
}

// =============================================================================
// Exporter
// =============================================================================

/// Writes the time series of a [`SimulationResult`] as CSV
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    pub config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }

    /// Write the CSV text to any sink
    pub fn write_to<W: Write>(&self, result: &SimulationResult, out: &mut W) -> Result<(), ExportError> {
        // ============================= Validation =============================

        check_exportable(result)?;
        let configuration = &self.config;
        let delimiter = configuration.delimiter.to_string();

        if configuration.delimiter == configuration.decimal_separator {
            return Err(ExportError::InvalidData {
                scenario: result.scenario_id().to_string(),
                reason: format!(
                    "delimiter and decimal separator are both '{}'",
                    configuration.delimiter
                ),
            });
        }

        // ============================= Write Metadata =========================

        if configuration.include_metadata
            && let Some(metadata) = &configuration.metadata
        {
            write_metadata_header(out, metadata)?;
        }

        // ============================= Write Header ===========================

        writeln!(out, "{}", column_headers().join(&delimiter))?;

        // ============================= Write Data =============================

        for record in &result.time_series {
            let mut fields = vec![
                record.step.to_string(),
                format_number(record.time_days, configuration),
                format_number(record.cumulative_water_kg, configuration),
                format_number(record.progress, configuration),
                record.regime.name().to_string(),
                format_number(record.ph(), configuration),
                format_number(record.pore_solution.porosity, configuration),
                format_number(record.pore_solution.ionic_strength, configuration),
            ];
            fields.extend(record.phases.iter().map(|(_, v)| format_number(v, configuration)));
            fields.extend(
                record
                    .pore_solution
                    .concentrations
                    .iter()
                    .map(|(_, v)| format_number(v, configuration)),
            );

            writeln!(out, "{}", fields.join(&delimiter))?;
        }

        Ok(())
    }
}

impl Exporter for CsvExporter {
    type Error = ExportError;

    fn extension(&self) -> &str {
        "csv"
    }

    fn export(&self, result: &SimulationResult, path: &Path) -> Result<(), ExportError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(result, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
