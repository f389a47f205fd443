//! Output module for simulation results
//!
//! Results leave the engine only through here; the engine itself never
//! writes files.
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! └── export/             ← Data export
//!     ├── mod.rs          ← Exporter trait, ExportError
//!     ├── json.rs         ← Full result documents
//!     └── csv.rs          ← Tabular time series
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use leach_rs::output::export::{Exporter, JsonExporter};
//!
//! JsonExporter::default().export_all(&results, "results".as_ref())?;
//! ```

pub mod export;

pub use export::{CsvConfig, CsvExporter, CsvMetadata, ExportError, Exporter, JsonExporter};
