//! Input records of a leaching run
//!
//! Every record is an immutable value passed explicitly into the engine:
//!
//! - [`Baseline`]: 28-day hydration state (initial condition)
//! - [`ProcessParameters`]: renewal schedule for one contact intensity
//! - [`ScenarioConfig`]: solution type × contact intensity plus protocol numbers
//! - [`RateTable`]: kinetic constants for that combination
//!
//! Records derive `serde` traits and can be loaded from JSON through
//! [`JsonConfig`]. File access is a convenience for callers; the engine
//! itself never reads files.
//!
//! # Example
//!
//! ```rust
//! use leach_rs::config::{Baseline, JsonConfig};
//!
//! let json = serde_json::to_string(&Baseline::reference()).unwrap();
//! let baseline = Baseline::from_json_str(&json).unwrap();
//! assert_eq!(baseline.ph, 13.72);
//! ```

mod baseline;
mod process;
mod rates;
mod scenario;

pub use baseline::Baseline;
pub use process::ProcessParameters;
pub use rates::{
    AlkaliRates, ChlorideRates, CshRates, LeachingRates, PortlanditeRates, PoreRates, RateTable,
    RegimeRates, SulfateRates,
};
pub use scenario::{
    ContactIntensity, DEFAULT_ENHANCEMENT_FACTOR, DEFAULT_PASTE_MASS_G, DEFAULT_STEP_INTERVAL_DAYS,
    DEFAULT_STEPS, LOW_FLOW_WATER_KG, ScenarioConfig, SolutionType,
};

use crate::chemistry::ExternalSolutionComposition;
use serde::de::DeserializeOwned;
use std::path::Path;

/// JSON loading for validated configuration records
///
/// Parsing and validation failures are both reported as `Err(String)`, so a
/// malformed input aborts before any step executes.
pub trait JsonConfig: DeserializeOwned {
    /// Record-specific validation
    fn check(&self) -> Result<(), String>;

    fn from_json_str(json: &str) -> Result<Self, String> {
        let record: Self = serde_json::from_str(json).map_err(|e| format!("Invalid JSON: {e}"))?;
        record.check()?;
        Ok(record)
    }

    fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read {}: {e}", path.display()))?;
        Self::from_json_str(&text).map_err(|e| format!("{}: {e}", path.display()))
    }
}

impl JsonConfig for Baseline {
    fn check(&self) -> Result<(), String> {
        self.validate()
    }
}

impl JsonConfig for ProcessParameters {
    fn check(&self) -> Result<(), String> {
        self.validate()
    }
}

impl JsonConfig for ScenarioConfig {
    fn check(&self) -> Result<(), String> {
        self.validate()
    }
}

impl JsonConfig for RateTable {
    fn check(&self) -> Result<(), String> {
        self.validate()
    }
}

impl JsonConfig for ExternalSolutionComposition {
    fn check(&self) -> Result<(), String> {
        self.validate()
    }
}
