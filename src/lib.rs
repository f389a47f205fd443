//! leach-rs: Cement Paste Leaching Simulation
//!
//! A staged, multi-mechanism kinetic engine for hydrated cement paste exposed
//! to aggressive solutions under a sequential-batch leaching protocol: contact
//! with fresh solution, react, discard, repeat.
//!
//! # Architecture
//!
//! leach-rs is built on two core principles:
//!
//! 1. **Separation of Chemistry and Time Stepping**
//!    - The chemistry backend says what one exposure step does
//!      ([`chemistry::EquilibriumSolver`], implemented by
//!      [`models::PlaceholderKinetics`])
//!    - The solver advances, bookkeeps and records the state
//!      ([`solver::StepIntegrator`], [`solver::RunDriver`])
//!
//! 2. **One Configurable Engine**
//!    - Three external solutions × two contact intensities are six
//!      configurations of the same engine, not six programs
//!    - Every rate constant lives in a [`config::RateTable`]
//!
//! # Quick Start
//!
//! ```rust
//! use leach_rs::config::{ContactIntensity, SolutionType};
//! use leach_rs::solver::{RunDriver, Scenario, Solver};
//!
//! # fn main() -> Result<(), String> {
//! // 1. Canonical scenario: 20 steps of 3 days, reference baseline
//! let scenario = Scenario::canonical(SolutionType::MixedBrine, ContactIntensity::EnhancedFlow);
//!
//! // 2. Run it
//! let result = RunDriver::new().solve(&scenario)?;
//!
//! // 3. Access results
//! let metrics = &result.degradation_metrics;
//! println!("C-S-H consumed: {:.1} %", metrics.csh_consumed_percent);
//! println!("Final regime: {}", metrics.final_regime);
//! assert_eq!(result.len(), 21);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`chemistry`]: Phases, ions, pore solution, the equilibrium-solver boundary
//! - [`config`]: Scenario, baseline, process parameters and rate tables
//! - [`models`]: Regime classifier and degradation mechanisms
//! - [`solver`]: Step integrator, run driver and results
//! - [`analysis`]: Degradation metrics, kinetic summaries, comparisons
//! - [`output`]: JSON and CSV export

pub mod chemistry;
pub mod config;
pub mod models;
pub mod solver;

pub mod analysis;
pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use leach_rs::prelude::*;
    //! ```
    pub use crate::analysis::{DegradationMetrics, KineticSummary, MetricsExtractor, ScenarioComparison};
    pub use crate::chemistry::{EquilibriumSolver, Ion, Phase, PhaseAssemblage, PoreSolution};
    pub use crate::config::{ContactIntensity, RateTable, ScenarioConfig, SolutionType};
    pub use crate::models::{PlaceholderKinetics, Regime, RegimeClassifier};
    pub use crate::output::export::{CsvExporter, Exporter, JsonExporter};
    pub use crate::solver::{RunDriver, Scenario, SimulationResult, Solver, StepRecord, run_batch};
}
