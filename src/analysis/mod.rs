//! Post-run analysis
//!
//! Everything here reads finished [`SimulationResult`](crate::solver::SimulationResult)s
//! and never touches the engine state.
//!
//! - [`MetricsExtractor`]: per-run degradation metrics (attached to every result)
//! - [`KineticSummary`]: apparent rate constants and characteristic times
//! - [`ScenarioComparison`]: severity scoring and rankings across a batch

mod comparison;
mod kinetics;
mod metrics;

pub use comparison::{RankingCriterion, ScenarioComparison, ScenarioSeverity, SeverityLevel};
pub use kinetics::{BUFFER_LOSS_PH, FIT_FLOOR_MOL, KineticSummary, fit_first_order};
pub use metrics::{CHLORIDE_MOLAR_MASS, DegradationMetrics, MetricsExtractor};
