//! Run machinery for sequential-batch leaching
//!
//! This module turns a [`Scenario`] into a [`SimulationResult`].
//!
//! # Design Philosophy
//!
//! Chemistry and time stepping are separated:
//! - The equilibrium solver (`chemistry::EquilibriumSolver`) says **what** one
//!   step does to the specimen
//! - The [`StepIntegrator`] says **how** the state is advanced and bookkept
//! - The [`RunDriver`] says **how many** steps and what is recorded
//!
//! # Architecture
//!
//! ```text
//! solver/
//! ├── mod.rs          ← This file (re-exports, state validation)
//! ├── traits.rs       ← Solver trait
//! ├── scenario.rs     ← Scenario, Provenance
//! ├── integrator.rs   ← StepIntegrator (one step)
//! ├── driver.rs       ← RunDriver (N steps)
//! ├── result.rs       ← StepRecord, SimulationResult
//! └── batch.rs        ← run_batch (rayon behind the `parallel` feature)
//! ```
//!
//! # Control flow
//!
//! ```text
//! Scenario ──► RunDriver ──┬─► StepIntegrator ──► EquilibriumSolver::react
//!                          │        │                 (regime + mechanisms)
//!                          │        ├─► Euler update + clipping
//!                          │        ├─► EquilibriumSolver::speciate
//!                          │        └─► pore solution, totals, leachate
//!                          └─► MetricsExtractor ──► SimulationResult
//! ```
//!
//! # Example
//!
//! ```rust
//! use leach_rs::config::{ContactIntensity, SolutionType};
//! use leach_rs::solver::{RunDriver, Scenario, Solver, run_batch};
//!
//! let scenarios = Scenario::canonical_set();
//! let results = run_batch(&RunDriver::new(), &scenarios);
//! assert_eq!(results.len(), 6);
//! assert!(results.iter().all(|r| r.is_ok()));
//! ```

// =================================================================================================
// Module Declarations
// =================================================================================================

mod batch;
mod driver;
mod integrator;
mod result;
mod scenario;
mod traits;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use batch::{run_batch, try_run_batch};
pub use driver::RunDriver;
pub use integrator::{CLIP_TOLERANCE, MAX_POROSITY, StepIntegrator, WATER_FLOOR_KG};
pub use result::{
    AfmEvolutionDetail, ChlorideBindingDetail, SimulationInfo, SimulationResult, StepRecord,
    SulfateAttackDetail,
};
pub use scenario::{Provenance, Scenario};
pub use traits::Solver;

// =================================================================================================
// Helper Functions
// =================================================================================================

/// Validate a step record for numerical issues
///
/// NaN or Inf anywhere in the record is a defect in the chemistry backend,
/// never an expected edge case, so the run is aborted.
///
/// # Arguments
///
/// * `record` - Record to validate
/// * `step` - Current step (for error reporting)
pub(crate) fn validate_state(record: &StepRecord, step: usize) -> Result<(), String> {
    for (phase, amount) in record.phases.iter() {
        if amount.is_nan() {
            return Err(format!("NaN detected in {} at step {}", phase, step));
        }
        if amount.is_infinite() {
            return Err(format!("Infinity detected in {} at step {}", phase, step));
        }
    }

    for (label, solution) in [
        ("pore solution", &record.pore_solution.concentrations),
        ("discarded leachate", &record.discarded.concentrations),
    ] {
        if let Some((ion, value)) = solution.iter().find(|(_, c)| !c.is_finite()) {
            return Err(format!(
                "Non-finite {} concentration in {} at step {}: {}",
                ion, label, step, value
            ));
        }
    }

    let pore = &record.pore_solution;
    for (label, value) in [
        ("pH", pore.ph),
        ("ionic strength", pore.ionic_strength),
        ("porosity", pore.porosity),
        ("calcium leached", record.calcium_leached_total_mol),
        ("chloride bound", record.chloride_bound_total_mol),
        ("sulfate consumed", record.sulfate_consumed_total_mol),
    ] {
        if !value.is_finite() {
            return Err(format!("Non-finite {} at step {}: {}", label, step, value));
        }
    }

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
