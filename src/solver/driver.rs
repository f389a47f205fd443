//! Run driver: repeats the step integrator for the configured step count
//!
//! # Algorithm
//!
//! 1. Validate the scenario (configuration errors abort here)
//! 2. Record the baseline as step 0
//! 3. For k = 1..=N: integrate one step, check the state, record it
//! 4. Extract degradation metrics and attach metadata
//!
//! There is no early exit: a run that starts always produces N + 1 records.
//! No randomness is involved, so identical scenarios give identical results.

use crate::analysis::MetricsExtractor;
use crate::models::PORTLANDITE_DEPLETION_FRACTION;
use crate::chemistry::Phase;
use crate::solver::{self, Scenario, SimulationResult, Solver, StepIntegrator};
use log::{debug, info};

/// Sequential-batch run driver
///
/// # Example
///
/// ```rust
/// use leach_rs::config::{ContactIntensity, SolutionType};
/// use leach_rs::solver::{RunDriver, Scenario, Solver};
///
/// let scenario = Scenario::canonical(SolutionType::PureWater, ContactIntensity::LowFlow);
/// let result = RunDriver::new().solve(&scenario).unwrap();
///
/// assert_eq!(result.len(), 21);
/// assert_eq!(result.time_series[0].ph(), 13.72);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RunDriver {
    integrator: StepIntegrator,
}

impl RunDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_integrator(integrator: StepIntegrator) -> Self {
        Self { integrator }
    }
}

impl Solver for RunDriver {
    fn solve(&self, scenario: &Scenario) -> Result<SimulationResult, String> {
        // ====== Step 1: Validation ======

        scenario.validate()?;

        let config = &scenario.config;
        let steps = config.steps;
        info!(
            "Running {} with {}: {} steps of {} days, {} kg per step",
            scenario.id(),
            scenario.chemistry.name(),
            steps,
            config.step_interval_days,
            config.water_per_step_kg
        );

        // ====== Step 2: Baseline ======

        let mut records = Vec::with_capacity(steps + 1);
        let mut current = self.integrator.initial_record(scenario);
        solver::validate_state(&current, 0)?;
        records.push(current.clone());

        let depletion_threshold =
            PORTLANDITE_DEPLETION_FRACTION * scenario.baseline.phases.get(Phase::Portlandite);

        // ====== Step 3: Exposure steps ======

        for _ in 0..steps {
            let next = self.integrator.step(scenario, &current);
            solver::validate_state(&next, next.step)?;

            debug!(
                "{} step {}: regime {}, pH {:.3}, portlandite {:.4} mol, C-S-H {:.4} mol",
                scenario.id(),
                next.step,
                next.regime,
                next.ph(),
                next.phases.get(Phase::Portlandite),
                next.phases.get(Phase::CshGel)
            );
            if next.regime != current.regime {
                debug!(
                    "{} step {}: regime {} -> {}",
                    scenario.id(),
                    next.step,
                    current.regime,
                    next.regime
                );
            }
            if current.phases.get(Phase::Portlandite) >= depletion_threshold
                && next.phases.get(Phase::Portlandite) < depletion_threshold
            {
                info!("{}: portlandite depleted at step {}", scenario.id(), next.step);
            }

            records.push(next.clone());
            current = next;
        }

        // ====== Step 4: Build result ======

        let metrics = MetricsExtractor::extract(&records, config)?;
        let mut result = SimulationResult::new(scenario, records, metrics);

        result.add_metadata("solver", self.name());
        result.add_metadata("chemistry", scenario.chemistry.name());
        result.add_metadata("scenario", &scenario.id());
        result.add_metadata("steps", &steps.to_string());
        result.add_metadata("step interval (days)", &config.step_interval_days.to_string());
        result.add_metadata("water per step (kg)", &config.water_per_step_kg.to_string());

        info!(
            "{} completed: final pH {:.3}, regime {}",
            scenario.id(),
            current.ph(),
            current.regime
        );

        Ok(result)
    }

    fn name(&self) -> &str {
        "Sequential batch (forward Euler)"
    }
}
