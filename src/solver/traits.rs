//! Solver trait
//!
//! A solver turns a [`Scenario`] into a [`SimulationResult`]. Configuration
//! errors are returned as `Err(String)` before any step executes; a run that
//! starts always completes the configured number of steps.

use crate::solver::{Scenario, SimulationResult};

pub trait Solver {
    /// Run the scenario to completion
    fn solve(&self, scenario: &Scenario) -> Result<SimulationResult, String>;

    /// Solver name (stored in result metadata)
    fn name(&self) -> &str;
}
