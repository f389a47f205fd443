//! Helper functions for integration tests

use leach_rs::chemistry::Species;
use leach_rs::config::{ContactIntensity, RateTable, SolutionType};
use leach_rs::solver::{RunDriver, Scenario, SimulationResult, Solver};

/// Run one canonical scenario with the default driver
pub fn run_canonical(solution: SolutionType, intensity: ContactIntensity) -> SimulationResult {
    RunDriver::new()
        .solve(&Scenario::canonical(solution, intensity))
        .unwrap_or_else(|e| panic!("{solution} / {intensity} failed: {e}"))
}

/// Reference rates with an unsaturated front and fast portlandite dissolution
///
/// Per-step fractional loss is 0.15 under low flow and 0.27 under enhanced
/// flow, so 10 % of the initial amount is crossed at steps 15 and 8.
pub fn fast_depletion_rates(intensity: ContactIntensity) -> RateTable {
    let mut rates = RateTable::reference(SolutionType::PureWater, intensity);
    rates.portlandite.saturation_cap = 0.0;
    rates.portlandite.rate_per_day = match intensity {
        ContactIntensity::LowFlow => 0.05,
        ContactIntensity::EnhancedFlow => 0.09,
    };
    rates
}

/// Assert every phase amount and pore concentration of every record is >= 0
pub fn assert_non_negative(result: &SimulationResult) {
    for record in &result.time_series {
        for (ion, concentration) in record.pore_solution.concentrations.iter() {
            assert!(
                concentration >= 0.0,
                "{}: {} = {} mol/kg at step {}",
                result.scenario_id(),
                ion.key(),
                concentration,
                record.step
            );
        }
        for (phase, amount) in record.phases.iter() {
            assert!(
                amount >= 0.0,
                "{}: {} = {} at step {}",
                result.scenario_id(),
                phase.key(),
                amount,
                record.step
            );
        }
    }
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}
