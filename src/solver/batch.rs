//! Batch execution of independent scenarios
//!
//! Scenarios share nothing, so with the `parallel` feature they run on the
//! rayon thread pool. Results come back in input order either way.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::solver::{Scenario, SimulationResult, Solver};

/// Solve every scenario, one result per input in the same order
pub fn run_batch<S>(solver: &S, scenarios: &[Scenario]) -> Vec<Result<SimulationResult, String>>
where
    S: Solver + Sync,
{
    #[cfg(feature = "parallel")]
    {
        scenarios.par_iter().map(|scenario| solver.solve(scenario)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        scenarios.iter().map(|scenario| solver.solve(scenario)).collect()
    }
}

/// Solve every scenario, stopping at the first failure
pub fn try_run_batch<S>(solver: &S, scenarios: &[Scenario]) -> Result<Vec<SimulationResult>, String>
where
    S: Solver + Sync,
{
    run_batch(solver, scenarios).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ContactIntensity, SolutionType};
    use crate::solver::RunDriver;

    #[test]
    fn test_batch_preserves_order() {
        let scenarios = Scenario::canonical_set();
        let results = try_run_batch(&RunDriver::new(), &scenarios).unwrap();

        let ids: Vec<&str> = results.iter().map(|r| r.scenario_id()).collect();
        assert_eq!(
            ids,
            vec![
                "PW_low_flow",
                "PW_enhanced_flow",
                "NaCl_low_flow",
                "NaCl_enhanced_flow",
                "mixed_low_flow",
                "mixed_enhanced_flow",
            ]
        );
    }

    #[test]
    fn test_batch_matches_individual_runs() {
        let scenarios = Scenario::canonical_set();
        let batch = try_run_batch(&RunDriver::new(), &scenarios).unwrap();

        for (scenario, batched) in scenarios.iter().zip(&batch) {
            let single = RunDriver::new().solve(scenario).unwrap();
            assert_eq!(single.time_series, batched.time_series);
        }
    }

    #[test]
    fn test_failure_is_reported_per_scenario() {
        let mut broken = Scenario::canonical(SolutionType::PureWater, ContactIntensity::LowFlow);
        broken.config.water_per_step_kg = -1.0;
        let scenarios = vec![
            Scenario::canonical(SolutionType::ChlorideBrine, ContactIntensity::LowFlow),
            broken,
        ];

        let results = run_batch(&RunDriver::new(), &scenarios);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(try_run_batch(&RunDriver::new(), &scenarios).is_err());
    }
}
