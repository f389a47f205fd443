//! Performance benchmarks for the leaching engine
//!
//! # What We're Measuring
//!
//! 1. **Single scenario**: one 20-step run per canonical configuration.
//!    Cost is dominated by the six mechanism evaluations per step and the
//!    composition-vector arithmetic.
//! 2. **Step count scaling**: the same scenario with 20 to 320 steps.
//!    Time should grow linearly with the step count.
//! 3. **Batch**: all six canonical scenarios through `run_batch`. With
//!    `--features parallel` the batch runs on the rayon pool.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench --bench engine_performance
//! cargo bench --bench engine_performance --features parallel batch
//! ```

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use leach_rs::analysis::{KineticSummary, ScenarioComparison};
use leach_rs::config::{ContactIntensity, SolutionType};
use leach_rs::solver::{RunDriver, Scenario, Solver, run_batch, try_run_batch};
use std::hint::black_box;

// =================================================================================================
// Single scenario
// =================================================================================================

fn benchmark_single_scenario(c: &mut Criterion) {
    let mut group = c.benchmark_group("Single scenario");
    let driver = RunDriver::new();

    for scenario in Scenario::canonical_set() {
        group.bench_function(scenario.id(), |b| {
            b.iter(|| driver.solve(black_box(&scenario)).unwrap())
        });
    }

    group.finish();
}

// =================================================================================================
// Step count scaling
// =================================================================================================

fn benchmark_step_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("Step count scaling");
    let driver = RunDriver::new();

    for steps in [20, 40, 80, 160, 320] {
        let mut scenario = Scenario::canonical(SolutionType::MixedBrine, ContactIntensity::EnhancedFlow);
        scenario.config.steps = steps;

        group.bench_with_input(BenchmarkId::from_parameter(steps), &scenario, |b, scenario| {
            b.iter(|| driver.solve(black_box(scenario)).unwrap())
        });
    }

    group.finish();
}

// =================================================================================================
// Batch and analysis
// =================================================================================================

fn benchmark_batch(c: &mut Criterion) {
    let scenarios = Scenario::canonical_set();
    let driver = RunDriver::new();

    c.bench_function("batch/six canonical scenarios", |b| {
        b.iter(|| run_batch(&driver, black_box(&scenarios)))
    });

    let results = try_run_batch(&driver, &scenarios).unwrap();
    c.bench_function("analysis/kinetic summaries and comparison", |b| {
        b.iter(|| {
            let summaries: Vec<KineticSummary> = black_box(&results)
                .iter()
                .map(|r| KineticSummary::from_result(r).unwrap())
                .collect();
            let comparison = ScenarioComparison::new(black_box(&results)).unwrap();
            (summaries, comparison)
        })
    });
}

criterion_group!(
    benches,
    benchmark_single_scenario,
    benchmark_step_scaling,
    benchmark_batch
);
criterion_main!(benches);
