//! Metrics extractor: scalar summaries of one run
//!
//! A single pass over the step records. Pure: nothing is modified.

use crate::chemistry::{Ion, Phase};
use crate::config::ScenarioConfig;
use crate::models::{PORTLANDITE_DEPLETION_FRACTION, Regime};
use crate::solver::{SimulationResult, StepRecord};
use serde::{Deserialize, Serialize};

/// Molar mass of chlorine (g/mol)
pub const CHLORIDE_MOLAR_MASS: f64 = 35.45;

/// Degradation summary of one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradationMetrics {
    pub scenario_id: String,

    pub portlandite_initial_mol: f64,
    pub portlandite_final_mol: f64,
    pub portlandite_consumed_mol: f64,
    pub portlandite_consumed_percent: f64,
    /// First step with portlandite below 10 % of initial
    pub portlandite_depletion_step: Option<usize>,

    pub csh_initial_mol: f64,
    pub csh_final_mol: f64,
    pub csh_consumed_mol: f64,
    pub csh_consumed_percent: f64,

    pub initial_ph: f64,
    pub final_ph: f64,
    pub ph_drop: f64,
    pub final_regime: Regime,

    /// Re-integrated from the discarded leachates
    pub calcium_leached_total_mol: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chloride_delivered_total_mol: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chloride_bound_total_mol: Option<f64>,
    /// mg Cl bound per g paste
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chloride_binding_capacity_mg_per_g: Option<f64>,

    pub friedel_salt_formed_mol: f64,
    pub ettringite_change_mol: f64,
    pub gypsum_formed_mol: f64,
    pub monosulfate_consumed_mol: f64,
    pub monosulfate_consumed_percent: f64,
    pub sulfate_consumed_total_mol: f64,
    pub porosity_increase: f64,
}

/// Computes [`DegradationMetrics`] from a time series
///
/// # Example
///
/// ```rust
/// use leach_rs::analysis::MetricsExtractor;
/// use leach_rs::config::{ContactIntensity, SolutionType};
/// use leach_rs::solver::{RunDriver, Scenario, Solver};
///
/// let scenario = Scenario::canonical(SolutionType::PureWater, ContactIntensity::LowFlow);
/// let result = RunDriver::new().solve(&scenario).unwrap();
///
/// let metrics = MetricsExtractor::from_result(&result).unwrap();
/// assert_eq!(metrics, result.degradation_metrics);
/// ```
pub struct MetricsExtractor;

impl MetricsExtractor {
    pub fn extract(records: &[StepRecord], config: &ScenarioConfig) -> Result<DegradationMetrics, String> {
        let (first, last) = match (records.first(), records.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(format!("{}: empty time series", config.id())),
        };

        let initial = &first.phases;
        let fin = &last.phases;

        let portlandite_initial = initial.get(Phase::Portlandite);
        let depletion_threshold = PORTLANDITE_DEPLETION_FRACTION * portlandite_initial;

        let mut depletion_step = None;
        let mut calcium_leached = 0.0;
        for record in records {
            if depletion_step.is_none() && record.phases.get(Phase::Portlandite) < depletion_threshold {
                depletion_step = Some(record.step);
            }
            calcium_leached += record.discarded.concentrations.get(Ion::Calcium) * record.discarded.water_kg;
        }

        let csh_initial = initial.get(Phase::CshGel);
        let monosulfate_initial = initial.get(Phase::Monosulfate);

        let (chloride_delivered, chloride_bound, capacity) = if config.solution.has_chloride() {
            let bound = last.chloride_bound_total_mol;
            (
                Some(last.chloride_delivered_total_mol),
                Some(bound),
                Some(bound * CHLORIDE_MOLAR_MASS / config.paste_mass_g),
            )
        } else {
            (None, None, None)
        };

        Ok(DegradationMetrics {
            scenario_id: config.id(),

            portlandite_initial_mol: portlandite_initial,
            portlandite_final_mol: fin.get(Phase::Portlandite),
            portlandite_consumed_mol: portlandite_initial - fin.get(Phase::Portlandite),
            portlandite_consumed_percent: percent_lost(portlandite_initial, fin.get(Phase::Portlandite)),
            portlandite_depletion_step: depletion_step,

            csh_initial_mol: csh_initial,
            csh_final_mol: fin.get(Phase::CshGel),
            csh_consumed_mol: csh_initial - fin.get(Phase::CshGel),
            csh_consumed_percent: percent_lost(csh_initial, fin.get(Phase::CshGel)),

            initial_ph: first.ph(),
            final_ph: last.ph(),
            ph_drop: first.ph() - last.ph(),
            final_regime: last.regime,

            calcium_leached_total_mol: calcium_leached,

            chloride_delivered_total_mol: chloride_delivered,
            chloride_bound_total_mol: chloride_bound,
            chloride_binding_capacity_mg_per_g: capacity,

            friedel_salt_formed_mol: fin.get(Phase::FriedelSalt) - initial.get(Phase::FriedelSalt),
            ettringite_change_mol: fin.get(Phase::Ettringite) - initial.get(Phase::Ettringite),
            gypsum_formed_mol: fin.get(Phase::Gypsum) - initial.get(Phase::Gypsum),
            monosulfate_consumed_mol: monosulfate_initial - fin.get(Phase::Monosulfate),
            monosulfate_consumed_percent: percent_lost(monosulfate_initial, fin.get(Phase::Monosulfate)),
            sulfate_consumed_total_mol: last.sulfate_consumed_total_mol,
            porosity_increase: last.pore_solution.porosity - first.pore_solution.porosity,
        })
    }

    /// Recompute the metrics of a finished run
    pub fn from_result(result: &SimulationResult) -> Result<DegradationMetrics, String> {
        Self::extract(&result.time_series, &result.simulation_info.config)
    }
}

fn percent_lost(initial: f64, fin: f64) -> f64 {
    if initial > 0.0 {
        (initial - fin) / initial * 100.0
    } else {
        0.0
    }
}
