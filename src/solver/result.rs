//! Step records and run results

use crate::analysis::DegradationMetrics;
use crate::chemistry::{AqueousPhase, ExternalSolutionComposition, PhaseAssemblage, PoreSolution};
use crate::config::ScenarioConfig;
use crate::models::Regime;
use crate::solver::{Provenance, Scenario};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =================================================================================================
// Per-step diagnostics
// =================================================================================================

/// Chloride binding detail of one step (chloride-bearing solutions)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChlorideBindingDetail {
    pub chloride_added_mol: f64,
    pub bound_friedel_mol: f64,
    pub bound_csh_mol: f64,
    pub bound_total_mol: f64,
    pub free_chloride_mol_per_kg: f64,
}

/// Sulfate attack detail of one step (sulfate-bearing solutions)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SulfateAttackDetail {
    pub sulfate_added_mol: f64,
    pub sulfate_consumed_mol: f64,
    pub sulfate_released_mol: f64,
    pub ettringite_formed_mol: f64,
    pub gypsum_formed_mol: f64,
    pub monosulfate_converted_mol: f64,
}

/// Fate of the monosulfate (AFm) precursor during one step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AfmEvolutionDetail {
    pub monosulfate_to_ettringite_mol: f64,
    pub monosulfate_to_friedel_mol: f64,
    pub monosulfate_remaining_mol: f64,
}

// =================================================================================================
// Step record
// =================================================================================================

/// Immutable snapshot of the specimen after one exposure step
///
/// Step 0 is the unexposed baseline. Cumulative totals run from step 1 up to
/// and including this step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: usize,
    pub time_days: f64,
    pub cumulative_water_kg: f64,
    /// Effective degradation-progress fraction
    pub progress: f64,
    pub regime: Regime,
    pub phases: PhaseAssemblage,
    pub pore_solution: PoreSolution,
    /// Aqueous phase discarded at the end of this step
    pub discarded: AqueousPhase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chloride_binding: Option<ChlorideBindingDetail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sulfate_attack: Option<SulfateAttackDetail>,
    pub afm_evolution: AfmEvolutionDetail,
    pub chloride_delivered_total_mol: f64,
    pub chloride_bound_total_mol: f64,
    pub sulfate_consumed_total_mol: f64,
    pub calcium_leached_total_mol: f64,
}

impl StepRecord {
    /// pH of the pore solution
    #[inline]
    pub fn ph(&self) -> f64 {
        self.pore_solution.ph
    }
}

// =================================================================================================
// Simulation result
// =================================================================================================

/// Scenario identity and inputs of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationInfo {
    pub scenario_id: String,
    pub config: ScenarioConfig,
    pub external_solution: ExternalSolutionComposition,
    pub provenance: Provenance,
}

/// Complete output of one run
///
/// `time_series` holds N + 1 records, index 0 being the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub simulation_info: SimulationInfo,
    pub time_series: Vec<StepRecord>,
    pub degradation_metrics: DegradationMetrics,
    /// Solver name, chemistry backend, step count, ...
    pub metadata: BTreeMap<String, String>,
}

impl SimulationResult {
    pub fn new(scenario: &Scenario, time_series: Vec<StepRecord>, degradation_metrics: DegradationMetrics) -> Self {
        Self {
            simulation_info: SimulationInfo {
                scenario_id: scenario.id(),
                config: scenario.config.clone(),
                external_solution: scenario.external.clone(),
                provenance: scenario.provenance.clone(),
            },
            time_series,
            degradation_metrics,
            metadata: BTreeMap::new(),
        }
    }

    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    pub fn scenario_id(&self) -> &str {
        &self.simulation_info.scenario_id
    }

    /// Last record (the final state)
    pub fn final_state(&self) -> Option<&StepRecord> {
        self.time_series.last()
    }

    /// Number of records (steps + 1)
    pub fn len(&self) -> usize {
        self.time_series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_series.is_empty()
    }

    /// Elapsed time of every record (days)
    pub fn time_points(&self) -> Vec<f64> {
        self.time_series.iter().map(|r| r.time_days).collect()
    }
}
