//! One exposure step of the sequential-batch protocol
//!
//! # Algorithm
//!
//! For step k with fresh solution mass W:
//!
//! 1. Ask the equilibrium solver for the step's reaction (regime of the
//!    start-of-step state, molar deltas, fluxes)
//! 2. Forward Euler update: `n_k = n_{k-1} + Δ · τ` with τ = 1 step
//! 3. Clip every phase amount to ≥ 0
//! 4. Re-classify the updated assemblage (regime, pH)
//! 5. Rebuild the pore solution from what was leached into W
//! 6. Advance cumulative totals and discard the spent aqueous phase
//!
//! Deltas from the mechanism library are already expressed per step, so τ is
//! 1 unless a variable step duration is introduced.

use crate::chemistry::{
    AqueousPhase, Ion, IonConcentrations, Phase, PoreSolution, StepInput, hydroxide_molality,
    ionic_strength,
};
use crate::solver::{
    AfmEvolutionDetail, ChlorideBindingDetail, Scenario, StepRecord, SulfateAttackDetail,
};
use log::warn;

/// Smallest water mass used as a divisor (kg)
pub const WATER_FLOOR_KG: f64 = 1e-9;

/// Negative amounts below this magnitude are clipped without a warning (mol)
pub const CLIP_TOLERANCE: f64 = 1e-9;

/// Upper bound of the porosity
pub const MAX_POROSITY: f64 = 0.99;

/// Explicit per-step integrator
#[derive(Debug, Clone, Copy)]
pub struct StepIntegrator {
    /// Multiplier τ of the per-step deltas
    pub step_duration: f64,
}

impl Default for StepIntegrator {
    fn default() -> Self {
        Self { step_duration: 1.0 }
    }
}

impl StepIntegrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record 0: the baseline before any exposure
    pub fn initial_record(&self, scenario: &Scenario) -> StepRecord {
        let config = &scenario.config;
        let pore = scenario.baseline.initial_pore_solution();
        let input = StepInput {
            step: 0,
            elapsed_days: 0.0,
            progress: 0.0,
            water_kg: config.water_per_step_kg.max(WATER_FLOOR_KG),
            phases: &scenario.baseline.phases,
            pore: &pore,
            baseline: &scenario.baseline,
            external: &scenario.external,
            config,
            rates: &scenario.rates,
        };
        let regime = scenario.chemistry.speciate(&input, &scenario.baseline.phases).regime;

        StepRecord {
            step: 0,
            time_days: 0.0,
            cumulative_water_kg: 0.0,
            progress: 0.0,
            regime,
            phases: scenario.baseline.phases.clone(),
            pore_solution: pore,
            discarded: AqueousPhase::none(),
            chloride_binding: None,
            sulfate_attack: None,
            afm_evolution: AfmEvolutionDetail {
                monosulfate_remaining_mol: scenario.baseline.phases.get(Phase::Monosulfate),
                ..Default::default()
            },
            chloride_delivered_total_mol: 0.0,
            chloride_bound_total_mol: 0.0,
            sulfate_consumed_total_mol: 0.0,
            calcium_leached_total_mol: 0.0,
        }
    }

    /// Advance `previous` by one step
    pub fn step(&self, scenario: &Scenario, previous: &StepRecord) -> StepRecord {
        let step = previous.step + 1;
        let config = &scenario.config;
        let pore_rates = &scenario.rates.pore;

        let mut water_kg = config.water_per_step_kg;
        if !(water_kg >= WATER_FLOOR_KG) {
            warn!("Step {step}: water mass {water_kg} kg replaced by {WATER_FLOOR_KG} kg");
            water_kg = WATER_FLOOR_KG;
        }

        let progress = config.progress(step);
        let input = StepInput {
            step,
            elapsed_days: config.elapsed_days(step),
            progress,
            water_kg,
            phases: &previous.phases,
            pore: &previous.pore_solution,
            baseline: &scenario.baseline,
            external: &scenario.external,
            config,
            rates: &scenario.rates,
        };

        let reaction = scenario.chemistry.react(&input);
        let fluxes = reaction.fluxes;

        // ====== Forward Euler update ======

        let mut phases = previous.phases.clone() + reaction.delta * self.step_duration;

        if let Some((phase, amount)) = phases.most_negative()
            && amount < -CLIP_TOLERANCE
        {
            warn!("Step {step}: {phase} driven to {amount:.3e} mol, clipped to zero");
        }
        phases.clip_non_negative();

        let speciation = scenario.chemistry.speciate(&input, &phases);

        // ====== Pore solution ======

        let portlandite_leached =
            (previous.phases.get(Phase::Portlandite) - phases.get(Phase::Portlandite)).max(0.0);
        let csh_decalcified = (previous.phases.get(Phase::CshGel) - phases.get(Phase::CshGel)).max(0.0);
        let calcium =
            (portlandite_leached + scenario.rates.csh.calcium_per_mol * csh_decalcified) / water_kg;

        let sulfate = ((fluxes.sulfate_added + fluxes.sulfate_released - fluxes.sulfate_consumed)
            / water_kg)
            .max(pore_rates.sulfate_floor);

        let mut leachate = IonConcentrations::from_pairs([
            (Ion::Calcium, calcium),
            (Ion::Sodium, fluxes.pore_sodium_mol_per_kg),
            (Ion::Potassium, fluxes.pore_potassium_mol_per_kg),
            (Ion::Hydroxide, hydroxide_molality(speciation.ph)),
            (Ion::Sulfate, sulfate),
            (Ion::Aluminate, pore_rates.aluminate_base * (1.0 + progress * pore_rates.aluminate_gain)),
            (Ion::Silicate, pore_rates.silicate_base * (1.0 + progress * pore_rates.silicate_gain)),
            (Ion::Chloride, fluxes.free_chloride_mol_per_kg),
        ]);
        leachate.clip_non_negative();

        let mut concentrations = leachate.clone();
        concentrations.set(Ion::Calcium, calcium.min(pore_rates.calcium_cap));

        let pore_solution = PoreSolution {
            ionic_strength: ionic_strength(&concentrations),
            concentrations,
            ph: speciation.ph,
            porosity: (scenario.baseline.porosity + progress * pore_rates.porosity_gain)
                .clamp(0.0, MAX_POROSITY),
        };

        let discarded = AqueousPhase {
            concentrations: leachate,
            ph: speciation.ph,
            water_kg,
        };

        // ====== Diagnostics and bookkeeping ======

        let chloride_binding = config.solution.has_chloride().then(|| ChlorideBindingDetail {
            chloride_added_mol: fluxes.chloride_added,
            bound_friedel_mol: fluxes.chloride_bound_friedel,
            bound_csh_mol: fluxes.chloride_bound_csh,
            bound_total_mol: fluxes.chloride_bound(),
            free_chloride_mol_per_kg: fluxes.free_chloride_mol_per_kg,
        });

        let sulfate_attack = config.solution.has_sulfate().then(|| SulfateAttackDetail {
            sulfate_added_mol: fluxes.sulfate_added,
            sulfate_consumed_mol: fluxes.sulfate_consumed,
            sulfate_released_mol: fluxes.sulfate_released,
            ettringite_formed_mol: fluxes.ettringite_formed,
            gypsum_formed_mol: fluxes.gypsum_formed,
            monosulfate_converted_mol: fluxes.monosulfate_to_ettringite,
        });

        let afm_evolution = AfmEvolutionDetail {
            monosulfate_to_ettringite_mol: fluxes.monosulfate_to_ettringite,
            monosulfate_to_friedel_mol: fluxes.monosulfate_to_friedel,
            monosulfate_remaining_mol: phases.get(Phase::Monosulfate),
        };

        StepRecord {
            step,
            time_days: config.elapsed_days(step),
            cumulative_water_kg: previous.cumulative_water_kg + water_kg,
            progress,
            regime: speciation.regime,
            phases,
            pore_solution,
            chloride_binding,
            sulfate_attack,
            afm_evolution,
            chloride_delivered_total_mol: previous.chloride_delivered_total_mol + fluxes.chloride_added,
            chloride_bound_total_mol: previous.chloride_bound_total_mol + fluxes.chloride_bound(),
            sulfate_consumed_total_mol: previous.sulfate_consumed_total_mol + fluxes.sulfate_consumed,
            calcium_leached_total_mol: previous.calcium_leached_total_mol
                + discarded.moles(Ion::Calcium),
            discarded,
        }
    }
}
