//! Equilibrium-solver strategy boundary
//!
//! This module defines the contract between the step integrator and whatever
//! computes the chemistry of one exposure step:
//! - `EquilibriumSolver`: trait for every chemistry backend
//! - `StepInput`: everything a backend may read for one step
//! - `Reaction` / `ReactionFluxes`: molar changes and bookkeeping it returns
//! - `Speciation`: regime and pH of an updated assemblage
//!
//! The only backend shipped is [`PlaceholderKinetics`](crate::models::PlaceholderKinetics),
//! which evaluates closed-form kinetic rate laws. A Gibbs-energy-minimization
//! backend can be substituted without touching the integrator.
//!
//! The free functions at the bottom are the placeholder thermodynamics shared
//! by the kinetic formulas (hydroxide activity, portlandite solubility).

use crate::chemistry::{ExternalSolutionComposition, PhaseAssemblage, PoreSolution};
use crate::config::{Baseline, RateTable, ScenarioConfig};
use crate::models::Regime;
use serde::{Deserialize, Serialize};

// =================================================================================================
// Step input
// =================================================================================================

/// Read-only view of one exposure step
///
/// `phases` and `pore` describe the specimen at the start of the step.
#[derive(Debug, Clone, Copy)]
pub struct StepInput<'a> {
    /// Index of the step being computed (1-based; 0 is the baseline)
    pub step: usize,
    /// Elapsed exposure time at the end of this step (days)
    pub elapsed_days: f64,
    /// Effective degradation-progress fraction in [0, 1]
    pub progress: f64,
    /// Mass of fresh external solution contacted this step (kg)
    pub water_kg: f64,
    pub phases: &'a PhaseAssemblage,
    pub pore: &'a PoreSolution,
    pub baseline: &'a Baseline,
    pub external: &'a ExternalSolutionComposition,
    pub config: &'a ScenarioConfig,
    pub rates: &'a RateTable,
}

impl StepInput<'_> {
    /// Baseline amount of a phase
    pub fn initial(&self, phase: crate::chemistry::Phase) -> f64 {
        self.baseline.phases.get(phase)
    }
}

// =================================================================================================
// Reaction output
// =================================================================================================

/// Per-step bookkeeping reported alongside the molar deltas
///
/// Amounts are moles unless the field name says otherwise. Every field is
/// additive, so outcomes of several mechanisms can be summed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReactionFluxes {
    /// Chloride delivered by the external solution
    pub chloride_added: f64,
    /// Chloride immobilized in Friedel's salt
    pub chloride_bound_friedel: f64,
    /// Chloride adsorbed on C-S-H gel
    pub chloride_bound_csh: f64,
    /// Free chloride left in solution (mol/kg)
    pub free_chloride_mol_per_kg: f64,
    /// Sulfate delivered by the external solution
    pub sulfate_added: f64,
    /// Sulfate bound into ettringite or gypsum
    pub sulfate_consumed: f64,
    /// Sulfate released by AFm/AFt conversion or dissolution
    pub sulfate_released: f64,
    pub ettringite_formed: f64,
    pub gypsum_formed: f64,
    pub monosulfate_to_ettringite: f64,
    pub monosulfate_to_friedel: f64,
    /// Pore sodium after alkali stripping (mol/kg)
    pub pore_sodium_mol_per_kg: f64,
    /// Pore potassium after alkali stripping (mol/kg)
    pub pore_potassium_mol_per_kg: f64,
}

impl std::ops::AddAssign for ReactionFluxes {
    fn add_assign(&mut self, rhs: Self) {
        self.chloride_added += rhs.chloride_added;
        self.chloride_bound_friedel += rhs.chloride_bound_friedel;
        self.chloride_bound_csh += rhs.chloride_bound_csh;
        self.free_chloride_mol_per_kg += rhs.free_chloride_mol_per_kg;
        self.sulfate_added += rhs.sulfate_added;
        self.sulfate_consumed += rhs.sulfate_consumed;
        self.sulfate_released += rhs.sulfate_released;
        self.ettringite_formed += rhs.ettringite_formed;
        self.gypsum_formed += rhs.gypsum_formed;
        self.monosulfate_to_ettringite += rhs.monosulfate_to_ettringite;
        self.monosulfate_to_friedel += rhs.monosulfate_to_friedel;
        self.pore_sodium_mol_per_kg += rhs.pore_sodium_mol_per_kg;
        self.pore_potassium_mol_per_kg += rhs.pore_potassium_mol_per_kg;
    }
}

impl ReactionFluxes {
    /// Total chloride bound this step
    pub fn chloride_bound(&self) -> f64 {
        self.chloride_bound_friedel + self.chloride_bound_csh
    }
}

/// Result of [`EquilibriumSolver::react`]
#[derive(Debug, Clone)]
pub struct Reaction {
    /// Regime of the start-of-step assemblage
    pub regime: Regime,
    /// Signed molar change of every phase over one step
    pub delta: PhaseAssemblage,
    pub fluxes: ReactionFluxes,
}

/// Result of [`EquilibriumSolver::speciate`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Speciation {
    pub regime: Regime,
    pub ph: f64,
}

// =================================================================================================
// Equilibrium solver trait
// =================================================================================================

/// Chemistry backend of the step integrator
///
/// # Responsibility
///
/// Computes what happens chemically during one step. Does NOT apply the
/// update, clip, or keep any bookkeeping (that is the integrator's job).
///
/// # Purity
///
/// Implementations must be deterministic and side-effect free: the same
/// `StepInput` always yields the same `Reaction` and `Speciation`.
pub trait EquilibriumSolver: Send + Sync {
    /// Molar changes of the solid assemblage over one step
    fn react(&self, input: &StepInput<'_>) -> Reaction;

    /// Regime and pH of the assemblage reached at the end of the step
    fn speciate(&self, input: &StepInput<'_>, phases: &PhaseAssemblage) -> Speciation;

    /// Name of the backend (used for metadata and logging)
    fn name(&self) -> &str;

    /// Description of the backend (optional)
    fn description(&self) -> Option<&str> {
        None
    }
}

// =================================================================================================
// Placeholder thermodynamics
// =================================================================================================

/// Solubility product of portlandite, Ca²⁺·(OH⁻)²
pub const PORTLANDITE_KSP: f64 = 5.5e-6;

/// Calcium concentration at the dissolving portlandite front (mol/kg)
pub const FRONT_CALCIUM: f64 = 0.02;

/// Hydroxide molality from pH (ideal solution)
#[inline]
pub fn hydroxide_molality(ph: f64) -> f64 {
    10f64.powf(ph - 14.0)
}

/// Calcium concentration in equilibrium with portlandite at `ph`
pub fn portlandite_calcium_solubility(ph: f64) -> f64 {
    let oh = hydroxide_molality(ph).max(f64::MIN_POSITIVE);
    PORTLANDITE_KSP / (oh * oh)
}

/// Saturation ratio Ω of the front fluid with respect to portlandite
///
/// `cap` bounds Ω from above so that some driving force (1 − Ω) always remains.
pub fn portlandite_saturation(calcium: f64, ph: f64, cap: f64) -> f64 {
    let solubility = portlandite_calcium_solubility(ph);
    if solubility <= 0.0 || !solubility.is_finite() {
        return cap.clamp(0.0, 1.0);
    }
    (calcium / solubility).clamp(0.0, cap.clamp(0.0, 1.0))
}
