// =================================================================================================
// Mechanism trait
// =================================================================================================

use crate::chemistry::{Phase, PhaseAssemblage, ReactionFluxes, StepInput};
use crate::config::SolutionType;
use crate::models::Regime;

/// Molar changes and bookkeeping produced by one mechanism for one step
#[derive(Debug, Clone, Default)]
pub struct MechanismOutcome {
    pub delta: PhaseAssemblage,
    pub fluxes: ReactionFluxes,
}

impl MechanismOutcome {
    /// No change
    pub fn none() -> Self {
        Self::default()
    }

    /// Outcome changing a single phase
    pub fn single(phase: Phase, amount: f64) -> Self {
        let mut delta = PhaseAssemblage::zeros();
        delta.set(phase, amount);
        Self {
            delta,
            fluxes: ReactionFluxes::default(),
        }
    }
}

/// Kinetic rate law for one degradation mechanism
///
/// # Responsibility
///
/// A mechanism turns the start-of-step state into signed molar deltas
/// expressed per step. It does NOT apply them; the step integrator does.
///
/// # Shared precursors
///
/// Mechanisms are evaluated in a fixed order. `claimed` holds the deltas of
/// the mechanisms already evaluated this step, so a mechanism drawing on a
/// phase another one consumed first only sees the remainder
/// (see [`available`]).
pub trait Mechanism: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Whether the mechanism is active for this external solution
    fn applies_to(&self, _solution: SolutionType) -> bool {
        true
    }

    /// Deltas for one step, given the regime of the start-of-step state
    fn rate(&self, input: &StepInput<'_>, regime: Regime, claimed: &PhaseAssemblage) -> MechanismOutcome;
}

/// Amount of `phase` not yet claimed by earlier mechanisms this step
#[inline]
pub fn available(input: &StepInput<'_>, claimed: &PhaseAssemblage, phase: Phase) -> f64 {
    (input.phases.get(phase) + claimed.get(phase)).max(0.0)
}
