//! Mock chemistry backends for testing the solver in isolation

use leach_rs::chemistry::{
    EquilibriumSolver, Phase, PhaseAssemblage, Reaction, ReactionFluxes, Speciation, StepInput,
};
use leach_rs::models::Regime;

/// Portlandite loses a fixed fraction per step, nothing else reacts
///
/// P_k = P_0 · (1 − f)^k
pub struct FirstOrderPortlandite {
    pub fraction: f64,
    pub ph: f64,
}

impl FirstOrderPortlandite {
    pub fn new(fraction: f64) -> Self {
        Self { fraction, ph: 12.5 }
    }
}

impl EquilibriumSolver for FirstOrderPortlandite {
    fn react(&self, input: &StepInput<'_>) -> Reaction {
        let mut delta = PhaseAssemblage::zeros();
        delta.set(Phase::Portlandite, -self.fraction * input.phases.get(Phase::Portlandite));
        Reaction {
            regime: Regime::Buffered,
            delta,
            fluxes: ReactionFluxes::default(),
        }
    }

    fn speciate(&self, _input: &StepInput<'_>, _phases: &PhaseAssemblage) -> Speciation {
        Speciation {
            regime: Regime::Buffered,
            ph: self.ph,
        }
    }

    fn name(&self) -> &str {
        "first_order_portlandite"
    }
}

/// Produces a NaN C-S-H change from `from_step` on
pub struct PoisonedChemistry {
    pub from_step: usize,
}

impl EquilibriumSolver for PoisonedChemistry {
    fn react(&self, input: &StepInput<'_>) -> Reaction {
        let mut delta = PhaseAssemblage::zeros();
        if input.step >= self.from_step {
            delta.set(Phase::CshGel, f64::NAN);
        }
        Reaction {
            regime: Regime::Buffered,
            delta,
            fluxes: ReactionFluxes::default(),
        }
    }

    fn speciate(&self, _input: &StepInput<'_>, _phases: &PhaseAssemblage) -> Speciation {
        Speciation {
            regime: Regime::Buffered,
            ph: 12.5,
        }
    }

    fn name(&self) -> &str {
        "poisoned"
    }
}
