//! Secondary leaching of aluminate-bearing hydrates
//!
//! - Monosulfate destabilizes by `Ms · progress · c_afm` on steps where no
//!   conversion claimed it.
//! - In sulfate-free solutions, ettringite keeps growing by `AFt · g` during an
//!   early window and is then leached by `AFt · progress · c_aft`.
//! - Hydrotalcite dissolves by `Ht · progress · c_ht`.

use crate::chemistry::{Phase, PhaseAssemblage, ReactionFluxes, StepInput};
use crate::models::sulfate::SULFATE_PER_ETTRINGITE;
use crate::models::traits::{Mechanism, MechanismOutcome, available};
use crate::models::Regime;

#[derive(Debug, Clone, Copy, Default)]
pub struct SecondaryLeaching;

impl Mechanism for SecondaryLeaching {
    fn name(&self) -> &str {
        "secondary_leaching"
    }

    fn rate(&self, input: &StepInput<'_>, _regime: Regime, claimed: &PhaseAssemblage) -> MechanismOutcome {
        let l = &input.rates.leaching;
        let progress = input.progress;
        let mut delta = PhaseAssemblage::zeros();
        let mut fluxes = ReactionFluxes::default();

        let monosulfate_claimed = claimed.get(Phase::Monosulfate) < 0.0;
        if !monosulfate_claimed {
            let monosulfate = available(input, claimed, Phase::Monosulfate);
            let dissolved = (monosulfate * progress * l.monosulfate_factor).min(monosulfate);
            delta.set(Phase::Monosulfate, -dissolved);
            fluxes.sulfate_released += dissolved;
        }

        if !input.config.solution.has_sulfate() {
            let ettringite = available(input, claimed, Phase::Ettringite);
            if input.step <= l.ettringite_window_steps {
                delta.set(Phase::Ettringite, ettringite * l.ettringite_growth);
            } else {
                let dissolved = (ettringite * progress * l.ettringite_decay).min(ettringite);
                delta.set(Phase::Ettringite, -dissolved);
                fluxes.sulfate_released += dissolved * SULFATE_PER_ETTRINGITE;
            }
        }

        let hydrotalcite = available(input, claimed, Phase::Hydrotalcite);
        delta.set(
            Phase::Hydrotalcite,
            -(hydrotalcite * progress * l.hydrotalcite_factor).min(hydrotalcite),
        );

        MechanismOutcome { delta, fluxes }
    }
}
