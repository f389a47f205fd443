//! Sulfate-phase evolution in sulfate-bearing solutions
//!
//! Three stages, each gated by a step cutoff:
//!
//! 1. **Conversion** (k ≤ k_conv): Ms + 2 SO₄²⁻ → 2 AFt, `n = min(rate, Ms · share)`;
//!    each ettringite formed binds 3 SO₄²⁻.
//! 2. **Growth / destabilization**: otherwise ettringite grows by
//!    `AFt · g · (1 − progress)` until k_destab, then decays by
//!    `AFt · progress · d`.
//! 3. **Gypsum** (k > k_gyp): precipitates at a fixed rate, consuming as much sulfate.
//!
//! Conversion claims the monosulfate precursor before chloride binding does.

use crate::chemistry::{Phase, PhaseAssemblage, ReactionFluxes, StepInput};
use crate::config::SolutionType;
use crate::models::traits::{Mechanism, MechanismOutcome, available};
use crate::models::Regime;

/// Ettringite formed per mol of monosulfate converted
pub const ETTRINGITE_PER_MONOSULFATE: f64 = 2.0;

/// SO₄²⁻ bound per mol of ettringite
pub const SULFATE_PER_ETTRINGITE: f64 = 3.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct SulfateEvolution;

impl Mechanism for SulfateEvolution {
    fn name(&self) -> &str {
        "sulfate_evolution"
    }

    fn applies_to(&self, solution: SolutionType) -> bool {
        solution.has_sulfate()
    }

    fn rate(&self, input: &StepInput<'_>, _regime: Regime, claimed: &PhaseAssemblage) -> MechanismOutcome {
        let r = &input.rates.sulfate;
        let mut delta = PhaseAssemblage::zeros();
        let mut fluxes = ReactionFluxes {
            sulfate_added: input.external.sulfate * input.water_kg,
            ..Default::default()
        };

        let precursor = available(input, claimed, Phase::Monosulfate);
        let ettringite = available(input, claimed, Phase::Ettringite);

        if input.step <= r.conversion_cutoff_step && precursor > r.precursor_floor_mol {
            let converted = r.conversion_rate.min(precursor * r.conversion_share);
            let formed = converted * ETTRINGITE_PER_MONOSULFATE;

            delta.set(Phase::Monosulfate, -converted);
            delta.set(Phase::Ettringite, formed);
            fluxes.monosulfate_to_ettringite = converted;
            fluxes.ettringite_formed = formed;
            fluxes.sulfate_consumed = formed * SULFATE_PER_ETTRINGITE;
        } else if input.step <= r.destabilization_step {
            let grown = ettringite * r.growth_factor * (1.0 - input.progress);
            delta.set(Phase::Ettringite, grown);
            fluxes.ettringite_formed = grown;
            fluxes.sulfate_consumed = grown * SULFATE_PER_ETTRINGITE;
        } else {
            let dissolved = (ettringite * input.progress * r.destabilization_factor).min(ettringite);
            delta.set(Phase::Ettringite, -dissolved);
            fluxes.sulfate_released = dissolved * SULFATE_PER_ETTRINGITE;
        }

        if input.step > r.gypsum_step {
            delta.add_to(Phase::Gypsum, r.gypsum_rate);
            fluxes.gypsum_formed = r.gypsum_rate;
            fluxes.sulfate_consumed += r.gypsum_rate;
        }

        MechanismOutcome { delta, fluxes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContactIntensity;
    use crate::models::fixtures::Fixture;
    use approx::assert_relative_eq;

    fn evolve(fixture: &Fixture, step: usize) -> MechanismOutcome {
        SulfateEvolution.rate(&fixture.input(step), Regime::Buffered, &PhaseAssemblage::zeros())
    }

    #[test]
    fn test_only_active_in_mixed_brine() {
        assert!(!SulfateEvolution.applies_to(SolutionType::PureWater));
        assert!(!SulfateEvolution.applies_to(SolutionType::ChlorideBrine));
        assert!(SulfateEvolution.applies_to(SolutionType::MixedBrine));
    }

    #[test]
    fn test_early_conversion_to_ettringite() {
        let fixture = Fixture::new(SolutionType::MixedBrine, ContactIntensity::EnhancedFlow);
        let outcome = evolve(&fixture, 1);

        // min(0.05, 0.35 × 0.6)
        assert_relative_eq!(outcome.delta.get(Phase::Monosulfate), -0.05);
        assert_relative_eq!(outcome.delta.get(Phase::Ettringite), 0.10);
        assert_relative_eq!(outcome.fluxes.sulfate_consumed, 0.30, epsilon = 1e-12);
        assert_relative_eq!(outcome.fluxes.sulfate_added, 0.070 * 2.0, epsilon = 1e-12);
        assert_eq!(outcome.delta.get(Phase::Gypsum), 0.0);
    }

    #[test]
    fn test_growth_when_precursor_exhausted() {
        let mut fixture = Fixture::new(SolutionType::MixedBrine, ContactIntensity::LowFlow);
        fixture.phases.set(Phase::Monosulfate, 0.0);

        // 0.55 × 0.10 × (1 − 0.25)
        let outcome = evolve(&fixture, 5);
        assert_relative_eq!(outcome.delta.get(Phase::Ettringite), 0.55 * 0.10 * 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_destabilization_and_gypsum_late() {
        let fixture = Fixture::new(SolutionType::MixedBrine, ContactIntensity::EnhancedFlow);
        let outcome = evolve(&fixture, 13);

        // progress saturates at 1: 0.55 × 1 × 0.3
        assert_relative_eq!(outcome.delta.get(Phase::Ettringite), -0.165, epsilon = 1e-12);
        assert_relative_eq!(outcome.fluxes.sulfate_released, 0.495, epsilon = 1e-12);
        assert_relative_eq!(outcome.delta.get(Phase::Gypsum), 0.04);
        assert_relative_eq!(outcome.fluxes.sulfate_consumed, 0.04);
    }
}
