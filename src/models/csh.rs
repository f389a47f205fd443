//! C-S-H gel decalcification
//!
//! Zero up to an onset step, then proportional to the effective number of
//! steps elapsed past onset:
//!
//! ```text
//! ΔCSH = −min(r · (k − k₀) · E / 10 · a, allowance)
//! allowance = max_loss · CSH₀ − (CSH₀ − CSH)
//! ```
//!
//! `a` amplifies the loss once portlandite no longer buffers the pore
//! solution (regime past Buffered, or portlandite below 10 % of initial).

use crate::chemistry::{Phase, PhaseAssemblage, StepInput};
use crate::models::portlandite::PORTLANDITE_DEPLETION_FRACTION;
use crate::models::traits::{Mechanism, MechanismOutcome, available};
use crate::models::Regime;

#[derive(Debug, Clone, Copy, Default)]
pub struct CshDecalcification;

impl Mechanism for CshDecalcification {
    fn name(&self) -> &str {
        "csh_decalcification"
    }

    fn rate(&self, input: &StepInput<'_>, regime: Regime, claimed: &PhaseAssemblage) -> MechanismOutcome {
        let r = &input.rates.csh;
        if input.step <= r.onset_step {
            return MechanismOutcome::none();
        }

        let initial = input.initial(Phase::CshGel);
        let current = available(input, claimed, Phase::CshGel);
        let allowance = (r.max_loss_fraction * initial - (initial - current)).max(0.0);

        let portlandite_depleted = input.phases.get(Phase::Portlandite)
            < PORTLANDITE_DEPLETION_FRACTION * input.initial(Phase::Portlandite);
        let amplification = if regime != Regime::Buffered || portlandite_depleted {
            r.depletion_amplification
        } else {
            1.0
        };

        let elapsed = (input.step - r.onset_step) as f64 * input.config.effective_enhancement();
        let loss = (r.rate * elapsed / 10.0 * amplification)
            .min(allowance)
            .min(current);

        MechanismOutcome::single(Phase::CshGel, -loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ContactIntensity, SolutionType};
    use crate::models::fixtures::Fixture;
    use approx::assert_relative_eq;

    fn loss(fixture: &Fixture, step: usize, regime: Regime) -> f64 {
        let input = fixture.input(step);
        -CshDecalcification
            .rate(&input, regime, &PhaseAssemblage::zeros())
            .delta
            .get(Phase::CshGel)
    }

    #[test]
    fn test_no_loss_before_onset() {
        let fixture = Fixture::new(SolutionType::PureWater, ContactIntensity::LowFlow);
        for step in 1..=10 {
            assert_eq!(loss(&fixture, step, Regime::Buffered), 0.0);
        }
        assert!(loss(&fixture, 11, Regime::Buffered) > 0.0);
    }

    #[test]
    fn test_linear_growth_past_onset() {
        let fixture = Fixture::new(SolutionType::PureWater, ContactIntensity::LowFlow);
        assert_relative_eq!(loss(&fixture, 11, Regime::Buffered), 0.005, epsilon = 1e-12);
        assert_relative_eq!(loss(&fixture, 14, Regime::Buffered), 0.020, epsilon = 1e-12);
    }

    #[test]
    fn test_enhanced_flow_scales_elapsed_steps() {
        let fixture = Fixture::new(SolutionType::MixedBrine, ContactIntensity::EnhancedFlow);
        // 0.16 × (5 − 4) × 4 / 10
        assert_relative_eq!(loss(&fixture, 5, Regime::Buffered), 0.064, epsilon = 1e-12);
    }

    #[test]
    fn test_amplified_outside_buffered_regime() {
        let fixture = Fixture::new(SolutionType::MixedBrine, ContactIntensity::EnhancedFlow);
        let buffered = loss(&fixture, 6, Regime::Buffered);
        let transitional = loss(&fixture, 6, Regime::Transitional);
        assert_relative_eq!(transitional / buffered, 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_capped_at_max_loss() {
        let mut fixture = Fixture::new(SolutionType::MixedBrine, ContactIntensity::EnhancedFlow);
        // Already lost 62 % of 12.5 mol, cap is 63 %
        fixture.phases.set(Phase::CshGel, 12.5 * 0.38);
        assert_relative_eq!(loss(&fixture, 18, Regime::Transitional), 12.5 * 0.01, epsilon = 1e-9);

        fixture.phases.set(Phase::CshGel, 12.5 * 0.30);
        assert_eq!(loss(&fixture, 18, Regime::Transitional), 0.0);
    }
}
