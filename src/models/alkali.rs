//! Alkali stripping
//!
//! Na⁺ and K⁺ are washed out of the pore solution within the first few steps
//! and settle at small residuals. Sodium supplied by the external solution is
//! added on top. Solid phases are untouched.

use crate::chemistry::{PhaseAssemblage, ReactionFluxes, StepInput};
use crate::models::traits::{Mechanism, MechanismOutcome};
use crate::models::Regime;

#[derive(Debug, Clone, Copy, Default)]
pub struct AlkaliStripping;

impl Mechanism for AlkaliStripping {
    fn name(&self) -> &str {
        "alkali_stripping"
    }

    fn rate(&self, input: &StepInput<'_>, _regime: Regime, _claimed: &PhaseAssemblage) -> MechanismOutcome {
        let r = &input.rates.alkali;

        let (sodium, potassium) = if input.step <= r.window_steps {
            let remaining = 1.0 - r.decay_amplification * input.progress;
            (
                (r.sodium_peak * remaining).max(r.sodium_residual),
                (r.potassium_peak * remaining).max(r.potassium_residual),
            )
        } else {
            (r.sodium_residual, r.potassium_residual)
        };

        let sodium_added = input.external.sodium * input.water_kg;

        MechanismOutcome {
            delta: PhaseAssemblage::zeros(),
            fluxes: ReactionFluxes {
                pore_sodium_mol_per_kg: sodium + sodium_added / input.water_kg,
                pore_potassium_mol_per_kg: potassium,
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ContactIntensity, SolutionType};
    use crate::models::fixtures::Fixture;
    use approx::assert_relative_eq;

    fn strip(fixture: &Fixture, step: usize) -> ReactionFluxes {
        AlkaliStripping
            .rate(&fixture.input(step), Regime::Buffered, &PhaseAssemblage::zeros())
            .fluxes
    }

    #[test]
    fn test_rapid_depletion_within_window() {
        let fixture = Fixture::new(SolutionType::PureWater, ContactIntensity::LowFlow);

        // progress(1) = 0.05
        let first = strip(&fixture, 1);
        assert_relative_eq!(first.pore_sodium_mol_per_kg, 0.15 * 0.95, epsilon = 1e-12);
        assert_relative_eq!(first.pore_potassium_mol_per_kg, 0.35 * 0.95, epsilon = 1e-12);

        let after = strip(&fixture, 4);
        assert_relative_eq!(after.pore_sodium_mol_per_kg, 0.02);
        assert_relative_eq!(after.pore_potassium_mol_per_kg, 0.05);
    }

    #[test]
    fn test_residual_floor_inside_window() {
        let fixture = Fixture::new(SolutionType::PureWater, ContactIntensity::EnhancedFlow);

        // progress(2) = 0.4, amp 2 → 1 − 0.8 = 0.2; 0.28 × 0.2 = 0.056 > 0.02
        let second = strip(&fixture, 2);
        assert_relative_eq!(second.pore_potassium_mol_per_kg, 0.056, epsilon = 1e-12);
        assert_relative_eq!(second.pore_sodium_mol_per_kg, 0.024, epsilon = 1e-12);
    }

    #[test]
    fn test_external_sodium_added() {
        let fixture = Fixture::new(SolutionType::ChlorideBrine, ContactIntensity::LowFlow);
        let late = strip(&fixture, 10);
        assert_relative_eq!(late.pore_sodium_mol_per_kg, 0.02 + 1.197, epsilon = 1e-12);
    }
}
