//! Two-pathway chloride binding
//!
//! # Friedel's salt
//!
//! Monosulfate (AFm) exchanges its sulfate for chloride:
//!
//! ```text
//! Ms + 2 Cl⁻ → Fs + SO₄²⁻
//! n = min(rate, Ms_available, Cl_delivered / 2)   while Ms > floor, k ≤ cutoff
//! ```
//!
//! Ms_available is what the sulfate mechanism left this step.
//!
//! # C-S-H adsorption
//!
//! ```text
//! Cl_csh = min(CSH · cap, Cl_delivered · fraction)
//! ```
//!
//! The sum of both pathways never exceeds the chloride delivered this step;
//! whatever is not bound stays in solution and is discarded with it.

use crate::chemistry::{Phase, PhaseAssemblage, ReactionFluxes, StepInput};
use crate::config::SolutionType;
use crate::models::traits::{Mechanism, MechanismOutcome, available};
use crate::models::Regime;

/// Cl⁻ bound per mol of Friedel's salt formed
pub const CHLORIDE_PER_FRIEDEL: f64 = 2.0;

/// SO₄²⁻ released per mol of monosulfate converted
pub const SULFATE_PER_FRIEDEL: f64 = 1.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct ChlorideBinding;

impl Mechanism for ChlorideBinding {
    fn name(&self) -> &str {
        "chloride_binding"
    }

    fn applies_to(&self, solution: SolutionType) -> bool {
        solution.has_chloride()
    }

    fn rate(&self, input: &StepInput<'_>, _regime: Regime, claimed: &PhaseAssemblage) -> MechanismOutcome {
        let r = &input.rates.chloride;
        let delivered = input.external.chloride * input.water_kg;

        let precursor = available(input, claimed, Phase::Monosulfate);
        let converted = if input.step <= r.friedel_cutoff_step && precursor > r.precursor_floor_mol {
            r.friedel_rate
                .min(precursor)
                .min(delivered / CHLORIDE_PER_FRIEDEL)
                .max(0.0)
        } else {
            0.0
        };
        let bound_friedel = converted * CHLORIDE_PER_FRIEDEL;

        let csh = available(input, claimed, Phase::CshGel);
        let bound_csh = (csh * r.csh_capacity_fraction)
            .min(delivered * r.delivered_fraction)
            .min((delivered - bound_friedel).max(0.0));

        let free = ((delivered - bound_friedel - bound_csh) / input.water_kg).max(r.free_chloride_floor);

        let mut delta = PhaseAssemblage::zeros();
        delta.set(Phase::Monosulfate, -converted);
        delta.set(Phase::FriedelSalt, converted);

        MechanismOutcome {
            delta,
            fluxes: ReactionFluxes {
                chloride_added: delivered,
                chloride_bound_friedel: bound_friedel,
                chloride_bound_csh: bound_csh,
                free_chloride_mol_per_kg: free,
                sulfate_released: converted * SULFATE_PER_FRIEDEL,
                monosulfate_to_friedel: converted,
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContactIntensity;
    use crate::models::fixtures::Fixture;
    use approx::assert_relative_eq;

    fn bind(fixture: &Fixture, step: usize, claimed: &PhaseAssemblage) -> MechanismOutcome {
        ChlorideBinding.rate(&fixture.input(step), Regime::Buffered, claimed)
    }

    #[test]
    fn test_only_active_in_chloride_solutions() {
        assert!(!ChlorideBinding.applies_to(SolutionType::PureWater));
        assert!(ChlorideBinding.applies_to(SolutionType::ChlorideBrine));
        assert!(ChlorideBinding.applies_to(SolutionType::MixedBrine));
    }

    #[test]
    fn test_friedel_conversion() {
        let fixture = Fixture::new(SolutionType::ChlorideBrine, ContactIntensity::LowFlow);
        let outcome = bind(&fixture, 1, &PhaseAssemblage::zeros());

        assert_relative_eq!(outcome.delta.get(Phase::Monosulfate), -0.04);
        assert_relative_eq!(outcome.delta.get(Phase::FriedelSalt), 0.04);
        assert_relative_eq!(outcome.fluxes.chloride_bound_friedel, 0.08, epsilon = 1e-12);
        assert_relative_eq!(outcome.fluxes.sulfate_released, 0.04);
    }

    #[test]
    fn test_csh_pathway_limited_by_delivered_fraction() {
        let fixture = Fixture::new(SolutionType::ChlorideBrine, ContactIntensity::LowFlow);
        let outcome = bind(&fixture, 1, &PhaseAssemblage::zeros());

        // delivered = 1.197 × 0.5; gel capacity 12.5 × 0.05 is larger
        let delivered = 1.197 * 0.5;
        assert_relative_eq!(outcome.fluxes.chloride_added, delivered, epsilon = 1e-12);
        assert_relative_eq!(outcome.fluxes.chloride_bound_csh, delivered * 0.30, epsilon = 1e-12);

        let free = (delivered - 0.08 - delivered * 0.30) / 0.5;
        assert_relative_eq!(outcome.fluxes.free_chloride_mol_per_kg, free, epsilon = 1e-12);
    }

    #[test]
    fn test_conversion_stops_after_cutoff() {
        let fixture = Fixture::new(SolutionType::ChlorideBrine, ContactIntensity::EnhancedFlow);
        assert!(bind(&fixture, 10, &PhaseAssemblage::zeros()).fluxes.monosulfate_to_friedel > 0.0);
        assert_eq!(bind(&fixture, 11, &PhaseAssemblage::zeros()).fluxes.monosulfate_to_friedel, 0.0);
    }

    #[test]
    fn test_only_remainder_of_claimed_precursor_is_converted() {
        let fixture = Fixture::new(SolutionType::MixedBrine, ContactIntensity::LowFlow);
        let mut claimed = PhaseAssemblage::zeros();
        claimed.set(Phase::Monosulfate, -0.345);

        // 0.005 mol left, below the precursor floor
        let outcome = bind(&fixture, 1, &claimed);
        assert_eq!(outcome.delta.get(Phase::Monosulfate), 0.0);
        assert_eq!(outcome.fluxes.chloride_bound_friedel, 0.0);
    }

    #[test]
    fn test_bound_never_exceeds_delivered() {
        let mut fixture = Fixture::new(SolutionType::ChlorideBrine, ContactIntensity::LowFlow);
        fixture.external.chloride = 0.01;
        fixture.rates.chloride.delivered_fraction = 1.0;

        let outcome = bind(&fixture, 1, &PhaseAssemblage::zeros());
        assert!(outcome.fluxes.chloride_bound() <= outcome.fluxes.chloride_added + 1e-15);
        assert_relative_eq!(outcome.fluxes.free_chloride_mol_per_kg, 1e-4);
    }
}
