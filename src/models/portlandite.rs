//! Portlandite (Ca(OH)₂) dissolution
//!
//! ```text
//! ΔP = −k_c · f_s · (1 − Ω) · P · Δt        while P > floor
//! ΔP = −P · tail · progress                 below the floor
//! ```
//!
//! Where:
//! - **k_c** : rate constant [1/day], higher under enhanced flow
//! - **f_s** : solution acceleration factor (chloride and mixed brines > 1)
//! - **Ω** : saturation ratio of the front fluid, capped so that 1 − Ω > 0
//! - **Δt** : step interval [days]
//!
//! The tail keeps decaying toward zero instead of stopping at the floor.

use crate::chemistry::{FRONT_CALCIUM, Phase, PhaseAssemblage, StepInput, portlandite_saturation};
use crate::models::traits::{Mechanism, MechanismOutcome, available};
use crate::models::Regime;

/// Fraction of initial portlandite below which it counts as depleted
pub const PORTLANDITE_DEPLETION_FRACTION: f64 = 0.10;

#[derive(Debug, Clone, Copy, Default)]
pub struct PortlanditeDissolution;

impl Mechanism for PortlanditeDissolution {
    fn name(&self) -> &str {
        "portlandite_dissolution"
    }

    fn rate(&self, input: &StepInput<'_>, _regime: Regime, claimed: &PhaseAssemblage) -> MechanismOutcome {
        let r = &input.rates.portlandite;
        let amount = available(input, claimed, Phase::Portlandite);

        let loss = if amount > r.depletion_floor_mol {
            let omega = portlandite_saturation(FRONT_CALCIUM, input.baseline.ph, r.saturation_cap);
            r.rate_per_day * r.solution_factor * (1.0 - omega) * amount * input.config.step_interval_days
        } else {
            amount * r.tail_factor * input.progress
        };

        MechanismOutcome::single(Phase::Portlandite, -loss.clamp(0.0, amount))
    }
}
