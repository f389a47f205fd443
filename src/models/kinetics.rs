//! Closed-form kinetic backend of the equilibrium-solver boundary

use crate::chemistry::{
    EquilibriumSolver, PhaseAssemblage, Reaction, ReactionFluxes, Speciation, StepInput,
};
use crate::models::{
    AlkaliStripping, ChlorideBinding, CshDecalcification, Mechanism, PortlanditeDissolution,
    RegimeClassifier, SecondaryLeaching, SulfateEvolution,
};

/// Placeholder chemistry: regime classification plus the mechanism library
///
/// Mechanisms run in a fixed order. Sulfate conversion comes before chloride
/// binding so that it claims the shared monosulfate precursor first.
///
/// # Example
///
/// ```rust
/// use leach_rs::chemistry::EquilibriumSolver;
/// use leach_rs::models::PlaceholderKinetics;
///
/// let kinetics = PlaceholderKinetics::new();
/// assert_eq!(kinetics.name(), "placeholder_kinetics");
/// assert_eq!(kinetics.mechanism_names()[0], "sulfate_evolution");
/// ```
pub struct PlaceholderKinetics {
    mechanisms: Vec<Box<dyn Mechanism>>,
}

impl PlaceholderKinetics {
    /// Standard mechanism library in claim order
    pub fn new() -> Self {
        Self::with_mechanisms(vec![
            Box::new(SulfateEvolution),
            Box::new(ChlorideBinding),
            Box::new(PortlanditeDissolution),
            Box::new(CshDecalcification),
            Box::new(SecondaryLeaching),
            Box::new(AlkaliStripping),
        ])
    }

    /// Custom mechanism list, evaluated in the given order
    pub fn with_mechanisms(mechanisms: Vec<Box<dyn Mechanism>>) -> Self {
        Self { mechanisms }
    }

    pub fn mechanism_names(&self) -> Vec<&str> {
        self.mechanisms.iter().map(|m| m.name()).collect()
    }
}

impl Default for PlaceholderKinetics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PlaceholderKinetics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaceholderKinetics")
            .field("mechanisms", &self.mechanism_names())
            .finish()
    }
}

impl EquilibriumSolver for PlaceholderKinetics {
    fn react(&self, input: &StepInput<'_>) -> Reaction {
        let classifier = RegimeClassifier::new(&input.rates.regime, &input.baseline.phases);
        let regime = classifier.classify(input.phases);

        let mut delta = PhaseAssemblage::zeros();
        let mut fluxes = ReactionFluxes::default();

        for mechanism in self
            .mechanisms
            .iter()
            .filter(|m| m.applies_to(input.config.solution))
        {
            let outcome = mechanism.rate(input, regime, &delta);
            delta += &outcome.delta;
            fluxes += outcome.fluxes;
        }

        Reaction { regime, delta, fluxes }
    }

    fn speciate(&self, input: &StepInput<'_>, phases: &PhaseAssemblage) -> Speciation {
        let classifier = RegimeClassifier::new(&input.rates.regime, &input.baseline.phases);
        let regime = classifier.classify(phases);
        Speciation {
            regime,
            ph: classifier.ph(regime, input.elapsed_days, input.progress),
        }
    }

    fn name(&self) -> &str {
        "placeholder_kinetics"
    }

    fn description(&self) -> Option<&str> {
        Some("Closed-form kinetic rate laws with regime-based pH (no Gibbs-energy minimization)")
    }
}
