//! pH-buffering regime classifier
//!
//! # Regimes
//!
//! The paste passes through three ordered stages as its buffers are leached:
//!
//! | Regime | Condition | pH |
//! |--------|-----------|----|
//! | Buffered | P ≥ f_P·P₀ | plateau |
//! | Transitional | P < f_P·P₀, CSH ≥ f_C·CSH₀ | start − c·m·√t |
//! | Severe | both thresholds breached | severe − s·progress |
//!
//! Where:
//! - **P, CSH** : current portlandite and C-S-H amounts [mol]
//! - **P₀, CSH₀** : baseline amounts [mol]
//! - **f_P, f_C** : threshold fractions from the rate table
//! - **c** : square-root-of-time coefficient (0.02)
//! - **m** : solution × intensity multiplier
//! - **t** : elapsed exposure time [days]
//!
//! Every pH is clamped to the configured bounds (reference [10.0, 13.8]).
//!
//! The regime is recomputed from instantaneous amounts at every step; it is
//! not a one-way state machine.

use crate::chemistry::{Phase, PhaseAssemblage};
use crate::config::RegimeRates;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Active pH-buffering stage, ordered from mildest to most degraded
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Portlandite holds pH at a plateau
    Buffered,
    /// Portlandite exhausted, C-S-H decalcification buffers
    Transitional,
    /// Both buffers breached
    Severe,
}

impl Regime {
    pub fn name(self) -> &'static str {
        match self {
            Regime::Buffered => "buffered",
            Regime::Transitional => "transitional",
            Regime::Severe => "severe",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classifies an assemblage and evaluates the regime's pH
#[derive(Debug, Clone, Copy)]
pub struct RegimeClassifier<'a> {
    rates: &'a RegimeRates,
    initial_portlandite: f64,
    initial_csh: f64,
}

impl<'a> RegimeClassifier<'a> {
    pub fn new(rates: &'a RegimeRates, baseline: &PhaseAssemblage) -> Self {
        Self {
            rates,
            initial_portlandite: baseline.get(Phase::Portlandite),
            initial_csh: baseline.get(Phase::CshGel),
        }
    }

    /// Regime of the given assemblage
    pub fn classify(&self, phases: &PhaseAssemblage) -> Regime {
        let portlandite = phases.get(Phase::Portlandite);
        let csh = phases.get(Phase::CshGel);

        if portlandite >= self.rates.buffer_fraction * self.initial_portlandite {
            Regime::Buffered
        } else if csh >= self.rates.csh_fraction * self.initial_csh {
            Regime::Transitional
        } else {
            Regime::Severe
        }
    }

    /// pH of `regime` after `elapsed_days` at degradation progress `progress`
    pub fn ph(&self, regime: Regime, elapsed_days: f64, progress: f64) -> f64 {
        let r = self.rates;
        let raw = match regime {
            Regime::Buffered => r.plateau_ph,
            Regime::Transitional => {
                r.transitional_start_ph
                    - r.sqrt_time_coefficient * r.time_multiplier * elapsed_days.max(0.0).sqrt()
            }
            Regime::Severe => r.severe_start_ph - r.severe_slope * progress.clamp(0.0, 1.0),
        };
        raw.clamp(r.ph_floor, r.ph_ceiling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Baseline, ContactIntensity, RateTable, SolutionType};
    use approx::assert_relative_eq;

    fn classifier_parts(solution: SolutionType, intensity: ContactIntensity) -> (RateTable, Baseline) {
        (RateTable::reference(solution, intensity), Baseline::reference())
    }

    #[test]
    fn test_baseline_is_buffered() {
        for solution in SolutionType::ALL {
            for intensity in ContactIntensity::ALL {
                let (table, baseline) = classifier_parts(solution, intensity);
                let classifier = RegimeClassifier::new(&table.regime, &baseline.phases);
                assert_eq!(classifier.classify(&baseline.phases), Regime::Buffered);
            }
        }
    }

    #[test]
    fn test_thresholds_are_fractions_of_initial() {
        let (table, baseline) = classifier_parts(SolutionType::MixedBrine, ContactIntensity::EnhancedFlow);
        let classifier = RegimeClassifier::new(&table.regime, &baseline.phases);

        let mut phases = baseline.phases.clone();
        phases.set(Phase::Portlandite, 0.98 * 4.2);
        assert_eq!(classifier.classify(&phases), Regime::Buffered);

        phases.set(Phase::Portlandite, 0.97 * 4.2);
        assert_eq!(classifier.classify(&phases), Regime::Transitional);

        phases.set(Phase::CshGel, 0.27 * 12.5);
        assert_eq!(classifier.classify(&phases), Regime::Severe);
    }

    #[test]
    fn test_plateau_ph() {
        let (table, baseline) = classifier_parts(SolutionType::PureWater, ContactIntensity::LowFlow);
        let classifier = RegimeClassifier::new(&table.regime, &baseline.phases);
        assert_relative_eq!(classifier.ph(Regime::Buffered, 60.0, 1.0), 12.5);
    }

    #[test]
    fn test_transitional_ph_declines_with_sqrt_time() {
        let (table, baseline) = classifier_parts(SolutionType::MixedBrine, ContactIntensity::EnhancedFlow);
        let classifier = RegimeClassifier::new(&table.regime, &baseline.phases);

        // 11.5 - 0.02 * 4.75 * sqrt(60)
        let expected = 11.5 - 0.095 * 60f64.sqrt();
        assert_relative_eq!(classifier.ph(Regime::Transitional, 60.0, 1.0), expected, epsilon = 1e-12);
        assert!(classifier.ph(Regime::Transitional, 30.0, 1.0) > expected);
    }

    #[test]
    fn test_severe_ph_is_clamped_to_floor() {
        let (table, baseline) = classifier_parts(SolutionType::MixedBrine, ContactIntensity::EnhancedFlow);
        let classifier = RegimeClassifier::new(&table.regime, &baseline.phases);

        // 10.0 - 1.5 * 1.0 would be 8.5
        assert_relative_eq!(classifier.ph(Regime::Severe, 60.0, 1.0), 10.0);
    }

    #[test]
    fn test_regime_order() {
        assert!(Regime::Buffered < Regime::Transitional);
        assert!(Regime::Transitional < Regime::Severe);
        assert_eq!(serde_json::to_string(&Regime::Severe).unwrap(), "\"severe\"");
    }
}
