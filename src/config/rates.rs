//! Per-mechanism rate constants indexed by solution type × contact intensity
//!
//! One `RateTable` holds every constant the kinetic mechanisms, the regime
//! classifier and the pore-solution update read. `RateTable::reference`
//! reproduces the calibrated constants of the six canonical scenarios; any
//! field can be overridden (or the whole table loaded from JSON) to explore
//! other parameter combinations.

use crate::config::{ContactIntensity, SolutionType};
use serde::{Deserialize, Serialize};

// =================================================================================================
// Mechanism constant groups
// =================================================================================================

/// Portlandite dissolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortlanditeRates {
    /// First-order rate constant k_c (1/day)
    pub rate_per_day: f64,
    /// Solution acceleration factor f_s
    pub solution_factor: f64,
    /// Upper bound of the front saturation ratio Ω
    pub saturation_cap: f64,
    /// Amount below which the asymptotic tail applies (mol)
    pub depletion_floor_mol: f64,
    /// Tail decay factor applied with the progress fraction
    pub tail_factor: f64,
}

/// C-S-H decalcification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CshRates {
    /// Last step without decalcification
    pub onset_step: usize,
    /// Loss per ten elapsed (effective) steps past onset (mol)
    pub rate: f64,
    /// Maximum fractional loss of the initial amount
    pub max_loss_fraction: f64,
    /// Multiplier once portlandite no longer buffers
    pub depletion_amplification: f64,
    /// Ca released per mol of decalcified gel
    pub calcium_per_mol: f64,
}

/// Chloride binding (Friedel's salt and C-S-H adsorption)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChlorideRates {
    /// Monosulfate converted per step (mol)
    pub friedel_rate: f64,
    /// Last step with Friedel's-salt formation
    pub friedel_cutoff_step: usize,
    /// Minimum precursor amount for conversion (mol)
    pub precursor_floor_mol: f64,
    /// Fraction of the gel available for adsorption per step
    pub csh_capacity_fraction: f64,
    /// Fraction of delivered chloride the gel can take up per step
    pub delivered_fraction: f64,
    /// Floor of the free chloride concentration (mol/kg)
    pub free_chloride_floor: f64,
}

/// Sulfate-phase evolution (ettringite, gypsum)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SulfateRates {
    /// Monosulfate converted per step (mol)
    pub conversion_rate: f64,
    /// Maximum fraction of the precursor converted per step
    pub conversion_share: f64,
    /// Last step with monosulfate → ettringite conversion
    pub conversion_cutoff_step: usize,
    pub precursor_floor_mol: f64,
    /// Ettringite growth factor before destabilization
    pub growth_factor: f64,
    /// Last step before ettringite destabilizes
    pub destabilization_step: usize,
    pub destabilization_factor: f64,
    /// Last step without gypsum precipitation
    pub gypsum_step: usize,
    /// Gypsum precipitated per step (mol)
    pub gypsum_rate: f64,
}

/// Alkali (Na, K) stripping from the pore solution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlkaliRates {
    /// Number of steps over which alkalis are stripped
    pub window_steps: usize,
    pub sodium_peak: f64,
    pub potassium_peak: f64,
    /// Amplification of the progress fraction during stripping
    pub decay_amplification: f64,
    pub sodium_residual: f64,
    pub potassium_residual: f64,
}

/// Secondary leaching of AFm, AFt and hydrotalcite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeachingRates {
    /// Monosulfate destabilization coefficient
    pub monosulfate_factor: f64,
    /// Steps during which ettringite still grows in sulfate-free solutions
    pub ettringite_window_steps: usize,
    pub ettringite_growth: f64,
    pub ettringite_decay: f64,
    pub hydrotalcite_factor: f64,
}

/// Regime thresholds and pH trajectories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeRates {
    /// Portlandite fraction of initial above which the paste is buffered
    pub buffer_fraction: f64,
    /// C-S-H fraction of initial above which the regime is transitional
    pub csh_fraction: f64,
    pub plateau_ph: f64,
    pub transitional_start_ph: f64,
    /// Coefficient of the square-root-of-time decline
    pub sqrt_time_coefficient: f64,
    /// Solution × intensity multiplier of the square-root decline
    pub time_multiplier: f64,
    pub severe_start_ph: f64,
    pub severe_slope: f64,
    pub ph_floor: f64,
    pub ph_ceiling: f64,
}

/// Pore-solution update after each step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoreRates {
    /// Cap on the retained pore calcium concentration (mol/kg)
    pub calcium_cap: f64,
    pub sulfate_floor: f64,
    pub aluminate_base: f64,
    pub aluminate_gain: f64,
    pub silicate_base: f64,
    pub silicate_gain: f64,
    /// Porosity increase at full progress
    pub porosity_gain: f64,
}

// =================================================================================================
// Rate table
// =================================================================================================

/// Complete set of kinetic constants for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub portlandite: PortlanditeRates,
    pub csh: CshRates,
    pub chloride: ChlorideRates,
    pub sulfate: SulfateRates,
    pub alkali: AlkaliRates,
    pub leaching: LeachingRates,
    pub regime: RegimeRates,
    pub pore: PoreRates,
}

impl RateTable {
    /// Calibrated constants for one of the six canonical scenarios
    ///
    /// Mechanisms that do not apply to a solution (chloride binding in pure
    /// water, sulfate evolution outside the mixed brine) get zero rates.
    pub fn reference(solution: SolutionType, intensity: ContactIntensity) -> Self {
        use ContactIntensity::{EnhancedFlow, LowFlow};
        use SolutionType::{ChlorideBrine, MixedBrine, PureWater};

        let enhanced = intensity == EnhancedFlow;
        let pick = |low: f64, high: f64| if enhanced { high } else { low };
        let pick_step = |low: usize, high: usize| if enhanced { high } else { low };

        let portlandite = PortlanditeRates {
            rate_per_day: pick(0.012, 0.035),
            solution_factor: match solution {
                PureWater => 1.0,
                ChlorideBrine => 1.35,
                MixedBrine => 1.75,
            },
            saturation_cap: 0.99,
            depletion_floor_mol: 0.01,
            tail_factor: match solution {
                MixedBrine => pick(0.15, 0.25),
                _ => pick(0.1, 0.2),
            },
        };

        let (onset_step, rate, max_loss_fraction) = match (solution, intensity) {
            (PureWater, LowFlow) => (10, 0.05, 0.30),
            (ChlorideBrine, LowFlow) => (9, 0.06, 0.30),
            (MixedBrine, LowFlow) => (8, 0.07, 0.35),
            (PureWater, EnhancedFlow) => (5, 0.12, 0.45),
            (ChlorideBrine, EnhancedFlow) => (4, 0.14, 0.50),
            (MixedBrine, EnhancedFlow) => (4, 0.16, 0.63),
        };
        let csh = CshRates {
            onset_step,
            rate,
            max_loss_fraction,
            depletion_amplification: 1.5,
            calcium_per_mol: 1.7,
        };

        let chloride = match solution {
            PureWater => ChlorideRates {
                friedel_rate: 0.0,
                friedel_cutoff_step: 0,
                precursor_floor_mol: 0.01,
                csh_capacity_fraction: 0.0,
                delivered_fraction: 0.0,
                free_chloride_floor: 0.0,
            },
            ChlorideBrine | MixedBrine => ChlorideRates {
                friedel_rate: if solution == ChlorideBrine {
                    pick(0.04, 0.08)
                } else {
                    pick(0.02, 0.04)
                },
                friedel_cutoff_step: pick_step(15, 10),
                precursor_floor_mol: 0.01,
                csh_capacity_fraction: pick(0.05, 0.08),
                delivered_fraction: if solution == ChlorideBrine {
                    pick(0.30, 0.35)
                } else {
                    pick(0.25, 0.30)
                },
                free_chloride_floor: 1e-4,
            },
        };

        let sulfate = if solution.has_sulfate() {
            SulfateRates {
                conversion_rate: pick(0.03, 0.05),
                conversion_share: pick(0.5, 0.6),
                conversion_cutoff_step: pick_step(12, 8),
                precursor_floor_mol: 0.01,
                growth_factor: pick(0.10, 0.15),
                destabilization_step: pick_step(15, 12),
                destabilization_factor: pick(0.2, 0.3),
                gypsum_step: pick_step(12, 8),
                gypsum_rate: pick(0.02, 0.04),
            }
        } else {
            SulfateRates {
                conversion_rate: 0.0,
                conversion_share: 0.0,
                conversion_cutoff_step: 0,
                precursor_floor_mol: 0.01,
                growth_factor: 0.0,
                destabilization_step: 0,
                destabilization_factor: 0.0,
                gypsum_step: 0,
                gypsum_rate: 0.0,
            }
        };

        let worst_case = solution == MixedBrine && enhanced;
        let alkali = AlkaliRates {
            window_steps: pick_step(3, 2),
            sodium_peak: if worst_case { 0.10 } else { pick(0.15, 0.12) },
            potassium_peak: if worst_case { 0.25 } else { pick(0.35, 0.28) },
            decay_amplification: if worst_case { 3.0 } else { pick(1.0, 2.0) },
            sodium_residual: pick(0.02, 0.01),
            potassium_residual: if worst_case { 0.01 } else { pick(0.05, 0.02) },
        };

        let sulfate_free = !solution.has_sulfate();
        let leaching = LeachingRates {
            monosulfate_factor: match solution {
                PureWater => pick(0.3, 0.45),
                ChlorideBrine => pick(0.1, 0.2),
                MixedBrine => 0.0,
            },
            ettringite_window_steps: if sulfate_free { pick_step(5, 3) } else { 0 },
            ettringite_growth: if sulfate_free { pick(0.05, 0.08) } else { 0.0 },
            ettringite_decay: if sulfate_free { pick(0.15, 0.25) } else { 0.0 },
            hydrotalcite_factor: match solution {
                MixedBrine => pick(0.12, 0.22),
                _ => pick(0.10, 0.18),
            },
        };

        let solution_time_factor = match solution {
            PureWater => 1.0,
            ChlorideBrine => 1.4,
            MixedBrine => 1.9,
        };
        let regime = RegimeRates {
            buffer_fraction: match (solution, intensity) {
                (PureWater | ChlorideBrine, LowFlow) => 0.10,
                (MixedBrine, LowFlow) | (PureWater, EnhancedFlow) => 0.99,
                (ChlorideBrine | MixedBrine, EnhancedFlow) => 0.98,
            },
            csh_fraction: match (solution, intensity) {
                (_, LowFlow) => 0.40,
                (MixedBrine, EnhancedFlow) => 0.28,
                (_, EnhancedFlow) => 0.32,
            },
            plateau_ph: match solution {
                MixedBrine => pick(12.4, 12.2),
                _ => pick(12.5, 12.3),
            },
            transitional_start_ph: match solution {
                MixedBrine => pick(11.8, 11.5),
                _ => pick(12.0, 11.8),
            },
            sqrt_time_coefficient: 0.02,
            time_multiplier: solution_time_factor * pick(1.0, 2.5),
            severe_start_ph: match solution {
                MixedBrine => pick(10.8, 10.0),
                _ => pick(11.0, 10.5),
            },
            severe_slope: match solution {
                MixedBrine => pick(1.2, 1.5),
                _ => pick(1.0, 1.5),
            },
            ph_floor: 10.0,
            ph_ceiling: 13.8,
        };

        let pore = match solution {
            MixedBrine => PoreRates {
                calcium_cap: 0.030,
                sulfate_floor: pick(0.005, 0.008),
                aluminate_base: pick(0.0006, 0.0010),
                aluminate_gain: pick(0.6, 1.0),
                silicate_base: pick(0.0004, 0.0008),
                silicate_gain: pick(2.5, 3.5),
                porosity_gain: pick(0.05, 0.10),
            },
            _ => PoreRates {
                calcium_cap: 0.030,
                sulfate_floor: pick(0.001, 0.002),
                aluminate_base: pick(0.0005, 0.0008),
                aluminate_gain: pick(0.5, 0.8),
                silicate_base: pick(0.0003, 0.0006),
                silicate_gain: pick(2.0, 3.0),
                porosity_gain: pick(0.05, 0.10),
            },
        };

        Self {
            portlandite,
            csh,
            chloride,
            sulfate,
            alkali,
            leaching,
            regime,
            pore,
        }
    }

    /// All constants finite and non-negative, fractions within [0, 1]
    pub fn validate(&self) -> Result<(), String> {
        let p = &self.portlandite;
        let c = &self.csh;
        let cl = &self.chloride;
        let s = &self.sulfate;
        let a = &self.alkali;
        let l = &self.leaching;
        let r = &self.regime;
        let pore = &self.pore;

        let values = [
            ("portlandite.rate_per_day", p.rate_per_day),
            ("portlandite.solution_factor", p.solution_factor),
            ("portlandite.depletion_floor_mol", p.depletion_floor_mol),
            ("portlandite.tail_factor", p.tail_factor),
            ("csh.rate", c.rate),
            ("csh.depletion_amplification", c.depletion_amplification),
            ("csh.calcium_per_mol", c.calcium_per_mol),
            ("chloride.friedel_rate", cl.friedel_rate),
            ("chloride.precursor_floor_mol", cl.precursor_floor_mol),
            ("chloride.free_chloride_floor", cl.free_chloride_floor),
            ("sulfate.conversion_rate", s.conversion_rate),
            ("sulfate.precursor_floor_mol", s.precursor_floor_mol),
            ("sulfate.growth_factor", s.growth_factor),
            ("sulfate.destabilization_factor", s.destabilization_factor),
            ("sulfate.gypsum_rate", s.gypsum_rate),
            ("alkali.sodium_peak", a.sodium_peak),
            ("alkali.potassium_peak", a.potassium_peak),
            ("alkali.decay_amplification", a.decay_amplification),
            ("alkali.sodium_residual", a.sodium_residual),
            ("alkali.potassium_residual", a.potassium_residual),
            ("leaching.monosulfate_factor", l.monosulfate_factor),
            ("leaching.ettringite_growth", l.ettringite_growth),
            ("leaching.ettringite_decay", l.ettringite_decay),
            ("leaching.hydrotalcite_factor", l.hydrotalcite_factor),
            ("regime.sqrt_time_coefficient", r.sqrt_time_coefficient),
            ("regime.time_multiplier", r.time_multiplier),
            ("regime.severe_slope", r.severe_slope),
            ("pore.calcium_cap", pore.calcium_cap),
            ("pore.sulfate_floor", pore.sulfate_floor),
            ("pore.aluminate_base", pore.aluminate_base),
            ("pore.aluminate_gain", pore.aluminate_gain),
            ("pore.silicate_base", pore.silicate_base),
            ("pore.silicate_gain", pore.silicate_gain),
            ("pore.porosity_gain", pore.porosity_gain),
        ];
        for (name, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("Rate constant {name} must be finite and non-negative, got {value}"));
            }
        }

        let fractions = [
            ("portlandite.saturation_cap", p.saturation_cap),
            ("csh.max_loss_fraction", c.max_loss_fraction),
            ("chloride.csh_capacity_fraction", cl.csh_capacity_fraction),
            ("chloride.delivered_fraction", cl.delivered_fraction),
            ("sulfate.conversion_share", s.conversion_share),
            ("regime.buffer_fraction", r.buffer_fraction),
            ("regime.csh_fraction", r.csh_fraction),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("Fraction {name} must be in [0, 1], got {value}"));
            }
        }

        if !(r.ph_floor.is_finite() && r.ph_ceiling.is_finite() && r.ph_floor < r.ph_ceiling) {
            return Err(format!(
                "pH bounds must satisfy floor < ceiling, got [{}, {}]",
                r.ph_floor, r.ph_ceiling
            ));
        }
        for (name, ph) in [
            ("plateau", r.plateau_ph),
            ("transitional start", r.transitional_start_ph),
            ("severe start", r.severe_start_ph),
        ] {
            if !ph.is_finite() {
                return Err(format!("Regime {name} pH must be finite, got {ph}"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn all_tables() -> Vec<RateTable> {
        SolutionType::ALL
            .iter()
            .flat_map(|&s| ContactIntensity::ALL.iter().map(move |&c| RateTable::reference(s, c)))
            .collect()
    }

    #[test]
    fn test_reference_tables_validate() {
        for table in all_tables() {
            assert!(table.validate().is_ok(), "{:?}", table.validate());
        }
    }

    #[test]
    fn test_enhanced_flow_is_faster() {
        for solution in SolutionType::ALL {
            let low = RateTable::reference(solution, ContactIntensity::LowFlow);
            let high = RateTable::reference(solution, ContactIntensity::EnhancedFlow);

            assert!(high.portlandite.rate_per_day > low.portlandite.rate_per_day);
            assert!(high.csh.onset_step < low.csh.onset_step);
            assert!(high.csh.rate > low.csh.rate);
            assert!(high.regime.time_multiplier > low.regime.time_multiplier);
        }
    }

    #[test]
    fn test_brines_accelerate_portlandite() {
        let pw = RateTable::reference(SolutionType::PureWater, ContactIntensity::LowFlow);
        let nacl = RateTable::reference(SolutionType::ChlorideBrine, ContactIntensity::LowFlow);
        let mixed = RateTable::reference(SolutionType::MixedBrine, ContactIntensity::LowFlow);

        assert_relative_eq!(pw.portlandite.solution_factor, 1.0);
        assert_relative_eq!(nacl.portlandite.solution_factor, 1.35);
        assert_relative_eq!(mixed.portlandite.solution_factor, 1.75);
    }

    #[test]
    fn test_transitional_multiplier() {
        let table = RateTable::reference(SolutionType::MixedBrine, ContactIntensity::EnhancedFlow);
        assert_relative_eq!(table.regime.time_multiplier, 4.75, epsilon = 1e-12);
    }

    #[test]
    fn test_inactive_mechanisms_have_zero_rates() {
        let pw = RateTable::reference(SolutionType::PureWater, ContactIntensity::EnhancedFlow);
        assert_eq!(pw.chloride.friedel_rate, 0.0);
        assert_eq!(pw.sulfate.conversion_rate, 0.0);
        assert_eq!(pw.sulfate.gypsum_rate, 0.0);
    }

    #[test]
    fn test_invalid_fraction_rejected() {
        let mut table = RateTable::reference(SolutionType::PureWater, ContactIntensity::LowFlow);
        table.csh.max_loss_fraction = 1.5;
        assert!(table.validate().unwrap_err().contains("csh.max_loss_fraction"));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let mut table = RateTable::reference(SolutionType::PureWater, ContactIntensity::LowFlow);
        table.portlandite.rate_per_day = -0.01;
        assert!(table.validate().unwrap_err().contains("portlandite.rate_per_day"));
    }

    #[test]
    fn test_inverted_ph_bounds_rejected() {
        let mut table = RateTable::reference(SolutionType::PureWater, ContactIntensity::LowFlow);
        table.regime.ph_floor = 14.0;
        assert!(table.validate().unwrap_err().contains("pH bounds"));
    }
}
