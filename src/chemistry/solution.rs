//! Aqueous phases: pore solution, external leaching solution, discarded leachate

use crate::chemistry::composition::{Composition, Species};
use crate::config::SolutionType;
use serde::{Deserialize, Serialize};
use std::fmt;

// =================================================================================================
// Ion species
// =================================================================================================

/// Dissolved species tracked in the pore solution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Ion {
    Calcium,
    Sodium,
    Potassium,
    Hydroxide,
    Sulfate,
    Aluminate,
    Silicate,
    Chloride,
}

impl Species for Ion {
    const ALL: &'static [Ion] = &[
        Ion::Calcium,
        Ion::Sodium,
        Ion::Potassium,
        Ion::Hydroxide,
        Ion::Sulfate,
        Ion::Aluminate,
        Ion::Silicate,
        Ion::Chloride,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn key(self) -> &'static str {
        match self {
            Ion::Calcium => "Ca+2",
            Ion::Sodium => "Na+",
            Ion::Potassium => "K+",
            Ion::Hydroxide => "OH-",
            Ion::Sulfate => "SO4-2",
            Ion::Aluminate => "AlO2-",
            Ion::Silicate => "SiO3-2",
            Ion::Chloride => "Cl-",
        }
    }
}

impl Ion {
    /// Formal charge
    pub fn charge(self) -> i32 {
        match self {
            Ion::Calcium => 2,
            Ion::Sodium | Ion::Potassium => 1,
            Ion::Hydroxide | Ion::Aluminate | Ion::Chloride => -1,
            Ion::Sulfate | Ion::Silicate => -2,
        }
    }
}

impl fmt::Display for Ion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Molar concentrations (mol/kg water) of every [`Ion`]
pub type IonConcentrations = Composition<Ion>;

/// Ionic strength I = ½ Σ cᵢ zᵢ²
pub fn ionic_strength(concentrations: &IonConcentrations) -> f64 {
    0.5 * concentrations
        .iter()
        .map(|(ion, c)| {
            let z = ion.charge() as f64;
            c * z * z
        })
        .sum::<f64>()
}

// =================================================================================================
// Pore solution
// =================================================================================================

/// Pore-solution state of the specimen
///
/// pH is derived by the regime formulas at every step; it is only set directly
/// for the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoreSolution {
    pub concentrations: IonConcentrations,
    #[serde(rename = "pH")]
    pub ph: f64,
    pub ionic_strength: f64,
    pub porosity: f64,
}

impl PoreSolution {
    /// Concentration of `ion`
    #[inline]
    pub fn get(&self, ion: Ion) -> f64 {
        self.concentrations.get(ion)
    }

    /// True when every scalar and concentration is finite
    pub fn is_finite(&self) -> bool {
        self.concentrations.is_finite()
            && self.ph.is_finite()
            && self.ionic_strength.is_finite()
            && self.porosity.is_finite()
    }
}

// =================================================================================================
// External solution
// =================================================================================================

/// Composition of the fresh solution contacted with the specimen at every step
///
/// The nominal pH is reported only; the engine never equilibrates against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalSolutionComposition {
    /// Solution label (e.g. "PW", "NaCl", "mixed")
    pub name: String,
    /// Na⁺ (mol/L)
    pub sodium: f64,
    /// Cl⁻ (mol/L)
    pub chloride: f64,
    /// SO₄²⁻ (mol/L)
    pub sulfate: f64,
    #[serde(rename = "pH")]
    pub ph: f64,
}

impl ExternalSolutionComposition {
    /// Reference composition of each named solution
    ///
    /// | Solution | Na⁺ | Cl⁻ | SO₄²⁻ | pH |
    /// |----------|-----|-----|-------|----|
    /// | PW       | 0     | 0     | 0     | 7.0 |
    /// | NaCl     | 1.197 | 1.197 | 0     | 7.2 |
    /// | mixed    | 1.337 | 1.197 | 0.070 | 7.3 |
    pub fn reference(solution: SolutionType) -> Self {
        let (sodium, chloride, sulfate, ph) = match solution {
            SolutionType::PureWater => (0.0, 0.0, 0.0, 7.0),
            SolutionType::ChlorideBrine => (1.197, 1.197, 0.0, 7.2),
            SolutionType::MixedBrine => (1.337, 1.197, 0.070, 7.3),
        };

        Self {
            name: solution.code().to_string(),
            sodium,
            chloride,
            sulfate,
            ph,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        for (label, value) in [
            ("sodium", self.sodium),
            ("chloride", self.chloride),
            ("sulfate", self.sulfate),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!(
                    "External solution '{}': {} concentration must be finite and non-negative, got {}",
                    self.name, label, value
                ));
            }
        }
        if !(self.ph > 0.0 && self.ph <= 14.0) {
            return Err(format!(
                "External solution '{}': pH must be in (0, 14], got {}",
                self.name, self.ph
            ));
        }
        Ok(())
    }
}

// =================================================================================================
// Discarded leachate
// =================================================================================================

/// Aqueous phase removed at the end of a step
///
/// Carries the leachate composition before pore-solution solubility caps are
/// applied, so that re-integrating `concentration × water_kg` over the run
/// recovers the moles actually leached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AqueousPhase {
    pub concentrations: IonConcentrations,
    #[serde(rename = "pH")]
    pub ph: f64,
    pub water_kg: f64,
}

impl AqueousPhase {
    /// Empty leachate (step 0, nothing discarded yet)
    pub fn none() -> Self {
        Self {
            concentrations: IonConcentrations::zeros(),
            ph: 0.0,
            water_kg: 0.0,
        }
    }

    /// Moles of `ion` carried away with this leachate
    pub fn moles(&self, ion: Ion) -> f64 {
        self.concentrations.get(ion) * self.water_kg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ionic_strength_of_simple_salts() {
        // 0.1 mol/kg NaCl → I = 0.1
        let nacl = IonConcentrations::from_pairs([(Ion::Sodium, 0.1), (Ion::Chloride, 0.1)]);
        assert_relative_eq!(ionic_strength(&nacl), 0.1, epsilon = 1e-12);

        // 0.1 mol/kg CaSO4 → I = 0.4
        let gypsum = IonConcentrations::from_pairs([(Ion::Calcium, 0.1), (Ion::Sulfate, 0.1)]);
        assert_relative_eq!(ionic_strength(&gypsum), 0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_reference_solutions() {
        let pw = ExternalSolutionComposition::reference(SolutionType::PureWater);
        assert_eq!(pw.chloride, 0.0);
        assert!(pw.validate().is_ok());

        let mixed = ExternalSolutionComposition::reference(SolutionType::MixedBrine);
        assert_relative_eq!(mixed.sulfate, 0.070);
        assert_relative_eq!(mixed.chloride, 1.197);
        assert_eq!(mixed.name, "mixed");
    }

    #[test]
    fn test_invalid_external_solution() {
        let mut brine = ExternalSolutionComposition::reference(SolutionType::ChlorideBrine);
        brine.chloride = -1.0;
        assert!(brine.validate().unwrap_err().contains("chloride"));

        let mut acid = ExternalSolutionComposition::reference(SolutionType::PureWater);
        acid.ph = 0.0;
        assert!(acid.validate().unwrap_err().contains("pH"));
    }

    #[test]
    fn test_aqueous_phase_moles() {
        let leachate = AqueousPhase {
            concentrations: IonConcentrations::from_pairs([(Ion::Calcium, 0.004)]),
            ph: 12.5,
            water_kg: 0.5,
        };
        assert_relative_eq!(leachate.moles(Ion::Calcium), 0.002);
        assert_eq!(AqueousPhase::none().moles(Ion::Calcium), 0.0);
    }
}
