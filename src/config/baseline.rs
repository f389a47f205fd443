//! 28-day hydration baseline (initial condition of every run)

use crate::chemistry::{Ion, IonConcentrations, Phase, PhaseAssemblage, PoreSolution};
use serde::{Deserialize, Serialize};

/// Initial phase assemblage and pore solution of the paste
///
/// Produced upstream by a hydration model; the engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub phases: PhaseAssemblage,
    pub pore_solution: IonConcentrations,
    #[serde(rename = "pH")]
    pub ph: f64,
    pub porosity: f64,
    pub ionic_strength: f64,
}

impl Baseline {
    /// Reference OPC + fly-ash paste at 28 days (w/b = 0.3)
    pub fn reference() -> Self {
        let phases = PhaseAssemblage::from_pairs([
            (Phase::Portlandite, 4.20),
            (Phase::CshGel, 12.50),
            (Phase::Ettringite, 0.55),
            (Phase::Monosulfate, 0.35),
            (Phase::FriedelSalt, 0.0),
            (Phase::Gypsum, 0.0),
            (Phase::Hydrotalcite, 0.18),
            (Phase::Calcite, 0.05),
            (Phase::C3S, 0.35),
            (Phase::C2S, 0.65),
            (Phase::C3A, 0.0),
            (Phase::C4AF, 0.58),
            (Phase::FlyAshGlass, 3.2),
            (Phase::Mullite, 0.72),
            (Phase::Quartz, 1.00),
        ]);

        let pore_solution = IonConcentrations::from_pairs([
            (Ion::Calcium, 0.022),
            (Ion::Sodium, 0.185),
            (Ion::Potassium, 0.420),
            (Ion::Hydroxide, 0.625),
            (Ion::Sulfate, 0.002),
            (Ion::Aluminate, 0.001),
            (Ion::Silicate, 0.0005),
            (Ion::Chloride, 0.0),
        ]);

        Self {
            phases,
            pore_solution,
            ph: 13.72,
            porosity: 0.15,
            ionic_strength: 0.65,
        }
    }

    /// Pore solution at step 0
    pub fn initial_pore_solution(&self) -> PoreSolution {
        PoreSolution {
            concentrations: self.pore_solution.clone(),
            ph: self.ph,
            ionic_strength: self.ionic_strength,
            porosity: self.porosity,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some((phase, amount)) = self
            .phases
            .iter()
            .find(|(_, v)| !v.is_finite() || *v < 0.0)
        {
            return Err(format!(
                "Baseline phase {} must be finite and non-negative, got {}",
                phase, amount
            ));
        }
        if let Some((ion, c)) = self
            .pore_solution
            .iter()
            .find(|(_, v)| !v.is_finite() || *v < 0.0)
        {
            return Err(format!(
                "Baseline concentration of {} must be finite and non-negative, got {}",
                ion, c
            ));
        }
        if self.phases.get(Phase::Portlandite) <= 0.0 {
            return Err("Baseline must contain portlandite".to_string());
        }
        if self.phases.get(Phase::CshGel) <= 0.0 {
            return Err("Baseline must contain C-S-H gel".to_string());
        }
        if !(self.ph > 0.0 && self.ph <= 14.0) {
            return Err(format!("Baseline pH must be in (0, 14], got {}", self.ph));
        }
        if !(self.porosity >= 0.0 && self.porosity < 1.0) {
            return Err(format!("Baseline porosity must be in [0, 1), got {}", self.porosity));
        }
        if !(self.ionic_strength.is_finite() && self.ionic_strength >= 0.0) {
            return Err(format!(
                "Baseline ionic strength must be non-negative, got {}",
                self.ionic_strength
            ));
        }
        Ok(())
    }
}
