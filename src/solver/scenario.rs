//! What to run: configuration, inputs and chemistry backend

use crate::chemistry::{EquilibriumSolver, ExternalSolutionComposition};
use crate::config::{Baseline, ContactIntensity, ProcessParameters, RateTable, ScenarioConfig, SolutionType};
use crate::models::PlaceholderKinetics;
use serde::{Deserialize, Serialize};

/// Where the inputs of a run came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    pub baseline: String,
    pub external_solution: String,
    pub process: String,
}

impl Default for Provenance {
    fn default() -> Self {
        Self {
            baseline: "reference".to_string(),
            external_solution: "reference".to_string(),
            process: "reference".to_string(),
        }
    }
}

/// One leaching scenario ready to be solved
pub struct Scenario {
    pub config: ScenarioConfig,
    pub baseline: Baseline,
    pub external: ExternalSolutionComposition,
    pub rates: RateTable,
    pub chemistry: Box<dyn EquilibriumSolver>,
    pub provenance: Provenance,
}

impl Scenario {
    pub fn new(
        config: ScenarioConfig,
        baseline: Baseline,
        external: ExternalSolutionComposition,
        rates: RateTable,
        chemistry: Box<dyn EquilibriumSolver>,
    ) -> Self {
        Self {
            config,
            baseline,
            external,
            rates,
            chemistry,
            provenance: Provenance::default(),
        }
    }

    /// Canonical scenario with reference inputs and placeholder kinetics
    ///
    /// # Example
    ///
    /// ```rust
    /// use leach_rs::config::{ContactIntensity, SolutionType};
    /// use leach_rs::solver::Scenario;
    ///
    /// let scenario = Scenario::canonical(SolutionType::PureWater, ContactIntensity::LowFlow);
    /// assert_eq!(scenario.id(), "PW_low_flow");
    /// assert!(scenario.validate().is_ok());
    /// ```
    pub fn canonical(solution: SolutionType, intensity: ContactIntensity) -> Self {
        Self::new(
            ScenarioConfig::canonical(solution, intensity),
            Baseline::reference(),
            ExternalSolutionComposition::reference(solution),
            RateTable::reference(solution, intensity),
            Box::new(PlaceholderKinetics::new()),
        )
    }

    /// Scenario driven by externally supplied inputs
    pub fn from_inputs(
        solution: SolutionType,
        baseline: Baseline,
        external: ExternalSolutionComposition,
        process: &ProcessParameters,
        enhancement_factor: f64,
    ) -> Self {
        Self::new(
            ScenarioConfig::from_process(solution, process, enhancement_factor),
            baseline,
            external,
            RateTable::reference(solution, process.intensity),
            Box::new(PlaceholderKinetics::new()),
        )
    }

    /// The six canonical scenarios, PW / NaCl / mixed × low / enhanced flow
    pub fn canonical_set() -> Vec<Scenario> {
        SolutionType::ALL
            .iter()
            .flat_map(|&s| ContactIntensity::ALL.iter().map(move |&c| Scenario::canonical(s, c)))
            .collect()
    }

    pub fn with_rates(mut self, rates: RateTable) -> Self {
        self.rates = rates;
        self
    }

    pub fn with_chemistry(mut self, chemistry: Box<dyn EquilibriumSolver>) -> Self {
        self.chemistry = chemistry;
        self
    }

    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }

    pub fn id(&self) -> String {
        self.config.id()
    }

    /// Configuration errors abort before any step executes
    pub fn validate(&self) -> Result<(), String> {
        let id = self.id();
        self.config.validate().map_err(|e| format!("{id}: {e}"))?;
        self.baseline.validate().map_err(|e| format!("{id}: {e}"))?;
        self.external.validate().map_err(|e| format!("{id}: {e}"))?;
        self.rates.validate().map_err(|e| format!("{id}: {e}"))?;
        Ok(())
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("id", &self.id())
            .field("chemistry", &self.chemistry.name())
            .field("steps", &self.config.steps)
            .field("water per step (kg)", &self.config.water_per_step_kg)
            .field("external solution", &self.external.name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_set_order() {
        let ids: Vec<String> = Scenario::canonical_set().iter().map(|s| s.id()).collect();
        assert_eq!(ids.len(), 6);
        assert_eq!(ids[0], "PW_low_flow");
        assert_eq!(ids[5], "mixed_enhanced_flow");
    }

    #[test]
    fn test_canonical_inputs_match_solution() {
        let scenario = Scenario::canonical(SolutionType::MixedBrine, ContactIntensity::EnhancedFlow);
        assert_eq!(scenario.external.name, "mixed");
        assert_eq!(scenario.config.water_per_step_kg, 2.0);
        assert_eq!(scenario.chemistry.name(), "placeholder_kinetics");
    }

    #[test]
    fn test_invalid_baseline_reported_with_id() {
        let mut scenario = Scenario::canonical(SolutionType::PureWater, ContactIntensity::LowFlow);
        scenario.baseline.porosity = 1.5;

        let err = scenario.validate().unwrap_err();
        assert!(err.starts_with("PW_low_flow"));
        assert!(err.contains("porosity"));
    }

    #[test]
    fn test_from_inputs_uses_process_schedule() {
        let process = ProcessParameters::uniform(ContactIntensity::LowFlow, 0.25, 2.0, 10);
        let scenario = Scenario::from_inputs(
            SolutionType::ChlorideBrine,
            Baseline::reference(),
            ExternalSolutionComposition::reference(SolutionType::ChlorideBrine),
            &process,
            4.0,
        );

        assert_eq!(scenario.config.steps, 10);
        assert_eq!(scenario.config.water_per_step_kg, 0.25);
        assert_eq!(scenario.config.total_duration_days(), 20.0);
    }

    #[test]
    fn test_debug_shows_identity() {
        let scenario = Scenario::canonical(SolutionType::ChlorideBrine, ContactIntensity::LowFlow);
        let text = format!("{:?}", scenario);
        assert!(text.contains("NaCl_low_flow"));
        assert!(text.contains("placeholder_kinetics"));
    }
}
