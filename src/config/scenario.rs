//! Scenario identity: solution type × contact intensity

use crate::config::ProcessParameters;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of exposure steps
pub const DEFAULT_STEPS: usize = 20;

/// Default step interval (days)
pub const DEFAULT_STEP_INTERVAL_DAYS: f64 = 3.0;

/// Fresh solution contacted per low-flow step (kg)
pub const LOW_FLOW_WATER_KG: f64 = 0.5;

/// Default enhanced-flow multiplier
pub const DEFAULT_ENHANCEMENT_FACTOR: f64 = 4.0;

/// Default specimen paste mass (g), used for binding capacities
pub const DEFAULT_PASTE_MASS_G: f64 = 5.0;

// =================================================================================================
// Tagged configuration
// =================================================================================================

/// External leaching solution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolutionType {
    /// Neutral pure water
    PureWater,
    /// Sodium chloride brine
    ChlorideBrine,
    /// Mixed sodium chloride + sodium sulfate brine
    MixedBrine,
}

impl SolutionType {
    pub const ALL: [SolutionType; 3] = [
        SolutionType::PureWater,
        SolutionType::ChlorideBrine,
        SolutionType::MixedBrine,
    ];

    /// Short code used in scenario identifiers
    pub fn code(self) -> &'static str {
        match self {
            SolutionType::PureWater => "PW",
            SolutionType::ChlorideBrine => "NaCl",
            SolutionType::MixedBrine => "mixed",
        }
    }

    /// Chloride-binding mechanisms are active
    pub fn has_chloride(self) -> bool {
        matches!(self, SolutionType::ChlorideBrine | SolutionType::MixedBrine)
    }

    /// Sulfate-phase evolution is active
    pub fn has_sulfate(self) -> bool {
        matches!(self, SolutionType::MixedBrine)
    }
}

impl fmt::Display for SolutionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Contact intensity between specimen and solution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactIntensity {
    /// Diffusion-limited immersion
    LowFlow,
    /// Convection-enhanced contact under hydraulic pressure
    EnhancedFlow,
}

impl ContactIntensity {
    pub const ALL: [ContactIntensity; 2] = [ContactIntensity::LowFlow, ContactIntensity::EnhancedFlow];

    pub fn code(self) -> &'static str {
        match self {
            ContactIntensity::LowFlow => "low_flow",
            ContactIntensity::EnhancedFlow => "enhanced_flow",
        }
    }

    /// Multiplier applied to water volume and degradation progress
    pub fn multiplier(self, enhancement_factor: f64) -> f64 {
        match self {
            ContactIntensity::LowFlow => 1.0,
            ContactIntensity::EnhancedFlow => enhancement_factor,
        }
    }
}

impl fmt::Display for ContactIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// =================================================================================================
// Scenario configuration
// =================================================================================================

/// Numerical and protocol parameters of one scenario
///
/// # Example
///
/// ```rust
/// use leach_rs::config::{ContactIntensity, ScenarioConfig, SolutionType};
///
/// let config = ScenarioConfig::canonical(SolutionType::MixedBrine, ContactIntensity::EnhancedFlow);
/// assert_eq!(config.id(), "mixed_enhanced_flow");
/// assert_eq!(config.water_per_step_kg, 2.0);
/// assert!((config.cumulative_water_kg(20) - 40.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub solution: SolutionType,
    pub intensity: ContactIntensity,
    /// Fresh external solution per step (kg)
    pub water_per_step_kg: f64,
    /// Number of exposure steps N
    pub steps: usize,
    pub step_interval_days: f64,
    /// Enhanced-flow multiplier E (ignored for low-flow progress)
    pub enhancement_factor: f64,
    /// Specimen paste mass (g)
    pub paste_mass_g: f64,
}

impl ScenarioConfig {
    /// One of the six canonical scenarios (20 steps of 3 days, 0.5 kg × E per step)
    pub fn canonical(solution: SolutionType, intensity: ContactIntensity) -> Self {
        Self {
            solution,
            intensity,
            water_per_step_kg: LOW_FLOW_WATER_KG * intensity.multiplier(DEFAULT_ENHANCEMENT_FACTOR),
            steps: DEFAULT_STEPS,
            step_interval_days: DEFAULT_STEP_INTERVAL_DAYS,
            enhancement_factor: DEFAULT_ENHANCEMENT_FACTOR,
            paste_mass_g: DEFAULT_PASTE_MASS_G,
        }
    }

    /// Scenario driven by an external process-parameter record
    pub fn from_process(
        solution: SolutionType,
        process: &ProcessParameters,
        enhancement_factor: f64,
    ) -> Self {
        Self {
            solution,
            intensity: process.intensity,
            water_per_step_kg: process.water_per_step_kg,
            steps: process.total_steps,
            step_interval_days: process.step_interval_days,
            enhancement_factor,
            paste_mass_g: DEFAULT_PASTE_MASS_G,
        }
    }

    /// Scenario identifier, e.g. `PW_low_flow`
    pub fn id(&self) -> String {
        format!("{}_{}", self.solution.code(), self.intensity.code())
    }

    /// Effective multiplier for this intensity
    pub fn effective_enhancement(&self) -> f64 {
        self.intensity.multiplier(self.enhancement_factor)
    }

    /// Effective degradation-progress fraction after `step` steps, in [0, 1]
    pub fn progress(&self, step: usize) -> f64 {
        if self.steps == 0 {
            return 0.0;
        }
        (step as f64 * self.effective_enhancement() / self.steps as f64).clamp(0.0, 1.0)
    }

    /// Elapsed time at the end of `step` (days)
    pub fn elapsed_days(&self, step: usize) -> f64 {
        step as f64 * self.step_interval_days
    }

    /// Cumulative external solution after `step` steps (kg)
    pub fn cumulative_water_kg(&self, step: usize) -> f64 {
        step as f64 * self.water_per_step_kg
    }

    pub fn total_duration_days(&self) -> f64 {
        self.elapsed_days(self.steps)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.steps == 0 {
            return Err("Step count must be greater than 0".to_string());
        }
        if !(self.water_per_step_kg.is_finite() && self.water_per_step_kg > 0.0) {
            return Err(format!(
                "Water per step must be positive, got {} kg",
                self.water_per_step_kg
            ));
        }
        if !(self.step_interval_days.is_finite() && self.step_interval_days > 0.0) {
            return Err(format!(
                "Step interval must be positive, got {} days",
                self.step_interval_days
            ));
        }
        if !(self.enhancement_factor.is_finite() && self.enhancement_factor >= 1.0) {
            return Err(format!(
                "Enhancement factor must be at least 1, got {}",
                self.enhancement_factor
            ));
        }
        if !(self.paste_mass_g.is_finite() && self.paste_mass_g > 0.0) {
            return Err(format!("Paste mass must be positive, got {} g", self.paste_mass_g));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_canonical_water_volumes() {
        let low = ScenarioConfig::canonical(SolutionType::PureWater, ContactIntensity::LowFlow);
        let high = ScenarioConfig::canonical(SolutionType::PureWater, ContactIntensity::EnhancedFlow);

        assert_relative_eq!(low.water_per_step_kg, 0.5);
        assert_relative_eq!(high.water_per_step_kg, 2.0);
        assert_relative_eq!(low.cumulative_water_kg(20), 10.0);
        assert_relative_eq!(low.total_duration_days(), 60.0);
        assert_relative_eq!(high.total_duration_days(), 60.0);
    }

    #[test]
    fn test_progress_scales_with_enhancement_and_saturates() {
        let low = ScenarioConfig::canonical(SolutionType::ChlorideBrine, ContactIntensity::LowFlow);
        let high = ScenarioConfig::canonical(SolutionType::ChlorideBrine, ContactIntensity::EnhancedFlow);

        assert_relative_eq!(low.progress(5), 0.25);
        assert_relative_eq!(high.progress(2), 0.4);
        assert_relative_eq!(high.progress(5), 1.0);
        assert_relative_eq!(high.progress(20), 1.0);
        assert_eq!(low.progress(0), 0.0);
    }

    #[test]
    fn test_scenario_ids() {
        let ids: Vec<String> = SolutionType::ALL
            .iter()
            .flat_map(|&s| ContactIntensity::ALL.iter().map(move |&c| ScenarioConfig::canonical(s, c).id()))
            .collect();

        assert_eq!(
            ids,
            vec![
                "PW_low_flow",
                "PW_enhanced_flow",
                "NaCl_low_flow",
                "NaCl_enhanced_flow",
                "mixed_low_flow",
                "mixed_enhanced_flow",
            ]
        );
    }

    #[test]
    fn test_validation_errors() {
        let mut config = ScenarioConfig::canonical(SolutionType::PureWater, ContactIntensity::LowFlow);
        assert!(config.validate().is_ok());

        config.steps = 0;
        assert!(config.validate().unwrap_err().contains("Step count"));

        config.steps = 20;
        config.water_per_step_kg = 0.0;
        assert!(config.validate().unwrap_err().contains("Water per step"));

        config.water_per_step_kg = 0.5;
        config.enhancement_factor = 0.5;
        assert!(config.validate().unwrap_err().contains("Enhancement"));
    }

    #[test]
    fn test_solution_flags() {
        assert!(!SolutionType::PureWater.has_chloride());
        assert!(SolutionType::ChlorideBrine.has_chloride());
        assert!(!SolutionType::ChlorideBrine.has_sulfate());
        assert!(SolutionType::MixedBrine.has_sulfate());
    }
}
