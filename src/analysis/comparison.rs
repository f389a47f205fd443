//! Cross-scenario comparison
//!
//! Ranks a batch of runs and scores their relative severity. Each criterion
//! is normalized by its maximum over the batch, so scores are only comparable
//! within one comparison.

use crate::config::{ContactIntensity, SolutionType};
use crate::solver::SimulationResult;
use serde::{Deserialize, Serialize};
use std::fmt;

const WEIGHT_PORTLANDITE: f64 = 0.35;
const WEIGHT_CSH: f64 = 0.35;
const WEIGHT_PH: f64 = 0.15;
const WEIGHT_POROSITY: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    Minor,
    Mild,
    Moderate,
    Severe,
    VerySevere,
}

impl SeverityLevel {
    pub fn from_score(score: f64) -> Self {
        if score > 0.8 {
            Self::VerySevere
        } else if score > 0.6 {
            Self::Severe
        } else if score > 0.4 {
            Self::Moderate
        } else if score > 0.2 {
            Self::Mild
        } else {
            Self::Minor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Minor => "Minor",
            Self::Mild => "Mild",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
            Self::VerySevere => "Very Severe",
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingCriterion {
    PortlanditeLoss,
    CshLoss,
    PhDrop,
    PorosityIncrease,
    Severity,
}

/// One run's standing in a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSeverity {
    pub scenario_id: String,
    pub solution: SolutionType,
    pub intensity: ContactIntensity,
    pub portlandite_loss_percent: f64,
    pub csh_loss_percent: f64,
    pub ph_drop: f64,
    pub porosity_increase: f64,
    /// Weighted, batch-normalized score in [0, 1]
    pub severity_score: f64,
    pub level: SeverityLevel,
}

impl ScenarioSeverity {
    fn value(&self, criterion: RankingCriterion) -> f64 {
        match criterion {
            RankingCriterion::PortlanditeLoss => self.portlandite_loss_percent,
            RankingCriterion::CshLoss => self.csh_loss_percent,
            RankingCriterion::PhDrop => self.ph_drop,
            RankingCriterion::PorosityIncrease => self.porosity_increase,
            RankingCriterion::Severity => self.severity_score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    /// In input order
    pub entries: Vec<ScenarioSeverity>,
    /// Mean enhanced-flow severity over mean low-flow severity
    pub acceleration_factor: Option<f64>,
}

impl ScenarioComparison {
    pub fn new(results: &[SimulationResult]) -> Result<Self, String> {
        if results.is_empty() {
            return Err("Cannot compare an empty set of results".to_string());
        }

        let mut entries: Vec<ScenarioSeverity> = results
            .iter()
            .map(|result| {
                let metrics = &result.degradation_metrics;
                let config = &result.simulation_info.config;
                ScenarioSeverity {
                    scenario_id: result.scenario_id().to_string(),
                    solution: config.solution,
                    intensity: config.intensity,
                    portlandite_loss_percent: metrics.portlandite_consumed_percent,
                    csh_loss_percent: metrics.csh_consumed_percent,
                    ph_drop: metrics.ph_drop,
                    porosity_increase: metrics.porosity_increase,
                    severity_score: 0.0,
                    level: SeverityLevel::Minor,
                }
            })
            .collect();

        let max_of = |criterion: RankingCriterion| {
            entries.iter().map(|e| e.value(criterion)).fold(0.0_f64, f64::max)
        };
        let max_portlandite = max_of(RankingCriterion::PortlanditeLoss);
        let max_csh = max_of(RankingCriterion::CshLoss);
        let max_ph = max_of(RankingCriterion::PhDrop);
        let max_porosity = max_of(RankingCriterion::PorosityIncrease);

        for entry in &mut entries {
            let score = WEIGHT_PORTLANDITE * normalized(entry.portlandite_loss_percent, max_portlandite)
                + WEIGHT_CSH * normalized(entry.csh_loss_percent, max_csh)
                + WEIGHT_PH * normalized(entry.ph_drop, max_ph)
                + WEIGHT_POROSITY * normalized(entry.porosity_increase, max_porosity);
            entry.severity_score = score;
            entry.level = SeverityLevel::from_score(score);
        }

        let acceleration_factor = match (
            mean_severity(&entries, ContactIntensity::EnhancedFlow),
            mean_severity(&entries, ContactIntensity::LowFlow),
        ) {
            (Some(enhanced), Some(low)) if low > 0.0 => Some(enhanced / low),
            _ => None,
        };

        Ok(Self { entries, acceleration_factor })
    }

    /// Scenario ids, most affected first
    pub fn ranking(&self, criterion: RankingCriterion) -> Vec<&str> {
        let mut ordered: Vec<&ScenarioSeverity> = self.entries.iter().collect();
        ordered.sort_by(|a, b| b.value(criterion).total_cmp(&a.value(criterion)));
        ordered.into_iter().map(|e| e.scenario_id.as_str()).collect()
    }

    pub fn most_severe(&self) -> Option<&ScenarioSeverity> {
        self.entries
            .iter()
            .max_by(|a, b| a.severity_score.total_cmp(&b.severity_score))
    }

    pub fn get(&self, scenario_id: &str) -> Option<&ScenarioSeverity> {
        self.entries.iter().find(|e| e.scenario_id == scenario_id)
    }
}

fn normalized(value: f64, max: f64) -> f64 {
    if max > 0.0 { (value / max).max(0.0) } else { 0.0 }
}

fn mean_severity(entries: &[ScenarioSeverity], intensity: ContactIntensity) -> Option<f64> {
    let scores: Vec<f64> = entries
        .iter()
        .filter(|e| e.intensity == intensity)
        .map(|e| e.severity_score)
        .collect();
    (!scores.is_empty()).then(|| scores.iter().sum::<f64>() / scores.len() as f64)
}
