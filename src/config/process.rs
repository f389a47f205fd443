//! Process parameters of the sequential-batch protocol

use crate::config::ContactIntensity;
use crate::config::scenario::{
    DEFAULT_ENHANCEMENT_FACTOR, DEFAULT_STEP_INTERVAL_DAYS, DEFAULT_STEPS, LOW_FLOW_WATER_KG,
};
use serde::{Deserialize, Serialize};

/// Relative tolerance used when comparing durations and water masses
const TOLERANCE: f64 = 1e-9;

/// Renewal schedule for one contact intensity
///
/// Schedules hold N + 1 entries, entry 0 being the unexposed baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessParameters {
    pub intensity: ContactIntensity,
    pub water_per_step_kg: f64,
    pub step_interval_days: f64,
    pub total_steps: usize,
    pub total_duration_days: f64,
    /// Cumulative external solution after each step (kg)
    pub cumulative_water_kg: Vec<f64>,
    /// Elapsed time after each step (days)
    pub time_days: Vec<f64>,
}

impl ProcessParameters {
    /// Build a uniform schedule
    pub fn uniform(
        intensity: ContactIntensity,
        water_per_step_kg: f64,
        step_interval_days: f64,
        total_steps: usize,
    ) -> Self {
        let cumulative_water_kg = (0..=total_steps)
            .map(|k| k as f64 * water_per_step_kg)
            .collect();
        let time_days = (0..=total_steps)
            .map(|k| k as f64 * step_interval_days)
            .collect();

        Self {
            intensity,
            water_per_step_kg,
            step_interval_days,
            total_steps,
            total_duration_days: total_steps as f64 * step_interval_days,
            cumulative_water_kg,
            time_days,
        }
    }

    /// Reference protocol: 20 steps of 3 days, 0.5 kg (low-flow) or 2.0 kg (enhanced-flow)
    pub fn reference(intensity: ContactIntensity) -> Self {
        Self::uniform(
            intensity,
            LOW_FLOW_WATER_KG * intensity.multiplier(DEFAULT_ENHANCEMENT_FACTOR),
            DEFAULT_STEP_INTERVAL_DAYS,
            DEFAULT_STEPS,
        )
    }

    /// Cumulative water at the end of the run (kg)
    pub fn cumulative_water_at_end_kg(&self) -> f64 {
        self.cumulative_water_kg.last().copied().unwrap_or(0.0)
    }

    pub fn validate(&self) -> Result<(), String> {
        let label = self.intensity.code();

        if self.total_steps == 0 {
            return Err(format!("{label}: total steps must be greater than 0"));
        }
        if !(self.water_per_step_kg.is_finite() && self.water_per_step_kg > 0.0) {
            return Err(format!(
                "{label}: water per step must be positive, got {} kg",
                self.water_per_step_kg
            ));
        }
        if !(self.step_interval_days.is_finite() && self.step_interval_days > 0.0) {
            return Err(format!(
                "{label}: step interval must be positive, got {} days",
                self.step_interval_days
            ));
        }

        let expected_duration = self.total_steps as f64 * self.step_interval_days;
        if !close(self.total_duration_days, expected_duration) {
            return Err(format!(
                "{label}: total duration {} days does not match {} steps × {} days",
                self.total_duration_days, self.total_steps, self.step_interval_days
            ));
        }

        check_schedule(label, "cumulative water", &self.cumulative_water_kg, self.total_steps, self.water_per_step_kg)?;
        check_schedule(label, "time", &self.time_days, self.total_steps, self.step_interval_days)?;

        Ok(())
    }

    /// Check that a low-flow / enhanced-flow pair is consistent
    ///
    /// Both must cover the same duration and the enhanced-flow water per step
    /// must be `enhancement_factor` times the low-flow one.
    pub fn validate_pair(
        low: &ProcessParameters,
        enhanced: &ProcessParameters,
        enhancement_factor: f64,
    ) -> Result<(), String> {
        low.validate()?;
        enhanced.validate()?;

        if low.intensity != ContactIntensity::LowFlow || enhanced.intensity != ContactIntensity::EnhancedFlow {
            return Err("Process pair must be (low_flow, enhanced_flow)".to_string());
        }
        if !close(low.total_duration_days, enhanced.total_duration_days) {
            return Err(format!(
                "Contact intensities disagree on total duration: {} vs {} days",
                low.total_duration_days, enhanced.total_duration_days
            ));
        }
        let ratio = enhanced.water_per_step_kg / low.water_per_step_kg;
        if !close(ratio, enhancement_factor) {
            return Err(format!(
                "Enhanced-flow water per step is {}× low-flow, expected {}×",
                ratio, enhancement_factor
            ));
        }
        Ok(())
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

fn check_schedule(
    label: &str,
    name: &str,
    schedule: &[f64],
    steps: usize,
    increment: f64,
) -> Result<(), String> {
    if schedule.len() != steps + 1 {
        return Err(format!(
            "{label}: {name} schedule must have {} entries, got {}",
            steps + 1,
            schedule.len()
        ));
    }
    for (k, value) in schedule.iter().enumerate() {
        if !close(*value, k as f64 * increment) {
            return Err(format!(
                "{label}: {name} schedule entry {k} is {value}, expected {}",
                k as f64 * increment
            ));
        }
    }
    Ok(())
}
