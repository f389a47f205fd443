//! Kinetic summary of a run
//!
//! Apparent rate constants read back from the time series, independent of
//! the rate laws that produced it.

use crate::chemistry::Phase;
use crate::solver::SimulationResult;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// pH below which the portlandite buffer is considered lost
pub const BUFFER_LOSS_PH: f64 = 12.5;

/// Portlandite points at or below this amount (mol) are left out of the fit
pub const FIT_FLOOR_MOL: f64 = 0.01;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KineticSummary {
    pub scenario_id: String,
    /// Apparent first-order constant k in P(t) = P0·exp(-k·t), 1/day
    pub portlandite_rate_constant_per_day: Option<f64>,
    pub portlandite_half_life_days: Option<f64>,
    /// Average C-S-H loss, mol/day
    pub csh_decalcification_rate_per_day: f64,
    /// Average pH drop, pH units/day
    pub ph_neutralization_rate_per_day: f64,
    /// First time the pore pH fell below [`BUFFER_LOSS_PH`]
    pub buffer_loss_time_days: Option<f64>,
    /// Only when ettringite increased over the run
    pub sulfate_damage_index: Option<f64>,
}

impl KineticSummary {
    pub fn from_result(result: &SimulationResult) -> Result<Self, String> {
        let (first, last) = match (result.time_series.first(), result.time_series.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(format!("{}: empty time series", result.scenario_id())),
        };

        let (times, amounts): (Vec<f64>, Vec<f64>) = result
            .time_series
            .iter()
            .map(|r| (r.time_days, r.phases.get(Phase::Portlandite)))
            .filter(|&(_, p)| p > FIT_FLOOR_MOL)
            .unzip();

        let rate_constant = fit_first_order(&times, &amounts);
        let half_life = rate_constant.filter(|&k| k > 0.0).map(|k| std::f64::consts::LN_2 / k);

        let duration = last.time_days - first.time_days;
        let per_day = |change: f64| if duration > 0.0 { change / duration } else { 0.0 };

        let buffer_loss = result
            .time_series
            .iter()
            .find(|r| r.ph() < BUFFER_LOSS_PH)
            .map(|r| r.time_days);

        let ettringite_initial = first.phases.get(Phase::Ettringite);
        let ettringite_change = last.phases.get(Phase::Ettringite) - ettringite_initial;
        let damage = (ettringite_change > 0.0)
            .then(|| (ettringite_change / (ettringite_initial + 1.0) * 100.0).min(100.0));

        Ok(Self {
            scenario_id: result.scenario_id().to_string(),
            portlandite_rate_constant_per_day: rate_constant,
            portlandite_half_life_days: half_life,
            csh_decalcification_rate_per_day: per_day(
                first.phases.get(Phase::CshGel) - last.phases.get(Phase::CshGel),
            ),
            ph_neutralization_rate_per_day: per_day(first.ph() - last.ph()),
            buffer_loss_time_days: buffer_loss,
            sulfate_damage_index: damage,
        })
    }
}

/// Least-squares fit of ln(amount) = a - k·t, returning k
///
/// Needs at least two points at distinct times.
pub fn fit_first_order(times: &[f64], amounts: &[f64]) -> Option<f64> {
    let n = times.len().min(amounts.len());
    if n < 2 || amounts[..n].iter().any(|&a| a <= 0.0) {
        return None;
    }

    let design = DMatrix::from_fn(n, 2, |i, j| if j == 0 { 1.0 } else { times[i] });
    let observed = DVector::from_iterator(n, amounts[..n].iter().map(|a| a.ln()));

    let normal = design.transpose() * &design;
    let rhs = design.transpose() * observed;
    let coefficients = normal.try_inverse()? * rhs;

    let k = -coefficients[1];
    k.is_finite().then_some(k)
}
