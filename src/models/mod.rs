//! Degradation models
//!
//! # Regime Classifier
//!
//! [`RegimeClassifier`] maps the current portlandite and C-S-H amounts to one
//! of three ordered [`Regime`]s and evaluates the pH of that regime.
//!
//! # Mechanism Library
//!
//! Every mechanism implements [`Mechanism`]: a pure rate function of the
//! start-of-step state, the step index, the regime and the scenario
//! configuration, returning signed molar deltas per step.
//!
//! | Mechanism | Active in | Phases |
//! |-----------|-----------|--------|
//! | [`SulfateEvolution`] | mixed brine | monosulfate, ettringite, gypsum |
//! | [`ChlorideBinding`] | chloride / mixed brine | monosulfate, Friedel's salt |
//! | [`PortlanditeDissolution`] | all | portlandite |
//! | [`CshDecalcification`] | all | C-S-H gel |
//! | [`SecondaryLeaching`] | all | monosulfate, ettringite, hydrotalcite |
//! | [`AlkaliStripping`] | all | pore Na⁺ / K⁺ only |
//!
//! # Equilibrium backend
//!
//! [`PlaceholderKinetics`] bundles the classifier and the library behind the
//! [`EquilibriumSolver`](crate::chemistry::EquilibriumSolver) trait.

// =================================================================================================
// Module Declarations
// =================================================================================================

mod alkali;
mod chloride;
mod csh;
mod kinetics;
mod leaching;
mod portlandite;
mod regime;
mod sulfate;
mod traits;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use alkali::AlkaliStripping;
pub use chloride::{CHLORIDE_PER_FRIEDEL, ChlorideBinding, SULFATE_PER_FRIEDEL};
pub use csh::CshDecalcification;
pub use kinetics::PlaceholderKinetics;
pub use leaching::SecondaryLeaching;
pub use portlandite::{PORTLANDITE_DEPLETION_FRACTION, PortlanditeDissolution};
pub use regime::{Regime, RegimeClassifier};
pub use sulfate::{ETTRINGITE_PER_MONOSULFATE, SULFATE_PER_ETTRINGITE, SulfateEvolution};
pub use traits::{Mechanism, MechanismOutcome, available};
