//! Chemical state of a leached cement paste
//!
//! This module provides the data the engine evolves and the chemistry
//! strategy it is evolved with.
//!
//! # Core Concepts
//!
//! - **Phase assemblage** (`PhaseAssemblage`): molar amount of every solid phase
//! - **Pore solution** (`PoreSolution`): ion concentrations plus pH, ionic strength, porosity
//! - **External solution** (`ExternalSolutionComposition`): fresh solution contacted each step
//! - **Equilibrium solver** (`EquilibriumSolver`): computes what one step does chemically
//!
//! # Architecture
//!
//! Chemistry is **separate from time stepping**:
//! - The equilibrium solver provides the **reactions** (chemistry)
//! - The step integrator provides the **update** (numerics and bookkeeping)
//!
//! # Example
//!
//! ```rust
//! use leach_rs::chemistry::{Ion, Phase, PhaseAssemblage, IonConcentrations, ionic_strength};
//!
//! let phases = PhaseAssemblage::from_pairs([
//!     (Phase::Portlandite, 4.2),
//!     (Phase::CshGel, 12.5),
//! ]);
//! assert_eq!(phases.get(Phase::Gypsum), 0.0);
//!
//! let pore = IonConcentrations::from_pairs([(Ion::Sodium, 0.1), (Ion::Chloride, 0.1)]);
//! assert!((ionic_strength(&pore) - 0.1).abs() < 1e-12);
//! ```

mod composition;
mod equilibrium;
mod phases;
mod solution;

pub use composition::{Composition, Species};
pub use equilibrium::{
    EquilibriumSolver, Reaction, ReactionFluxes, Speciation, StepInput, FRONT_CALCIUM,
    PORTLANDITE_KSP, hydroxide_molality, portlandite_calcium_solubility, portlandite_saturation,
};
pub use phases::{Phase, PhaseAssemblage};
pub use solution::{
    AqueousPhase, ExternalSolutionComposition, Ion, IonConcentrations, PoreSolution,
    ionic_strength,
};
