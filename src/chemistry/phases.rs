//! Solid phases of a hydrated cement paste

use crate::chemistry::composition::{Composition, Species};
use std::fmt;

/// Solid phases tracked by the engine
///
/// Amounts are moles per specimen. Phases that no active mechanism touches keep
/// their baseline value for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    /// Calcium hydroxide, the primary short-term pH buffer
    Portlandite,
    /// Calcium-silicate-hydrate gel
    CshGel,
    /// Expansive calcium sulfoaluminate (AFt)
    Ettringite,
    /// Aluminate-sulfate AFm phase, precursor of ettringite and Friedel's salt
    Monosulfate,
    /// Chloride-binding AFm phase
    FriedelSalt,
    Gypsum,
    Hydrotalcite,
    Calcite,
    /// Unreacted alite
    C3S,
    /// Unreacted belite
    C2S,
    /// Unreacted tricalcium aluminate
    C3A,
    /// Unreacted ferrite
    C4AF,
    /// Unreacted pozzolan glass
    FlyAshGlass,
    Mullite,
    Quartz,
}

impl Species for Phase {
    const ALL: &'static [Phase] = &[
        Phase::Portlandite,
        Phase::CshGel,
        Phase::Ettringite,
        Phase::Monosulfate,
        Phase::FriedelSalt,
        Phase::Gypsum,
        Phase::Hydrotalcite,
        Phase::Calcite,
        Phase::C3S,
        Phase::C2S,
        Phase::C3A,
        Phase::C4AF,
        Phase::FlyAshGlass,
        Phase::Mullite,
        Phase::Quartz,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn key(self) -> &'static str {
        match self {
            Phase::Portlandite => "portlandite",
            Phase::CshGel => "CSH_gel",
            Phase::Ettringite => "ettringite",
            Phase::Monosulfate => "monosulfate",
            Phase::FriedelSalt => "friedel_salt",
            Phase::Gypsum => "gypsum",
            Phase::Hydrotalcite => "hydrotalcite",
            Phase::Calcite => "calcite",
            Phase::C3S => "C3S_unreacted",
            Phase::C2S => "C2S_unreacted",
            Phase::C3A => "C3A_unreacted",
            Phase::C4AF => "C4AF_unreacted",
            Phase::FlyAshGlass => "FA_glass_unreacted",
            Phase::Mullite => "mullite",
            Phase::Quartz => "quartz",
        }
    }
}

impl Phase {
    /// Phases that never react in this engine (clinker remnants, pozzolan glass, fillers)
    pub fn is_inert(self) -> bool {
        matches!(
            self,
            Phase::Calcite
                | Phase::C3S
                | Phase::C2S
                | Phase::C3A
                | Phase::C4AF
                | Phase::FlyAshGlass
                | Phase::Mullite
                | Phase::Quartz
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Molar amounts of every [`Phase`]
///
/// Invariant maintained by the step integrator: no entry is ever negative
/// after a step completes.
pub type PhaseAssemblage = Composition<Phase>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all_order() {
        for (i, phase) in Phase::ALL.iter().enumerate() {
            assert_eq!(phase.index(), i);
        }
    }

    #[test]
    fn test_key_lookup() {
        assert_eq!(Phase::from_key("CSH_gel"), Some(Phase::CshGel));
        assert_eq!(Phase::from_key("friedel_salt"), Some(Phase::FriedelSalt));
        assert_eq!(Phase::from_key("csh"), None);
        assert_eq!(Phase::FlyAshGlass.to_string(), "FA_glass_unreacted");
    }

    #[test]
    fn test_inert_phases() {
        assert!(Phase::Quartz.is_inert());
        assert!(!Phase::Portlandite.is_inert());
        assert!(!Phase::Gypsum.is_inert());
    }
}
