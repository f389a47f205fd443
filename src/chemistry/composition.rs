//! Species-keyed composition vectors
//!
//! This module defines the storage shared by the solid-phase assemblage and
//! the pore-solution concentrations:
//! - `Species`: trait for type-safe, enumerable keys (phases, ions)
//! - `Composition<S>`: dense `DVector<f64>` indexed by a `Species`
//!
//! # Design
//!
//! Every key is an enum variant, never a free-form string. Each variant owns a
//! fixed slot in the underlying vector, so iteration and serialization order are
//! the declaration order of the enum. Two identical runs therefore serialize to
//! byte-identical documents.
//!
//! # Arithmetic
//!
//! `Composition` implements `Add` and `Mul<f64>`, so an explicit update reads
//! naturally:
//!
//! ```rust
//! use leach_rs::chemistry::{Phase, PhaseAssemblage};
//!
//! let mut state = PhaseAssemblage::zeros();
//! state.set(Phase::Portlandite, 4.2);
//!
//! let mut delta = PhaseAssemblage::zeros();
//! delta.set(Phase::Portlandite, -0.2);
//!
//! let next = state + delta * 1.0;
//! assert!((next.get(Phase::Portlandite) - 4.0).abs() < 1e-12);
//! ```

use nalgebra::DVector;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

// =================================================================================================
// Species keys
// =================================================================================================

/// Enumerable, type-safe key of a composition vector
///
/// Implementors are plain enums. `ALL` lists every variant in slot order and
/// `index()` must return the position of `self` inside `ALL`.
pub trait Species: Copy + Eq + fmt::Debug + 'static {
    /// Every variant, in storage order
    const ALL: &'static [Self];

    /// Slot of this species in the composition vector
    fn index(self) -> usize;

    /// Stable serialization key
    fn key(self) -> &'static str;

    /// Reverse lookup of [`Species::key`]
    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.key() == key)
    }
}

// =================================================================================================
// Composition vector
// =================================================================================================

/// Dense amounts or concentrations keyed by a [`Species`] enum
#[derive(Clone, PartialEq)]
pub struct Composition<S: Species> {
    values: DVector<f64>,
    _species: PhantomData<S>,
}

impl<S: Species> Composition<S> {
    /// All entries set to zero
    pub fn zeros() -> Self {
        Self {
            values: DVector::zeros(S::ALL.len()),
            _species: PhantomData,
        }
    }

    /// Build from `(species, value)` pairs; unspecified species stay at zero
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
    {
        let mut composition = Self::zeros();
        for (species, value) in pairs {
            composition.set(species, value);
        }
        composition
    }

    /// Value stored for `species`
    #[inline]
    pub fn get(&self, species: S) -> f64 {
        self.values[species.index()]
    }

    /// Overwrite the value stored for `species`
    #[inline]
    pub fn set(&mut self, species: S, value: f64) {
        self.values[species.index()] = value;
    }

    /// Add `amount` (possibly negative) to `species`
    #[inline]
    pub fn add_to(&mut self, species: S, amount: f64) {
        self.values[species.index()] += amount;
    }

    /// Iterate over `(species, value)` in storage order
    pub fn iter(&self) -> impl Iterator<Item = (S, f64)> + '_ {
        S::ALL.iter().map(move |&s| (s, self.values[s.index()]))
    }

    /// Underlying vector (read-only)
    pub fn as_vector(&self) -> &DVector<f64> {
        &self.values
    }

    /// Sum of every entry
    pub fn total(&self) -> f64 {
        self.values.sum()
    }

    /// True when every entry is finite
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }

    /// Most negative entry, if any entry is below zero
    pub fn most_negative(&self) -> Option<(S, f64)> {
        self.iter()
            .filter(|(_, v)| *v < 0.0)
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Replace every negative entry by zero
    ///
    /// Returns the number of entries that were clipped.
    pub fn clip_non_negative(&mut self) -> usize {
        let mut clipped = 0;
        for v in self.values.iter_mut() {
            if *v < 0.0 {
                *v = 0.0;
                clipped += 1;
            }
        }
        clipped
    }
}

impl<S: Species> Default for Composition<S> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<S: Species> fmt::Debug for Composition<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(s, v)| (s.key(), v)))
            .finish()
    }
}

// Operator overloading for the explicit update

impl<S: Species> std::ops::Add for Composition<S> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self.values += rhs.values;
        self
    }
}

impl<S: Species> std::ops::AddAssign<&Composition<S>> for Composition<S> {
    fn add_assign(&mut self, rhs: &Composition<S>) {
        self.values += &rhs.values;
    }
}

impl<S: Species> std::ops::Mul<f64> for Composition<S> {
    type Output = Self;

    fn mul(mut self, scalar: f64) -> Self::Output {
        self.values *= scalar;
        self
    }
}

// =================================================================================================
// Serialization (key → value map, storage order)
// =================================================================================================

impl<S: Species> Serialize for Composition<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut map = serializer.serialize_map(Some(S::ALL.len()))?;
        for (species, value) in self.iter() {
            map.serialize_entry(species.key(), &value)?;
        }
        map.end()
    }
}

struct CompositionVisitor<S>(PhantomData<S>);

impl<'de, S: Species> Visitor<'de> for CompositionVisitor<S> {
    type Value = Composition<S>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of species keys to numbers")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut composition = Composition::zeros();
        while let Some((key, value)) = access.next_entry::<String, f64>()? {
            let species = S::from_key(&key).ok_or_else(|| {
                serde::de::Error::custom(format!("unknown species key '{key}'"))
            })?;
            composition.set(species, value);
        }
        Ok(composition)
    }
}

impl<'de, S: Species> Deserialize<'de> for Composition<S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CompositionVisitor(PhantomData))
    }
}

// =================================================================================================
// Tests
// =================================================================================================
