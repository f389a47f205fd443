//! Common utilities for integration tests

pub mod mock_chemistry;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_chemistry::{FirstOrderPortlandite, PoisonedChemistry};
pub use test_helpers::{assert_non_negative, fast_depletion_rates, relative_error, run_canonical};
