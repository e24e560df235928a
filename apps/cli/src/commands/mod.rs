//! CLI command implementations.

pub mod calculate;
pub mod funds;

pub use calculate::CalculateArgs;
