//! Fund definitions and the static holdings catalog.

mod catalog;
mod funds_model;

pub use catalog::FundCatalog;
pub use funds_model::{Fund, Holding};
