//! Market data models
//!
//! - `quote` - Daily quote data structure (Quote)

mod quote;

pub use quote::Quote;
