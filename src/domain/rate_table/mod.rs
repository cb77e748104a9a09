//! Rate table aggregate
//!
//! Per-unit base rates by billing period, tax-free thresholds by year, and the
//! lookup trait valuations depend on.

pub mod lookup;
pub mod model;

pub use lookup::RateLookup;
pub use model::{RateTable, RateTableBuilder};
