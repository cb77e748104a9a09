//! Reading aggregate
//!
//! Raw meter readings and their valuation against a rate table.

pub mod model;
pub mod valuation;

pub use model::{ChargeStatement, RawReading};
pub use valuation::Reading;
