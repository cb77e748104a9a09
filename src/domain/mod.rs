pub mod period;
pub mod rate_table;
pub mod reading;

// Re-export commonly used types
pub use period::BillingPeriod;
pub use rate_table::{RateLookup, RateTable, RateTableBuilder};
pub use reading::{ChargeStatement, RawReading, Reading};

// Re-export DomainError from support for convenience
pub use crate::support::errors::{DomainError, DomainResult};
