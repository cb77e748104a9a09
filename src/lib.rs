//! # Reading charges
//!
//! Values meter readings against a table of monthly per-unit rates and yearly
//! tax-free thresholds.
//!
//! ## Architecture
//!
//! - **domain**: billing periods, the rate table and reading valuation
//! - **application**: the billing service used by binaries
//! - **config**: TOML configuration for the rate table and logging
//! - **bootstrap**: process startup (tracing, config fallback)
//! - **support**: error types
//!
//! ```
//! use reading_charges::{RateTable, RawReading, Reading};
//! use rust_decimal::Decimal;
//!
//! let table = RateTable::default();
//! let reading = Reading::new(RawReading::new("Ivan", Decimal::from(10), 5, 2017), &table);
//! assert_eq!(reading.base_charge().unwrap(), Decimal::new(20, 1));
//! assert_eq!(reading.taxable_charge().unwrap(), Decimal::new(15, 1));
//! ```

pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod support;

pub use config::{default_config_path, resolve_config_path, AppConfig};

pub use application::BillingService;
pub use domain::{
    BillingPeriod, ChargeStatement, RateLookup, RateTable, RawReading, Reading,
};
pub use support::{AppError, AppResult, DomainError, DomainResult};
