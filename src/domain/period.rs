//! Billing period (month + year) used as the rate table key

use chrono::Month;
use serde::Serialize;

use crate::support::{DomainError, DomainResult};

/// A validated calendar month of a given year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BillingPeriod {
    year: i32,
    month: u32,
}

impl BillingPeriod {
    pub fn new(month: u32, year: i32) -> DomainResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// English month name, e.g. "May"
    pub fn month_name(&self) -> &'static str {
        u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or("Unknown")
    }
}

impl std::fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}
