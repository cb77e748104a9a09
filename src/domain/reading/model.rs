//! Raw meter reading and charge statement

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::period::BillingPeriod;
use crate::support::{DomainError, DomainResult};

/// A single billing-period consumption record, as acquired from a meter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawReading {
    pub customer: String,
    pub quantity: Decimal,
    /// Calendar month, 1..=12
    pub month: u32,
    pub year: i32,
}

impl RawReading {
    pub fn new(customer: impl Into<String>, quantity: Decimal, month: u32, year: i32) -> Self {
        Self {
            customer: customer.into(),
            quantity,
            month,
            year,
        }
    }

    /// Check the reading is billable at all, independent of any rate table.
    pub fn validate(&self) -> DomainResult<BillingPeriod> {
        if self.quantity < Decimal::ZERO {
            return Err(DomainError::Validation(format!(
                "negative quantity {} for customer '{}'",
                self.quantity, self.customer
            )));
        }
        BillingPeriod::new(self.month, self.year)
    }
}

/// Every derived value of one valuation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChargeStatement {
    pub customer: String,
    pub period: BillingPeriod,
    pub quantity: Decimal,
    pub base_rate: Decimal,
    pub base_charge: Decimal,
    pub tax_threshold: Decimal,
    pub taxable_charge: Decimal,
}

impl std::fmt::Display for ChargeStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "customer {} ({} {})",
            self.customer,
            self.period.month_name(),
            self.period.year()
        )?;
        writeln!(f, "quantity is {}", self.quantity)?;
        writeln!(f, "base rate is {}", self.base_rate)?;
        writeln!(f, "base charge is {}", self.base_charge)?;
        writeln!(f, "tax threshold is {}", self.tax_threshold)?;
        write!(f, "taxable charge is {}", self.taxable_charge)
    }
}
