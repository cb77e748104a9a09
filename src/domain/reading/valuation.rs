//! Reading valuation: computed charges over a raw reading

use rust_decimal::Decimal;

use super::model::{ChargeStatement, RawReading};
use crate::domain::period::BillingPeriod;
use crate::domain::rate_table::RateLookup;
use crate::support::{DomainError, DomainResult};

/// A raw reading paired with the rates it is valued against.
///
/// Charges are recomputed on every call. The wrapped reading is never
/// mutated, so repeated calls against the same table agree.
pub struct Reading<'a> {
    raw: RawReading,
    rates: &'a dyn RateLookup,
}

impl<'a> Reading<'a> {
    pub fn new(raw: RawReading, rates: &'a dyn RateLookup) -> Self {
        Self { raw, rates }
    }

    pub fn customer(&self) -> &str {
        &self.raw.customer
    }

    pub fn quantity(&self) -> Decimal {
        self.raw.quantity
    }

    pub fn month(&self) -> u32 {
        self.raw.month
    }

    pub fn year(&self) -> i32 {
        self.raw.year
    }

    pub fn raw(&self) -> &RawReading {
        &self.raw
    }

    /// `base_rate(month, year) * quantity`
    pub fn base_charge(&self) -> DomainResult<Decimal> {
        let rate = self.rates.base_rate(self.month(), self.year())?;
        self.charge_at(rate)
    }

    fn charge_at(&self, rate: Decimal) -> DomainResult<Decimal> {
        rate.checked_mul(self.quantity()).ok_or(DomainError::ChargeOverflow {
            month: self.month(),
            year: self.year(),
        })
    }

    /// `max(0, base_charge - tax_threshold(year))`
    pub fn taxable_charge(&self) -> DomainResult<Decimal> {
        let base_charge = self.base_charge()?;
        self.rates.taxable_charge(base_charge, self.year())
    }

    /// Compute every derived value in one pass.
    pub fn statement(&self) -> DomainResult<ChargeStatement> {
        let base_rate = self.rates.base_rate(self.month(), self.year())?;
        let period = BillingPeriod::new(self.month(), self.year())?;
        let tax_threshold = self.rates.tax_threshold(self.year())?;
        let base_charge = self.charge_at(base_rate)?;
        let taxable_charge = self.rates.taxable_charge(base_charge, self.year())?;

        Ok(ChargeStatement {
            customer: self.raw.customer.clone(),
            period,
            quantity: self.quantity(),
            base_rate,
            base_charge,
            tax_threshold,
            taxable_charge,
        })
    }
}

impl std::fmt::Debug for Reading<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reading").field("raw", &self.raw).finish_non_exhaustive()
    }
}

// ── Tests ──────────────────────────────────────────────────────
