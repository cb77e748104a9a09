//! Rate table entity

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::lookup::RateLookup;
use crate::domain::period::BillingPeriod;
use crate::support::{DomainError, DomainResult};

/// Per-unit rates keyed by billing period and tax-free thresholds keyed by year.
///
/// Built once through [`RateTableBuilder`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    rates: BTreeMap<BillingPeriod, Decimal>,
    thresholds: BTreeMap<i32, Decimal>,
}

impl RateTable {
    pub fn builder() -> RateTableBuilder {
        RateTableBuilder::default()
    }

    /// Rate for the literal `month`/`year` key. No interpolation, no fallback
    /// to a neighbouring period. A month outside 1..=12 can never be
    /// configured, so it reports a missing entry like any other absent key.
    pub fn base_rate(&self, month: u32, year: i32) -> DomainResult<Decimal> {
        match BillingPeriod::new(month, year) {
            Ok(period) => self.rate_for(&period),
            Err(_) => Err(DomainError::MissingRateEntry { month, year }),
        }
    }

    pub fn rate_for(&self, period: &BillingPeriod) -> DomainResult<Decimal> {
        self.rates
            .get(period)
            .copied()
            .ok_or(DomainError::MissingRateEntry {
                month: period.month(),
                year: period.year(),
            })
    }

    pub fn tax_threshold(&self, year: i32) -> DomainResult<Decimal> {
        self.thresholds
            .get(&year)
            .copied()
            .ok_or(DomainError::MissingThresholdEntry(year))
    }

    /// `max(0, base_charge - tax_threshold(year))`
    pub fn taxable_charge(&self, base_charge: Decimal, year: i32) -> DomainResult<Decimal> {
        RateLookup::taxable_charge(self, base_charge, year)
    }

    /// Configured periods in chronological order
    pub fn periods(&self) -> Vec<BillingPeriod> {
        self.rates.keys().copied().collect()
    }

    pub fn threshold_years(&self) -> impl Iterator<Item = i32> + '_ {
        self.thresholds.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty() && self.thresholds.is_empty()
    }
}

impl RateLookup for RateTable {
    fn base_rate(&self, month: u32, year: i32) -> DomainResult<Decimal> {
        RateTable::base_rate(self, month, year)
    }

    fn tax_threshold(&self, year: i32) -> DomainResult<Decimal> {
        RateTable::tax_threshold(self, year)
    }
}

impl Default for RateTable {
    /// Compiled-in table: 0.2 per unit for every month of 2017, 0.5 tax-free.
    fn default() -> Self {
        let rate = Decimal::new(2, 1);
        let rates = (1..=12)
            .filter_map(|month| BillingPeriod::new(month, 2017).ok())
            .map(|period| (period, rate))
            .collect();
        let thresholds = BTreeMap::from([(2017, Decimal::new(5, 1))]);

        Self { rates, thresholds }
    }
}

/// Collects entries and validates them on [`build`](RateTableBuilder::build).
#[derive(Debug, Default)]
pub struct RateTableBuilder {
    rates: Vec<(u32, i32, Decimal)>,
    thresholds: Vec<(i32, Decimal)>,
}

impl RateTableBuilder {
    pub fn rate(mut self, month: u32, year: i32, rate: Decimal) -> Self {
        self.rates.push((month, year, rate));
        self
    }

    /// Same rate for all twelve months of `year`
    pub fn year_rate(self, year: i32, rate: Decimal) -> Self {
        (1..=12).fold(self, |builder, month| builder.rate(month, year, rate))
    }

    pub fn threshold(mut self, year: i32, amount: Decimal) -> Self {
        self.thresholds.push((year, amount));
        self
    }

    /// Rejects invalid months, negative values and duplicate keys.
    pub fn build(self) -> DomainResult<RateTable> {
        let mut rates = BTreeMap::new();
        for (month, year, rate) in self.rates {
            let period = BillingPeriod::new(month, year)?;
            if rate < Decimal::ZERO {
                return Err(DomainError::Validation(format!(
                    "negative base rate {} for {}",
                    rate, period
                )));
            }
            if rates.insert(period, rate).is_some() {
                return Err(DomainError::Validation(format!(
                    "duplicate base rate for {}",
                    period
                )));
            }
        }

        let mut thresholds = BTreeMap::new();
        for (year, amount) in self.thresholds {
            if amount < Decimal::ZERO {
                return Err(DomainError::Validation(format!(
                    "negative tax threshold {} for {}",
                    amount, year
                )));
            }
            if thresholds.insert(year, amount).is_some() {
                return Err(DomainError::Validation(format!(
                    "duplicate tax threshold for {}",
                    year
                )));
            }
        }

        Ok(RateTable { rates, thresholds })
    }
}

// ── Tests ──────────────────────────────────────────────────────
