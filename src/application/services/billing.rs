//! Billing service for valuing meter readings

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::domain::{ChargeStatement, DomainError, DomainResult, RateTable, RawReading, Reading};

/// Service for billing operations
///
/// Holds the process-wide rate table; cloning the service shares it.
#[derive(Debug, Clone)]
pub struct BillingService {
    rates: Arc<RateTable>,
}

impl BillingService {
    pub fn new(rates: Arc<RateTable>) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Validate and value a single reading.
    pub fn value_reading(&self, raw: &RawReading) -> DomainResult<ChargeStatement> {
        match self.preview(raw) {
            Ok(statement) => {
                info!(
                    "Reading for {} ({}) valued: base charge {}, taxable charge {}",
                    statement.customer,
                    statement.period,
                    statement.base_charge,
                    statement.taxable_charge
                );
                Ok(statement)
            }
            Err(e) => Err(log_failure(raw, e)),
        }
    }

    /// Validate a reading and compute its base charge only.
    ///
    /// Needs a rate for the reading's period but no tax threshold.
    pub fn base_charge(&self, raw: &RawReading) -> DomainResult<Decimal> {
        let result = raw
            .validate()
            .and_then(|_| Reading::new(raw.clone(), self.rates.as_ref()).base_charge());
        match result {
            Ok(base_charge) => {
                info!(
                    "Reading for {} ({}/{}) valued: base charge {}",
                    raw.customer, raw.month, raw.year, base_charge
                );
                Ok(base_charge)
            }
            Err(e) => Err(log_failure(raw, e)),
        }
    }

    /// Value each reading independently; one failure never affects the rest.
    pub fn value_batch(&self, readings: &[RawReading]) -> Vec<DomainResult<ChargeStatement>> {
        let results: Vec<_> = readings.iter().map(|raw| self.value_reading(raw)).collect();

        let failed = results.iter().filter(|r| r.is_err()).count();
        info!(
            "Batch valued: {} readings, {} failed",
            results.len(),
            failed
        );

        results
    }

    /// Calculate charges (without logging)
    pub fn preview(&self, raw: &RawReading) -> DomainResult<ChargeStatement> {
        raw.validate()?;
        let statement = Reading::new(raw.clone(), self.rates.as_ref()).statement()?;
        debug!(?statement, "charge statement computed");
        Ok(statement)
    }
}

fn log_failure(raw: &RawReading, e: DomainError) -> DomainError {
    if e.is_missing_entry() {
        warn!("Cannot value reading for {}: {}", raw.customer, e);
    } else {
        warn!("Rejected reading for {}: {}", raw.customer, e);
    }
    e
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> BillingService {
        BillingService::new(Arc::new(RateTable::default()))
    }

    fn reading(customer: &str, quantity: i64, month: u32, year: i32) -> RawReading {
        RawReading::new(customer, Decimal::from(quantity), month, year)
    }

    #[test]
    fn value_reading_returns_statement() {
        let statement = service().value_reading(&reading("Ivan", 10, 5, 2017)).unwrap();
        assert_eq!(statement.base_charge, Decimal::new(20, 1));
        assert_eq!(statement.taxable_charge, Decimal::new(15, 1));
    }

    #[test]
    fn value_reading_rejects_negative_quantity() {
        let result = service().value_reading(&reading("Ivan", -3, 5, 2017));
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn value_reading_surfaces_missing_rate() {
        let result = service().value_reading(&reading("Ivan", 10, 5, 2018));
        assert_eq!(
            result,
            Err(DomainError::MissingRateEntry { month: 5, year: 2018 })
        );
    }

    #[test]
    fn batch_isolates_failures() {
        let readings = vec![
            reading("Ivan", 10, 5, 2017),
            reading("Olga", 10, 13, 2017),
            reading("Petr", 1, 12, 2017),
        ];
        let results = service().value_batch(&readings);

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert_eq!(results[1], Err(DomainError::InvalidMonth(13)));
        assert_eq!(results[2].as_ref().unwrap().taxable_charge, Decimal::ZERO);
    }

    #[test]
    fn base_charge_needs_no_threshold() {
        let rates = RateTable::builder()
            .rate(5, 2019, Decimal::ONE)
            .build()
            .unwrap();
        let svc = BillingService::new(Arc::new(rates));
        let raw = reading("Ivan", 10, 5, 2019);

        assert_eq!(svc.base_charge(&raw).unwrap(), Decimal::from(10));
        assert_eq!(
            svc.value_reading(&raw),
            Err(DomainError::MissingThresholdEntry(2019))
        );
    }

    #[test]
    fn base_charge_validates_and_reports_missing_rate() {
        let svc = service();
        assert!(matches!(
            svc.base_charge(&reading("Ivan", -1, 5, 2017)),
            Err(DomainError::Validation(_))
        ));
        assert_eq!(
            svc.base_charge(&reading("Ivan", 10, 5, 2018)),
            Err(DomainError::MissingRateEntry { month: 5, year: 2018 })
        );
    }

    #[test]
    fn oversized_quantity_is_rejected_not_panicking() {
        let rates = RateTable::builder()
            .rate(5, 2017, Decimal::from(2))
            .threshold(2017, Decimal::ONE)
            .build()
            .unwrap();
        let svc = BillingService::new(Arc::new(rates));
        let raw = RawReading::new("Ivan", Decimal::MAX, 5, 2017);
        let overflow = DomainError::ChargeOverflow { month: 5, year: 2017 };

        assert_eq!(svc.base_charge(&raw), Err(overflow.clone()));
        assert_eq!(svc.value_reading(&raw), Err(overflow));
    }

    #[test]
    fn clones_share_the_rate_table() {
        let a = service();
        let b = a.clone();
        assert!(std::ptr::eq(a.rates(), b.rates()));
    }

    #[test]
    fn preview_matches_value_reading() {
        let svc = service();
        let raw = reading("Ivan", 4, 2, 2017);
        assert_eq!(svc.preview(&raw), svc.value_reading(&raw));
    }
}
