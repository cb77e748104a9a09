//! Rate lookup seam

use rust_decimal::Decimal;

use crate::support::{DomainError, DomainResult};

/// Source of per-unit base rates and yearly tax-free thresholds.
///
/// [`RateTable`](super::RateTable) is the production implementation. A
/// [`Reading`](crate::domain::Reading) only sees this trait, so any fixture
/// implementing it can stand in for the configured table.
pub trait RateLookup: Send + Sync {
    /// Per-unit rate for the literal `month`/`year` pair.
    fn base_rate(&self, month: u32, year: i32) -> DomainResult<Decimal>;

    /// Tax-free threshold for `year`.
    fn tax_threshold(&self, year: i32) -> DomainResult<Decimal>;

    /// Portion of `base_charge` above the threshold for `year`, floored at zero.
    fn taxable_charge(&self, base_charge: Decimal, year: i32) -> DomainResult<Decimal> {
        let threshold = self.tax_threshold(year)?;
        let above = base_charge.checked_sub(threshold).ok_or_else(|| {
            DomainError::Validation(format!("taxable charge for {} is out of range", year))
        })?;
        Ok(above.max(Decimal::ZERO))
    }
}
