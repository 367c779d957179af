//! Investment domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use quipu_shared::types::InvestmentId;

/// An asset bought for resale.
///
/// `estimated_gain` is projected profit before sale; `realized_gain` stays
/// zero until the sale locks in the estimate. Once sold the record is
/// immutable for cost/gain/name edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investment {
    /// Unique identifier.
    pub id: InvestmentId,
    /// Short name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Purchase cost.
    pub cost: Decimal,
    /// Projected profit before sale.
    pub estimated_gain: Decimal,
    /// Profit locked in at sale time; zero while unsold.
    pub realized_gain: Decimal,
    /// cost + estimated_gain.
    pub total: Decimal,
    /// True once the asset has been sold.
    pub sold: bool,
    /// Date of the sale, if sold.
    pub sale_date: Option<NaiveDate>,
}

/// Partial update for an unsold investment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvestmentPatch {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New cost.
    pub cost: Option<Decimal>,
    /// New estimated gain.
    pub estimated_gain: Option<Decimal>,
}

impl Investment {
    /// Creates a freshly purchased, unsold investment.
    #[must_use]
    pub fn purchased(
        name: impl Into<String>,
        description: impl Into<String>,
        cost: Decimal,
        estimated_gain: Decimal,
    ) -> Self {
        Self {
            id: InvestmentId::new(),
            name: name.into(),
            description: description.into(),
            cost,
            estimated_gain,
            realized_gain: Decimal::ZERO,
            total: cost + estimated_gain,
            sold: false,
            sale_date: None,
        }
    }

    /// Applies a partial update and recomputes the total.
    ///
    /// Returns false (silent no-op) when the investment is already sold.
    pub fn apply_patch(&mut self, patch: InvestmentPatch) -> bool {
        if self.sold {
            return false;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(cost) = patch.cost {
            self.cost = cost;
        }
        if let Some(estimated_gain) = patch.estimated_gain {
            self.estimated_gain = estimated_gain;
        }
        self.total = self.cost + self.estimated_gain;
        true
    }

    /// Marks the investment sold, locking the estimated gain in as
    /// realized.
    pub fn mark_sold(&mut self, sale_date: NaiveDate) {
        self.realized_gain = self.estimated_gain;
        self.sold = true;
        self.sale_date = Some(sale_date);
    }

    /// Rolls a sale back in memory.
    ///
    /// Used when the backing ledger entry fails: the record must never
    /// appear sold without a backing transaction.
    pub fn roll_back_sale(&mut self) {
        self.realized_gain = Decimal::ZERO;
        self.sold = false;
        self.sale_date = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_purchased_state() {
        let investment = Investment::purchased(
            "Laptop batch",
            "Lot of 10 laptops for resale",
            dec!(50000),
            dec!(15000),
        );

        assert_eq!(investment.total, dec!(65000));
        assert_eq!(investment.realized_gain, Decimal::ZERO);
        assert!(!investment.sold);
        assert!(investment.sale_date.is_none());
    }

    #[test]
    fn test_patch_recomputes_total() {
        let mut investment = Investment::purchased("Phones", "Import", dec!(30000), dec!(12000));

        let applied = investment.apply_patch(InvestmentPatch {
            cost: Some(dec!(25000)),
            ..InvestmentPatch::default()
        });

        assert!(applied);
        assert_eq!(investment.total, dec!(37000));
    }

    #[test]
    fn test_patch_after_sale_is_noop() {
        let mut investment = Investment::purchased("Phones", "Import", dec!(100), dec!(10));
        investment.mark_sold(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap());

        let applied = investment.apply_patch(InvestmentPatch {
            cost: Some(dec!(1)),
            ..InvestmentPatch::default()
        });

        assert!(!applied);
        assert_eq!(investment.cost, dec!(100));
    }

    #[test]
    fn test_sale_locks_gain() {
        let mut investment = Investment::purchased("Phones", "Import", dec!(100), dec!(10));
        let date = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();

        investment.mark_sold(date);
        assert_eq!(investment.realized_gain, dec!(10));
        assert!(investment.sold);
        assert_eq!(investment.sale_date, Some(date));
    }

    #[test]
    fn test_rollback_clears_sale() {
        let mut investment = Investment::purchased("Phones", "Import", dec!(100), dec!(10));
        investment.mark_sold(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap());
        investment.roll_back_sale();

        assert_eq!(investment.realized_gain, Decimal::ZERO);
        assert!(!investment.sold);
        assert!(investment.sale_date.is_none());
    }
}
