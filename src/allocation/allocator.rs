use rust_decimal::{Decimal, RoundingStrategy};

use super::{AllocationError, AllocationTable, BudgetStyle, SpendCategory};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryAllocation {
    pub(crate) category: SpendCategory,
    /// Nominal share of the total for the active style.
    pub(crate) percentage: Decimal,
    pub(crate) amount: Decimal,
    pub(crate) min: Decimal,
    pub(crate) max: Decimal,
}

impl CategoryAllocation {
    /// Move the amount to `value`, clamped to `[min, max]`. Returns the amount actually set.
    pub(crate) fn set_amount(&mut self, value: Decimal) -> Decimal {
        self.amount = round_units(value).clamp(self.min, self.max);
        self.amount
    }

    pub(crate) fn nudge(&mut self, delta: Decimal) -> Decimal {
        self.set_amount(self.amount + delta)
    }

    /// Where the amount sits inside its range, from 0.0 at `min` to 1.0 at `max`.
    pub(crate) fn position(&self) -> f64 {
        use rust_decimal::prelude::ToPrimitive;

        let span = self.max - self.min;
        if span <= Decimal::ZERO {
            return 0.0;
        }
        ((self.amount - self.min) / span)
            .to_f64()
            .unwrap_or(0.0)
            .clamp(0.0, 1.0)
    }
}

/// Largest total budget accepted. Keeps every derived amount, range bound
/// and slider sum well inside `Decimal`'s range.
pub(crate) const MAX_TOTAL_BUDGET: i64 = 1_000_000_000_000;

/// Round to whole currency units, halves away from zero.
pub(crate) fn round_units(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

impl AllocationTable {
    /// Split `total` across every category for `style`.
    pub(crate) fn allocate(
        &self,
        total: Decimal,
        style: BudgetStyle,
    ) -> Result<Vec<CategoryAllocation>, AllocationError> {
        if total <= Decimal::ZERO {
            return Err(AllocationError::NonPositiveTotal(total));
        }
        if total > Decimal::from(MAX_TOTAL_BUDGET) {
            return Err(AllocationError::TotalTooLarge(total));
        }

        let allocations: Vec<CategoryAllocation> = SpendCategory::all()
            .iter()
            .map(|&category| {
                let percentage = self.percentage(style, category);
                let amount = round_units(total * percentage / Decimal::ONE_HUNDRED);
                let (min_factor, max_factor) = category.range_factors();
                CategoryAllocation {
                    category,
                    percentage,
                    amount,
                    min: round_units(amount * min_factor),
                    max: round_units(amount * max_factor),
                }
            })
            .collect();

        tracing::debug!(%total, style = style.as_str(), "computed allocation");
        Ok(allocations)
    }
}

/// Allocate against the standard table.
pub(crate) fn allocate(
    total: Decimal,
    style: BudgetStyle,
) -> Result<Vec<CategoryAllocation>, AllocationError> {
    AllocationTable::standard()?.allocate(total, style)
}
