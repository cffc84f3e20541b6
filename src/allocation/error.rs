use rust_decimal::Decimal;
use thiserror::Error;

use super::{BudgetStyle, SpendCategory};

#[derive(Debug, Clone, PartialEq, Error)]
pub(crate) enum AllocationError {
    #[error("Total budget must be greater than zero (got {0})")]
    NonPositiveTotal(Decimal),

    #[error("Total budget {0} is above the limit of 1,000,000,000,000")]
    TotalTooLarge(Decimal),

    #[error("Unknown budget style '{0}'. Expected one of: budget, comfortable, luxury")]
    UnknownStyle(String),

    #[error("Unknown spending category '{0}'")]
    UnknownCategory(String),

    #[error("Trip needs at least one traveler")]
    NoTravelers,

    #[error("Trip must last at least one day")]
    ZeroDuration,

    #[error("Trip ends ({end}) before it starts ({start})")]
    EndBeforeStart {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("{style} percentages sum to {sum}%, expected 100%")]
    UnbalancedTable { style: BudgetStyle, sum: Decimal },

    #[error("{style} has a negative percentage for {category}")]
    NegativePercentage {
        style: BudgetStyle,
        category: SpendCategory,
    },
}

impl AllocationError {
    /// Bad caller arguments, as opposed to a malformed allocation table.
    pub(crate) fn is_invalid_input(&self) -> bool {
        !matches!(
            self,
            Self::UnbalancedTable { .. } | Self::NegativePercentage { .. }
        )
    }
}
