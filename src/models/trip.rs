use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::allocation::{
    allocate, check_drift, AllocationError, AllocationTable, BudgetStyle, CategoryAllocation,
    DriftReport, SpendCategory, MAX_TOTAL_BUDGET,
};

/// Everything an allocation is derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TripInputs {
    pub(crate) total_budget: Decimal,
    pub(crate) style: BudgetStyle,
    pub(crate) duration_days: u32,
    pub(crate) travelers: u32,
}

impl TripInputs {
    pub(crate) fn new(
        total_budget: Decimal,
        style: BudgetStyle,
        duration_days: u32,
        travelers: u32,
    ) -> Result<Self, AllocationError> {
        let inputs = Self {
            total_budget,
            style,
            duration_days,
            travelers,
        };
        inputs.validate()?;
        Ok(inputs)
    }

    pub(crate) fn validate(&self) -> Result<(), AllocationError> {
        if self.total_budget <= Decimal::ZERO {
            return Err(AllocationError::NonPositiveTotal(self.total_budget));
        }
        if self.total_budget > Decimal::from(MAX_TOTAL_BUDGET) {
            return Err(AllocationError::TotalTooLarge(self.total_budget));
        }
        if self.duration_days == 0 {
            return Err(AllocationError::ZeroDuration);
        }
        if self.travelers == 0 {
            return Err(AllocationError::NoTravelers);
        }
        Ok(())
    }
}

impl Default for TripInputs {
    fn default() -> Self {
        Self {
            total_budget: Decimal::from(3000),
            style: BudgetStyle::Comfortable,
            duration_days: 7,
            travelers: 2,
        }
    }
}

/// Inclusive day count between two dates: a trip that starts and ends on the same day lasts one day.
pub(crate) fn trip_days(start: NaiveDate, end: NaiveDate) -> Result<u32, AllocationError> {
    let days = (end - start).num_days();
    if days < 0 {
        return Err(AllocationError::EndBeforeStart { start, end });
    }
    u32::try_from(days + 1).map_err(|_| AllocationError::ZeroDuration)
}

#[derive(Debug, Clone)]
pub(crate) struct TripPlan {
    pub(crate) id: Option<i64>,
    pub(crate) name: String,
    pub(crate) inputs: TripInputs,
    pub(crate) allocations: Vec<CategoryAllocation>,
    pub(crate) created_at: String,
    pub(crate) updated_at: String,
}

impl TripPlan {
    pub(crate) fn new(name: String, inputs: TripInputs) -> Result<Self, AllocationError> {
        let allocations = Self::compute(&inputs)?;
        Ok(Self::from_parts(name, inputs, allocations))
    }

    /// Like `new`, but splitting against a custom table.
    pub(crate) fn with_table(
        name: String,
        inputs: TripInputs,
        table: &AllocationTable,
    ) -> Result<Self, AllocationError> {
        inputs.validate()?;
        let allocations = table.allocate(inputs.total_budget, inputs.style)?;
        Ok(Self::from_parts(name, inputs, allocations))
    }

    fn from_parts(name: String, inputs: TripInputs, allocations: Vec<CategoryAllocation>) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: None,
            name,
            inputs,
            allocations,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub(crate) fn compute(inputs: &TripInputs) -> Result<Vec<CategoryAllocation>, AllocationError> {
        inputs.validate()?;
        allocate(inputs.total_budget, inputs.style)
    }

    /// Replace the inputs and rebuild every allocation from scratch.
    /// On error the plan is left untouched.
    pub(crate) fn update_inputs(&mut self, inputs: TripInputs) -> Result<(), AllocationError> {
        self.allocations = Self::compute(&inputs)?;
        self.inputs = inputs;
        Ok(())
    }

    /// Throw away slider adjustments.
    pub(crate) fn recompute(&mut self) -> Result<(), AllocationError> {
        self.allocations = Self::compute(&self.inputs)?;
        Ok(())
    }

    pub(crate) fn allocation(&self, category: SpendCategory) -> Option<&CategoryAllocation> {
        self.allocations.iter().find(|a| a.category == category)
    }

    /// Slider move: set a category's amount, clamped to its range.
    pub(crate) fn set_amount(&mut self, category: SpendCategory, value: Decimal) -> Option<Decimal> {
        self.allocations
            .iter_mut()
            .find(|a| a.category == category)
            .map(|a| a.set_amount(value))
    }

    pub(crate) fn nudge(&mut self, category: SpendCategory, delta: Decimal) -> Option<Decimal> {
        self.allocations
            .iter_mut()
            .find(|a| a.category == category)
            .map(|a| a.nudge(delta))
    }

    pub(crate) fn drift(&self) -> DriftReport {
        check_drift(&self.allocations, self.inputs.total_budget)
    }

    pub(crate) fn per_day(&self, amount: Decimal) -> Decimal {
        (amount / Decimal::from(self.inputs.duration_days))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .normalize()
    }

    pub(crate) fn per_traveler(&self, amount: Decimal) -> Decimal {
        (amount / Decimal::from(self.inputs.travelers))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .normalize()
    }

    /// Allocated total spread over every day of the trip.
    pub(crate) fn daily_total(&self) -> Decimal {
        self.per_day(self.drift().allocated_total)
    }

    pub(crate) fn is_adjusted(&self) -> bool {
        Self::compute(&self.inputs)
            .map(|fresh| fresh != self.allocations)
            .unwrap_or(false)
    }
}
