mod allocator;
mod drift;
mod error;
mod table;

pub(crate) use allocator::{allocate, round_units, CategoryAllocation, MAX_TOTAL_BUDGET};
pub(crate) use drift::{check_drift, DriftReport, DRIFT_TOLERANCE};
pub(crate) use error::AllocationError;
pub(crate) use table::{AllocationTable, BudgetStyle, SpendCategory};
