use rust_decimal::Decimal;

use super::CategoryAllocation;

/// Largest gap between allocated and planned totals that goes unflagged.
pub(crate) const DRIFT_TOLERANCE: i64 = 50;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DriftReport {
    pub(crate) allocated_total: Decimal,
    /// Allocated minus planned; positive means over budget.
    pub(crate) drift: Decimal,
    pub(crate) within_tolerance: bool,
}

impl DriftReport {
    pub(crate) fn warning(&self) -> Option<String> {
        if self.within_tolerance {
            return None;
        }
        let direction = if self.drift > Decimal::ZERO {
            "over"
        } else {
            "under"
        };
        Some(format!(
            "Adjust categories to match total budget ({direction} by ${})",
            self.drift.abs()
        ))
    }
}

/// Sum the allocated amounts and compare them against `total`. Read-only.
pub(crate) fn check_drift(allocations: &[CategoryAllocation], total: Decimal) -> DriftReport {
    let allocated_total: Decimal = allocations.iter().map(|a| a.amount).sum();
    let drift = allocated_total - total;
    let within_tolerance = drift.abs() <= Decimal::from(DRIFT_TOLERANCE);
    if !within_tolerance {
        tracing::info!(%allocated_total, %total, %drift, "allocation drifted from total budget");
    }
    DriftReport {
        allocated_total,
        drift,
        within_tolerance,
    }
}
