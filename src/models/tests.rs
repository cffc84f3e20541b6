#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::allocation::{AllocationError, AllocationTable, BudgetStyle, SpendCategory};

fn make_plan(total: Decimal, style: BudgetStyle) -> TripPlan {
    let inputs = TripInputs::new(total, style, 5, 2).unwrap();
    TripPlan::new("Lisbon".into(), inputs).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

// ── TripInputs ────────────────────────────────────────────────

#[test]
fn test_inputs_default_is_valid() {
    let inputs = TripInputs::default();
    assert!(inputs.validate().is_ok());
    assert_eq!(inputs.style, BudgetStyle::Comfortable);
}

#[test]
fn test_inputs_reject_non_positive_total() {
    let err = TripInputs::new(Decimal::ZERO, BudgetStyle::Budget, 3, 1).unwrap_err();
    assert_eq!(err, AllocationError::NonPositiveTotal(Decimal::ZERO));
    assert!(TripInputs::new(dec!(-100), BudgetStyle::Budget, 3, 1).is_err());
}

#[test]
fn test_inputs_reject_total_above_limit() {
    let limit = Decimal::from(crate::allocation::MAX_TOTAL_BUDGET);
    assert!(TripInputs::new(limit, BudgetStyle::Luxury, 3, 1).is_ok());
    let err = TripInputs::new(limit + dec!(0.01), BudgetStyle::Luxury, 3, 1).unwrap_err();
    assert_eq!(err, AllocationError::TotalTooLarge(limit + dec!(0.01)));
    assert!(err.is_invalid_input());
}

#[test]
fn test_inputs_reject_zero_travelers() {
    let err = TripInputs::new(dec!(1000), BudgetStyle::Budget, 3, 0).unwrap_err();
    assert_eq!(err, AllocationError::NoTravelers);
    assert!(err.is_invalid_input());
}

#[test]
fn test_inputs_reject_zero_days() {
    let err = TripInputs::new(dec!(1000), BudgetStyle::Budget, 0, 1).unwrap_err();
    assert_eq!(err, AllocationError::ZeroDuration);
}

// ── trip_days ─────────────────────────────────────────────────

#[test]
fn test_trip_days_inclusive() {
    assert_eq!(trip_days(date("2024-06-01"), date("2024-06-07")).unwrap(), 7);
    assert_eq!(trip_days(date("2024-06-01"), date("2024-06-01")).unwrap(), 1);
}

#[test]
fn test_trip_days_across_month_boundary() {
    assert_eq!(trip_days(date("2024-02-27"), date("2024-03-02")).unwrap(), 5);
}

#[test]
fn test_trip_days_end_before_start() {
    let err = trip_days(date("2024-06-07"), date("2024-06-01")).unwrap_err();
    assert!(matches!(err, AllocationError::EndBeforeStart { .. }));
}

// ── TripPlan ──────────────────────────────────────────────────

#[test]
fn test_plan_new_computes_allocations() {
    let plan = make_plan(dec!(3000), BudgetStyle::Comfortable);
    assert!(plan.id.is_none());
    assert_eq!(plan.allocations.len(), 6);
    assert_eq!(
        plan.allocation(SpendCategory::Flights).unwrap().amount,
        dec!(900)
    );
    assert!(!plan.created_at.is_empty());
    assert_eq!(plan.created_at, plan.updated_at);
    assert!(!plan.is_adjusted());
}

#[test]
fn test_plan_set_amount_and_drift() {
    let mut plan = make_plan(dec!(3000), BudgetStyle::Comfortable);
    assert_eq!(
        plan.set_amount(SpendCategory::Activities, dec!(2000)),
        Some(dec!(1350))
    );
    assert!(plan.is_adjusted());

    let report = plan.drift();
    assert_eq!(report.drift, dec!(900));
    assert!(!report.within_tolerance);
}

#[test]
fn test_plan_nudge() {
    let mut plan = make_plan(dec!(1000), BudgetStyle::Budget);
    assert_eq!(plan.nudge(SpendCategory::Food, dec!(10)), Some(dec!(160)));
    assert_eq!(plan.nudge(SpendCategory::Food, dec!(-200)), Some(dec!(75)));
}

#[test]
fn test_plan_recompute_discards_adjustments() {
    let mut plan = make_plan(dec!(1000), BudgetStyle::Budget);
    plan.set_amount(SpendCategory::Flights, dec!(500));
    plan.recompute().unwrap();
    assert_eq!(
        plan.allocation(SpendCategory::Flights).unwrap().amount,
        dec!(350)
    );
    assert!(!plan.is_adjusted());
}

#[test]
fn test_plan_update_inputs_rebuilds_in_full() {
    let mut plan = make_plan(dec!(3000), BudgetStyle::Comfortable);
    plan.set_amount(SpendCategory::Shopping, dec!(200));

    let inputs = TripInputs::new(dec!(5000), BudgetStyle::Luxury, 10, 4).unwrap();
    plan.update_inputs(inputs).unwrap();
    assert_eq!(plan.inputs, inputs);
    assert_eq!(
        plan.allocation(SpendCategory::Shopping).unwrap().amount,
        dec!(100)
    );
    assert_eq!(plan.drift().allocated_total, dec!(5000));
}

#[test]
fn test_plan_update_inputs_error_leaves_plan_untouched() {
    let mut plan = make_plan(dec!(3000), BudgetStyle::Comfortable);
    let before = plan.allocations.clone();
    let bad = TripInputs {
        travelers: 0,
        ..plan.inputs
    };
    assert_eq!(plan.update_inputs(bad), Err(AllocationError::NoTravelers));
    assert_eq!(plan.allocations, before);
    assert_eq!(plan.inputs.travelers, 2);
}

#[test]
fn test_plan_per_day_and_per_traveler() {
    let plan = make_plan(dec!(3000), BudgetStyle::Comfortable);
    let flights = plan.allocation(SpendCategory::Flights).unwrap().amount;
    assert_eq!(plan.per_day(flights), dec!(180));
    assert_eq!(plan.per_traveler(flights), dec!(450));
    assert_eq!(plan.daily_total(), dec!(600));
}

#[test]
fn test_plan_per_day_rounds_to_cents() {
    let inputs = TripInputs::new(dec!(1000), BudgetStyle::Budget, 3, 3).unwrap();
    let plan = TripPlan::new("Oslo".into(), inputs).unwrap();
    assert_eq!(plan.per_day(dec!(100)), dec!(33.33));
    assert_eq!(plan.per_traveler(dec!(200)), dec!(66.67));
}

#[test]
fn test_plan_per_day_rounds_half_cents_up() {
    let inputs = TripInputs::new(dec!(1000), BudgetStyle::Budget, 8, 8).unwrap();
    let plan = TripPlan::new("Oslo".into(), inputs).unwrap();
    assert_eq!(plan.per_day(dec!(1)), dec!(0.13));
    assert_eq!(plan.per_traveler(dec!(1)), dec!(0.13));
    assert_eq!(plan.per_day(dec!(3)), dec!(0.38));
}

#[test]
fn test_plan_with_custom_table() {
    let row = [dec!(40), dec!(30), dec!(10), dec!(10), dec!(5), dec!(5)];
    let table = AllocationTable::from_rows([row; 3]).unwrap();
    let inputs = TripInputs::new(dec!(1000), BudgetStyle::Budget, 4, 1).unwrap();
    let plan = TripPlan::with_table("Rome".into(), inputs, &table).unwrap();
    assert_eq!(
        plan.allocation(SpendCategory::Accommodation).unwrap().amount,
        dec!(300)
    );
}
