#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;

fn setup() -> (App, Database) {
    (App::new().unwrap(), Database::open_in_memory().unwrap())
}

fn amount_of(app: &App, category: SpendCategory) -> rust_decimal::Decimal {
    app.plan.allocation(category).unwrap().amount
}

// ── Inputs ────────────────────────────────────────────────────

#[test]
fn test_total_recomputes_everything() {
    let (mut app, mut db) = setup();
    handle_command("total $5,000", &mut app, &mut db).unwrap();
    assert_eq!(app.plan.inputs.total_budget, dec!(5000));
    assert_eq!(amount_of(&app, SpendCategory::Flights), dec!(1500));
    assert!(app.dirty);
}

#[test]
fn test_total_rejects_zero() {
    let (mut app, mut db) = setup();
    handle_command("total 0", &mut app, &mut db).unwrap();
    assert_eq!(app.plan.inputs.total_budget, dec!(3000));
    assert!(app.status_message.starts_with("Error:"));
}

#[test]
fn test_total_rejects_amount_above_limit() {
    let (mut app, mut db) = setup();
    let huge = "total 79,228,162,514,264,337,593,543,950,335";
    handle_command(huge, &mut app, &mut db).unwrap();
    assert_eq!(app.plan.inputs.total_budget, dec!(3000));
    assert!(app.status_message.starts_with("Error:"));
    assert!(app.status_message.contains("limit"));
}

#[test]
fn test_total_usage_on_garbage() {
    let (mut app, mut db) = setup();
    handle_command("total lots", &mut app, &mut db).unwrap();
    assert!(app.status_message.starts_with("Usage"));
}

#[test]
fn test_style_switch() {
    let (mut app, mut db) = setup();
    handle_command("style luxury", &mut app, &mut db).unwrap();
    assert_eq!(app.plan.inputs.style, BudgetStyle::Luxury);
    assert_eq!(amount_of(&app, SpendCategory::Accommodation), dec!(1050));
}

#[test]
fn test_style_unknown_reports_error() {
    let (mut app, mut db) = setup();
    handle_command("style backpacker", &mut app, &mut db).unwrap();
    assert_eq!(app.plan.inputs.style, BudgetStyle::Comfortable);
    assert!(app.status_message.contains("backpacker"));
}

#[test]
fn test_days_and_travelers() {
    let (mut app, mut db) = setup();
    handle_command("days 10", &mut app, &mut db).unwrap();
    handle_command("travelers 3", &mut app, &mut db).unwrap();
    assert_eq!(app.plan.inputs.duration_days, 10);
    assert_eq!(app.plan.inputs.travelers, 3);

    handle_command("travelers 0", &mut app, &mut db).unwrap();
    assert_eq!(app.plan.inputs.travelers, 3);
}

#[test]
fn test_dates_sets_duration() {
    let (mut app, mut db) = setup();
    handle_command("dates 2024-06-01 2024-06-10", &mut app, &mut db).unwrap();
    assert_eq!(app.plan.inputs.duration_days, 10);

    handle_command("dates 2024-06-10 2024-06-01", &mut app, &mut db).unwrap();
    assert_eq!(app.plan.inputs.duration_days, 10);
    assert!(app.status_message.starts_with("Error:"));
}

// ── Sliders ───────────────────────────────────────────────────

#[test]
fn test_set_clamps_and_warns() {
    let (mut app, mut db) = setup();
    handle_command("set flights 5000", &mut app, &mut db).unwrap();
    assert_eq!(amount_of(&app, SpendCategory::Flights), dec!(1350));
    assert!(app.status_message.contains("clamped to $630-$1,350"));
    assert!(app.status_message.contains("Adjust categories"));
    assert_eq!(app.allocation_index, 0);
}

#[test]
fn test_set_selects_category() {
    let (mut app, mut db) = setup();
    handle_command("set hotel 800", &mut app, &mut db).unwrap();
    assert_eq!(amount_of(&app, SpendCategory::Accommodation), dec!(800));
    assert_eq!(app.allocation_index, 1);
    assert!(!app.status_message.contains("Adjust"));
}

#[test]
fn test_nudge_selected_uses_one_percent_step() {
    let (mut app, _db) = setup();
    app.allocation_index = 2;
    assert_eq!(app.step(), dec!(30));
    app.nudge_selected(2);
    assert_eq!(amount_of(&app, SpendCategory::Food), dec!(660));
    app.nudge_selected(-100);
    assert_eq!(amount_of(&app, SpendCategory::Food), dec!(300));
}

#[test]
fn test_reset_asks_for_confirmation() {
    let (mut app, mut db) = setup();
    handle_command("reset", &mut app, &mut db).unwrap();
    assert_eq!(app.input_mode, InputMode::Confirm);
    assert!(matches!(
        app.pending_action,
        Some(PendingAction::ResetAllocations)
    ));
}

// ── Plans ─────────────────────────────────────────────────────

#[test]
fn test_save_requires_name() {
    let (mut app, mut db) = setup();
    handle_command("save", &mut app, &mut db).unwrap();
    assert_eq!(db.get_trip_count().unwrap(), 0);
    assert!(app.status_message.contains("name"));
}

#[test]
fn test_save_and_load_roundtrip() {
    let (mut app, mut db) = setup();
    handle_command("set shopping 120", &mut app, &mut db).unwrap();
    handle_command("save Lisbon", &mut app, &mut db).unwrap();
    assert!(!app.dirty);
    assert_eq!(app.plans.len(), 1);

    handle_command("new Porto", &mut app, &mut db).unwrap();
    assert_eq!(app.plan.name, "Porto");
    assert_eq!(amount_of(&app, SpendCategory::Shopping), dec!(60));

    handle_command("load lisbon", &mut app, &mut db).unwrap();
    assert_eq!(app.plan.name, "Lisbon");
    assert_eq!(amount_of(&app, SpendCategory::Shopping), dec!(120));
    assert_eq!(app.screen, Screen::Planner);
}

#[test]
fn test_load_missing_plan() {
    let (mut app, mut db) = setup();
    handle_command("load Atlantis", &mut app, &mut db).unwrap();
    assert!(app.status_message.contains("not found"));
}

#[test]
fn test_delete_plan_asks_for_confirmation() {
    let (mut app, mut db) = setup();
    handle_command("save Lisbon", &mut app, &mut db).unwrap();
    handle_command("delete-plan", &mut app, &mut db).unwrap();
    assert_eq!(app.screen, Screen::Plans);
    assert_eq!(app.input_mode, InputMode::Confirm);
    match &app.pending_action {
        Some(PendingAction::DeletePlan { name, .. }) => assert_eq!(name, "Lisbon"),
        other => panic!("unexpected pending action: {other:?}"),
    }
}

#[test]
fn test_export_to_path() {
    let (mut app, mut db) = setup();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.csv");
    handle_command(&format!("export {}", path.display()), &mut app, &mut db).unwrap();
    assert!(path.exists());
    assert!(app.status_message.starts_with("Exported 6 categories"));
}

// ── Dispatch ──────────────────────────────────────────────────

#[test]
fn test_unknown_command_suggests() {
    let (mut app, mut db) = setup();
    handle_command("totl 100", &mut app, &mut db).unwrap();
    assert!(app.status_message.contains("Did you mean :total?"));
}

#[test]
fn test_quit() {
    let (mut app, mut db) = setup();
    handle_command("q", &mut app, &mut db).unwrap();
    assert!(!app.running);
}

#[test]
fn test_levenshtein() {
    assert_eq!(levenshtein("save", "save"), 0);
    assert_eq!(levenshtein("sve", "save"), 1);
    assert_eq!(levenshtein("", "load"), 4);
}
