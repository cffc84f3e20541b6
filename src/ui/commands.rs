use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;

use super::app::{App, InputMode, PendingAction, Screen, UNTITLED};
use super::util::{format_amount, parse_amount};
use crate::allocation::{BudgetStyle, SpendCategory};
use crate::db::Database;
use crate::models::{trip_days, TripInputs, TripPlan};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit TripBudget", cmd_quit, r);
    register_command!("quit", "Quit TripBudget", cmd_quit, r);
    register_command!("p", "Go to Planner", cmd_planner, r);
    register_command!("planner", "Go to Planner", cmd_planner, r);
    register_command!("plans", "Go to Saved Plans", cmd_plans, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("total", "Set total budget (e.g. :total 3000)", cmd_total, r);
    register_command!("t", "Set total budget (e.g. :t 3000)", cmd_total, r);
    register_command!(
        "style",
        "Set budget style (budget, comfortable, luxury)",
        cmd_style,
        r
    );
    register_command!("days", "Set trip length in days (e.g. :days 7)", cmd_days, r);
    register_command!(
        "dates",
        "Set trip dates (e.g. :dates 2024-06-01 2024-06-07)",
        cmd_dates,
        r
    );
    register_command!(
        "travelers",
        "Set number of travelers (e.g. :travelers 2)",
        cmd_travelers,
        r
    );
    register_command!(
        "set",
        "Set a category amount (e.g. :set flights 1200)",
        cmd_set,
        r
    );
    register_command!(
        "reset",
        "Recompute all categories from the total",
        cmd_reset,
        r
    );
    register_command!("new", "Start a new plan (e.g. :new Lisbon)", cmd_new, r);
    register_command!("rename", "Rename the current plan", cmd_rename, r);
    register_command!("save", "Save the current plan (e.g. :save Lisbon)", cmd_save, r);
    register_command!("w", "Save the current plan", cmd_save, r);
    register_command!("load", "Load a saved plan (e.g. :load Lisbon)", cmd_load, r);
    register_command!(
        "delete-plan",
        "Delete selected saved plan",
        cmd_delete_plan,
        r
    );
    register_command!(
        "export",
        "Export plan to CSV (e.g. :export ~/lisbon.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, db)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1)
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_planner(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Planner;
    Ok(())
}

fn cmd_plans(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Plans;
    app.refresh_plans(db)?;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_total(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let Some(total) = parse_amount(args) else {
        app.set_status("Usage: :total <amount>. Example: :total 3000");
        return Ok(());
    };
    let inputs = TripInputs {
        total_budget: total,
        ..app.plan.inputs
    };
    if app.apply_inputs(inputs) {
        app.set_status(format!("Total budget: {}", format_amount(total)));
    }
    Ok(())
}

fn cmd_style(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        let styles: Vec<&str> = BudgetStyle::all().iter().map(|s| s.as_str()).collect();
        app.set_status(format!("Usage: :style <style>. Styles: {}", styles.join(", ")));
        return Ok(());
    }
    match BudgetStyle::from_str(args) {
        Ok(style) => {
            let inputs = TripInputs {
                style,
                ..app.plan.inputs
            };
            if app.apply_inputs(inputs) {
                app.set_status(format!("Style: {style}"));
            }
        }
        Err(e) => app.report_error(&e),
    }
    Ok(())
}

fn cmd_days(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let Ok(days) = args.parse::<u32>() else {
        app.set_status("Usage: :days <number>. Example: :days 7");
        return Ok(());
    };
    let inputs = TripInputs {
        duration_days: days,
        ..app.plan.inputs
    };
    if app.apply_inputs(inputs) {
        app.set_status(format!("Trip length: {days} days"));
    }
    Ok(())
}

fn cmd_dates(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let dates: Vec<NaiveDate> = args
        .split_whitespace()
        .filter_map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .collect();
    let &[start, end] = dates.as_slice() else {
        app.set_status("Usage: :dates <start> <end>. Example: :dates 2024-06-01 2024-06-07");
        return Ok(());
    };
    match trip_days(start, end) {
        Ok(days) => {
            let inputs = TripInputs {
                duration_days: days,
                ..app.plan.inputs
            };
            if app.apply_inputs(inputs) {
                app.set_status(format!("Trip length: {days} days ({start} to {end})"));
            }
        }
        Err(e) => app.report_error(&e),
    }
    Ok(())
}

fn cmd_travelers(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let Ok(travelers) = args.parse::<u32>() else {
        app.set_status("Usage: :travelers <number>. Example: :travelers 2");
        return Ok(());
    };
    let inputs = TripInputs {
        travelers,
        ..app.plan.inputs
    };
    if app.apply_inputs(inputs) {
        app.set_status(format!("Travelers: {travelers}"));
    }
    Ok(())
}

fn cmd_set(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    // Last token is the amount, everything before is the category
    let parts: Vec<&str> = args.rsplitn(2, ' ').collect();
    if parts.len() < 2 {
        app.set_status("Usage: :set <category> <amount>. Example: :set flights 1200");
        return Ok(());
    }
    let Some(amount) = parse_amount(parts[0]) else {
        app.set_status(format!("Invalid amount: {}", parts[0]));
        return Ok(());
    };
    let category = match SpendCategory::from_str(parts[1]) {
        Ok(c) => c,
        Err(e) => {
            app.report_error(&e);
            return Ok(());
        }
    };

    if let Some(set) = app.plan.set_amount(category, amount) {
        app.dirty = true;
        if let Some(pos) = SpendCategory::all().iter().position(|c| *c == category) {
            app.allocation_index = pos;
        }
        let mut msg = format!("{category}: {}", format_amount(set));
        if set != amount {
            if let Some(alloc) = app.plan.allocation(category) {
                msg.push_str(&format!(
                    " (clamped to {}-{})",
                    format_amount(alloc.min),
                    format_amount(alloc.max)
                ));
            }
        }
        if let Some(warning) = app.plan.drift().warning() {
            msg.push_str(&format!(". {warning}"));
        }
        app.set_status(msg);
    }
    Ok(())
}

fn cmd_reset(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.confirm_message = "Discard adjustments and recompute all categories?".into();
    app.pending_action = Some(PendingAction::ResetAllocations);
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_new(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let name = if args.is_empty() { UNTITLED } else { args };
    app.plan = TripPlan::new(name.to_string(), TripInputs::default())?;
    app.allocation_index = 0;
    app.dirty = false;
    app.screen = Screen::Planner;
    app.set_status(format!("New plan: {name}"));
    Ok(())
}

fn cmd_rename(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :rename <name>");
        return Ok(());
    }
    // A renamed plan saves as a new row
    app.plan.id = None;
    app.plan.name = args.to_string();
    app.dirty = true;
    app.set_status(format!("Renamed to: {args}"));
    Ok(())
}

fn cmd_save(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if !args.is_empty() && args != app.plan.name {
        app.plan.id = None;
        app.plan.name = args.to_string();
    }
    if app.plan.name == UNTITLED {
        app.set_status("Give the plan a name first: :save <name>");
        return Ok(());
    }
    db.save_trip(&mut app.plan)?;
    app.dirty = false;
    app.refresh_plans(db)?;
    app.set_status(format!("Saved plan: {}", app.plan.name));
    Ok(())
}

fn cmd_load(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :load <name>");
        return Ok(());
    }
    match db.get_trip_by_name(args)? {
        Some(plan) => app.load_plan(plan),
        None => app.set_status(format!("Plan '{args}' not found")),
    }
    Ok(())
}

fn cmd_delete_plan(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Plans {
        app.screen = Screen::Plans;
        app.refresh_plans(db)?;
    }
    let Some(plan) = app.plans.get(app.plan_index) else {
        app.set_status("No saved plan selected");
        return Ok(());
    };
    let Some(id) = plan.id else {
        return Ok(());
    };
    let name = plan.name.clone();
    app.confirm_message = format!("Delete plan '{name}'?");
    app.pending_action = Some(PendingAction::DeletePlan { id, name });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        crate::export::default_export_path(&app.plan)
    } else {
        crate::run::shellexpand(args)
    };
    match crate::export::export_plan(&app.plan, Path::new(&path)) {
        Ok(count) => app.set_status(format!("Exported {count} categories to {path}")),
        Err(e) => app.set_status(format!("Export failed: {e:#}")),
    }
    Ok(())
}

#[cfg(test)]
mod tests;
