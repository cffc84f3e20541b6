use anyhow::{Context, Result};
use std::path::Path;

use crate::allocation::{AllocationTable, BudgetStyle, SpendCategory};
use crate::db::Database;
use crate::models::{TripInputs, TripPlan};
use crate::ui::util::{format_amount, format_drift, parse_amount};

pub(crate) fn as_cli(args: &[String], db: &mut Database) -> Result<()> {
    match args[1].as_str() {
        "allocate" | "a" => cli_allocate(&args[2..]),
        "styles" => cli_styles(&args[2..]),
        "save" => cli_save(&args[2..], db),
        "plans" | "ls" => cli_plans(db),
        "show" => cli_show(&args[2..], db),
        "delete" | "rm" => cli_delete(&args[2..], db),
        "export" => cli_export(&args[2..], db),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("tripbudget {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("TripBudget: local-only trip budget planner");
    println!();
    println!("Usage: tripbudget [command]");
    println!();
    println!("Commands:");
    println!("  (none)                          Launch interactive planner");
    println!("  allocate <total>                Split a total budget across categories");
    println!("    --style <style>               budget, comfortable or luxury (default: comfortable)");
    println!("    --days <n>                    Trip length in days (default: 7)");
    println!("    --travelers <n>               Number of travelers (default: 2)");
    println!("    --table <file.csv>            Use a custom percentage table");
    println!("  styles [--table <file.csv>]     Print the percentage table");
    println!("  save <name> <total> [flags]     Save a plan (same flags as allocate)");
    println!("  plans                           List saved plans");
    println!("  show <name>                     Print a saved plan");
    println!("  delete <name>                   Delete a saved plan");
    println!("  export <name> [path]            Export a saved plan to CSV");
    println!("  --help, -h                      Show this help");
    println!("  --version, -V                   Show version");
}

fn cli_allocate(args: &[String]) -> Result<()> {
    let positional = positional(args);
    let Some(total) = positional.first() else {
        anyhow::bail!("Usage: tripbudget allocate <total> [--style s] [--days n] [--travelers n]");
    };
    let inputs = parse_inputs(total, args)?;
    let table = load_table(args)?;
    let plan = TripPlan::with_table("Quick estimate".into(), inputs, &table)?;
    print_plan(&plan);
    Ok(())
}

fn cli_styles(args: &[String]) -> Result<()> {
    let table = load_table(args)?;

    print!("{:<14}", "Style");
    for category in SpendCategory::all() {
        print!("{:>17}", category.label());
    }
    println!();
    println!("{}", "─".repeat(14 + 17 * SpendCategory::all().len()));
    for style in BudgetStyle::all() {
        print!("{:<14}", style.label());
        for pct in table.row(*style) {
            print!("{:>16}%", pct.normalize());
        }
        println!();
    }
    Ok(())
}

fn cli_save(args: &[String], db: &mut Database) -> Result<()> {
    let positional = positional(args);
    let &[name, total, ..] = positional.as_slice() else {
        anyhow::bail!("Usage: tripbudget save <name> <total> [--style s] [--days n] [--travelers n]");
    };
    let inputs = parse_inputs(total, args)?;
    let mut plan = TripPlan::new(name.to_string(), inputs)?;
    db.save_trip(&mut plan)?;
    println!("Saved plan '{}'", plan.name);
    print_plan(&plan);
    Ok(())
}

fn cli_plans(db: &mut Database) -> Result<()> {
    if db.get_trip_count()? == 0 {
        println!("No saved plans");
        return Ok(());
    }
    let plans = db.get_trips()?;

    println!(
        "{:<4} {:<24} {:<13} {:>12} {:>5} {:>9} {:>10}",
        "ID", "Name", "Style", "Total", "Days", "Travelers", "Drift"
    );
    println!("{}", "─".repeat(84));
    for plan in &plans {
        let report = plan.drift();
        println!(
            "{:<4} {:<24} {:<13} {:>12} {:>5} {:>9} {:>10}",
            plan.id.unwrap_or(0),
            plan.name,
            plan.inputs.style.label(),
            format_amount(plan.inputs.total_budget),
            plan.inputs.duration_days,
            plan.inputs.travelers,
            format_drift(report.drift),
        );
    }
    Ok(())
}

fn cli_show(args: &[String], db: &mut Database) -> Result<()> {
    let plan = find_plan(args, db, "Usage: tripbudget show <name>")?;
    print_plan(&plan);
    Ok(())
}

fn cli_delete(args: &[String], db: &mut Database) -> Result<()> {
    let plan = find_plan(args, db, "Usage: tripbudget delete <name>")?;
    let id = plan
        .id
        .ok_or_else(|| anyhow::anyhow!("Plan '{}' has no ID", plan.name))?;
    db.delete_trip(id)?;
    println!("Deleted plan '{}'", plan.name);
    Ok(())
}

fn cli_export(args: &[String], db: &mut Database) -> Result<()> {
    let plan = find_plan(args, db, "Usage: tripbudget export <name> [path]")?;
    let output_path = positional(args)
        .get(1)
        .map(|p| shellexpand(p))
        .unwrap_or_else(|| crate::export::default_export_path(&plan));

    let count = crate::export::export_plan(&plan, Path::new(&output_path))?;
    println!("Exported {count} categories to {output_path}");
    Ok(())
}

// ── Helpers ──────────────────────────────────────────────────

fn find_plan(args: &[String], db: &Database, usage: &str) -> Result<TripPlan> {
    let Some(name) = positional(args).first().copied() else {
        anyhow::bail!("{usage}");
    };
    db.get_trip_by_name(name)?
        .ok_or_else(|| anyhow::anyhow!("Plan '{name}' not found"))
}

/// Value following a `--flag`, if present.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Arguments that are neither `--flags` nor their values. A lone `-100` is a value.
fn positional(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            iter.next();
        } else {
            out.push(arg.as_str());
        }
    }
    out
}

fn parse_count(args: &[String], flag: &str, default: u32) -> Result<u32> {
    match flag_value(args, flag) {
        Some(raw) => raw
            .parse::<u32>()
            .with_context(|| format!("Invalid {flag} value: {raw}")),
        None => Ok(default),
    }
}

fn parse_inputs(total: &str, args: &[String]) -> Result<TripInputs> {
    let total_budget =
        parse_amount(total).with_context(|| format!("Invalid total budget: {total}"))?;
    let defaults = TripInputs::default();
    let style = match flag_value(args, "--style") {
        Some(raw) => raw.parse::<BudgetStyle>()?,
        None => defaults.style,
    };
    let duration_days = parse_count(args, "--days", defaults.duration_days)?;
    let travelers = parse_count(args, "--travelers", defaults.travelers)?;
    Ok(TripInputs::new(total_budget, style, duration_days, travelers)?)
}

fn load_table(args: &[String]) -> Result<AllocationTable> {
    match flag_value(args, "--table") {
        Some(path) => AllocationTable::from_csv(Path::new(&shellexpand(path))),
        None => Ok(AllocationTable::standard()?),
    }
}

fn print_plan(plan: &TripPlan) {
    let inputs = &plan.inputs;
    println!(
        "{}: {} {} trip, {} days, {} traveler{}",
        plan.name,
        format_amount(inputs.total_budget),
        inputs.style.label().to_lowercase(),
        inputs.duration_days,
        inputs.travelers,
        if inputs.travelers == 1 { "" } else { "s" }
    );
    println!();
    println!(
        "{:<16} {:>6} {:>10} {:>21} {:>10} {:>13}",
        "Category", "Share", "Amount", "Range", "Per Day", "Per Traveler"
    );
    println!("{}", "─".repeat(81));
    for alloc in &plan.allocations {
        println!(
            "{:<16} {:>5}% {:>10} {:>21} {:>10} {:>13}",
            alloc.category.label(),
            alloc.percentage.normalize(),
            format_amount(alloc.amount),
            format!("{} – {}", format_amount(alloc.min), format_amount(alloc.max)),
            format_amount(plan.per_day(alloc.amount)),
            format_amount(plan.per_traveler(alloc.amount)),
        );
    }

    let report = plan.drift();
    println!("{}", "─".repeat(81));
    println!(
        "{:<16} {:>6} {:>10} {:>21} {:>10} {:>13}",
        "Total",
        "",
        format_amount(report.allocated_total),
        "",
        format_amount(plan.daily_total()),
        format_amount(plan.per_traveler(report.allocated_total)),
    );
    println!();
    match report.warning() {
        Some(warning) => println!("Warning: {warning}"),
        None => println!("Drift: {} (within tolerance)", format_drift(report.drift)),
    }
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
