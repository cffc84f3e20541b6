use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::models::TripPlan;

const HEADER: [&str; 7] = [
    "Category",
    "Percentage",
    "Amount",
    "Min",
    "Max",
    "Per Day",
    "Per Traveler",
];

/// Write the plan's allocations as CSV, one row per category plus a total row.
pub(crate) fn write_plan<W: Write>(plan: &TripPlan, out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(HEADER)?;

    for alloc in &plan.allocations {
        wtr.write_record([
            alloc.category.label().to_string(),
            alloc.percentage.to_string(),
            alloc.amount.to_string(),
            alloc.min.to_string(),
            alloc.max.to_string(),
            plan.per_day(alloc.amount).to_string(),
            plan.per_traveler(alloc.amount).to_string(),
        ])?;
    }

    let report = plan.drift();
    wtr.write_record([
        "Total".to_string(),
        String::new(),
        report.allocated_total.to_string(),
        String::new(),
        String::new(),
        plan.per_day(report.allocated_total).to_string(),
        plan.per_traveler(report.allocated_total).to_string(),
    ])?;
    wtr.flush().context("Failed to write CSV")?;
    Ok(())
}

/// Export to a file and return the number of category rows written.
pub(crate) fn export_plan(plan: &TripPlan, path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    write_plan(plan, file)?;
    tracing::info!(name = %plan.name, path = %path.display(), "exported trip plan");
    Ok(plan.allocations.len())
}

/// Default export location: `~/<plan-name>-budget.csv`, with the name slugged.
pub(crate) fn default_export_path(plan: &TripPlan) -> String {
    let slug: String = plan
        .name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    let slug = slug.trim_matches('-');
    let slug = if slug.is_empty() { "trip" } else { slug };
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    format!("{home}/{slug}-budget.csv")
}
