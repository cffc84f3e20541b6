use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_drift, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.plans.is_empty() {
        render_empty(f, area);
        return;
    }

    let header_cells = [
        "Name", "Style", "Total", "Days", "Travelers", "Drift", "Updated",
    ]
    .iter()
    .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .plans
        .iter()
        .enumerate()
        .skip(app.plan_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, plan)| {
            let is_current = plan.id.is_some() && plan.id == app.plan.id;
            let style = if i == app.plan_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let name = if is_current {
                format!("\u{2022} {}", truncate(&plan.name, 30))
            } else {
                format!("  {}", truncate(&plan.name, 30))
            };
            let report = plan.drift();
            let updated = plan.updated_at.get(..10).unwrap_or(plan.updated_at.as_str());

            Row::new(vec![
                Cell::from(name),
                Cell::from(plan.inputs.style.label()),
                Cell::from(format_amount(plan.inputs.total_budget)),
                Cell::from(plan.inputs.duration_days.to_string()),
                Cell::from(plan.inputs.travelers.to_string()),
                Cell::from(Span::styled(
                    format_drift(report.drift),
                    theme::drift_style(report.within_tolerance),
                )),
                Cell::from(updated.to_string()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(13),
        Constraint::Length(12),
        Constraint::Length(6),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Saved Plans ({}) ", app.plans.len()),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(table, area);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("No saved plans yet", theme::dim_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Use :save <name> on the planner to keep a plan",
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(" Saved Plans ", theme::block_title_style())),
    );
    f.render_widget(msg, area);
}
