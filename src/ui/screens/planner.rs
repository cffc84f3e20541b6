use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::allocation::DRIFT_TOLERANCE;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_drift, slider};

const SLIDER_WIDTH: usize = 22;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Summary cards
            Constraint::Min(8),    // Category sliders
            Constraint::Length(4), // Drift check
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_allocations(f, chunks[1], app);
    render_drift(f, chunks[2], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let inputs = &app.plan.inputs;
    let allocated = app.plan.drift().allocated_total;

    render_card(
        f,
        cards[0],
        "Total Budget",
        format_amount(inputs.total_budget),
        theme::ACCENT,
        format!("{} style", inputs.style),
    );
    render_card(
        f,
        cards[1],
        "Allocated",
        format_amount(allocated),
        theme::GREEN,
        format!("{} categories", app.plan.allocations.len()),
    );
    render_card(
        f,
        cards[2],
        "Per Day",
        format_amount(app.plan.daily_total()),
        theme::YELLOW,
        format!("{} days", inputs.duration_days),
    );
    render_card(
        f,
        cards[3],
        "Per Traveler",
        format_amount(app.plan.per_traveler(allocated)),
        theme::PEACH,
        format!(
            "{} traveler{}",
            inputs.travelers,
            if inputs.travelers == 1 { "" } else { "s" }
        ),
    );
}

fn render_card(f: &mut Frame, area: Rect, title: &str, value: String, color: Color, subtitle: String) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::block_title_style()));

    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_allocations(f: &mut Frame, area: Rect, app: &App) {
    let header_cells = [
        "Category",
        "Share",
        "Amount",
        "Range",
        "Min / Max",
        "Per Day",
        "Per Traveler",
    ]
    .iter()
    .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .plan
        .allocations
        .iter()
        .enumerate()
        .map(|(i, alloc)| {
            let style = if i == app.allocation_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            let position = alloc.position();

            Row::new(vec![
                Cell::from(alloc.category.label()),
                Cell::from(format!("{}%", alloc.percentage.normalize())),
                Cell::from(Span::styled(
                    format_amount(alloc.amount),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Cell::from(Span::styled(
                    slider(position, SLIDER_WIDTH),
                    Style::default().fg(theme::slider_color(position)),
                )),
                Cell::from(format!(
                    "{} / {}",
                    format_amount(alloc.min),
                    format_amount(alloc.max)
                )),
                Cell::from(format_amount(app.plan.per_day(alloc.amount))),
                Cell::from(format_amount(app.plan.per_traveler(alloc.amount))),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(16),
        Constraint::Length(6),
        Constraint::Length(10),
        Constraint::Length(SLIDER_WIDTH as u16),
        Constraint::Min(18),
        Constraint::Length(10),
        Constraint::Length(13),
    ];

    let title = if app.plan.is_adjusted() {
        format!(" {} (adjusted) ", app.plan.name)
    } else {
        format!(" {} ", app.plan.name)
    };

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(title, theme::block_title_style())),
    );
    f.render_widget(table, area);
}

fn render_drift(f: &mut Frame, area: Rect, app: &App) {
    let report = app.plan.drift();
    let total = app.plan.inputs.total_budget;

    let mut lines = vec![Line::from(vec![
        Span::styled(" Allocated ", theme::dim_style()),
        Span::styled(
            format_amount(report.allocated_total),
            theme::normal_style().add_modifier(Modifier::BOLD),
        ),
        Span::styled(" of ", theme::dim_style()),
        Span::styled(format_amount(total), theme::normal_style()),
        Span::styled("  drift ", theme::dim_style()),
        Span::styled(
            format_drift(report.drift),
            theme::drift_style(report.within_tolerance),
        ),
    ])];

    lines.push(match report.warning() {
        Some(warning) => Line::from(Span::styled(
            format!(" {warning}"),
            theme::drift_style(false),
        )),
        None if report.drift != Decimal::ZERO => Line::from(Span::styled(
            format!(" Within the ${DRIFT_TOLERANCE} rounding tolerance"),
            theme::dim_style(),
        )),
        None => Line::from(Span::styled(" Balanced", theme::drift_style(true))),
    });

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(" Budget Check ", theme::block_title_style()));
    f.render_widget(Paragraph::new(lines).block(block), area);
}
