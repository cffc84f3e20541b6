use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::db::Database;
use crate::ui::app::{App, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_up};

pub(crate) fn as_tui(db: &mut Database) -> Result<()> {
    let mut app = App::new()?;
    app.refresh_plans(db)?;
    tracing::info!(plans = app.plans.len(), "starting planner");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, db);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "planner exited with an error");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    db: &mut Database,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            let content_height = f.area().height.saturating_sub(3) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, db)?,
                InputMode::Command => handle_command_input(key, app, db)?,
                InputMode::Confirm => handle_confirm_input(key, app, db)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('1') => switch_screen(app, db, Screen::Planner)?,
        KeyCode::Char('2') => switch_screen(app, db, Screen::Plans)?,
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = (idx + 1) % screens.len();
            switch_screen(app, db, screens[next])?;
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, db, screens[prev])?;
        }
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Enter if app.screen == Screen::Plans => {
            let id = app.plans.get(app.plan_index).and_then(|p| p.id);
            if let Some(id) = id {
                match db.get_trip_by_id(id)? {
                    Some(plan) => app.load_plan(plan),
                    None => {
                        app.set_status("Plan no longer exists");
                        app.refresh_plans(db)?;
                    }
                }
            }
        }
        KeyCode::Char('D') if app.screen == Screen::Plans => {
            commands::handle_command("delete-plan", app, db)?;
        }
        KeyCode::Char('l') | KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right
            if app.screen == Screen::Planner =>
        {
            app.nudge_selected(1);
        }
        KeyCode::Char('h') | KeyCode::Char('-') | KeyCode::Left
            if app.screen == Screen::Planner =>
        {
            app.nudge_selected(-1);
        }
        KeyCode::Char('L') if app.screen == Screen::Planner => app.nudge_selected(5),
        KeyCode::Char('H') if app.screen == Screen::Planner => app.nudge_selected(-5),
        KeyCode::Char('s') if app.screen == Screen::Planner => {
            let mut inputs = app.plan.inputs;
            inputs.style = inputs.style.next();
            if app.apply_inputs(inputs) {
                app.set_status(format!("Style: {}", inputs.style));
            }
        }
        KeyCode::Char('r') if app.screen == Screen::Planner => {
            commands::handle_command("reset", app, db)?;
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, db)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                match action {
                    PendingAction::DeletePlan { id, name } => {
                        if db.delete_trip(id)? {
                            if app.plan.id == Some(id) {
                                app.plan.id = None;
                                app.dirty = true;
                            }
                            app.set_status(format!("Deleted plan: {name}"));
                        } else {
                            app.set_status(format!("Plan '{name}' was already gone"));
                        }
                        app.refresh_plans(db)?;
                    }
                    PendingAction::ResetAllocations => match app.plan.recompute() {
                        Ok(()) => {
                            app.dirty = true;
                            app.set_status("Allocations recomputed from the table");
                        }
                        Err(e) => app.report_error(&e),
                    },
                }
            }
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
        _ => {}
    }
    Ok(())
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, db: &mut Database, screen: Screen) -> Result<()> {
    app.screen = screen;
    if screen == Screen::Plans {
        app.refresh_plans(db)?;
    }
    app.set_status(format!("{screen}"));
    Ok(())
}

/// Rows available to the saved plans table after its borders and header.
fn plans_page(app: &App) -> usize {
    app.visible_rows.saturating_sub(3).max(1)
}

fn handle_move_down(app: &mut App) {
    match app.screen {
        Screen::Planner => {
            if app.allocation_index + 1 < app.plan.allocations.len() {
                app.allocation_index += 1;
            }
        }
        Screen::Plans => {
            let page = plans_page(app);
            scroll_down(
                &mut app.plan_index,
                &mut app.plan_scroll,
                app.plans.len(),
                page,
            );
        }
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Planner => app.allocation_index = app.allocation_index.saturating_sub(1),
        Screen::Plans => scroll_up(&mut app.plan_index, &mut app.plan_scroll),
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Planner => app.allocation_index = 0,
        Screen::Plans => {
            app.plan_index = 0;
            app.plan_scroll = 0;
        }
    }
}

fn handle_goto_bottom(app: &mut App) {
    match app.screen {
        Screen::Planner => {
            app.allocation_index = app.plan.allocations.len().saturating_sub(1);
        }
        Screen::Plans => {
            let page = plans_page(app);
            scroll_to_bottom(
                &mut app.plan_index,
                &mut app.plan_scroll,
                app.plans.len(),
                page,
            );
        }
    }
}
