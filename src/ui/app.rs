use anyhow::Result;
use rust_decimal::Decimal;

use crate::allocation::{round_units, AllocationError, SpendCategory};
use crate::db::Database;
use crate::models::{TripInputs, TripPlan};
use crate::ui::util::format_amount;

pub(crate) const UNTITLED: &str = "Untitled trip";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Planner,
    Plans,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Planner, Self::Plans]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Planner => write!(f, "Planner"),
            Self::Plans => write!(f, "Saved Plans"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeletePlan { id: i64, name: String },
    ResetAllocations,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Planner
    pub(crate) plan: TripPlan,
    pub(crate) allocation_index: usize,
    pub(crate) dirty: bool,

    // Saved plans
    pub(crate) plans: Vec<TripPlan>,
    pub(crate) plan_index: usize,
    pub(crate) plan_scroll: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Result<Self> {
        Ok(Self {
            running: true,
            screen: Screen::Planner,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            plan: TripPlan::new(UNTITLED.into(), TripInputs::default())?,
            allocation_index: 0,
            dirty: false,

            plans: Vec::new(),
            plan_index: 0,
            plan_scroll: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        })
    }

    pub(crate) fn refresh_plans(&mut self, db: &Database) -> Result<()> {
        self.plans = db.get_trips()?;
        if self.plan_index >= self.plans.len() {
            self.plan_index = self.plans.len().saturating_sub(1);
        }
        if self.plan_scroll > self.plan_index {
            self.plan_scroll = self.plan_index;
        }
        Ok(())
    }

    pub(crate) fn selected_category(&self) -> SpendCategory {
        let all = SpendCategory::all();
        all[self.allocation_index.min(all.len() - 1)]
    }

    /// Slider step: one percent of the total, never less than one unit.
    pub(crate) fn step(&self) -> Decimal {
        round_units(self.plan.inputs.total_budget / Decimal::ONE_HUNDRED).max(Decimal::ONE)
    }

    /// Move the selected category's slider by `steps` increments.
    pub(crate) fn nudge_selected(&mut self, steps: i64) {
        let category = self.selected_category();
        let delta = self.step() * Decimal::from(steps);
        if let Some(amount) = self.plan.nudge(category, delta) {
            self.dirty = true;
            let report = self.plan.drift();
            match report.warning() {
                Some(warning) => {
                    self.set_status(format!("{category}: {}. {warning}", format_amount(amount)))
                }
                None => self.set_status(format!("{category}: {}", format_amount(amount))),
            }
        }
    }

    /// Swap in new trip inputs, rebuilding the allocation. Invalid inputs leave the
    /// plan as it was and are reported in the status bar.
    pub(crate) fn apply_inputs(&mut self, inputs: TripInputs) -> bool {
        match self.plan.update_inputs(inputs) {
            Ok(()) => {
                self.dirty = true;
                true
            }
            Err(e) => {
                self.report_error(&e);
                false
            }
        }
    }

    pub(crate) fn load_plan(&mut self, plan: TripPlan) {
        self.set_status(format!("Loaded plan: {}", plan.name));
        self.plan = plan;
        self.allocation_index = 0;
        self.dirty = false;
        self.screen = Screen::Planner;
    }

    pub(crate) fn report_error(&mut self, err: &AllocationError) {
        if err.is_invalid_input() {
            tracing::debug!(error = %err, "rejected planner input");
        } else {
            tracing::warn!(error = %err, "allocation table problem");
        }
        self.set_status(format!("Error: {err}"));
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
