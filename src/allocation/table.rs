use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use super::AllocationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum BudgetStyle {
    Budget,
    Comfortable,
    Luxury,
}

impl BudgetStyle {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Comfortable => "comfortable",
            Self::Luxury => "luxury",
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Budget => "Budget",
            Self::Comfortable => "Comfortable",
            Self::Luxury => "Luxury",
        }
    }

    pub(crate) fn all() -> &'static [BudgetStyle] {
        &[Self::Budget, Self::Comfortable, Self::Luxury]
    }

    /// The style after this one, wrapping around. Used by the planner's style toggle.
    pub(crate) fn next(&self) -> Self {
        match self {
            Self::Budget => Self::Comfortable,
            Self::Comfortable => Self::Luxury,
            Self::Luxury => Self::Budget,
        }
    }

    fn index(&self) -> usize {
        match self {
            Self::Budget => 0,
            Self::Comfortable => 1,
            Self::Luxury => 2,
        }
    }
}

impl FromStr for BudgetStyle {
    type Err = AllocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "budget" => Ok(Self::Budget),
            "comfortable" => Ok(Self::Comfortable),
            "luxury" => Ok(Self::Luxury),
            _ => Err(AllocationError::UnknownStyle(s.trim().to_string())),
        }
    }
}

impl std::fmt::Display for BudgetStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum SpendCategory {
    Flights,
    Accommodation,
    Food,
    Activities,
    Transport,
    Shopping,
}

impl SpendCategory {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Flights => "flights",
            Self::Accommodation => "accommodation",
            Self::Food => "food",
            Self::Activities => "activities",
            Self::Transport => "transport",
            Self::Shopping => "shopping",
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Flights => "Flights",
            Self::Accommodation => "Accommodation",
            Self::Food => "Food & Dining",
            Self::Activities => "Activities",
            Self::Transport => "Local Transport",
            Self::Shopping => "Shopping",
        }
    }

    /// Display order. Every row of the allocation table follows it.
    pub(crate) fn all() -> &'static [SpendCategory; 6] {
        &[
            Self::Flights,
            Self::Accommodation,
            Self::Food,
            Self::Activities,
            Self::Transport,
            Self::Shopping,
        ]
    }

    /// Multipliers applied to a category's amount to get its slider range.
    pub(crate) fn range_factors(&self) -> (Decimal, Decimal) {
        match self {
            Self::Flights => (Decimal::new(7, 1), Decimal::new(15, 1)),
            Self::Accommodation => (Decimal::new(6, 1), Decimal::TWO),
            Self::Food => (Decimal::new(5, 1), Decimal::TWO),
            Self::Activities => (Decimal::new(3, 1), Decimal::new(3, 0)),
            Self::Transport => (Decimal::new(4, 1), Decimal::TWO),
            Self::Shopping => (Decimal::ZERO, Decimal::new(5, 0)),
        }
    }

    fn index(&self) -> usize {
        match self {
            Self::Flights => 0,
            Self::Accommodation => 1,
            Self::Food => 2,
            Self::Activities => 3,
            Self::Transport => 4,
            Self::Shopping => 5,
        }
    }
}

impl FromStr for SpendCategory {
    type Err = AllocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flights" | "flight" => Ok(Self::Flights),
            "accommodation" | "hotel" | "hotels" | "lodging" => Ok(Self::Accommodation),
            "food" | "dining" => Ok(Self::Food),
            "activities" | "activity" | "tours" => Ok(Self::Activities),
            "transport" | "transportation" => Ok(Self::Transport),
            "shopping" => Ok(Self::Shopping),
            _ => Err(AllocationError::UnknownCategory(s.trim().to_string())),
        }
    }
}

impl std::fmt::Display for SpendCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Percentages in `SpendCategory::all()` order, one row per `BudgetStyle::all()`.
const STANDARD_ROWS: [[i64; 6]; 3] = [
    [35, 20, 15, 10, 15, 5],
    [30, 25, 20, 15, 8, 2],
    [25, 35, 25, 10, 3, 2],
];

/// Style × category percentage table. Only constructible through validation,
/// so every row of a live table sums to 100.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AllocationTable {
    rows: [[Decimal; 6]; 3],
}

impl AllocationTable {
    pub(crate) fn standard() -> Result<Self, AllocationError> {
        Self::from_rows(STANDARD_ROWS.map(|row| row.map(Decimal::from)))
    }

    pub(crate) fn from_rows(rows: [[Decimal; 6]; 3]) -> Result<Self, AllocationError> {
        for &style in BudgetStyle::all() {
            let row = &rows[style.index()];
            if let Some(pos) = row.iter().position(|p| p.is_sign_negative()) {
                return Err(AllocationError::NegativePercentage {
                    style,
                    category: SpendCategory::all()[pos],
                });
            }
            let sum: Decimal = row.iter().sum();
            if sum != Decimal::ONE_HUNDRED {
                tracing::warn!(style = style.as_str(), %sum, "rejected allocation table row");
                return Err(AllocationError::UnbalancedTable { style, sum });
            }
        }
        Ok(Self { rows })
    }

    /// Load a custom table from CSV: `style,flights,accommodation,food,activities,transport,shopping`.
    /// A header row is skipped if present. Every style must appear exactly once.
    pub(crate) fn from_csv(path: &Path) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_path(path)
            .with_context(|| format!("Failed to open allocation table: {}", path.display()))?;

        let mut rows: [Option<[Decimal; 6]>; 3] = [None; 3];
        for (line, record) in rdr.records().enumerate() {
            let record = record.context("Failed to read allocation table record")?;
            let first = record.get(0).unwrap_or("");
            if line == 0 && first.eq_ignore_ascii_case("style") {
                continue;
            }
            if record.len() != 7 {
                anyhow::bail!(
                    "Line {}: expected 7 fields (style + 6 percentages), found {}",
                    line + 1,
                    record.len()
                );
            }
            let style: BudgetStyle = first.parse()?;
            let mut row = [Decimal::ZERO; 6];
            for (slot, field) in row.iter_mut().zip(record.iter().skip(1)) {
                *slot = Decimal::from_str(field.trim_end_matches('%')).with_context(|| {
                    format!("Line {}: invalid percentage '{field}'", line + 1)
                })?;
            }
            if rows[style.index()].replace(row).is_some() {
                anyhow::bail!("Line {}: duplicate row for style '{style}'", line + 1);
            }
        }

        let mut complete = [[Decimal::ZERO; 6]; 3];
        for &style in BudgetStyle::all() {
            complete[style.index()] = rows[style.index()]
                .ok_or_else(|| anyhow::anyhow!("Allocation table has no row for '{style}'"))?;
        }
        Ok(Self::from_rows(complete)?)
    }

    pub(crate) fn percentage(&self, style: BudgetStyle, category: SpendCategory) -> Decimal {
        self.rows[style.index()][category.index()]
    }

    pub(crate) fn row(&self, style: BudgetStyle) -> &[Decimal; 6] {
        &self.rows[style.index()]
    }
}
