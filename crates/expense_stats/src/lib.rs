pub mod export;
pub mod weekly;

use anyhow::{Context, Result};
use chrono::{Datelike, Days, Months, NaiveDate};
use models::{CategoryTotals, Expense};
use serde::Serialize;
use std::{collections::BTreeMap, fs, path::Path};

pub use export::{expenses_to_csv, CSV_HEADER};
pub use weekly::{expense_by_weekly_dates, key_days};

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Calendar month that contains a reference date, first and last day inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl MonthWindow {
    pub fn containing(date: NaiveDate) -> Self {
        let first = date - Days::new(u64::from(date.day0()));
        let last = first + Months::new(1) - Days::new(1);
        Self { first, last }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first && date <= self.last
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.first.iter_days().take_while(move |d| *d <= self.last)
    }
}

/// Expenses whose `date` falls in the month containing `today`.
/// Selection is by `date`, never by `creation_date`.
pub fn expenses_in_month(expenses: &[Expense], today: NaiveDate) -> Vec<&Expense> {
    let window = MonthWindow::containing(today);
    expenses.iter().filter(|e| window.contains(e.date)).collect()
}

pub fn total_amount<'a, I>(expenses: I) -> f64
where
    I: IntoIterator<Item = &'a Expense>,
{
    round2(expenses.into_iter().map(|e| e.amount).sum())
}

/// Sum of amounts per expense type, ordered by type name.
pub fn expense_by_type<'a, I>(expenses: I) -> CategoryTotals
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut by_type: BTreeMap<&str, f64> = BTreeMap::new();
    for e in expenses {
        *by_type.entry(e.expense_type.as_str()).or_insert(0.0) += e.amount;
    }
    by_type
        .into_iter()
        .map(|(kind, amount)| (kind, round2(amount)))
        .collect()
}

#[derive(Debug, Serialize)]
pub struct MonthSummary {
    pub month: String,
    pub expense_count: usize,
    pub total: f64,
    pub by_type: CategoryTotals,
    pub weekly: models::DailyTotals,
}

pub fn summarize_month(expenses: &[Expense], today: NaiveDate) -> MonthSummary {
    let window = MonthWindow::containing(today);
    let in_month = expenses_in_month(expenses, today);
    MonthSummary {
        month: format!("{}-{:02}", window.first.year(), window.first.month()),
        expense_count: in_month.len(),
        total: total_amount(in_month.iter().copied()),
        by_type: expense_by_type(in_month.iter().copied()),
        weekly: expense_by_weekly_dates(in_month.iter().copied(), today),
    }
}

/// Reads a JSON array of expenses.
pub fn load_expenses(path: &Path) -> Result<Vec<Expense>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Reading expenses file: {}", path.display()))?;
    let expenses: Vec<Expense> = serde_json::from_str(&raw)
        .with_context(|| format!("Parsing expenses JSON in {}", path.display()))?;
    Ok(expenses)
}
