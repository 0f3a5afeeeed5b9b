//! Week-bucketed totals for the line chart.
//!
//! A month is split at its *key days*: day 1, every Sunday, and the last day of
//! the month. An expense is added to the latest key day that is not after its
//! own day, so the bucket labelled "9" collects days 9..=15 when the next key
//! day is 16. The last-day bucket only ever holds expenses of that final day.

use chrono::{Datelike, NaiveDate, Weekday};
use models::{DailyTotals, Expense};

use crate::{round2, MonthWindow};

/// Key days of the month containing `reference`, ascending and unique.
pub fn key_days(reference: NaiveDate) -> Vec<u32> {
    let window = MonthWindow::containing(reference);
    let mut days = vec![1];

    for date in window.days() {
        if date.weekday() == Weekday::Sun && date.day() != 1 {
            days.push(date.day());
        }
    }

    let last = window.last.day();
    if !days.contains(&last) {
        days.push(last);
    }
    days
}

/// Totals per key day for the month containing `reference`. Every key day is
/// present, zero when nothing was spent. Expenses outside the month are ignored.
pub fn expense_by_weekly_dates<'a, I>(expenses: I, reference: NaiveDate) -> DailyTotals
where
    I: IntoIterator<Item = &'a Expense>,
{
    let window = MonthWindow::containing(reference);
    let keys = key_days(reference);
    let mut buckets = vec![0.0_f64; keys.len()];

    for e in expenses {
        if !window.contains(e.date) {
            tracing::trace!(id = e.id, date = %e.date, "expense outside month skipped");
            continue;
        }
        let day = e.date.day();
        if let Some(idx) = keys.iter().rposition(|k| *k <= day) {
            buckets[idx] += e.amount;
        }
    }

    keys.iter()
        .zip(buckets)
        .map(|(day, amount)| (day.to_string(), round2(amount)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::expense;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_key_days_month_starting_saturday() {
        assert_eq!(key_days(day("2025-03-12")), vec![1, 2, 9, 16, 23, 30, 31]);
    }

    #[test]
    fn test_key_days_first_is_sunday() {
        assert_eq!(key_days(day("2025-06-01")), vec![1, 8, 15, 22, 29, 30]);
        assert_eq!(key_days(day("2026-02-10")), vec![1, 8, 15, 22, 28]);
    }

    #[test]
    fn test_key_days_last_is_sunday() {
        assert_eq!(key_days(day("2025-08-05")), vec![1, 3, 10, 17, 24, 31]);
    }

    #[test]
    fn test_weekly_buckets_assign_to_latest_key_day() {
        let expenses = vec![
            expense(1, "Food", 10.0, "2025-03-01"),
            expense(2, "Food", 4.0, "2025-03-09"),
            expense(3, "Food", 6.0, "2025-03-15"),
            expense(4, "Rent", 500.0, "2025-03-30"),
            expense(5, "Food", 1.5, "2025-03-31"),
            expense(6, "Food", 99.0, "2025-04-01"),
        ];

        let totals = expense_by_weekly_dates(&expenses, day("2025-03-20"));
        assert_eq!(totals.labels(), vec!["1", "2", "9", "16", "23", "30", "31"]);
        assert_eq!(totals.values(), vec![10.0, 0.0, 10.0, 0.0, 0.0, 500.0, 1.5]);
    }

    #[test]
    fn test_weekly_buckets_empty_month_has_all_keys() {
        let totals = expense_by_weekly_dates(&[], day("2026-02-01"));
        assert_eq!(totals.len(), 5);
        assert!(totals.values().iter().all(|v| *v == 0.0));
    }
}
