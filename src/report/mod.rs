//! Aggregation engine: pure functions turning the flat transaction
//! collection plus a reference date into bucketed income/expense totals.
//! No state is held here; callers recompute after every mutation or
//! navigation change.

pub(crate) mod select;

use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;

use crate::models::Transaction;

pub(crate) const DATE_FMT: &str = "%Y-%m-%d";

/// Income/expense sums for a single calendar day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct DayTotals {
    pub income: Decimal,
    pub expense: Decimal,
}

impl DayTotals {
    pub(crate) fn balance(&self) -> Decimal {
        self.income - self.expense
    }
}

/// Seven day buckets, index 0 = start of week (Sunday).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct WeekTotals {
    pub income: [Decimal; 7],
    pub expense: [Decimal; 7],
}

impl WeekTotals {
    pub(crate) fn income_sum(&self) -> Decimal {
        self.income.iter().sum()
    }

    pub(crate) fn expense_sum(&self) -> Decimal {
        self.expense.iter().sum()
    }
}

/// Five week-of-month buckets. A month is modeled as at most five weeks:
/// bucket index is (day - 1) / 7, so days 29-31 always land in bucket 4.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct MonthTotals {
    pub income: [Decimal; 5],
    pub expense: [Decimal; 5],
}

impl MonthTotals {
    pub(crate) fn income_sum(&self) -> Decimal {
        self.income.iter().sum()
    }

    pub(crate) fn expense_sum(&self) -> Decimal {
        self.expense.iter().sum()
    }
}

/// Sunday on or before the given date.
pub(crate) fn week_start(date: NaiveDate) -> NaiveDate {
    let back = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

/// Week-of-month bucket for a day-of-month in 1..=31. Integer division
/// keeps the result in 0..=4.
pub(crate) fn week_of_month(day: u32) -> usize {
    ((day - 1) / 7) as usize
}

/// Day-of-month for a stored date string, if it falls in the same calendar
/// year and month as the reference date. Unparsable dates never match.
fn day_in_month(date: &str, reference: NaiveDate) -> Option<u32> {
    let parsed = NaiveDate::parse_from_str(date, DATE_FMT).ok()?;
    (parsed.year() == reference.year() && parsed.month() == reference.month())
        .then_some(parsed.day())
}

/// Sum amounts of transactions dated exactly on the reference date,
/// split by kind.
pub(crate) fn daily_totals(txns: &[Transaction], date: NaiveDate) -> DayTotals {
    let key = date.format(DATE_FMT).to_string();
    let mut totals = DayTotals::default();
    for txn in txns.iter().filter(|t| t.date == key) {
        if txn.is_income() {
            totals.income += txn.amount;
        } else {
            totals.expense += txn.amount;
        }
    }
    totals
}

/// Totals for the Sunday-aligned week containing the reference date,
/// one bucket per day.
pub(crate) fn weekly_totals(txns: &[Transaction], date: NaiveDate) -> WeekTotals {
    let start = week_start(date);
    let mut totals = WeekTotals::default();
    for i in 0..7 {
        let day = start.checked_add_days(Days::new(i as u64)).unwrap_or(start);
        let day_totals = daily_totals(txns, day);
        totals.income[i] = day_totals.income;
        totals.expense[i] = day_totals.expense;
    }
    totals
}

/// Totals for the reference date's calendar month, bucketed by week of
/// month. Only the reference month matters, not the reference day.
pub(crate) fn monthly_totals(txns: &[Transaction], date: NaiveDate) -> MonthTotals {
    let mut totals = MonthTotals::default();
    for txn in txns {
        let Some(day) = day_in_month(&txn.date, date) else {
            continue;
        };
        let bucket = week_of_month(day);
        if txn.is_income() {
            totals.income[bucket] += txn.amount;
        } else {
            totals.expense[bucket] += txn.amount;
        }
    }
    totals
}

#[cfg(test)]
mod tests;
