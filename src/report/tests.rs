#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::select::{select_transactions, CategoryFilter, TypeFilter};
use super::*;
use crate::models::{Transaction, TxnKind};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn txn(id: i64, kind: TxnKind, amount: Decimal, category: &str, date: &str) -> Transaction {
    Transaction {
        id,
        kind,
        amount,
        category: category.into(),
        date: date.into(),
        description: String::new(),
    }
}

/// One salary credit and one food expense, both on 2024-03-01.
fn march_pair() -> Vec<Transaction> {
    vec![
        txn(1, TxnKind::Income, dec!(1000), "salary", "2024-03-01"),
        txn(2, TxnKind::Expense, dec!(200), "food", "2024-03-01"),
    ]
}

// ── Daily ─────────────────────────────────────────────────────

#[test]
fn test_daily_empty_collection_is_zero() {
    let totals = daily_totals(&[], date(2024, 3, 1));
    assert_eq!(totals.income, Decimal::ZERO);
    assert_eq!(totals.expense, Decimal::ZERO);
}

#[test]
fn test_daily_scenario() {
    let totals = daily_totals(&march_pair(), date(2024, 3, 1));
    assert_eq!(totals.income, dec!(1000));
    assert_eq!(totals.expense, dec!(200));
    assert_eq!(totals.balance(), dec!(800));
}

#[test]
fn test_daily_other_dates_contribute_nothing() {
    let totals = daily_totals(&march_pair(), date(2024, 3, 2));
    assert_eq!(totals, DayTotals::default());
}

#[test]
fn test_daily_zero_amount_is_valid() {
    let txns = vec![txn(1, TxnKind::Expense, Decimal::ZERO, "other", "2024-03-01")];
    let totals = daily_totals(&txns, date(2024, 3, 1));
    assert_eq!(totals.expense, Decimal::ZERO);
}

// ── Weekly ────────────────────────────────────────────────────

#[test]
fn test_week_start_is_sunday_on_or_before() {
    // 2024-03-01 is a Friday; the week starts Sunday 2024-02-25.
    assert_eq!(week_start(date(2024, 3, 1)), date(2024, 2, 25));
    // A Sunday is its own week start.
    assert_eq!(week_start(date(2024, 2, 25)), date(2024, 2, 25));
    // A Saturday looks back six days.
    assert_eq!(week_start(date(2024, 3, 2)), date(2024, 2, 25));
}

#[test]
fn test_weekly_empty_collection_is_zero() {
    let totals = weekly_totals(&[], date(2024, 3, 1));
    assert_eq!(totals, WeekTotals::default());
}

#[test]
fn test_weekly_bucket_placement() {
    // Friday 2024-03-01 is bucket 5 of the week starting Sunday 2024-02-25.
    let totals = weekly_totals(&march_pair(), date(2024, 3, 1));
    assert_eq!(totals.income[5], dec!(1000));
    assert_eq!(totals.expense[5], dec!(200));
    for i in [0usize, 1, 2, 3, 4, 6] {
        assert_eq!(totals.income[i], Decimal::ZERO);
        assert_eq!(totals.expense[i], Decimal::ZERO);
    }
}

#[test]
fn test_weekly_matches_daily_componentwise() {
    let txns = vec![
        txn(1, TxnKind::Income, dec!(10), "salary", "2024-02-25"),
        txn(2, TxnKind::Expense, dec!(3.50), "food", "2024-02-27"),
        txn(3, TxnKind::Expense, dec!(6.25), "food", "2024-03-02"),
        txn(4, TxnKind::Income, dec!(1.25), "other", "2024-02-27"),
    ];
    let reference = date(2024, 2, 28);
    let weekly = weekly_totals(&txns, reference);
    let start = week_start(reference);
    for i in 0..7 {
        let day = start.checked_add_days(chrono::Days::new(i as u64)).unwrap();
        let daily = daily_totals(&txns, day);
        assert_eq!(weekly.income[i], daily.income, "income bucket {i}");
        assert_eq!(weekly.expense[i], daily.expense, "expense bucket {i}");
    }
    assert_eq!(weekly.income_sum(), dec!(11.25));
    assert_eq!(weekly.expense_sum(), dec!(9.75));
}

#[test]
fn test_weekly_is_calendar_local_to_reference() {
    // Same collection, reference in a different week: all buckets empty.
    let totals = weekly_totals(&march_pair(), date(2024, 3, 15));
    assert_eq!(totals, WeekTotals::default());
}

// ── Monthly ───────────────────────────────────────────────────

#[test]
fn test_week_of_month_formula() {
    assert_eq!(week_of_month(1), 0);
    assert_eq!(week_of_month(7), 0);
    assert_eq!(week_of_month(8), 1);
    assert_eq!(week_of_month(14), 1);
    assert_eq!(week_of_month(15), 2);
    assert_eq!(week_of_month(28), 3);
    assert_eq!(week_of_month(29), 4);
    assert_eq!(week_of_month(31), 4);
    for d in 1..=31 {
        assert!(week_of_month(d) <= 4);
    }
}

#[test]
fn test_monthly_empty_collection_is_zero() {
    let totals = monthly_totals(&[], date(2024, 3, 1));
    assert_eq!(totals, MonthTotals::default());
}

#[test]
fn test_monthly_independent_of_reference_day() {
    // Moving the reference day within the month changes nothing; only
    // the month matters.
    let first = monthly_totals(&march_pair(), date(2024, 3, 1));
    let eighth = monthly_totals(&march_pair(), date(2024, 3, 8));
    assert_eq!(first, eighth);
    assert_eq!(first.income[0], dec!(1000));
    assert_eq!(first.expense[0], dec!(200));
    for i in 1..5 {
        assert_eq!(first.income[i], Decimal::ZERO);
        assert_eq!(first.expense[i], Decimal::ZERO);
    }
}

#[test]
fn test_monthly_excludes_other_months() {
    let mut txns = march_pair();
    txns.push(txn(3, TxnKind::Expense, dec!(50), "food", "2024-02-29"));
    txns.push(txn(4, TxnKind::Expense, dec!(75), "food", "2023-03-15"));
    let totals = monthly_totals(&txns, date(2024, 3, 10));
    assert_eq!(totals.expense_sum(), dec!(200));
}

#[test]
fn test_monthly_day_31_folds_into_last_bucket() {
    let txns = vec![
        txn(1, TxnKind::Expense, dec!(40), "shopping", "2024-03-29"),
        txn(2, TxnKind::Expense, dec!(60), "shopping", "2024-03-31"),
    ];
    let totals = monthly_totals(&txns, date(2024, 3, 1));
    assert_eq!(totals.expense[4], dec!(100));
}

#[test]
fn test_monthly_skips_unparsable_dates() {
    let txns = vec![
        txn(1, TxnKind::Income, dec!(10), "other", "not-a-date"),
        txn(2, TxnKind::Income, dec!(20), "other", "2024-03-05"),
    ];
    let totals = monthly_totals(&txns, date(2024, 3, 1));
    assert_eq!(totals.income_sum(), dec!(20));
}

// ── Filter & sort ─────────────────────────────────────────────

#[test]
fn test_select_restricts_to_reference_month() {
    let mut txns = march_pair();
    txns.push(txn(3, TxnKind::Expense, dec!(9), "food", "2024-04-01"));
    let result =
        select_transactions(&txns, date(2024, 3, 15), TypeFilter::All, &CategoryFilter::All);
    assert_eq!(result.len(), 2);
}

#[test]
fn test_select_category_filter_scenario() {
    let result = select_transactions(
        &march_pair(),
        date(2024, 3, 15),
        TypeFilter::All,
        &CategoryFilter::Code("food".into()),
    );
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, 2);
}

#[test]
fn test_select_type_filter() {
    let result = select_transactions(
        &march_pair(),
        date(2024, 3, 1),
        TypeFilter::Income,
        &CategoryFilter::All,
    );
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, 1);
}

#[test]
fn test_select_sorts_date_descending() {
    let txns = vec![
        txn(1, TxnKind::Expense, dec!(1), "food", "2024-03-03"),
        txn(2, TxnKind::Expense, dec!(2), "food", "2024-03-10"),
        txn(3, TxnKind::Expense, dec!(3), "food", "2024-03-01"),
        txn(4, TxnKind::Expense, dec!(4), "food", "2024-03-10"),
    ];
    let result =
        select_transactions(&txns, date(2024, 3, 1), TypeFilter::All, &CategoryFilter::All);
    for pair in result.windows(2) {
        assert!(pair[0].date >= pair[1].date);
    }
    // Stable sort keeps insertion order for the 03-10 tie.
    assert_eq!(result[0].id, 2);
    assert_eq!(result[1].id, 4);
}

#[test]
fn test_select_is_idempotent() {
    let txns = march_pair();
    let reference = date(2024, 3, 1);
    let filter = CategoryFilter::Code("food".into());
    let once = select_transactions(&txns, reference, TypeFilter::Expense, &filter);
    let twice = select_transactions(&once, reference, TypeFilter::Expense, &filter);
    let ids: Vec<i64> = once.iter().map(|t| t.id).collect();
    let ids_twice: Vec<i64> = twice.iter().map(|t| t.id).collect();
    assert_eq!(ids, ids_twice);
}

#[test]
fn test_select_empty_result_is_ok() {
    let result = select_transactions(
        &march_pair(),
        date(2025, 1, 1),
        TypeFilter::All,
        &CategoryFilter::All,
    );
    assert!(result.is_empty());
}

#[test]
fn test_filter_parsing() {
    assert_eq!(TypeFilter::parse("all"), Some(TypeFilter::All));
    assert_eq!(TypeFilter::parse("income"), Some(TypeFilter::Income));
    assert_eq!(TypeFilter::parse("expense"), Some(TypeFilter::Expense));
    assert_eq!(TypeFilter::parse("both"), None);
}
