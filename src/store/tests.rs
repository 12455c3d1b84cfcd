#![allow(clippy::unwrap_used)]

use rusqlite::params;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{Transaction, TxnKind};
use crate::report;
use chrono::NaiveDate;

fn draft(kind: TxnKind, amount: rust_decimal::Decimal, category: &str, date: &str) -> Transaction {
    Transaction {
        id: 0,
        kind,
        amount,
        category: category.into(),
        date: date.into(),
        description: String::new(),
    }
}

#[test]
fn test_open_empty() {
    let store = Store::open_in_memory().unwrap();
    assert!(store.transactions().is_empty());
    assert_eq!(store.len(), 0);
}

#[test]
fn test_create_assigns_unique_increasing_ids() {
    let mut store = Store::open_in_memory().unwrap();
    let a = store
        .upsert(draft(TxnKind::Income, dec!(10), "salary", "2024-01-01"), SaveMode::Create)
        .unwrap();
    let b = store
        .upsert(draft(TxnKind::Expense, dec!(5), "food", "2024-01-02"), SaveMode::Create)
        .unwrap();
    let c = store
        .upsert(draft(TxnKind::Expense, dec!(2), "food", "2024-01-03"), SaveMode::Create)
        .unwrap();
    assert!(a < b && b < c);
    assert_eq!(store.len(), 3);
}

#[test]
fn test_update_replaces_full_record() {
    let mut store = Store::open_in_memory().unwrap();
    let id = store
        .upsert(draft(TxnKind::Expense, dec!(5.25), "food", "2024-01-10"), SaveMode::Create)
        .unwrap();

    let mut edited = draft(TxnKind::Income, dec!(7.00), "other", "2024-01-11");
    edited.id = id;
    edited.description = "refund".into();
    store.upsert(edited, SaveMode::Update).unwrap();

    assert_eq!(store.len(), 1);
    let txn = &store.transactions()[0];
    assert_eq!(txn.id, id);
    assert_eq!(txn.kind, TxnKind::Income);
    assert_eq!(txn.amount, dec!(7.00));
    assert_eq!(txn.category, "other");
    assert_eq!(txn.date, "2024-01-11");
    assert_eq!(txn.description, "refund");
}

#[test]
fn test_update_missing_id_is_noop() {
    let mut store = Store::open_in_memory().unwrap();
    store
        .upsert(draft(TxnKind::Expense, dec!(5), "food", "2024-01-10"), SaveMode::Create)
        .unwrap();

    let mut ghost = draft(TxnKind::Expense, dec!(99), "food", "2024-01-10");
    ghost.id = 424242;
    store.upsert(ghost, SaveMode::Update).unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(store.transactions()[0].amount, dec!(5));
}

#[test]
fn test_remove_missing_id_is_noop() {
    let mut store = Store::open_in_memory().unwrap();
    store
        .upsert(draft(TxnKind::Expense, dec!(5), "food", "2024-01-10"), SaveMode::Create)
        .unwrap();
    store.remove(999).unwrap();
    assert_eq!(store.len(), 1);
}

#[test]
fn test_add_then_remove_leaves_aggregates_unchanged() {
    let mut store = Store::open_in_memory().unwrap();
    store
        .upsert(draft(TxnKind::Income, dec!(1000), "salary", "2024-03-01"), SaveMode::Create)
        .unwrap();
    let reference = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let before = report::daily_totals(store.transactions(), reference);

    let id = store
        .upsert(draft(TxnKind::Expense, dec!(42), "food", "2024-03-01"), SaveMode::Create)
        .unwrap();
    store.remove(id).unwrap();

    let after = report::daily_totals(store.transactions(), reference);
    assert_eq!(before, after);
}

#[test]
fn test_reopen_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cashtrack.db");

    {
        let mut store = Store::open(&path).unwrap();
        store
            .upsert(
                draft(TxnKind::Expense, dec!(12.50), "food", "2024-03-01"),
                SaveMode::Create,
            )
            .unwrap();
    }

    let store = Store::open(&path).unwrap();
    assert_eq!(store.len(), 1);
    let txn = &store.transactions()[0];
    assert_eq!(txn.amount, dec!(12.50));
    assert_eq!(txn.category, "food");
}

#[test]
fn test_corrupt_value_loads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cashtrack.db");

    {
        let store = Store::open(&path).unwrap();
        store
            .conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params!["transactions", "{not json"],
            )
            .unwrap();
    }

    let store = Store::open(&path).unwrap();
    assert!(store.transactions().is_empty());
}

#[test]
fn test_export_csv() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = Store::open_in_memory().unwrap();
    store
        .upsert(draft(TxnKind::Income, dec!(1000), "salary", "2024-03-01"), SaveMode::Create)
        .unwrap();
    store
        .upsert(draft(TxnKind::Expense, dec!(200), "food", "2024-02-15"), SaveMode::Create)
        .unwrap();

    let path = dir.path().join("out.csv");
    let path = path.to_string_lossy().to_string();

    let count = store.export_csv(&path, None).unwrap();
    assert_eq!(count, 2);

    let count = store.export_csv(&path, Some("2024-03")).unwrap();
    assert_eq!(count, 1);
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("id,type,amount,category,date,description"));
    assert!(contents.contains("salary"));
    assert!(!contents.contains("food"));
}
