#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::util::*;

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_small_amount() {
    assert_eq!(format_amount(dec!(4.50)), "₹4.50");
}

#[test]
fn test_format_zero() {
    assert_eq!(format_amount(Decimal::ZERO), "₹0.00");
}

#[test]
fn test_format_thousands() {
    assert_eq!(format_amount(dec!(1234.56)), "₹1,234.56");
    assert_eq!(format_amount(dec!(1234567.89)), "₹1,234,567.89");
}

#[test]
fn test_format_rounds_to_two_places() {
    assert_eq!(format_amount(dec!(10)), "₹10.00");
    assert_eq!(format_amount(dec!(0.999)), "₹1.00");
}

#[test]
fn test_format_exact_thousand() {
    assert_eq!(format_amount(dec!(1000)), "₹1,000.00");
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 5), "hell…");
}

#[test]
fn test_truncate_empty() {
    assert_eq!(truncate("", 5), "");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("रेलवे यात्रा", 4), "रेल…");
}

// ── scroll helpers ────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_cursor_and_window() {
    let (mut index, mut scroll) = (0, 0);
    for _ in 0..10 {
        scroll_down(&mut index, &mut scroll, 12, 5);
    }
    assert_eq!(index, 10);
    assert_eq!(scroll, 6);
    // Stops at the end of the list
    scroll_down(&mut index, &mut scroll, 12, 5);
    scroll_down(&mut index, &mut scroll, 12, 5);
    assert_eq!(index, 11);
}

#[test]
fn test_scroll_up_clamps_at_zero() {
    let (mut index, mut scroll) = (1, 1);
    scroll_up(&mut index, &mut scroll);
    scroll_up(&mut index, &mut scroll);
    assert_eq!(index, 0);
    assert_eq!(scroll, 0);
}

#[test]
fn test_scroll_to_top_and_bottom() {
    let (mut index, mut scroll) = (7, 4);
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));

    scroll_to_bottom(&mut index, &mut scroll, 20, 5);
    assert_eq!(index, 19);
    assert_eq!(scroll, 15);

    // Empty list leaves cursor alone
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 0, 5);
    assert_eq!((index, scroll), (0, 0));
}
