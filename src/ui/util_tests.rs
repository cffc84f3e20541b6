#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::util::*;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("Flights", 7), "Flights");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("Accommodation", 6), "Accom…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("São Paulo trip", 4), "São…");
}

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_whole() {
    assert_eq!(format_amount(dec!(900)), "$900");
    assert_eq!(format_amount(dec!(3000)), "$3,000");
    assert_eq!(format_amount(dec!(1234567)), "$1,234,567");
}

#[test]
fn test_format_amount_whole_with_scale() {
    assert_eq!(format_amount(dec!(630.0)), "$630");
}

#[test]
fn test_format_amount_cents() {
    assert_eq!(format_amount(dec!(33.5)), "$33.50");
    assert_eq!(format_amount(dec!(1234.56)), "$1,234.56");
}

#[test]
fn test_format_amount_zero_and_negative() {
    assert_eq!(format_amount(Decimal::ZERO), "$0");
    assert_eq!(format_amount(dec!(-51)), "-$51");
    assert_eq!(format_amount(dec!(-1500.25)), "-$1,500.25");
}

#[test]
fn test_format_drift_sign() {
    assert_eq!(format_drift(dec!(100)), "+$100");
    assert_eq!(format_drift(dec!(-51)), "-$51");
    assert_eq!(format_drift(Decimal::ZERO), "$0");
}

// ── parse_amount ──────────────────────────────────────────────

#[test]
fn test_parse_amount_plain() {
    assert_eq!(parse_amount("3000"), Some(dec!(3000)));
    assert_eq!(parse_amount(" 1234.56 "), Some(dec!(1234.56)));
}

#[test]
fn test_parse_amount_formatted() {
    assert_eq!(parse_amount("$3,000"), Some(dec!(3000)));
    assert_eq!(parse_amount("1_000_000"), Some(dec!(1000000)));
    assert_eq!(parse_amount("-100"), Some(dec!(-100)));
}

#[test]
fn test_parse_amount_invalid() {
    assert_eq!(parse_amount(""), None);
    assert_eq!(parse_amount("$"), None);
    assert_eq!(parse_amount("lots"), None);
}

// ── slider ────────────────────────────────────────────────────

#[test]
fn test_slider_positions() {
    assert_eq!(slider(0.0, 7), "├●────┤");
    assert_eq!(slider(1.0, 7), "├────●┤");
    assert_eq!(slider(0.5, 9), "├───●───┤");
}

#[test]
fn test_slider_clamps_out_of_range() {
    assert_eq!(slider(-1.0, 7), slider(0.0, 7));
    assert_eq!(slider(2.0, 7), slider(1.0, 7));
}

#[test]
fn test_slider_width_in_chars() {
    assert_eq!(slider(0.3, 20).chars().count(), 20);
    assert_eq!(slider(0.3, 2), "●");
    assert_eq!(slider(0.3, 0), "");
}

// ── scrolling ─────────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_window() {
    let (mut index, mut scroll) = (2, 0);
    scroll_down(&mut index, &mut scroll, 10, 3);
    assert_eq!((index, scroll), (3, 1));
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (9, 7);
    scroll_down(&mut index, &mut scroll, 10, 3);
    assert_eq!((index, scroll), (9, 7));
}

#[test]
fn test_scroll_up_moves_window() {
    let (mut index, mut scroll) = (3, 3);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (2, 2));
    let (mut index, mut scroll) = (0, 0);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_scroll_to_bottom() {
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 10, 4);
    assert_eq!((index, scroll), (9, 6));
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 0, 4);
    assert_eq!((index, scroll), (0, 0));
}
