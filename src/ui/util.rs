use rust_decimal::Decimal;
use std::str::FromStr;

/// Format a decimal amount with thousand separators. Whole amounts print without cents.
/// e.g. `1234567` → `"$1,234,567"`, `33.5` → `"$33.50"`
pub(crate) fn format_amount(val: Decimal) -> String {
    let abs = val.abs();
    let formatted = if abs.fract().is_zero() {
        format!("{:.0}", abs.trunc())
    } else {
        format!("{abs:.2}")
    };
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next();

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    let sign = if val < Decimal::ZERO { "-" } else { "" };
    match dec_part {
        Some(cents) => format!("{sign}${with_commas}.{cents}"),
        None => format!("{sign}${with_commas}"),
    }
}

/// Format a signed difference, always with a sign: `+$100`, `-$51`, `$0`.
pub(crate) fn format_drift(val: Decimal) -> String {
    if val > Decimal::ZERO {
        format!("+{}", format_amount(val))
    } else {
        format_amount(val)
    }
}

/// Parse a user-typed amount, tolerating `$` and thousand separators.
pub(crate) fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '_'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Render a slider track of `width` cells with a knob at `position` (0.0 to 1.0).
/// e.g. `slider(0.5, 9)` → `"├───●───┤"`
pub(crate) fn slider(position: f64, width: usize) -> String {
    if width < 3 {
        return "●".repeat(width.min(1));
    }
    let inner = width - 2;
    let knob = ((position.clamp(0.0, 1.0) * (inner - 1) as f64).round()) as usize;
    let track: String = (0..inner)
        .map(|i| if i == knob { '●' } else { '─' })
        .collect();
    format!("├{track}┤")
}

/// Move a list cursor down by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_down(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if *index + 1 < len {
        *index += 1;
        if *index >= *scroll + page {
            *scroll = index.saturating_sub(page - 1);
        }
    }
}

/// Move a list cursor up by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_up(index: &mut usize, scroll: &mut usize) {
    *index = index.saturating_sub(1);
    if *index < *scroll {
        *scroll = *index;
    }
}

/// Jump cursor to the bottom of a list.
pub(crate) fn scroll_to_bottom(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if len > 0 {
        *index = len - 1;
        *scroll = index.saturating_sub(page.saturating_sub(1));
    }
}
