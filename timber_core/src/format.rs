//! # Formatting
//!
//! Swedish number, currency and duration formatting for reports and the CLI.
//! Thousands are separated by a non-breaking space and decimals by a comma:
//! `12 345,50`.

/// Non-breaking space used as thousands separator
pub const THOUSANDS_SEPARATOR: char = '\u{a0}';

/// Format `value` with `decimals` decimals, Swedish style.
///
/// ```rust
/// use timber_core::format::format_number;
///
/// assert_eq!(format_number(12345.678, 2), "12\u{a0}345,68");
/// assert_eq!(format_number(-0.5, 1), "-0,5");
/// ```
pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let fixed = format!("{:.*}", decimals, value.abs());
    let (whole, fraction) = match fixed.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }
        grouped.push(digit);
    }

    // No minus sign for values that round to zero
    let negative = value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };
    match fraction {
        Some(f) => format!("{}{},{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Whole kronor with a `kr` suffix
pub fn format_currency(value: f64) -> String {
    format!("{} kr", format_number(value.round(), 0))
}

fn hours_and_minutes(hours: f64) -> (u64, u64) {
    let minutes = if hours.is_finite() && hours > 0.0 {
        (hours * 60.0).round() as u64
    } else {
        0
    };
    (minutes / 60, minutes % 60)
}

/// `"2h 30min"`, `"45min"`, `"3h"` or `"0min"`
pub fn format_time(hours: f64) -> String {
    match hours_and_minutes(hours) {
        (0, m) => format!("{}min", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}min", h, m),
    }
}

/// `"2:30"`
pub fn format_time_short(hours: f64) -> String {
    let (h, m) = hours_and_minutes(hours);
    format!("{}:{:02}", h, m)
}
