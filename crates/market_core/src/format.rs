//! Display formatting for stat tiles and instrument cards.
//!
//! # Examples
//!
//! ```
//! use market_core::format::{format_compact, format_currency, format_percentage};
//!
//! assert_eq!(format_currency(1234.5), "$1,234.50");
//! assert_eq!(format_percentage(-3.1), "-3.10%");
//! assert_eq!(format_compact(13.42e12), "13.42T");
//! ```

/// Compact suffixes, largest first.
const COMPACT_UNITS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

/// Format a value as US dollars with thousands separators and two decimals.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, group_thousands(cents / 100), cents % 100)
}

/// Format a percentage with an explicit sign and two decimals.
///
/// Values that round to zero are shown unsigned.
pub fn format_percentage(percent: f64) -> String {
    if !percent.is_finite() {
        return "-".to_string();
    }
    let rounded = (percent * 100.0).round() / 100.0;
    if rounded == 0.0 {
        "0.00%".to_string()
    } else if rounded > 0.0 {
        format!("+{:.2}%", rounded)
    } else {
        format!("{:.2}%", rounded)
    }
}

/// Format a large number with a T/B/M/K suffix and two decimals.
pub fn format_compact(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let magnitude = value.abs();
    for (scale, suffix) in COMPACT_UNITS {
        if magnitude >= scale {
            return format!("{:.2}{}", value / scale, suffix);
        }
    }
    format!("{:.2}", value)
}

fn group_thousands(mut whole: u64) -> String {
    let mut groups = Vec::new();
    loop {
        let group = whole % 1000;
        whole /= 1000;
        if whole == 0 {
            groups.push(group.to_string());
            break;
        }
        groups.push(format!("{:03}", group));
    }
    groups.reverse();
    groups.join(",")
}
