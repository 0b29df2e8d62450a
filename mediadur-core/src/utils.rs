//! Utility functions for formatting.
//!
//! This module provides small formatting helpers used by the summary and the
//! per-file console output.

/// Formats an integer with comma thousands separators (e.g., 3750 -> "3,750").
#[must_use]
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Joins values with ", " (e.g., [24, 25, 30] -> "24, 25, 30").
#[must_use]
pub fn join_values<I, T>(values: I) -> String
where
    I: IntoIterator<Item = T>,
    T: ToString,
{
    values
        .into_iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
