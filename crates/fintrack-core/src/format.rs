//! Text formatting shared by the exporters and the shell.

use chrono::NaiveDate;

/// Formats a value with exactly two decimals and no currency symbol.
pub fn format_amount(amount: f64) -> String {
    // `-0.0` would otherwise render as "-0.00".
    let amount = if amount == 0.0 { 0.0 } else { amount };
    format!("{amount:.2}")
}

/// Formats a value as a dollar string, e.g. `$1450.00` or `$-20.00`.
pub fn format_currency(amount: f64) -> String {
    format!("${}", format_amount(amount))
}

/// Short en-US date (`11/8/2025`), as shown in report headers.
pub fn format_report_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// ISO date used in export file names.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
