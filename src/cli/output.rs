use colored::{ColoredString, Colorize};
use std::fmt;

use fintrack_core::{format::format_currency, Totals};
use fintrack_domain::{EntryKind, Transaction};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Hint,
    Section,
}

/// Turns ANSI styling on or off for everything printed afterwards.
pub fn set_color_enabled(enabled: bool) {
    if enabled {
        colored::control::unset_override();
    } else {
        colored::control::set_override(false);
    }
}

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()).bold().to_string(),
        MessageKind::Success => text.bright_green().to_string(),
        MessageKind::Warning => format!("Warning: {text}").bright_yellow().to_string(),
        MessageKind::Error => format!("Error: {text}").bright_red().to_string(),
        MessageKind::Hint => format!("Hint: {text}").dimmed().to_string(),
        MessageKind::Info => text,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = apply_style(kind, message);
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn hint(message: impl fmt::Display) {
    print(MessageKind::Hint, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// `+$5000.00` in green for income, `-$250.00` in red for expenses.
pub fn signed_amount(txn: &Transaction) -> ColoredString {
    match txn.kind {
        EntryKind::Income => format!("+{}", format_currency(txn.amount)).green(),
        EntryKind::Expense => format!("-{}", format_currency(txn.amount)).red(),
    }
}

/// Balance in green when income covers expenses, red otherwise.
pub fn balance(totals: &Totals) -> ColoredString {
    let text = format_currency(totals.balance);
    if totals.is_surplus() {
        text.green()
    } else {
        text.red()
    }
}
