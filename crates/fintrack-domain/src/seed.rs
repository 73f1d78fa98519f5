//! Default categories, demo transactions, and the color palette.

use chrono::NaiveDate;

use crate::{Category, EntryKind, Transaction};

/// Colors offered when creating a category. The first entry is the default.
pub const CATEGORY_PALETTE: [&str; 10] = [
    "#3b82f6", "#8b5cf6", "#ef4444", "#f97316", "#eab308", "#10b981", "#06b6d4", "#ec4899",
    "#64748b", "#a16207",
];

/// Color used for breakdown slices whose label matches no category.
pub const FALLBACK_CATEGORY_COLOR: &str = "#3b82f6";

/// Categories installed when no saved category collection exists.
pub fn default_categories() -> Vec<Category> {
    [
        ("1", "Salary", EntryKind::Income, "#3b82f6"),
        ("2", "Freelance", EntryKind::Income, "#8b5cf6"),
        ("3", "Rent", EntryKind::Expense, "#ef4444"),
        ("4", "Groceries", EntryKind::Expense, "#f97316"),
        ("5", "Utilities", EntryKind::Expense, "#eab308"),
        ("6", "Entertainment", EntryKind::Expense, "#ec4899"),
    ]
    .into_iter()
    .map(|(id, name, kind, color)| Category {
        id: id.into(),
        name: name.into(),
        kind,
        color: color.into(),
    })
    .collect()
}

/// Demo transactions installed when no saved transaction collection exists.
pub fn demo_transactions() -> Vec<Transaction> {
    [
        ("1", EntryKind::Income, 5000.0, "Salary", 1, "Monthly salary"),
        ("2", EntryKind::Expense, 1200.0, "Rent", 1, ""),
        ("3", EntryKind::Expense, 250.0, "Groceries", 5, "Weekly shopping"),
        ("4", EntryKind::Expense, 80.0, "Utilities", 3, "Electricity bill"),
        ("5", EntryKind::Income, 500.0, "Freelance", 8, "Project income"),
    ]
    .into_iter()
    .filter_map(|(id, kind, amount, category, day, notes)| {
        Some(Transaction {
            id: id.into(),
            kind,
            amount,
            category: category.into(),
            date: NaiveDate::from_ymd_opt(2025, 11, day)?,
            notes: notes.into(),
        })
    })
    .collect()
}
