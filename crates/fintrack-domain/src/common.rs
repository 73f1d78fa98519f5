//! Shared traits and enums for finance primitives.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Exposes a stable identifier for stored entities.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Direction of a money movement. Shared by transactions and categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    /// Lowercase token used in storage and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
        }
    }

    pub fn is_income(self) -> bool {
        matches!(self, EntryKind::Income)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntryKind::Income => "Income",
            EntryKind::Expense => "Expense",
        };
        f.pad(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raised when a token is neither `income` nor `expense`.
pub struct ParseKindError(pub String);

impl fmt::Display for ParseKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown kind `{}` (expected income or expense)", self.0)
    }
}

impl std::error::Error for ParseKindError {}

impl FromStr for EntryKind {
    type Err = ParseKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(EntryKind::Income),
            "expense" => Ok(EntryKind::Expense),
            _ => Err(ParseKindError(value.to_string())),
        }
    }
}
