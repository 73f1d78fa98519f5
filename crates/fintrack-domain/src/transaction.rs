//! Domain model for recorded money movements.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::*;

/// A single dated income or expense entry.
///
/// `category` holds the category *name* at the time of creation. It is a weak
/// reference: deleting the category leaves the label in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

impl Transaction {
    pub fn from_draft(id: impl Into<String>, draft: NewTransaction) -> Self {
        Self {
            id: id.into(),
            kind: draft.kind,
            amount: draft.amount,
            category: draft.category,
            date: draft.date,
            notes: draft.notes,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind.is_income()
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Amounted for Transaction {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        let sign = if self.is_income() { "+" } else { "-" };
        format!("{} {} {}${:.2}", self.date, self.category, sign, self.amount)
    }
}

/// User-submitted transaction fields, before an identifier is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub kind: EntryKind,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    pub notes: String,
}

impl NewTransaction {
    pub fn new(
        kind: EntryKind,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            kind,
            amount,
            category: category.into(),
            date,
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}
