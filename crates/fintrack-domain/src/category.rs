//! Domain types representing user-defined categories.

use serde::{Deserialize, Serialize};

use crate::{common::*, seed::CATEGORY_PALETTE};

/// Named bucket used to classify transactions, with a display color.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub color: String,
}

impl Category {
    pub fn from_draft(id: impl Into<String>, draft: NewCategory) -> Self {
        Self {
            id: id.into(),
            name: draft.name,
            kind: draft.kind,
            color: draft.color,
        }
    }

    /// Case-insensitive name comparison, as used for uniqueness checks.
    pub fn matches_name(&self, candidate: &str) -> bool {
        self.name.to_lowercase() == candidate.to_lowercase()
    }
}

impl Identifiable for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.kind)
    }
}

/// User-submitted category fields, before an identifier is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub kind: EntryKind,
    pub color: String,
}

impl NewCategory {
    /// Creates a draft using the first palette color.
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
            color: CATEGORY_PALETTE[0].to_string(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}
