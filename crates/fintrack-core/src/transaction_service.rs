//! Validated add/remove helpers for transactions.

use fintrack_domain::{NewTransaction, Transaction};

use crate::{book::FinanceBook, BookSnapshot, CoreError, CoreResult};

/// Checks user input before it reaches the book. The engines assume these
/// checks have passed and never repeat them.
pub struct TransactionService;

impl TransactionService {
    pub fn validate(draft: &NewTransaction) -> CoreResult<()> {
        if !draft.amount.is_finite() || draft.amount <= 0.0 {
            return Err(CoreError::Validation(
                "Please enter a valid amount greater than 0".into(),
            ));
        }
        if draft.category.trim().is_empty() {
            return Err(CoreError::Validation("Please select a category".into()));
        }
        Ok(())
    }

    /// Validates the draft, resolves its category against the book, and
    /// stores it. The stored label is the category's canonical name.
    pub fn add(
        book: &mut FinanceBook,
        mut draft: NewTransaction,
    ) -> CoreResult<(Transaction, BookSnapshot)> {
        Self::validate(&draft)?;
        let category = book
            .category_named(draft.category.trim())
            .filter(|category| category.kind == draft.kind)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "No {} category named `{}`",
                    draft.kind.as_str(),
                    draft.category.trim()
                ))
            })?;
        draft.category = category.name.clone();
        Ok(book.add_transaction(draft))
    }

    pub fn remove(book: &mut FinanceBook, id: &str) -> CoreResult<Transaction> {
        book.remove_transaction(id)
            .ok_or_else(|| CoreError::TransactionNotFound(id.to_string()))
    }
}
