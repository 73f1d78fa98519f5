//! Owned application state: the transaction and category collections.

use std::fmt;

use uuid::Uuid;

use fintrack_domain::{
    Category, EntryKind, Identifiable, NewCategory, NewTransaction, Transaction,
};

/// Produces identifiers for newly created entities.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Random UUID v4 identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Counts upwards from a starting value. Deterministic; meant for tests.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = self.next.to_string();
        self.next += 1;
        id
    }
}

/// Copy of both collections taken right after a mutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookSnapshot {
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
}

/// Holds the canonical collections.
///
/// Transactions are kept newest-submitted first; categories keep insertion
/// order. Entities are immutable once stored: the only mutations are add and
/// remove.
pub struct FinanceBook {
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
    ids: Box<dyn IdGenerator>,
}

impl FinanceBook {
    pub fn new(transactions: Vec<Transaction>, categories: Vec<Category>) -> Self {
        Self::with_id_generator(transactions, categories, Box::new(UuidIds))
    }

    pub fn with_id_generator(
        transactions: Vec<Transaction>,
        categories: Vec<Category>,
        ids: Box<dyn IdGenerator>,
    ) -> Self {
        Self {
            transactions,
            categories,
            ids,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            transactions: self.transactions.clone(),
            categories: self.categories.clone(),
        }
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        position_of(&self.transactions, id).map(|idx| &self.transactions[idx])
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        position_of(&self.categories, id).map(|idx| &self.categories[idx])
    }

    /// Case-insensitive lookup by category name.
    pub fn category_named(&self, name: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|category| category.matches_name(name))
    }

    pub fn categories_of_kind(&self, kind: EntryKind) -> Vec<&Category> {
        self.categories
            .iter()
            .filter(|category| category.kind == kind)
            .collect()
    }

    /// Stores the draft under a fresh identifier, ahead of older entries.
    pub fn add_transaction(&mut self, draft: NewTransaction) -> (Transaction, BookSnapshot) {
        let txn = Transaction::from_draft(self.ids.next_id(), draft);
        self.transactions.insert(0, txn.clone());
        (txn, self.snapshot())
    }

    pub fn remove_transaction(&mut self, id: &str) -> Option<Transaction> {
        let idx = position_of(&self.transactions, id)?;
        Some(self.transactions.remove(idx))
    }

    pub fn add_category(&mut self, draft: NewCategory) -> (Category, BookSnapshot) {
        let category = Category::from_draft(self.ids.next_id(), draft);
        self.categories.push(category.clone());
        (category, self.snapshot())
    }

    /// Removes the category only. Transactions keep their label.
    pub fn remove_category(&mut self, id: &str) -> Option<Category> {
        let idx = position_of(&self.categories, id)?;
        Some(self.categories.remove(idx))
    }

    /// Puts both collections back to an earlier snapshot. Issued ids are not
    /// reused.
    pub fn restore(&mut self, snapshot: BookSnapshot) {
        self.transactions = snapshot.transactions;
        self.categories = snapshot.categories;
    }
}

fn position_of<T: Identifiable>(items: &[T], id: &str) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

impl Default for FinanceBook {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for FinanceBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FinanceBook")
            .field("transactions", &self.transactions.len())
            .field("categories", &self.categories.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fintrack_domain::{default_categories, demo_transactions};

    fn seeded() -> FinanceBook {
        FinanceBook::with_id_generator(
            demo_transactions(),
            default_categories(),
            Box::new(SequentialIds::starting_at(100)),
        )
    }

    #[test]
    fn added_transactions_go_first_with_fresh_ids() {
        let mut book = seeded();
        let date = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();

        let (txn, snapshot) =
            book.add_transaction(NewTransaction::new(EntryKind::Expense, 42.0, "Rent", date));

        assert_eq!(txn.id, "100");
        assert_eq!(snapshot.transactions[0], txn);
        assert_eq!(snapshot.transactions.len(), 6);
        assert_eq!(book.transactions()[0].id, "100");
    }

    #[test]
    fn restore_rewinds_both_collections() {
        let mut book = seeded();
        let before = book.snapshot();
        let date = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();

        book.add_transaction(NewTransaction::new(EntryKind::Expense, 42.0, "Rent", date));
        book.remove_category("1").expect("default category exists");
        book.restore(before.clone());

        assert_eq!(book.snapshot(), before);
        let (txn, _) =
            book.add_transaction(NewTransaction::new(EntryKind::Expense, 7.0, "Rent", date));
        assert_eq!(txn.id, "101");
    }

    #[test]
    fn snapshot_is_detached_from_later_mutations() {
        let mut book = seeded();
        let (_, snapshot) = book.add_category(NewCategory::new("Travel", EntryKind::Expense));

        book.remove_transaction("1").expect("demo transaction exists");

        assert_eq!(snapshot.transactions.len(), 5);
        assert_eq!(book.transactions().len(), 4);
        assert_eq!(snapshot.categories.last().unwrap().name, "Travel");
    }

    #[test]
    fn removing_category_keeps_transactions() {
        let mut book = seeded();
        let rent = book.category_named("rent").expect("rent exists").id.clone();

        let removed = book.remove_category(&rent).expect("removed");

        assert_eq!(removed.name, "Rent");
        assert!(book.transactions().iter().any(|txn| txn.category == "Rent"));
        assert!(book.category_named("Rent").is_none());
    }

    #[test]
    fn unknown_ids_remove_nothing() {
        let mut book = seeded();
        assert!(book.remove_transaction("missing").is_none());
        assert!(book.remove_category("missing").is_none());
        assert_eq!(book.transactions().len(), 5);
    }

    #[test]
    fn categories_filter_by_kind() {
        let book = seeded();
        let income: Vec<&str> = book
            .categories_of_kind(EntryKind::Income)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(income, vec!["Salary", "Freelance"]);
    }
}
