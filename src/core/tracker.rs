//! Owner of the live book and the store it mirrors to.

use fintrack_core::{
    storage::{dangling_labels, load_collection, save_collection, KeyValueStore, StoreKey},
    BookSnapshot, CategoryService, Dashboard, FinanceBook, IdGenerator, SummaryService,
    TransactionQuery, TransactionService, UuidIds,
};
use fintrack_domain::{
    default_categories, demo_transactions, Category, NewCategory, NewTransaction, Transaction,
};
use tracing::{info, warn};

use crate::errors::TrackerError;

/// Keeps the in-memory book and its store in step.
///
/// Every mutation rewrites the affected collection before returning, so a
/// view derived afterwards always reflects it. When the write fails the
/// mutation is undone and the error returned.
pub struct Tracker<S: KeyValueStore> {
    book: FinanceBook,
    store: S,
}

impl<S: KeyValueStore> Tracker<S> {
    /// Loads both collections, seeding the defaults for any that were never saved.
    pub fn open(store: S, seed_demo_data: bool) -> Result<Self, TrackerError> {
        Self::open_with_ids(store, seed_demo_data, Box::new(UuidIds))
    }

    pub fn open_with_ids(
        store: S,
        seed_demo_data: bool,
        ids: Box<dyn IdGenerator>,
    ) -> Result<Self, TrackerError> {
        let stored_transactions: Option<Vec<Transaction>> =
            load_collection(&store, StoreKey::Transactions)?;
        let stored_categories: Option<Vec<Category>> =
            load_collection(&store, StoreKey::Categories)?;

        let seed_transactions = stored_transactions.is_none();
        let seed_categories = stored_categories.is_none();
        let transactions =
            stored_transactions.unwrap_or_else(|| seed_or_empty(seed_demo_data, demo_transactions));
        let categories =
            stored_categories.unwrap_or_else(|| seed_or_empty(seed_demo_data, default_categories));

        if seed_transactions {
            save_collection(&store, StoreKey::Transactions, &transactions)?;
        }
        if seed_categories {
            save_collection(&store, StoreKey::Categories, &categories)?;
        }
        info!(
            transactions = transactions.len(),
            categories = categories.len(),
            seeded = seed_transactions || seed_categories,
            "tracker opened"
        );

        let tracker = Self {
            book: FinanceBook::with_id_generator(transactions, categories, ids),
            store,
        };
        for label in tracker.dangling_labels() {
            warn!(%label, "transactions reference a category that no longer exists");
        }
        Ok(tracker)
    }

    pub fn book(&self) -> &FinanceBook {
        &self.book
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.book.transactions()
    }

    pub fn categories(&self) -> &[Category] {
        self.book.categories()
    }

    pub fn dashboard(&self) -> Dashboard {
        SummaryService::dashboard(self.transactions(), self.categories())
    }

    pub fn view(&self, query: &TransactionQuery) -> Vec<&Transaction> {
        query.apply(self.transactions())
    }

    /// Transaction labels with no matching category name.
    pub fn dangling_labels(&self) -> Vec<String> {
        dangling_labels(self.transactions(), self.categories())
    }

    pub fn add_transaction(&mut self, draft: NewTransaction) -> Result<Transaction, TrackerError> {
        let before = self.book.snapshot();
        let (txn, snapshot) = TransactionService::add(&mut self.book, draft)?;
        let saved = self.persist_transactions(&snapshot);
        self.keep_or_roll_back(before, saved)?;
        info!(id = %txn.id, kind = %txn.kind, amount = txn.amount, "transaction added");
        Ok(txn)
    }

    pub fn delete_transaction(&mut self, id: &str) -> Result<Transaction, TrackerError> {
        let before = self.book.snapshot();
        let removed = TransactionService::remove(&mut self.book, id)?;
        let saved = self.persist_transactions(&self.book.snapshot());
        self.keep_or_roll_back(before, saved)?;
        info!(id, "transaction deleted");
        Ok(removed)
    }

    pub fn add_category(&mut self, draft: NewCategory) -> Result<Category, TrackerError> {
        let before = self.book.snapshot();
        let (category, snapshot) = CategoryService::add(&mut self.book, draft)?;
        let saved = save_collection(&self.store, StoreKey::Categories, &snapshot.categories)
            .map_err(TrackerError::from);
        self.keep_or_roll_back(before, saved)?;
        info!(id = %category.id, name = %category.name, "category added");
        Ok(category)
    }

    /// Deletes the category. Transactions that carry its name keep it.
    pub fn delete_category(&mut self, id: &str) -> Result<Category, TrackerError> {
        let before = self.book.snapshot();
        let removed = CategoryService::remove(&mut self.book, id)?;
        let saved = save_collection(&self.store, StoreKey::Categories, self.book.categories())
            .map_err(TrackerError::from);
        self.keep_or_roll_back(before, saved)?;
        info!(id, name = %removed.name, "category deleted");
        if self.transactions().iter().any(|txn| txn.category == removed.name) {
            warn!(label = %removed.name, "deleted category is still referenced by transactions");
        }
        Ok(removed)
    }

    fn persist_transactions(&self, snapshot: &BookSnapshot) -> Result<(), TrackerError> {
        save_collection(&self.store, StoreKey::Transactions, &snapshot.transactions)?;
        Ok(())
    }

    /// A failed write must not leave the book ahead of the store.
    fn keep_or_roll_back(
        &mut self,
        before: BookSnapshot,
        saved: Result<(), TrackerError>,
    ) -> Result<(), TrackerError> {
        if let Err(err) = &saved {
            warn!(error = %err, "save failed, rolling back the change");
            self.book.restore(before);
        }
        saved
    }
}

fn seed_or_empty<T>(seed: bool, defaults: fn() -> Vec<T>) -> Vec<T> {
    if seed {
        defaults()
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::cell::Cell;

    use fintrack_core::{storage::MemoryStore, CoreError, CoreResult, SequentialIds};
    use fintrack_domain::EntryKind;

    /// Memory store whose writes can be switched off after opening.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        refuse_writes: Cell<bool>,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: StoreKey) -> CoreResult<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: StoreKey, value: &str) -> CoreResult<()> {
            if self.refuse_writes.get() {
                return Err(CoreError::Storage("disk full".into()));
            }
            self.inner.set(key, value)
        }
    }

    fn open_seeded() -> Tracker<MemoryStore> {
        Tracker::open_with_ids(MemoryStore::new(), true, Box::new(SequentialIds::starting_at(100)))
            .expect("open tracker")
    }

    fn stored_transactions(store: &MemoryStore) -> Vec<Transaction> {
        load_collection(store, StoreKey::Transactions)
            .expect("load")
            .expect("present")
    }

    fn stored_categories(store: &MemoryStore) -> Vec<Category> {
        load_collection(store, StoreKey::Categories)
            .expect("load")
            .expect("present")
    }

    #[test]
    fn fresh_store_is_seeded_and_written_back() {
        let tracker = open_seeded();
        assert_eq!(tracker.transactions().len(), 5);
        assert_eq!(tracker.categories().len(), 6);

        let saved = stored_transactions(tracker.store());
        assert_eq!(saved, demo_transactions());
    }

    #[test]
    fn seeding_can_be_disabled() {
        let tracker = Tracker::open(MemoryStore::new(), false).expect("open");
        assert!(tracker.transactions().is_empty());
        assert!(tracker.categories().is_empty());
        assert_eq!(tracker.dashboard().totals.balance, 0.0);
    }

    #[test]
    fn saved_empty_collections_are_not_reseeded() {
        let store = MemoryStore::new();
        store.set(StoreKey::Transactions, "[]").unwrap();
        store.set(StoreKey::Categories, "[]").unwrap();

        let tracker = Tracker::open(store, true).expect("open");

        assert!(tracker.transactions().is_empty());
        assert!(tracker.categories().is_empty());
    }

    #[test]
    fn mutations_are_persisted_before_returning() {
        let mut tracker = open_seeded();
        let date = NaiveDate::from_ymd_opt(2025, 11, 20).unwrap();

        let txn = tracker
            .add_transaction(NewTransaction::new(EntryKind::Expense, 45.5, "groceries", date))
            .expect("add");
        assert_eq!(txn.category, "Groceries");

        let saved = stored_transactions(tracker.store());
        assert_eq!(saved[0], txn);
        assert_eq!(tracker.dashboard().totals.total_expense, 1575.5);

        tracker.delete_transaction(&txn.id).expect("delete");
        let saved = stored_transactions(tracker.store());
        assert_eq!(saved.len(), 5);
    }

    #[test]
    fn deleting_a_category_leaves_a_dangling_label() {
        let mut tracker = open_seeded();
        let rent = tracker.book().category_named("Rent").unwrap().id.clone();

        tracker.delete_category(&rent).expect("delete");

        let saved = stored_categories(tracker.store());
        assert_eq!(saved.len(), 5);
        assert_eq!(tracker.dangling_labels(), vec!["Rent"]);
        assert_eq!(tracker.transactions().len(), 5);
    }

    #[test]
    fn validation_failures_leave_store_untouched() {
        let mut tracker = open_seeded();
        let date = NaiveDate::from_ymd_opt(2025, 11, 20).unwrap();

        let err = tracker
            .add_transaction(NewTransaction::new(EntryKind::Income, 0.0, "Salary", date))
            .expect_err("zero amount");

        assert!(matches!(err, TrackerError::Core(CoreError::Validation(_))));
        let saved = stored_transactions(tracker.store());
        assert_eq!(saved.len(), 5);
    }

    #[test]
    fn failed_writes_roll_the_book_back() {
        let mut tracker = Tracker::open_with_ids(
            FlakyStore::default(),
            true,
            Box::new(SequentialIds::starting_at(100)),
        )
        .expect("open tracker");
        let before = tracker.book().snapshot();
        tracker.store().refuse_writes.set(true);
        let date = NaiveDate::from_ymd_opt(2025, 11, 20).unwrap();

        let err = tracker
            .add_transaction(NewTransaction::new(EntryKind::Expense, 12.0, "Rent", date))
            .expect_err("write refused");
        assert!(matches!(err, TrackerError::Core(CoreError::Storage(_))));
        assert_eq!(tracker.book().snapshot(), before);

        tracker.delete_transaction("1").expect_err("write refused");
        tracker
            .add_category(NewCategory::new("Travel", EntryKind::Expense))
            .expect_err("write refused");
        let rent = tracker.book().category_named("Rent").unwrap().id.clone();
        tracker.delete_category(&rent).expect_err("write refused");
        assert_eq!(tracker.book().snapshot(), before);

        tracker.store().refuse_writes.set(false);
        tracker.delete_transaction("1").expect("write accepted");
        assert_eq!(stored_transactions(&tracker.store().inner).len(), 4);
    }
}
