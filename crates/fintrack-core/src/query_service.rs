//! Filtered, ordered views over the transaction list.

use std::{cmp::Ordering, collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use fintrack_domain::{EntryKind, Transaction};

const ALL: &str = "all";

/// Restricts a view to one transaction kind, or none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KindFilter {
    #[default]
    All,
    Only(EntryKind),
}

impl KindFilter {
    pub fn matches(&self, txn: &Transaction) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Only(kind) => txn.kind == *kind,
        }
    }
}

impl fmt::Display for KindFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KindFilter::All => f.write_str(ALL),
            KindFilter::Only(kind) => f.write_str(kind.as_str()),
        }
    }
}

impl FromStr for KindFilter {
    type Err = QueryParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case(ALL) {
            return Ok(KindFilter::All);
        }
        value
            .parse::<EntryKind>()
            .map(KindFilter::Only)
            .map_err(|_| QueryParseError::Kind(value.to_string()))
    }
}

/// Restricts a view to one exact category label, or none.
///
/// Matching is case-sensitive against the label stored on the transaction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Label(String),
}

impl CategoryFilter {
    pub fn matches(&self, txn: &Transaction) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Label(label) => txn.category == *label,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL),
            CategoryFilter::Label(label) => f.write_str(label),
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value == ALL {
            CategoryFilter::All
        } else {
            CategoryFilter::Label(value.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::DateDesc,
        SortOrder::DateAsc,
        SortOrder::AmountDesc,
        SortOrder::AmountAsc,
    ];

    pub fn token(self) -> &'static str {
        match self {
            SortOrder::DateDesc => "date-desc",
            SortOrder::DateAsc => "date-asc",
            SortOrder::AmountDesc => "amount-desc",
            SortOrder::AmountAsc => "amount-asc",
        }
    }

    /// Menu label shown next to the token.
    pub fn label(self) -> &'static str {
        match self {
            SortOrder::DateDesc => "Newest First",
            SortOrder::DateAsc => "Oldest First",
            SortOrder::AmountDesc => "Highest Amount",
            SortOrder::AmountAsc => "Lowest Amount",
        }
    }

    fn compare(self, a: &Transaction, b: &Transaction) -> Ordering {
        match self {
            SortOrder::DateDesc => b.date.cmp(&a.date),
            SortOrder::DateAsc => a.date.cmp(&b.date),
            SortOrder::AmountDesc => b.amount.total_cmp(&a.amount),
            SortOrder::AmountAsc => a.amount.total_cmp(&b.amount),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for SortOrder {
    type Err = QueryParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|order| order.token() == needle)
            .ok_or_else(|| QueryParseError::Sort(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryParseError {
    #[error("unknown type filter `{0}` (use all, income, or expense)")]
    Kind(String),
    #[error("unknown sort `{0}` (use date-desc, date-asc, amount-desc, or amount-asc)")]
    Sort(String),
}

/// Filter and sort selection for the transaction list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransactionQuery {
    pub kind: KindFilter,
    pub category: CategoryFilter,
    pub sort: SortOrder,
}

impl TransactionQuery {
    pub fn new(kind: KindFilter, category: CategoryFilter, sort: SortOrder) -> Self {
        Self {
            kind,
            category,
            sort,
        }
    }

    /// Applies the kind filter, then the category filter, then a stable sort.
    /// The source slice is left untouched.
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        let mut view: Vec<&Transaction> = transactions
            .iter()
            .filter(|txn| self.kind.matches(txn))
            .filter(|txn| self.category.matches(txn))
            .collect();
        view.sort_by(|a, b| self.sort.compare(a, b));
        view
    }
}

pub struct QueryService;

impl QueryService {
    /// Distinct labels present on the transactions, sorted ascending.
    ///
    /// Drawn from the transactions rather than the category collection, so
    /// dangling labels stay filterable.
    pub fn category_labels(transactions: &[Transaction]) -> Vec<String> {
        transactions
            .iter()
            .map(|txn| txn.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fintrack_domain::NewTransaction;

    fn txn(id: &str, kind: EntryKind, amount: f64, category: &str, day: u32) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2025, 11, day).unwrap();
        Transaction::from_draft(id, NewTransaction::new(kind, amount, category, date))
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn("1", EntryKind::Income, 5000.0, "Salary", 1),
            txn("2", EntryKind::Expense, 1200.0, "Rent", 1),
            txn("3", EntryKind::Expense, 250.0, "Groceries", 5),
        ]
    }

    fn ids(view: &[&Transaction]) -> Vec<String> {
        view.iter().map(|txn| txn.id.clone()).collect()
    }

    #[test]
    fn expense_by_amount_desc_matches_scenario() {
        let source = sample();
        let query = TransactionQuery::new(
            KindFilter::Only(EntryKind::Expense),
            CategoryFilter::All,
            SortOrder::AmountDesc,
        );

        let view = query.apply(&source);

        let rows: Vec<(&str, f64)> = view.iter().map(|t| (t.category.as_str(), t.amount)).collect();
        assert_eq!(rows, vec![("Rent", 1200.0), ("Groceries", 250.0)]);
    }

    #[test]
    fn default_query_is_newest_first_and_stable_on_ties() {
        let source = sample();
        let view = TransactionQuery::default().apply(&source);
        assert_eq!(ids(&view), vec!["3", "1", "2"]);

        let view = TransactionQuery {
            sort: SortOrder::DateAsc,
            ..TransactionQuery::default()
        }
        .apply(&source);
        assert_eq!(ids(&view), vec!["1", "2", "3"]);
    }

    #[test]
    fn category_filter_is_exact_and_case_sensitive() {
        let source = sample();
        let mut query = TransactionQuery::default();
        query.category = CategoryFilter::from("rent");
        assert!(query.apply(&source).is_empty());

        query.category = CategoryFilter::from("Rent");
        assert_eq!(ids(&query.apply(&source)), vec!["2"]);
    }

    #[test]
    fn applying_twice_is_idempotent_and_leaves_source() {
        let source = sample();
        let before = source.clone();
        let query = TransactionQuery::new(KindFilter::All, CategoryFilter::All, SortOrder::AmountAsc);

        let first = ids(&query.apply(&source));
        let second = ids(&query.apply(&source));

        assert_eq!(first, second);
        assert_eq!(source, before);
        assert_eq!(first, vec!["3", "2", "1"]);
    }

    #[test]
    fn labels_are_deduplicated_and_sorted() {
        let mut source = sample();
        source.push(txn("4", EntryKind::Expense, 1.0, "Rent", 9));
        source.push(txn("5", EntryKind::Expense, 1.0, "Coffee", 9));

        assert_eq!(
            QueryService::category_labels(&source),
            vec!["Coffee", "Groceries", "Rent", "Salary"]
        );
    }

    #[test]
    fn tokens_parse_and_display() {
        assert_eq!("amount-asc".parse::<SortOrder>(), Ok(SortOrder::AmountAsc));
        assert!("price".parse::<SortOrder>().is_err());
        assert_eq!("ALL".parse::<KindFilter>(), Ok(KindFilter::All));
        assert_eq!(
            "income".parse::<KindFilter>(),
            Ok(KindFilter::Only(EntryKind::Income))
        );
        assert!(matches!(
            "transfer".parse::<KindFilter>(),
            Err(QueryParseError::Kind(_))
        ));
        assert_eq!(SortOrder::DateDesc.to_string(), "date-desc");
        assert_eq!(CategoryFilter::from("all"), CategoryFilter::All);
        assert_eq!(
            "price".parse::<SortOrder>().unwrap_err().to_string(),
            "unknown sort `price` (use date-desc, date-asc, amount-desc, or amount-asc)"
        );
    }
}
