//! Aggregations behind the dashboard: totals, monthly series, and the
//! expense breakdown per category label.

use std::{collections::HashMap, fmt};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use fintrack_domain::{Amounted, Category, EntryKind, Transaction, FALLBACK_CATEGORY_COLOR};

/// Income, expense, and the resulting balance over a transaction list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
}

impl Totals {
    /// `true` when income covers expenses.
    pub fn is_surplus(&self) -> bool {
        self.balance >= 0.0
    }
}

/// Calendar year-month used to bucket transactions.
///
/// Ordering is chronological, which for four-digit years is also the
/// lexicographic order of the `YYYY-MM` rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Human-readable label: short month name and full year (`Nov 2025`).
    pub fn label(&self) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(first) => first.format("%b %Y").to_string(),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Income and expense sums for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyEntry {
    pub month: MonthKey,
    pub income: f64,
    pub expense: f64,
}

/// Total expense for one category label, with its display color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySlice {
    pub category: String,
    pub total: f64,
    pub color: String,
}

/// Everything the overview screen renders in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub totals: Totals,
    pub monthly: Vec<MonthlyEntry>,
    pub breakdown: Vec<CategorySlice>,
}

pub struct SummaryService;

impl SummaryService {
    /// Sums income and expense amounts. An empty list yields zeros.
    pub fn totals(transactions: &[Transaction]) -> Totals {
        let (total_income, total_expense) =
            transactions
                .iter()
                .fold((0.0, 0.0), |(income, expense), txn| match txn.kind {
                    EntryKind::Income => (income + txn.amount(), expense),
                    EntryKind::Expense => (income, expense + txn.amount()),
                });
        Totals {
            total_income,
            total_expense,
            balance: total_income - total_expense,
        }
    }

    /// Groups by calendar month, ascending. Months without transactions are
    /// not synthesized.
    pub fn monthly_series(transactions: &[Transaction]) -> Vec<MonthlyEntry> {
        let mut buckets: HashMap<MonthKey, (f64, f64)> = HashMap::new();
        for txn in transactions {
            let bucket = buckets.entry(MonthKey::of(txn.date)).or_insert((0.0, 0.0));
            match txn.kind {
                EntryKind::Income => bucket.0 += txn.amount,
                EntryKind::Expense => bucket.1 += txn.amount,
            }
        }
        let mut series: Vec<MonthlyEntry> = buckets
            .into_iter()
            .map(|(month, (income, expense))| MonthlyEntry {
                month,
                income,
                expense,
            })
            .collect();
        series.sort_by_key(|entry| entry.month);
        debug!(months = series.len(), "computed monthly series");
        series
    }

    /// Sums expense amounts per raw category label.
    ///
    /// Slices come out in the order each label first appears. A label with no
    /// matching category gets [`FALLBACK_CATEGORY_COLOR`].
    pub fn category_breakdown(
        transactions: &[Transaction],
        categories: &[Category],
    ) -> Vec<CategorySlice> {
        let mut slices: Vec<CategorySlice> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for txn in transactions.iter().filter(|txn| !txn.is_income()) {
            match positions.get(txn.category.as_str()) {
                Some(&idx) => slices[idx].total += txn.amount,
                None => {
                    positions.insert(txn.category.as_str(), slices.len());
                    slices.push(CategorySlice {
                        category: txn.category.clone(),
                        total: txn.amount,
                        color: Self::color_for(&txn.category, categories),
                    });
                }
            }
        }
        slices
    }

    pub fn dashboard(transactions: &[Transaction], categories: &[Category]) -> Dashboard {
        Dashboard {
            totals: Self::totals(transactions),
            monthly: Self::monthly_series(transactions),
            breakdown: Self::category_breakdown(transactions, categories),
        }
    }

    fn color_for(label: &str, categories: &[Category]) -> String {
        match categories.iter().find(|category| category.name == label) {
            Some(category) => category.color.clone(),
            None => {
                warn!(label, "no category matches label, using fallback color");
                FALLBACK_CATEGORY_COLOR.to_string()
            }
        }
    }
}
