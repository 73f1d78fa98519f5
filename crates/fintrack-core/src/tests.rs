use chrono::NaiveDate;

use crate::{
    book::{FinanceBook, SequentialIds},
    category_service::CategoryService,
    query_service::{CategoryFilter, KindFilter, SortOrder, TransactionQuery},
    summary_service::SummaryService,
    transaction_service::TransactionService,
};
use fintrack_domain::{
    default_categories, demo_transactions, EntryKind, NewCategory, NewTransaction,
    FALLBACK_CATEGORY_COLOR,
};

fn seeded_book() -> FinanceBook {
    FinanceBook::with_id_generator(
        demo_transactions(),
        default_categories(),
        Box::new(SequentialIds::starting_at(10)),
    )
}

#[test]
fn dashboard_reflects_demo_data() {
    let book = seeded_book();
    let dashboard = SummaryService::dashboard(book.transactions(), book.categories());

    assert_eq!(dashboard.totals.total_income, 5500.0);
    assert_eq!(dashboard.totals.total_expense, 1530.0);
    assert_eq!(dashboard.totals.balance, 3970.0);
    assert_eq!(dashboard.monthly.len(), 1);
    assert_eq!(dashboard.breakdown.len(), 3);
}

#[test]
fn deleting_category_keeps_transaction_and_falls_back_to_default_color() {
    let mut book = seeded_book();
    let groceries = book.category_named("Groceries").unwrap().id.clone();

    CategoryService::remove(&mut book, &groceries).expect("remove category");

    assert!(book.transaction("3").is_some());
    assert_eq!(book.transaction("3").unwrap().category, "Groceries");
    let slices = SummaryService::category_breakdown(book.transactions(), book.categories());
    let slice = slices
        .iter()
        .find(|slice| slice.category == "Groceries")
        .expect("dangling label still aggregated");
    assert_eq!(slice.total, 250.0);
    assert_eq!(slice.color, FALLBACK_CATEGORY_COLOR);
}

#[test]
fn views_see_the_latest_mutation() {
    let mut book = seeded_book();
    CategoryService::add(
        &mut book,
        NewCategory::new("Travel", EntryKind::Expense).with_color("#06b6d4"),
    )
    .expect("add category");
    let date = NaiveDate::from_ymd_opt(2025, 12, 24).unwrap();
    let (txn, snapshot) = TransactionService::add(
        &mut book,
        NewTransaction::new(EntryKind::Expense, 640.0, "Travel", date),
    )
    .expect("add transaction");

    let query = TransactionQuery::new(
        KindFilter::Only(EntryKind::Expense),
        CategoryFilter::from("Travel"),
        SortOrder::DateDesc,
    );
    let view = query.apply(&snapshot.transactions);
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].id, txn.id);

    let monthly = SummaryService::monthly_series(book.transactions());
    assert_eq!(monthly.last().unwrap().month.label(), "Dec 2025");
    assert_eq!(monthly.last().unwrap().expense, 640.0);
}
