use chrono::NaiveDate;
use fintrack_domain::{Category, EntryKind, NewCategory, NewTransaction, Transaction};

#[test]
fn transaction_reads_browser_storage_shape() {
    let json = r##"[
        {"id":"1","type":"income","amount":5000,"category":"Salary","date":"2025-11-01","notes":"Monthly salary"},
        {"id":"1731000000000","type":"expense","amount":12.5,"category":"Coffee","date":"2025-11-09"}
    ]"##;

    let transactions: Vec<Transaction> = serde_json::from_str(json).expect("deserialize");

    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0].kind, EntryKind::Income);
    assert_eq!(transactions[0].date, NaiveDate::from_ymd_opt(2025, 11, 1).unwrap());
    assert_eq!(transactions[1].id, "1731000000000");
    assert!(transactions[1].notes.is_empty(), "missing notes default to empty");
}

#[test]
fn transaction_writes_type_field_in_lowercase() {
    let draft = NewTransaction::new(
        EntryKind::Expense,
        250.0,
        "Groceries",
        NaiveDate::from_ymd_opt(2025, 11, 5).unwrap(),
    )
    .with_notes("Weekly shopping");
    let txn = Transaction::from_draft("3", draft);

    let value = serde_json::to_value(&txn).expect("serialize");
    assert_eq!(value["type"], "expense");
    assert_eq!(value["date"], "2025-11-05");
    assert_eq!(value["category"], "Groceries");
    assert!(value.get("kind").is_none());
}

#[test]
fn category_survives_serialization_roundtrip() {
    let category = Category::from_draft(
        "7",
        NewCategory::new("Travel", EntryKind::Expense).with_color("#06b6d4"),
    );

    let json = serde_json::to_string(&category).expect("serialize");
    assert!(json.contains("\"type\":\"expense\""));

    let restored: Category = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, category);
}

#[test]
fn category_name_matching_ignores_case() {
    let category = Category::from_draft("1", NewCategory::new("Groceries", EntryKind::Expense));
    assert!(category.matches_name("groceries"));
    assert!(category.matches_name("GROCERIES"));
    assert!(!category.matches_name("Grocery"));
}
