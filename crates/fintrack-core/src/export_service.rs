//! Comma-delimited exports of transaction views and summary reports.
//!
//! Every field is wrapped in double quotes. Embedded quotes are doubled so
//! the output stays readable by RFC 4180 parsers. Rows are separated by `\n`
//! with no trailing terminator; a blank row is an empty line.

use chrono::NaiveDate;
use tracing::debug;

use fintrack_domain::Transaction;

use crate::{
    format::{format_amount, format_currency, format_iso_date, format_report_date},
    summary_service::{MonthlyEntry, SummaryService, Totals},
    time::Clock,
};

pub const TRANSACTION_HEADERS: [&str; 5] = ["Date", "Type", "Category", "Amount", "Notes"];
pub const REPORT_TITLE: &str = "Finance Tracker Report";

/// A rendered export plus the file name it should be saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub contents: String,
}

pub struct ExportService;

impl ExportService {
    /// Renders the view in its current order under the standard header row.
    pub fn transactions_csv<'a, I>(view: I) -> String
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut rows: Vec<Vec<String>> = vec![TRANSACTION_HEADERS.iter().map(|h| h.to_string()).collect()];
        rows.extend(view.into_iter().map(|txn| {
            vec![
                format_iso_date(txn.date),
                txn.kind.to_string(),
                txn.category.clone(),
                format_amount(txn.amount),
                txn.notes.clone(),
            ]
        }));
        render_rows(&rows)
    }

    /// Renders totals and the monthly series as a report dated `report_date`.
    pub fn summary_csv(totals: &Totals, monthly: &[MonthlyEntry], report_date: NaiveDate) -> String {
        let mut rows: Vec<Vec<String>> = vec![
            vec![REPORT_TITLE.into(), format_report_date(report_date)],
            vec![],
            vec!["Summary Statistics".into()],
            vec!["Total Income".into(), format_currency(totals.total_income)],
            vec!["Total Expenses".into(), format_currency(totals.total_expense)],
            vec!["Balance".into(), format_currency(totals.balance)],
            vec![],
            vec!["Monthly Data".into()],
            vec!["Month".into(), "Income".into(), "Expense".into()],
        ];
        rows.extend(monthly.iter().map(|entry| {
            vec![
                entry.month.label(),
                format_currency(entry.income),
                format_currency(entry.expense),
            ]
        }));
        render_rows(&rows)
    }

    pub fn transactions_file<'a, I>(view: I, clock: &dyn Clock) -> ExportFile
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let contents = Self::transactions_csv(view);
        let file_name = format!("transactions_{}.csv", format_iso_date(clock.today()));
        debug!(%file_name, bytes = contents.len(), "rendered transaction export");
        ExportFile {
            file_name,
            contents,
        }
    }

    /// Computes totals and the monthly series from `transactions` and renders
    /// them as a report file.
    pub fn report_file(transactions: &[Transaction], clock: &dyn Clock) -> ExportFile {
        let today = clock.today();
        let totals = SummaryService::totals(transactions);
        let monthly = SummaryService::monthly_series(transactions);
        let contents = Self::summary_csv(&totals, &monthly, today);
        let file_name = format!("finance-report_{}.csv", format_iso_date(today));
        debug!(%file_name, bytes = contents.len(), "rendered summary report");
        ExportFile {
            file_name,
            contents,
        }
    }
}

fn quote_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn render_rows(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|field| quote_field(field))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::FixedClock;
    use fintrack_domain::{EntryKind, NewTransaction};

    fn txn(id: &str, kind: EntryKind, amount: f64, category: &str, day: u32, notes: &str) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2025, 11, day).unwrap();
        Transaction::from_draft(
            id,
            NewTransaction::new(kind, amount, category, date).with_notes(notes),
        )
    }

    #[test]
    fn transaction_export_quotes_every_field() {
        let rows = vec![
            txn("1", EntryKind::Income, 5000.0, "Salary", 1, "Monthly salary"),
            txn("2", EntryKind::Expense, 1200.0, "Rent", 1, ""),
        ];

        let csv = ExportService::transactions_csv(&rows);

        insta::assert_snapshot!(csv, @r###"
        "Date","Type","Category","Amount","Notes"
        "2025-11-01","Income","Salary","5000.00","Monthly salary"
        "2025-11-01","Expense","Rent","1200.00",""
        "###);
    }

    #[test]
    fn summary_export_lays_out_sections() {
        let rows = vec![
            txn("1", EntryKind::Income, 5000.0, "Salary", 1, ""),
            txn("2", EntryKind::Expense, 1200.0, "Rent", 1, ""),
            txn("3", EntryKind::Expense, 250.0, "Groceries", 5, ""),
        ];
        let totals = SummaryService::totals(&rows);
        let monthly = SummaryService::monthly_series(&rows);
        let report_date = NaiveDate::from_ymd_opt(2025, 11, 18).unwrap();

        let csv = ExportService::summary_csv(&totals, &monthly, report_date);

        let expected = [
            "\"Finance Tracker Report\",\"11/18/2025\"",
            "",
            "\"Summary Statistics\"",
            "\"Total Income\",\"$5000.00\"",
            "\"Total Expenses\",\"$1450.00\"",
            "\"Balance\",\"$3550.00\"",
            "",
            "\"Monthly Data\"",
            "\"Month\",\"Income\",\"Expense\"",
            "\"Nov 2025\",\"$5000.00\",\"$1450.00\"",
        ]
        .join("\n");
        assert_eq!(csv, expected);
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let rows = vec![txn("1", EntryKind::Expense, 3.0, "Snacks", 2, "the \"good\" chips")];

        let csv = ExportService::transactions_csv(&rows);

        let last = csv.lines().last().unwrap();
        assert_eq!(
            last,
            "\"2025-11-02\",\"Expense\",\"Snacks\",\"3.00\",\"the \"\"good\"\" chips\""
        );
    }

    #[test]
    fn file_names_carry_clock_date() {
        let clock = FixedClock::on(NaiveDate::from_ymd_opt(2025, 11, 8).unwrap());

        let transactions = ExportService::transactions_file(std::iter::empty::<&Transaction>(), &clock);
        let report = ExportService::report_file(&[], &clock);

        assert_eq!(transactions.file_name, "transactions_2025-11-08.csv");
        assert_eq!(transactions.contents, "\"Date\",\"Type\",\"Category\",\"Amount\",\"Notes\"");
        assert_eq!(report.file_name, "finance-report_2025-11-08.csv");
        assert!(report.contents.ends_with("\"Month\",\"Income\",\"Expense\""));
    }
}
