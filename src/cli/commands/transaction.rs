use chrono::NaiveDate;
use fintrack_core::{CategoryFilter, QueryService, TransactionQuery};
use fintrack_domain::{Displayable, EntryKind, NewTransaction};
use regex::Regex;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::notice;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_SHAPE: &str = r"^\d{4}-\d{2}-\d{2}$";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Record an income or expense",
            "add <income|expense> <amount> <category> [YYYY-MM-DD] [notes...]",
            cmd_add,
        ),
        CommandEntry::new(
            "delete",
            "Delete a transaction by id",
            "delete <transaction-id>",
            cmd_delete,
        ),
        CommandEntry::new(
            "list",
            "List transactions with optional filters",
            "list [type=<all|income|expense>] [category=<label|all>] [sort=<date-desc|date-asc|amount-desc|amount-asc>]",
            cmd_list,
        ),
        CommandEntry::new(
            "labels",
            "Show the category labels used by transactions",
            "labels",
            cmd_labels,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [kind, amount, category, rest @ ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: add <income|expense> <amount> <category> [YYYY-MM-DD] [notes...]".into(),
        ));
    };

    let kind: EntryKind = kind
        .parse()
        .map_err(|_| CommandError::InvalidArguments("type must be `income` or `expense`".into()))?;
    // Unparseable input becomes NaN so it fails the same amount check as zero.
    let amount = amount
        .trim_start_matches('$')
        .parse::<f64>()
        .unwrap_or(f64::NAN);

    let (date, notes) = match rest.split_first() {
        Some((first, tail)) => match parse_date_arg(first)? {
            Some(date) => (date, tail),
            None => (context.clock.today(), rest),
        },
        None => (context.clock.today(), rest),
    };

    let draft = NewTransaction::new(kind, amount, *category, date).with_notes(notes.join(" "));
    let txn = context.tracker.add_transaction(draft)?;

    let message = notice::transaction_added(&txn);
    output::success(&context.notices.post(message, context.clock.as_ref()).message);
    output::info(format!("  id: {}", txn.id));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: delete <transaction-id>".into(),
        ));
    };
    let removed = context.tracker.delete_transaction(id)?;
    output::success(format!("Deleted {}", removed.display_label()));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let query = apply_query_args(&context.query, args)?;
    context.query = query;

    let view = context.tracker.view(&context.query);
    output::section(format!(
        "Transactions ({} of {})",
        view.len(),
        context.tracker.transactions().len()
    ));
    output::info(format!(
        "  type={} category={} sort={} ({})",
        context.query.kind,
        context.query.category,
        context.query.sort,
        context.query.sort.label()
    ));

    if view.is_empty() {
        output::info("  No transactions found");
        return Ok(());
    }
    for txn in view {
        let notes = if txn.notes.is_empty() {
            String::new()
        } else {
            format!("  {}", txn.notes)
        };
        output::info(format!(
            "  {}  {:<7}  {:<14} {:>12}  [{}]{}",
            txn.date,
            txn.kind,
            txn.category,
            output::signed_amount(txn),
            txn.id,
            notes
        ));
    }
    Ok(())
}

fn cmd_labels(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let labels = QueryService::category_labels(context.tracker.transactions());
    output::section("Category labels");
    if labels.is_empty() {
        output::info("  No transactions found");
    }
    for label in labels {
        output::info(format!("  {}", label));
    }
    Ok(())
}

/// Reads an optional date argument. Tokens shaped like `YYYY-MM-DD` must be
/// real calendar dates; anything else is not a date and yields `None`.
fn parse_date_arg(token: &str) -> Result<Option<NaiveDate>, CommandError> {
    let shaped = Regex::new(DATE_SHAPE)
        .map(|re| re.is_match(token))
        .unwrap_or(false);
    if !shaped {
        return Ok(None);
    }
    NaiveDate::parse_from_str(token, DATE_FORMAT)
        .map(Some)
        .map_err(|_| CommandError::InvalidArguments(format!("`{}` is not a valid date", token)))
}

/// Overrides fields of `base` from `key=value` arguments.
pub(crate) fn apply_query_args(
    base: &TransactionQuery,
    args: &[&str],
) -> Result<TransactionQuery, CommandError> {
    let mut query = base.clone();
    for arg in args {
        let Some((key, value)) = arg.split_once('=') else {
            return Err(CommandError::InvalidArguments(format!(
                "expected key=value, got `{}`",
                arg
            )));
        };
        match key.to_lowercase().as_str() {
            "type" => query.kind = value.parse()?,
            "category" => query.category = CategoryFilter::from(value),
            "sort" => query.sort = value.parse()?,
            other => {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown filter `{}` (use type, category, or sort)",
                    other
                )))
            }
        }
    }
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fintrack_core::{KindFilter, SortOrder};

    #[test]
    fn query_args_override_only_named_fields() {
        let base = TransactionQuery {
            sort: SortOrder::AmountAsc,
            ..TransactionQuery::default()
        };
        let query = apply_query_args(&base, &["type=income", "category=Salary"]).expect("parse");

        assert_eq!(query.kind, KindFilter::Only(EntryKind::Income));
        assert_eq!(query.category, CategoryFilter::Label("Salary".into()));
        assert_eq!(query.sort, SortOrder::AmountAsc);
    }

    #[test]
    fn date_arguments_must_be_real_dates() {
        assert_eq!(
            parse_date_arg("2025-11-30").expect("valid"),
            NaiveDate::from_ymd_opt(2025, 11, 30)
        );
        assert!(parse_date_arg("2025-02-30").is_err());
        assert_eq!(parse_date_arg("groceries").expect("not a date"), None);
        assert_eq!(parse_date_arg("2025-2-3").expect("not date-shaped"), None);
    }

    #[test]
    fn malformed_query_args_are_rejected() {
        let base = TransactionQuery::default();
        assert!(apply_query_args(&base, &["income"]).is_err());
        assert!(apply_query_args(&base, &["color=red"]).is_err());
        assert!(apply_query_args(&base, &["type=transfer"]).is_err());
    }
}
