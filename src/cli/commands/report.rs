use std::{
    fs,
    path::{Path, PathBuf},
};

use fintrack_core::{format::format_currency, ExportFile, ExportService};
use tracing::info;

use crate::cli::commands::transaction::apply_query_args;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Show totals, the monthly series, and expenses by category",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "export",
            "Write a CSV export of transactions or the summary report",
            "export <transactions [dir=<path>] [type=..] [category=..] [sort=..] | report [dir=<path>]>",
            cmd_export,
        ),
    ]
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let dashboard = context.tracker.dashboard();
    let totals = dashboard.totals;

    output::section("Summary");
    output::info(format!("  Total Income   : {}", format_currency(totals.total_income)));
    output::info(format!("  Total Expenses : {}", format_currency(totals.total_expense)));
    output::info(format!("  Balance        : {}", output::balance(&totals)));

    output::section("Monthly");
    if dashboard.monthly.is_empty() {
        output::info("  No data available");
    }
    for entry in &dashboard.monthly {
        output::info(format!(
            "  {:<9} income {:>12}  expense {:>12}",
            entry.month.label(),
            format_currency(entry.income),
            format_currency(entry.expense)
        ));
    }

    output::section("Expenses by category");
    if dashboard.breakdown.is_empty() {
        output::info("  No expenses yet");
    }
    for slice in &dashboard.breakdown {
        let share = if totals.total_expense > 0.0 {
            slice.total / totals.total_expense * 100.0
        } else {
            0.0
        };
        output::info(format!(
            "  {:<16} {:>12}  {:>5.1}%  {}",
            slice.category,
            format_currency(slice.total),
            share,
            slice.color
        ));
    }

    let dangling = context.tracker.dangling_labels();
    if !dangling.is_empty() {
        output::hint(format!(
            "Labels without a category: {}",
            dangling.join(", ")
        ));
    }
    Ok(())
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((target, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: export <transactions|report> [dir=<path>]".into(),
        ));
    };

    let (dir, rest) = split_export_dir(rest)?;
    let dir = dir.unwrap_or_else(|| context.config.resolve_export_dir());
    let rest = rest.as_slice();

    let (file, rows) = match target.to_lowercase().as_str() {
        "transactions" => {
            let query = apply_query_args(&context.query, rest)?;
            let view = context.tracker.view(&query);
            let rows = view.len();
            (
                ExportService::transactions_file(view, context.clock.as_ref()),
                rows,
            )
        }
        "report" => {
            if !rest.is_empty() {
                return Err(CommandError::InvalidArguments(
                    "usage: export report [dir=<path>]".into(),
                ));
            }
            (
                ExportService::report_file(context.tracker.transactions(), context.clock.as_ref()),
                context.tracker.transactions().len(),
            )
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown export `{}` (use transactions or report)",
                other
            )))
        }
    };

    let path = write_export(&dir, &file)?;
    info!(path = %path.display(), rows, "export written");
    output::success(format!("Exported {} to {}", file.file_name, path.display()));
    Ok(())
}

/// Pulls the `dir=<path>` argument out; everything after the first `=` is
/// the path, so directory names may contain `=` themselves.
fn split_export_dir<'a>(
    args: &[&'a str],
) -> Result<(Option<PathBuf>, Vec<&'a str>), CommandError> {
    let mut dir = None;
    let mut rest = Vec::with_capacity(args.len());
    for &arg in args {
        match arg.split_once('=') {
            Some((key, path)) if key.eq_ignore_ascii_case("dir") => {
                if path.is_empty() || dir.is_some() {
                    return Err(CommandError::InvalidArguments(
                        "expected a single non-empty dir=<path>".into(),
                    ));
                }
                dir = Some(PathBuf::from(path));
            }
            _ => rest.push(arg),
        }
    }
    Ok((dir, rest))
}

fn write_export(dir: &Path, file: &ExportFile) -> Result<PathBuf, CommandError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(&file.file_name);
    fs::write(&path, &file.contents)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_argument_is_split_from_filters() {
        let (dir, rest) =
            split_export_dir(&["category=Rent", "dir=out/a=b", "sort=date-asc"]).expect("split");

        assert_eq!(dir, Some(PathBuf::from("out/a=b")));
        assert_eq!(rest, vec!["category=Rent", "sort=date-asc"]);
    }

    #[test]
    fn dir_argument_is_optional_but_not_repeatable() {
        let (dir, rest) = split_export_dir(&["type=income"]).expect("split");
        assert_eq!(dir, None);
        assert_eq!(rest, vec!["type=income"]);

        assert!(split_export_dir(&["dir=a", "DIR=b"]).is_err());
        assert!(split_export_dir(&["dir="]).is_err());
    }

    #[test]
    fn bare_path_is_no_longer_taken_as_directory() {
        let (dir, rest) = split_export_dir(&["exports"]).expect("split");
        assert_eq!(dir, None);
        assert_eq!(rest, vec!["exports"]);
    }
}
