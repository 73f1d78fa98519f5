use colored::Colorize;
use fintrack_domain::{Displayable, EntryKind, NewCategory, CATEGORY_PALETTE};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "categories",
            "List categories grouped by type",
            "categories",
            cmd_categories,
        ),
        CommandEntry::new(
            "category",
            "Add or delete a category",
            "category <add <name> <income|expense> [#rrggbb] | delete <category-id>>",
            cmd_category,
        ),
    ]
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    for kind in [EntryKind::Income, EntryKind::Expense] {
        output::section(format!("{} categories", kind));
        let categories = context.tracker.book().categories_of_kind(kind);
        if categories.is_empty() {
            output::info("  (none)");
        }
        for category in categories {
            output::info(format!(
                "  {} {:<16} {}  [{}]",
                "■".color(swatch(&category.color)),
                category.name,
                category.color,
                category.id
            ));
        }
    }
    Ok(())
}

fn cmd_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: category <add|delete> ...".into(),
        ));
    };

    match action.to_lowercase().as_str() {
        "add" => handle_add(context, rest),
        "delete" | "remove" => handle_delete(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown category subcommand `{}`",
            other
        ))),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (name, kind, color) = match args {
        [name, kind] => (*name, *kind, None),
        [name, kind, color] => (*name, *kind, Some(*color)),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: category add <name> <income|expense> [#rrggbb]".into(),
            ))
        }
    };
    let kind: EntryKind = kind
        .parse()
        .map_err(|_| CommandError::InvalidArguments("type must be `income` or `expense`".into()))?;

    let mut draft = NewCategory::new(name, kind);
    if let Some(color) = color {
        if !is_hex_color(color) {
            return Err(CommandError::InvalidArguments(format!(
                "color must look like #rrggbb (palette: {})",
                CATEGORY_PALETTE.join(" ")
            )));
        }
        draft = draft.with_color(color.to_lowercase());
    }

    let category = context.tracker.add_category(draft)?;
    output::success(format!(
        "Category `{}` added ({}, {})",
        category.name, category.kind, category.color
    ));
    output::info(format!("  id: {}", category.id));
    Ok(())
}

fn handle_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: category delete <category-id>".into(),
        ));
    };
    let removed = context.tracker.delete_category(id)?;
    output::success(format!("Deleted category {}", removed.display_label()));

    let still_used = context
        .tracker
        .transactions()
        .iter()
        .filter(|txn| txn.category == removed.name)
        .count();
    if still_used > 0 {
        output::hint(format!(
            "{} transaction(s) keep the label `{}`.",
            still_used, removed.name
        ));
    }
    Ok(())
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

fn swatch(color: &str) -> colored::Color {
    let channel = |range: std::ops::Range<usize>| {
        color
            .get(range)
            .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            .unwrap_or(0)
    };
    if is_hex_color(color) {
        colored::Color::TrueColor {
            r: channel(1..3),
            g: channel(3..5),
            b: channel(5..7),
        }
    } else {
        colored::Color::White
    }
}
