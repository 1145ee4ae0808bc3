//! CLI command implementations.

pub mod clean;
pub mod inspect;
pub mod preview;

use colored::Colorize;
use tabclean::{Notice, NoticeLevel, Preview};

/// Print a session notice, coloured by level.
pub(crate) fn print_notice(notice: &Notice) {
    let title = match notice.level {
        NoticeLevel::Info => notice.title.green().bold(),
        NoticeLevel::Warning => notice.title.yellow().bold(),
        NoticeLevel::Error => notice.title.red().bold(),
    };
    println!("{} {}", title, notice.message);
}

/// Print a preview as an aligned text grid.
pub(crate) fn print_grid(preview: &Preview) {
    let widths = preview.column_widths();

    let header: Vec<String> = preview
        .columns
        .iter()
        .zip(&widths)
        .map(|(name, w)| format!("{:<w$}", name, w = *w))
        .collect();
    println!("{}", header.join("  ").cyan().bold());

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    println!("{}", rule.join("  ").dimmed());

    for row in &preview.rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(value, w)| format!("{:<w$}", value, w = *w))
            .collect();
        println!("{}", cells.join("  ").trim_end());
    }

    if preview.is_truncated() {
        println!(
            "{}",
            format!(
                "... showing {} of {} rows",
                preview.rows.len(),
                preview.total_rows
            )
            .dimmed()
        );
    }
}
