//! Inspect command - show source metadata and column kinds.

use std::path::PathBuf;

use colored::Colorize;
use tabclean::Session;

use crate::cli::LoadArgs;

pub fn run(
    file: PathBuf,
    json_output: bool,
    load: LoadArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::with_loader(load.to_config()?);
    session.load(&file)?;

    let Some(loaded) = session.loaded() else {
        return Err("no table loaded".into());
    };
    let source = &loaded.source;

    if json_output {
        let columns: Vec<_> = loaded
            .table
            .columns()
            .iter()
            .map(|c| {
                serde_json::json!({
                    "name": c.name,
                    "kind": c.kind,
                    "missing": c.missing_count(),
                })
            })
            .collect();
        let report = serde_json::json!({
            "source": source,
            "columns": columns,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} {}", "Inspecting".cyan().bold(), source.file.white());
    println!();
    println!("Format:  {}", source.format);
    println!("Size:    {} bytes", source.size_bytes);
    println!("SHA-256: {}", source.hash.dimmed());
    println!(
        "Header:  {}",
        if source.header_detected {
            "first row"
        } else {
            "synthesized"
        }
    );
    println!(
        "Shape:   {} rows x {} columns",
        source.row_count.to_string().white().bold(),
        source.column_count.to_string().white().bold()
    );
    println!();
    println!("{}", "Columns:".yellow().bold());
    for column in loaded.table.columns() {
        let missing = column.missing_count();
        let missing = if missing > 0 {
            format!("{} missing", missing).as_str().yellow()
        } else {
            "complete".green()
        };
        println!("  {:24} {:8} {}", column.name, column.kind.to_string(), missing);
    }

    Ok(())
}
