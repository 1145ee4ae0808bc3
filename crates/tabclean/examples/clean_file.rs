//! Example: Clean a tabular data file with every step enabled.
//!
//! Usage:
//!   cargo run --example clean_file -- <input> [output]
//!
//! Example:
//!   cargo run --example clean_file -- survey.csv survey_clean.xlsx

use std::env;

use tabclean::{CleanStep, Notice, Session, SessionError};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example clean_file -- <input> [output]");
        std::process::exit(1);
    }

    let mut session = Session::new();

    report(session.load(&args[1]));
    report(session.clean());

    if let Some(cleaned) = session.cleaned() {
        for step in CleanStep::PIPELINE {
            let ran = cleaned.report.steps_applied.contains(&step);
            println!("  [{}] {}", if ran { "x" } else { " " }, step);
        }
        for rename in &cleaned.report.columns_renamed {
            println!("  renamed '{}' -> '{}'", rename.from, rename.to);
        }
    }

    match session.preview() {
        Ok(preview) => {
            println!();
            println!("{}", preview.columns.join(" | "));
            for row in preview.rows.iter().take(10) {
                println!("{}", row.join(" | "));
            }
        }
        Err(e) => eprintln!("{}", e.notice()),
    }

    if let Some(output) = args.get(2) {
        println!();
        report(session.save(output));
    }
}

fn report(result: Result<Notice, SessionError>) {
    match result {
        Ok(notice) => println!("{}", notice),
        Err(e) => {
            eprintln!("{}", e.notice());
            std::process::exit(1);
        }
    }
}
