//! Clean command - load, clean, then save and/or preview.

use std::path::PathBuf;

use colored::Colorize;
use tabclean::{CleanStep, Session};
use tracing::debug;

use super::{print_grid, print_notice};
use crate::cli::{LoadArgs, StepArgs};

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    preview: bool,
    load: LoadArgs,
    steps: StepArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::with_loader(load.to_config()?);
    let options = steps.to_options()?;
    debug!(%options, "cleaning options resolved");
    session.set_options(options);

    print_notice(&session.load(&file)?);
    print_notice(&session.clean()?);

    if let Some(cleaned) = session.cleaned() {
        for step in CleanStep::PIPELINE {
            let mark = if cleaned.report.steps_applied.contains(&step) {
                "x".green()
            } else {
                " ".normal()
            };
            println!("  [{}] {}", mark, step);
        }
        for rename in &cleaned.report.columns_renamed {
            println!("      {} -> {}", rename.from.dimmed(), rename.to.white());
        }
    }

    if preview || output.is_none() {
        println!();
        print_grid(&session.preview()?);
    }

    if let Some(path) = output {
        println!();
        print_notice(&session.save(&path)?);
    }

    Ok(())
}
