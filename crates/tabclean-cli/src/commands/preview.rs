//! Preview command - print the first rows of the cleaned data.

use std::path::PathBuf;

use tabclean::{CleaningOptions, Session};

use super::print_grid;
use crate::cli::{LoadArgs, StepArgs};

pub fn run(
    file: PathBuf,
    raw: bool,
    json_output: bool,
    load: LoadArgs,
    steps: StepArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = if raw {
        CleaningOptions::none()
    } else {
        steps.to_options()?
    };

    let mut session = Session::with_loader(load.to_config()?);
    session.set_options(options);
    session.load(&file)?;
    session.clean()?;

    let preview = session.preview()?;
    if json_output {
        println!("{}", serde_json::to_string_pretty(&preview)?);
    } else {
        print_grid(&preview);
    }

    Ok(())
}
