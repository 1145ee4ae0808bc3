//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use tabclean::{CleaningOptions, HeaderMode, LoaderConfig};

/// tabclean: clean tabular data files
#[derive(Parser)]
#[command(name = "tabclean")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a file, clean it and save or preview the result
    Clean {
        /// Path to the data file (CSV/XLSX)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path for the cleaned data (.csv or .xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print a preview of the cleaned data even when saving
        #[arg(long)]
        preview: bool,

        #[command(flatten)]
        load: LoadArgs,

        #[command(flatten)]
        steps: StepArgs,
    },

    /// Show the first rows of the cleaned data
    Preview {
        /// Path to the data file (CSV/XLSX)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Show the data as loaded, with every cleaning step disabled
        #[arg(long)]
        raw: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        load: LoadArgs,

        #[command(flatten)]
        steps: StepArgs,
    },

    /// Show source metadata and inferred column kinds
    Inspect {
        /// Path to the data file (CSV/XLSX)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        load: LoadArgs,
    },
}

/// Options controlling how the input file is read.
#[derive(Args, Clone, Debug)]
pub struct LoadArgs {
    /// Field delimiter for CSV input (e.g. ";", "tab")
    #[arg(long, default_value = ",")]
    pub delimiter: String,

    /// Whether the first row holds column names: detect, yes or no
    #[arg(long, default_value = "detect")]
    pub header: HeaderMode,
}

impl LoadArgs {
    pub fn to_config(&self) -> tabclean::Result<LoaderConfig> {
        Ok(LoaderConfig {
            delimiter: LoaderConfig::parse_delimiter(&self.delimiter)?,
            header: self.header,
            ..LoaderConfig::default()
        })
    }
}

/// Switches for individual cleaning steps. All steps run unless disabled.
#[derive(Args, Clone, Debug)]
pub struct StepArgs {
    /// JSON file with cleaning options (flags below override it)
    #[arg(long, value_name = "JSON")]
    pub options: Option<PathBuf>,

    /// Do not remove duplicate rows
    #[arg(long)]
    pub keep_duplicates: bool,

    /// Do not fill missing values
    #[arg(long)]
    pub keep_missing: bool,

    /// Do not trim whitespace in text columns
    #[arg(long)]
    pub no_trim: bool,

    /// Do not standardize column names
    #[arg(long)]
    pub keep_column_names: bool,
}

impl StepArgs {
    pub fn to_options(&self) -> tabclean::Result<CleaningOptions> {
        let mut options = match &self.options {
            Some(path) => CleaningOptions::from_json_file(path)?,
            None => CleaningOptions::default(),
        };

        if self.keep_duplicates {
            options.remove_duplicates = false;
        }
        if self.keep_missing {
            options.fill_missing = false;
        }
        if self.no_trim {
            options.trim_text = false;
        }
        if self.keep_column_names {
            options.standardize_columns = false;
        }
        Ok(options)
    }
}
