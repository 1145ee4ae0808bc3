//! Cleaning pipeline applied to loaded tables.

mod engine;
mod operations;
mod options;

pub use engine::{Cleaner, clean, median, standardize_name};
pub use operations::{CleanReport, CleanStep, ColumnRename};
pub use options::CleaningOptions;
