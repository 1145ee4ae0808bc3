//! User-selectable cleaning options.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TabcleanError};

use super::operations::CleanStep;

/// Which cleaning steps to run. Every step is enabled by default.
///
/// Fields missing from a JSON options file keep their default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleaningOptions {
    /// Drop rows that repeat an earlier row, ignoring case and surrounding
    /// whitespace in text columns.
    pub remove_duplicates: bool,
    /// Fill missing numeric cells with the column median and missing text
    /// cells with an empty string.
    pub fill_missing: bool,
    /// Strip leading/trailing whitespace in text columns.
    pub trim_text: bool,
    /// Lower-case column names and replace spaces with underscores.
    pub standardize_columns: bool,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self::all()
    }
}

impl CleaningOptions {
    /// Every step enabled.
    pub fn all() -> Self {
        Self {
            remove_duplicates: true,
            fill_missing: true,
            trim_text: true,
            standardize_columns: true,
        }
    }

    /// Every step disabled; cleaning becomes a copy.
    pub fn none() -> Self {
        Self {
            remove_duplicates: false,
            fill_missing: false,
            trim_text: false,
            standardize_columns: false,
        }
    }

    /// All 16 combinations of the four flags.
    pub fn all_combinations() -> impl Iterator<Item = Self> {
        (0u8..16).map(|bits| Self {
            remove_duplicates: bits & 0b0001 != 0,
            fill_missing: bits & 0b0010 != 0,
            trim_text: bits & 0b0100 != 0,
            standardize_columns: bits & 0b1000 != 0,
        })
    }

    /// Returns true if the given step is enabled.
    pub fn is_enabled(&self, step: CleanStep) -> bool {
        match step {
            CleanStep::TrimText => self.trim_text,
            CleanStep::StandardizeColumns => self.standardize_columns,
            CleanStep::FillMissing => self.fill_missing,
            CleanStep::RemoveDuplicates => self.remove_duplicates,
        }
    }

    /// Enabled steps in the order they run.
    pub fn enabled_steps(&self) -> Vec<CleanStep> {
        CleanStep::PIPELINE
            .into_iter()
            .filter(|step| self.is_enabled(*step))
            .collect()
    }

    /// Parse options from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| TabcleanError::io(path, e))?;
        Self::from_json_str(&contents)
    }
}

impl fmt::Display for CleaningOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let steps = self.enabled_steps();
        if steps.is_empty() {
            return write!(f, "none");
        }
        let names: Vec<&str> = steps.iter().map(|s| s.name()).collect();
        write!(f, "{}", names.join(", "))
    }
}
