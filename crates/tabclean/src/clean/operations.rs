//! Cleaning steps and the report of what they changed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One transform of the cleaning pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanStep {
    /// Strip surrounding whitespace in text columns.
    TrimText,
    /// Normalize column names.
    StandardizeColumns,
    /// Impute missing cells.
    FillMissing,
    /// Drop repeated rows.
    RemoveDuplicates,
}

impl CleanStep {
    /// Steps in the order the pipeline runs them. Later steps see the
    /// output of earlier ones.
    pub const PIPELINE: [CleanStep; 4] = [
        CleanStep::TrimText,
        CleanStep::StandardizeColumns,
        CleanStep::FillMissing,
        CleanStep::RemoveDuplicates,
    ];

    /// Short human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            CleanStep::TrimText => "trim text",
            CleanStep::StandardizeColumns => "standardize columns",
            CleanStep::FillMissing => "fill missing",
            CleanStep::RemoveDuplicates => "remove duplicates",
        }
    }
}

impl fmt::Display for CleanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A column name changed by standardization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRename {
    /// Name before standardization.
    pub from: String,
    /// Name after standardization.
    pub to: String,
}

/// What a cleaning run changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanReport {
    /// Steps that ran, in order.
    pub steps_applied: Vec<CleanStep>,

    /// Text cells whose value changed when trimmed.
    pub cells_trimmed: usize,

    /// Columns whose name changed.
    pub columns_renamed: Vec<ColumnRename>,

    /// Missing cells that were filled.
    pub cells_filled: usize,

    /// Rows dropped as duplicates.
    pub duplicates_removed: usize,

    /// Row count of the input table.
    pub rows_before: usize,

    /// Row count of the cleaned table.
    pub rows_after: usize,
}

impl CleanReport {
    /// Create an empty report for an input of the given height.
    pub fn new(rows_before: usize) -> Self {
        Self {
            rows_before,
            rows_after: rows_before,
            ..Self::default()
        }
    }

    /// Returns true if no step changed anything.
    pub fn is_unchanged(&self) -> bool {
        self.cells_trimmed == 0
            && self.columns_renamed.is_empty()
            && self.cells_filled == 0
            && self.duplicates_removed == 0
    }

    /// One-line summary for notifications.
    pub fn summary(&self) -> String {
        if self.steps_applied.is_empty() {
            return "no cleaning steps selected".to_string();
        }
        format!(
            "{} cells trimmed, {} columns renamed, {} cells filled, {} duplicate rows removed ({} → {} rows)",
            self.cells_trimmed,
            self.columns_renamed.len(),
            self.cells_filled,
            self.duplicates_removed,
            self.rows_before,
            self.rows_after
        )
    }
}
