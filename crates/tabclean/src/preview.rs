//! Read-only preview of a table for display.

use serde::{Deserialize, Serialize};

use crate::table::Table;

/// Maximum number of rows shown in a preview.
pub const PREVIEW_ROW_LIMIT: usize = 50;

/// Column names plus the first rows of a table, rendered as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    /// Column names in order.
    pub columns: Vec<String>,
    /// Up to [`PREVIEW_ROW_LIMIT`] rows; missing cells are empty strings.
    pub rows: Vec<Vec<String>>,
    /// Row count of the full table.
    pub total_rows: usize,
}

impl Preview {
    /// Preview the first [`PREVIEW_ROW_LIMIT`] rows of a table.
    pub fn of(table: &Table) -> Self {
        Self::with_limit(table, PREVIEW_ROW_LIMIT)
    }

    /// Preview at most `limit` rows.
    pub fn with_limit(table: &Table, limit: usize) -> Self {
        let shown = table.row_count().min(limit);
        let rows = (0..shown)
            .map(|row| table.row(row).map(|c| c.to_display_string()).collect())
            .collect();

        Self {
            columns: table.column_names().into_iter().map(str::to_string).collect(),
            rows,
            total_rows: table.row_count(),
        }
    }

    /// Returns true if the preview shows fewer rows than the table has.
    pub fn is_truncated(&self) -> bool {
        self.rows.len() < self.total_rows
    }

    /// Display width of each column: the widest of its name and shown values.
    pub fn column_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|v| v.chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}
