//! In-memory table representation.

mod cell;
mod column;

pub use cell::{Cell, is_na_token};
pub use column::{Column, ColumnKind};

use serde::{Deserialize, Serialize};

static MISSING: Cell = Cell::Missing;

/// Rectangular dataset with named, typed columns aligned by row index.
///
/// Rows are positional: removing a row renumbers every later row, so
/// row indices are always contiguous from zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "TableColumns")]
pub struct Table {
    columns: Vec<Column>,
}

/// Deserialized form of a [`Table`], padded through [`Table::new`].
#[derive(Deserialize)]
struct TableColumns {
    columns: Vec<Column>,
}

impl From<TableColumns> for Table {
    fn from(raw: TableColumns) -> Self {
        Table::new(raw.columns)
    }
}

impl Table {
    /// Create a table from columns.
    ///
    /// Columns shorter than the longest one are padded with missing cells.
    pub fn new(mut columns: Vec<Column>) -> Self {
        let height = columns.iter().map(Column::len).max().unwrap_or(0);
        for column in &mut columns {
            column.cells.resize(height, Cell::Missing);
        }
        Self { columns }
    }

    /// Build a table from column names and row-major cells, classifying
    /// each column's kind from its values.
    pub fn from_rows(names: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let mut columns: Vec<Vec<Cell>> = vec![Vec::with_capacity(rows.len()); names.len()];
        for row in rows {
            let mut cells = row.into_iter();
            for column in &mut columns {
                column.push(cells.next().unwrap_or(Cell::Missing));
            }
        }

        let columns = names
            .into_iter()
            .zip(columns)
            .map(|(name, cells)| Column::classified(name, cells))
            .collect();
        Self { columns }
    }

    /// All columns in positional order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Mutable access to the columns, used by the cleaning steps.
    pub(crate) fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Get all column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get a specific cell.
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.columns.get(col).and_then(|c| c.cells.get(row))
    }

    /// Iterate over the cells of one row, in column order.
    pub fn row(&self, index: usize) -> impl Iterator<Item = &Cell> {
        self.columns
            .iter()
            .map(move |c| c.cells.get(index).unwrap_or(&MISSING))
    }

    /// Keep only the rows whose flag is set, preserving their order.
    pub(crate) fn retain_rows(&mut self, keep: &[bool]) {
        for column in &mut self.columns {
            let mut flags = keep.iter();
            column
                .cells
                .retain(|_| flags.next().copied().unwrap_or(true));
        }
    }
}
