//! Columns and their inferred kind.

use serde::{Deserialize, Serialize};

use super::cell::Cell;

/// Inferred type of a column, fixed once the table is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Every non-missing value is a number.
    Numeric,
    /// Text, or a mix of text and numbers.
    Text,
}

impl ColumnKind {
    /// Classify a column from its cells.
    ///
    /// A column with no values at all counts as numeric.
    pub fn infer<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> Self {
        if cells.into_iter().any(Cell::is_text) {
            ColumnKind::Text
        } else {
            ColumnKind::Numeric
        }
    }

    /// Returns true if this kind is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Numeric)
    }
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Text => write!(f, "text"),
        }
    }
}

/// A named, typed column of cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Inferred kind.
    pub kind: ColumnKind,
    /// Values in row order.
    pub cells: Vec<Cell>,
}

impl Column {
    /// Create a column with an explicit kind.
    pub fn new(name: impl Into<String>, kind: ColumnKind, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            kind,
            cells,
        }
    }

    /// Create a column, inferring its kind from the cells.
    pub fn classified(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        let kind = ColumnKind::infer(&cells);
        Self::new(name, kind, cells)
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of missing cells.
    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_missing()).count()
    }

    /// Non-missing numeric values, in row order.
    pub fn numbers(&self) -> impl Iterator<Item = f64> + '_ {
        self.cells.iter().filter_map(Cell::as_number)
    }
}
