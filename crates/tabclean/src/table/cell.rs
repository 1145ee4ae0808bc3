//! Cell values and raw-field classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Spellings treated as missing values when reading raw fields.
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A single value in a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// No value.
    Missing,
    /// A numeric value. Never NaN; missing values use [`Cell::Missing`].
    Number(f64),
    /// A text value, kept verbatim.
    Text(String),
}

impl Cell {
    /// Classify a raw text field: NA tokens become missing, fields that parse
    /// as a number become numbers, everything else is kept as text.
    pub fn parse(raw: &str) -> Self {
        if is_na_token(raw) {
            return Cell::Missing;
        }
        match raw.trim().parse::<f64>() {
            Ok(n) if !n.is_nan() => Cell::Number(n),
            _ => Cell::Text(raw.to_string()),
        }
    }

    /// Keep a raw text field untyped: NA tokens become missing, everything
    /// else is kept verbatim as text.
    pub fn raw(field: &str) -> Self {
        if is_na_token(field) {
            Cell::Missing
        } else {
            Cell::Text(field.to_string())
        }
    }

    /// Build a numeric cell, mapping NaN to missing.
    pub fn number(value: f64) -> Self {
        if value.is_nan() {
            Cell::Missing
        } else {
            Cell::Number(value)
        }
    }

    /// Returns true for missing cells.
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Returns true for text cells.
    pub fn is_text(&self) -> bool {
        matches!(self, Cell::Text(_))
    }

    /// The numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The text value, if this is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// String form used for display and export. Missing cells render empty.
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Missing => Ok(()),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

/// Check if a raw field spells a missing value.
pub fn is_na_token(raw: &str) -> bool {
    NA_TOKENS.contains(&raw)
}
