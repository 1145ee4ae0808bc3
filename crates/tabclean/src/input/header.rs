//! Header row detection and column naming.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::table::Cell;

/// How the loader decides whether the first row holds column names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderMode {
    /// Use the first row as the header when at least half its cells are text.
    #[default]
    Detect,
    /// The first row is always the header.
    Present,
    /// There is no header; names are synthesized.
    Absent,
}

impl HeaderMode {
    /// Resolve the mode against an actual first row.
    pub fn resolve(&self, first_row: &[Cell]) -> bool {
        match self {
            HeaderMode::Detect => looks_like_header(first_row),
            HeaderMode::Present => true,
            HeaderMode::Absent => false,
        }
    }
}

impl std::str::FromStr for HeaderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "detect" | "auto" => Ok(HeaderMode::Detect),
            "yes" | "present" | "true" => Ok(HeaderMode::Present),
            "no" | "absent" | "false" | "none" => Ok(HeaderMode::Absent),
            _ => Err(format!("Unknown header mode: {}. Use detect, yes, or no.", s)),
        }
    }
}

/// Majority-of-strings rule: the row is a header when the number of text
/// cells is at least half of the row's cell count.
pub fn looks_like_header(row: &[Cell]) -> bool {
    let text_cells = row.iter().filter(|c| c.is_text()).count();
    text_cells * 2 >= row.len()
}

/// Column names taken from a header row.
///
/// Empty header cells become `Unnamed: {position}` and repeated names are
/// made unique as `name`, `name.1`, `name.2`, ...
pub(crate) fn header_names(row: &[Cell]) -> Vec<String> {
    let names = row
        .iter()
        .enumerate()
        .map(|(i, cell)| match cell {
            Cell::Missing => format!("Unnamed: {}", i),
            other => other.to_display_string(),
        })
        .collect();
    mangle_duplicates(names)
}

/// Positional names for a headerless table: `column_1 … column_N`.
pub(crate) fn synthesized_names(width: usize) -> Vec<String> {
    (0..width).map(|i| format!("column_{}", i + 1)).collect()
}

fn mangle_duplicates(names: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = names.iter().cloned().collect();
    let mut emitted: HashSet<String> = HashSet::new();
    let mut counters: HashMap<String, usize> = HashMap::new();
    let mut result = Vec::with_capacity(names.len());

    for name in names {
        if emitted.insert(name.clone()) {
            result.push(name);
            continue;
        }

        let counter = counters.entry(name.clone()).or_insert(0);
        loop {
            *counter += 1;
            let candidate = format!("{}.{}", name, counter);
            if seen.insert(candidate.clone()) {
                emitted.insert(candidate.clone());
                result.push(candidate);
                break;
            }
        }
    }

    result
}
