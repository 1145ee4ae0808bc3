//! Cleaning engine: applies the enabled steps to a copy of a table.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::table::{Cell, ColumnKind, Table};

use super::operations::{CleanReport, CleanStep, ColumnRename};
use super::options::CleaningOptions;

/// Applies a fixed pipeline of cleaning steps.
///
/// The input table is never modified; every run produces a new table.
#[derive(Debug, Clone, Default)]
pub struct Cleaner {
    options: CleaningOptions,
}

impl Cleaner {
    /// Create a cleaner with the given options.
    pub fn new(options: CleaningOptions) -> Self {
        Self { options }
    }

    /// The options this cleaner runs with.
    pub fn options(&self) -> &CleaningOptions {
        &self.options
    }

    /// Clean a table, returning the new table and a report of the changes.
    pub fn clean(&self, input: &Table) -> (Table, CleanReport) {
        let mut table = input.clone();
        let mut report = CleanReport::new(table.row_count());

        for step in self.options.enabled_steps() {
            let changed = match step {
                CleanStep::TrimText => {
                    report.cells_trimmed = trim_text(&mut table);
                    report.cells_trimmed
                }
                CleanStep::StandardizeColumns => {
                    report.columns_renamed = standardize_columns(&mut table);
                    report.columns_renamed.len()
                }
                CleanStep::FillMissing => {
                    report.cells_filled = fill_missing(&mut table);
                    report.cells_filled
                }
                CleanStep::RemoveDuplicates => {
                    report.duplicates_removed = remove_duplicates(&mut table);
                    report.duplicates_removed
                }
            };
            debug!(%step, changed, "applied cleaning step");
            report.steps_applied.push(step);
        }

        report.rows_after = table.row_count();
        info!(
            options = %self.options,
            rows_before = report.rows_before,
            rows_after = report.rows_after,
            "cleaned table"
        );

        (table, report)
    }
}

/// Clean a table with the given options, discarding the report.
pub fn clean(table: &Table, options: CleaningOptions) -> Table {
    Cleaner::new(options).clean(table).0
}

/// Lower-case a column name and replace spaces with underscores.
pub fn standardize_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// Median of a set of values, averaging the middle pair for even counts.
pub fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);

    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// Convert every cell of each text column to its trimmed string form.
///
/// Missing cells stay missing. Returns the number of cells that changed,
/// counting numbers rewritten as text.
fn trim_text(table: &mut Table) -> usize {
    let mut changed = 0;

    for column in table.columns_mut() {
        if column.kind != ColumnKind::Text {
            continue;
        }
        for cell in &mut column.cells {
            let trimmed = match cell {
                Cell::Missing => continue,
                Cell::Number(n) => {
                    changed += 1;
                    Cell::Text(n.to_string())
                }
                Cell::Text(s) => {
                    let t = s.trim();
                    if t.len() == s.len() {
                        continue;
                    }
                    changed += 1;
                    Cell::Text(t.to_string())
                }
            };
            *cell = trimmed;
        }
    }

    changed
}

/// Standardize every column name, suffixing `_1`, `_2`, ... when the
/// standardized name is already taken.
fn standardize_columns(table: &mut Table) -> Vec<ColumnRename> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut renames = Vec::new();

    for column in table.columns_mut() {
        let base = standardize_name(&column.name);
        let mut name = base.clone();
        let mut suffix = 0;
        while taken.contains(&name) {
            suffix += 1;
            name = format!("{}_{}", base, suffix);
        }
        taken.insert(name.clone());

        if name != column.name {
            renames.push(ColumnRename {
                from: std::mem::replace(&mut column.name, name.clone()),
                to: name,
            });
        }
    }

    renames
}

/// Fill numeric gaps with the column median and text gaps with `""`.
///
/// A numeric column with no values has no median and stays missing.
fn fill_missing(table: &mut Table) -> usize {
    let mut filled = 0;

    for column in table.columns_mut() {
        let replacement = match column.kind {
            ColumnKind::Numeric => match median(column.numbers().collect()) {
                Some(m) => Cell::Number(m),
                None => continue,
            },
            ColumnKind::Text => Cell::Text(String::new()),
        };

        for cell in column.cells.iter_mut().filter(|c| c.is_missing()) {
            *cell = replacement.clone();
            filled += 1;
        }
    }

    filled
}

/// Part of a row's comparison key.
#[derive(Debug, PartialEq, Eq, Hash)]
enum KeyPart {
    Missing,
    Number(u64),
    Text(String),
}

impl KeyPart {
    fn of(kind: ColumnKind, cell: &Cell) -> Self {
        match (kind, cell) {
            (_, Cell::Missing) => KeyPart::Missing,
            // -0.0 and 0.0 compare equal
            (ColumnKind::Numeric, Cell::Number(n)) => KeyPart::Number((n + 0.0).to_bits()),
            (_, other) => KeyPart::Text(other.to_display_string().trim().to_lowercase()),
        }
    }
}

/// Drop every row whose comparison key matches an earlier row.
///
/// Text is folded to trimmed lower case for the comparison only; the kept
/// rows retain their values. Returns the number of rows removed.
fn remove_duplicates(table: &mut Table) -> usize {
    let rows = table.row_count();
    let mut seen: HashSet<Vec<KeyPart>> = HashSet::with_capacity(rows);

    let keep: Vec<bool> = (0..rows)
        .map(|row| {
            let key: Vec<KeyPart> = table
                .columns()
                .iter()
                .map(|c| KeyPart::of(c.kind, &c.cells[row]))
                .collect();
            seen.insert(key)
        })
        .collect();

    let removed = keep.iter().filter(|k| !**k).count();
    if removed > 0 {
        table.retain_rows(&keep);
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn num(n: f64) -> Cell {
        Cell::Number(n)
    }

    fn only(step: CleanStep) -> CleaningOptions {
        let mut options = CleaningOptions::none();
        match step {
            CleanStep::TrimText => options.trim_text = true,
            CleanStep::StandardizeColumns => options.standardize_columns = true,
            CleanStep::FillMissing => options.fill_missing = true,
            CleanStep::RemoveDuplicates => options.remove_duplicates = true,
        }
        options
    }

    fn names_and_values() -> Table {
        Table::from_rows(
            vec!["Name".to_string(), "Value".to_string()],
            vec![
                vec![text("Foo "), num(1.0)],
                vec![text("foo"), num(1.0)],
                vec![text("Bar"), num(2.0)],
            ],
        )
    }

    #[test]
    fn test_all_off_is_identity() {
        let table = names_and_values();
        let (cleaned, report) = Cleaner::new(CleaningOptions::none()).clean(&table);

        assert_eq!(cleaned, table);
        assert!(report.steps_applied.is_empty());
        assert!(report.is_unchanged());
    }

    #[test]
    fn test_trim_then_dedupe_keeps_first_trimmed_value() {
        let options = CleaningOptions {
            trim_text: true,
            remove_duplicates: true,
            ..CleaningOptions::none()
        };
        let (cleaned, report) = Cleaner::new(options).clean(&names_and_values());

        assert_eq!(cleaned.row_count(), 2);
        assert_eq!(cleaned.get(0, 0), Some(&text("Foo")));
        assert_eq!(cleaned.get(0, 1), Some(&num(1.0)));
        assert_eq!(cleaned.get(1, 0), Some(&text("Bar")));
        assert_eq!(report.cells_trimmed, 1);
        assert_eq!(report.duplicates_removed, 1);
    }

    #[test]
    fn test_dedupe_without_trim_keeps_original_value() {
        let (cleaned, _) =
            Cleaner::new(only(CleanStep::RemoveDuplicates)).clean(&names_and_values());

        assert_eq!(cleaned.row_count(), 2);
        assert_eq!(cleaned.get(0, 0), Some(&text("Foo ")));
    }

    #[test]
    fn test_dedupe_numbers_compared_by_value() {
        let table = Table::from_rows(
            vec!["n".to_string()],
            vec![vec![num(1.0)], vec![num(1.5)], vec![num(1.0)], vec![num(-0.0)], vec![num(0.0)]],
        );
        let (cleaned, report) = Cleaner::new(only(CleanStep::RemoveDuplicates)).clean(&table);

        assert_eq!(report.duplicates_removed, 2);
        assert_eq!(
            cleaned.columns()[0].cells,
            vec![num(1.0), num(1.5), num(-0.0)]
        );
    }

    #[test]
    fn test_dedupe_missing_equals_missing() {
        let table = Table::from_rows(
            vec!["a".to_string(), "b".to_string()],
            vec![
                vec![text("x"), Cell::Missing],
                vec![text("X "), Cell::Missing],
                vec![text("x"), num(1.0)],
            ],
        );
        let (cleaned, _) = Cleaner::new(only(CleanStep::RemoveDuplicates)).clean(&table);
        assert_eq!(cleaned.row_count(), 2);
    }

    #[test]
    fn test_fill_numeric_with_median() {
        let table = Table::from_rows(
            vec!["n".to_string()],
            vec![vec![num(10.0)], vec![Cell::Missing], vec![num(20.0)], vec![num(30.0)]],
        );
        let (cleaned, report) = Cleaner::new(only(CleanStep::FillMissing)).clean(&table);

        assert_eq!(
            cleaned.columns()[0].cells,
            vec![num(10.0), num(20.0), num(20.0), num(30.0)]
        );
        assert_eq!(report.cells_filled, 1);
    }

    #[test]
    fn test_fill_text_with_empty_string() {
        let table = Table::from_rows(
            vec!["t".to_string()],
            vec![vec![text("a")], vec![Cell::Missing]],
        );
        let (cleaned, _) = Cleaner::new(only(CleanStep::FillMissing)).clean(&table);
        assert_eq!(cleaned.get(1, 0), Some(&text("")));
    }

    #[test]
    fn test_fill_all_missing_numeric_column_stays_missing() {
        let table = Table::from_rows(
            vec!["n".to_string()],
            vec![vec![Cell::Missing], vec![Cell::Missing]],
        );
        let (cleaned, report) = Cleaner::new(only(CleanStep::FillMissing)).clean(&table);

        assert_eq!(cleaned, table);
        assert_eq!(report.cells_filled, 0);
    }

    #[test]
    fn test_fill_runs_before_dedupe() {
        // The median still sees the duplicate 10: [10, 10, 40] -> 10, not 25.
        let table = Table::from_rows(
            vec!["n".to_string()],
            vec![vec![num(10.0)], vec![num(10.0)], vec![num(40.0)], vec![Cell::Missing]],
        );
        let options = CleaningOptions {
            fill_missing: true,
            remove_duplicates: true,
            ..CleaningOptions::none()
        };
        let cleaned = clean(&table, options);

        assert_eq!(cleaned.columns()[0].cells, vec![num(10.0), num(40.0)]);
    }

    #[test]
    fn test_dedupe_on_deserialized_ragged_table() {
        let json = r#"{"columns":[
            {"name":"a","kind":"numeric","cells":[1.0,1.0,1.0]},
            {"name":"b","kind":"text","cells":["x"]}
        ]}"#;
        let table: Table = serde_json::from_str(json).unwrap();
        let (cleaned, report) = Cleaner::new(only(CleanStep::RemoveDuplicates)).clean(&table);

        assert_eq!(report.duplicates_removed, 1);
        assert_eq!(cleaned.row_count(), 2);
    }

    #[test]
    fn test_trim_converts_numbers_in_text_columns() {
        let table = Table::from_rows(
            vec!["mixed".to_string()],
            vec![vec![text(" a ")], vec![num(5.0)], vec![Cell::Missing]],
        );
        let (cleaned, report) = Cleaner::new(only(CleanStep::TrimText)).clean(&table);

        assert_eq!(
            cleaned.columns()[0].cells,
            vec![text("a"), text("5"), Cell::Missing]
        );
        assert_eq!(report.cells_trimmed, 2);
        assert!(!report.is_unchanged());
    }

    #[test]
    fn test_trim_leaves_numeric_columns_alone() {
        let table = Table::new(vec![Column::new(
            "n",
            ColumnKind::Numeric,
            vec![num(1.0), Cell::Missing],
        )]);
        let cleaned = clean(&table, only(CleanStep::TrimText));
        assert_eq!(cleaned, table);
    }

    #[test]
    fn test_standardize_name() {
        assert_eq!(standardize_name("Full Name"), "full_name");
        assert_eq!(standardize_name("AGE"), "age");
        assert_eq!(standardize_name("already_clean"), "already_clean");
    }

    #[test]
    fn test_standardize_columns_resolves_collisions() {
        let table = Table::from_rows(
            vec!["Full Name".to_string(), "full_name".to_string(), "FULL NAME".to_string()],
            vec![vec![text("a"), text("b"), text("c")]],
        );
        let (cleaned, report) = Cleaner::new(only(CleanStep::StandardizeColumns)).clean(&table);

        assert_eq!(cleaned.column_names(), vec!["full_name", "full_name_1", "full_name_2"]);
        assert_eq!(report.columns_renamed.len(), 3);
        assert_eq!(report.columns_renamed[0].from, "Full Name");
        assert_eq!(report.columns_renamed[1].from, "full_name");
        assert_eq!(report.columns_renamed[1].to, "full_name_1");
    }

    #[test]
    fn test_clean_does_not_mutate_input() {
        let table = names_and_values();
        let snapshot = table.clone();
        let _ = clean(&table, CleaningOptions::all());
        assert_eq!(table, snapshot);
    }

    #[test]
    fn test_median() {
        assert_eq!(median(vec![]), None);
        assert_eq!(median(vec![3.0]), Some(3.0));
        assert_eq!(median(vec![30.0, 10.0, 20.0]), Some(20.0));
        assert_eq!(median(vec![4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }
}
