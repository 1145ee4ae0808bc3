//! Integration tests for tabclean.

use std::io::Write;
use std::path::PathBuf;

use tempfile::{NamedTempFile, TempDir};

use tabclean::{
    Cell, CleaningOptions, Cleaner, ColumnKind, FileFormat, HeaderMode, Loader, LoaderConfig,
    TabcleanError, Table,
};

/// Helper to create a temporary file with the given extension and content.
fn create_test_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn text(s: &str) -> Cell {
    Cell::Text(s.to_string())
}

fn num(n: f64) -> Cell {
    Cell::Number(n)
}

const PEOPLE_CSV: &str = "Full Name,Age,City\n\
                          Alice ,30, NYC\n\
                          alice,30,nyc\n\
                          Bob,,LA\n\
                          Carol,25,Boston\n";

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_load_csv_with_text_header() {
    let file = create_test_file(".csv", PEOPLE_CSV);
    let (table, source) = Loader::new().load(file.path()).expect("Load failed");

    assert!(source.header_detected);
    assert_eq!(source.format, FileFormat::Csv);
    assert_eq!(source.row_count, 4);
    assert_eq!(source.column_count, 3);
    assert!(source.hash.starts_with("sha256:"));

    assert_eq!(table.column_names(), vec!["Full Name", "Age", "City"]);
    assert_eq!(table.column("Age").unwrap().kind, ColumnKind::Numeric);
    assert_eq!(table.column("City").unwrap().kind, ColumnKind::Text);
    assert_eq!(table.get(0, 0), Some(&text("Alice ")));
    assert_eq!(table.get(2, 1), Some(&Cell::Missing));
}

#[test]
fn test_load_csv_numeric_first_row() {
    let file = create_test_file(".csv", "1,2\n3,4\n5,6\n");
    let (table, source) = Loader::new().load(file.path()).expect("Load failed");

    assert!(!source.header_detected);
    assert_eq!(table.column_names(), vec!["column_1", "column_2"]);
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.row(0).cloned().collect::<Vec<_>>(), vec![num(1.0), num(2.0)]);
}

#[test]
fn test_load_semicolon_file_with_config() {
    let file = create_test_file(".csv", "name;score\nA;1\nB;2\n");
    let loader = Loader::with_config(LoaderConfig {
        delimiter: b';',
        ..LoaderConfig::default()
    });
    let (table, _) = loader.load(file.path()).expect("Load failed");

    assert_eq!(table.column_names(), vec!["name", "score"]);
    assert_eq!(table.column("score").unwrap().kind, ColumnKind::Numeric);
}

#[test]
fn test_load_forced_headerless() {
    let file = create_test_file(".csv", "a,b\nc,d\n");
    let loader = Loader::with_config(LoaderConfig {
        header: HeaderMode::Absent,
        ..LoaderConfig::default()
    });
    let (table, source) = loader.load(file.path()).expect("Load failed");

    assert!(!source.header_detected);
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.get(0, 0), Some(&text("a")));
}

#[test]
fn test_load_empty_file_fails() {
    let file = create_test_file(".csv", "");
    let err = Loader::new().load(file.path()).unwrap_err();
    assert!(matches!(err, TabcleanError::EmptyData(_)));
}

#[test]
fn test_load_ragged_file_fails() {
    let file = create_test_file(".csv", "a,b\n1,2\n3,4,5\n");
    let err = Loader::new().load(file.path()).unwrap_err();
    assert!(matches!(err, TabcleanError::Parse { row: 3, .. }));
}

#[test]
fn test_load_corrupt_workbook_fails() {
    let file = create_test_file(".xlsx", "this is not a workbook");
    let err = Loader::new().load(file.path()).unwrap_err();
    assert!(matches!(err, TabcleanError::Spreadsheet(_)));
}

// =============================================================================
// Cleaning
// =============================================================================

#[test]
fn test_clean_loaded_file_with_defaults() {
    let file = create_test_file(".csv", PEOPLE_CSV);
    let (table, _) = Loader::new().load(file.path()).expect("Load failed");
    let (cleaned, report) = Cleaner::new(CleaningOptions::default()).clean(&table);

    assert_eq!(cleaned.column_names(), vec!["full_name", "age", "city"]);
    // Alice rows collapse after trimming and case folding.
    assert_eq!(cleaned.row_count(), 3);
    assert_eq!(
        cleaned.row(0).cloned().collect::<Vec<_>>(),
        vec![text("Alice"), num(30.0), text("NYC")]
    );
    // Median of [30, 30, 25] fills Bob's age.
    assert_eq!(
        cleaned.row(1).cloned().collect::<Vec<_>>(),
        vec![text("Bob"), num(30.0), text("LA")]
    );
    assert_eq!(report.duplicates_removed, 1);
    assert_eq!(report.cells_filled, 1);
    assert_eq!(report.rows_before, 4);
    assert_eq!(report.rows_after, 3);
}

#[test]
fn test_trim_and_dedupe_folds_case_variants() {
    let table = Table::from_rows(
        vec!["name".to_string(), "n".to_string()],
        vec![
            vec![text("Foo "), num(1.0)],
            vec![text("foo"), num(1.0)],
            vec![text("Bar"), num(2.0)],
        ],
    );
    let options = CleaningOptions {
        trim_text: true,
        remove_duplicates: true,
        ..CleaningOptions::none()
    };
    let (cleaned, _) = Cleaner::new(options).clean(&table);

    let rows: Vec<Vec<Cell>> = (0..cleaned.row_count())
        .map(|r| cleaned.row(r).cloned().collect())
        .collect();
    assert_eq!(
        rows,
        vec![vec![text("Foo"), num(1.0)], vec![text("Bar"), num(2.0)]]
    );
}

#[test]
fn test_every_option_combination_leaves_input_untouched() {
    let file = create_test_file(".csv", PEOPLE_CSV);
    let (table, _) = Loader::new().load(file.path()).expect("Load failed");
    let snapshot = table.clone();

    for options in CleaningOptions::all_combinations() {
        let (cleaned, report) = Cleaner::new(options).clean(&table);
        assert_eq!(table, snapshot, "input mutated by {options}");
        assert_eq!(report.steps_applied, options.enabled_steps());
        assert_eq!(cleaned.column_count(), table.column_count());
        assert!(cleaned.row_count() <= table.row_count());
    }
}

// =============================================================================
// Round Trips
// =============================================================================

fn output_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

#[test]
fn test_csv_round_trip() {
    let file = create_test_file(".csv", PEOPLE_CSV);
    let (table, _) = Loader::new().load(file.path()).expect("Load failed");
    let (cleaned, _) = Cleaner::new(CleaningOptions::default()).clean(&table);

    let dir = TempDir::new().unwrap();
    let path = output_path(&dir, "people_clean.csv");
    let format = tabclean::save(&cleaned, &path).expect("Save failed");
    assert_eq!(format, FileFormat::Csv);

    let (reloaded, source) = Loader::new().load(&path).expect("Reload failed");
    let (reloaded, _) = Cleaner::new(CleaningOptions::none()).clean(&reloaded);

    assert!(source.header_detected);
    assert_eq!(reloaded, cleaned);
}

const CODES_CSV: &str = "code,qty\n007,1\nX12,2\n1.50,\n";

#[test]
fn test_load_mixed_column_keeps_raw_text() {
    let file = create_test_file(".csv", CODES_CSV);
    let (table, _) = Loader::new().load(file.path()).expect("Load failed");

    let code = table.column("code").unwrap();
    assert_eq!(code.kind, ColumnKind::Text);
    assert_eq!(code.cells, vec![text("007"), text("X12"), text("1.50")]);
    assert_eq!(table.column("qty").unwrap().kind, ColumnKind::Numeric);
}

#[test]
fn test_mixed_column_csv_round_trip() {
    let file = create_test_file(".csv", CODES_CSV);
    let (table, _) = Loader::new().load(file.path()).expect("Load failed");

    let dir = TempDir::new().unwrap();
    for (name, options) in [
        ("codes_raw.csv", CleaningOptions::none()),
        ("codes_clean.csv", CleaningOptions::default()),
    ] {
        let (cleaned, _) = Cleaner::new(options).clean(&table);
        let path = output_path(&dir, name);
        tabclean::save(&cleaned, &path).expect("Save failed");

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("007,"));
        assert!(written.contains("1.50,"));

        let (reloaded, _) = Loader::new().load(&path).expect("Reload failed");
        assert_eq!(reloaded, cleaned);
    }
}

#[test]
fn test_csv_output_has_header_and_no_index() {
    let table = Table::from_rows(
        vec!["a".to_string(), "b".to_string()],
        vec![vec![text("x"), num(1.5)], vec![text("y"), Cell::Missing]],
    );
    let dir = TempDir::new().unwrap();
    let path = output_path(&dir, "out.csv");
    tabclean::save(&table, &path).expect("Save failed");

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, "a,b\nx,1.5\ny,\n");
}

#[test]
fn test_xlsx_round_trip() {
    let table = Table::from_rows(
        vec!["name".to_string(), "score".to_string(), "note".to_string()],
        vec![
            vec![text("Alice"), num(1.5), text("a & b")],
            vec![text("Bob"), num(20.0), text("<tag>")],
            vec![text("Carol"), Cell::Missing, text("  spaced  ")],
        ],
    );

    let dir = TempDir::new().unwrap();
    let path = output_path(&dir, "scores.xlsx");
    let format = tabclean::save(&table, &path).expect("Save failed");
    assert_eq!(format, FileFormat::Xlsx);

    let (reloaded, source) = Loader::new().load(&path).expect("Reload failed");

    assert_eq!(source.format, FileFormat::Xlsx);
    assert!(source.header_detected);
    assert_eq!(reloaded, table);
}

#[test]
fn test_save_unsupported_extension_fails() {
    let table = Table::from_rows(vec!["a".to_string()], vec![vec![num(1.0)]]);
    let dir = TempDir::new().unwrap();

    let err = tabclean::save(&table, output_path(&dir, "out.json")).unwrap_err();
    assert!(matches!(err, TabcleanError::UnsupportedFormat(_)));
}

#[test]
fn test_save_to_missing_directory_fails() {
    let table = Table::from_rows(vec!["a".to_string()], vec![vec![num(1.0)]]);
    let dir = TempDir::new().unwrap();

    let err = tabclean::save(&table, dir.path().join("no/such/dir/out.csv")).unwrap_err();
    assert!(matches!(err, TabcleanError::Io { .. }));
}
