//! Raw grid readers: every row of the file as classified cells, with no
//! header assumption.

use std::io::Cursor;

use calamine::{Data, DataType, Reader, Xlsx};

use crate::error::{Result, TabcleanError};
use crate::table::{Cell, ColumnKind, is_na_token};

/// Read delimited text into rows of untyped cells.
///
/// Fields stay text (or missing) until [`field_kinds`] has seen the whole
/// column. The first record fixes the width: shorter records are padded
/// with missing cells, longer ones are rejected.
pub(crate) fn read_delimited(bytes: &[u8], delimiter: u8, quote: u8) -> Result<Vec<Vec<Cell>>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .quote(quote)
        .flexible(true)
        .from_reader(bytes);

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    let mut width = 0;

    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        if row_idx == 0 {
            width = record.len();
        } else if record.len() > width {
            return Err(TabcleanError::Parse {
                row: row_idx + 1,
                column: width + 1,
                message: format!("expected {} fields, found {}", width, record.len()),
            });
        }

        let mut row: Vec<Cell> = record.iter().map(Cell::raw).collect();
        row.resize(width, Cell::Missing);
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(TabcleanError::EmptyData("No rows found".to_string()));
    }

    Ok(rows)
}

/// Kind of each column of an untyped delimited grid. A column is numeric
/// when every non-missing field in it parses as a number.
pub(crate) fn field_kinds(rows: &[Vec<Cell>]) -> Vec<ColumnKind> {
    let width = rows.first().map_or(0, Vec::len);
    (0..width)
        .map(|col| {
            let numeric = rows
                .iter()
                .filter_map(|row| row.get(col))
                .all(|cell| match cell {
                    Cell::Text(s) => Cell::parse(s).as_number().is_some(),
                    _ => true,
                });
            if numeric {
                ColumnKind::Numeric
            } else {
                ColumnKind::Text
            }
        })
        .collect()
}

/// Give an untyped field the type of its column: numbers in numeric
/// columns, the raw text everywhere else.
pub(crate) fn type_field(cell: Cell, kind: ColumnKind) -> Cell {
    match (kind, cell) {
        (ColumnKind::Numeric, Cell::Text(s)) => Cell::parse(&s),
        (_, cell) => cell,
    }
}

/// Type every row of an untyped delimited grid by column.
pub(crate) fn type_rows(rows: Vec<Vec<Cell>>) -> Vec<Vec<Cell>> {
    let kinds = field_kinds(&rows);
    rows.into_iter()
        .map(|row| {
            row.into_iter()
                .zip(&kinds)
                .map(|(cell, kind)| type_field(cell, *kind))
                .collect()
        })
        .collect()
}

/// Read the first worksheet of an xlsx workbook into rows of cells.
pub(crate) fn read_workbook(bytes: Vec<u8>) -> Result<Vec<Vec<Cell>>> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| TabcleanError::EmptyData("Workbook has no worksheets".to_string()))??;

    if range.is_empty() {
        return Err(TabcleanError::EmptyData("First worksheet is empty".to_string()));
    }

    Ok(range
        .rows()
        .map(|row| row.iter().map(workbook_cell).collect())
        .collect())
}

fn workbook_cell(data: &Data) -> Cell {
    match data {
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::number(*f),
        Data::String(s) if is_na_token(s) => Cell::Missing,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Text(if *b { "True" } else { "False" }.to_string()),
        Data::DateTime(_) => data
            .as_datetime()
            .map(|dt| Cell::Text(dt.format("%Y-%m-%d %H:%M:%S").to_string()))
            .unwrap_or(Cell::Missing),
        Data::Error(_) | Data::Empty => Cell::Missing,
    }
}
