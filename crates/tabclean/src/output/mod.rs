//! Export of cleaned tables.

mod delimited;
mod workbook;

pub use delimited::write_csv;
pub use workbook::write_xlsx;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tracing::info;

use crate::error::{Result, TabcleanError};
use crate::input::FileFormat;
use crate::table::Table;

/// Write a table to `path`, choosing the format from the extension.
///
/// The header row is always written; row indices never are.
pub fn save(table: &Table, path: impl AsRef<Path>) -> Result<FileFormat> {
    let path = path.as_ref();
    let format = FileFormat::from_path(path)?;

    let file = File::create(path).map_err(|e| TabcleanError::io(path, e))?;
    match format {
        FileFormat::Csv => write_csv(table, BufWriter::new(file), b',')?,
        FileFormat::Xlsx => write_xlsx(table, file)?,
    }

    info!(
        file = %path.display(),
        %format,
        rows = table.row_count(),
        columns = table.column_count(),
        "saved table"
    );
    Ok(format)
}
