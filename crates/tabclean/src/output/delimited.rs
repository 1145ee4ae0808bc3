//! Delimited text writer.

use std::io::Write;

use crate::error::Result;
use crate::table::Table;

/// Write a header row and every data row. Missing cells become empty fields.
pub fn write_csv<W: Write>(table: &Table, writer: W, delimiter: u8) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    writer.write_record(table.column_names())?;
    for row in 0..table.row_count() {
        writer.write_record(table.row(row).map(|cell| cell.to_display_string()))?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
