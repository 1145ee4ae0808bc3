//! File loader: raw read, header detection, table construction.

use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::{Result, TabcleanError};
use crate::table::{Cell, Table};

use super::format::FileFormat;
use super::header::{HeaderMode, header_names, synthesized_names};
use super::raw::{field_kinds, read_delimited, read_workbook, type_field, type_rows};
use super::source::SourceMetadata;

/// Loader configuration.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Field delimiter for delimited text.
    pub delimiter: u8,
    /// Quote character for delimited text.
    pub quote: u8,
    /// Header handling.
    pub header: HeaderMode,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            header: HeaderMode::Detect,
        }
    }
}

impl LoaderConfig {
    /// Parse a delimiter given as a single ASCII character, `\t` or `tab`.
    pub fn parse_delimiter(s: &str) -> Result<u8> {
        match s {
            "\\t" | "tab" | "\t" => Ok(b'\t'),
            _ => match s.as_bytes() {
                [b] if b.is_ascii() && *b != b'\n' && *b != b'\r' => Ok(*b),
                _ => Err(TabcleanError::Config(format!(
                    "delimiter must be a single ASCII character, got '{}'",
                    s
                ))),
            },
        }
    }
}

/// Loads tabular data files into tables.
#[derive(Debug, Clone, Default)]
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    /// Create a new loader with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader with custom configuration.
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Load a `.csv` or `.xlsx` file and return the table and its metadata.
    ///
    /// No table is produced if any part of the file fails to parse.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(Table, SourceMetadata)> {
        let path = path.as_ref();
        let format = FileFormat::from_path(path)?;

        let contents = fs::read(path).map_err(|e| TabcleanError::io(path, e))?;
        let size_bytes = contents.len() as u64;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let (table, header_detected) = self.load_bytes(contents, format)?;

        info!(
            file = %path.display(),
            %format,
            rows = table.row_count(),
            columns = table.column_count(),
            header_detected,
            "loaded table"
        );

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            header_detected,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, metadata))
    }

    /// Parse file contents of a known format.
    ///
    /// Returns the table and whether the first row was taken as the header.
    pub fn load_bytes(&self, contents: Vec<u8>, format: FileFormat) -> Result<(Table, bool)> {
        let rows = match format {
            FileFormat::Csv => {
                read_delimited(&contents, self.config.delimiter, self.config.quote)?
            }
            FileFormat::Xlsx => read_workbook(contents)?,
        };
        Ok(self.build_table(rows, format))
    }

    fn build_table(&self, mut rows: Vec<Vec<Cell>>, format: FileFormat) -> (Table, bool) {
        // Delimited fields carry no type of their own: a row-0 field counts
        // as text when its column is text across the headerless read.
        let first_row: Vec<Cell> = match format {
            FileFormat::Csv => {
                let kinds = field_kinds(&rows);
                rows.first()
                    .into_iter()
                    .flatten()
                    .zip(&kinds)
                    .map(|(cell, kind)| type_field(cell.clone(), *kind))
                    .collect()
            }
            FileFormat::Xlsx => rows.first().cloned().unwrap_or_default(),
        };
        let has_header = self.config.header.resolve(&first_row);
        let width = first_row.len();

        debug!(
            mode = ?self.config.header,
            text_cells = first_row.iter().filter(|c| c.is_text()).count(),
            width,
            has_header,
            "header detection"
        );

        let names = if has_header {
            let header = rows.remove(0);
            header_names(&header)
        } else {
            synthesized_names(width)
        };

        let rows = match format {
            FileFormat::Csv => type_rows(rows),
            FileFormat::Xlsx => rows,
        };
        (Table::from_rows(names, rows), has_header)
    }
}
