//! Minimal xlsx writer: a single worksheet package with inline strings.

use std::borrow::Cow;
use std::fmt::Write as _;
use std::io::{Seek, Write};

use quick_xml::escape::escape;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::{Result, TabcleanError};
use crate::table::{Cell, Table};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const CONTENT_TYPES: &str = concat!(
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
    r#"<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
    r#"</Types>"#
);

const ROOT_RELS: &str = concat!(
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>"#,
    r#"</Relationships>"#
);

const WORKBOOK: &str = concat!(
    r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
    r#"<sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets>"#,
    r#"</workbook>"#
);

const WORKBOOK_RELS: &str = concat!(
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>"#,
    r#"</Relationships>"#
);

/// Write a table as an xlsx workbook with one sheet named `Sheet1`.
///
/// The header row holds the column names. Text is stored as inline strings,
/// numbers as numeric cells, and missing cells are left out.
pub fn write_xlsx<W: Write + Seek>(table: &Table, writer: W) -> Result<()> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", ROOT_RELS.to_string()),
        ("xl/workbook.xml", WORKBOOK.to_string()),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_string()),
        ("xl/worksheets/sheet1.xml", worksheet_xml(table)),
    ];

    for (name, body) in parts {
        zip.start_file(name, options)?;
        zip.write_all(XML_DECLARATION.as_bytes())
            .and_then(|()| zip.write_all(body.as_bytes()))
            .map_err(|e| TabcleanError::io(name, e))?;
    }

    zip.finish()?;
    Ok(())
}

fn worksheet_xml(table: &Table) -> String {
    let mut xml = String::from(
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );

    xml.push_str(r#"<row r="1">"#);
    for (col, name) in table.column_names().into_iter().enumerate() {
        push_text_cell(&mut xml, &cell_ref(col, 0), name);
    }
    xml.push_str("</row>");

    for row in 0..table.row_count() {
        let _ = write!(xml, r#"<row r="{}">"#, row + 2);
        for (col, cell) in table.row(row).enumerate() {
            let reference = cell_ref(col, row + 1);
            match cell {
                Cell::Missing => {}
                Cell::Number(n) if n.is_finite() => {
                    let _ = write!(xml, r#"<c r="{}"><v>{}</v></c>"#, reference, n);
                }
                Cell::Number(n) => push_text_cell(&mut xml, &reference, &n.to_string()),
                Cell::Text(s) => push_text_cell(&mut xml, &reference, s),
            }
        }
        xml.push_str("</row>");
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

fn push_text_cell(xml: &mut String, reference: &str, text: &str) {
    let _ = write!(
        xml,
        r#"<c r="{}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
        reference,
        escape(xml_chars(text))
    );
}

/// Drop characters XML 1.0 cannot carry: control characters other than tab,
/// line feed and carriage return, and the U+FFFE/U+FFFF non-characters.
fn xml_chars(text: &str) -> Cow<'_, str> {
    let illegal = |c: char| {
        (c < ' ' && !matches!(c, '\t' | '\n' | '\r')) || matches!(c, '\u{FFFE}' | '\u{FFFF}')
    };
    if text.chars().any(illegal) {
        Cow::Owned(text.chars().filter(|c| !illegal(*c)).collect())
    } else {
        Cow::Borrowed(text)
    }
}

/// A1-style reference for a zero-based column and row.
fn cell_ref(col: usize, row: usize) -> String {
    let mut letters = Vec::new();
    let mut n = col + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    format!("{}{}", String::from_utf8_lossy(&letters), row + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_cell_ref() {
        assert_eq!(cell_ref(0, 0), "A1");
        assert_eq!(cell_ref(25, 9), "Z10");
        assert_eq!(cell_ref(26, 0), "AA1");
        assert_eq!(cell_ref(701, 0), "ZZ1");
        assert_eq!(cell_ref(702, 0), "AAA1");
    }

    #[test]
    fn test_worksheet_xml_escapes_text_and_skips_missing() {
        let table = Table::from_rows(
            vec!["a<b".to_string(), "n".to_string()],
            vec![vec![Cell::Text("x & y".to_string()), Cell::Missing]],
        );
        let xml = worksheet_xml(&table);

        assert!(xml.contains("a&lt;b"));
        assert!(xml.contains("x &amp; y"));
        assert!(!xml.contains(r#"r="B2""#));
    }

    #[test]
    fn test_worksheet_xml_drops_control_characters() {
        let table = Table::from_rows(
            vec!["note\u{1}".to_string()],
            vec![vec![Cell::Text("a\u{1}b\u{1f}\tc\n".to_string())]],
        );
        let xml = worksheet_xml(&table);

        assert!(!xml.chars().any(|c| c == '\u{1}' || c == '\u{1f}'));
        assert!(xml.contains(">note<"));
        assert!(xml.contains(">ab\tc\n<"));
    }

    #[test]
    fn test_write_xlsx_produces_zip() {
        let table = Table::from_rows(
            vec!["n".to_string()],
            vec![vec![Cell::Number(1.5)]],
        );
        let mut buffer = Cursor::new(Vec::new());
        write_xlsx(&table, &mut buffer).unwrap();

        let bytes = buffer.into_inner();
        assert!(bytes.starts_with(b"PK"));
    }
}
