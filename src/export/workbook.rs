// src/export/workbook.rs
//
// Minimal XLSX writer: one worksheet, every cell an inline string so the
// values keep exactly what the site showed (leading zeros, `%` signs, ...).
// An XLSX file is a zip of a handful of XML parts; only the parts a reader
// needs are written.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use quick_xml::escape::escape;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::config::consts::SHEET_NAME;
use crate::error::ExportError;
use crate::store::ResultSet;

pub fn write_workbook(path: &Path, headers: &[String], results: &ResultSet) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
    write_workbook_to_writer(BufWriter::new(file), headers, results.rows())?;
    Ok(())
}

pub fn write_workbook_to_writer<W: Write + Seek>(
    writer: W,
    headers: &[String],
    rows: impl Iterator<Item = Vec<String>>,
) -> Result<W, ExportError> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", options)?;
    write_part(&mut zip, CONTENT_TYPES_XML)?;

    zip.start_file("_rels/.rels", options)?;
    write_part(&mut zip, ROOT_RELS_XML)?;

    zip.start_file("xl/workbook.xml", options)?;
    write_part(&mut zip, &workbook_xml(SHEET_NAME))?;

    zip.start_file("xl/_rels/workbook.xml.rels", options)?;
    write_part(&mut zip, WORKBOOK_RELS_XML)?;

    zip.start_file("xl/styles.xml", options)?;
    write_part(&mut zip, STYLES_XML)?;

    zip.start_file("xl/worksheets/sheet1.xml", options)?;
    write_part(&mut zip, &sheet_xml(headers, rows))?;

    let mut inner = zip.finish()?;
    inner.flush().map_err(zip::result::ZipError::Io)?;
    Ok(inner)
}

fn write_part<W: Write + Seek>(zip: &mut ZipWriter<W>, xml: &str) -> Result<(), ExportError> {
    zip.write_all(xml.as_bytes()).map_err(zip::result::ZipError::Io)?;
    Ok(())
}

fn sheet_xml(headers: &[String], rows: impl Iterator<Item = Vec<String>>) -> String {
    let mut xml = String::from(concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        "\n",
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    ));
    push_row(&mut xml, 1, headers);
    for (i, row) in rows.enumerate() {
        push_row(&mut xml, i + 2, &row);
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

fn push_row(xml: &mut String, r: usize, cells: &[String]) {
    xml.push_str(&format!(r#"<row r="{r}">"#));
    for (c, value) in cells.iter().enumerate() {
        let text = xml_safe(value);
        xml.push_str(&format!(
            r#"<c r="{}{r}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
            column_name(c),
            escape(text.as_str())
        ));
    }
    xml.push_str("</row>");
}

/// Zero-based column index to spreadsheet letters: 0 -> A, 25 -> Z, 26 -> AA.
pub fn column_name(mut idx: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (idx % 26) as u8);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// Drop characters XML 1.0 cannot carry.
fn xml_safe(s: &str) -> String {
    s.chars()
        .filter(|&c| matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}'))
        .collect()
}

fn workbook_xml(sheet: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" "#,
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
            r#"<sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        ),
        escape(sheet)
    )
}

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts><fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills><borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs></styleSheet>"#;
