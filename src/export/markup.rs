// src/export/markup.rs
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use html_escape::encode_text;

use crate::error::ExportError;
use crate::store::ResultSet;

/// Write `<path>` as a UTF-8 HTML document holding one table.
pub fn write_markup(path: &Path, headers: &[String], results: &ResultSet) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
    let mut out = BufWriter::new(file);
    write_document(&mut out, headers, results.rows())
        .and_then(|_| out.flush())
        .map_err(|e| ExportError::io(path, e))
}

pub fn write_document<W: Write>(
    mut w: W,
    headers: &[String],
    rows: impl Iterator<Item = Vec<String>>,
) -> io::Result<()> {
    writeln!(w, "<!DOCTYPE html>")?;
    writeln!(w, "<html><head><meta charset=\"utf-8\"></head><body>")?;
    write!(w, "<table>")?;
    write_row(&mut w, "th", headers)?;
    for row in rows {
        write_row(&mut w, "td", &row)?;
    }
    writeln!(w, "</table>")?;
    writeln!(w, "</body></html>")
}

/// One `<tr>` of `tag` cells, text escaped.
pub fn write_row<W: Write>(mut w: W, tag: &str, row: &[String]) -> io::Result<()> {
    write!(w, "<tr>")?;
    for cell in row {
        write!(w, "<{tag}>{}</{tag}>", encode_text(cell))?;
    }
    writeln!(w, "</tr>")
}
