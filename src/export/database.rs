// src/export/database.rs
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use rusqlite::{Connection, params_from_iter};

use crate::config::consts::RESULTS_TABLE;
use crate::error::ExportError;
use crate::store::ResultSet;

/// Write `results` into a fresh SQLite file: one all-`TEXT` table, one
/// column per header. Values are bound, never spliced into SQL.
pub fn write_database(path: &Path, headers: &[String], results: &ResultSet) -> Result<(), ExportError> {
    if path.is_file() {
        fs::remove_file(path).map_err(|e| ExportError::io(path, e))?;
    }
    let mut conn = Connection::open(path)?;
    fill(&mut conn, headers, results)?;
    conn.close().map_err(|(_, e)| e)?;
    Ok(())
}

pub fn fill(conn: &mut Connection, headers: &[String], results: &ResultSet) -> Result<(), ExportError> {
    let columns = unique_columns(headers);
    let ddl = format!(
        "CREATE TABLE {} ({})",
        quote_ident(RESULTS_TABLE),
        columns.iter().map(|c| format!("{} TEXT", quote_ident(c))).collect::<Vec<_>>().join(", ")
    );
    let insert = format!(
        "INSERT INTO {} VALUES ({})",
        quote_ident(RESULTS_TABLE),
        vec!["?"; columns.len()].join(", ")
    );

    let tx = conn.transaction()?;
    tx.execute(&ddl, ())?;
    {
        let mut stmt = tx.prepare(&insert)?;
        for row in results.rows() {
            stmt.execute(params_from_iter(row.iter()))?;
        }
    }
    tx.commit()?;
    Ok(())
}

/// Double-quoted SQL identifier; embedded quotes are doubled.
pub fn quote_ident(name: &str) -> String {
    join!("\"", &name.replace('"', "\"\""), "\"")
}

/// Column names as given, except a repeat becomes `name (2)`, `name (3)`, ...
/// SQLite refuses duplicate column names.
pub fn unique_columns(headers: &[String]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(headers.len());
    for h in headers {
        let mut n = *seen.entry(h.to_ascii_lowercase()).and_modify(|c| *c += 1).or_insert(1);
        let mut name = if n == 1 { h.clone() } else { format!("{h} ({n})") };
        // a generated name may itself collide with a real header
        while n > 1 && seen.contains_key(&name.to_ascii_lowercase()) {
            n += 1;
            name = format!("{h} ({n})");
        }
        if n > 1 {
            seen.insert(name.to_ascii_lowercase(), 1);
        }
        out.push(name);
    }
    out
}
