// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::config::options::{ExportFormat, ExportOptions};
use crate::error::ExportError;
use crate::export::{database, markup, workbook};
use crate::store::ResultSet;

/// Write every requested format, in order. `on_written` is told about each
/// file as soon as it is complete. Returns the paths written.
///
/// An empty result set fails before any file is touched.
pub fn export_dataset(
    export: &ExportOptions,
    results: &ResultSet,
    mut on_written: impl FnMut(&Path),
) -> Result<Vec<PathBuf>, ExportError> {
    let headers = results.headers()?;

    let mut written = Vec::with_capacity(export.formats.len());
    for &format in &export.formats {
        let path = export.out_path(format);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                ensure_directory(parent)?;
            }
        }
        write_format(format, &path, &headers, results)?;
        info!(path = %path.display(), rows = results.len(), "export written");
        on_written(&path);
        written.push(path);
    }
    Ok(written)
}

pub fn write_format(
    format: ExportFormat,
    path: &Path,
    headers: &[String],
    results: &ResultSet,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Html => markup::write_markup(path, headers, results),
        ExportFormat::Excel => workbook::write_workbook(path, headers, results),
        ExportFormat::Sqlite => database::write_database(path, headers, results),
    }
}

pub fn ensure_directory(dir: &Path) -> Result<(), ExportError> {
    if dir.exists() && !dir.is_dir() {
        let e = std::io::Error::new(std::io::ErrorKind::AlreadyExists, "path exists but is not a directory");
        return Err(ExportError::io(dir, e));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| ExportError::io(dir, e))?;
    }
    Ok(())
}
