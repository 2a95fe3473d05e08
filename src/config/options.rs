// src/config/options.rs
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
    pub net: NetOptions,
}

/// What to fetch. Both lists may be filled; schools run first.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ScrapeOptions {
    pub seats: Vec<u64>,
    pub schools: Vec<String>,
}

impl ScrapeOptions {
    pub fn new(seats: Vec<u64>, schools: Vec<String>) -> Self {
        Self { seats: dedup_stable(seats), schools: dedup_stable(schools) }
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty() && self.schools.is_empty()
    }

    /// One school alone comes back in the site's own mark order.
    /// Anything else gets merged and must be re-sorted.
    pub fn needs_sort(&self) -> bool {
        !self.seats.is_empty() || self.schools.len() > 1
    }

    pub fn total_inputs(&self) -> usize {
        self.seats.len() + self.schools.len()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ExportFormat {
    Html,
    Excel,
    Sqlite,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Excel => "xlsx",
            ExportFormat::Sqlite => "db",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub formats: Vec<ExportFormat>,
    out_base: OsString, // without extension
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { formats: vec![ExportFormat::Html], out_base: OsString::new() }
    }
}

impl ExportOptions {
    pub fn new(out_base: impl Into<OsString>, formats: Vec<ExportFormat>) -> Self {
        let formats = if formats.is_empty() { vec![ExportFormat::Html] } else { dedup_stable(formats) };
        Self { formats, out_base: out_base.into() }
    }

    /// `<base>.<ext>`. The base is used as given, dots included.
    pub fn out_path(&self, format: ExportFormat) -> PathBuf {
        let mut name = self.out_base.clone();
        name.push(".");
        name.push(format.ext());
        PathBuf::from(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetOptions {
    pub base_url: String,
    pub timeout: Duration,
    pub retries: u32,
}

impl Default for NetOptions {
    fn default() -> Self {
        Self {
            base_url: s!(DEFAULT_BASE_URL),
            timeout: Duration::from_secs(TIMEOUT_SECS),
            retries: RETRIES,
        }
    }
}

fn dedup_stable<T: PartialEq>(items: Vec<T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_path_appends_extension_per_format() {
        let export = ExportOptions::new("out/class.2018", vec![ExportFormat::Excel, ExportFormat::Sqlite]);
        assert_eq!(export.out_path(ExportFormat::Excel), PathBuf::from("out/class.2018.xlsx"));
        assert_eq!(export.out_path(ExportFormat::Sqlite), PathBuf::from("out/class.2018.db"));
        assert_eq!(export.out_path(ExportFormat::Html), PathBuf::from("out/class.2018.html"));
    }

    #[test]
    fn formats_default_to_html_and_dedup() {
        assert_eq!(ExportOptions::new("x", vec![]).formats, vec![ExportFormat::Html]);
        let export = ExportOptions::new("x", vec![ExportFormat::Sqlite, ExportFormat::Html, ExportFormat::Sqlite]);
        assert_eq!(export.formats, vec![ExportFormat::Sqlite, ExportFormat::Html]);
    }

    #[test]
    fn sort_needed_unless_single_school() {
        assert!(!ScrapeOptions::new(vec![], vec![s!("a")]).needs_sort());
        assert!(ScrapeOptions::new(vec![], vec![s!("a"), s!("b")]).needs_sort());
        assert!(ScrapeOptions::new(vec![1], vec![]).needs_sort());
        assert!(ScrapeOptions::new(vec![1], vec![s!("a")]).needs_sort());
        // duplicates collapse before the decision
        assert!(!ScrapeOptions::new(vec![], vec![s!("a"), s!("a")]).needs_sort());
    }
}
