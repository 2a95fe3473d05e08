// src/store.rs
//
// In-memory result data: one `StudentRecord` per successfully scraped
// student, gathered into a `ResultSet` that exporters read.

use std::cmp::Ordering;

use crate::config::consts::TOTAL_LABEL;
use crate::core::sanitize::parse_score;
use crate::error::{ExportError, ScrapeError, StudentRef};

/// Insertion-ordered string map. A repeated key keeps its first position
/// and takes the newer value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Section {
    entries: Vec<(String, String)>,
}

impl Section {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StudentRecord {
    pub id: StudentRef,
    pub info: Section,
    pub marks: Section,
    pub ranks: Section,
}

impl StudentRecord {
    /// Column names: info, then marks, then ranks keys.
    pub fn headers(&self) -> Vec<String> {
        self.sections().flat_map(|s| s.keys().map(String::from)).collect()
    }

    /// Cell values in header order.
    pub fn values(&self) -> Vec<String> {
        self.sections().flat_map(|s| s.values().map(String::from)).collect()
    }

    pub fn total(&self) -> Option<f64> {
        self.info.get(TOTAL_LABEL).and_then(parse_score)
    }

    fn sections(&self) -> impl Iterator<Item = &Section> {
        [&self.info, &self.marks, &self.ranks].into_iter()
    }
}

/// Every record collected in a run, in build order until sorted.
#[derive(Clone, Debug, Default)]
pub struct ResultSet {
    records: Vec<StudentRecord>,
}

impl ResultSet {
    pub fn new() -> Self { Self::default() }

    /// Append a record. The first record fixes the header row; a record
    /// with a different one is refused so no exporter misaligns columns.
    pub fn push(&mut self, record: StudentRecord) -> Result<(), ScrapeError> {
        if let Some(first) = self.records.first() {
            let expected = first.headers();
            let found = record.headers();
            if expected != found {
                return Err(ScrapeError::ShapeMismatch {
                    id: record.id,
                    expected: expected.len(),
                    found: found.len(),
                });
            }
        }
        self.records.push(record);
        Ok(())
    }

    /// Descending by total; stable, unparsable totals last.
    pub fn sort_by_total_desc(&mut self) {
        self.records.sort_by(|a, b| match (a.total(), b.total()) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
    }

    /// Header row derived from the first record.
    pub fn headers(&self) -> Result<Vec<String>, ExportError> {
        self.records.first().map(StudentRecord::headers).ok_or(ExportError::EmptyResultSet)
    }

    pub fn rows(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.records.iter().map(StudentRecord::values)
    }

    pub fn records(&self) -> &[StudentRecord] { &self.records }
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
}
