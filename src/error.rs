// src/error.rs
use std::fmt;

use thiserror::Error;

/// How a student was asked for: by seat number or by detail-page link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StudentRef {
    Seat(u64),
    Link(String),
}

impl StudentRef {
    /// Seat wins when both are given; neither is a usage error.
    pub fn from_parts(seat: Option<u64>, link: Option<&str>) -> Result<Self, ScrapeError> {
        match (seat, link) {
            (Some(seat), _) => Ok(StudentRef::Seat(seat)),
            (None, Some(link)) => Ok(StudentRef::Link(link.to_string())),
            (None, None) => Err(ScrapeError::MissingIdentifier),
        }
    }
}

impl fmt::Display for StudentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudentRef::Seat(seat) => write!(f, "Seat Number: {seat}"),
            StudentRef::Link(link) => write!(f, "Student Link: {link}"),
        }
    }
}

/// Failures while collecting records. All but `MissingIdentifier` are
/// per-input: they get collected and reported, and the run goes on.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("expected `{marker}` not found in page")]
    InvalidPage { marker: String },

    #[error("Invalid {id} ({reason})")]
    InvalidStudent { id: StudentRef, reason: String },

    #[error("Invalid School Link: {link} ({reason})")]
    InvalidSchool { link: String, reason: String },

    #[error("a link or a seat number must be provided")]
    MissingIdentifier,

    #[error("{id} has {found} columns, expected {expected}; record dropped")]
    ShapeMismatch { id: StudentRef, expected: usize, found: usize },

    #[error("link cannot be parsed: {link}")]
    InvalidLink {
        link: String,
        #[source]
        source: url::ParseError,
    },

    #[error("link cannot be opened: {link}")]
    Network {
        link: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Failures while writing output files. These end the run.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no student records were collected; nothing to export")]
    EmptyResultSet,

    #[error("cannot write {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("database export failed")]
    Database(#[from] rusqlite::Error),

    #[error("workbook archive failed")]
    Archive(#[from] zip::result::ZipError),
}

impl ExportError {
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        ExportError::Io { path: path.display().to_string(), source }
    }
}
