// src/specs/student.rs
//! Scraping *spec* for a student's detail page.
//!
//! The page has three `<tbody>` sections (info, marks, ranks), read by
//! position through `specs::layout::StudentLayout`.

use tracing::debug;

use crate::core::html::{Page, cell_texts};
use crate::core::net::{Method, Site, Transport, open_link};
use crate::error::{ScrapeError, StudentRef};
use crate::specs::layout::StudentLayout;
use crate::store::StudentRecord;

/// Fetch and parse one student, by seat number or by detail link.
/// The record is returned, not stored; the caller owns aggregation.
pub fn build_student(
    transport: &dyn Transport,
    site: &Site,
    seat: Option<u64>,
    link: Option<&str>,
) -> Result<StudentRecord, ScrapeError> {
    let id = StudentRef::from_parts(seat, link)?;
    fetch_student(transport, site, &StudentLayout::default(), id)
}

pub fn fetch_student(
    transport: &dyn Transport,
    site: &Site,
    layout: &StudentLayout,
    id: StudentRef,
) -> Result<StudentRecord, ScrapeError> {
    let link = match &id {
        StudentRef::Seat(seat) => site.seat_link(*seat),
        StudentRef::Link(link) => link.clone(),
    };
    debug!(%id, link = %link, "fetching student");
    let html_doc = open_link(transport, Method::Get, &link, &[]);
    parse_student(&html_doc, layout, id)
}

/// Parse a detail page already in memory.
pub fn parse_student(html_doc: &str, layout: &StudentLayout, id: StudentRef) -> Result<StudentRecord, ScrapeError> {
    let page = Page::parse(html_doc);
    let bodies = match page.require_tbodies(3) {
        Ok(b) => b,
        Err(e) => return Err(ScrapeError::InvalidStudent { id, reason: e.to_string() }),
    };

    let mut sections = Vec::with_capacity(3);
    for (body, section) in bodies.into_iter().zip([&layout.info, &layout.marks, &layout.ranks]) {
        let cells = cell_texts(body);
        match section.extract(&cells) {
            Some(s) => sections.push(s),
            None => {
                let reason = format!(
                    "{} table has {} cells, needs {}",
                    section.name,
                    cells.len(),
                    section.min_cells()
                );
                return Err(ScrapeError::InvalidStudent { id, reason });
            }
        }
    }

    let mut it = sections.into_iter();
    match (it.next(), it.next(), it.next()) {
        (Some(info), Some(marks), Some(ranks)) => Ok(StudentRecord { id, info, marks, ranks }),
        _ => Err(ScrapeError::InvalidStudent { id, reason: s!("incomplete page") }),
    }
}
