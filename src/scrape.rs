// src/scrape.rs
//
// Collector: runs schools and seats through the page specs and gathers
// every record (and every failure) into one `Collection`. No IO besides
// the fetches themselves; reporting is left to the caller.

use tracing::{debug, info, warn};

use crate::{
    config::options::ScrapeOptions,
    core::net::{Site, Transport, parse_link},
    error::{ScrapeError, StudentRef},
    progress::Progress,
    specs::{
        layout::StudentLayout,
        school::{fetch_listing, parse_listing},
        student::fetch_student,
    },
    store::{ResultSet, StudentRecord},
};

/// Everything a run produced: records in `results`, per-input failures in
/// `errors`, both in the order they happened.
#[derive(Debug, Default)]
pub struct Collection {
    pub results: ResultSet,
    pub errors: Vec<ScrapeError>,
}

impl Collection {
    pub fn new() -> Self { Self::default() }

    /// File one build outcome. Returns whether a record was kept.
    pub fn add(&mut self, outcome: Result<StudentRecord, ScrapeError>) -> bool {
        match outcome.and_then(|record| self.results.push(record)) {
            Ok(()) => true,
            Err(e) => {
                debug!(error = %e, "student skipped");
                self.errors.push(e);
                false
            }
        }
    }
}

/// Collect every requested school, then every requested seat.
/// Sorts by total unless exactly one school (and no seat) was asked for.
pub fn collect(
    scrape: &ScrapeOptions,
    site: &Site,
    transport: &dyn Transport,
    mut progress: Option<&mut dyn Progress>,
) -> Collection {
    let layout = StudentLayout::default();
    let mut collection = Collection::new();

    if let Some(p) = progress.as_deref_mut() {
        p.begin(scrape.total_inputs());
    }

    for link in &scrape.schools {
        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!("School {link}"));
        }
        let before = collection.results.len();
        let outcome = build_school(transport, site, &layout, link, &mut collection);
        // a school that stopped part way still counts as done if it kept records
        let kept = collection.results.len() - before;
        let done = match outcome {
            Ok(n) => {
                info!(school = %link, students = n, "school done");
                true
            }
            Err(e) => {
                if kept > 0 {
                    warn!(school = %link, students = kept, "school stopped early");
                }
                collection.errors.push(e);
                kept > 0
            }
        };
        if let Some(p) = progress.as_deref_mut() {
            if done { p.item_done(link) } else { p.item_failed(link) }
        }
    }

    for &seat in &scrape.seats {
        let kept = collection.add(fetch_student(transport, site, &layout, StudentRef::Seat(seat)));
        if let Some(p) = progress.as_deref_mut() {
            let label = seat.to_string();
            if kept { p.item_done(&label) } else { p.item_failed(&label) }
        }
    }

    if scrape.needs_sort() {
        collection.results.sort_by_total_desc();
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    collection
}

/// Walk every listing page of one school, building each listed student
/// into `collection`. Returns how many records were kept.
///
/// A school whose first page has no result table yields `InvalidSchool`
/// and nothing else. A later page without one stops the walk; whatever
/// was collected before stays.
pub fn build_school(
    transport: &dyn Transport,
    site: &Site,
    layout: &StudentLayout,
    link: &str,
    collection: &mut Collection,
) -> Result<usize, ScrapeError> {
    let invalid = |reason: String| ScrapeError::InvalidSchool { link: s!(link), reason };

    let url = parse_link(link).map_err(|e| invalid(e.to_string()))?.to_string();
    let mut listing = parse_listing(&fetch_listing(transport, &url, 1)).map_err(|e| invalid(e.to_string()))?;
    let last = listing.last_page;
    info!(school = %link, pages = last, "school listing");

    let mut built = 0;
    for page in 1..=last {
        if listing.skipped_rows > 0 {
            debug!(page, rows = listing.skipped_rows, "rows without a student link");
        }
        for href in &listing.student_hrefs {
            let outcome = site
                .resolve(href)
                .and_then(|student| fetch_student(transport, site, layout, StudentRef::Link(student)));
            if collection.add(outcome) {
                built += 1;
            }
        }
        if page < last {
            let next = page + 1;
            listing = parse_listing(&fetch_listing(transport, &url, next))
                .map_err(|e| invalid(format!("page {next}: {e}")))?;
        }
    }
    Ok(built)
}
