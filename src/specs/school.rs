// src/specs/school.rs
//! Scraping *spec* for a school's listing pages.
//!
//! A listing is POSTed with `page=<n>` and `order=mark_desc`. Each page has
//! one `<tbody>` whose rows link to student detail pages from their second
//! cell, and a `.pagination` list whose last numeric entry is the last page.
//!
//! This module only reads pages; walking them and building students is the
//! collector's job (`scrape::build_school`).

use tracing::debug;

use crate::config::consts::{ORDER_FIELD, ORDER_MARK_DESC, PAGE_FIELD};
use crate::core::html::{Page, cells, first_href, rows, text_of};
use crate::core::net::{Method, Transport, open_link};
use crate::core::sanitize::page_number;
use crate::error::ScrapeError;

const PAGINATION_ITEMS: &str = ".pagination li";
const LINK_CELL: usize = 1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingPage {
    /// Raw `href`s of listed students, in row order.
    pub student_hrefs: Vec<String>,
    /// Rows that had no link in their second cell.
    pub skipped_rows: usize,
    pub last_page: u32,
}

/// POST one listing page, ordered by mark descending.
pub fn fetch_listing(transport: &dyn Transport, link: &str, page: u32) -> String {
    debug!(link, page, "fetching listing page");
    let fields = [(PAGE_FIELD, page.to_string()), (ORDER_FIELD, s!(ORDER_MARK_DESC))];
    open_link(transport, Method::Post, link, &fields)
}

pub fn parse_listing(html_doc: &str) -> Result<ListingPage, ScrapeError> {
    let page = Page::parse(html_doc);
    let body = page.require_tbodies(1)?.remove(0);

    let mut student_hrefs = Vec::new();
    let mut skipped_rows = 0;
    for row in rows(body) {
        match cells(row).get(LINK_CELL).and_then(|td| first_href(*td)) {
            Some(href) => student_hrefs.push(href),
            None => skipped_rows += 1,
        }
    }

    Ok(ListingPage { student_hrefs, skipped_rows, last_page: last_page(&page) })
}

/// Last numeric entry of the pagination list, searching from the end so
/// trailing arrows are ignored. No pagination means a single page.
fn last_page(page: &Page) -> u32 {
    page.find_all(PAGINATION_ITEMS)
        .into_iter()
        .rev()
        .find_map(|li| page_number(&text_of(li)))
        .unwrap_or(1)
        .max(1)
}
