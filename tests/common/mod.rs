// tests/common/mod.rs
//
// In-memory results site for the integration tests: canned pages keyed by
// link, a log of every request made, and generators for detail and
// listing pages shaped like the real site's.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use natiga::config::consts::TOTAL_LABEL;
use natiga::core::net::{Method, Site, Transport};
use natiga::error::ScrapeError;

pub const BASE: &str = "http://natiga.test/";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub link: String,
    pub fields: Vec<(String, String)>,
}

impl Request {
    pub fn page(&self) -> Option<&str> {
        self.fields.iter().find(|(k, _)| k == "page").map(|(_, v)| v.as_str())
    }
}

#[derive(Default)]
pub struct FakeSite {
    pages: HashMap<String, String>,
    listings: HashMap<(String, u32), String>,
    pub requests: RefCell<Vec<Request>>,
}

impl FakeSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn site() -> Site {
        Site::new(BASE).unwrap()
    }

    pub fn seat_link(seat: u64) -> String {
        Self::site().seat_link(seat)
    }

    /// Serve a generated detail page for `seat`.
    pub fn with_student(mut self, seat: u64, total: &str) -> Self {
        self.pages.insert(Self::seat_link(seat), student_page(&format!("Student {seat}"), seat, total));
        self
    }

    pub fn with_page(mut self, link: &str, html: String) -> Self {
        self.pages.insert(link.to_string(), html);
        self
    }

    pub fn with_listing(mut self, link: &str, page: u32, html: String) -> Self {
        self.listings.insert((link.to_string(), page), html);
        self
    }

    /// A school whose pages list the given seats, with students served too.
    pub fn with_school(mut self, link: &str, pages: &[&[(u64, &str)]]) -> Self {
        let last = pages.len() as u32;
        for (i, seats) in pages.iter().enumerate() {
            let hrefs: Vec<String> = seats.iter().map(|(s, _)| format!("index.php?t=num&k={s}")).collect();
            self = self.with_listing(link, i as u32 + 1, school_page(&hrefs, last));
            for &(seat, total) in seats.iter() {
                self = self.with_student(seat, total);
            }
        }
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }
}

impl Transport for FakeSite {
    fn request(&self, method: Method, link: &str, fields: &[(&str, String)]) -> Result<String, ScrapeError> {
        let req = Request {
            method,
            link: link.to_string(),
            fields: fields.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
        };
        let body = match method {
            Method::Get => self.pages.get(link).cloned(),
            Method::Post => {
                let page = req.page().and_then(|p| p.parse().ok()).unwrap_or(1);
                self.listings.get(&(link.to_string(), page)).cloned()
            }
        };
        self.requests.borrow_mut().push(req);
        // Unknown links answer like the site does: a page with no result tables.
        Ok(body.unwrap_or_else(|| String::from("<html><body><h1>404 Not Found</h1></body></html>")))
    }
}

/// A site that cannot be reached: every request fails in transport.
#[derive(Default)]
pub struct DeadSite {
    pub attempts: RefCell<usize>,
}

impl Transport for DeadSite {
    fn request(&self, _: Method, link: &str, _: &[(&str, String)]) -> Result<String, ScrapeError> {
        *self.attempts.borrow_mut() += 1;
        Err(ScrapeError::InvalidLink { link: link.to_string(), source: url::ParseError::EmptyHost })
    }
}

/* ---------------- Page generators ---------------- */

fn tr(cells: &[&str]) -> String {
    let tds: String = cells.iter().map(|c| format!("<td>{c}</td>")).collect();
    format!("<tr>{tds}</tr>")
}

/// Info label at pair `p`. Pair 12 is the total; pairs 3 and 8 are the
/// merged rows the parser skips.
pub fn info_label(p: usize) -> String {
    match p {
        0 => String::from("الاسم"),
        1 => String::from("رقم الجلوس"),
        12 => String::from(TOTAL_LABEL),
        _ => format!("info{p}"),
    }
}

pub fn student_page(name: &str, seat: u64, total: &str) -> String {
    student_page_with_marks(name, seat, total, 16)
}

pub fn student_page_with_marks(name: &str, seat: u64, total: &str, mark_rows: usize) -> String {
    let info: String = (0..13)
        .map(|p| {
            let value = match p {
                0 => name.to_string(),
                1 => seat.to_string(),
                12 => total.to_string(),
                _ => format!("v{p}"),
            };
            tr(&[&info_label(p), &value])
        })
        .collect();
    let marks: String = (0..mark_rows)
        .map(|i| tr(&[&format!("subject{i}"), &format!("{}", 30 + i), ""]))
        .collect();
    let ranks = tr(&["national", "", "120", "section", "", "14", "governorate", "", "33"]);
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"></head><body>\
         <table><tbody>{info}</tbody></table>\
         <table><tbody>{marks}</tbody></table>\
         <table><tbody>{ranks}</tbody></table>\
         </body></html>"
    )
}

/// One listing page. Pagination is drawn when `last > 1`, with a
/// trailing arrow after the numbers.
pub fn school_page(hrefs: &[String], last: u32) -> String {
    let rows: String = hrefs
        .iter()
        .enumerate()
        .map(|(i, href)| format!("<tr><td>{}</td><td><a href=\"{href}\">name</a></td><td>x</td></tr>", i + 1))
        .collect();
    let pagination = if last > 1 {
        let items: String = (1..=last).map(|n| format!("<li><a href=\"#\">{n}</a></li>")).collect();
        format!("<ul class=\"pagination\">{items}<li><a href=\"#\">»</a></li></ul>")
    } else {
        String::new()
    };
    format!(
        "<html><body><table><thead><tr><th>#</th><th>Name</th><th>Total</th></tr></thead>\
         <tbody>{rows}</tbody></table>{pagination}</body></html>"
    )
}
