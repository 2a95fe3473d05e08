// src/core/html.rs
//
// Thin layer over `scraper`: parse once, hand out table bodies and cell text.

use encoding_rs::{Encoding, UTF_8, WINDOWS_1256};
use scraper::{ElementRef, Html, Selector};

use super::sanitize::normalize_ws;
use crate::error::ScrapeError;

pub const TBODY: &str = "tbody";

pub struct Page {
    doc: Html,
}

impl Page {
    pub fn parse(text: &str) -> Self {
        Self { doc: Html::parse_document(text) }
    }

    /// All `<tbody>` elements in document order.
    pub fn tbodies(&self) -> Vec<ElementRef<'_>> {
        self.doc.select(&selector(TBODY)).collect()
    }

    /// First `n` table bodies, or `InvalidPage` if the page has fewer.
    pub fn require_tbodies(&self, n: usize) -> Result<Vec<ElementRef<'_>>, ScrapeError> {
        let mut bodies = self.tbodies();
        if bodies.len() < n {
            return Err(ScrapeError::InvalidPage {
                marker: format!("{TBODY} #{} of {n}", bodies.len() + 1),
            });
        }
        bodies.truncate(n);
        Ok(bodies)
    }

    /// Every element matching a CSS selector, in document order.
    pub fn find_all(&self, css: &str) -> Vec<ElementRef<'_>> {
        self.doc.select(&selector(css)).collect()
    }
}

/// Ordered, normalized text of every `<td>` under `el`.
pub fn cell_texts(el: ElementRef<'_>) -> Vec<String> {
    el.select(&selector("td")).map(text_of).collect()
}

pub fn rows(el: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    el.select(&selector("tr")).collect()
}

pub fn cells(row: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    row.select(&selector("td")).collect()
}

/// `href` of the first anchor inside `el`.
pub fn first_href(el: ElementRef<'_>) -> Option<String> {
    el.select(&selector("a[href]"))
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(String::from)
}

pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

/* ---------------- Decoding ---------------- */

// How far into a page to look for a `<meta>` charset.
const META_SNIFF_LEN: usize = 1024;

/// Page bytes to text. A BOM wins, then the charset `declared` in the
/// response header, then one declared in a `<meta>` tag, then UTF-8.
/// Undeclared bytes that are not valid UTF-8 are read as windows-1256,
/// the legacy Arabic code page.
pub fn decode_page(bytes: &[u8], declared: Option<&str>) -> String {
    let label = declared.map(String::from).or_else(|| meta_charset(bytes));
    if let Some(encoding) = label.and_then(|l| Encoding::for_label(l.trim().as_bytes())) {
        return encoding.decode(bytes).0.into_owned();
    }
    let (text, _, malformed) = UTF_8.decode(bytes);
    if !malformed {
        return text.into_owned();
    }
    WINDOWS_1256.decode(bytes).0.into_owned()
}

/// Value of a `charset=` parameter, e.g. from `text/html; charset=utf-8`.
pub fn charset_param(s: &str) -> Option<&str> {
    let lower = s.to_ascii_lowercase();
    let start = lower.find("charset=")? + "charset=".len();
    let rest = s[start..].trim_start_matches(['"', '\'', ' ']);
    let end = rest.find(|c: char| matches!(c, '"' | '\'' | ';' | ' ' | '>' | '/')).unwrap_or(rest.len());
    Some(&rest[..end]).filter(|l| !l.is_empty())
}

fn meta_charset(bytes: &[u8]) -> Option<String> {
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(META_SNIFF_LEN)]);
    let lower = head.to_ascii_lowercase();
    let meta = lower.find("<meta")?;
    charset_param(&head[meta..]).map(String::from)
}

// Selectors in this crate are literals; a bad one is a bug, not input.
fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e}"))
}
