// src/core/net.rs
//
// Blocking HTTP over reqwest. One request in flight at a time.
// Retries cover transport failures only; any HTTP status (including
// redirects, which are never followed) comes back as page content.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use tracing::{debug, warn};
use url::Url;

use crate::config::consts::{SEAT_PATH, USER_AGENT};
use crate::config::options::NetOptions;
use crate::core::html::{charset_param, decode_page};
use crate::error::ScrapeError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Anything that can turn a link into page text.
/// `fields` are form-encoded for POST and ignored for GET.
pub trait Transport {
    fn request(&self, method: Method, link: &str, fields: &[(&str, String)]) -> Result<String, ScrapeError>;
}

pub struct HttpClient {
    client: Client,
    retries: u32,
}

impl HttpClient {
    pub fn new(net: &NetOptions) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(net.timeout)
            .connect_timeout(net.timeout)
            .redirect(Policy::none())
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, retries: net.retries })
    }

    fn send_once(&self, method: Method, link: &str, fields: &[(&str, String)]) -> reqwest::Result<String> {
        let req = match method {
            Method::Get => self.client.get(link),
            Method::Post => self.client.post(link).form(fields),
        };
        let resp = req.send()?;
        debug!(link, status = %resp.status(), "response");
        let declared = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(charset_param)
            .map(String::from);
        let bytes = resp.bytes()?;
        Ok(decode_page(&bytes, declared.as_deref()))
    }
}

impl Transport for HttpClient {
    fn request(&self, method: Method, link: &str, fields: &[(&str, String)]) -> Result<String, ScrapeError> {
        let mut attempt = 0;
        loop {
            match self.send_once(method, link, fields) {
                Ok(body) => return Ok(body),
                Err(e) if attempt < self.retries && is_transient(&e) => {
                    attempt += 1;
                    debug!(link, attempt, error = %e, "retrying");
                    thread::sleep(Duration::from_millis(100 * u64::from(attempt)));
                }
                Err(source) => return Err(ScrapeError::Network { link: s!(link), source }),
            }
        }
    }
}

fn is_transient(e: &reqwest::Error) -> bool {
    e.is_timeout() || e.is_connect() || e.is_request() || e.is_body()
}

/// Fetch a page, logging and swallowing failures.
/// Callers see empty content and fail on the missing table instead.
pub fn open_link(transport: &dyn Transport, method: Method, link: &str, fields: &[(&str, String)]) -> String {
    match transport.request(method, link, fields) {
        Ok(body) => body,
        Err(e) => {
            warn!("Link cannot be open: {link}: {e}");
            s!()
        }
    }
}

/* ---------------- Links ---------------- */

/// Site root that seat numbers and listing hrefs resolve against.
#[derive(Clone, Debug)]
pub struct Site {
    base: Url,
}

impl Site {
    pub fn new(base_url: &str) -> Result<Self, ScrapeError> {
        let mut base = parse_link(base_url)?;
        // Url::join drops the last segment unless the path ends in '/'
        if !base.path().ends_with('/') {
            let path = join!(base.path(), "/");
            base.set_path(&path);
        }
        Ok(Self { base })
    }

    pub fn seat_link(&self, seat: u64) -> String {
        join!(self.base.as_str(), SEAT_PATH, &seat.to_string())
    }

    /// Resolve an href found on a listing page.
    pub fn resolve(&self, href: &str) -> Result<String, ScrapeError> {
        self.base
            .join(href.trim())
            .map(String::from)
            .map_err(|source| ScrapeError::InvalidLink { link: s!(href), source })
    }
}

/// Accept links typed without a scheme (`natiga.nezakr.org/...`).
pub fn parse_link(link: &str) -> Result<Url, ScrapeError> {
    let link = link.trim();
    let with_scheme = if link.contains("://") { s!(link) } else { join!("http://", link) };
    Url::parse(&with_scheme).map_err(|source| ScrapeError::InvalidLink { link: s!(link), source })
}
