// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! Page-specific knowledge of the results site: **where the ground truth
//! lives in the HTML** and how to read it.
//!
//! ## What lives here
//! - **Pure HTML parsing** of the two page kinds: a student's detail page
//!   (`student`) and a school's paginated listing (`school`).
//! - **The cell layout** of the detail page as data (`layout`), so a shifted
//!   cell is a one-line edit.
//! - Fetching a single page through `core::net::open_link`.
//!
//! ## What does **not** live here
//! - **Aggregation and ordering** of records (`scrape`).
//! - **Export formatting** (`file`, `export`).
//! - **Error reporting**: specs return typed errors; the CLI prints them.
//!
//! ## Typical call chain
//! ```text
//! cli → scrape::collect → scrape::build_school → specs::school::{fetch_listing, parse_listing}
//!                       ↘ specs::student::fetch_student → specs::layout
//! ```
//!
//! ## Testing notes
//! Specs are testable **offline**: `parse_*` take page text, and every fetch
//! goes through the `Transport` trait so tests can serve canned pages.
pub mod layout;
pub mod school;
pub mod student;
