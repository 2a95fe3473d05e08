// src/specs/layout.rs
//! Declarative description of where fields sit in a result table body.
//!
//! A detail page carries three `<tbody>` sections whose cells are read by
//! position. Each section is a `SectionLayout`: an ordered list of
//! `FieldSpec`s saying where the label comes from and which cell holds the
//! value. When the site shifts a cell, edit the tables below, not the code.

use crate::config::consts::{RANK_GOVERNORATE, RANK_NATIONAL, RANK_SECTION};
use crate::store::Section;

/// Where a field's label comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Label {
    /// Text of the cell at this index.
    Cell(usize),
    /// A fixed name (the page has no usable label cell).
    Fixed(&'static str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub label: Label,
    pub value: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionLayout {
    pub name: &'static str,
    pub fields: Vec<FieldSpec>,
}

impl SectionLayout {
    /// Label/value pairs laid out `stride` cells apart, one pair per entry
    /// of `pairs` (pair `p` starts at cell `p * stride`).
    pub fn pairs(name: &'static str, pairs: impl IntoIterator<Item = usize>, stride: usize) -> Self {
        let fields = pairs
            .into_iter()
            .map(|p| FieldSpec { label: Label::Cell(p * stride), value: p * stride + 1 })
            .collect();
        Self { name, fields }
    }

    pub fn fixed(name: &'static str, cells: &[(&'static str, usize)]) -> Self {
        let fields = cells
            .iter()
            .map(|&(label, value)| FieldSpec { label: Label::Fixed(label), value })
            .collect();
        Self { name, fields }
    }

    /// Highest cell index this layout reads, plus one.
    pub fn min_cells(&self) -> usize {
        self.fields
            .iter()
            .map(|f| match f.label {
                Label::Cell(i) => i.max(f.value),
                Label::Fixed(_) => f.value,
            })
            .max()
            .map_or(0, |m| m + 1)
    }

    /// Read every field out of `cells`. `None` when the row is too short.
    pub fn extract(&self, cells: &[String]) -> Option<Section> {
        if cells.len() < self.min_cells() {
            return None;
        }
        let mut out = Section::new();
        for f in &self.fields {
            let label = match f.label {
                Label::Cell(i) => cells[i].as_str(),
                Label::Fixed(s) => s,
            };
            out.insert(label, cells[f.value].as_str());
        }
        Some(out)
    }
}

/// Pair indices walked in the info table: 11 pairs, with one pair skipped
/// after the 3rd and after the 8th (merged rows on the page).
const INFO_PAIRS: [usize; 11] = [0, 1, 2, 4, 5, 6, 7, 9, 10, 11, 12];

const MARK_PAIRS: usize = 16;

/// The three sections of a student detail page, in page order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentLayout {
    pub info: SectionLayout,
    pub marks: SectionLayout,
    pub ranks: SectionLayout,
}

impl Default for StudentLayout {
    fn default() -> Self {
        Self {
            info: SectionLayout::pairs("info", INFO_PAIRS, 2),
            // label, value, spacer
            marks: SectionLayout::pairs("marks", 0..MARK_PAIRS, 3),
            ranks: SectionLayout::fixed(
                "ranks",
                &[(RANK_NATIONAL, 2), (RANK_SECTION, 5), (RANK_GOVERNORATE, 8)],
            ),
        }
    }
}
