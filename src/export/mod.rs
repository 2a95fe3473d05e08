// src/export/mod.rs
//
// One writer per output format. Each takes the header row and the result
// set and writes a single file; `file::export_dataset` picks which ones run.

pub mod database;
pub mod markup;
pub mod workbook;
