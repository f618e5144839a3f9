// src/importers/mod.rs

pub mod csv;

pub use self::csv::{CsvImporter, CsvImportError};
