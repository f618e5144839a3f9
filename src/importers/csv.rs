// src/importers/csv.rs
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use crate::models::Credential;

pub const USERNAME_COLUMN: &str = "username";
pub const PASSWORD_COLUMN: &str = "password";

#[derive(Debug, Error)]
pub enum CsvImportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV format error: {0}")]
    FormatError(#[from] ::csv::Error),

    #[error("CSV file is missing the '{0}' column")]
    MissingColumn(&'static str),
}

/// Loads the credential table an audit runs against.
///
/// The header row must name `username` and `password`; every other column is
/// ignored. Any malformed row fails the whole load.
pub struct CsvImporter {
    delimiter: u8,
}

impl CsvImporter {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    pub fn load_credentials_from_path(&self, path: &Path) -> Result<Vec<Credential>, CsvImportError> {
        let file = File::open(path)?;
        self.load_credentials(file)
    }

    pub fn load_credentials<R: Read>(&self, reader: R) -> Result<Vec<Credential>, CsvImportError> {
        let mut reader = ::csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let column = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}') == name)
                .ok_or(CsvImportError::MissingColumn(name))
        };
        let username_idx = column(USERNAME_COLUMN)?;
        let password_idx = column(PASSWORD_COLUMN)?;

        let mut credentials = Vec::new();

        for record in reader.records() {
            let record = record?;
            // Record length always matches the header on a non-flexible reader
            let username = record.get(username_idx).unwrap_or_default();
            let password = record.get(password_idx).unwrap_or_default();
            credentials.push(Credential::new(username, password));
        }

        log::debug!("Loaded {} credentials from CSV", credentials.len());

        Ok(credentials)
    }
}

impl Default for CsvImporter {
    fn default() -> Self {
        Self::new()
    }
}
