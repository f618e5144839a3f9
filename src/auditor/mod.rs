// src/auditor/mod.rs
use reqwest::Url;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use utoipa::ToSchema;
use crate::importers::CsvImportError;
use crate::models::{AuditRequest, TestResult, TestStatus};

pub mod tester;
pub mod transport;

pub use tester::{cancel_pair, classify, CancelHandle, CancelSignal, CredentialTester, TesterOptions};
pub use transport::{HttpTransport, LoginResponse, LoginTransport, TransportError};

/// Problems that reject a whole batch before any login attempt is made.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Missing {0}")]
    MissingParameter(&'static str),

    #[error("Invalid target URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Username and password fields must differ (both are '{0}')")]
    DuplicateField(String),

    #[error(transparent)]
    Import(#[from] CsvImportError),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl AuditRequest {
    /// Check the request parameters and return the parsed target URL.
    pub fn validate(&self) -> Result<Url, AuditError> {
        let raw = self.url.trim();
        if raw.is_empty() {
            return Err(AuditError::MissingParameter("URL"));
        }
        if self.username_field.is_empty() {
            return Err(AuditError::MissingParameter("username field"));
        }
        if self.password_field.is_empty() {
            return Err(AuditError::MissingParameter("password field"));
        }
        if self.username_field == self.password_field {
            return Err(AuditError::DuplicateField(self.username_field.clone()));
        }

        let url = Url::parse(raw).map_err(|e| AuditError::InvalidUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(AuditError::InvalidUrl {
                url: raw.to_string(),
                reason: format!("unsupported scheme '{}'", other),
            }),
        }
    }
}

/// Per-status counts over a finished batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub errored: usize,
    pub weak_passwords: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[TestResult]) -> Self {
        let mut summary = BatchSummary {
            total: results.len(),
            ..Default::default()
        };

        for result in results {
            match result.status {
                TestStatus::Success => summary.succeeded += 1,
                TestStatus::Fail => summary.failed += 1,
                TestStatus::Error => summary.errored += 1,
            }
            if result.is_weak() {
                summary.weak_passwords += 1;
            }
        }

        summary
    }
}
