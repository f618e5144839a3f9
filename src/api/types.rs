// src/api/types.rs
use serde::{Serialize, Deserialize};
use utoipa::{IntoParams, ToSchema};
use crate::auditor::BatchSummary;
use crate::models::{Credential, StrengthVerdict, TestResult};

// Audit requests and responses
#[derive(Serialize, Deserialize, ToSchema)]
pub struct AuditUploadForm {
    /// CSV file with `username` and `password` columns
    #[schema(value_type = String, format = Binary)]
    pub file: String,
    /// Login form URL to submit credentials to
    pub url: String,
    /// Form field name carrying the username
    pub username_field: String,
    /// Form field name carrying the password
    pub password_field: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct AuditJsonRequest {
    /// Login form URL to submit credentials to
    pub url: String,
    /// Form field name carrying the username
    pub username_field: String,
    /// Form field name carrying the password
    pub password_field: String,
    /// Credentials to test
    pub credentials: Vec<Credential>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct AuditResponse {
    /// Whether the batch ran
    pub success: bool,
    /// Counts per outcome (only present on success)
    pub summary: Option<BatchSummary>,
    /// One result per credential, in completion order
    pub results: Vec<TestResult>,
    /// Error message (only present on failure)
    pub error: Option<String>,
}

impl AuditResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            summary: None,
            results: Vec::new(),
            error: Some(message.into()),
        }
    }
}

// Strength and generator types
#[derive(Serialize, Deserialize, ToSchema)]
pub struct StrengthRequest {
    /// Password to evaluate
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct StrengthResponse {
    pub success: bool,
    pub verdict: StrengthVerdict,
    /// Replacement suggestion, only for weak passwords
    pub suggested_password: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, IntoParams, Debug)]
#[into_params(parameter_in = Query)]
pub struct PasswordGenerationQuery {
    /// Password length (default: 12)
    pub length: Option<usize>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct PasswordGenerationResponse {
    pub success: bool,
    pub password: Option<String>,
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
