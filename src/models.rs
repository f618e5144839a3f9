// src/models.rs
use std::fmt;
use serde::{Serialize, Deserialize};
use utoipa::ToSchema;

/// A username/password pair under test.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum StrengthLabel {
    Weak,
    Moderate,
    Strong,
}

impl StrengthLabel {
    /// Map a 0-5 check score onto a label.
    pub fn from_score(score: u8) -> Self {
        match score {
            5..=u8::MAX => StrengthLabel::Strong,
            3 | 4 => StrengthLabel::Moderate,
            _ => StrengthLabel::Weak,
        }
    }
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrengthLabel::Weak => write!(f, "Weak"),
            StrengthLabel::Moderate => write!(f, "Moderate"),
            StrengthLabel::Strong => write!(f, "Strong"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StrengthVerdict {
    pub label: StrengthLabel,
    /// Number of passed checks, 0-5
    pub score: u8,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestStatus {
    Success,
    Fail,
    Error,
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Success => write!(f, "SUCCESS"),
            TestStatus::Fail => write!(f, "FAIL"),
            TestStatus::Error => write!(f, "ERROR"),
        }
    }
}

/// Outcome of testing one credential.
///
/// `Error` results never carry a strength verdict or a suggested password;
/// every other result carries a verdict and no error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TestResult {
    pub username: String,
    pub password: String,
    pub status: TestStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<StrengthVerdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TestResult {
    pub fn error(credential: Credential, message: impl Into<String>) -> Self {
        Self {
            username: credential.username,
            password: credential.password,
            status: TestStatus::Error,
            strength: None,
            suggested_password: None,
            error: Some(message.into()),
        }
    }

    pub fn is_weak(&self) -> bool {
        matches!(&self.strength, Some(v) if v.label == StrengthLabel::Weak)
    }
}

/// Target login form description supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuditRequest {
    pub url: String,
    pub username_field: String,
    pub password_field: String,
}

impl AuditRequest {
    pub fn new(
        url: impl Into<String>,
        username_field: impl Into<String>,
        password_field: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            username_field: username_field.into(),
            password_field: password_field.into(),
        }
    }
}

// Password generation options
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PasswordGenerationOptions {
    pub length: usize,
}

impl Default for PasswordGenerationOptions {
    fn default() -> Self {
        Self {
            length: crate::generators::DEFAULT_PASSWORD_LENGTH,
        }
    }
}
