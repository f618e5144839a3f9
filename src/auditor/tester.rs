// src/auditor/tester.rs
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;
use futures::stream::{self, StreamExt};
use reqwest::Url;
use tokio::sync::watch;
use crate::core::config::Config;
use crate::generators::generate_strong_password;
use crate::importers::CsvImporter;
use crate::models::{AuditRequest, Credential, StrengthLabel, TestResult, TestStatus};
use crate::strength;
use super::transport::{HttpTransport, LoginResponse, LoginTransport, TransportError};
use super::{AuditError, BatchSummary};

pub const CANCELLED_MESSAGE: &str = "cancelled before completion";
pub const DEADLINE_MESSAGE: &str = "batch deadline exceeded";

#[derive(Debug, Clone)]
pub struct TesterOptions {
    /// Maximum number of login attempts in flight
    pub concurrency: usize,
    pub request_timeout: Option<Duration>,
    pub batch_deadline: Option<Duration>,
    pub suggested_password_length: usize,
}

impl Default for TesterOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for TesterOptions {
    fn from(config: &Config) -> Self {
        Self {
            concurrency: config.concurrency.max(1),
            request_timeout: config.request_timeout,
            batch_deadline: config.batch_deadline,
            suggested_password_length: config.suggested_password_length,
        }
    }
}

/// Trigger side of a batch cancellation.
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// Observed side of a batch cancellation. A signal whose handle was dropped
/// without cancelling never fires.
#[derive(Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

impl CancelSignal {
    pub fn never() -> Self {
        cancel_pair().1
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    async fn cancelled(&mut self) {
        if self.rx.wait_for(|cancelled| *cancelled).await.is_err() {
            futures::future::pending::<()>().await;
        }
    }
}

pub fn cancel_pair() -> (CancelHandle, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelSignal { rx })
}

/// A response counts as a successful login when it is OK after redirects and
/// did not land on a page whose URL mentions "login". Everything else fails.
pub fn classify(response: &LoginResponse) -> TestStatus {
    if response.status < 400 && !response.final_url.to_lowercase().contains("login") {
        TestStatus::Success
    } else {
        TestStatus::Fail
    }
}

pub struct CredentialTester {
    transport: Arc<dyn LoginTransport>,
    options: TesterOptions,
}

impl CredentialTester {
    pub fn new(transport: Arc<dyn LoginTransport>, mut options: TesterOptions) -> Self {
        options.concurrency = options.concurrency.max(1);
        Self { transport, options }
    }

    pub fn from_config(config: &Config) -> Result<Self, AuditError> {
        let transport = HttpTransport::new(config.max_redirects, config.request_timeout)?;
        Ok(Self::new(Arc::new(transport), TesterOptions::from(config)))
    }

    pub fn options(&self) -> &TesterOptions {
        &self.options
    }

    /// Validate the request, load the credential table, then test every row.
    ///
    /// Input problems are reported before any request is sent.
    pub async fn audit_table<R: Read>(
        &self,
        request: &AuditRequest,
        table: R,
        cancel: CancelSignal,
    ) -> Result<Vec<TestResult>, AuditError> {
        request.validate()?;
        let credentials = CsvImporter::new().load_credentials(table)?;
        self.test_with_cancel(request, credentials, cancel).await
    }

    pub async fn test(
        &self,
        request: &AuditRequest,
        credentials: Vec<Credential>,
    ) -> Result<Vec<TestResult>, AuditError> {
        self.test_with_cancel(request, credentials, CancelSignal::never()).await
    }

    /// Test every credential and return one result per credential in
    /// completion order.
    ///
    /// When `cancel` fires or the batch deadline passes, no further attempts
    /// are made and every unfinished credential gets an `Error` result.
    pub async fn test_with_cancel(
        &self,
        request: &AuditRequest,
        credentials: Vec<Credential>,
        mut cancel: CancelSignal,
    ) -> Result<Vec<TestResult>, AuditError> {
        let url = request.validate()?;
        let fields = (request.username_field.as_str(), request.password_field.as_str());
        let total = credentials.len();

        log::info!(
            "Testing {} credentials against {} (concurrency {})",
            total, url, self.options.concurrency
        );

        let mut results = Vec::with_capacity(total);
        let mut completed = vec![false; total];

        let interruption = {
            let url = &url;
            let mut attempts = stream::iter(credentials.iter().enumerate())
                .map(|(idx, credential)| async move {
                    (idx, self.test_single(url, fields, credential).await)
                })
                .buffer_unordered(self.options.concurrency);

            let deadline = async {
                match self.options.batch_deadline {
                    Some(limit) => tokio::time::sleep(limit).await,
                    None => futures::future::pending::<()>().await,
                }
            };
            tokio::pin!(deadline);

            loop {
                tokio::select! {
                    next = attempts.next() => match next {
                        Some((idx, result)) => {
                            completed[idx] = true;
                            results.push(result);
                        }
                        None => break None,
                    },
                    _ = &mut deadline => break Some(DEADLINE_MESSAGE),
                    _ = cancel.cancelled() => break Some(CANCELLED_MESSAGE),
                }
            }
        };

        if let Some(reason) = interruption {
            let unfinished = completed.iter().filter(|done| !**done).count();
            log::warn!("Batch interrupted ({}), {} credentials not tested", reason, unfinished);

            for (credential, done) in credentials.into_iter().zip(completed) {
                if !done {
                    results.push(TestResult::error(credential, reason));
                }
            }
        }

        let summary = BatchSummary::from_results(&results);
        log::info!(
            "Batch finished: {} succeeded, {} failed, {} errors, {} weak passwords",
            summary.succeeded, summary.failed, summary.errored, summary.weak_passwords
        );

        Ok(results)
    }

    async fn test_single(&self, url: &Url, fields: (&str, &str), credential: &Credential) -> TestResult {
        let form = vec![
            (fields.0.to_string(), credential.username.clone()),
            (fields.1.to_string(), credential.password.clone()),
        ];

        let submission = self.transport.submit(url, form);
        let outcome = match self.options.request_timeout {
            Some(limit) => match tokio::time::timeout(limit, submission).await {
                Ok(outcome) => outcome,
                Err(_) => Err(TransportError::Timeout(limit)),
            },
            None => submission.await,
        };

        match outcome {
            Ok(response) => {
                let status = classify(&response);
                log::debug!(
                    "Login attempt for '{}': {} (HTTP {}, landed on {})",
                    credential.username, status, response.status, response.final_url
                );
                self.score(credential, status)
            }
            Err(e) => {
                log::warn!("Login attempt for '{}' errored: {}", credential.username, e);
                TestResult::error(credential.clone(), e.to_string())
            }
        }
    }

    fn score(&self, credential: &Credential, status: TestStatus) -> TestResult {
        let verdict = strength::evaluate(&credential.password);
        let suggested_password = (verdict.label == StrengthLabel::Weak)
            .then(|| generate_strong_password(self.options.suggested_password_length));

        TestResult {
            username: credential.username.clone(),
            password: credential.password.clone(),
            status,
            strength: Some(verdict),
            suggested_password,
            error: None,
        }
    }
}
