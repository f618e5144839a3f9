use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use futures::future::BoxFuture;
use reqwest::Url;
use credential_auditor::auditor::tester::{CANCELLED_MESSAGE, DEADLINE_MESSAGE};
use credential_auditor::auditor::{
    cancel_pair, AuditError, CredentialTester, LoginResponse, LoginTransport, TesterOptions,
    TransportError,
};
use credential_auditor::importers::CsvImportError;
use credential_auditor::models::{AuditRequest, Credential, StrengthLabel, TestResult, TestStatus};

/// Scripted login target keyed on the submitted username.
///
/// "down-*" users fail at the network level, "hang-*" users never get a
/// response, "bad-*" users land back on the login page, everyone else is
/// let in.
#[derive(Default)]
struct FakeTarget {
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    forms: Mutex<Vec<Vec<(String, String)>>>,
    delay: Option<Duration>,
}

impl FakeTarget {
    fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Default::default()
        }
    }
}

impl LoginTransport for FakeTarget {
    fn submit<'a>(
        &'a self,
        _url: &'a Url,
        form: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<LoginResponse, TransportError>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            self.forms.lock().unwrap().push(form.clone());

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            let username = form[0].1.clone();
            let outcome = if username.starts_with("down-") {
                Err(TransportError::Connection("connection refused".to_string()))
            } else if username.starts_with("hang-") {
                futures::future::pending::<()>().await;
                unreachable!()
            } else if username.starts_with("bad-") {
                Ok(LoginResponse {
                    status: 200,
                    final_url: "http://target.test/login?failed=1".to_string(),
                })
            } else {
                Ok(LoginResponse {
                    status: 200,
                    final_url: "http://target.test/dashboard".to_string(),
                })
            };

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            outcome
        })
    }
}

fn options() -> TesterOptions {
    TesterOptions {
        concurrency: 4,
        request_timeout: None,
        batch_deadline: None,
        suggested_password_length: 12,
    }
}

fn request() -> AuditRequest {
    AuditRequest::new("http://target.test/login", "user", "pass")
}

fn find<'a>(results: &'a [TestResult], username: &str) -> &'a TestResult {
    results
        .iter()
        .find(|r| r.username == username)
        .unwrap_or_else(|| panic!("no result for {username}"))
}

#[tokio::test]
async fn weak_and_strong_passwords_against_permissive_target() {
    let target = Arc::new(FakeTarget::default());
    let tester = CredentialTester::new(target.clone(), options());

    let results = tester
        .test(&request(), vec![
            Credential::new("alice", "abc"),
            Credential::new("bob", "Tr0ub4dor&9!xyz"),
        ])
        .await
        .unwrap();

    assert_eq!(results.len(), 2);

    let alice = find(&results, "alice");
    assert_eq!(alice.status, TestStatus::Success);
    let verdict = alice.strength.as_ref().unwrap();
    assert_eq!(verdict.label, StrengthLabel::Weak);
    assert_eq!(verdict.suggestions.len(), 4);
    assert_eq!(alice.suggested_password.as_ref().map(|p| p.chars().count()), Some(12));
    assert!(alice.error.is_none());

    let bob = find(&results, "bob");
    assert_eq!(bob.status, TestStatus::Success);
    let verdict = bob.strength.as_ref().unwrap();
    assert_eq!(verdict.label, StrengthLabel::Strong);
    assert!(verdict.suggestions.is_empty());
    assert!(bob.suggested_password.is_none());
}

#[tokio::test]
async fn form_carries_exactly_the_two_named_fields() {
    let target = Arc::new(FakeTarget::default());
    let tester = CredentialTester::new(target.clone(), options());

    tester
        .test(&request(), vec![Credential::new("alice", "abc")])
        .await
        .unwrap();

    let forms = target.forms.lock().unwrap();
    assert_eq!(forms.len(), 1);
    assert_eq!(forms[0], vec![
        ("user".to_string(), "alice".to_string()),
        ("pass".to_string(), "abc".to_string()),
    ]);
}

#[tokio::test]
async fn network_error_is_isolated_to_its_credential() {
    let target = Arc::new(FakeTarget::default());
    let tester = CredentialTester::new(target, options());

    let results = tester
        .test(&request(), vec![
            Credential::new("down-carol", "abc"),
            Credential::new("dave", "abc"),
            Credential::new("bad-erin", "Password1234"),
        ])
        .await
        .unwrap();

    let carol = find(&results, "down-carol");
    assert_eq!(carol.status, TestStatus::Error);
    assert!(carol.strength.is_none());
    assert!(carol.suggested_password.is_none());
    assert_eq!(carol.error.as_deref(), Some("connection refused"));

    let dave = find(&results, "dave");
    assert_eq!(dave.status, TestStatus::Success);
    assert!(dave.strength.is_some());

    let erin = find(&results, "bad-erin");
    assert_eq!(erin.status, TestStatus::Fail);
    assert_eq!(erin.strength.as_ref().unwrap().label, StrengthLabel::Moderate);
    assert!(erin.suggested_password.is_none());
}

#[tokio::test]
async fn every_credential_gets_exactly_one_result() {
    let target = Arc::new(FakeTarget::with_delay(Duration::from_millis(5)));
    let tester = CredentialTester::new(target.clone(), options());

    let credentials: Vec<Credential> = (0..60)
        .map(|i| match i % 3 {
            0 => Credential::new(format!("user{i}"), format!("pw{i}")),
            1 => Credential::new(format!("down-user{i}"), format!("pw{i}")),
            _ => Credential::new(format!("bad-user{i}"), format!("pw{i}")),
        })
        .collect();

    let results = tester.test(&request(), credentials.clone()).await.unwrap();

    assert_eq!(results.len(), credentials.len());
    let submitted: HashSet<_> = credentials.into_iter().collect();
    let returned: HashSet<_> = results
        .iter()
        .map(|r| Credential::new(r.username.clone(), r.password.clone()))
        .collect();
    assert_eq!(submitted, returned);
    assert_eq!(target.calls.load(Ordering::SeqCst), 60);
}

#[tokio::test]
async fn in_flight_attempts_never_exceed_concurrency() {
    let target = Arc::new(FakeTarget::with_delay(Duration::from_millis(10)));
    let tester = CredentialTester::new(target.clone(), TesterOptions {
        concurrency: 3,
        ..options()
    });

    let credentials: Vec<Credential> = (0..20)
        .map(|i| Credential::new(format!("user{i}"), "pw"))
        .collect();
    tester.test(&request(), credentials).await.unwrap();

    let peak = target.max_in_flight.load(Ordering::SeqCst);
    assert!(peak <= 3, "peak in-flight was {peak}");
    assert!(peak >= 2, "attempts were not run concurrently");
}

#[tokio::test]
async fn empty_batch_yields_no_results() {
    let target = Arc::new(FakeTarget::default());
    let tester = CredentialTester::new(target.clone(), options());

    let results = tester.test(&request(), Vec::new()).await.unwrap();

    assert!(results.is_empty());
    assert_eq!(target.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn invalid_request_is_rejected_before_any_attempt() {
    let target = Arc::new(FakeTarget::default());
    let tester = CredentialTester::new(target.clone(), options());

    let err = tester
        .test(
            &AuditRequest::new("", "user", "pass"),
            vec![Credential::new("alice", "abc")],
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AuditError::MissingParameter(_)));
    assert_eq!(target.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn missing_password_column_aborts_before_any_attempt() {
    let target = Arc::new(FakeTarget::default());
    let tester = CredentialTester::new(target.clone(), options());
    let (_handle, signal) = cancel_pair();

    let err = tester
        .audit_table(&request(), "username,secret\nalice,abc\n".as_bytes(), signal)
        .await
        .unwrap_err();

    assert!(matches!(err, AuditError::Import(CsvImportError::MissingColumn("password"))));
    assert_eq!(target.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn audit_table_tests_every_row() {
    let target = Arc::new(FakeTarget::default());
    let tester = CredentialTester::new(target.clone(), options());
    let (_handle, signal) = cancel_pair();

    let results = tester
        .audit_table(
            &request(),
            "username,password,notes\nalice,abc,x\nbad-bob,Tr0ub4dor&9!xyz,y\n".as_bytes(),
            signal,
        )
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(find(&results, "bad-bob").status, TestStatus::Fail);
}

#[tokio::test]
async fn hung_request_times_out_without_blocking_others() {
    let target = Arc::new(FakeTarget::default());
    let tester = CredentialTester::new(target, TesterOptions {
        request_timeout: Some(Duration::from_millis(100)),
        ..options()
    });

    let results = tester
        .test(&request(), vec![
            Credential::new("hang-frank", "abc"),
            Credential::new("grace", "abc"),
        ])
        .await
        .unwrap();

    let frank = find(&results, "hang-frank");
    assert_eq!(frank.status, TestStatus::Error);
    assert!(frank.error.as_deref().unwrap().contains("timed out"));
    assert!(frank.strength.is_none());

    assert_eq!(find(&results, "grace").status, TestStatus::Success);
    // grace finished first
    assert_eq!(results[0].username, "grace");
}

#[tokio::test]
async fn cancellation_reports_unfinished_credentials_as_errors() {
    let target = Arc::new(FakeTarget::default());
    let tester = CredentialTester::new(target, options());
    let (handle, signal) = cancel_pair();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.cancel();
    });

    let results = tester
        .test_with_cancel(
            &request(),
            vec![
                Credential::new("heidi", "abc"),
                Credential::new("hang-ivan", "abc"),
                Credential::new("hang-judy", "abc"),
            ],
            signal,
        )
        .await
        .unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(find(&results, "heidi").status, TestStatus::Success);
    for name in ["hang-ivan", "hang-judy"] {
        let result = find(&results, name);
        assert_eq!(result.status, TestStatus::Error);
        assert_eq!(result.error.as_deref(), Some(CANCELLED_MESSAGE));
    }
}

#[tokio::test]
async fn batch_deadline_bounds_the_whole_run() {
    let target = Arc::new(FakeTarget::default());
    let tester = CredentialTester::new(target, TesterOptions {
        batch_deadline: Some(Duration::from_millis(100)),
        ..options()
    });

    let results = tester
        .test(&request(), vec![
            Credential::new("hang-mallory", "abc"),
            Credential::new("niaj", "abc"),
        ])
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(find(&results, "niaj").status, TestStatus::Success);
    assert_eq!(find(&results, "hang-mallory").error.as_deref(), Some(DEADLINE_MESSAGE));
}
