// src/cli/handlers.rs
use std::fs::File;
use std::path::Path;
use std::time::Duration;
use anyhow::{Context, Result};
use console::style;
use credential_auditor::auditor::{cancel_pair, BatchSummary, CredentialTester};
use credential_auditor::core::config::Config;
use credential_auditor::generators::{generate_strong_password, PasswordGenerator};
use credential_auditor::models::{
    AuditRequest, PasswordGenerationOptions, StrengthLabel, StrengthVerdict, TestResult, TestStatus,
};
use credential_auditor::strength;

pub struct AuditArgs<'a> {
    pub csv: &'a Path,
    pub request: AuditRequest,
    pub concurrency: Option<usize>,
    pub timeout: Option<u64>,
    pub deadline: Option<u64>,
    pub json: bool,
}

// Handlers for CLI commands
pub async fn handle_audit(mut config: Config, args: AuditArgs<'_>) -> Result<()> {
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency.max(1);
    }
    if let Some(secs) = args.timeout {
        config.request_timeout = (secs > 0).then(|| Duration::from_secs(secs));
    }
    if let Some(secs) = args.deadline {
        config.batch_deadline = (secs > 0).then(|| Duration::from_secs(secs));
    }

    // Reject bad parameters before touching the file or the network
    args.request.validate()?;

    let table = File::open(args.csv)
        .with_context(|| format!("Failed to open {}", args.csv.display()))?;

    let tester = CredentialTester::from_config(&config)?;

    let (handle, signal) = cancel_pair();
    ctrlc::set_handler(move || {
        log::info!("Ctrl+C received, cancelling remaining login attempts");
        handle.cancel();
    })
    .context("Failed to set Ctrl+C handler")?;

    let results = tester.audit_table(&args.request, table, signal).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_results(&results);
    }

    Ok(())
}

pub fn handle_strength(password: &str, suggested_length: usize) {
    let verdict = strength::evaluate(password);
    print_verdict(&verdict);

    if verdict.label == StrengthLabel::Weak {
        let suggested = generate_strong_password(suggested_length);
        println!("    suggested password: {}", style(suggested).cyan());
    }
}

pub fn handle_generate(length: usize) -> Result<()> {
    let password = PasswordGenerator::new()
        .generate_password(&PasswordGenerationOptions { length })?;
    println!("{}", password);
    Ok(())
}

fn print_results(results: &[TestResult]) {
    for result in results {
        let status = match result.status {
            TestStatus::Success => style(result.status.to_string()).green().bold(),
            TestStatus::Fail => style(result.status.to_string()).yellow(),
            TestStatus::Error => style(result.status.to_string()).red().bold(),
        };
        println!("{} {}", status, style(&result.username).bold());

        if let Some(verdict) = &result.strength {
            print_verdict(verdict);
        }
        if let Some(suggested) = &result.suggested_password {
            println!("    suggested password: {}", style(suggested).cyan());
        }
        if let Some(error) = &result.error {
            println!("    error: {}", error);
        }
    }

    let summary = BatchSummary::from_results(results);
    println!();
    println!(
        "{} tested: {} succeeded, {} failed, {} errors, {} weak passwords",
        summary.total, summary.succeeded, summary.failed, summary.errored, summary.weak_passwords
    );
}

fn print_verdict(verdict: &StrengthVerdict) {
    let label = match verdict.label {
        StrengthLabel::Strong => style(verdict.label.to_string()).green(),
        StrengthLabel::Moderate => style(verdict.label.to_string()).yellow(),
        StrengthLabel::Weak => style(verdict.label.to_string()).red(),
    };
    println!("    strength: {} ({}/5)", label, verdict.score);
    for suggestion in &verdict.suggestions {
        println!("      - {}", suggestion);
    }
}
