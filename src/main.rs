use std::path::PathBuf;
use anyhow::Result;
use clap::Parser;
use credential_auditor::api;
use credential_auditor::core::config::Config;
use credential_auditor::logging;
use credential_auditor::models::AuditRequest;

mod cli;

use crate::cli::{Args, CliCommand};
use crate::cli::handlers::{self, AuditArgs};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let (mut config, config_warnings) = Config::load();
    if let Some(level) = args.log_level.as_deref().and_then(|l| l.parse::<log::LevelFilter>().ok()) {
        config.log_level = level;
    }
    if let Some(file) = &args.log_file {
        config.log_file = Some(PathBuf::from(file));
    }

    logging::init(config.log_level, config.log_file.as_deref())?;
    for warning in &config_warnings {
        log::warn!("{}", warning);
    }
    log::debug!("Loaded config: {:?}", config);

    match args.command {
        CliCommand::Serve { address, port } => {
            if let Some(address) = address {
                config.web_address = address;
            }
            if let Some(port) = port {
                config.web_port = port;
            }
            println!("🚀 API server starting on {}:{}", config.web_address, config.web_port);
            api::start_server(config).await?;
        }
        CliCommand::Audit {
            csv,
            url,
            username_field,
            password_field,
            concurrency,
            timeout,
            deadline,
            json,
        } => {
            let audit = AuditArgs {
                csv: &csv,
                request: AuditRequest::new(url, username_field, password_field),
                concurrency,
                timeout,
                deadline,
                json,
            };
            handlers::handle_audit(config, audit).await?;
        }
        CliCommand::Strength { password } => {
            handlers::handle_strength(&password, config.suggested_password_length)
        },
        CliCommand::Generate { length } => handlers::handle_generate(length)?,
    }

    Ok(())
}
