// src/cli/commands.rs
use std::path::PathBuf;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Run the HTTP API
    Serve {
        /// Address to bind
        #[arg(long)]
        address: Option<String>,

        /// Port to bind
        #[arg(long)]
        port: Option<u16>,
    },

    /// Test a CSV of credentials against a login form
    Audit {
        /// CSV file with username and password columns
        #[arg(long, required = true)]
        csv: PathBuf,

        /// Login form URL
        #[arg(long, required = true)]
        url: String,

        /// Form field carrying the username
        #[arg(long, required = true)]
        username_field: String,

        /// Form field carrying the password
        #[arg(long, required = true)]
        password_field: String,

        /// Maximum login attempts in flight
        #[arg(long)]
        concurrency: Option<usize>,

        /// Per-request timeout in seconds (0 disables)
        #[arg(long)]
        timeout: Option<u64>,

        /// Whole-batch deadline in seconds (0 disables)
        #[arg(long)]
        deadline: Option<u64>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Grade a password
    Strength {
        /// Password to grade
        #[arg(required = true)]
        password: String,
    },

    /// Generate a strong password
    Generate {
        /// Password length
        #[arg(long, short, default_value_t = 12)]
        length: usize,
    },
}
