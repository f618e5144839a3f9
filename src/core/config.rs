// src/core/config.rs
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use log::LevelFilter;

// Configuration for the credential auditor
#[derive(Debug, Clone)]
pub struct Config {
    // Credential testing
    pub concurrency: usize,
    pub request_timeout: Option<Duration>,
    pub batch_deadline: Option<Duration>,
    pub max_redirects: usize,

    // Password suggestions
    pub suggested_password_length: usize,

    // Web Interface
    pub web_address: String,
    pub web_port: u16,
    pub max_upload_bytes: usize,

    // Logging
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Credential testing
            concurrency: 16,
            request_timeout: Some(Duration::from_secs(30)),
            batch_deadline: None,
            max_redirects: 30,

            // Password suggestions
            suggested_password_length: crate::generators::DEFAULT_PASSWORD_LENGTH,

            // Web Interface
            web_address: "127.0.0.1".to_string(),
            web_port: 5000,
            max_upload_bytes: 5 * 1024 * 1024,

            // Logging
            log_level: LevelFilter::Info,
            log_file: None,
        }
    }
}

impl Config {
    // Load configuration from environment variables
    pub fn load() -> (Self, Vec<String>) {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a configuration from any key lookup, falling back to defaults.
    ///
    /// Rejected values are returned as warnings so they can be logged once the
    /// logger exists.
    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<String>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        let mut warnings = Vec::new();

        // Credential testing
        if let Some(concurrency) = parse_value::<usize, F>("AUDIT_CONCURRENCY", &lookup, &mut warnings) {
            if concurrency == 0 {
                warnings.push("AUDIT_CONCURRENCY must be at least 1, using 1".to_string());
            }
            config.concurrency = concurrency.max(1);
        }

        // 0 disables the limit
        if let Some(secs) = parse_value::<u64, F>("REQUEST_TIMEOUT_SECS", &lookup, &mut warnings) {
            config.request_timeout = seconds(secs);
        }

        if let Some(secs) = parse_value::<u64, F>("BATCH_DEADLINE_SECS", &lookup, &mut warnings) {
            config.batch_deadline = seconds(secs);
        }

        if let Some(redirects) = parse_value("MAX_REDIRECTS", &lookup, &mut warnings) {
            config.max_redirects = redirects;
        }

        // Password suggestions
        if let Some(length) = parse_value("SUGGESTED_PASSWORD_LENGTH", &lookup, &mut warnings) {
            config.suggested_password_length = length;
        }

        // Web Interface
        if let Some(address) = lookup("WEB_ADDRESS") {
            config.web_address = address;
        }

        if let Some(port) = parse_value("WEB_PORT", &lookup, &mut warnings) {
            config.web_port = port;
        }

        if let Some(bytes) = parse_value("MAX_UPLOAD_BYTES", &lookup, &mut warnings) {
            config.max_upload_bytes = bytes;
        }

        // Logging
        if let Some(level) = lookup("LOG_LEVEL") {
            match level.to_lowercase().as_str() {
                "off" => config.log_level = LevelFilter::Off,
                "error" => config.log_level = LevelFilter::Error,
                "warn" => config.log_level = LevelFilter::Warn,
                "info" => config.log_level = LevelFilter::Info,
                "debug" => config.log_level = LevelFilter::Debug,
                "trace" => config.log_level = LevelFilter::Trace,
                _ => warnings.push(format!("Unknown log level '{}', using {}", level, config.log_level)),
            }
        }

        if let Some(file) = lookup("LOG_FILE") {
            if !file.trim().is_empty() {
                config.log_file = Some(PathBuf::from(file));
            }
        }

        (config, warnings)
    }
}

fn parse_value<T, F>(name: &str, lookup: &F, warnings: &mut Vec<String>) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(name)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warnings.push(format!("Ignoring invalid value '{}' for {}", raw, name));
            None
        }
    }
}

fn seconds(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load_from(pairs: &[(&str, &str)]) -> (Config, Vec<String>) {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        load_from(pairs).0
    }

    #[test]
    fn defaults_without_environment() {
        let config = config_from(&[]);

        assert_eq!(config.concurrency, 16);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.batch_deadline, None);
        assert_eq!(config.suggested_password_length, 12);
        assert_eq!(config.web_port, 5000);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = config_from(&[
            ("AUDIT_CONCURRENCY", "4"),
            ("REQUEST_TIMEOUT_SECS", "5"),
            ("BATCH_DEADLINE_SECS", "60"),
            ("WEB_PORT", "8080"),
            ("LOG_LEVEL", "DEBUG"),
            ("LOG_FILE", "audit.log"),
        ]);

        assert_eq!(config.concurrency, 4);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.batch_deadline, Some(Duration::from_secs(60)));
        assert_eq!(config.web_port, 8080);
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.log_file, Some(PathBuf::from("audit.log")));
    }

    #[test]
    fn zero_timeout_disables_it() {
        let config = config_from(&[("REQUEST_TIMEOUT_SECS", "0")]);
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let config = config_from(&[
            ("AUDIT_CONCURRENCY", "lots"),
            ("WEB_PORT", "99999"),
            ("LOG_LEVEL", "loud"),
        ]);

        assert_eq!(config.concurrency, 16);
        assert_eq!(config.web_port, 5000);
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn rejected_values_are_reported_as_warnings() {
        let (config, warnings) = load_from(&[
            ("AUDIT_CONCURRENCY", "lots"),
            ("REQUEST_TIMEOUT_SECS", "10"),
            ("LOG_LEVEL", "loud"),
        ]);

        assert_eq!(config.request_timeout, Some(Duration::from_secs(10)));
        assert_eq!(warnings, vec![
            "Ignoring invalid value 'lots' for AUDIT_CONCURRENCY".to_string(),
            "Unknown log level 'loud', using INFO".to_string(),
        ]);

        let (_, warnings) = load_from(&[("AUDIT_CONCURRENCY", "8"), ("LOG_LEVEL", "warn")]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn zero_concurrency_is_clamped() {
        assert_eq!(config_from(&[("AUDIT_CONCURRENCY", "0")]).concurrency, 1);
    }
}
