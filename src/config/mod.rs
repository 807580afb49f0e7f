#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::batch::DEFAULT_MAX_WORKERS;
use crate::core::fetcher::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_run_settings, Validate};
use std::time::Duration;
use toml_config::TomlConfig;

/// Effective settings for one run, after flags and the config file are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub receipt_numbers: Vec<String>,
    pub before: u32,
    pub after: u32,
    pub max_workers: usize,
    pub endpoint: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Settings {
    pub fn new(receipt_numbers: Vec<String>) -> Self {
        Self {
            receipt_numbers,
            before: 0,
            after: 0,
            max_workers: DEFAULT_MAX_WORKERS,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn with_range(mut self, before: u32, after: u32) -> Self {
        self.before = before;
        self.after = after;
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Take every value the file sets. Command line overrides are applied afterwards.
    pub fn apply_file(mut self, file: &TomlConfig) -> Self {
        if let Some(endpoint) = &file.request.endpoint {
            self.endpoint = endpoint.clone();
        }
        if let Some(seconds) = file.request.timeout_seconds {
            self.timeout = Duration::from_secs(seconds);
        }
        if let Some(user_agent) = &file.request.user_agent {
            self.user_agent = user_agent.clone();
        }
        if let Some(workers) = file.batch.max_workers {
            self.max_workers = workers;
        }
        self
    }
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub max_workers: Option<usize>,
}

impl Overrides {
    pub fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(endpoint) = &self.endpoint {
            settings.endpoint = endpoint.clone();
        }
        if let Some(seconds) = self.timeout_seconds {
            settings.timeout = Duration::from_secs(seconds);
        }
        if let Some(workers) = self.max_workers {
            settings.max_workers = workers;
        }
        settings
    }
}

/// Merge receipt numbers, flags and an optional config file into [`Settings`].
pub fn resolve_settings(
    receipt_numbers: Vec<String>,
    before: u32,
    after: u32,
    overrides: &Overrides,
    config_file: Option<&str>,
) -> Result<Settings> {
    let mut settings = Settings::new(receipt_numbers).with_range(before, after);

    if let Some(path) = config_file {
        tracing::debug!("Loading configuration from {}", path);
        let file = TomlConfig::from_file(path)?;
        file.validate()?;
        settings = settings.apply_file(&file);
    }

    Ok(overrides.apply(settings))
}

impl ConfigProvider for Settings {
    fn receipt_numbers(&self) -> &[String] {
        &self.receipt_numbers
    }

    fn before(&self) -> u32 {
        self.before
    }

    fn after(&self) -> u32 {
        self.after
    }

    fn max_workers(&self) -> usize {
        self.max_workers
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_run_settings(self)
    }
}
