use crate::utils::error::{RstatError, Result};
use crate::utils::validation::{
    validate_range, validate_url, Validate, MAX_TIMEOUT_SECONDS, MAX_WORKERS_LIMIT,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid regex"));

/// Optional settings file. Every key may be omitted; command line flags win.
///
/// ```toml
/// [request]
/// endpoint = "${RSTAT_ENDPOINT}"
/// timeout_seconds = 20
/// user_agent = "my-checker/1.0"
///
/// [batch]
/// max_workers = 8
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TomlConfig {
    pub request: RequestConfig,
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RequestConfig {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    pub max_workers: Option<usize>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(&path).map_err(|e| RstatError::ConfigError {
                message: format!("cannot read {}: {}", path.as_ref().display(), e),
            })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replace `${VAR}` with the value of the environment variable.
    /// Unset variables are left as-is so validation can point at them.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(endpoint) = &self.request.endpoint {
            validate_url("request.endpoint", endpoint)?;
        }
        if let Some(timeout) = self.request.timeout_seconds {
            validate_range("request.timeout_seconds", timeout, 1, MAX_TIMEOUT_SECONDS)?;
        }
        if let Some(workers) = self.batch.max_workers {
            validate_range("batch.max_workers", workers, 1, MAX_WORKERS_LIMIT)?;
        }
        Ok(())
    }
}
